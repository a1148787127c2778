// src/ui.rs - Camera view with hand skeleton and action overlay
use eframe::egui::{self, Color32, Pos2, Rect, Stroke, Vec2};
use image::DynamicImage;

use gesture_controller::HandObservation;

// MediaPipe hand skeleton edges
const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (0, 1), (1, 2), (2, 3), (3, 4),
    (0, 5), (5, 6), (6, 7), (7, 8),
    (5, 9), (9, 10), (10, 11), (11, 12),
    (9, 13), (13, 14), (14, 15), (15, 16),
    (13, 17), (17, 18), (18, 19), (19, 20),
    (0, 17),
];

#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color32,
    pub secondary: Color32,
    pub surface: Color32,
    pub success: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color32::from_rgb(70, 130, 240),
            secondary: Color32::from_rgb(255, 152, 0),
            surface: Color32::from_rgb(30, 30, 35),
            success: Color32::from_rgb(76, 175, 80),
            text_primary: Color32::WHITE,
            text_secondary: Color32::from_rgb(200, 200, 200),
        }
    }
}

pub fn create_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();

    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(30, 30, 35);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(45, 45, 52);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(55, 55, 65);
    visuals.widgets.active.bg_fill = Color32::from_rgb(70, 130, 240);
    visuals.window_rounding = egui::Rounding::same(12.0);

    visuals
}

pub struct VideoWidget {
    texture: Option<egui::TextureHandle>,
    aspect_ratio: f32,
}

impl VideoWidget {
    pub fn new() -> Self {
        Self {
            texture: None,
            aspect_ratio: 4.0 / 3.0,
        }
    }

    pub fn update_frame(&mut self, ctx: &egui::Context, frame: &DynamicImage) {
        let size = [frame.width() as usize, frame.height() as usize];
        let rgba = frame.to_rgba8();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());

        if frame.height() > 0 {
            self.aspect_ratio = frame.width() as f32 / frame.height() as f32;
        }

        match &mut self.texture {
            Some(texture) => texture.set(color_image, Default::default()),
            None => {
                self.texture = Some(ctx.load_texture("video_frame", color_image, Default::default()))
            }
        }
    }

    pub fn show(
        &self,
        ui: &mut egui::Ui,
        theme: &Theme,
        hands: &[HandObservation],
        label: Option<&str>,
    ) {
        let widget_width = ui.available_width();
        let size = Vec2::new(widget_width, widget_width / self.aspect_ratio);
        let (rect, _response) = ui.allocate_exact_size(size, egui::Sense::hover());
        let painter = ui.painter_at(rect);

        match &self.texture {
            Some(texture) => {
                painter.image(
                    texture.id(),
                    rect,
                    Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                    Color32::WHITE,
                );
            }
            None => {
                painter.rect_filled(rect, egui::Rounding::same(4.0), theme.surface);
                painter.text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "No Video Signal",
                    egui::FontId::proportional(16.0),
                    theme.text_secondary,
                );
            }
        }

        for hand in hands {
            draw_hand_skeleton(&painter, rect, hand, theme);
        }

        if let Some(label) = label {
            painter.text(
                rect.left_top() + Vec2::new(50.0, 50.0),
                egui::Align2::LEFT_CENTER,
                label,
                egui::FontId::proportional(28.0),
                theme.success,
            );
        }
    }
}

fn draw_hand_skeleton(painter: &egui::Painter, rect: Rect, hand: &HandObservation, theme: &Theme) {
    let to_screen = |index: usize| {
        let lm = hand.landmark(index);
        Pos2::new(
            rect.left() + lm.x as f32 * rect.width(),
            rect.top() + lm.y as f32 * rect.height(),
        )
    };

    for (from, to) in HAND_CONNECTIONS {
        painter.line_segment([to_screen(from), to_screen(to)], Stroke::new(2.0, theme.primary));
    }

    for index in 0..hand.landmarks().len() {
        painter.circle_filled(to_screen(index), 4.0, theme.secondary);
    }
}
