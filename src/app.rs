// src/app.rs
use crate::desktop::EnigoActuator;
use crate::mediapipe_bridge::HandDetector;
use crate::ui::{Theme, VideoWidget};
use crate::video::CameraSource;

use eframe::egui;
use gesture_controller::{Frame, FrameOutcome, GestureAction, GestureInterpreter, HandObservation};
use std::collections::VecDeque;
use std::time::Instant;
use tracing::{info, warn};

const METRICS_WINDOW: usize = 30;

/// Rolling averages over the last few frames. FPS comes from the interval
/// between frames, processing time from the capture-to-outcome span.
#[derive(Debug, Clone)]
pub struct PerformanceMetrics {
    pub avg_fps: f32,
    pub avg_processing_time: f32,
    frame_intervals: VecDeque<f32>,
    processing_times: VecDeque<f32>,
    last_frame: Option<Instant>,
}

impl PerformanceMetrics {
    pub fn new() -> Self {
        Self {
            avg_fps: 0.0,
            avg_processing_time: 0.0,
            frame_intervals: VecDeque::with_capacity(METRICS_WINDOW),
            processing_times: VecDeque::with_capacity(METRICS_WINDOW),
            last_frame: None,
        }
    }

    pub fn record_frame(&mut self, now: Instant) {
        if let Some(previous) = self.last_frame {
            let interval = push_sample(
                &mut self.frame_intervals,
                now.saturating_duration_since(previous).as_secs_f32(),
            );
            if interval > 0.0 {
                self.avg_fps = 1.0 / interval;
            }
        }
        self.last_frame = Some(now);
    }

    pub fn record_processing(&mut self, elapsed: f32) {
        self.avg_processing_time = push_sample(&mut self.processing_times, elapsed);
    }
}

/// Appends to a bounded window and returns the new mean.
fn push_sample(window: &mut VecDeque<f32>, value: f32) -> f32 {
    window.push_front(value);
    if window.len() > METRICS_WINDOW {
        window.pop_back();
    }
    window.iter().sum::<f32>() / window.len() as f32
}

pub struct GestureControllerApp {
    interpreter: GestureInterpreter<EnigoActuator>,
    camera: CameraSource,
    detector: Box<dyn HandDetector>,

    theme: Theme,
    video: VideoWidget,

    hands: Vec<HandObservation>,
    last_outcome: FrameOutcome,
    last_error: Option<String>,
    metrics: PerformanceMetrics,
    finished: bool,
}

impl GestureControllerApp {
    pub fn new(
        interpreter: GestureInterpreter<EnigoActuator>,
        camera: CameraSource,
        detector: Box<dyn HandDetector>,
    ) -> Self {
        Self {
            interpreter,
            camera,
            detector,
            theme: Theme::default(),
            video: VideoWidget::new(),
            hands: Vec::new(),
            last_outcome: FrameOutcome::default(),
            last_error: None,
            metrics: PerformanceMetrics::new(),
            finished: false,
        }
    }

    fn process_next_frame(&mut self, ctx: &egui::Context) {
        let started = Instant::now();
        self.metrics.record_frame(started);

        let image = match self.camera.read_frame() {
            Ok(image) => image,
            Err(e) => {
                self.report_error(format!("Camera error: {}", e));
                self.last_outcome = FrameOutcome::default();
                return;
            }
        };
        self.video.update_frame(ctx, &image);

        let hands = match self.detector.detect(&image) {
            Ok(hands) => hands,
            Err(e) => {
                self.report_error(format!("{} failed: {}", self.detector.name(), e));
                Vec::new()
            }
        };

        match Frame::new(hands.clone(), image.width(), image.height()) {
            Ok(frame) => {
                self.last_outcome = self.interpreter.process_frame(&frame, Instant::now());
                self.last_error = None;
            }
            Err(e) => self.report_error(format!("Rejected detector output: {}", e)),
        }
        self.hands = hands;

        self.metrics.record_processing(started.elapsed().as_secs_f32());
    }

    fn report_error(&mut self, message: String) {
        if self.last_error.as_deref() != Some(message.as_str()) {
            warn!("{}", message);
        }
        self.last_error = Some(message);
    }

    fn shutdown(&mut self) {
        if self.finished {
            return;
        }
        self.finished = true;

        let outcome = self.interpreter.finish();
        if !outcome.actions.is_empty() {
            info!(actions = outcome.actions.len(), "released held input on exit");
        }
    }

    fn render_status_panel(&self, ctx: &egui::Context) {
        egui::SidePanel::right("status").min_width(220.0).show(ctx, |ui| {
            ui.heading("Gesture Status");
            ui.separator();

            let state = self.interpreter.state();
            ui.label(format!("Hands: {}", self.hands.len()));
            ui.label(format!(
                "Cursor: ({:.3}, {:.3})",
                state.cursor().x,
                state.cursor().y
            ));

            let drag_color = if state.is_dragging() {
                self.theme.secondary
            } else {
                self.theme.text_secondary
            };
            ui.colored_label(
                drag_color,
                if state.is_dragging() { "Dragging" } else { "Not dragging" },
            );

            if let Some(baseline) = state.zoom_baseline() {
                ui.label(format!("Zoom baseline: {:.3}", baseline));
            }
            ui.label(format!("Swipe cooldown: {}", state.swipe_cooldown()));
            ui.label(format!("Screenshot cooldown: {}", state.screenshot_cooldown()));

            ui.add_space(10.0);
            ui.separator();
            ui.label("Last actions:");
            for action in &self.last_outcome.actions {
                let text = match action {
                    GestureAction::MoveCursor { x, y } => format!("Move ({}, {})", x, y),
                    GestureAction::Screenshot(path) => format!("Screenshot {}", path.display()),
                    other => other.label().map(str::to_string).unwrap_or_else(|| format!("{:?}", other)),
                };
                ui.colored_label(self.theme.text_primary, text);
            }

            ui.add_space(10.0);
            ui.separator();
            ui.label(format!("FPS: {:.1}", self.metrics.avg_fps));
            ui.label(format!(
                "Processing: {:.1} ms",
                self.metrics.avg_processing_time * 1000.0
            ));

            if let Some(error) = &self.last_error {
                ui.add_space(10.0);
                ui.colored_label(egui::Color32::from_rgb(244, 67, 54), error.as_str());
            }

            ui.add_space(10.0);
            ui.label(
                egui::RichText::new("Press Q to quit")
                    .small()
                    .color(self.theme.text_secondary),
            );
        });
    }
}

impl eframe::App for GestureControllerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Q)) {
            self.shutdown();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        self.process_next_frame(ctx);

        self.render_status_panel(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            self.video
                .show(ui, &self.theme, &self.hands, self.last_outcome.label);
        });

        ctx.request_repaint();
    }
}

impl Drop for GestureControllerApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fps_uses_interval_between_frames() {
        let mut metrics = PerformanceMetrics::new();
        let start = Instant::now();

        metrics.record_frame(start);
        assert_eq!(metrics.avg_fps, 0.0);

        // 50 ms between frames, 5 ms spent on each
        for i in 1..=3 {
            metrics.record_frame(start + Duration::from_millis(50 * i));
            metrics.record_processing(0.005);
        }
        assert!((metrics.avg_fps - 20.0).abs() < 0.01);
        assert!((metrics.avg_processing_time - 0.005).abs() < 1e-6);
    }

    #[test]
    fn test_metrics_window_is_bounded() {
        let mut metrics = PerformanceMetrics::new();
        for _ in 0..METRICS_WINDOW {
            metrics.record_processing(1.0);
        }
        for _ in 0..METRICS_WINDOW {
            metrics.record_processing(0.01);
        }
        assert_eq!(metrics.processing_times.len(), METRICS_WINDOW);
        assert!((metrics.avg_processing_time - 0.01).abs() < 1e-6);
    }
}
