// src/smoothing.rs - Adaptive exponential smoothing of the cursor target
use nalgebra::Point2;

use crate::config::SmoothingConfig;

#[derive(Debug)]
pub struct CursorSmoother {
    config: SmoothingConfig,
    position: Point2<f64>,
    screen_width: u32,
    screen_height: u32,
}

impl CursorSmoother {
    pub fn new(config: SmoothingConfig, screen_width: u32, screen_height: u32) -> Self {
        Self {
            config,
            position: Point2::origin(),
            screen_width,
            screen_height,
        }
    }

    pub fn with_position(mut self, position: Point2<f64>) -> Self {
        self.position = position;
        self
    }

    /// Current smoothed position in normalized coordinates.
    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    /// Small hand movements get a small alpha (slow, precise), large ones track fast.
    pub fn alpha_for(&self, dist: f64) -> f64 {
        let c = &self.config;
        let t = ((dist - c.min_distance) / (c.max_distance - c.min_distance)).clamp(0.0, 1.0);
        c.min_alpha + t * (c.max_alpha - c.min_alpha)
    }

    /// Move the smoothed position toward `target`, returning the new screen pixel
    /// or `None` when the movement is below the noise threshold.
    pub fn update(&mut self, target: Point2<f64>) -> Option<(i32, i32)> {
        let delta = target - self.position;
        let dist = delta.norm();
        if dist < self.config.noise_threshold {
            return None;
        }

        self.position += delta * self.alpha_for(dist);
        Some(self.to_screen(self.position))
    }

    /// Linear map of [0, 1] onto the screen, clamping outside the range.
    pub fn to_screen(&self, p: Point2<f64>) -> (i32, i32) {
        (
            (p.x.clamp(0.0, 1.0) * self.screen_width as f64) as i32,
            (p.y.clamp(0.0, 1.0) * self.screen_height as f64) as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoother() -> CursorSmoother {
        CursorSmoother::new(SmoothingConfig::default(), 1920, 1080)
    }

    #[test]
    fn test_jitter_is_ignored() {
        let mut s = smoother().with_position(Point2::new(0.5, 0.5));
        assert_eq!(s.update(Point2::new(0.5001, 0.5001)), None);
        assert_eq!(s.position(), Point2::new(0.5, 0.5));
    }

    #[test]
    fn test_large_move_uses_max_alpha() {
        let mut s = smoother();
        let pixel = s.update(Point2::new(0.2, 0.0));
        assert!((s.position().x - 0.12).abs() < 1e-12);
        assert_eq!(s.position().y, 0.0);
        assert_eq!(pixel, Some((230, 0)));
    }

    #[test]
    fn test_alpha_interpolation() {
        let s = smoother();
        assert!((s.alpha_for(0.005) - 0.05).abs() < 1e-12);
        assert!((s.alpha_for(0.01) - 0.05).abs() < 1e-12);
        assert!((s.alpha_for(0.105) - 0.325).abs() < 1e-12);
        assert!((s.alpha_for(0.5) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_small_move_is_slow() {
        let mut s = smoother().with_position(Point2::new(0.5, 0.5));
        s.update(Point2::new(0.505, 0.5));
        // alpha 0.05 below the minimum distance
        assert!((s.position().x - 0.50025).abs() < 1e-12);
    }

    #[test]
    fn test_screen_mapping_clamps() {
        let s = smoother();
        assert_eq!(s.to_screen(Point2::new(-0.2, 1.5)), (0, 1080));
        assert_eq!(s.to_screen(Point2::new(0.5, 0.25)), (960, 270));
    }

    #[test]
    fn test_converges_then_stops_moving() {
        let mut s = smoother();
        let target = Point2::new(0.4, 0.6);
        let mut moves = 0;
        for _ in 0..500 {
            if s.update(target).is_some() {
                moves += 1;
            }
        }
        assert!(moves > 0);
        assert_eq!(s.update(target), None);
        assert!((s.position() - target).norm() < 0.003);
    }
}
