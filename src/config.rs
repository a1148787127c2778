// src/config.rs
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Thresholds and magnitudes for the gesture interpreter.
///
/// Distances are in normalized landmark units unless the name says pixels.
#[derive(Debug, Clone, Serialize)]
pub struct GestureConfig {
    pub thumb_extended_deg: f64,
    pub pinch_threshold: f64,
    pub smoothing: SmoothingConfig,
    pub zoom_threshold: f64,
    pub zoom_scroll: i32,
    pub scroll_amount: i32,
    pub swipe_threshold_px: i32,
    pub swipe_cooldown_frames: u32,
    pub screenshot_cooldown_frames: u32,
    #[serde(with = "millis")]
    pub click_settle: Duration,
    pub screenshot_dir: PathBuf,
}

/// Adaptive exponential smoothing parameters for the cursor.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SmoothingConfig {
    /// Movements shorter than this are treated as jitter and dropped.
    pub noise_threshold: f64,
    pub min_distance: f64,
    pub max_distance: f64,
    pub min_alpha: f64,
    pub max_alpha: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            noise_threshold: 0.003,
            min_distance: 0.01,
            max_distance: 0.2,
            min_alpha: 0.05,
            max_alpha: 0.6,
        }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            thumb_extended_deg: 150.0,
            pinch_threshold: 0.04,
            smoothing: SmoothingConfig::default(),
            zoom_threshold: 0.05,
            zoom_scroll: 100,
            scroll_amount: 30,
            swipe_threshold_px: 50,
            swipe_cooldown_frames: 20,
            screenshot_cooldown_frames: 30,
            click_settle: Duration::from_millis(300),
            screenshot_dir: PathBuf::from("."),
        }
    }
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }
}
