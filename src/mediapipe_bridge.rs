// src/mediapipe_bridge.rs - Seam for the external hand landmark detector
use anyhow::Result;
use image::DynamicImage;
use tracing::{info, warn};

use gesture_controller::HandObservation;

/// Produces zero to two 21-point hands per image.
pub trait HandDetector {
    fn detect(&mut self, image: &DynamicImage) -> Result<Vec<HandObservation>>;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct DetectorSettings {
    pub max_hands: usize,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
    pub model_complexity: u8,
}

impl Default for DetectorSettings {
    fn default() -> Self {
        Self {
            max_hands: 2,
            min_detection_confidence: 0.8,
            min_tracking_confidence: 0.8,
            model_complexity: 0,
        }
    }
}

/// Stub backend: no model is linked, so every image yields no hands.
pub struct MediaPipeBridge {
    settings: DetectorSettings,
    warned: bool,
}

impl MediaPipeBridge {
    pub fn new(settings: DetectorSettings) -> Result<Self> {
        info!(?settings, "hand detector configured");
        Ok(Self {
            settings,
            warned: false,
        })
    }

    pub fn settings(&self) -> &DetectorSettings {
        &self.settings
    }
}

impl HandDetector for MediaPipeBridge {
    fn detect(&mut self, _image: &DynamicImage) -> Result<Vec<HandObservation>> {
        if !self.warned {
            warn!("no landmark model linked, frames will report no hands");
            self.warned = true;
        }
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "mediapipe-stub"
    }
}
