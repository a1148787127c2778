// src/main.rs
mod app;
mod desktop;
mod mediapipe_bridge;
mod ui;
mod video;

use anyhow::Context;
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gesture_controller::{GestureConfig, GestureInterpreter};

use crate::desktop::EnigoActuator;
use crate::mediapipe_bridge::{DetectorSettings, HandDetector, MediaPipeBridge};
use crate::video::CameraSource;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Ok(p) = std::env::current_exe() {
        info!("Running from: {}", p.display());
    }

    let cameras = CameraSource::list_cameras();
    info!("Found {} camera(s)", cameras.len());
    for (i, name) in cameras.iter().enumerate() {
        info!("  [{}] {}", i, name);
    }

    let config = GestureConfig::default();
    info!(config = %serde_json::to_string(&config)?, "gesture config");

    let actuator = EnigoActuator::new().context("Failed to initialise input backend")?;
    let interpreter = GestureInterpreter::new(config, actuator);
    let camera = CameraSource::new(0).context("Failed to open camera")?;
    let detector = MediaPipeBridge::new(DetectorSettings::default())?;
    info!(
        detector = detector.name(),
        max_hands = detector.settings().max_hands,
        "hand detector ready"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 600.0])
            .with_min_inner_size([800.0, 480.0]),
        centered: true,
        ..Default::default()
    };

    let app = app::GestureControllerApp::new(interpreter, camera, Box::new(detector));

    eframe::run_native(
        "Gesture Controller",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(ui::create_visuals());
            Box::new(app)
        }),
    )
    .map_err(|e| anyhow::anyhow!("Error running application: {}", e))
}
