// src/video.rs - Webcam frames, mirrored so motion matches the screen
use anyhow::{Context, Result};
use image::{DynamicImage, ImageBuffer};
use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraFormat, CameraIndex, FrameFormat, RequestedFormat, RequestedFormatType, Resolution};
use nokhwa::Camera;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

pub struct CameraSource {
    camera: Arc<Mutex<Camera>>,
}

impl CameraSource {
    pub fn new(index: u32) -> Result<Self> {
        debug!(index, "opening camera");

        let format = CameraFormat::new(Resolution::new(640, 480), FrameFormat::MJPEG, 30);
        let requested = RequestedFormat::new::<RgbFormat>(RequestedFormatType::Exact(format));

        let camera = Camera::new(CameraIndex::Index(index), requested)
            .map_err(|e| anyhow::anyhow!("Failed to open camera {}: {}", index, e))?;

        info!(name = %camera.info().human_name(), "camera opened");
        Ok(Self {
            camera: Arc::new(Mutex::new(camera)),
        })
    }

    pub fn list_cameras() -> Vec<String> {
        match nokhwa::query(nokhwa::utils::ApiBackend::Auto) {
            Ok(cameras) => cameras.iter().map(|c| c.human_name()).collect(),
            Err(e) => {
                warn!("Failed to query cameras: {}", e);
                Vec::new()
            }
        }
    }

    /// Next frame as RGBA, flipped horizontally.
    pub fn read_frame(&mut self) -> Result<DynamicImage> {
        let mut cam = self
            .camera
            .lock()
            .map_err(|_| anyhow::anyhow!("camera lock poisoned"))?;

        if !cam.is_stream_open() {
            cam.open_stream()
                .map_err(|e| anyhow::anyhow!("Failed to open camera stream: {}", e))?;
        }

        let frame = cam
            .frame()
            .map_err(|e| anyhow::anyhow!("Failed to capture frame: {}", e))?;

        let decoded = frame
            .decode_image::<RgbFormat>()
            .map_err(|e| anyhow::anyhow!("Failed to decode frame: {}", e))?;

        let width = decoded.width();
        let height = decoded.height();
        let rgb_data = decoded.into_vec();

        let mut rgba_data = Vec::with_capacity((width * height * 4) as usize);
        for chunk in rgb_data.chunks(3) {
            rgba_data.extend_from_slice(chunk);
            rgba_data.push(255);
        }

        let img: image::RgbaImage = ImageBuffer::from_raw(width, height, rgba_data)
            .context("Failed to create image buffer")?;

        let flipped = image::imageops::flip_horizontal(&img);
        Ok(DynamicImage::ImageRgba8(flipped))
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        match self.camera.lock() {
            Ok(mut cam) => {
                if let Err(e) = cam.stop_stream() {
                    warn!("Failed to stop camera stream: {}", e);
                }
            }
            Err(_) => warn!("camera lock poisoned, stream left open"),
        }
    }
}
