// src/landmarks.rs - Per-frame hand landmark types supplied by the detector
use nalgebra::Point2;

use crate::error::LandmarkError;

/// Normalized image coordinates, x and y in [0, 1], y growing downward.
pub type Landmark = Point2<f64>;

pub const LANDMARK_COUNT: usize = 21;
pub const MAX_HANDS: usize = 2;

// MediaPipe hand landmark indices
pub const WRIST: usize = 0;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// One detected hand: the full 21-point skeleton in anatomical order.
#[derive(Debug, Clone, PartialEq)]
pub struct HandObservation {
    landmarks: [Landmark; LANDMARK_COUNT],
}

impl HandObservation {
    pub fn new(landmarks: &[Landmark]) -> Result<Self, LandmarkError> {
        let landmarks: [Landmark; LANDMARK_COUNT] = landmarks
            .try_into()
            .map_err(|_| LandmarkError::WrongLandmarkCount(landmarks.len()))?;

        if let Some(index) = landmarks
            .iter()
            .position(|lm| !lm.x.is_finite() || !lm.y.is_finite())
        {
            return Err(LandmarkError::NonFinite { index });
        }

        Ok(Self { landmarks })
    }

    pub fn from_xy(points: &[[f64; 2]]) -> Result<Self, LandmarkError> {
        let landmarks: Vec<Landmark> = points.iter().map(|p| Point2::new(p[0], p[1])).collect();
        Self::new(&landmarks)
    }

    pub fn landmark(&self, index: usize) -> &Landmark {
        &self.landmarks[index]
    }

    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Distance between thumb tip and index tip in normalized units.
    pub fn pinch_distance(&self) -> f64 {
        distance(self.landmark(INDEX_TIP), self.landmark(THUMB_TIP))
    }
}

/// Everything the detector produced for one captured image.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    hands: Vec<HandObservation>,
    width: u32,
    height: u32,
}

impl Frame {
    pub fn new(hands: Vec<HandObservation>, width: u32, height: u32) -> Result<Self, LandmarkError> {
        if hands.len() > MAX_HANDS {
            return Err(LandmarkError::TooManyHands(hands.len()));
        }
        Ok(Self { hands, width, height })
    }

    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            hands: Vec::new(),
            width,
            height,
        }
    }

    pub fn hands(&self) -> &[HandObservation] {
        &self.hands
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Landmark position in frame pixels, truncated toward zero.
    pub fn to_pixel(&self, landmark: &Landmark) -> (i32, i32) {
        (
            (landmark.x * self.width as f64) as i32,
            (landmark.y * self.height as f64) as i32,
        )
    }
}

pub fn distance(a: &Landmark, b: &Landmark) -> f64 {
    nalgebra::distance(a, b)
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_wrong_landmark_count() {
        let points = vec![Point2::new(0.1, 0.1); 20];
        assert_eq!(
            HandObservation::new(&points),
            Err(LandmarkError::WrongLandmarkCount(20))
        );
    }

    #[test]
    fn test_non_finite_landmark_rejected() {
        let mut points = flat_hand();
        points[7] = [f64::NAN, 0.2];
        assert_eq!(
            HandObservation::from_xy(&points),
            Err(LandmarkError::NonFinite { index: 7 })
        );
    }

    #[test]
    fn test_too_many_hands() {
        let h = hand(flat_hand());
        let result = Frame::new(vec![h.clone(), h.clone(), h], 640, 480);
        assert_eq!(result, Err(LandmarkError::TooManyHands(3)));
    }

    #[test]
    fn test_pinch_distance() {
        let mut points = flat_hand();
        points[THUMB_TIP] = [0.40, 0.50];
        points[INDEX_TIP] = [0.43, 0.54];
        let h = hand(points);
        assert!((h.pinch_distance() - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_to_pixel_truncates() {
        let frame = Frame::empty(640, 480);
        assert_eq!(frame.to_pixel(&Point2::new(0.2499, 0.5)), (159, 240));
    }
}
