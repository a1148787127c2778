// src/fingers.rs - Extended/curled classification for the five fingers
use crate::landmarks::{
    HandObservation, Landmark, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP, PINKY_TIP,
    RING_PIP, RING_TIP, THUMB_IP, THUMB_MCP, THUMB_TIP,
};

pub const THUMB_EXTENDED_DEG: f64 = 150.0;

const FINGER_JOINTS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// Up/down state of thumb, index, middle, ring and pinky, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerState(pub [bool; 5]);

impl FingerState {
    pub const THUMB: usize = 0;
    pub const INDEX: usize = 1;
    pub const MIDDLE: usize = 2;
    pub const RING: usize = 3;
    pub const PINKY: usize = 4;

    pub fn classify(hand: &HandObservation) -> Self {
        Self::classify_with(hand, THUMB_EXTENDED_DEG)
    }

    pub fn classify_with(hand: &HandObservation, thumb_threshold_deg: f64) -> Self {
        let mut fingers = [false; 5];

        // The thumb swings sideways, so use the joint angle rather than height.
        let thumb_angle = joint_angle(
            hand.landmark(THUMB_MCP),
            hand.landmark(THUMB_IP),
            hand.landmark(THUMB_TIP),
        );
        fingers[Self::THUMB] = thumb_angle > thumb_threshold_deg;

        // Tip above the PIP joint; only valid for an upright hand.
        for (i, (tip, pip)) in FINGER_JOINTS.iter().enumerate() {
            fingers[i + 1] = hand.landmark(*tip).y < hand.landmark(*pip).y;
        }

        Self(fingers)
    }

    #[cfg(test)]
    pub fn from_bits(bits: [u8; 5]) -> Self {
        Self(bits.map(|b| b != 0))
    }

    #[cfg(test)]
    pub fn is(&self, pattern: [u8; 5]) -> bool {
        *self == Self::from_bits(pattern)
    }

    pub fn thumb(&self) -> bool {
        self.0[Self::THUMB]
    }

    pub fn index(&self) -> bool {
        self.0[Self::INDEX]
    }

    pub fn pinky(&self) -> bool {
        self.0[Self::PINKY]
    }

    #[cfg(test)]
    pub fn all_down(&self) -> bool {
        self.0.iter().all(|up| !up)
    }

    pub fn all_up(&self) -> bool {
        self.0.iter().all(|up| *up)
    }
}

/// Angle at `vertex` between the rays to `a` and `b`, in degrees within [0, 180].
pub fn joint_angle(a: &Landmark, vertex: &Landmark, b: &Landmark) -> f64 {
    let radians = (b.y - vertex.y).atan2(b.x - vertex.x) - (a.y - vertex.y).atan2(a.x - vertex.x);
    let angle = radians.to_degrees().abs();
    if angle > 180.0 {
        360.0 - angle
    } else {
        angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::fixtures::{flat_hand, hand};
    use nalgebra::Point2;

    fn thumb_at_angle(deg: f64) -> [[f64; 2]; 21] {
        let mut points = flat_hand();
        points[THUMB_IP] = [0.5, 0.5];
        points[THUMB_MCP] = [0.4, 0.5];
        let rad = (180.0 - deg).to_radians();
        points[THUMB_TIP] = [0.5 + 0.1 * rad.cos(), 0.5 + 0.1 * rad.sin()];
        points
    }

    #[test]
    fn test_straight_angle() {
        let a = Point2::new(0.0, 0.0);
        let v = Point2::new(1.0, 0.0);
        let b = Point2::new(2.0, 0.0);
        assert!((joint_angle(&a, &v, &b) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_angle_reflected_past_180() {
        // Rays straddle the negative x axis, so the raw atan2 difference is close to 360.
        let a = Point2::new(-1.0, 0.1);
        let v = Point2::new(0.0, 0.0);
        let b = Point2::new(-1.0, -0.1);
        let expected = 2.0 * 0.1_f64.atan().to_degrees();
        assert!((joint_angle(&a, &v, &b) - expected).abs() < 1e-9);
        assert!((joint_angle(&b, &v, &a) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_thumb_threshold() {
        assert!(FingerState::classify(&hand(thumb_at_angle(170.0))).thumb());
        assert!(FingerState::classify(&hand(thumb_at_angle(151.0))).thumb());
        assert!(!FingerState::classify(&hand(thumb_at_angle(120.0))).thumb());
    }

    #[test]
    fn test_thumb_boundary_is_down() {
        // Exact comparison at the threshold, independent of float error in the fixture.
        let h = hand(thumb_at_angle(150.0));
        let angle = joint_angle(h.landmark(THUMB_MCP), h.landmark(THUMB_IP), h.landmark(THUMB_TIP));
        assert!(!FingerState::classify_with(&h, angle).thumb());
    }

    #[test]
    fn test_finger_up_requires_strictly_higher_tip() {
        let mut points = flat_hand();
        points[INDEX_TIP] = [0.5, 0.30];
        points[INDEX_PIP] = [0.5, 0.40];
        points[MIDDLE_TIP] = [0.5, 0.40];
        points[MIDDLE_PIP] = [0.5, 0.40];
        points[RING_TIP] = [0.5, 0.60];
        points[RING_PIP] = [0.5, 0.40];
        let state = FingerState::classify(&hand(points));
        assert!(state.index());
        assert!(!state.0[FingerState::MIDDLE]);
        assert!(!state.0[FingerState::RING]);
    }

    #[test]
    fn test_flat_hand_is_all_down() {
        // Degenerate thumb: all three points coincide, atan2(0, 0) gives 0 degrees.
        let state = FingerState::classify(&hand(flat_hand()));
        assert!(state.all_down());
        assert!(state.is([0, 0, 0, 0, 0]));
    }
}
