// src/zoom.rs - Relative zoom from the distance between two index fingertips
use crate::landmarks::{distance, HandObservation, INDEX_TIP};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

#[derive(Debug, Clone)]
pub struct ZoomTracker {
    threshold: f64,
    baseline: Option<f64>,
}

impl ZoomTracker {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            baseline: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn baseline(&self) -> Option<f64> {
        self.baseline
    }

    /// Feed one two-hand frame. The first frame only records the baseline.
    pub fn update(&mut self, first: &HandObservation, second: &HandObservation) -> Option<ZoomDirection> {
        let dist = distance(first.landmark(INDEX_TIP), second.landmark(INDEX_TIP));
        self.update_distance(dist)
    }

    pub fn update_distance(&mut self, dist: f64) -> Option<ZoomDirection> {
        let Some(baseline) = self.baseline else {
            self.baseline = Some(dist);
            return None;
        };

        let diff = dist - baseline;
        if diff.abs() <= self.threshold {
            return None;
        }

        // Re-baseline so zoom steps are incremental
        self.baseline = Some(dist);
        Some(if diff > 0.0 {
            ZoomDirection::In
        } else {
            ZoomDirection::Out
        })
    }

    /// Forget the baseline once two-hand presence is lost.
    pub fn reset(&mut self) {
        self.baseline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::fixtures::{flat_hand, hand};

    #[test]
    fn test_first_frame_sets_baseline() {
        let mut zoom = ZoomTracker::new(0.05);
        assert_eq!(zoom.update_distance(0.10), None);
        assert!(zoom.is_active());
        assert_eq!(zoom.baseline(), Some(0.10));
    }

    #[test]
    fn test_zoom_in_rebaselines() {
        let mut zoom = ZoomTracker::new(0.05);
        zoom.update_distance(0.10);
        assert_eq!(zoom.update_distance(0.16), Some(ZoomDirection::In));
        assert_eq!(zoom.baseline(), Some(0.16));
        assert_eq!(zoom.update_distance(0.16), None);
    }

    #[test]
    fn test_zoom_out() {
        let mut zoom = ZoomTracker::new(0.05);
        zoom.update_distance(0.30);
        assert_eq!(zoom.update_distance(0.27), None);
        assert_eq!(zoom.update_distance(0.20), Some(ZoomDirection::Out));
        assert_eq!(zoom.baseline(), Some(0.20));
    }

    #[test]
    fn test_reset_rebaselines() {
        let mut zoom = ZoomTracker::new(0.05);
        zoom.update_distance(0.10);
        zoom.reset();
        assert!(!zoom.is_active());
        assert_eq!(zoom.update_distance(0.40), None);
        assert_eq!(zoom.baseline(), Some(0.40));
    }

    #[test]
    fn test_uses_index_tips() {
        let mut left = flat_hand();
        let mut right = flat_hand();
        left[INDEX_TIP] = [0.30, 0.5];
        right[INDEX_TIP] = [0.70, 0.5];
        let mut zoom = ZoomTracker::new(0.05);
        zoom.update(&hand(left), &hand(right));
        assert!((zoom.baseline().unwrap() - 0.40).abs() < 1e-12);
    }
}
