//! Hand landmark data model and the frame normalizer.
//!
//! The external tracker reports, for every video frame, up to two hands of 21
//! normalized `{x, y, z}` points. [`normalize`] turns that raw result into a
//! canonical [`LandmarkFrame`]: at most [`MAX_HANDS`] hands, at most
//! [`NUM_HAND_LANDMARKS`] landmarks per hand, empty hands dropped.

use crate::{
    constants::{MAX_HANDS, NUM_HAND_LANDMARKS},
    utils::Point,
};
use serde::{Deserialize, Serialize};

/// One landmark as delivered by the tracker
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RawLandmark {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

/// Raw per-frame detection result from the hand tracker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawDetection {
    /// One landmark list per detected hand
    #[serde(default)]
    pub hands: Vec<Vec<RawLandmark>>,
}

impl RawDetection {
    /// A detection with no hands
    #[must_use]
    pub const fn empty() -> Self {
        Self { hands: Vec::new() }
    }
}

/// A tracked point on a hand in normalized camera space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Landmark {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Landmark {
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Projection onto the image plane
    #[must_use]
    pub const fn point(&self) -> Point {
        Point { x: self.x, y: self.y }
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<RawLandmark> for Landmark {
    fn from(raw: RawLandmark) -> Self {
        Self::new(raw.x, raw.y, raw.z)
    }
}

/// Ordered landmarks of one hand
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hand {
    landmarks: Vec<Landmark>,
}

impl Hand {
    /// Build a hand, keeping at most [`NUM_HAND_LANDMARKS`] points
    #[must_use]
    pub fn new(mut landmarks: Vec<Landmark>) -> Self {
        landmarks.truncate(NUM_HAND_LANDMARKS);
        Self { landmarks }
    }

    /// Landmark at `index`, or `None` when missing or non-finite
    #[must_use]
    pub fn landmark(&self, index: usize) -> Option<&Landmark> {
        self.landmarks.get(index).filter(|lm| lm.is_finite())
    }

    /// Image-plane position of the landmark at `index`
    #[must_use]
    pub fn point(&self, index: usize) -> Option<Point> {
        self.landmark(index).map(Landmark::point)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    /// Whether all 21 landmarks are present
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() == NUM_HAND_LANDMARKS
    }
}

/// Canonical per-frame hand data: zero, one or two hands
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LandmarkFrame {
    hands: Vec<Hand>,
}

impl LandmarkFrame {
    /// A frame with no hands
    #[must_use]
    pub const fn empty() -> Self {
        Self { hands: Vec::new() }
    }

    /// Build a frame from hands, keeping at most [`MAX_HANDS`] non-empty ones
    #[must_use]
    pub fn new(hands: Vec<Hand>) -> Self {
        let hands = hands
            .into_iter()
            .filter(|hand| !hand.is_empty())
            .take(MAX_HANDS)
            .collect();
        Self { hands }
    }

    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// The first reported hand, which drives single-hand gestures
    #[must_use]
    pub fn primary(&self) -> Option<&Hand> {
        self.hands.first()
    }

    #[must_use]
    pub fn hand_count(&self) -> usize {
        self.hands.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

/// Convert a raw detection result into a canonical [`LandmarkFrame`]
#[must_use]
pub fn normalize(raw: &RawDetection) -> LandmarkFrame {
    let hands = raw
        .hands
        .iter()
        .map(|points| Hand::new(points.iter().copied().map(Landmark::from).collect()))
        .collect();
    LandmarkFrame::new(hands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_hand(count: usize) -> Vec<RawLandmark> {
        (0..count)
            .map(|i| RawLandmark {
                x: i as f64 * 0.01,
                y: 0.5,
                z: 0.0,
            })
            .collect()
    }

    #[test]
    fn test_normalize_empty_detection() {
        let frame = normalize(&RawDetection::empty());
        assert!(frame.is_empty());
        assert_eq!(frame.hand_count(), 0);
        assert!(frame.primary().is_none());
    }

    #[test]
    fn test_normalize_two_hands() {
        let raw = RawDetection {
            hands: vec![raw_hand(21), raw_hand(21)],
        };
        let frame = normalize(&raw);
        assert_eq!(frame.hand_count(), 2);
        assert!(frame.hands().iter().all(Hand::is_complete));
    }

    #[test]
    fn test_normalize_caps_hand_count() {
        let raw = RawDetection {
            hands: vec![raw_hand(21), raw_hand(21), raw_hand(21)],
        };
        assert_eq!(normalize(&raw).hand_count(), 2);
    }

    #[test]
    fn test_normalize_drops_empty_hands() {
        let raw = RawDetection {
            hands: vec![Vec::new(), raw_hand(21)],
        };
        let frame = normalize(&raw);
        assert_eq!(frame.hand_count(), 1);
        assert!(frame.primary().is_some_and(Hand::is_complete));
    }

    #[test]
    fn test_hand_truncates_extra_landmarks() {
        let raw = RawDetection {
            hands: vec![raw_hand(30)],
        };
        let frame = normalize(&raw);
        assert_eq!(frame.primary().map(Hand::len), Some(21));
    }

    #[test]
    fn test_missing_and_invalid_landmarks_are_absent() {
        let mut points = raw_hand(10);
        points[3].x = f64::NAN;
        let hand = Hand::new(points.into_iter().map(Landmark::from).collect());

        assert!(hand.landmark(2).is_some());
        assert!(hand.landmark(3).is_none());
        assert!(hand.landmark(15).is_none());
        assert!(!hand.is_complete());
    }
}
