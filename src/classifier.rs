//! Frame-local gesture classification.
//!
//! Every rule here is a pure function of the current [`LandmarkFrame`]: there
//! is no history and no debouncing. Hold durations and edge detection belong
//! to the mode controllers.

use crate::{
    constants::{DEFAULT_PINCH_THRESHOLD, FINGER_TIP_PIP_PAIRS, INDEX_TIP, THUMB_TIP},
    landmarks::{Hand, LandmarkFrame},
};
use log::trace;

/// Gesture facts derived from one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureFacts {
    /// Normalized thumb-tip to index-tip distance of the primary hand
    pub pinch_distance: Option<f64>,
    pub is_pinching: bool,
    pub is_fist: bool,
    pub hand_count: usize,
}

/// Rule-based classifier over normalized landmarks
#[derive(Debug, Clone, Copy)]
pub struct GestureClassifier {
    pinch_threshold: f64,
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_PINCH_THRESHOLD)
    }
}

impl GestureClassifier {
    #[must_use]
    pub const fn new(pinch_threshold: f64) -> Self {
        Self { pinch_threshold }
    }

    #[must_use]
    pub const fn pinch_threshold(&self) -> f64 {
        self.pinch_threshold
    }

    /// Classify the primary hand of `frame`
    #[must_use]
    pub fn classify(&self, frame: &LandmarkFrame) -> GestureFacts {
        let hand_count = frame.hand_count();
        let Some(hand) = frame.primary() else {
            return GestureFacts::default();
        };

        let pinch_distance = pinch_distance(hand);
        let facts = GestureFacts {
            pinch_distance,
            is_pinching: self.below_threshold(pinch_distance),
            is_fist: is_fist(hand),
            hand_count,
        };
        trace!("Classified frame: {facts:?}");
        facts
    }

    /// Whether `hand` is pinching under this classifier's threshold
    #[must_use]
    pub fn is_pinching(&self, hand: &Hand) -> bool {
        self.below_threshold(pinch_distance(hand))
    }

    fn below_threshold(&self, distance: Option<f64>) -> bool {
        distance.is_some_and(|d| d < self.pinch_threshold)
    }
}

/// Normalized Euclidean distance between thumb tip and index tip
#[must_use]
pub fn pinch_distance(hand: &Hand) -> Option<f64> {
    let thumb = hand.point(THUMB_TIP)?;
    let index = hand.point(INDEX_TIP)?;
    Some(thumb.distance(&index))
}

/// All four non-thumb fingers curled: each tip below its PIP joint
///
/// Image y grows downward, so "below" means a larger y.
#[must_use]
pub fn is_fist(hand: &Hand) -> bool {
    FINGER_TIP_PIP_PAIRS.iter().all(|&(tip, pip)| {
        match (hand.landmark(tip), hand.landmark(pip)) {
            (Some(tip), Some(pip)) => tip.y > pip.y,
            _ => false,
        }
    })
}
