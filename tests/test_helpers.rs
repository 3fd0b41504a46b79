//! Helper functions and utilities for tests
#![allow(dead_code)]

use gesture_engine::{
    commands::{Command, ControlEvent, SceneCommand, StrokeSegment},
    config::Config,
    engine::GestureEngine,
    landmarks::{RawDetection, RawLandmark},
    replay::{ReplayFrame, ReplaySession, ReplaySource, ReplayTracker},
    Result,
};

const THUMB_TIP: usize = 4;
const INDEX_TIP: usize = 8;
const PIPS: [usize; 4] = [6, 10, 14, 18];
const OTHER_TIPS: [usize; 3] = [12, 16, 20];

/// Open hand with the index fingertip at `(x, y)`, thumb well away from it
pub fn open_hand(x: f64, y: f64) -> Vec<RawLandmark> {
    let mut hand = vec![RawLandmark { x, y: y + 0.05, z: 0.0 }; 21];
    hand[INDEX_TIP] = RawLandmark { x, y, z: 0.0 };
    for tip in OTHER_TIPS {
        hand[tip] = RawLandmark { x, y, z: 0.0 };
    }
    for pip in PIPS {
        hand[pip] = RawLandmark { x, y: y + 0.05, z: 0.0 };
    }
    hand[THUMB_TIP] = RawLandmark { x: x + 0.2, y, z: 0.0 };
    hand
}

/// Open hand whose thumb and index tips are 0.03 apart
pub fn pinching_hand(x: f64, y: f64) -> Vec<RawLandmark> {
    let mut hand = open_hand(x, y);
    hand[THUMB_TIP] = RawLandmark { x: x + 0.03, y, z: 0.0 };
    hand
}

/// Closed hand: every fingertip below its PIP joint, no pinch
pub fn fist_hand(x: f64, y: f64) -> Vec<RawLandmark> {
    let mut hand = open_hand(x, y);
    hand[INDEX_TIP] = RawLandmark { x, y: y + 0.1, z: 0.0 };
    for tip in OTHER_TIPS {
        hand[tip] = RawLandmark { x, y: y + 0.1, z: 0.0 };
    }
    hand
}

/// Hand with every landmark at the same point
pub fn flat_hand(x: f64, y: f64) -> Vec<RawLandmark> {
    vec![RawLandmark { x, y, z: 0.0 }; 21]
}

pub fn detection(hands: Vec<Vec<RawLandmark>>) -> RawDetection {
    RawDetection { hands }
}

/// Default configuration on a 1000x800 canvas
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.canvas.width = 1000.0;
    config.canvas.height = 800.0;
    config
}

pub fn replay_frame(timestamp_ms: u64, hands: Vec<Vec<RawLandmark>>) -> ReplayFrame {
    ReplayFrame::new(timestamp_ms, hands)
}

/// Engine over a recorded session, built from `config`
pub fn replay_engine(config: &Config, frames: Vec<ReplayFrame>) -> Result<GestureEngine<ReplaySource, ReplayTracker>> {
    GestureEngine::from_config(config, ReplaySource::new(ReplaySession { frames }), ReplayTracker)
}

pub fn strokes(commands: &[Command]) -> Vec<&StrokeSegment> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::Stroke(segment) => Some(segment),
            _ => None,
        })
        .collect()
}

pub fn pulses(commands: &[Command]) -> Vec<f64> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::Scene(SceneCommand::Pulse { strength }) => Some(*strength),
            _ => None,
        })
        .collect()
}

pub fn rotations(commands: &[Command]) -> Vec<(f64, f64)> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::Scene(SceneCommand::Rotate { dx, dy }) => Some((*dx, *dy)),
            _ => None,
        })
        .collect()
}

pub fn control_events(commands: &[Command]) -> Vec<ControlEvent> {
    commands
        .iter()
        .filter_map(|c| match c {
            Command::Control(event) => Some(*event),
            _ => None,
        })
        .collect()
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
