//! Engine lifecycle and replay playback tests

mod test_helpers;

use gesture_engine::{
    classifier::GestureClassifier,
    dispatcher::ModeDispatcher,
    engine::{FrameSource, GestureEngine, HandTracker, StepOutcome},
    landmarks::RawDetection,
    modes::{drawing::DrawingTool, CanvasSize, Mode},
    replay::{play, ReplaySession, ReplaySource},
    Error, Result,
};
use test_helpers::*;

/// Source that counts how often it was acquired and released
#[derive(Default)]
struct CountingSource {
    opened: u32,
    released: u32,
}

impl FrameSource for CountingSource {
    type Frame = ();

    fn open(&mut self) -> Result<()> {
        self.opened += 1;
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<()>> {
        Ok(Some(()))
    }

    fn release(&mut self) {
        self.released += 1;
    }
}

struct BrokenTracker;

impl HandTracker<()> for BrokenTracker {
    fn initialize(&mut self) -> Result<()> {
        Err(Error::Tracker("model file not found".to_string()))
    }

    fn detect(&mut self, _frame: &()) -> Result<RawDetection> {
        Ok(RawDetection::empty())
    }
}

fn canvas() -> CanvasSize {
    CanvasSize {
        width: 1000.0,
        height: 800.0,
    }
}

#[test]
fn test_setup_failure_leaves_nothing_running() {
    let mut engine = GestureEngine::new(
        CountingSource::default(),
        BrokenTracker,
        GestureClassifier::default(),
        ModeDispatcher::default(),
        canvas(),
    );

    match engine.start() {
        Err(Error::Setup(msg)) => assert!(msg.contains("model file not found")),
        other => panic!("Expected Setup error, got {other:?}"),
    }
    assert!(!engine.is_running());
    assert_eq!(engine.source().opened, 1);
    assert_eq!(engine.source().released, 1);
    assert_eq!(engine.step(0).unwrap(), StepOutcome::NotRunning);

    // Nothing left to release
    engine.stop();
    assert_eq!(engine.source().released, 1);
}

#[test]
fn test_stop_before_start_and_twice() {
    let mut engine = replay_engine(&test_config(), vec![replay_frame(0, Vec::new())]).unwrap();
    engine.stop();
    assert!(!engine.is_running());

    engine.start().unwrap();
    assert!(engine.source().is_open());
    engine.stop();
    engine.stop();
    assert!(!engine.source().is_open());
}

#[test]
fn test_stop_clears_transient_state() {
    let frames = vec![
        replay_frame(0, vec![pinching_hand(0.40, 0.50)]),
        replay_frame(33, vec![pinching_hand(0.42, 0.50)]),
    ];
    let mut engine = replay_engine(&test_config(), frames).unwrap();
    engine.start().unwrap();
    engine.step(0).unwrap();
    assert!(engine.pointer().is_active());

    engine.stop();
    assert!(!engine.pointer().is_active());
}

#[test]
fn test_tracker_errors_skip_frames_and_keep_state() {
    let mut failing = replay_frame(33, Vec::new());
    failing.error = Some("inference".to_string());
    let mut failing_again = replay_frame(66, Vec::new());
    failing_again.error = Some("inference".to_string());

    let frames = vec![
        replay_frame(0, vec![pinching_hand(0.40, 0.50)]),
        failing,
        failing_again,
        replay_frame(99, vec![pinching_hand(0.42, 0.50)]),
    ];
    let mut engine = replay_engine(&test_config(), frames).unwrap();

    let mut segments = 0;
    let summary = play(&mut engine, |_, output| segments += strokes(&output.commands).len()).unwrap();

    assert_eq!(summary.frames, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(engine.skipped_frames(), 2);
    // Pointer survived the failures, so the stroke continued
    assert_eq!(segments, 1);
    assert!(!engine.is_running());
}

#[test]
fn test_replay_applies_recorded_mode_and_tool_switches() {
    let mut to_navigation = replay_frame(33, vec![fist_hand(0.5, 0.5)]);
    to_navigation.mode = Some(Mode::Navigation);
    let mut tool_change = replay_frame(2_000, Vec::new());
    tool_change.tool = Some(DrawingTool::TwoHands);

    let frames = vec![
        replay_frame(0, vec![pinching_hand(0.40, 0.50)]),
        to_navigation,
        replay_frame(1_233, vec![open_hand(0.5, 0.5)]),
        tool_change,
    ];
    let mut engine = replay_engine(&test_config(), frames).unwrap();

    let mut modes = Vec::new();
    let mut pulse_count = 0;
    play(&mut engine, |_, output| {
        modes.push(output.mode);
        pulse_count += pulses(&output.commands).len();
    })
    .unwrap();

    assert_eq!(modes, vec![Mode::Drawing, Mode::Navigation, Mode::Navigation, Mode::Navigation]);
    assert_eq!(pulse_count, 1);
    assert_eq!(engine.tool(), DrawingTool::TwoHands);
    assert_eq!(engine.ranking().len(), 1);
}

#[test]
fn test_replay_from_yaml_session() {
    let yaml = r"
frames:
  - timestamp_ms: 0
    mode: ui_control
    hands: []
  - timestamp_ms: 16
    error: inference
  - timestamp_ms: 32
    hands: []
";
    let session = ReplaySession::from_yaml(yaml).unwrap();
    let mut engine =
        GestureEngine::from_config(&test_config(), ReplaySource::new(session), gesture_engine::replay::ReplayTracker)
            .unwrap();
    let summary = play(&mut engine, |_, _| {}).unwrap();

    assert_eq!(summary.frames, 2);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.commands, 0);
    assert_eq!(engine.mode(), Mode::UiControl);
}

#[test]
fn test_invalid_config_rejected_by_engine() {
    let mut config = test_config();
    config.classifier.pinch_threshold = -1.0;
    assert!(matches!(
        replay_engine(&config, Vec::new()),
        Err(Error::ConfigError(_))
    ));
}
