//! Recorded landmark sessions.
//!
//! A session is a YAML list of frames, each carrying the tracker output for
//! that frame plus optional mode/tool requests and simulated tracker errors.
//! [`ReplaySource`] and [`ReplayTracker`] plug a session into the engine in
//! place of a camera and an inference model.

use crate::{
    engine::{FrameOutput, FrameSource, GestureEngine, HandTracker, RunSummary, StepOutcome},
    landmarks::{RawDetection, RawLandmark},
    modes::{drawing::DrawingTool, Mode},
    Error, Result,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One recorded frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    /// Capture time in milliseconds
    pub timestamp_ms: u64,

    /// Tracker output, one landmark list per hand
    #[serde(default)]
    pub hands: Vec<Vec<RawLandmark>>,

    /// Mode switch requested before this frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,

    /// Drawing tool switch requested before this frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<DrawingTool>,

    /// Tracker failure to simulate on this frame
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReplayFrame {
    #[must_use]
    pub fn new(timestamp_ms: u64, hands: Vec<Vec<RawLandmark>>) -> Self {
        Self {
            timestamp_ms,
            hands,
            mode: None,
            tool: None,
            error: None,
        }
    }
}

/// A complete recorded session
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReplaySession {
    pub frames: Vec<ReplayFrame>,
}

impl ReplaySession {
    /// Load a session from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a session from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::InvalidInput(format!("Failed to parse replay session: {e}")))
    }

    /// Serialize the session to YAML text
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| Error::InvalidInput(format!("Failed to serialize replay session: {e}")))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Frame source that yields the frames of a recorded session in order
#[derive(Debug, Clone, Default)]
pub struct ReplaySource {
    session: ReplaySession,
    cursor: usize,
    open: bool,
}

impl ReplaySource {
    #[must_use]
    pub fn new(session: ReplaySession) -> Self {
        Self {
            session,
            cursor: 0,
            open: false,
        }
    }

    /// Frame that the next call to `next_frame` will return
    #[must_use]
    pub fn peek(&self) -> Option<&ReplayFrame> {
        if self.open {
            self.session.frames.get(self.cursor)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.session.len().saturating_sub(self.cursor)
    }
}

impl FrameSource for ReplaySource {
    type Frame = ReplayFrame;

    fn open(&mut self) -> Result<()> {
        info!("Opening replay session with {} frame(s)", self.session.len());
        self.cursor = 0;
        self.open = true;
        Ok(())
    }

    fn next_frame(&mut self) -> Result<Option<ReplayFrame>> {
        if !self.open {
            return Err(Error::FrameSource("Replay source is not open".to_string()));
        }
        let frame = self.session.frames.get(self.cursor).cloned();
        if frame.is_some() {
            self.cursor += 1;
        }
        Ok(frame)
    }

    fn release(&mut self) {
        if self.open {
            debug!("Releasing replay source at frame {}", self.cursor);
        }
        self.open = false;
    }
}

/// Tracker that returns the landmarks recorded in each frame
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayTracker;

impl HandTracker<ReplayFrame> for ReplayTracker {
    fn initialize(&mut self) -> Result<()> {
        Ok(())
    }

    fn detect(&mut self, frame: &ReplayFrame) -> Result<RawDetection> {
        if let Some(error) = &frame.error {
            return Err(Error::Tracker(error.clone()));
        }
        Ok(RawDetection {
            hands: frame.hands.clone(),
        })
    }
}

/// Play a session through the engine, using recorded timestamps as the clock.
///
/// Mode and tool requests recorded on a frame are issued just before that
/// frame, so they take effect at its boundary.
pub fn play<F>(engine: &mut GestureEngine<ReplaySource, ReplayTracker>, mut on_frame: F) -> Result<RunSummary>
where
    F: FnMut(u64, &FrameOutput),
{
    engine.start()?;
    let mut summary = RunSummary::default();

    while let Some(next) = engine.source().peek() {
        let now_ms = next.timestamp_ms;
        let (mode, tool) = (next.mode, next.tool);
        if let Some(mode) = mode {
            engine.request_mode(mode);
        }
        if let Some(tool) = tool {
            engine.request_tool(tool);
        }

        let outcome = engine.step(now_ms)?;
        summary.record(&outcome);
        match outcome {
            StepOutcome::Processed(output) => on_frame(now_ms, &output),
            StepOutcome::Skipped => {}
            StepOutcome::EndOfStream | StepOutcome::NotRunning => break,
        }
    }

    engine.stop();
    info!(
        "Replay finished: {} frame(s), {} skipped, {} command(s)",
        summary.frames, summary.skipped, summary.commands
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SESSION: &str = r"
frames:
  - timestamp_ms: 0
    hands: []
  - timestamp_ms: 16
    mode: navigation
    hands:
      - [{x: 0.4, y: 0.5}, {x: 0.41, y: 0.5, z: 0.1}]
  - timestamp_ms: 32
    error: inference
";

    #[test]
    fn test_parse_session() {
        let session = ReplaySession::from_yaml(SESSION).unwrap();
        assert_eq!(session.len(), 3);
        assert_eq!(session.frames[1].mode, Some(Mode::Navigation));
        assert_eq!(session.frames[1].hands[0].len(), 2);
        assert_eq!(session.frames[1].hands[0][0].z, 0.0);
        assert_eq!(session.frames[2].error.as_deref(), Some("inference"));
        assert!(session.frames[2].hands.is_empty());
    }

    #[test]
    fn test_invalid_session_is_rejected() {
        assert!(matches!(
            ReplaySession::from_yaml("frames: 3"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_source_requires_open() {
        let mut source = ReplaySource::new(ReplaySession::from_yaml(SESSION).unwrap());
        assert!(source.next_frame().is_err());
        assert!(source.peek().is_none());

        source.open().unwrap();
        assert_eq!(source.peek().map(|f| f.timestamp_ms), Some(0));
        assert_eq!(source.next_frame().unwrap().map(|f| f.timestamp_ms), Some(0));
        assert_eq!(source.remaining(), 2);
        source.release();
        source.release();
        assert!(!source.is_open());
    }

    #[test]
    fn test_tracker_replays_recorded_error() {
        let session = ReplaySession::from_yaml(SESSION).unwrap();
        let mut tracker = ReplayTracker;
        assert_eq!(tracker.detect(&session.frames[1]).unwrap().hands.len(), 1);
        assert!(matches!(tracker.detect(&session.frames[2]), Err(Error::Tracker(_))));
    }
}
