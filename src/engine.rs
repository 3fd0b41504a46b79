//! Engine lifecycle: frame acquisition, tracking, classification and dispatch.
//!
//! The engine owns a [`FrameSource`] and a [`HandTracker`] and drives one
//! classify-dispatch cycle per delivered frame. Setup either fully succeeds
//! or leaves nothing running. Per-frame tracker failures skip the frame and
//! keep every controller's state.

use crate::{
    classifier::{GestureClassifier, GestureFacts},
    commands::Command,
    config::Config,
    dispatcher::ModeDispatcher,
    landmarks::{normalize, RawDetection},
    modes::{
        drawing::DrawingTool,
        navigation::{ChargeState, TwoHandState},
        ui_control::UiControlState,
        CanvasSize, FrameContext, Mode,
    },
    ranking::RankingBuffer,
    smoother::PointerState,
    Error, Result,
};
use log::{debug, info, warn};
use std::time::Instant;

/// Source of camera frames (or anything the tracker consumes)
pub trait FrameSource {
    /// Frame type handed to the tracker
    type Frame;

    /// Acquire the underlying device or stream
    fn open(&mut self) -> Result<()>;

    /// Next frame, or `None` once the stream is exhausted
    fn next_frame(&mut self) -> Result<Option<Self::Frame>>;

    /// Release the underlying device or stream. Must be safe to call repeatedly.
    fn release(&mut self);
}

/// Hand-landmark inference over frames of type `F`
pub trait HandTracker<F> {
    /// Load models and prepare for inference
    fn initialize(&mut self) -> Result<()>;

    /// Detect up to two hands in a frame
    fn detect(&mut self, frame: &F) -> Result<RawDetection>;
}

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock measured from construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self { start: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Result of one processed frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub facts: GestureFacts,
    /// Mode that processed the frame
    pub mode: Mode,
    pub commands: Vec<Command>,
}

/// What a single [`GestureEngine::step`] did
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Frame was classified and dispatched
    Processed(FrameOutput),
    /// Tracker failed on this frame; state retained
    Skipped,
    /// Frame source is exhausted
    EndOfStream,
    /// Engine has not been started or was stopped
    NotRunning,
}

/// Counters for a complete run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub frames: u64,
    pub skipped: u64,
    pub commands: u64,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &StepOutcome) {
        match outcome {
            StepOutcome::Processed(output) => {
                self.frames += 1;
                self.commands += output.commands.len() as u64;
            }
            StepOutcome::Skipped => self.skipped += 1,
            StepOutcome::EndOfStream | StepOutcome::NotRunning => {}
        }
    }
}

/// Consolidates runs of consecutive tracker failures into one warning
#[derive(Debug, Default)]
struct TrackerFailures {
    consecutive: u64,
    total: u64,
}

impl TrackerFailures {
    fn record_failure(&mut self, error: &Error) {
        if self.consecutive == 0 {
            warn!("Hand tracking failed, skipping frames: {error}");
        } else {
            debug!("Hand tracking still failing ({} frames): {error}", self.consecutive + 1);
        }
        self.consecutive += 1;
        self.total += 1;
    }

    fn record_success(&mut self) {
        if self.consecutive > 0 {
            info!("Hand tracking recovered after {} skipped frame(s)", self.consecutive);
            self.consecutive = 0;
        }
    }
}

/// Real-time gesture interaction engine
pub struct GestureEngine<S, T>
where
    S: FrameSource,
    T: HandTracker<S::Frame>,
{
    source: S,
    tracker: T,
    classifier: GestureClassifier,
    dispatcher: ModeDispatcher,
    canvas: CanvasSize,
    running: bool,
    failures: TrackerFailures,
}

impl<S, T> GestureEngine<S, T>
where
    S: FrameSource,
    T: HandTracker<S::Frame>,
{
    /// Create a new engine; nothing is acquired until [`start`](Self::start)
    pub fn new(source: S, tracker: T, classifier: GestureClassifier, dispatcher: ModeDispatcher, canvas: CanvasSize) -> Self {
        Self {
            source,
            tracker,
            classifier,
            dispatcher,
            canvas,
            running: false,
            failures: TrackerFailures::default(),
        }
    }

    /// Create an engine from a validated configuration
    pub fn from_config(config: &Config, source: S, tracker: T) -> Result<Self> {
        config.validate()?;
        Ok(Self::new(
            source,
            tracker,
            config.classifier(),
            config.dispatcher()?,
            config.canvas.size(),
        ))
    }

    /// Acquire the frame source and initialize the tracker
    pub fn start(&mut self) -> Result<()> {
        if self.running {
            debug!("Engine already running");
            return Ok(());
        }

        info!("Starting gesture engine in {} mode", self.dispatcher.mode());
        self.source
            .open()
            .map_err(|e| Error::Setup(format!("Failed to open frame source: {e}")))?;

        if let Err(e) = self.tracker.initialize() {
            self.source.release();
            return Err(Error::Setup(format!("Failed to initialize hand tracker: {e}")));
        }

        self.running = true;
        self.failures = TrackerFailures::default();
        info!("Gesture engine running");
        Ok(())
    }

    /// Release the frame source and clear transient state. No-op when not running.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.source.release();
        self.dispatcher.reset_transient();
        self.running = false;
        info!(
            "Gesture engine stopped ({} frame(s) skipped by tracker failures)",
            self.failures.total
        );
    }

    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Pull one frame and run it through the pipeline
    pub fn step(&mut self, now_ms: u64) -> Result<StepOutcome> {
        if !self.running {
            return Ok(StepOutcome::NotRunning);
        }

        self.dispatcher.expire_timers(now_ms);

        let frame = match self.source.next_frame() {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                info!("Frame source exhausted");
                return Ok(StepOutcome::EndOfStream);
            }
            Err(e) => {
                warn!("Frame source failed, stopping engine: {e}");
                self.stop();
                return Err(e);
            }
        };

        let detection = match self.tracker.detect(&frame) {
            Ok(detection) => {
                self.failures.record_success();
                detection
            }
            Err(e) => {
                self.failures.record_failure(&e);
                return Ok(StepOutcome::Skipped);
            }
        };

        Ok(StepOutcome::Processed(self.process_detection(&detection, now_ms)))
    }

    /// Classify and dispatch an already-detected frame
    pub fn process_detection(&mut self, detection: &RawDetection, now_ms: u64) -> FrameOutput {
        let frame = normalize(detection);
        let facts = self.classifier.classify(&frame);
        let ctx = FrameContext {
            now_ms,
            canvas: self.canvas,
        };
        let commands = self.dispatcher.dispatch(&frame, &facts, &ctx);
        FrameOutput {
            facts,
            mode: self.dispatcher.mode(),
            commands,
        }
    }

    /// Start, step until the source is exhausted, then stop
    pub fn run<C, F>(&mut self, clock: &C, mut on_frame: F) -> Result<RunSummary>
    where
        C: Clock,
        F: FnMut(&FrameOutput),
    {
        self.start()?;
        let mut summary = RunSummary::default();
        loop {
            let outcome = self.step(clock.now_ms())?;
            summary.record(&outcome);
            match outcome {
                StepOutcome::Processed(output) => on_frame(&output),
                StepOutcome::Skipped => {}
                StepOutcome::EndOfStream | StepOutcome::NotRunning => break,
            }
        }
        self.stop();
        Ok(summary)
    }

    /// Switch mode at the next frame boundary
    pub fn request_mode(&mut self, mode: Mode) {
        self.dispatcher.request_mode(mode);
    }

    /// Switch drawing tool at the next frame boundary
    pub fn request_tool(&mut self, tool: DrawingTool) {
        self.dispatcher.request_tool(tool);
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.dispatcher.mode()
    }

    #[must_use]
    pub const fn tool(&self) -> DrawingTool {
        self.dispatcher.tool()
    }

    #[must_use]
    pub const fn pointer(&self) -> PointerState {
        self.dispatcher.pointer()
    }

    #[must_use]
    pub const fn charge(&self) -> ChargeState {
        self.dispatcher.charge()
    }

    #[must_use]
    pub const fn two_hand(&self) -> TwoHandState {
        self.dispatcher.two_hand()
    }

    #[must_use]
    pub const fn ui_state(&self) -> &UiControlState {
        self.dispatcher.ui_state()
    }

    #[must_use]
    pub const fn ranking(&self) -> &RankingBuffer {
        self.dispatcher.ranking()
    }

    pub fn reset_ranking(&mut self) {
        self.dispatcher.reset_ranking();
    }

    #[must_use]
    pub const fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    /// Resize the drawing surface; takes effect on the next frame
    pub fn set_canvas_size(&mut self, canvas: CanvasSize) {
        self.canvas = canvas;
    }

    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    #[must_use]
    pub const fn tracker(&self) -> &T {
        &self.tracker
    }

    #[must_use]
    pub const fn skipped_frames(&self) -> u64 {
        self.failures.total
    }
}

impl<S, T> Drop for GestureEngine<S, T>
where
    S: FrameSource,
    T: HandTracker<S::Frame>,
{
    fn drop(&mut self) {
        self.stop();
    }
}
