//! Gesture interaction engine for real-time hand-landmark input.
//!
//! This library turns per-frame hand landmarks from an external tracker into
//! interaction commands for three modes:
//! - Drawing: a whiteboard driven by the mirrored, smoothed index fingertip
//! - Navigation: a fist hold that charges and fires a pulse, plus two-hand rotation
//! - UI control: pinch-driven toggles and a volume slider
//!
//! The processing pipeline consists of:
//! 1. Frame normalization (at most two hands of 21 landmarks)
//! 2. Gesture classification (pinch, fist, hand count)
//! 3. Dispatch to the active mode controller
//! 4. Output as tagged [`commands::Command`] values for the drawing surface,
//!    the 3D scene and the UI layer
//!
//! # Examples
//!
//! ## Processing detections directly
//!
//! ```
//! use gesture_engine::{
//!     classifier::GestureClassifier,
//!     dispatcher::ModeDispatcher,
//!     landmarks::{normalize, RawDetection, RawLandmark},
//!     modes::{CanvasSize, FrameContext},
//! };
//!
//! let classifier = GestureClassifier::default();
//! let mut dispatcher = ModeDispatcher::default();
//! let ctx = FrameContext {
//!     now_ms: 0,
//!     canvas: CanvasSize { width: 1280.0, height: 720.0 },
//! };
//!
//! let detection = RawDetection {
//!     hands: vec![vec![RawLandmark { x: 0.5, y: 0.5, z: 0.0 }; 21]],
//! };
//! let frame = normalize(&detection);
//! let facts = classifier.classify(&frame);
//! assert_eq!(facts.hand_count, 1);
//!
//! for command in dispatcher.dispatch(&frame, &facts, &ctx) {
//!     println!("{command}");
//! }
//! ```
//!
//! ## Replaying a recorded session
//!
//! ```no_run
//! use gesture_engine::{
//!     config::Config,
//!     engine::GestureEngine,
//!     replay::{play, ReplaySession, ReplaySource, ReplayTracker},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_file("config.yaml")?;
//! let session = ReplaySession::from_file("session.yaml")?;
//! let mut engine = GestureEngine::from_config(&config, ReplaySource::new(session), ReplayTracker)?;
//!
//! let summary = play(&mut engine, |timestamp_ms, output| {
//!     for command in &output.commands {
//!         println!("{timestamp_ms}: {command}");
//!     }
//! })?;
//! println!("{} frames, best hold: {:?}", summary.frames, engine.ranking().best());
//! # Ok(())
//! # }
//! ```
//!
//! ## Using Filters
//!
//! ```
//! use gesture_engine::filters::{create_filter, PointerFilter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut filter = create_filter("exponential:0.3")?;
//! assert_eq!(filter.apply(10.0, 10.0), (10.0, 10.0));
//!
//! let (x, y) = filter.apply(20.0, 20.0);
//! assert!((x - 13.0).abs() < 1e-9 && (y - 13.0).abs() < 1e-9);
//!
//! filter.reset();
//! # Ok(())
//! # }
//! ```

/// Hand landmark model and frame normalization
pub mod landmarks;

/// Pinch and fist classification
pub mod classifier;

/// Signal filtering algorithms for smoothing the pointer
pub mod filters;

/// Pointer smoothing state
pub mod smoother;

/// Rising/falling edge detection for boolean gestures
pub mod edge;

/// Output commands for the drawing surface, scene and UI
pub mod commands;

/// Hold strength curve and the charge ranking
pub mod ranking;

/// Mode controllers
pub mod modes;

/// Active-mode routing and frame-boundary switching
pub mod dispatcher;

/// Engine lifecycle around frame source and tracker
pub mod engine;

/// Recorded session playback
pub mod replay;

/// Utility types and coordinate transformations
pub mod utils;

/// Error types and result handling
pub mod error;

/// Constants used throughout the library
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
