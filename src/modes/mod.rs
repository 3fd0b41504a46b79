//! Interaction modes and their controllers.
//!
//! Exactly one mode is active at a time. Each controller owns the transient
//! state of its mode and turns `(frame, facts)` into output commands.

/// Pinch-to-draw whiteboard
pub mod drawing;

/// Fist charge/pulse and two-hand rotation of a 3D scene
pub mod navigation;

/// Hit-testing against toggle tiles and a volume slider
pub mod ui_control;

use crate::{classifier::GestureFacts, commands::Command, landmarks::LandmarkFrame, Error};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Active interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Drawing,
    Navigation,
    UiControl,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drawing => "drawing",
            Self::Navigation => "navigation",
            Self::UiControl => "ui_control",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "drawing" | "draw" | "whiteboard" => Ok(Self::Drawing),
            "navigation" | "nav" | "spatial" => Ok(Self::Navigation),
            "ui_control" | "ui-control" | "ui" | "control" => Ok(Self::UiControl),
            _ => Err(Error::InvalidInput(format!("Unknown mode: {s}"))),
        }
    }
}

/// Canvas size in pixels, used to scale normalized positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

/// Per-frame inputs shared by every controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Wall-clock time of the frame in milliseconds
    pub now_ms: u64,
    pub canvas: CanvasSize,
}

/// A mode's state machine
pub trait ModeController {
    /// Process one frame and return the commands it produces
    fn process(&mut self, frame: &LandmarkFrame, facts: &GestureFacts, ctx: &FrameContext) -> Vec<Command>;

    /// Drop all transient gesture state
    fn reset(&mut self);

    /// Mode this controller implements
    fn mode(&self) -> Mode;
}
