//! Output commands emitted by the mode controllers.
//!
//! The engine never touches a renderer directly. Drawing surfaces, 3D scenes
//! and presentation layers consume these tagged commands through thin adapters.

use crate::{modes::ui_control::ControlKey, utils::Point};
use std::fmt;

/// How a stroke segment combines with existing ink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Normal paint
    Draw,
    /// Destination-out
    Erase,
}

impl Composite {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draw => "draw",
            Self::Erase => "erase",
        }
    }
}

/// Line segment for the drawing surface, in canvas pixels
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeSegment {
    pub from: Point,
    pub to: Point,
    pub color: String,
    pub width: f64,
    pub composite: Composite,
}

/// Commands for the 3D scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneCommand {
    /// One-shot burst on fist release
    Pulse { strength: f64 },
    /// Current fist hold duration, zero when released
    SetCharge { seconds: f64 },
    /// Two-hand rotation delta in canvas pixels
    Rotate { dx: f64, dy: f64 },
}

/// Notifications for the presentation layer rendering UI controls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    Toggled { key: ControlKey, on: bool },
    VolumeChanged { volume: u8 },
    Bounce { key: ControlKey },
}

/// Everything a frame can produce
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Stroke(StrokeSegment),
    Scene(SceneCommand),
    Control(ControlEvent),
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stroke(s) => write!(
                f,
                "stroke[{}] ({:.1}, {:.1}) -> ({:.1}, {:.1}) color={} width={:.1}",
                s.composite.as_str(),
                s.from.x,
                s.from.y,
                s.to.x,
                s.to.y,
                s.color,
                s.width
            ),
            Self::Scene(SceneCommand::Pulse { strength }) => write!(f, "pulse strength={strength:.3}"),
            Self::Scene(SceneCommand::SetCharge { seconds }) => write!(f, "charge seconds={seconds:.3}"),
            Self::Scene(SceneCommand::Rotate { dx, dy }) => write!(f, "rotate dx={dx:.2} dy={dy:.2}"),
            Self::Control(ControlEvent::Toggled { key, on }) => write!(f, "toggle {key}={on}"),
            Self::Control(ControlEvent::VolumeChanged { volume }) => write!(f, "volume={volume}"),
            Self::Control(ControlEvent::Bounce { key }) => write!(f, "bounce {key}"),
        }
    }
}
