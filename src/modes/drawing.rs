use super::{FrameContext, Mode, ModeController};
use crate::{
    classifier::GestureFacts,
    commands::{Command, Composite, StrokeSegment},
    constants::{DEFAULT_BRUSH_COLOR, DEFAULT_BRUSH_WIDTH, DEFAULT_ERASER_WIDTH, INDEX_TIP},
    landmarks::LandmarkFrame,
    smoother::{PointerSmoother, PointerState},
    utils::mirror_to_canvas,
    Error,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Drawing tool, selected by the gesture that drives it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingTool {
    /// Pinch to ink
    #[default]
    Pinch,
    /// Stop: never inks
    Fist,
    /// Pinch to ink while both hands are visible
    TwoHands,
    /// Pinch to erase
    OpenPalm,
}

impl DrawingTool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pinch => "pinch",
            Self::Fist => "fist",
            Self::TwoHands => "two_hands",
            Self::OpenPalm => "open_palm",
        }
    }
}

impl fmt::Display for DrawingTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DrawingTool {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "pinch" => Ok(Self::Pinch),
            "fist" => Ok(Self::Fist),
            "two_hands" | "twohands" => Ok(Self::TwoHands),
            "open_palm" | "openpalm" | "eraser" => Ok(Self::OpenPalm),
            _ => Err(Error::InvalidInput(format!("Unknown drawing tool: {s}"))),
        }
    }
}

/// Stroke appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    pub color: String,
    pub width: f64,
    pub eraser_width: f64,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            color: DEFAULT_BRUSH_COLOR.to_string(),
            width: DEFAULT_BRUSH_WIDTH,
            eraser_width: DEFAULT_ERASER_WIDTH,
        }
    }
}

/// Whiteboard state machine: smoothed, mirrored index fingertip strokes
#[derive(Debug)]
pub struct DrawingController {
    tool: DrawingTool,
    brush: BrushSettings,
    smoother: PointerSmoother,
}

impl Default for DrawingController {
    fn default() -> Self {
        Self::new(DrawingTool::default(), BrushSettings::default(), PointerSmoother::default())
    }
}

impl DrawingController {
    #[must_use]
    pub fn new(tool: DrawingTool, brush: BrushSettings, smoother: PointerSmoother) -> Self {
        Self { tool, brush, smoother }
    }

    #[must_use]
    pub const fn tool(&self) -> DrawingTool {
        self.tool
    }

    /// Select a tool; a change always breaks the current stroke
    pub fn set_tool(&mut self, tool: DrawingTool) {
        if tool != self.tool {
            debug!("Drawing tool changed: {} -> {}", self.tool, tool);
            self.tool = tool;
            self.smoother.reset();
        }
    }

    #[must_use]
    pub const fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn set_brush(&mut self, brush: BrushSettings) {
        self.brush = brush;
    }

    #[must_use]
    pub const fn pointer(&self) -> PointerState {
        self.smoother.state()
    }

    /// Composite mode to apply this frame, or `None` when the tool is idle
    fn active_composite(&self, facts: &GestureFacts) -> Option<Composite> {
        match self.tool {
            DrawingTool::Fist => None,
            DrawingTool::OpenPalm if facts.is_pinching => Some(Composite::Erase),
            DrawingTool::Pinch if facts.is_pinching => Some(Composite::Draw),
            DrawingTool::TwoHands if facts.hand_count == 2 && facts.is_pinching => Some(Composite::Draw),
            _ => None,
        }
    }
}

impl ModeController for DrawingController {
    fn process(&mut self, frame: &LandmarkFrame, facts: &GestureFacts, ctx: &FrameContext) -> Vec<Command> {
        let tip = frame.primary().and_then(|hand| hand.point(INDEX_TIP));
        let (Some(composite), Some(tip)) = (self.active_composite(facts), tip) else {
            self.smoother.reset();
            return Vec::new();
        };

        let target = mirror_to_canvas(tip, ctx.canvas.width, ctx.canvas.height);
        let (previous, current) = self.smoother.smooth(target);

        let Some(from) = previous else {
            // First point of a stroke only seeds the pointer
            return Vec::new();
        };

        let width = match composite {
            Composite::Draw => self.brush.width,
            Composite::Erase => self.brush.eraser_width,
        };
        vec![Command::Stroke(StrokeSegment {
            from,
            to: current,
            color: self.brush.color.clone(),
            width,
            composite,
        })]
    }

    fn reset(&mut self) {
        self.smoother.reset();
    }

    fn mode(&self) -> Mode {
        Mode::Drawing
    }
}
