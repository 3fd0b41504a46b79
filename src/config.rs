//! Configuration management for the gesture interaction engine

use crate::{
    constants::{
        CHARGE_SECONDS_PER_STRENGTH, DEFAULT_BOUNCE_MS, DEFAULT_BRUSH_COLOR, DEFAULT_BRUSH_WIDTH,
        DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_ERASER_WIDTH, DEFAULT_PINCH_THRESHOLD,
        DEFAULT_SMOOTHING_ALPHA, MAX_PULSE_STRENGTH, MIN_PULSE_STRENGTH, NUM_HAND_LANDMARKS,
        ROTATION_REFERENCE_LANDMARK,
    },
    classifier::GestureClassifier,
    dispatcher::ModeDispatcher,
    filters::PointerFilter,
    modes::{
        drawing::{BrushSettings, DrawingController, DrawingTool},
        navigation::{NavigationController, NavigationSettings},
        ui_control::{ControlKey, UiController, UiLayout},
        CanvasSize, Mode,
    },
    ranking::StrengthCurve,
    smoother::PointerSmoother,
    Error, Result,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Gesture classification thresholds
    pub classifier: ClassifierConfig,

    /// Pointer smoothing
    pub smoothing: SmoothingConfig,

    /// Drawing surface size
    pub canvas: CanvasConfig,

    /// Whiteboard tool and brush
    pub drawing: DrawingConfig,

    /// Fist charge and rotation
    pub navigation: NavigationConfig,

    /// UI-control regions and feedback
    pub ui_control: UiControlConfig,

    /// Engine start-up
    pub engine: EngineConfig,
}

/// Classifier thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Normalized thumb-index distance below which a hand pinches.
    /// Used by every mode.
    pub pinch_threshold: f64,
}

/// Smoothing filter selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Filter type ("exponential" or "none"); parameters come from the
    /// fields below, never from the name
    pub filter: String,

    /// Exponential smoothing factor
    pub alpha: f64,
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
}

/// Drawing mode settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Tool selected at start-up
    pub default_tool: DrawingTool,

    /// Stroke colour passed through to the drawing surface
    pub brush_color: String,

    /// Ink line width in pixels
    pub brush_width: f64,

    /// Eraser line width in pixels
    pub eraser_width: f64,
}

/// Navigation mode settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Hold seconds mapped to a pulse strength of 1.0
    pub charge_seconds_per_strength: f64,

    /// Lower pulse strength bound
    pub min_strength: f64,

    /// Upper pulse strength bound
    pub max_strength: f64,

    /// Landmark index whose two-hand midpoint drives rotation
    pub reference_landmark: usize,
}

/// UI-control mode settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiControlConfig {
    /// Lifetime of the release acknowledgment in milliseconds
    pub bounce_ms: u64,

    /// Control regions
    pub layout: UiLayout,
}

/// Engine start-up settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    /// Mode active when the engine starts
    pub initial_mode: Mode,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            pinch_threshold: DEFAULT_PINCH_THRESHOLD,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            filter: "exponential".to_string(),
            alpha: DEFAULT_SMOOTHING_ALPHA,
        }
    }
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
        }
    }
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: DrawingTool::Pinch,
            brush_color: DEFAULT_BRUSH_COLOR.to_string(),
            brush_width: DEFAULT_BRUSH_WIDTH,
            eraser_width: DEFAULT_ERASER_WIDTH,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            charge_seconds_per_strength: CHARGE_SECONDS_PER_STRENGTH,
            min_strength: MIN_PULSE_STRENGTH,
            max_strength: MAX_PULSE_STRENGTH,
            reference_landmark: ROTATION_REFERENCE_LANDMARK,
        }
    }
}

impl Default for UiControlConfig {
    fn default() -> Self {
        Self {
            bounce_ms: DEFAULT_BOUNCE_MS,
            layout: UiLayout::default(),
        }
    }
}

impl CanvasConfig {
    #[must_use]
    pub const fn size(&self) -> CanvasSize {
        CanvasSize {
            width: self.width,
            height: self.height,
        }
    }
}

impl NavigationConfig {
    #[must_use]
    pub const fn curve(&self) -> StrengthCurve {
        StrengthCurve {
            seconds_per_strength: self.charge_seconds_per_strength,
            min_strength: self.min_strength,
            max_strength: self.max_strength,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.to_yaml()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Serialize configuration to YAML text
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))
    }

    /// Create the pointer filter described by the smoothing section
    pub fn create_filter(&self) -> Result<Box<dyn PointerFilter>> {
        use crate::filters::create_filter;

        let name = self.smoothing.filter.trim().to_lowercase();
        if name.contains(':') {
            return Err(Error::ConfigError(format!(
                "Smoothing filter '{}' must be a bare name; set alpha under smoothing.alpha",
                self.smoothing.filter
            )));
        }

        match name.as_str() {
            "exponential" | "ema" => create_filter(&format!("exponential:{}", self.smoothing.alpha)),
            name => create_filter(name),
        }
    }

    #[must_use]
    pub const fn classifier(&self) -> GestureClassifier {
        GestureClassifier::new(self.classifier.pinch_threshold)
    }

    #[must_use]
    pub fn brush(&self) -> BrushSettings {
        BrushSettings {
            color: self.drawing.brush_color.clone(),
            width: self.drawing.brush_width,
            eraser_width: self.drawing.eraser_width,
        }
    }

    #[must_use]
    pub const fn navigation_settings(&self) -> NavigationSettings {
        NavigationSettings {
            curve: self.navigation.curve(),
            reference_landmark: self.navigation.reference_landmark,
        }
    }

    /// Build the mode dispatcher with every controller configured
    pub fn dispatcher(&self) -> Result<ModeDispatcher> {
        let smoother = PointerSmoother::new(self.create_filter()?);
        let drawing = DrawingController::new(self.drawing.default_tool, self.brush(), smoother);
        let navigation = NavigationController::new(self.navigation_settings());
        let ui = UiController::new(self.ui_control.layout, self.ui_control.bounce_ms);
        Ok(ModeDispatcher::new(self.engine.initial_mode, drawing, navigation, ui))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let threshold = self.classifier.pinch_threshold;
        if !(threshold > 0.0 && threshold < 1.0) {
            return Err(Error::ConfigError(
                "Pinch threshold must be between 0.0 and 1.0 (exclusive)".to_string(),
            ));
        }

        if !(self.smoothing.alpha > 0.0 && self.smoothing.alpha <= 1.0) {
            return Err(Error::ConfigError(
                "Smoothing alpha must be in (0, 1]".to_string(),
            ));
        }
        self.create_filter()
            .map_err(|e| Error::ConfigError(format!("Invalid smoothing filter: {e}")))?;

        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(Error::ConfigError(
                "Canvas width and height must be greater than 0".to_string(),
            ));
        }

        if self.drawing.brush_width <= 0.0 || self.drawing.eraser_width <= 0.0 {
            return Err(Error::ConfigError(
                "Brush and eraser widths must be greater than 0".to_string(),
            ));
        }

        let nav = &self.navigation;
        if nav.charge_seconds_per_strength <= 0.0 {
            return Err(Error::ConfigError(
                "Charge seconds per strength must be greater than 0".to_string(),
            ));
        }
        if !(nav.min_strength > 0.0 && nav.min_strength <= nav.max_strength) {
            return Err(Error::ConfigError(
                "Pulse strength bounds must satisfy 0 < min <= max".to_string(),
            ));
        }
        if nav.reference_landmark >= NUM_HAND_LANDMARKS {
            return Err(Error::ConfigError(format!(
                "Reference landmark must be below {NUM_HAND_LANDMARKS}, got {}",
                nav.reference_landmark
            )));
        }

        for key in ControlKey::ALL {
            if !self.ui_control.layout.region(key).is_valid() {
                return Err(Error::ConfigError(format!(
                    "Region '{key}' must have a positive size and lie inside the unit square"
                )));
            }
        }

        Ok(())
    }
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r##"# Gesture Engine Configuration

# Gesture classification
classifier:
  pinch_threshold: 0.06

# Pointer smoothing
smoothing:
  filter: "exponential"
  alpha: 0.3

# Drawing surface size in pixels
canvas:
  width: 1280.0
  height: 720.0

# Whiteboard
drawing:
  default_tool: pinch
  brush_color: "#22d3ee"
  brush_width: 6.0
  eraser_width: 40.0

# Spatial navigation
navigation:
  charge_seconds_per_strength: 1.2
  min_strength: 0.5
  max_strength: 3.0
  reference_landmark: 9

# UI control
ui_control:
  bounce_ms: 480
  layout:
    wifi:   { x: 0.08, y: 0.15, width: 0.24, height: 0.30 }
    lights: { x: 0.38, y: 0.15, width: 0.24, height: 0.30 }
    music:  { x: 0.68, y: 0.15, width: 0.24, height: 0.30 }
    volume: { x: 0.10, y: 0.62, width: 0.80, height: 0.12 }

# Start-up
engine:
  initial_mode: drawing
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let parsed = Config::from_yaml(EXAMPLE_CONFIG).unwrap();
        assert_eq!(parsed, Config::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed = Config::from_yaml("navigation:\n  max_strength: 5.0\n").unwrap();
        assert_eq!(parsed.navigation.max_strength, 5.0);
        assert_eq!(parsed.navigation.min_strength, MIN_PULSE_STRENGTH);
        assert_eq!(parsed.smoothing, SmoothingConfig::default());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = Config::default();
        config.engine.initial_mode = Mode::UiControl;
        config.drawing.default_tool = DrawingTool::OpenPalm;
        let yaml = config.to_yaml().unwrap();
        assert_eq!(Config::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.classifier.pinch_threshold = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.smoothing.alpha = 1.5;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.smoothing.filter = "kalman".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.canvas.width = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.navigation.min_strength = 4.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.navigation.reference_landmark = 21;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.ui_control.layout.volume.width = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dispatcher_uses_configured_start_state() {
        let mut config = Config::default();
        config.engine.initial_mode = Mode::Navigation;
        config.drawing.default_tool = DrawingTool::TwoHands;
        let dispatcher = config.dispatcher().unwrap();
        assert_eq!(dispatcher.mode(), Mode::Navigation);
        assert_eq!(dispatcher.tool(), DrawingTool::TwoHands);
        assert_eq!(dispatcher.drawing().brush(), &config.brush());
    }

    #[test]
    fn test_create_filter_from_config() {
        let mut config = Config::default();
        assert_eq!(config.create_filter().unwrap().name(), "ExponentialFilter");

        config.smoothing.filter = "none".to_string();
        assert_eq!(config.create_filter().unwrap().name(), "NoFilter");
    }
}
