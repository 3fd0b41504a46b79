//! Constants used throughout the engine

/// Number of landmarks reported per hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Maximum number of hands the tracker reports per frame
pub const MAX_HANDS: usize = 2;

/// Hand landmark indices
pub const WRIST: usize = 0;
pub const THUMB_TIP: usize = 4;
pub const INDEX_PIP: usize = 6;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_TIP: usize = 12;
pub const RING_PIP: usize = 14;
pub const RING_TIP: usize = 16;
pub const PINKY_PIP: usize = 18;
pub const PINKY_TIP: usize = 20;

/// (tip, pip) pairs of the four non-thumb fingers
pub const FINGER_TIP_PIP_PAIRS: [(usize, usize); 4] = [
    (INDEX_TIP, INDEX_PIP),
    (MIDDLE_TIP, MIDDLE_PIP),
    (RING_TIP, RING_PIP),
    (PINKY_TIP, PINKY_PIP),
];

/// Normalized thumb-index distance below which a hand is pinching
pub const DEFAULT_PINCH_THRESHOLD: f64 = 0.06;

/// Pointer smoothing factor
pub const DEFAULT_SMOOTHING_ALPHA: f64 = 0.3;

/// Default canvas dimensions in pixels
pub const DEFAULT_CANVAS_WIDTH: f64 = 1280.0;
pub const DEFAULT_CANVAS_HEIGHT: f64 = 720.0;

/// Default brush settings
pub const DEFAULT_BRUSH_COLOR: &str = "#22d3ee";
pub const DEFAULT_BRUSH_WIDTH: f64 = 6.0;
pub const DEFAULT_ERASER_WIDTH: f64 = 40.0;

/// Seconds of fist hold mapped to a pulse strength of 1.0
pub const CHARGE_SECONDS_PER_STRENGTH: f64 = 1.2;

/// Pulse strength bounds
pub const MIN_PULSE_STRENGTH: f64 = 0.5;
pub const MAX_PULSE_STRENGTH: f64 = 3.0;

/// Landmark whose two-hand midpoint drives scene rotation
pub const ROTATION_REFERENCE_LANDMARK: usize = MIDDLE_MCP;

/// Capacity of the hold ranking buffer
pub const RANKING_CAPACITY: usize = 5;

/// Duration of the release acknowledgment on a UI control
pub const DEFAULT_BOUNCE_MS: u64 = 480;

/// Milliseconds per second
pub const MS_PER_SECOND: f64 = 1000.0;
