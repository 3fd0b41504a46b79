use super::{FrameContext, Mode, ModeController};
use crate::{
    classifier::GestureFacts,
    commands::{Command, ControlEvent},
    constants::{DEFAULT_BOUNCE_MS, INDEX_TIP},
    edge::{Edge, EdgeDetector},
    landmarks::LandmarkFrame,
    utils::{mirror_normalized, safe_cast::fraction_to_percent, NormRect, Point},
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hit-testable controls, in hit-test priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlKey {
    Wifi,
    Lights,
    Music,
    Volume,
}

impl ControlKey {
    pub const ALL: [Self; 4] = [Self::Wifi, Self::Lights, Self::Music, Self::Volume];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wifi => "wifi",
            Self::Lights => "lights",
            Self::Music => "music",
            Self::Volume => "volume",
        }
    }
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static control regions in container-relative normalized coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiLayout {
    pub wifi: NormRect,
    pub lights: NormRect,
    pub music: NormRect,
    pub volume: NormRect,
}

impl Default for UiLayout {
    fn default() -> Self {
        Self {
            wifi: NormRect::new(0.08, 0.15, 0.24, 0.30),
            lights: NormRect::new(0.38, 0.15, 0.24, 0.30),
            music: NormRect::new(0.68, 0.15, 0.24, 0.30),
            volume: NormRect::new(0.10, 0.62, 0.80, 0.12),
        }
    }
}

impl UiLayout {
    #[must_use]
    pub const fn region(&self, key: ControlKey) -> NormRect {
        match key {
            ControlKey::Wifi => self.wifi,
            ControlKey::Lights => self.lights,
            ControlKey::Music => self.music,
            ControlKey::Volume => self.volume,
        }
    }

    /// First control containing `point`, tiles before the slider
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<ControlKey> {
        ControlKey::ALL
            .into_iter()
            .find(|key| self.region(*key).contains(point))
    }
}

/// User-visible switch settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Toggles {
    pub wifi: bool,
    pub lights: bool,
    pub music: bool,
}

impl Toggles {
    #[must_use]
    pub const fn get(&self, key: ControlKey) -> Option<bool> {
        match key {
            ControlKey::Wifi => Some(self.wifi),
            ControlKey::Lights => Some(self.lights),
            ControlKey::Music => Some(self.music),
            ControlKey::Volume => None,
        }
    }

    /// Flip a toggle and return its new value; `None` for the slider
    pub fn flip(&mut self, key: ControlKey) -> Option<bool> {
        let slot = match key {
            ControlKey::Wifi => &mut self.wifi,
            ControlKey::Lights => &mut self.lights,
            ControlKey::Music => &mut self.music,
            ControlKey::Volume => return None,
        };
        *slot = !*slot;
        Some(*slot)
    }
}

/// State rendered by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UiControlState {
    pub hover_key: Option<ControlKey>,
    pub pressed_key: Option<ControlKey>,
    pub bounce_key: Option<ControlKey>,
    pub toggles: Toggles,
    pub volume: u8,
    bounce_deadline_ms: Option<u64>,
}

impl UiControlState {
    /// When the current bounce acknowledgment disappears
    #[must_use]
    pub const fn bounce_deadline_ms(&self) -> Option<u64> {
        self.bounce_deadline_ms
    }

    /// Clear hover, press and bounce; toggles and volume are kept
    pub fn clear_transient(&mut self) {
        self.hover_key = None;
        self.pressed_key = None;
        self.bounce_key = None;
        self.bounce_deadline_ms = None;
    }

    /// Drop an expired bounce
    pub fn expire_bounce(&mut self, now_ms: u64) {
        if self.bounce_deadline_ms.is_some_and(|deadline| now_ms >= deadline) {
            self.bounce_key = None;
            self.bounce_deadline_ms = None;
        }
    }
}

/// UI-control state machine: hover, press/release edges, bounce feedback
#[derive(Debug)]
pub struct UiController {
    layout: UiLayout,
    bounce_ms: u64,
    pinch: EdgeDetector,
    state: UiControlState,
}

impl Default for UiController {
    fn default() -> Self {
        Self::new(UiLayout::default(), DEFAULT_BOUNCE_MS)
    }
}

impl UiController {
    #[must_use]
    pub fn new(layout: UiLayout, bounce_ms: u64) -> Self {
        Self {
            layout,
            bounce_ms,
            pinch: EdgeDetector::new(),
            state: UiControlState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &UiControlState {
        &self.state
    }

    #[must_use]
    pub const fn layout(&self) -> &UiLayout {
        &self.layout
    }

    /// Bounce expiry runs on wall-clock time, even on skipped frames
    pub fn expire_timers(&mut self, now_ms: u64) {
        self.state.expire_bounce(now_ms);
    }

    fn press(&mut self, key: ControlKey, pointer: Point, out: &mut Vec<Command>) {
        self.state.pressed_key = Some(key);
        if let Some(on) = self.state.toggles.flip(key) {
            debug!("Toggled {key} -> {on}");
            out.push(Command::Control(ControlEvent::Toggled { key, on }));
        } else {
            let fraction = self.layout.volume.horizontal_fraction(pointer.x);
            self.state.volume = fraction_to_percent(fraction);
            debug!("Volume set to {}", self.state.volume);
            out.push(Command::Control(ControlEvent::VolumeChanged {
                volume: self.state.volume,
            }));
        }
    }

    fn release(&mut self, now_ms: u64, out: &mut Vec<Command>) {
        self.state.pressed_key = None;
        if let Some(key) = self.state.hover_key {
            self.state.bounce_key = Some(key);
            self.state.bounce_deadline_ms = Some(now_ms.saturating_add(self.bounce_ms));
            out.push(Command::Control(ControlEvent::Bounce { key }));
        }
    }
}

impl ModeController for UiController {
    fn process(&mut self, frame: &LandmarkFrame, facts: &GestureFacts, ctx: &FrameContext) -> Vec<Command> {
        let mut out = Vec::new();
        self.state.expire_bounce(ctx.now_ms);

        let pointer = frame
            .primary()
            .and_then(|hand| hand.point(INDEX_TIP))
            .map(mirror_normalized);
        self.state.hover_key = pointer.and_then(|p| self.layout.hit_test(p));

        match self.pinch.update(facts.is_pinching) {
            Edge::Rising => {
                if let (Some(key), Some(p)) = (self.state.hover_key, pointer) {
                    self.press(key, p, &mut out);
                }
            }
            Edge::Falling => self.release(ctx.now_ms, &mut out),
            Edge::Held | Edge::Idle => {}
        }
        out
    }

    fn reset(&mut self) {
        self.pinch.reset();
        self.state.clear_transient();
    }

    fn mode(&self) -> Mode {
        Mode::UiControl
    }
}
