use super::{FrameContext, Mode, ModeController};
use crate::{
    classifier::GestureFacts,
    commands::{Command, SceneCommand},
    constants::ROTATION_REFERENCE_LANDMARK,
    edge::{Edge, EdgeDetector},
    landmarks::LandmarkFrame,
    ranking::{ChargeLevel, HoldRecord, RankingBuffer, StrengthCurve},
    utils::{safe_cast::elapsed_seconds, Point},
};
use log::{debug, info};

/// Fist hold in progress
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChargeState {
    pub fist_start_ms: Option<u64>,
    pub elapsed_seconds: f64,
}

impl ChargeState {
    #[must_use]
    pub const fn is_charging(&self) -> bool {
        self.fist_start_ms.is_some()
    }
}

/// Reference points of both hands in the previous frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TwoHandState {
    pub previous_points: Option<[Point; 2]>,
}

impl TwoHandState {
    pub fn clear(&mut self) {
        self.previous_points = None;
    }
}

/// Navigation tunables
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationSettings {
    pub curve: StrengthCurve,
    pub reference_landmark: usize,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            curve: StrengthCurve::default(),
            reference_landmark: ROTATION_REFERENCE_LANDMARK,
        }
    }
}

/// Spatial navigation: fist charge/pulse plus two-hand rotation
#[derive(Debug, Default)]
pub struct NavigationController {
    settings: NavigationSettings,
    fist: EdgeDetector,
    charge: ChargeState,
    two_hand: TwoHandState,
    ranking: RankingBuffer,
}

impl NavigationController {
    #[must_use]
    pub fn new(settings: NavigationSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn charge(&self) -> ChargeState {
        self.charge
    }

    #[must_use]
    pub const fn two_hand(&self) -> TwoHandState {
        self.two_hand
    }

    #[must_use]
    pub const fn ranking(&self) -> &RankingBuffer {
        &self.ranking
    }

    /// Clear the hold ranking; it otherwise lives for the whole session
    pub fn reset_ranking(&mut self) {
        self.ranking.reset();
    }

    fn update_charge(&mut self, is_fist: bool, now_ms: u64, out: &mut Vec<Command>) {
        match self.fist.update(is_fist) {
            Edge::Rising => {
                debug!("Fist charge started at {now_ms}ms");
                self.charge = ChargeState {
                    fist_start_ms: Some(now_ms),
                    elapsed_seconds: 0.0,
                };
                out.push(Command::Scene(SceneCommand::SetCharge { seconds: 0.0 }));
            }
            Edge::Held => {
                if let Some(start) = self.charge.fist_start_ms {
                    self.charge.elapsed_seconds = elapsed_seconds(start, now_ms);
                    out.push(Command::Scene(SceneCommand::SetCharge {
                        seconds: self.charge.elapsed_seconds,
                    }));
                }
            }
            Edge::Falling => {
                if let Some(start) = self.charge.fist_start_ms.take() {
                    let duration = elapsed_seconds(start, now_ms);
                    self.release(duration, now_ms, out);
                }
                self.charge = ChargeState::default();
            }
            Edge::Idle => {}
        }
    }

    fn release(&mut self, duration: f64, now_ms: u64, out: &mut Vec<Command>) {
        let strength = self.settings.curve.strength(duration);
        let level = ChargeLevel::from_strength(strength);
        out.push(Command::Scene(SceneCommand::Pulse { strength }));
        out.push(Command::Scene(SceneCommand::SetCharge { seconds: 0.0 }));

        let rank = self.ranking.insert(HoldRecord {
            duration,
            strength,
            level,
            timestamp: now_ms,
        });
        match rank {
            Some(rank) => info!(
                "Pulse released: {duration:.2}s, strength {strength:.2} ({level}), rank #{}",
                rank + 1
            ),
            None => info!("Pulse released: {duration:.2}s, strength {strength:.2} ({level})"),
        }
    }

    fn update_rotation(&mut self, frame: &LandmarkFrame, facts: &GestureFacts, ctx: &FrameContext, out: &mut Vec<Command>) {
        if facts.hand_count != 2 {
            self.two_hand.clear();
            return;
        }

        let reference = self.settings.reference_landmark;
        let hands = frame.hands();
        let points = match (hands.first(), hands.get(1)) {
            (Some(a), Some(b)) => a.point(reference).zip(b.point(reference)),
            _ => None,
        };
        let Some((a, b)) = points else {
            self.two_hand.clear();
            return;
        };

        if let Some([prev_a, prev_b]) = self.two_hand.previous_points {
            let previous = prev_a.midpoint(&prev_b);
            let current = a.midpoint(&b);
            out.push(Command::Scene(SceneCommand::Rotate {
                dx: (current.x - previous.x) * ctx.canvas.width,
                dy: (current.y - previous.y) * ctx.canvas.height,
            }));
        }
        self.two_hand.previous_points = Some([a, b]);
    }
}

impl ModeController for NavigationController {
    fn process(&mut self, frame: &LandmarkFrame, facts: &GestureFacts, ctx: &FrameContext) -> Vec<Command> {
        let mut out = Vec::new();
        self.update_charge(facts.is_fist, ctx.now_ms, &mut out);
        self.update_rotation(frame, facts, ctx, &mut out);
        out
    }

    /// Abandons a hold in progress without a pulse; the ranking survives
    fn reset(&mut self) {
        self.fist.reset();
        self.charge = ChargeState::default();
        self.two_hand.clear();
    }

    fn mode(&self) -> Mode {
        Mode::Navigation
    }
}
