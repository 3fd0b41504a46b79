//! Mode dispatcher: routes every frame to exactly one mode controller.
//!
//! Mode and drawing-tool switches are requested at any time but only applied
//! at the next frame boundary. Applying a mode switch clears all transient
//! state (pointer, charge, two-hand baseline, hover/press/bounce) before the
//! first frame of the new mode is processed.

use crate::{
    classifier::GestureFacts,
    commands::Command,
    landmarks::LandmarkFrame,
    modes::{
        drawing::{DrawingController, DrawingTool},
        navigation::{ChargeState, NavigationController, TwoHandState},
        ui_control::{UiControlState, UiController},
        FrameContext, Mode, ModeController,
    },
    ranking::RankingBuffer,
    smoother::PointerState,
};
use log::{debug, info};

/// Owns one controller per mode and the active-mode selection
#[derive(Debug, Default)]
pub struct ModeDispatcher {
    mode: Mode,
    pending_mode: Option<Mode>,
    pending_tool: Option<DrawingTool>,
    drawing: DrawingController,
    navigation: NavigationController,
    ui: UiController,
}

impl ModeDispatcher {
    #[must_use]
    pub fn new(
        mode: Mode,
        drawing: DrawingController,
        navigation: NavigationController,
        ui: UiController,
    ) -> Self {
        Self {
            mode,
            pending_mode: None,
            pending_tool: None,
            drawing,
            navigation,
            ui,
        }
    }

    /// Currently active mode (pending switches not yet applied)
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Switch mode at the next frame boundary
    pub fn request_mode(&mut self, mode: Mode) {
        self.pending_mode = Some(mode);
    }

    /// Switch drawing tool at the next frame boundary
    pub fn request_tool(&mut self, tool: DrawingTool) {
        self.pending_tool = Some(tool);
    }

    #[must_use]
    pub const fn pending_mode(&self) -> Option<Mode> {
        self.pending_mode
    }

    fn apply_pending(&mut self) {
        if let Some(mode) = self.pending_mode.take() {
            if mode != self.mode {
                info!("Switching mode: {} -> {}", self.mode, mode);
                self.reset_transient();
                self.mode = mode;
            }
        }
        if let Some(tool) = self.pending_tool.take() {
            self.drawing.set_tool(tool);
        }
    }

    /// Route one frame to the active controller
    pub fn dispatch(&mut self, frame: &LandmarkFrame, facts: &GestureFacts, ctx: &FrameContext) -> Vec<Command> {
        self.apply_pending();
        let controller: &mut dyn ModeController = match self.mode {
            Mode::Drawing => &mut self.drawing,
            Mode::Navigation => &mut self.navigation,
            Mode::UiControl => &mut self.ui,
        };
        let commands = controller.process(frame, facts, ctx);
        if !commands.is_empty() {
            debug!("{} emitted {} command(s)", controller.mode(), commands.len());
        }
        commands
    }

    /// Wall-clock timers that run regardless of the frame outcome
    pub fn expire_timers(&mut self, now_ms: u64) {
        self.ui.expire_timers(now_ms);
    }

    /// Clear the transient state of every mode; settings and ranking persist
    pub fn reset_transient(&mut self) {
        self.drawing.reset();
        self.navigation.reset();
        self.ui.reset();
    }

    #[must_use]
    pub const fn tool(&self) -> DrawingTool {
        self.drawing.tool()
    }

    #[must_use]
    pub const fn pointer(&self) -> PointerState {
        self.drawing.pointer()
    }

    #[must_use]
    pub const fn charge(&self) -> ChargeState {
        self.navigation.charge()
    }

    #[must_use]
    pub const fn two_hand(&self) -> TwoHandState {
        self.navigation.two_hand()
    }

    #[must_use]
    pub const fn ranking(&self) -> &RankingBuffer {
        self.navigation.ranking()
    }

    pub fn reset_ranking(&mut self) {
        self.navigation.reset_ranking();
    }

    #[must_use]
    pub const fn ui_state(&self) -> &UiControlState {
        self.ui.state()
    }

    #[must_use]
    pub const fn drawing(&self) -> &DrawingController {
        &self.drawing
    }

    pub fn drawing_mut(&mut self) -> &mut DrawingController {
        &mut self.drawing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        commands::SceneCommand,
        constants::{INDEX_TIP, ROTATION_REFERENCE_LANDMARK},
        landmarks::{Hand, Landmark},
        modes::CanvasSize,
    };

    fn ctx(now_ms: u64) -> FrameContext {
        FrameContext {
            now_ms,
            canvas: CanvasSize {
                width: 1000.0,
                height: 800.0,
            },
        }
    }

    fn hand(x: f64, y: f64) -> Hand {
        let mut points = vec![Landmark::new(0.5, 0.5, 0.0); 21];
        points[INDEX_TIP] = Landmark::new(x, y, 0.0);
        points[ROTATION_REFERENCE_LANDMARK] = Landmark::new(x, y, 0.0);
        Hand::new(points)
    }

    fn pinch_facts(hand_count: usize) -> GestureFacts {
        GestureFacts {
            pinch_distance: Some(0.03),
            is_pinching: true,
            is_fist: false,
            hand_count,
        }
    }

    #[test]
    fn test_only_active_controller_runs() {
        let mut dispatcher = ModeDispatcher::default();
        let frame = LandmarkFrame::new(vec![hand(0.4, 0.5)]);
        dispatcher.dispatch(&frame, &pinch_facts(1), &ctx(0));
        assert!(dispatcher.pointer().is_active());

        // Navigation never saw the fist because drawing was active
        let fist = GestureFacts {
            is_fist: true,
            hand_count: 1,
            ..GestureFacts::default()
        };
        dispatcher.dispatch(&frame, &fist, &ctx(16));
        assert!(!dispatcher.charge().is_charging());
    }

    #[test]
    fn test_mode_switch_applies_at_frame_boundary() {
        let mut dispatcher = ModeDispatcher::default();
        let frame = LandmarkFrame::new(vec![hand(0.4, 0.5)]);
        dispatcher.dispatch(&frame, &pinch_facts(1), &ctx(0));

        dispatcher.request_mode(Mode::Navigation);
        assert_eq!(dispatcher.mode(), Mode::Drawing);
        assert!(dispatcher.pointer().is_active());

        dispatcher.dispatch(&frame, &GestureFacts::default(), &ctx(16));
        assert_eq!(dispatcher.mode(), Mode::Navigation);
        assert!(!dispatcher.pointer().is_active());
    }

    #[test]
    fn test_switch_into_navigation_has_no_stale_rotation() {
        let mut dispatcher = ModeDispatcher::default();
        dispatcher.request_mode(Mode::Navigation);
        let two = LandmarkFrame::new(vec![hand(0.3, 0.5), hand(0.7, 0.5)]);
        let facts = GestureFacts {
            hand_count: 2,
            ..GestureFacts::default()
        };
        dispatcher.dispatch(&two, &facts, &ctx(0));
        assert!(dispatcher.two_hand().previous_points.is_some());

        // Leave and come back; the old baseline must be gone
        dispatcher.request_mode(Mode::Drawing);
        dispatcher.dispatch(&LandmarkFrame::empty(), &GestureFacts::default(), &ctx(16));
        dispatcher.request_mode(Mode::Navigation);
        let moved = LandmarkFrame::new(vec![hand(0.1, 0.1), hand(0.2, 0.1)]);
        let commands = dispatcher.dispatch(&moved, &facts, &ctx(32));
        assert!(!commands
            .iter()
            .any(|c| matches!(c, Command::Scene(SceneCommand::Rotate { .. }))));
    }

    #[test]
    fn test_same_mode_request_keeps_state() {
        let mut dispatcher = ModeDispatcher::default();
        let frame = LandmarkFrame::new(vec![hand(0.4, 0.5)]);
        dispatcher.dispatch(&frame, &pinch_facts(1), &ctx(0));
        dispatcher.request_mode(Mode::Drawing);
        let commands = dispatcher.dispatch(&LandmarkFrame::new(vec![hand(0.42, 0.5)]), &pinch_facts(1), &ctx(16));
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_tool_switch_applies_at_frame_boundary() {
        let mut dispatcher = ModeDispatcher::default();
        let frame = LandmarkFrame::new(vec![hand(0.4, 0.5)]);
        dispatcher.dispatch(&frame, &pinch_facts(1), &ctx(0));

        dispatcher.request_tool(DrawingTool::OpenPalm);
        assert_eq!(dispatcher.tool(), DrawingTool::Pinch);

        let commands = dispatcher.dispatch(&LandmarkFrame::new(vec![hand(0.42, 0.5)]), &pinch_facts(1), &ctx(16));
        assert_eq!(dispatcher.tool(), DrawingTool::OpenPalm);
        assert!(commands.is_empty());
    }
}
