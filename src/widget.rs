// src/widget.rs
//! The scenario correction widget: one configuration-driven state machine shared
//! by every mini-game.
//!
//! Pointer input flows pick-up -> move -> release. A release is judged against the
//! scenario's target; a match locks the widget in its completed state for the rest
//! of the session. The widget itself never talks to the network: a completed drop
//! hands back the request body and the caller decides how to report it.

use log::{debug, info, warn};
use serde::Serialize;

use crate::components::{DragState, ItemKind, MediaAsset, Position, Rect, ScenarioConfig, Size};
use crate::config::layout::{item_sprite, CORRECTED_BACKDROP, VIOLATION_BACKDROP};
use crate::logic::collision::{judge_drop, Verdict};
use crate::protocol::CompletionRequest;

/// Pointer position in scene coordinates plus the event timestamp (ms).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub position: Position,
    pub at_ms: f64,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, at_ms: f64) -> Self {
        Self { position: Position::new(x, y), at_ms }
    }
}

/// What a release did.
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// No drag in progress, or the widget is already completed.
    Ignored,
    /// The scene could not be measured; the drop is discarded.
    Unmeasured,
    /// Judged and not accepted.
    Rejected(Verdict),
    /// Judged and accepted. Carries the body for the completion report.
    Completed(CompletionRequest),
}

/// Dragged item as it should be drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemOverlay {
    pub item: ItemKind,
    pub sprite: &'static str,
    pub bounds: Rect,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneView {
    pub media: MediaAsset,
    pub backdrop: &'static str,
    pub overlay: Option<ItemOverlay>,
    pub completed: bool,
    pub success_message: &'static str,
    pub reference_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ScenarioWidget {
    config: ScenarioConfig,
    state: DragState,
}

impl ScenarioWidget {
    pub fn new(config: ScenarioConfig) -> Self {
        Self { config, state: DragState::default() }
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_completed(&self) -> bool {
        self.state.is_completed
    }

    pub fn reference_id(&self) -> Option<&str> {
        self.state.reference_id.as_deref()
    }

    /// Starts a drag gesture for `item`. Returns `false` once completed.
    ///
    /// The first gesture of the session centres the item under the pointer. Later
    /// gestures keep the item where it was left and remember where it was grabbed.
    pub fn pick_up(&mut self, item: ItemKind, sample: PointerSample) -> bool {
        if self.state.is_completed {
            return false;
        }

        match self.state.item_position {
            None => {
                let half = self.config.item_size.half();
                self.state.item_position = Some(sample.position.offset_from(half));
                self.state.drag_offset = half;
            }
            Some(current) => {
                self.state.drag_offset = sample.position.offset_from(current);
            }
        }
        self.state.dragged_item = Some(item);
        self.state.first_pick_up_ms.get_or_insert(sample.at_ms);
        debug!("[{}] picked up {} at {:?}", self.config.scene_id, item, sample.position);
        true
    }

    /// Follows the pointer. Last event wins.
    pub fn move_to(&mut self, sample: PointerSample) {
        if !self.state.is_dragging() || self.state.is_completed {
            return;
        }
        self.state.item_position = Some(sample.position.offset_from(self.state.drag_offset));
    }

    /// Finishes the gesture and judges the drop. The item stays where it was dropped.
    ///
    /// `rendered` is the scene's current on-screen size; `None` or a degenerate size
    /// means the scene could not be measured.
    pub fn release(&mut self, rendered: Option<Size>, at_ms: f64) -> DropOutcome {
        let Some(item) = self.state.dragged_item.take() else {
            return DropOutcome::Ignored;
        };
        if self.state.is_completed {
            return DropOutcome::Ignored;
        }
        let Some(position) = self.state.item_position else {
            return DropOutcome::Ignored;
        };
        let Some(rendered) = rendered.filter(|size| size.is_measurable()) else {
            warn!("[{}] scene not measurable, drop of {} discarded", self.config.scene_id, item);
            return DropOutcome::Unmeasured;
        };

        self.state.attempts += 1;
        let verdict = judge_drop(&self.config, item, position, rendered);
        if !verdict.is_match() {
            debug!("[{}] drop {} rejected: {:?}", self.config.scene_id, self.state.attempts, verdict);
            return DropOutcome::Rejected(verdict);
        }

        self.state.is_completed = true;
        let seconds = self
            .state
            .first_pick_up_ms
            .map(|start| ((at_ms - start) / 1000.0).max(0.0))
            .unwrap_or(0.0);
        info!(
            "[{}] completed after {} attempt(s) in {:.1}s",
            self.config.scene_id, self.state.attempts, seconds
        );
        DropOutcome::Completed(CompletionRequest {
            scene_id: self.config.scene_id.to_string(),
            success: true,
            attempts: self.state.attempts,
            seconds,
        })
    }

    /// Leaving the scene finalizes the drag exactly like a release.
    pub fn pointer_leave(&mut self, rendered: Option<Size>, at_ms: f64) -> DropOutcome {
        self.release(rendered, at_ms)
    }

    /// Stores the reference id from an acknowledged report. Accepted once, and only
    /// after completion.
    pub fn record_reference_id(&mut self, reference_id: String) -> bool {
        if !self.state.is_completed {
            warn!("[{}] reference id before completion ignored", self.config.scene_id);
            return false;
        }
        if self.state.reference_id.is_some() {
            warn!("[{}] reference id already recorded", self.config.scene_id);
            return false;
        }
        self.state.reference_id = Some(reference_id);
        true
    }

    pub fn view(&self) -> SceneView {
        let completed = self.state.is_completed;
        let overlay = match (completed, self.state.dragged_item, self.state.item_position) {
            (false, Some(item), Some(position)) => Some(ItemOverlay {
                item,
                sprite: item_sprite(item),
                bounds: Rect::from_origin_and_size(position, self.config.item_size),
            }),
            _ => None,
        };

        SceneView {
            media: if completed { self.config.media.corrected } else { self.config.media.violation },
            backdrop: if completed { CORRECTED_BACKDROP } else { VIOLATION_BACKDROP },
            overlay,
            completed,
            success_message: self.config.success_message,
            reference_id: self.state.reference_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::scenarios::{ScenarioKind, HELMET, TRIPLE_RIDING};

    const UNIT: Option<Size> = Some(Size::new(500.0, 500.0));

    fn helmet() -> ScenarioWidget {
        ScenarioWidget::new(HELMET)
    }

    #[test]
    fn helmet_correct_drop_completes() {
        let mut widget = helmet();
        assert!(widget.pick_up(ItemKind::Helmet, PointerSample::new(300.0, 140.0, 0.0)));
        assert_eq!(widget.state().item_position, Some(Position::new(250.0, 100.0)));
        assert_eq!(widget.state().drag_offset, Position::new(50.0, 40.0));

        match widget.release(UNIT, 0.0) {
            DropOutcome::Completed(request) => {
                assert_eq!(request.scene_id, "bike_no_helmet_prototype");
                assert!(request.success);
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert!(widget.is_completed());
        assert!(!widget.state().is_dragging());
    }

    #[test]
    fn helmet_near_miss_then_retry() {
        let mut widget = helmet();
        widget.pick_up(ItemKind::Helmet, PointerSample::new(300.0, 140.0, 0.0));
        // pointer offset is (50,40), so this puts the item at (400,300)
        widget.move_to(PointerSample::new(450.0, 340.0, 10.0));
        assert_eq!(widget.state().item_position, Some(Position::new(400.0, 300.0)));
        assert_eq!(widget.release(UNIT, 20.0), DropOutcome::Rejected(Verdict::Miss));
        assert!(!widget.is_completed());
        // last drop position is kept
        assert_eq!(widget.state().item_position, Some(Position::new(400.0, 300.0)));

        // grab the item at its top-left corner and drag it onto the head
        widget.pick_up(ItemKind::Helmet, PointerSample::new(400.0, 300.0, 30.0));
        assert_eq!(widget.state().drag_offset, Position::new(0.0, 0.0));
        widget.move_to(PointerSample::new(260.0, 110.0, 40.0));
        assert!(matches!(widget.release(UNIT, 50.0), DropOutcome::Completed(_)));
    }

    #[test]
    fn second_pick_up_keeps_item_in_place_until_moved() {
        let mut widget = helmet();
        widget.pick_up(ItemKind::Discipline, PointerSample::new(100.0, 100.0, 0.0));
        widget.release(UNIT, 0.0);
        let parked = widget.state().item_position;

        widget.pick_up(ItemKind::Helmet, PointerSample::new(120.0, 90.0, 5.0));
        assert_eq!(widget.state().item_position, parked);
        assert_eq!(widget.state().drag_offset, Position::new(70.0, 30.0));
        assert_eq!(widget.state().dragged_item, Some(ItemKind::Helmet));
    }

    #[test]
    fn wrong_item_on_correct_spot_does_not_complete() {
        let mut widget = ScenarioWidget::new(TRIPLE_RIDING);
        // centres a 120x100 box at (300,225): (240,175)-(360,275), inside the target
        widget.pick_up(ItemKind::Helmet, PointerSample::new(300.0, 225.0, 0.0));
        assert_eq!(widget.release(UNIT, 0.0), DropOutcome::Rejected(Verdict::WrongItem));
        assert!(!widget.is_completed());

        widget.pick_up(ItemKind::Discipline, PointerSample::new(300.0, 225.0, 0.0));
        assert!(matches!(widget.release(UNIT, 0.0), DropOutcome::Completed(_)));
    }

    #[test]
    fn completion_is_terminal() {
        let mut widget = helmet();
        widget.pick_up(ItemKind::Helmet, PointerSample::new(300.0, 140.0, 0.0));
        assert!(matches!(widget.release(UNIT, 0.0), DropOutcome::Completed(_)));
        let frozen = widget.state().clone();

        assert!(!widget.pick_up(ItemKind::Helmet, PointerSample::new(10.0, 10.0, 1.0)));
        widget.move_to(PointerSample::new(20.0, 20.0, 2.0));
        assert_eq!(widget.release(UNIT, 3.0), DropOutcome::Ignored);
        assert_eq!(widget.pointer_leave(UNIT, 4.0), DropOutcome::Ignored);
        assert_eq!(widget.state(), &frozen);
    }

    #[test]
    fn correct_item_outside_target_never_completes() {
        for kind in ScenarioKind::ALL {
            let mut widget = ScenarioWidget::new(*kind.config());
            let correct = kind.config().correct_item;
            widget.pick_up(correct, PointerSample::new(5.0, 5.0, 0.0));
            widget.move_to(PointerSample::new(-400.0, 480.0, 1.0));
            assert_eq!(widget.release(UNIT, 2.0), DropOutcome::Rejected(Verdict::Miss), "{}", kind);
            assert!(!widget.is_completed());
        }
    }

    #[test]
    fn moves_without_a_drag_are_ignored() {
        let mut widget = helmet();
        widget.move_to(PointerSample::new(100.0, 100.0, 0.0));
        assert_eq!(widget.state().item_position, None);
        assert_eq!(widget.release(UNIT, 0.0), DropOutcome::Ignored);
        assert_eq!(widget.state().attempts, 0);
    }

    #[test]
    fn pointer_leave_finalizes_like_release() {
        let mut widget = helmet();
        widget.pick_up(ItemKind::Helmet, PointerSample::new(300.0, 140.0, 0.0));
        assert!(matches!(widget.pointer_leave(UNIT, 0.0), DropOutcome::Completed(_)));
    }

    #[test]
    fn unmeasured_scene_discards_the_drop() {
        let mut widget = helmet();
        widget.pick_up(ItemKind::Helmet, PointerSample::new(300.0, 140.0, 0.0));
        assert_eq!(widget.release(None, 0.0), DropOutcome::Unmeasured);
        assert!(!widget.is_completed());
        assert!(!widget.state().is_dragging());
        assert_eq!(widget.state().attempts, 0);

        widget.pick_up(ItemKind::Helmet, PointerSample::new(300.0, 140.0, 0.0));
        assert_eq!(widget.release(Some(Size::new(0.0, 0.0)), 0.0), DropOutcome::Unmeasured);
    }

    #[test]
    fn attempts_and_seconds_are_measured() {
        let mut widget = helmet();
        widget.pick_up(ItemKind::Speedometer, PointerSample::new(300.0, 140.0, 1_000.0));
        widget.release(UNIT, 1_500.0);
        widget.pick_up(ItemKind::Helmet, PointerSample::new(300.0, 140.0, 2_000.0));
        match widget.release(UNIT, 4_500.0) {
            DropOutcome::Completed(request) => {
                assert_eq!(request.attempts, 2);
                assert_eq!(request.seconds, 3.5);
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn reference_id_is_recorded_once_after_completion() {
        let mut widget = helmet();
        assert!(!widget.record_reference_id("early".into()));

        widget.pick_up(ItemKind::Helmet, PointerSample::new(300.0, 140.0, 0.0));
        widget.release(UNIT, 0.0);
        assert!(widget.record_reference_id("SIM-1".into()));
        assert!(!widget.record_reference_id("SIM-2".into()));
        assert_eq!(widget.reference_id(), Some("SIM-1"));
    }

    #[test]
    fn view_follows_the_state() {
        let mut widget = ScenarioWidget::new(TRIPLE_RIDING);
        let idle = widget.view();
        assert_eq!(idle.media, TRIPLE_RIDING.media.violation);
        assert_eq!(idle.backdrop, VIOLATION_BACKDROP);
        assert!(idle.overlay.is_none());

        widget.pick_up(ItemKind::Discipline, PointerSample::new(300.0, 225.0, 0.0));
        let dragging = widget.view();
        let overlay = dragging.overlay.expect("overlay while dragging");
        assert_eq!(overlay.bounds, Rect::new(240.0, 175.0, 120.0, 100.0));
        assert_eq!(overlay.sprite, item_sprite(ItemKind::Discipline));

        widget.release(UNIT, 0.0);
        let done = widget.view();
        assert!(done.completed);
        assert!(done.overlay.is_none());
        assert!(done.media.is_video());
        assert_eq!(done.backdrop, CORRECTED_BACKDROP);
        assert_eq!(done.reference_id, None);
    }

    #[test]
    fn overlay_hidden_between_gestures() {
        let mut widget = helmet();
        widget.pick_up(ItemKind::Helmet, PointerSample::new(10.0, 10.0, 0.0));
        widget.release(UNIT, 0.0);
        assert!(widget.view().overlay.is_none());
    }
}
