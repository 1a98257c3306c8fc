// src/app/drag_handler.rs
//! Pointer gesture entry points over the shared widget (start, update, end).

use std::sync::{Arc, Mutex, MutexGuard};

use futures::task::LocalSpawn;
use log::{debug, error};

use crate::app::completion_reporter;
use crate::components::{ItemKind, Size};
use crate::network::CompletionReporter;
use crate::widget::{DropOutcome, PointerSample, ScenarioWidget};

/// Locks the widget, recovering from a poisoned mutex.
pub(crate) fn lock_widget(widget_arc: &Arc<Mutex<ScenarioWidget>>) -> MutexGuard<'_, ScenarioWidget> {
    match widget_arc.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            error!("Widget mutex poisoned. Recovering...");
            poisoned.into_inner()
        }
    }
}

/// Pointer went down on a tray item.
pub fn handle_drag_start(widget_arc: &Arc<Mutex<ScenarioWidget>>, item: ItemKind, sample: PointerSample) -> bool {
    lock_widget(widget_arc).pick_up(item, sample)
}

/// Pointer moved over the scene.
pub fn update_dragged_position(widget_arc: &Arc<Mutex<ScenarioWidget>>, sample: PointerSample) {
    lock_widget(widget_arc).move_to(sample);
}

/// Pointer released over, or left, the scene.
pub fn handle_drag_end(
    widget_arc: &Arc<Mutex<ScenarioWidget>>,
    rendered: Option<Size>,
    at_ms: f64,
) -> DropOutcome {
    let outcome = lock_widget(widget_arc).release(rendered, at_ms);
    debug!("Drag ended: {:?}", outcome);
    outcome
}

/// Ends the gesture and, on the completing drop, dispatches the completion report.
///
/// The widget lock is released before the report is spawned; `on_settled` runs once
/// the report has finished, successfully or not.
pub fn finish_drag<R, S, F>(
    widget_arc: &Arc<Mutex<ScenarioWidget>>,
    reporter: &R,
    spawner: &S,
    rendered: Option<Size>,
    at_ms: f64,
    on_settled: F,
) -> DropOutcome
where
    R: CompletionReporter + ?Sized,
    S: LocalSpawn + ?Sized,
    F: FnOnce(Option<String>) + 'static,
{
    let outcome = handle_drag_end(widget_arc, rendered, at_ms);
    if let DropOutcome::Completed(request) = &outcome {
        completion_reporter::report_completion(
            Arc::clone(widget_arc),
            reporter,
            spawner,
            request.clone(),
            on_settled,
        );
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::completion_reporter::tests::RecordingReporter;
    use crate::config::scenarios::{HELMET, OVERSPEED};
    use crate::logic::Verdict;
    use crate::protocol::CompletionResponse;
    use futures::executor::LocalPool;

    const RENDERED: Option<Size> = Some(Size::new(500.0, 500.0));

    #[test]
    fn report_is_sent_exactly_once() {
        let widget = Arc::new(Mutex::new(ScenarioWidget::new(HELMET)));
        let reporter = RecordingReporter::answering(Ok(CompletionResponse { reference_id: Some("SIM-7".into()) }));
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        assert!(handle_drag_start(&widget, ItemKind::Helmet, PointerSample::new(300.0, 140.0, 0.0)));
        let first = finish_drag(&widget, &reporter, &spawner, RENDERED, 10.0, |_| {});
        assert!(matches!(first, DropOutcome::Completed(_)));

        // further gestures after completion go nowhere
        assert!(!handle_drag_start(&widget, ItemKind::Helmet, PointerSample::new(300.0, 140.0, 20.0)));
        let second = finish_drag(&widget, &reporter, &spawner, RENDERED, 30.0, |_| {});
        assert_eq!(second, DropOutcome::Ignored);

        pool.run();
        assert_eq!(reporter.sent().len(), 1);
        assert_eq!(reporter.sent()[0].scene_id, "bike_no_helmet_prototype");
        assert_eq!(lock_widget(&widget).reference_id(), Some("SIM-7"));
    }

    #[test]
    fn rejected_drops_send_nothing() {
        let widget = Arc::new(Mutex::new(ScenarioWidget::new(OVERSPEED)));
        let reporter = RecordingReporter::answering(Ok(CompletionResponse::default()));
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();

        handle_drag_start(&widget, ItemKind::Helmet, PointerSample::new(300.0, 275.0, 0.0));
        let outcome = finish_drag(&widget, &reporter, &spawner, RENDERED, 1.0, |_| {});
        assert_eq!(outcome, DropOutcome::Rejected(Verdict::WrongItem));

        pool.run();
        assert!(reporter.sent().is_empty());
    }

    #[test]
    fn moves_update_the_shared_widget() {
        let widget = Arc::new(Mutex::new(ScenarioWidget::new(HELMET)));
        handle_drag_start(&widget, ItemKind::Helmet, PointerSample::new(50.0, 40.0, 0.0));
        update_dragged_position(&widget, PointerSample::new(150.0, 140.0, 1.0));
        let position = lock_widget(&widget).state().item_position;
        assert_eq!(position, Some(crate::components::Position::new(100.0, 100.0)));
    }
}
