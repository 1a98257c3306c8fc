// src/app/completion_reporter.rs
//! Fire-and-forget delivery of the completion report.

use std::sync::{Arc, Mutex};

use futures::future::LocalFutureObj;
use futures::task::{LocalSpawn, LocalSpawnExt, SpawnError};
use log::{info, warn};

use crate::app::drag_handler::lock_widget;
use crate::network::CompletionReporter;
use crate::protocol::CompletionRequest;
use crate::widget::ScenarioWidget;

/// Runs futures on the browser's microtask queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

impl LocalSpawn for BrowserSpawner {
    fn spawn_local_obj(&self, future: LocalFutureObj<'static, ()>) -> Result<(), SpawnError> {
        wasm_bindgen_futures::spawn_local(future);
        Ok(())
    }
}

/// Sends `request` in the background.
///
/// The outcome never touches the completed state: a failed report is logged and
/// leaves the widget without a reference id. A reference id, when one is issued,
/// is stored on the widget before `on_settled` is called with it.
pub fn report_completion<R, S, F>(
    widget_arc: Arc<Mutex<ScenarioWidget>>,
    reporter: &R,
    spawner: &S,
    request: CompletionRequest,
    on_settled: F,
) where
    R: CompletionReporter + ?Sized,
    S: LocalSpawn + ?Sized,
    F: FnOnce(Option<String>) + 'static,
{
    let scene_id = request.scene_id.clone();
    let pending = reporter.report(request);

    let task = async move {
        let reference_id = match pending.await {
            Ok(response) => response.into_reference_id(),
            Err(e) => {
                warn!("Completion report for {} failed: {}", scene_id, e);
                None
            }
        };

        match &reference_id {
            Some(id) => {
                if lock_widget(&widget_arc).record_reference_id(id.clone()) {
                    info!("Completion of {} acknowledged with reference {}", scene_id, id);
                }
            }
            None => info!("Completion of {} settled without a reference", scene_id),
        }
        on_settled(reference_id);
    };

    if let Err(e) = spawner.spawn_local(task) {
        warn!("Could not schedule completion report: {}", e);
    }
}
