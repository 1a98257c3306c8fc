// src/app/browser_event_manager.rs
//! Attaches and detaches the pointer listeners of one scenario widget.
//!
//! `pointerdown` is taken from every tray element carrying a `data-item`
//! attribute; `pointermove`, `pointerup` and `pointerleave` from the scene root.

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, PointerEvent};

use crate::app::completion_reporter::BrowserSpawner;
use crate::app::drag_handler::{self, lock_widget};
use crate::app::renderer::SceneRenderer;
use crate::components::ItemKind;
use crate::error::describe_js;
use crate::network::CompletionReporter;
use crate::widget::{DropOutcome, PointerSample, ScenarioWidget};

/// Everything a listener needs to drive the widget and redraw it.
#[derive(Clone)]
pub(crate) struct SceneContext {
    pub widget: Arc<Mutex<ScenarioWidget>>,
    pub reporter: Rc<dyn CompletionReporter>,
    pub renderer: SceneRenderer,
}

impl SceneContext {
    pub fn render(&self) {
        let view = lock_widget(&self.widget).view();
        self.renderer.render(&view);
    }

    fn sample(&self, event: &PointerEvent) -> PointerSample {
        let (x, y) = self.renderer.to_scene(event.client_x() as f64, event.client_y() as f64);
        PointerSample::new(x, y, event.time_stamp())
    }

    fn finish(&self, at_ms: f64) {
        let rendered = self.renderer.measure();
        let settled = self.clone();
        let outcome = drag_handler::finish_drag(
            &self.widget,
            self.reporter.as_ref(),
            &BrowserSpawner,
            rendered,
            at_ms,
            move |_| settled.render(),
        );
        if outcome != DropOutcome::Ignored {
            self.render();
        }
    }
}

/// A registered listener, kept alive until detached.
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

pub(crate) type ListenerList = Arc<Mutex<Vec<Listener>>>;

fn listen(
    listeners: &ListenerList,
    target: EventTarget,
    event: &'static str,
    mut handler: impl FnMut(PointerEvent) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::wrap(Box::new(move |event: Event| match event.dyn_into::<PointerEvent>() {
        Ok(pointer) => handler(pointer),
        Err(_) => error!("Failed to cast event to PointerEvent"),
    }) as Box<dyn FnMut(Event)>);

    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    let mut guard = match listeners.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    guard.push(Listener { target, event, closure });
    Ok(())
}

/// Wires tray items under `tray` and the scene root to the widget.
pub(crate) fn attach_scene_listeners(
    context: &SceneContext,
    tray: &Element,
    listeners: &ListenerList,
) -> Result<(), JsValue> {
    let items = tray.query_selector_all("[data-item]")?;
    let mut attached = 0;
    for index in 0..items.length() {
        let Some(element) = items.item(index).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };
        let Some(item) = element
            .get_attribute("data-item")
            .and_then(|name| name.parse::<ItemKind>().ok())
        else {
            warn!("Ignoring tray element with unknown data-item");
            continue;
        };

        let ctx = context.clone();
        listen(listeners, element.into(), "pointerdown", move |event| {
            event.prevent_default();
            // a touch pointer is implicitly captured by the tray element
            if let Some(target) = event.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                if let Err(e) = target.release_pointer_capture(event.pointer_id()) {
                    warn!("release_pointer_capture failed: {}", describe_js(&e));
                }
            }
            if drag_handler::handle_drag_start(&ctx.widget, item, ctx.sample(&event)) {
                ctx.render();
            }
        })?;
        attached += 1;
    }

    let scene: EventTarget = context.renderer.root().clone().into();

    let ctx = context.clone();
    listen(listeners, scene.clone(), "pointermove", move |event| {
        if lock_widget(&ctx.widget).state().is_dragging() {
            drag_handler::update_dragged_position(&ctx.widget, ctx.sample(&event));
            ctx.render();
        }
    })?;

    let ctx = context.clone();
    listen(listeners, scene.clone(), "pointerup", move |event| ctx.finish(event.time_stamp()))?;

    let ctx = context.clone();
    listen(listeners, scene, "pointerleave", move |event| ctx.finish(event.time_stamp()))?;

    info!("Attached pointer listeners ({} tray items)", attached);
    Ok(())
}

/// Removes and drops every listener in `listeners`.
pub(crate) fn detach_listeners(listeners: &ListenerList) {
    let drained: Vec<Listener> = match listeners.lock() {
        Ok(mut guard) => guard.drain(..).collect(),
        Err(poisoned) => poisoned.into_inner().drain(..).collect(),
    };
    for listener in &drained {
        if let Err(e) = listener
            .target
            .remove_event_listener_with_callback(listener.event, listener.closure.as_ref().unchecked_ref())
        {
            error!("Error detaching {} listener: {}", listener.event, describe_js(&e));
        }
    }
    info!("Detached {} listener(s)", drained.len());
}
