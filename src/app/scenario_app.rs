// src/app/scenario_app.rs

use std::rc::Rc;
use std::sync::{Arc, Mutex};

use log::info;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::app::browser_event_manager::{self, ListenerList, SceneContext};
use crate::app::drag_handler::lock_widget;
use crate::app::renderer::SceneRenderer;
use crate::config::{AppConfig, ScenarioKind};
use crate::network::FetchClient;
use crate::widget::ScenarioWidget;

/// One mounted "fix the violation" mini-game.
///
/// ```js
/// const app = new ScenarioApp("helmet", "scene", "tray", "");
/// // ...
/// app.destroy();
/// ```
#[wasm_bindgen]
pub struct ScenarioApp {
    kind: ScenarioKind,
    context: SceneContext,
    listeners: ListenerList,
}

#[wasm_bindgen]
impl ScenarioApp {
    /// Mounts the scenario `scenario_key` on the element `scene_id`, taking tray items
    /// from `tray_id`. `config_json` may be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(scenario_key: &str, scene_id: &str, tray_id: &str, config_json: &str) -> Result<ScenarioApp, JsValue> {
        let kind: ScenarioKind = scenario_key.parse()?;
        let config = AppConfig::from_json(config_json)?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Failed to get document")?;
        let scene = document
            .get_element_by_id(scene_id)
            .ok_or_else(|| format!("Scene element '{}' not found", scene_id))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| format!("Scene element '{}' is not an HTML element", scene_id))?;
        let tray = document
            .get_element_by_id(tray_id)
            .ok_or_else(|| format!("Tray element '{}' not found", tray_id))?;

        let context = SceneContext {
            widget: Arc::new(Mutex::new(ScenarioWidget::new(*kind.config()))),
            reporter: Rc::new(FetchClient::new(&config)),
            renderer: SceneRenderer::new(scene),
        };
        let listeners: ListenerList = Arc::new(Mutex::new(Vec::new()));
        browser_event_manager::attach_scene_listeners(&context, &tray, &listeners)?;
        context.render();

        info!("ScenarioApp: mounted {}", kind);
        Ok(ScenarioApp { kind, context, listeners })
    }

    #[wasm_bindgen(getter)]
    pub fn scenario(&self) -> String {
        self.kind.key().to_string()
    }

    #[wasm_bindgen(getter, js_name = isCompleted)]
    pub fn is_completed(&self) -> bool {
        lock_widget(&self.context.widget).is_completed()
    }

    #[wasm_bindgen(getter, js_name = referenceId)]
    pub fn reference_id(&self) -> Option<String> {
        lock_widget(&self.context.widget).reference_id().map(str::to_string)
    }

    /// Current scene view as JSON, for pages that draw it themselves.
    #[wasm_bindgen(js_name = viewJson)]
    pub fn view_json(&self) -> Result<String, JsValue> {
        let view = lock_widget(&self.context.widget).view();
        serde_json::to_string(&view).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Detaches every listener. The widget state is discarded with the app.
    pub fn destroy(&self) {
        browser_event_manager::detach_listeners(&self.listeners);
        info!("ScenarioApp: unmounted {}", self.kind);
    }
}
