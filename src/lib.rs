// src/lib.rs
//! Drag-and-drop "fix the violation" mini-games and the quiz page of a road-safety
//! awareness site, compiled to wasm.

use wasm_bindgen::prelude::*;

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod logic;
pub mod network;
pub mod protocol;
pub mod widget;

pub use app::quiz_app::{QuizApp, QuizSession};
pub use app::scenario_app::ScenarioApp;
pub use components::{DragState, ItemKind, Position, Rect, ScenarioConfig, Size};
pub use config::{AppConfig, Locale, ScenarioKind};
pub use error::{ConfigError, NetworkError, QuizError};
pub use logic::{judge_drop, AnswerSheet, Verdict};
pub use widget::{DropOutcome, PointerSample, SceneView, ScenarioWidget};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

// Runs once when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug).module_prefix("road_safety_sims"));
    log("road_safety_sims loaded");
}

/// Keys accepted by the `ScenarioApp` constructor.
#[wasm_bindgen(js_name = scenarioKeys)]
pub fn scenario_keys() -> Vec<String> {
    ScenarioKind::ALL.iter().map(|kind| kind.key().to_string()).collect()
}

/// Tray entries as `[{"item": "helmet", "sprite": "..."}, ...]`.
#[wasm_bindgen(js_name = trayItemsJson)]
pub fn tray_items_json() -> String {
    let items: Vec<serde_json::Value> = config::layout::TRAY_ITEMS
        .iter()
        .map(|item| serde_json::json!({ "item": item, "sprite": config::layout::item_sprite(*item) }))
        .collect();
    serde_json::Value::Array(items).to_string()
}

/// Regional authority for a `?region=` code, as JSON.
#[wasm_bindgen(js_name = regionalAuthority)]
pub fn regional_authority(code: Option<String>) -> Option<String> {
    let authority = config::regional::regional_authority(code.as_deref())?;
    serde_json::to_string(authority).ok()
}
