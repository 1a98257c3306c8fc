//! Browser smoke tests. Run with `wasm-pack test --headless --chrome`.
#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

use road_safety_sims::{regional_authority, scenario_keys, ScenarioApp};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> Document {
    web_sys::window().and_then(|w| w.document()).expect("document")
}

fn mount_markup(scene_id: &str, tray_id: &str) {
    let document = document();
    let body = document.body().expect("body");

    let scene = document.create_element("div").expect("div").dyn_into::<HtmlElement>().expect("html");
    scene.set_id(scene_id);
    scene.style().set_property("width", "500px").expect("style");
    scene.style().set_property("height", "500px").expect("style");
    scene.set_inner_html(
        r#"<img data-scene-image><video data-scene-video hidden></video><img data-overlay hidden>
           <div data-success hidden><p data-success-message></p><p data-reference hidden></p></div>"#,
    );
    body.append_child(&scene).expect("append scene");

    let tray = document.create_element("div").expect("div");
    tray.set_id(tray_id);
    tray.set_inner_html(r#"<img data-item="helmet"><img data-item="discipline"><img data-item="unknown">"#);
    body.append_child(&tray).expect("append tray");
}

#[wasm_bindgen_test]
fn mounts_and_renders_the_violation() {
    mount_markup("scene-helmet", "tray-helmet");
    let app = ScenarioApp::new("helmet", "scene-helmet", "tray-helmet", "").expect("mount");

    assert_eq!(app.scenario(), "helmet");
    assert!(!app.is_completed());
    assert_eq!(app.reference_id(), None);

    let view = app.view_json().expect("view");
    assert!(view.contains("#b91c1c"));
    assert!(view.contains("without%20helmet.png"));

    let scene = document().get_element_by_id("scene-helmet").expect("scene");
    let style = scene.get_attribute("style").unwrap_or_default();
    assert!(style.contains("background-color"));

    app.destroy();
}

#[wasm_bindgen_test]
fn rejects_unknown_scenarios_and_missing_elements() {
    mount_markup("scene-x", "tray-x");
    assert!(ScenarioApp::new("parachute", "scene-x", "tray-x", "").is_err());
    assert!(ScenarioApp::new("helmet", "no-such-scene", "tray-x", "").is_err());
    assert!(ScenarioApp::new("helmet", "scene-x", "tray-x", "{not json").is_err());
}

#[wasm_bindgen_test]
fn exported_lookups() {
    assert_eq!(scenario_keys(), vec!["helmet", "triple-riding", "overspeed", "drunk-drive"]);
    assert!(regional_authority(Some("RajannaSircilla".into())).is_some());
    assert!(regional_authority(None).is_none());
}
