// src/app/renderer.rs
//! Applies a `SceneView` to the scene's DOM elements.
//!
//! The page provides the markup; elements are located inside the scene root by
//! data attributes:
//!
//! | attribute               | element                          |
//! |-------------------------|----------------------------------|
//! | `data-scene-image`      | `<img>` for still media          |
//! | `data-scene-video`      | `<video>` for clips              |
//! | `data-overlay`          | `<img>` following the pointer    |
//! | `data-success`          | panel shown once corrected       |
//! | `data-success-message`  | text node inside the panel       |
//! | `data-reference`        | reference id line                |
//!
//! Any of them may be missing; the corresponding part is then not drawn.

use std::cell::Cell;
use std::rc::Rc;

use log::{error, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlElement, HtmlImageElement, HtmlVideoElement};

use crate::components::{MediaAsset, Size};
use crate::config::layout::OVERLAY_SCALE;
use crate::error::describe_js;
use crate::widget::SceneView;

#[derive(Clone)]
pub struct SceneRenderer {
    root: HtmlElement,
    image: Option<HtmlImageElement>,
    video: Option<HtmlVideoElement>,
    overlay: Option<HtmlImageElement>,
    success: Option<HtmlElement>,
    success_message: Option<HtmlElement>,
    reference: Option<HtmlElement>,
    video_started: Rc<Cell<bool>>,
}

fn find<T: JsCast>(root: &Element, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<T>().ok())
}

impl SceneRenderer {
    pub fn new(root: HtmlElement) -> Self {
        Self {
            image: find(&root, "[data-scene-image]"),
            video: find(&root, "[data-scene-video]"),
            overlay: find(&root, "[data-overlay]"),
            success: find(&root, "[data-success]"),
            success_message: find(&root, "[data-success-message]"),
            reference: find(&root, "[data-reference]"),
            video_started: Rc::new(Cell::new(false)),
            root,
        }
    }

    pub fn root(&self) -> &HtmlElement {
        &self.root
    }

    /// Current on-screen size of the scene. `None` when it has no layout box.
    pub fn measure(&self) -> Option<Size> {
        let rect = self.root.get_bounding_client_rect();
        Some(Size::new(rect.width(), rect.height())).filter(|size| size.is_measurable())
    }

    /// Pointer position relative to the scene's top-left corner.
    pub fn to_scene(&self, client_x: f64, client_y: f64) -> (f64, f64) {
        let rect = self.root.get_bounding_client_rect();
        (client_x - rect.left(), client_y - rect.top())
    }

    pub fn render(&self, view: &SceneView) {
        if let Err(e) = self.try_render(view) {
            error!("Failed to render scene: {}", describe_js(&e));
        }
    }

    fn try_render(&self, view: &SceneView) -> Result<(), JsValue> {
        self.root.style().set_property("background-color", view.backdrop)?;

        match view.media {
            MediaAsset::Image { src } => {
                if let Some(image) = &self.image {
                    if !image.src().ends_with(src) {
                        image.set_src(src);
                    }
                    image.set_hidden(false);
                }
                if let Some(video) = &self.video {
                    video.set_hidden(true);
                }
            }
            MediaAsset::Video { src } => {
                if let Some(image) = &self.image {
                    image.set_hidden(true);
                }
                if let Some(video) = &self.video {
                    if !video.src().ends_with(src) {
                        video.set_src(src);
                    }
                    video.set_hidden(false);
                    if view.completed && !self.video_started.replace(true) {
                        play(video);
                    }
                }
            }
        }

        if let Some(overlay) = &self.overlay {
            match &view.overlay {
                Some(item) => {
                    if !overlay.src().ends_with(item.sprite) {
                        overlay.set_src(item.sprite);
                    }
                    let style = overlay.style();
                    style.set_property("left", &format!("{}px", item.bounds.x))?;
                    style.set_property("top", &format!("{}px", item.bounds.y))?;
                    style.set_property("width", &format!("{}px", item.bounds.width))?;
                    style.set_property("height", &format!("{}px", item.bounds.height))?;
                    style.set_property("transform", &format!("scale({})", OVERLAY_SCALE))?;
                    overlay.set_hidden(false);
                }
                None => overlay.set_hidden(true),
            }
        }

        if let Some(success) = &self.success {
            success.set_hidden(!view.completed);
        }
        if let Some(message) = &self.success_message {
            message.set_text_content(Some(view.success_message));
        }
        if let Some(reference) = &self.reference {
            match &view.reference_id {
                Some(id) => {
                    reference.set_text_content(Some(&format!("Reference ID: {}", id)));
                    reference.set_hidden(false);
                }
                None => reference.set_hidden(true),
            }
        }
        Ok(())
    }
}

/// Starts playback. Autoplay refusals are logged and otherwise ignored.
fn play(video: &HtmlVideoElement) {
    match video.play() {
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                warn!("Corrected video did not start: {}", describe_js(&e));
            }
        }),
        Err(e) => warn!("Corrected video did not start: {}", describe_js(&e)),
    }
}
