// src/components/mod.rs

pub mod dragging_info;
pub mod position;
pub mod scenario;

pub use dragging_info::DragState;
pub use position::{Position, Rect, Size};
pub use scenario::{ItemKind, MediaAsset, ScenarioConfig, SceneMedia};
