// src/config/layout.rs
//! Scene geometry and tray constants shared by every scenario.

use crate::components::{ItemKind, Size};

/// Logical coordinate space every hitbox is authored against.
pub const BASE_DIMENSIONS: Size = Size::new(500.0, 500.0);

/// Scene backdrop while the violation is shown.
pub const VIOLATION_BACKDROP: &str = "#b91c1c";
/// Scene backdrop once corrected.
pub const CORRECTED_BACKDROP: &str = "#16a34a";

/// Visual enlargement applied to the drag overlay. Presentation only, ignored by the judge.
pub const OVERLAY_SCALE: f64 = 1.1;

/// Every scenario offers the full tray; only its `correct_item` resolves it.
pub const TRAY_ITEMS: [ItemKind; 4] = ItemKind::ALL;

/// Sprite drawn under the pointer while an item is dragged.
pub fn item_sprite(item: ItemKind) -> &'static str {
    match item {
        ItemKind::Helmet => "/media/simulation%20media/helmet%20wearing/helmet.png",
        ItemKind::Discipline => "/media/simulation%20media/triple%20riding/discipline.png",
        ItemKind::Speedometer => "/media/simulation%20media/overspeed/drag%20speedometer.png?v=2",
        ItemKind::NonDrunk => "/media/simulation%20media/drunkndrive/soberman.png",
    }
}
