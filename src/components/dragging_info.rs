// src/components/dragging_info.rs

use serde::Serialize;

use crate::components::position::Position;
use crate::components::scenario::ItemKind;

/// Mutable per-widget drag state. Created fresh on mount, dropped on unmount.
#[derive(Serialize, Clone, Debug, PartialEq, Default)]
pub struct DragState {
    /// Item currently under the pointer.
    pub dragged_item: Option<ItemKind>,
    /// Pointer-to-item-origin offset captured at pick-up, in rendered pixels.
    pub drag_offset: Position,
    /// Top-left of the dragged item in rendered pixels. `None` until the first pick-up.
    pub item_position: Option<Position>,
    /// Terminal flag. Only ever goes false -> true.
    pub is_completed: bool,
    /// Set at most once, after an acknowledged completion report.
    pub reference_id: Option<String>,
    /// Number of drops the judge has evaluated, including the successful one.
    pub attempts: u32,
    /// Timestamp (ms) of the first pick-up of this session.
    pub first_pick_up_ms: Option<f64>,
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        self.dragged_item.is_some()
    }
}
