// src/components/scenario.rs
//! Static description of one "fix the violation" scenario.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::components::position::{Rect, Size};

/// The draggable items offered by the tray. Exactly one of them resolves a given scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemKind {
    Helmet,
    Discipline,
    Speedometer,
    NonDrunk,
}

impl ItemKind {
    pub const ALL: [ItemKind; 4] = [
        ItemKind::Helmet,
        ItemKind::Discipline,
        ItemKind::Speedometer,
        ItemKind::NonDrunk,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Helmet => "helmet",
            ItemKind::Discipline => "discipline",
            ItemKind::Speedometer => "speedometer",
            ItemKind::NonDrunk => "non-drunk",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown tray item '{}'", s))
    }
}

/// A still image or a video clip shown in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MediaAsset {
    Image { src: &'static str },
    Video { src: &'static str },
}

impl MediaAsset {
    pub fn src(&self) -> &'static str {
        match self {
            MediaAsset::Image { src } | MediaAsset::Video { src } => src,
        }
    }

    pub fn is_video(&self) -> bool {
        matches!(self, MediaAsset::Video { .. })
    }
}

/// Before/after media pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SceneMedia {
    pub violation: MediaAsset,
    pub corrected: MediaAsset,
}

/// Immutable per-scenario parameters. All geometry is authored in `base_dimensions` units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScenarioConfig {
    /// Opaque id reported to the completion endpoint.
    pub scene_id: &'static str,
    pub base_dimensions: Size,
    pub target_hitbox: Rect,
    /// Footprint of the dragged item. Never scaled.
    pub item_size: Size,
    pub correct_item: ItemKind,
    pub media: SceneMedia,
    pub success_message: &'static str,
}
