// src/config/scenarios.rs
//! The four mini-game configurations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::components::{ItemKind, MediaAsset, Rect, ScenarioConfig, SceneMedia, Size};
use crate::config::layout::BASE_DIMENSIONS;
use crate::error::ConfigError;

pub const HELMET: ScenarioConfig = ScenarioConfig {
    scene_id: "bike_no_helmet_prototype",
    base_dimensions: BASE_DIMENSIONS,
    // rider's head
    target_hitbox: Rect::new(250.0, 100.0, 120.0, 80.0),
    item_size: Size::new(100.0, 80.0),
    correct_item: ItemKind::Helmet,
    media: SceneMedia {
        violation: MediaAsset::Image {
            src: "/media/simulation%20media/helmet%20wearing/without%20helmet.png",
        },
        corrected: MediaAsset::Image {
            src: "/media/simulation%20media/helmet%20wearing/with%20helmet.png",
        },
    },
    success_message: "Helmet Saves Lives! Always Wear One.",
};

pub const TRIPLE_RIDING: ScenarioConfig = ScenarioConfig {
    scene_id: "bike_triple_riding_prototype",
    base_dimensions: BASE_DIMENSIONS,
    target_hitbox: Rect::new(200.0, 150.0, 200.0, 150.0),
    item_size: Size::new(120.0, 100.0),
    correct_item: ItemKind::Discipline,
    media: SceneMedia {
        violation: MediaAsset::Image {
            src: "/media/simulation%20media/triple%20riding/triple%20riding.png",
        },
        corrected: MediaAsset::Video {
            src: "/media/simulation%20media/triple%20riding/two%20people.mp4",
        },
    },
    success_message: "Two is Company, Three's a Crowd! Ride Safely with a Pillion Only.",
};

pub const OVERSPEED: ScenarioConfig = ScenarioConfig {
    scene_id: "car_overspeed_prototype",
    base_dimensions: BASE_DIMENSIONS,
    target_hitbox: Rect::new(200.0, 200.0, 200.0, 150.0),
    item_size: Size::new(120.0, 120.0),
    correct_item: ItemKind::Speedometer,
    media: SceneMedia {
        violation: MediaAsset::Image {
            src: "/media/simulation%20media/overspeed/overspeed.png?v=2",
        },
        corrected: MediaAsset::Image {
            src: "/media/simulation%20media/overspeed/corrected%20speed.png?v=2",
        },
    },
    success_message: "Speed Kills! Always maintain safe speed limits.",
};

pub const DRUNK_DRIVE: ScenarioConfig = ScenarioConfig {
    scene_id: "car_drunk_drive_prototype",
    base_dimensions: BASE_DIMENSIONS,
    target_hitbox: Rect::new(220.0, 180.0, 160.0, 140.0),
    item_size: Size::new(120.0, 120.0),
    correct_item: ItemKind::NonDrunk,
    media: SceneMedia {
        violation: MediaAsset::Image {
            src: "/media/simulation%20media/drunkndrive/drunkanddrive.png",
        },
        corrected: MediaAsset::Video {
            src: "/media/simulation%20media/drunkndrive/sober%20driving.mp4",
        },
    },
    success_message: "Choose Sober Drives. Friends don't let friends drive drunk.",
};

/// Selects one of the scenario tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    Helmet,
    TripleRiding,
    Overspeed,
    DrunkDrive,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 4] = [
        ScenarioKind::Helmet,
        ScenarioKind::TripleRiding,
        ScenarioKind::Overspeed,
        ScenarioKind::DrunkDrive,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ScenarioKind::Helmet => "helmet",
            ScenarioKind::TripleRiding => "triple-riding",
            ScenarioKind::Overspeed => "overspeed",
            ScenarioKind::DrunkDrive => "drunk-drive",
        }
    }

    pub fn config(&self) -> &'static ScenarioConfig {
        match self {
            ScenarioKind::Helmet => &HELMET,
            ScenarioKind::TripleRiding => &TRIPLE_RIDING,
            ScenarioKind::Overspeed => &OVERSPEED,
            ScenarioKind::DrunkDrive => &DRUNK_DRIVE,
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ScenarioKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        ScenarioKind::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| ConfigError::UnknownScenario(s.to_string()))
    }
}
