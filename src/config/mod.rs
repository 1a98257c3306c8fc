// src/config/mod.rs

pub mod app_config;
pub mod layout;
pub mod regional;
pub mod scenarios;

pub use app_config::{AppConfig, Locale};
pub use scenarios::ScenarioKind;
