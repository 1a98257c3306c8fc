// src/app/mod.rs
//! Browser glue, split by role.

pub mod announcer;
pub mod browser_event_manager;
pub mod completion_reporter;
pub mod drag_handler;
pub mod quiz_app;
pub mod renderer;
pub mod scenario_app;
