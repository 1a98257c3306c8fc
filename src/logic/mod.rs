// src/logic/mod.rs

pub mod announcements;
pub mod collision;
pub mod quiz;

pub use collision::{judge_drop, Verdict};
pub use quiz::AnswerSheet;
