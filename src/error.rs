// src/error.rs

use wasm_bindgen::JsValue;

/// Errors from reading runtime configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Malformed config JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unknown scenario: {0}")]
    UnknownScenario(String),
}

/// Errors from talking to the site's HTTP endpoints.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    #[error("No browser window available")]
    NoWindow,

    #[error("Failed to build request: {0}")]
    Request(String),

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl NetworkError {
    pub(crate) fn fetch(value: JsValue) -> Self {
        NetworkError::Fetch(describe_js(&value))
    }
}

/// Errors raised while filling in or submitting the quiz.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("Please enter your name")]
    MissingName,

    #[error("Please answer all {0} remaining question(s)")]
    Unanswered(usize),

    #[error("Question {0} does not exist")]
    NoSuchQuestion(usize),

    #[error("Question {0} has already been answered")]
    AlreadyAnswered(usize),

    #[error("Option {option} does not exist for question {question}")]
    NoSuchOption { question: usize, option: usize },
}

/// Best-effort text for a thrown JS value.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

macro_rules! impl_into_js {
    ($($err:ty),*) => {
        $(impl From<$err> for JsValue {
            fn from(err: $err) -> Self {
                JsValue::from_str(&err.to_string())
            }
        })*
    };
}

impl_into_js!(ConfigError, NetworkError, QuizError);
