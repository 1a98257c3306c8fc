// src/config/app_config.rs
//! Runtime settings handed in by the hosting page.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Page language. Only English and Telugu are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Te,
}

impl Locale {
    /// Maps tags like `te-IN` or `te` to Telugu; anything else is English.
    pub fn from_tag(tag: &str) -> Locale {
        if tag.trim().to_ascii_lowercase().starts_with("te") {
            Locale::Te
        } else {
            Locale::En
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Te => "te",
        }
    }

    /// BCP 47 tag handed to speech synthesis.
    pub fn speech_tag(&self) -> &'static str {
        match self {
            Locale::En => "en-US",
            Locale::Te => "te-IN",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub completion_endpoint: String,
    pub quiz_endpoint: String,
    pub certificate_path: String,
    pub locale: Locale,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            completion_endpoint: "/api/sim/complete".to_string(),
            quiz_endpoint: "/api/quiz/submit".to_string(),
            certificate_path: "/certificates/generate".to_string(),
            locale: Locale::En,
        }
    }
}

impl AppConfig {
    /// Parses the page-supplied JSON. Blank input yields the defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_json_gives_defaults() {
        let config = AppConfig::from_json("   ").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.completion_endpoint, "/api/sim/complete");
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = AppConfig::from_json(r#"{"completionEndpoint":"/sim/done","locale":"te"}"#).unwrap();
        assert_eq!(config.completion_endpoint, "/sim/done");
        assert_eq!(config.quiz_endpoint, "/api/quiz/submit");
        assert_eq!(config.locale, Locale::Te);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(AppConfig::from_json("{"), Err(ConfigError::Malformed(_))));
    }

    #[test]
    fn locale_from_language_tags() {
        assert_eq!(Locale::from_tag("te-IN"), Locale::Te);
        assert_eq!(Locale::from_tag("te"), Locale::Te);
        assert_eq!(Locale::from_tag("en-GB"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
        assert_eq!(Locale::Te.speech_tag(), "te-IN");
    }
}
