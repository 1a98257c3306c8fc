// src/protocol.rs
//! JSON bodies exchanged with the site's HTTP endpoints.

use serde::{Deserialize, Serialize};

// --- /api/sim/complete ---

/// Body posted once a scenario has been solved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletionRequest {
    pub scene_id: String,
    pub success: bool,
    pub attempts: u32,
    pub seconds: f64,
}

/// A response without `referenceId` is valid and means "no reference issued".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompletionResponse {
    #[serde(default)]
    pub reference_id: Option<String>,
}

impl CompletionResponse {
    /// The reference id, treating an empty string like an absent one.
    pub fn into_reference_id(self) -> Option<String> {
        self.reference_id.filter(|id| !id.trim().is_empty())
    }
}

// --- /api/quiz/submit ---

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    pub id: u32,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct: usize,
}

/// `GET {quiz_endpoint}?lang=..` response.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct QuestionSet {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizSubmission {
    pub full_name: String,
    pub institution: String,
    /// Selected option per question, in question order.
    pub answers: Vec<usize>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CertificateType {
    /// Merit certificate.
    #[serde(rename = "QUIZ")]
    Quiz,
    /// Participation certificate.
    #[serde(rename = "PAR")]
    Participation,
}

impl CertificateType {
    pub fn code(&self) -> &'static str {
        match self {
            CertificateType::Quiz => "QUIZ",
            CertificateType::Participation => "PAR",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub score: u32,
    pub total: u32,
    pub passed: bool,
    #[serde(default)]
    pub reference_id: Option<String>,
    #[serde(default)]
    pub attempt_id: Option<String>,
    #[serde(default)]
    pub certificate_type: Option<CertificateType>,
    #[serde(default)]
    pub merit_cutoff: Option<u32>,
}
