// src/logic/quiz.rs
//! Quiz answer bookkeeping and interpretation of the scoring service's result.

use itertools::Itertools;
use log::debug;

use crate::error::QuizError;
use crate::protocol::{CertificateType, QuizQuestion, QuizResult, QuizSubmission};

/// Share of questions needed for a merit certificate when the server does not say.
const DEFAULT_MERIT_RATIO: f64 = 0.6;

impl QuizResult {
    /// Server classification, else merit when passed and participation otherwise.
    pub fn effective_certificate_type(&self) -> CertificateType {
        self.certificate_type.unwrap_or(if self.passed {
            CertificateType::Quiz
        } else {
            CertificateType::Participation
        })
    }

    pub fn is_merit(&self) -> bool {
        self.effective_certificate_type() == CertificateType::Quiz
    }

    pub fn effective_merit_cutoff(&self) -> u32 {
        self.merit_cutoff
            .unwrap_or_else(|| (self.total as f64 * DEFAULT_MERIT_RATIO).ceil() as u32)
    }

    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (self.score as f64 / self.total as f64 * 100.0).round() as u32
    }

    /// e.g. `12/15 • 80%`
    pub fn score_label(&self) -> String {
        format!("{}/{} • {}%", self.score, self.total, self.percentage())
    }

    /// Query parameters for the certificate generator. `None` until a reference id exists.
    pub fn certificate_params(&self, name: &str, institution: &str) -> Option<Vec<(&'static str, String)>> {
        let reference_id = self.reference_id.as_deref().filter(|id| !id.is_empty())?;
        Some(vec![
            ("type", self.effective_certificate_type().code().to_string()),
            ("name", name.to_string()),
            ("institution", institution.to_string()),
            ("score", self.score_label()),
            ("ref", reference_id.to_string()),
        ])
    }

    /// Full certificate link with every value passed through `encode`.
    pub fn certificate_link(
        &self,
        path: &str,
        name: &str,
        institution: &str,
        encode: impl Fn(&str) -> String,
    ) -> Option<String> {
        let params = self.certificate_params(name, institution)?;
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, encode(value)))
            .join("&");
        Some(format!("{}?{}", path, query))
    }
}

/// One slot per question. An answer, once given, is final.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnswerSheet {
    selections: Vec<Option<usize>>,
    results: Vec<Option<bool>>,
}

impl AnswerSheet {
    pub fn new(question_count: usize) -> Self {
        Self {
            selections: vec![None; question_count],
            results: vec![None; question_count],
        }
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Records `option` for `question` and returns whether it was correct.
    pub fn answer(
        &mut self,
        questions: &[QuizQuestion],
        question: usize,
        option: usize,
    ) -> Result<bool, QuizError> {
        let asked = questions.get(question).ok_or(QuizError::NoSuchQuestion(question))?;
        if question >= self.selections.len() {
            return Err(QuizError::NoSuchQuestion(question));
        }
        if self.is_answered(question) {
            return Err(QuizError::AlreadyAnswered(question));
        }
        if option >= asked.options.len() {
            return Err(QuizError::NoSuchOption { question, option });
        }

        let is_correct = option == asked.correct;
        self.selections[question] = Some(option);
        self.results[question] = Some(is_correct);
        debug!("Question {} answered with option {} (correct: {})", question, option, is_correct);
        Ok(is_correct)
    }

    pub fn is_answered(&self, question: usize) -> bool {
        matches!(self.selections.get(question), Some(Some(_)))
    }

    pub fn selection(&self, question: usize) -> Option<usize> {
        self.selections.get(question).copied().flatten()
    }

    pub fn result(&self, question: usize) -> Option<bool> {
        self.results.get(question).copied().flatten()
    }

    pub fn answered_count(&self) -> usize {
        self.selections.iter().filter(|s| s.is_some()).count()
    }

    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| matches!(r, Some(true))).count()
    }

    /// Rounded percentage of answered questions.
    pub fn progress(&self) -> u32 {
        if self.selections.is_empty() {
            return 0;
        }
        (self.answered_count() as f64 / self.selections.len() as f64 * 100.0).round() as u32
    }

    pub fn first_unanswered(&self) -> Option<usize> {
        self.selections.iter().position(|s| s.is_none())
    }

    /// First unanswered question strictly after `question`.
    pub fn next_unanswered_after(&self, question: usize) -> Option<usize> {
        self.selections
            .iter()
            .enumerate()
            .skip(question + 1)
            .find(|(_, s)| s.is_none())
            .map(|(index, _)| index)
    }

    /// Validates the sheet and builds the request body.
    pub fn submission(&self, full_name: &str, institution: &str) -> Result<QuizSubmission, QuizError> {
        if full_name.trim().is_empty() {
            return Err(QuizError::MissingName);
        }
        let answers: Vec<usize> = self.selections.iter().flatten().copied().collect();
        let remaining = self.selections.len() - answers.len();
        if remaining > 0 {
            return Err(QuizError::Unanswered(remaining));
        }
        Ok(QuizSubmission {
            full_name: full_name.to_string(),
            institution: institution.to_string(),
            answers,
        })
    }
}
