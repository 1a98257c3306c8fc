// src/app/quiz_app.rs
//! The quiz page: question loading, answering, the virtual quiz master and submission.

use std::rc::Rc;
use std::sync::{Arc, Mutex, MutexGuard};

use js_sys::Promise;
use log::{error, info};
use rand::Rng;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::app::announcer::{Announcer, SilentAnnouncer, WebSpeechAnnouncer};
use crate::config::{AppConfig, Locale};
use crate::error::QuizError;
use crate::logic::announcements::{congratulations, pick_appreciation, question_reading};
use crate::logic::AnswerSheet;
use crate::network::{FetchClient, QuizService};
use crate::protocol::{QuizQuestion, QuizResult, QuizSubmission};

/// Quiz page state. Every mutating call returns the lines the quiz master should
/// say next; the list is empty while the quiz master is off.
#[derive(Debug, Clone, Default)]
pub struct QuizSession {
    locale: Locale,
    questions: Vec<QuizQuestion>,
    sheet: AnswerSheet,
    quiz_master: bool,
    participant: Option<(String, String)>,
    result: Option<QuizResult>,
}

impl QuizSession {
    pub fn new(locale: Locale) -> Self {
        Self { locale, ..Self::default() }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn set_locale(&mut self, locale: Locale) {
        self.locale = locale;
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn sheet(&self) -> &AnswerSheet {
        &self.sheet
    }

    pub fn quiz_master(&self) -> bool {
        self.quiz_master
    }

    pub fn result(&self) -> Option<&QuizResult> {
        self.result.as_ref()
    }

    /// Installs a question set. Answers survive a reload of the same set, e.g. after
    /// a language switch.
    pub fn load(&mut self, questions: Vec<QuizQuestion>) {
        if self.sheet.len() != questions.len() {
            self.sheet = AnswerSheet::new(questions.len());
        }
        self.questions = questions;
    }

    /// Records an answer. A correct one earns a word of praise; then the next
    /// unanswered question is read.
    pub fn answer<R: Rng + ?Sized>(
        &mut self,
        question: usize,
        option: usize,
        rng: &mut R,
    ) -> Result<(bool, Vec<String>), QuizError> {
        let is_correct = self.sheet.answer(&self.questions, question, option)?;
        if !self.quiz_master {
            return Ok((is_correct, Vec::new()));
        }

        let mut script = Vec::new();
        if is_correct {
            script.push(pick_appreciation(self.locale, rng));
        }
        if let Some(next) = self.sheet.next_unanswered_after(question) {
            script.push(self.reading(next));
        }
        Ok((is_correct, script))
    }

    /// Switches the quiz master on or off. Turning it on reads the first
    /// unanswered question.
    pub fn set_quiz_master(&mut self, enabled: bool) -> Vec<String> {
        self.quiz_master = enabled;
        if !enabled {
            return Vec::new();
        }
        self.sheet
            .first_unanswered()
            .map(|index| vec![self.reading(index)])
            .unwrap_or_default()
    }

    pub fn submission(&mut self, full_name: &str, institution: &str) -> Result<QuizSubmission, QuizError> {
        let submission = self.sheet.submission(full_name, institution)?;
        self.participant = Some((full_name.trim().to_string(), institution.trim().to_string()));
        Ok(submission)
    }

    pub fn record_result(&mut self, result: QuizResult) -> Vec<String> {
        info!("Quiz scored {}", result.score_label());
        self.result = Some(result);
        if self.quiz_master {
            vec![congratulations(self.locale).to_string()]
        } else {
            Vec::new()
        }
    }

    /// Certificate link for the recorded result, when it carries a reference id.
    pub fn certificate_link(&self, path: &str, encode: impl Fn(&str) -> String) -> Option<String> {
        let (name, institution) = self.participant.as_ref()?;
        self.result.as_ref()?.certificate_link(path, name, institution, encode)
    }

    fn reading(&self, index: usize) -> String {
        question_reading(self.locale, index, &self.questions[index])
    }
}

fn lock_session(session: &Arc<Mutex<QuizSession>>) -> MutexGuard<'_, QuizSession> {
    match session.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            error!("Quiz session mutex poisoned. Recovering...");
            poisoned.into_inner()
        }
    }
}

fn announce(announcer: &dyn Announcer, locale: Locale, script: &[String]) {
    if script.is_empty() {
        return;
    }
    announcer.stop();
    for line in script {
        announcer.speak(line, locale);
    }
}

#[wasm_bindgen]
pub struct QuizApp {
    config: AppConfig,
    client: FetchClient,
    announcer: Rc<dyn Announcer>,
    session: Arc<Mutex<QuizSession>>,
}

#[wasm_bindgen]
impl QuizApp {
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<QuizApp, JsValue> {
        let config = AppConfig::from_json(config_json)?;
        let announcer: Rc<dyn Announcer> = match WebSpeechAnnouncer::new() {
            Some(speech) => Rc::new(speech),
            None => {
                info!("Speech synthesis unavailable, quiz master stays silent");
                Rc::new(SilentAnnouncer)
            }
        };
        Ok(QuizApp {
            client: FetchClient::new(&config),
            session: Arc::new(Mutex::new(QuizSession::new(config.locale))),
            announcer,
            config,
        })
    }

    /// Fetches the question set for the configured language. Resolves to the
    /// number of questions.
    #[wasm_bindgen(js_name = loadQuestions)]
    pub fn load_questions(&self) -> Promise {
        let pending = self.client.load_questions(self.config.locale);
        let session = Arc::clone(&self.session);
        future_to_promise(async move {
            let questions = pending.await?;
            let count = questions.len();
            lock_session(&session).load(questions);
            info!("Loaded {} quiz questions", count);
            Ok(JsValue::from(count as u32))
        })
    }

    /// Switches the page language, e.g. `te-IN`. Call `loadQuestions` afterwards;
    /// given answers are kept.
    #[wasm_bindgen(js_name = setLanguage)]
    pub fn set_language(&mut self, tag: &str) {
        let locale = Locale::from_tag(tag);
        self.config = self.config.clone().with_locale(locale);
        self.announcer.stop();
        lock_session(&self.session).set_locale(locale);
        info!("Quiz language set to {}", locale.code());
    }

    #[wasm_bindgen(js_name = questionsJson)]
    pub fn questions_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(lock_session(&self.session).questions()).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Records an answer and returns whether it was correct.
    pub fn answer(&self, question: usize, option: usize) -> Result<bool, JsValue> {
        let (is_correct, script) = lock_session(&self.session).answer(question, option, &mut rand::thread_rng())?;
        announce(self.announcer.as_ref(), self.config.locale, &script);
        Ok(is_correct)
    }

    #[wasm_bindgen(js_name = isAnswered)]
    pub fn is_answered(&self, question: usize) -> bool {
        lock_session(&self.session).sheet().is_answered(question)
    }

    #[wasm_bindgen(js_name = answerResult)]
    pub fn answer_result(&self, question: usize) -> Option<bool> {
        lock_session(&self.session).sheet().result(question)
    }

    /// Rounded percentage of answered questions.
    pub fn progress(&self) -> u32 {
        lock_session(&self.session).sheet().progress()
    }

    #[wasm_bindgen(js_name = unansweredCount)]
    pub fn unanswered_count(&self) -> usize {
        let session = lock_session(&self.session);
        session.sheet().len() - session.sheet().answered_count()
    }

    /// Flips the virtual quiz master and returns the new setting.
    #[wasm_bindgen(js_name = toggleQuizMaster)]
    pub fn toggle_quiz_master(&self) -> bool {
        let (enabled, script) = {
            let mut session = lock_session(&self.session);
            let enabled = !session.quiz_master();
            (enabled, session.set_quiz_master(enabled))
        };
        if !enabled {
            self.announcer.stop();
        }
        announce(self.announcer.as_ref(), self.config.locale, &script);
        enabled
    }

    #[wasm_bindgen(js_name = isSpeaking)]
    pub fn is_speaking(&self) -> bool {
        self.announcer.is_speaking()
    }

    /// Validates and submits the answers. Resolves to the result as JSON.
    pub fn submit(&self, full_name: String, institution: String) -> Promise {
        let submission = match lock_session(&self.session).submission(&full_name, &institution) {
            Ok(submission) => submission,
            Err(e) => return Promise::reject(&JsValue::from(e)),
        };
        let pending = self.client.submit(submission);
        let session = Arc::clone(&self.session);
        let announcer = Rc::clone(&self.announcer);
        let locale = self.config.locale;
        future_to_promise(async move {
            let result = pending.await?;
            let json = serde_json::to_string(&result).map_err(|e| JsValue::from_str(&e.to_string()))?;
            let script = lock_session(&session).record_result(result);
            announce(announcer.as_ref(), locale, &script);
            Ok(JsValue::from_str(&json))
        })
    }

    #[wasm_bindgen(js_name = scoreLabel)]
    pub fn score_label(&self) -> Option<String> {
        lock_session(&self.session).result().map(QuizResult::score_label)
    }

    #[wasm_bindgen(js_name = isMerit)]
    pub fn is_merit(&self) -> Option<bool> {
        lock_session(&self.session).result().map(QuizResult::is_merit)
    }

    #[wasm_bindgen(js_name = meritCutoff)]
    pub fn merit_cutoff(&self) -> Option<u32> {
        lock_session(&self.session).result().map(QuizResult::effective_merit_cutoff)
    }

    #[wasm_bindgen(js_name = certificateLink)]
    pub fn certificate_link(&self) -> Option<String> {
        lock_session(&self.session).certificate_link(&self.config.certificate_path, |value| {
            js_sys::encode_uri_component(value).into()
        })
    }
}
