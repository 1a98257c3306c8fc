// src/network.rs
//! HTTP plumbing for the site's JSON endpoints.
//!
//! The widgets depend on the two traits below, never on `fetch` directly, so the
//! completion and quiz flows can be driven by fakes in native tests.

use futures::future::LocalBoxFuture;
use futures::FutureExt;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::config::{AppConfig, Locale};
use crate::error::{describe_js, NetworkError};
use crate::protocol::{CompletionRequest, CompletionResponse, QuestionSet, QuizQuestion, QuizResult, QuizSubmission};

/// Sends the one-shot completion report of a solved scenario.
pub trait CompletionReporter {
    fn report(&self, request: CompletionRequest) -> LocalBoxFuture<'static, Result<CompletionResponse, NetworkError>>;
}

/// Question source and scoring service of the quiz page.
pub trait QuizService {
    fn load_questions(&self, locale: Locale) -> LocalBoxFuture<'static, Result<Vec<QuizQuestion>, NetworkError>>;

    fn submit(&self, submission: QuizSubmission) -> LocalBoxFuture<'static, Result<QuizResult, NetworkError>>;
}

/// `window.fetch` backed client for both endpoints.
#[derive(Debug, Clone)]
pub struct FetchClient {
    completion_endpoint: String,
    quiz_endpoint: String,
}

impl FetchClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            completion_endpoint: config.completion_endpoint.clone(),
            quiz_endpoint: config.quiz_endpoint.clone(),
        }
    }
}

impl CompletionReporter for FetchClient {
    fn report(&self, request: CompletionRequest) -> LocalBoxFuture<'static, Result<CompletionResponse, NetworkError>> {
        let url = self.completion_endpoint.clone();
        async move {
            let text = fetch_text("POST", &url, Some(&request)).await?;
            // an empty 2xx body is an acknowledgement without a reference
            if text.trim().is_empty() {
                return Ok(CompletionResponse::default());
            }
            Ok(serde_json::from_str(&text)?)
        }
        .boxed_local()
    }
}

impl QuizService for FetchClient {
    fn load_questions(&self, locale: Locale) -> LocalBoxFuture<'static, Result<Vec<QuizQuestion>, NetworkError>> {
        let url = format!("{}?lang={}", self.quiz_endpoint, locale.code());
        async move {
            let set: QuestionSet = fetch_json("GET", &url, None::<&()>).await?;
            Ok(set.questions)
        }
        .boxed_local()
    }

    fn submit(&self, submission: QuizSubmission) -> LocalBoxFuture<'static, Result<QuizResult, NetworkError>> {
        let url = self.quiz_endpoint.clone();
        async move { fetch_json("POST", &url, Some(&submission)).await }.boxed_local()
    }
}

async fn fetch_json<B: Serialize, T: DeserializeOwned>(
    method: &str,
    url: &str,
    body: Option<&B>,
) -> Result<T, NetworkError> {
    let text = fetch_text(method, url, body).await?;
    Ok(serde_json::from_str(&text)?)
}

/// Performs the request and returns the body of a 2xx response as text.
async fn fetch_text<B: Serialize>(method: &str, url: &str, body: Option<&B>) -> Result<String, NetworkError> {
    let window = web_sys::window().ok_or(NetworkError::NoWindow)?;

    let init = RequestInit::new();
    init.set_method(method);
    init.set_mode(RequestMode::SameOrigin);
    if let Some(body) = body {
        let json = serde_json::to_string(body).map_err(|e| NetworkError::Request(e.to_string()))?;
        init.set_body(&JsValue::from_str(&json));
    }

    let request = Request::new_with_str_and_init(url, &init)
        .map_err(|e| NetworkError::Request(describe_js(&e)))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| NetworkError::Request(describe_js(&e)))?;
    }

    debug!("{} {}", method, url);
    let response: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(NetworkError::fetch)?
        .dyn_into()
        .map_err(NetworkError::fetch)?;
    if !response.ok() {
        return Err(NetworkError::Status(response.status()));
    }

    let text = JsFuture::from(response.text().map_err(NetworkError::fetch)?)
        .await
        .map_err(NetworkError::fetch)?;
    Ok(text.as_string().unwrap_or_default())
}
