//! HTTP quiz backend.
//!
//! Talks to a server exposing two endpoints:
//!
//! - `POST {base}/api/mbti/start` with no body, answering
//!   `{ "questions": [ { "question", "answers": [ {"text", "type"}, ... ] } ] }`
//! - `POST {base}/api/mbti/result` with `{ "answers": { "E": n, ... } }`,
//!   answering the personality result.
//!
//! Any transport failure or non-2xx status is reported as a `RequestError`.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use typequiz_core::error::RequestError;
use typequiz_core::model::{PersonalityResult, Question, QuestionSet, TraitTally};
use typequiz_core::traits::QuizBackend;

use crate::config::QuizConfig;
use crate::error::{check_status, classify};

pub const DEFAULT_START_PATH: &str = "/api/mbti/start";
pub const DEFAULT_RESULT_PATH: &str = "/api/mbti/result";

/// Quiz backend reached over HTTP.
pub struct HttpBackend {
    base_url: String,
    start_path: String,
    result_path: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Backend with the default endpoint paths and no client-side timeout.
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_options(base_url, DEFAULT_START_PATH, DEFAULT_RESULT_PATH, None)
    }

    pub fn from_config(config: &QuizConfig) -> Result<Self> {
        Self::with_options(
            &config.base_url,
            &config.start_path,
            &config.result_path,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    fn with_options(
        base_url: &str,
        start_path: &str,
        result_path: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            start_path: normalize_path(start_path),
            result_path: normalize_path(result_path),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

#[derive(Deserialize)]
struct QuestionBatch {
    questions: Vec<Question>,
}

#[derive(Serialize)]
struct ResultRequest<'a> {
    answers: &'a TraitTally,
}

#[async_trait]
impl QuizBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn fetch_questions(&self) -> Result<QuestionSet, RequestError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, self.start_path))
            .send()
            .await
            .map_err(|e| classify(e, &self.base_url))?;
        check_status(&response)?;

        let batch: QuestionBatch = response
            .json()
            .await
            .map_err(|e| RequestError::Decode(e.to_string()))?;
        tracing::debug!(count = batch.questions.len(), "received question batch");

        QuestionSet::new(batch.questions)
    }

    #[instrument(skip(self, tally), fields(base_url = %self.base_url, answered = tally.total()))]
    async fn compute_result(&self, tally: &TraitTally) -> Result<PersonalityResult, RequestError> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, self.result_path))
            .json(&ResultRequest { answers: tally })
            .send()
            .await
            .map_err(|e| classify(e, &self.base_url))?;
        check_status(&response)?;

        let result: PersonalityResult = response
            .json()
            .await
            .map_err(|e| RequestError::Decode(e.to_string()))?;
        tracing::debug!(mbti_type = %result.mbti_type, "received result");

        Ok(result)
    }
}
