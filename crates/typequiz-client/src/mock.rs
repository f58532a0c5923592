//! Mock backend for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use typequiz_core::error::RequestError;
use typequiz_core::model::{PersonalityResult, QuestionSet, TraitTally};
use typequiz_core::traits::QuizBackend;

/// An in-memory quiz backend for exercising the flow without a server.
///
/// Serves a fixed question set and a fixed result, or fails either call on
/// request. Records every tally it was asked to score.
pub struct MockBackend {
    questions: Result<QuestionSet, RequestError>,
    result: Result<PersonalityResult, RequestError>,
    question_calls: AtomicU32,
    result_calls: AtomicU32,
    tallies: Mutex<Vec<TraitTally>>,
}

impl MockBackend {
    pub fn new(questions: QuestionSet, result: PersonalityResult) -> Self {
        Self {
            questions: Ok(questions),
            result: Ok(result),
            question_calls: AtomicU32::new(0),
            result_calls: AtomicU32::new(0),
            tallies: Mutex::new(Vec::new()),
        }
    }

    /// Make every question set request fail with `error`.
    pub fn failing_questions(mut self, error: RequestError) -> Self {
        self.questions = Err(error);
        self
    }

    /// Make every result request fail with `error`.
    pub fn failing_result(mut self, error: RequestError) -> Self {
        self.result = Err(error);
        self
    }

    pub fn question_calls(&self) -> u32 {
        self.question_calls.load(Ordering::Relaxed)
    }

    pub fn result_calls(&self) -> u32 {
        self.result_calls.load(Ordering::Relaxed)
    }

    /// The most recent tally sent for scoring.
    pub fn last_tally(&self) -> Option<TraitTally> {
        self.tallies.lock().unwrap().last().copied()
    }

    pub fn tallies(&self) -> Vec<TraitTally> {
        self.tallies.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuizBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    async fn fetch_questions(&self) -> Result<QuestionSet, RequestError> {
        self.question_calls.fetch_add(1, Ordering::Relaxed);
        self.questions.clone()
    }

    async fn compute_result(&self, tally: &TraitTally) -> Result<PersonalityResult, RequestError> {
        self.result_calls.fetch_add(1, Ordering::Relaxed);
        self.tallies.lock().unwrap().push(*tally);
        self.result.clone()
    }
}
