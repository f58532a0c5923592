//! Backend trait for question generation and result scoring.
//!
//! Implemented by the HTTP and mock backends in `typequiz-client`.

use async_trait::async_trait;

use crate::error::RequestError;
use crate::model::{PersonalityResult, QuestionSet, TraitTally};

/// A service that generates question sets and scores finished tallies.
#[async_trait]
pub trait QuizBackend: Send + Sync {
    /// Human-readable backend name (e.g. "http").
    fn name(&self) -> &str;

    /// Request a fresh question set for a new session.
    async fn fetch_questions(&self) -> Result<QuestionSet, RequestError>;

    /// Request the personality result for a completed tally.
    async fn compute_result(&self, tally: &TraitTally) -> Result<PersonalityResult, RequestError>;
}
