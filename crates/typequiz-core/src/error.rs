//! Error types for the quiz flow.
//!
//! `RequestError` describes a failed call to the quiz backend. The flow
//! controller treats every variant the same way ("request failed"); the
//! variants exist so logs can say what actually went wrong.
//!
//! `QuizError` is returned when a transition is attempted from a phase that
//! does not allow it. A rejected transition never changes session state.

use thiserror::Error;

/// Errors that can occur when talking to the quiz backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The request never produced an HTTP response.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("backend returned HTTP {status}")]
    Status { status: u16 },

    /// The response body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The backend returned a question batch with no questions in it.
    #[error("backend returned an empty question set")]
    EmptyQuestionSet,
}

/// A transition that the flow controller refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// `start` was requested before a question set finished loading.
    #[error("questions are not loaded yet")]
    NotReady,

    /// The operation is not valid in the current phase.
    #[error("cannot {operation} while {phase}")]
    InvalidTransition {
        operation: &'static str,
        phase: &'static str,
    },
}
