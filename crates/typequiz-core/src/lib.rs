//! typequiz-core — Quiz flow state machine, data model, and view model.
//!
//! This crate holds everything that does not touch the network or the
//! terminal: the question and tally types, the headless flow controller,
//! the view model derived from it, and the engine that drives the flow
//! against a `QuizBackend`.

pub mod engine;
pub mod error;
pub mod model;
pub mod session;
pub mod traits;
pub mod view;

pub use error::{QuizError, RequestError};
