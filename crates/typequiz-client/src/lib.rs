//! typequiz-client — Backend integrations for typequiz.
//!
//! Implements the `QuizBackend` trait over HTTP, loads the client
//! configuration, and provides an in-memory backend for tests.

pub mod config;
mod error;
pub mod http;
pub mod mock;

pub use config::{create_backend, load_config, load_config_from, QuizConfig};
pub use http::HttpBackend;
pub use mock::MockBackend;
