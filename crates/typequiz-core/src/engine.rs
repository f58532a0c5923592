//! Quiz engine: drives a `FlowController` against a `QuizBackend`.
//!
//! The engine performs the two awaited network calls (question set and
//! result) and reports the rendered view to a `ScreenObserver` after every
//! transition. Each engine owns its own session; there is no shared state
//! between engines.

use std::sync::Arc;

use crate::error::QuizError;
use crate::model::Choice;
use crate::session::{Applied, FlowController, LoadTicket, Step};
use crate::traits::QuizBackend;
use crate::view::{render, View};

/// Receives the active screen whenever it changes.
pub trait ScreenObserver: Send + Sync {
    fn on_view(&self, view: &View);
}

/// Observer that ignores every view.
pub struct NoopObserver;

impl ScreenObserver for NoopObserver {
    fn on_view(&self, _: &View) {}
}

/// A single quiz session bound to a backend.
pub struct QuizEngine {
    backend: Arc<dyn QuizBackend>,
    flow: FlowController,
}

impl QuizEngine {
    pub fn new(backend: Arc<dyn QuizBackend>) -> Self {
        Self {
            backend,
            flow: FlowController::new(),
        }
    }

    /// Fetch a question set for the current session.
    ///
    /// Returns whether the session is ready to start afterwards.
    pub async fn load(&mut self, observer: &dyn ScreenObserver) -> Result<bool, QuizError> {
        let ticket = self.flow.begin_load()?;
        self.fetch_questions(ticket, observer).await;
        Ok(self.flow.is_ready())
    }

    /// Start the quiz and show the first question.
    pub fn start(&mut self, observer: &dyn ScreenObserver) -> Result<(), QuizError> {
        self.flow.start()?;
        observer.on_view(&self.view());
        Ok(())
    }

    /// Answer the current question. After the last answer this awaits the
    /// result request before returning.
    pub async fn answer(
        &mut self,
        choice: Choice,
        observer: &dyn ScreenObserver,
    ) -> Result<(), QuizError> {
        let step = self.flow.answer(choice)?;
        observer.on_view(&self.view());

        if let Step::Finished(ticket) = step {
            tracing::info!(
                backend = self.backend.name(),
                answered = ticket.tally().total(),
                "requesting result"
            );
            let response = self.backend.compute_result(ticket.tally()).await;
            if self.flow.complete_result(ticket, response) == Applied::Current {
                observer.on_view(&self.view());
            }
        }
        Ok(())
    }

    /// Go back to the start screen and fetch a new question set.
    ///
    /// Returns whether the session is ready to start afterwards.
    pub async fn restart(&mut self, observer: &dyn ScreenObserver) -> Result<bool, QuizError> {
        let ticket = self.flow.restart()?;
        self.fetch_questions(ticket, observer).await;
        Ok(self.flow.is_ready())
    }

    pub fn view(&self) -> View {
        render(&self.flow)
    }

    pub fn controller(&self) -> &FlowController {
        &self.flow
    }

    async fn fetch_questions(&mut self, ticket: LoadTicket, observer: &dyn ScreenObserver) {
        observer.on_view(&self.view());
        tracing::info!(backend = self.backend.name(), "requesting question set");
        let response = self.backend.fetch_questions().await;
        if self.flow.complete_load(ticket, response) == Applied::Current {
            observer.on_view(&self.view());
        }
    }
}
