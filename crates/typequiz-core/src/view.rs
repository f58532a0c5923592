//! Declarative view model.
//!
//! `render` maps the controller state to exactly one screen. Front ends
//! draw a `View`; they never inspect the controller directly.

use crate::model::{PersonalityResult, Portrait};
use crate::session::{FlowController, LoadState, Phase};

/// Headline shown while the result is being computed.
pub const COMPUTING_HEADLINE: &str = "Calculating...";
/// Label shown in place of the type when the result request failed.
pub const ERROR_LABEL: &str = "ERROR";
pub const ERROR_HEADLINE: &str = "Failed to load your result";
pub const ERROR_DETAIL: &str = "Please try again.";
pub const LOAD_FAILED_NOTICE: &str = "Failed to load the questions. Please reload and try again.";
pub const LOADING_NOTICE: &str = "Generating questions...";

/// A message shown on the start screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartNotice {
    Loading,
    LoadFailed,
}

impl StartNotice {
    pub fn text(&self) -> &'static str {
        match self {
            StartNotice::Loading => LOADING_NOTICE,
            StartNotice::LoadFailed => LOAD_FAILED_NOTICE,
        }
    }
}

/// The one screen that is currently active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Start {
        /// Whether the start action is available.
        ready: bool,
        notice: Option<StartNotice>,
    },
    Question {
        /// 1-based question number.
        number: usize,
        total: usize,
        prompt: String,
        options: [String; 2],
        progress_percent: u32,
    },
    Computing,
    Result(ResultView),
    Error {
        label: &'static str,
        headline: &'static str,
        detail: &'static str,
    },
}

/// A personality result, ready to display verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub type_label: String,
    pub character_name: String,
    pub portrait: Portrait,
    pub description: String,
    pub traits: Vec<String>,
}

impl From<&PersonalityResult> for ResultView {
    fn from(result: &PersonalityResult) -> Self {
        Self {
            type_label: result.mbti_type.clone(),
            character_name: result.character_name.clone(),
            portrait: result.portrait(),
            description: result.description.clone(),
            traits: result.traits.clone(),
        }
    }
}

/// Compute the active screen for the current controller state.
pub fn render(flow: &FlowController) -> View {
    match flow.phase() {
        Phase::NotStarted => View::Start {
            ready: flow.is_ready(),
            notice: match flow.load_state() {
                LoadState::Pending => Some(StartNotice::Loading),
                LoadState::Failed => Some(StartNotice::LoadFailed),
                LoadState::Idle | LoadState::Ready => None,
            },
        },
        Phase::AwaitingAnswer(index) => match flow.current_question() {
            Some(question) => View::Question {
                number: index + 1,
                total: flow.total_questions(),
                prompt: question.prompt.clone(),
                options: [
                    question.answers[0].text.clone(),
                    question.answers[1].text.clone(),
                ],
                progress_percent: flow.progress_percent(),
            },
            None => error_view(),
        },
        Phase::ComputingResult => View::Computing,
        Phase::ShowingResult(result) => View::Result(ResultView::from(result)),
        Phase::ResultFailed => error_view(),
    }
}

fn error_view() -> View {
    View::Error {
        label: ERROR_LABEL,
        headline: ERROR_HEADLINE,
        detail: ERROR_DETAIL,
    }
}
