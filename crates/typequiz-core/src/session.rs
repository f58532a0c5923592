//! Headless quiz flow controller.
//!
//! `FlowController` is the single owner of session state: the loaded
//! question set, the cursor, the trait tally and the current phase. It does
//! no I/O. Network calls are represented by tickets: `begin_load` and
//! `answer` hand out a ticket, the caller performs the request, and the
//! outcome is fed back through `complete_load` / `complete_result`.
//!
//! Every ticket carries the session generation it was issued under.
//! `restart` bumps the generation, so a response that arrives after a
//! restart is recognised as stale and dropped.

use tracing::{debug, warn};

use crate::error::{QuizError, RequestError};
use crate::model::{Choice, PersonalityResult, Question, QuestionSet, TraitTally};

/// Monotonically increasing session counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    fn next(self) -> Self {
        Generation(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// Progress of the question set request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadState {
    /// No load has been requested in this generation.
    #[default]
    Idle,
    Pending,
    Ready,
    /// The last load failed; the user has to reload.
    Failed,
}

/// Where the session is in the quiz.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    NotStarted,
    /// Waiting for the answer to the question at this index.
    AwaitingAnswer(usize),
    ComputingResult,
    ShowingResult(PersonalityResult),
    ResultFailed,
}

impl Phase {
    fn label(&self) -> &'static str {
        match self {
            Phase::NotStarted => "not started",
            Phase::AwaitingAnswer(_) => "awaiting an answer",
            Phase::ComputingResult => "computing the result",
            Phase::ShowingResult(_) => "showing the result",
            Phase::ResultFailed => "showing a failed result",
        }
    }
}

/// Permission to apply one question set response.
#[derive(Debug)]
#[must_use = "the load ticket must be completed with the backend response"]
pub struct LoadTicket {
    generation: Generation,
}

impl LoadTicket {
    pub fn generation(&self) -> Generation {
        self.generation
    }
}

/// Permission to apply one result response, with the payload to send.
#[derive(Debug)]
#[must_use = "the result ticket must be completed with the backend response"]
pub struct ResultTicket {
    generation: Generation,
    tally: TraitTally,
}

impl ResultTicket {
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// The tally to send to the result endpoint.
    pub fn tally(&self) -> &TraitTally {
        &self.tally
    }
}

/// Outcome of an `answer` call.
#[derive(Debug)]
pub enum Step {
    /// The next question (by index) is now awaiting an answer.
    Next(usize),
    /// All questions are answered; the result must be requested.
    Finished(ResultTicket),
}

/// Whether a backend response was applied or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

/// Session state and the transitions between quiz phases.
#[derive(Debug, Default)]
pub struct FlowController {
    generation: Generation,
    load: LoadState,
    questions: Option<QuestionSet>,
    phase: Phase,
    cursor: usize,
    tally: TraitTally,
}

impl FlowController {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Question loading
    // -----------------------------------------------------------------------

    /// Request a fresh question set for the current generation.
    pub fn begin_load(&mut self) -> Result<LoadTicket, QuizError> {
        if self.phase != Phase::NotStarted {
            return Err(self.reject("load questions"));
        }
        self.load = LoadState::Pending;
        Ok(LoadTicket {
            generation: self.generation,
        })
    }

    /// Apply the response to a question set request.
    ///
    /// On failure the previously stored set (if any) is kept but the session
    /// stays not-ready.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        response: Result<QuestionSet, RequestError>,
    ) -> Applied {
        // Only the first response to complete within a generation is applied.
        if ticket.generation != self.generation
            || self.phase != Phase::NotStarted
            || self.load != LoadState::Pending
        {
            debug!(
                ticket = ticket.generation.value(),
                current = self.generation.value(),
                "discarding stale question set response"
            );
            return Applied::Stale;
        }

        match response {
            Ok(questions) => {
                debug!(count = questions.len(), "question set loaded");
                self.questions = Some(questions);
                self.load = LoadState::Ready;
            }
            Err(e) => {
                warn!("failed to load questions: {e}");
                self.load = LoadState::Failed;
            }
        }
        Applied::Current
    }

    // -----------------------------------------------------------------------
    // Quiz transitions
    // -----------------------------------------------------------------------

    /// Begin the quiz at question 0 with an empty tally.
    pub fn start(&mut self) -> Result<&Question, QuizError> {
        if self.phase != Phase::NotStarted {
            return Err(self.reject("start"));
        }
        if self.load != LoadState::Ready {
            return Err(QuizError::NotReady);
        }
        let Some(questions) = &self.questions else {
            return Err(QuizError::NotReady);
        };

        self.cursor = 0;
        self.tally = TraitTally::new();
        self.phase = Phase::AwaitingAnswer(0);
        debug!(total = questions.len(), "quiz started");
        questions.get(0).ok_or(QuizError::NotReady)
    }

    /// Record the answer to the current question and advance.
    pub fn answer(&mut self, choice: Choice) -> Result<Step, QuizError> {
        let Phase::AwaitingAnswer(index) = self.phase else {
            return Err(self.reject("answer"));
        };
        let Some(questions) = &self.questions else {
            return Err(self.reject("answer"));
        };
        let Some(question) = questions.get(index) else {
            return Err(self.reject("answer"));
        };
        let total = questions.len();

        self.tally.increment(question.option(choice).trait_symbol);
        self.cursor = index + 1;

        if self.cursor < total {
            self.phase = Phase::AwaitingAnswer(self.cursor);
            Ok(Step::Next(self.cursor))
        } else {
            debug!(tally = ?self.tally, "all questions answered");
            self.phase = Phase::ComputingResult;
            Ok(Step::Finished(ResultTicket {
                generation: self.generation,
                tally: self.tally,
            }))
        }
    }

    /// Apply the response to a result request.
    ///
    /// The tally is left as it was whether or not the request succeeded.
    pub fn complete_result(
        &mut self,
        ticket: ResultTicket,
        response: Result<PersonalityResult, RequestError>,
    ) -> Applied {
        if ticket.generation != self.generation || self.phase != Phase::ComputingResult {
            debug!(
                ticket = ticket.generation.value(),
                current = self.generation.value(),
                "discarding stale result response"
            );
            return Applied::Stale;
        }

        self.phase = match response {
            Ok(result) => Phase::ShowingResult(result),
            Err(e) => {
                warn!("failed to compute result: {e}");
                Phase::ResultFailed
            }
        };
        Applied::Current
    }

    /// Return to the start screen and request a new question set.
    ///
    /// Not available while questions are being answered. Any response still
    /// in flight from the previous generation will be discarded.
    pub fn restart(&mut self) -> Result<LoadTicket, QuizError> {
        if matches!(self.phase, Phase::AwaitingAnswer(_)) {
            return Err(self.reject("restart"));
        }
        self.generation = self.generation.next();
        self.phase = Phase::NotStarted;
        self.cursor = 0;
        self.tally = TraitTally::new();
        self.load = LoadState::Idle;
        debug!(generation = self.generation.value(), "session restarted");
        self.begin_load()
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn load_state(&self) -> LoadState {
        self.load
    }

    /// Whether `start` is currently available.
    pub fn is_ready(&self) -> bool {
        self.phase == Phase::NotStarted && self.load == LoadState::Ready
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn tally(&self) -> &TraitTally {
        &self.tally
    }

    pub fn questions(&self) -> Option<&QuestionSet> {
        self.questions.as_ref()
    }

    /// Number of questions in the loaded set, or 0 if none is loaded.
    pub fn total_questions(&self) -> usize {
        self.questions.as_ref().map_or(0, QuestionSet::len)
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::AwaitingAnswer(index) => self.questions.as_ref()?.get(index),
            _ => None,
        }
    }

    /// Answered share of the question set, as a whole percentage.
    pub fn progress_percent(&self) -> u32 {
        let total = self.total_questions();
        if total == 0 {
            return 0;
        }
        (self.cursor * 100 / total) as u32
    }

    fn reject(&self, operation: &'static str) -> QuizError {
        QuizError::InvalidTransition {
            operation,
            phase: self.phase.label(),
        }
    }
}
