//! Full quiz sessions driven through `QuizEngine` with the mock backend.

use std::sync::{Arc, Mutex};

use typequiz_client::MockBackend;
use typequiz_core::engine::{NoopObserver, QuizEngine, ScreenObserver};
use typequiz_core::error::{QuizError, RequestError};
use typequiz_core::model::{
    AnswerOption, Choice, PersonalityResult, Portrait, Question, QuestionSet, TraitSymbol,
};
use typequiz_core::session::Phase;
use typequiz_core::view::{StartNotice, View};

#[derive(Default)]
struct RecordingObserver {
    views: Mutex<Vec<View>>,
}

impl RecordingObserver {
    fn views(&self) -> Vec<View> {
        self.views.lock().unwrap().clone()
    }
}

impl ScreenObserver for RecordingObserver {
    fn on_view(&self, view: &View) {
        self.views.lock().unwrap().push(view.clone());
    }
}

fn question(a: TraitSymbol, b: TraitSymbol) -> Question {
    Question {
        prompt: format!("{a} or {b}?"),
        answers: [
            AnswerOption {
                text: format!("A: {a}"),
                trait_symbol: a,
            },
            AnswerOption {
                text: format!("B: {b}"),
                trait_symbol: b,
            },
        ],
    }
}

fn twenty_questions() -> QuestionSet {
    let dims = [
        (TraitSymbol::E, TraitSymbol::I),
        (TraitSymbol::S, TraitSymbol::N),
        (TraitSymbol::T, TraitSymbol::F),
        (TraitSymbol::J, TraitSymbol::P),
    ];
    QuestionSet::new(
        (0..20)
            .map(|i| question(dims[i % 4].0, dims[i % 4].1))
            .collect(),
    )
    .unwrap()
}

fn athena() -> PersonalityResult {
    PersonalityResult {
        mbti_type: "INTJ".into(),
        character_name: "Athena".into(),
        description: "Strategic and insightful.".into(),
        traits: vec!["Strategic planner".into(), "Independent".into()],
        emoji: "🦉".into(),
        image_url: None,
    }
}

#[tokio::test]
async fn complete_session_sends_full_tally() {
    let backend = Arc::new(MockBackend::new(twenty_questions(), athena()));
    let mut engine = QuizEngine::new(backend.clone());
    let observer = RecordingObserver::default();

    assert!(engine.load(&observer).await.unwrap());
    engine.start(&observer).unwrap();
    for i in 0..20 {
        let choice = if i % 2 == 0 {
            Choice::Second
        } else {
            Choice::First
        };
        engine.answer(choice, &observer).await.unwrap();
    }

    let tally = backend.last_tally().unwrap();
    assert_eq!(tally.total(), 20);
    // Even indices hit E/I and T/F, odd ones S/N and J/P.
    assert_eq!(tally.get(TraitSymbol::I), 5);
    assert_eq!(tally.get(TraitSymbol::F), 5);
    assert_eq!(tally.get(TraitSymbol::S), 5);
    assert_eq!(tally.get(TraitSymbol::J), 5);
    assert_eq!(backend.result_calls(), 1);

    let View::Result(result) = engine.view() else {
        panic!("expected the result screen, got {:?}", engine.view());
    };
    assert_eq!(result.type_label, "INTJ");
    assert_eq!(result.portrait, Portrait::Emoji("🦉".into()));
    assert_eq!(result.traits.len(), 2);

    let views = observer.views();
    assert!(matches!(
        views.first(),
        Some(View::Start {
            notice: Some(StartNotice::Loading),
            ..
        })
    ));
    assert!(views.contains(&View::Computing));
    let first_question = views
        .iter()
        .find(|v| matches!(v, View::Question { .. }))
        .unwrap();
    assert!(matches!(
        first_question,
        View::Question {
            number: 1,
            total: 20,
            progress_percent: 0,
            ..
        }
    ));
}

#[tokio::test]
async fn two_question_scenario_payload() {
    let set = QuestionSet::new(vec![
        question(TraitSymbol::E, TraitSymbol::I),
        question(TraitSymbol::T, TraitSymbol::F),
    ])
    .unwrap();
    let backend = Arc::new(MockBackend::new(set, athena()));
    let mut engine = QuizEngine::new(backend.clone());

    engine.load(&NoopObserver).await.unwrap();
    engine.start(&NoopObserver).unwrap();
    engine.answer(Choice::First, &NoopObserver).await.unwrap();
    engine.answer(Choice::Second, &NoopObserver).await.unwrap();

    let sent = serde_json::to_value(backend.last_tally().unwrap()).unwrap();
    assert_eq!(
        sent,
        serde_json::json!({"E": 1, "I": 0, "S": 0, "N": 0, "T": 0, "F": 1, "J": 0, "P": 0})
    );
}

#[tokio::test]
async fn load_failure_blocks_start() {
    let backend = Arc::new(
        MockBackend::new(twenty_questions(), athena())
            .failing_questions(RequestError::Status { status: 500 }),
    );
    let mut engine = QuizEngine::new(backend.clone());

    assert!(!engine.load(&NoopObserver).await.unwrap());
    assert!(engine.controller().questions().is_none());
    assert_eq!(engine.start(&NoopObserver).unwrap_err(), QuizError::NotReady);
    assert_eq!(
        engine.view(),
        View::Start {
            ready: false,
            notice: Some(StartNotice::LoadFailed),
        }
    );
}

#[tokio::test]
async fn result_failure_shows_error_and_keeps_tally() {
    let backend = Arc::new(
        MockBackend::new(twenty_questions(), athena())
            .failing_result(RequestError::Network("connection reset".into())),
    );
    let mut engine = QuizEngine::new(backend.clone());

    engine.load(&NoopObserver).await.unwrap();
    engine.start(&NoopObserver).unwrap();
    for _ in 0..20 {
        engine.answer(Choice::First, &NoopObserver).await.unwrap();
    }

    assert_eq!(engine.controller().phase(), &Phase::ResultFailed);
    assert_eq!(engine.controller().tally().total(), 20);
    let View::Error { label, .. } = engine.view() else {
        panic!("expected the error screen");
    };
    assert_eq!(label, "ERROR");
    assert_eq!(backend.result_calls(), 1);
}

#[tokio::test]
async fn restart_fetches_fresh_questions() {
    let backend = Arc::new(MockBackend::new(twenty_questions(), athena()));
    let mut engine = QuizEngine::new(backend.clone());

    engine.load(&NoopObserver).await.unwrap();
    engine.start(&NoopObserver).unwrap();
    for _ in 0..20 {
        engine.answer(Choice::Second, &NoopObserver).await.unwrap();
    }
    assert!(matches!(engine.controller().phase(), Phase::ShowingResult(_)));

    assert!(engine.restart(&NoopObserver).await.unwrap());
    assert_eq!(backend.question_calls(), 2);
    assert_eq!(engine.controller().tally().total(), 0);
    assert_eq!(engine.controller().cursor(), 0);
    assert_eq!(engine.controller().generation().value(), 1);

    engine.start(&NoopObserver).unwrap();
    engine.answer(Choice::First, &NoopObserver).await.unwrap();
    assert_eq!(engine.controller().tally().get(TraitSymbol::E), 1);
}

#[tokio::test]
async fn answering_before_start_is_rejected() {
    let backend = Arc::new(MockBackend::new(twenty_questions(), athena()));
    let mut engine = QuizEngine::new(backend.clone());
    engine.load(&NoopObserver).await.unwrap();

    let err = engine.answer(Choice::First, &NoopObserver).await.unwrap_err();
    assert!(matches!(err, QuizError::InvalidTransition { .. }));
    assert_eq!(backend.result_calls(), 0);
}
