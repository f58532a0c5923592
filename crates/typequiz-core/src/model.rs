//! Core data model types for typequiz.
//!
//! These mirror the JSON shapes exchanged with the quiz backend: questions
//! with two trait-tagged answers, the tally of chosen traits, and the
//! personality result computed from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::RequestError;

/// One of the eight poles of the four personality dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitSymbol {
    E,
    I,
    S,
    N,
    T,
    F,
    J,
    P,
}

impl TraitSymbol {
    /// All symbols in canonical order.
    pub const ALL: [TraitSymbol; 8] = [
        TraitSymbol::E,
        TraitSymbol::I,
        TraitSymbol::S,
        TraitSymbol::N,
        TraitSymbol::T,
        TraitSymbol::F,
        TraitSymbol::J,
        TraitSymbol::P,
    ];

    /// The opposite pole on the same dimension.
    pub fn opposite(self) -> TraitSymbol {
        match self {
            TraitSymbol::E => TraitSymbol::I,
            TraitSymbol::I => TraitSymbol::E,
            TraitSymbol::S => TraitSymbol::N,
            TraitSymbol::N => TraitSymbol::S,
            TraitSymbol::T => TraitSymbol::F,
            TraitSymbol::F => TraitSymbol::T,
            TraitSymbol::J => TraitSymbol::P,
            TraitSymbol::P => TraitSymbol::J,
        }
    }

    /// Two-letter name of the dimension this symbol belongs to (e.g. "EI").
    pub fn dimension(self) -> &'static str {
        match self {
            TraitSymbol::E | TraitSymbol::I => "EI",
            TraitSymbol::S | TraitSymbol::N => "SN",
            TraitSymbol::T | TraitSymbol::F => "TF",
            TraitSymbol::J | TraitSymbol::P => "JP",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TraitSymbol::E => "E",
            TraitSymbol::I => "I",
            TraitSymbol::S => "S",
            TraitSymbol::N => "N",
            TraitSymbol::T => "T",
            TraitSymbol::F => "F",
            TraitSymbol::J => "J",
            TraitSymbol::P => "P",
        }
    }
}

impl fmt::Display for TraitSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TraitSymbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TraitSymbol::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown trait symbol: {s}"))
    }
}

/// Running count of chosen trait symbols.
///
/// Serializes as an object with all eight keys present, which is the exact
/// payload the result endpoint expects under `answers`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitTally {
    #[serde(rename = "E", default)]
    e: u32,
    #[serde(rename = "I", default)]
    i: u32,
    #[serde(rename = "S", default)]
    s: u32,
    #[serde(rename = "N", default)]
    n: u32,
    #[serde(rename = "T", default)]
    t: u32,
    #[serde(rename = "F", default)]
    f: u32,
    #[serde(rename = "J", default)]
    j: u32,
    #[serde(rename = "P", default)]
    p: u32,
}

impl TraitTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, symbol: TraitSymbol) -> u32 {
        self.counts()[symbol.index()]
    }

    /// Record one answer for `symbol`.
    pub fn increment(&mut self, symbol: TraitSymbol) {
        let slot = match symbol {
            TraitSymbol::E => &mut self.e,
            TraitSymbol::I => &mut self.i,
            TraitSymbol::S => &mut self.s,
            TraitSymbol::N => &mut self.n,
            TraitSymbol::T => &mut self.t,
            TraitSymbol::F => &mut self.f,
            TraitSymbol::J => &mut self.j,
            TraitSymbol::P => &mut self.p,
        };
        *slot += 1;
    }

    /// Sum over all symbols; equals the number of answered questions.
    pub fn total(&self) -> u32 {
        self.counts().iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TraitSymbol, u32)> + '_ {
        TraitSymbol::ALL.into_iter().map(move |t| (t, self.get(t)))
    }

    fn counts(&self) -> [u32; 8] {
        [
            self.e, self.i, self.s, self.n, self.t, self.f, self.j, self.p,
        ]
    }
}

/// One of the two options offered for a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    /// Text shown to the user.
    pub text: String,
    /// Trait credited when this option is chosen.
    #[serde(rename = "type")]
    pub trait_symbol: TraitSymbol,
}

/// A generated question with exactly two answer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt text.
    #[serde(rename = "question")]
    pub prompt: String,
    pub answers: [AnswerOption; 2],
}

impl Question {
    pub fn option(&self, choice: Choice) -> &AnswerOption {
        match choice {
            Choice::First => &self.answers[0],
            Choice::Second => &self.answers[1],
        }
    }

    /// Whether either option credits `symbol`.
    pub fn offers(&self, symbol: TraitSymbol) -> bool {
        self.answers.iter().any(|a| a.trait_symbol == symbol)
    }
}

/// Which of the two options the user picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    First,
    Second,
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "a" | "1" => Ok(Choice::First),
            "b" | "2" => Ok(Choice::Second),
            other => Err(format!("unknown choice: '{other}' (expected a or b)")),
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::First => write!(f, "A"),
            Choice::Second => write!(f, "B"),
        }
    }
}

/// The ordered batch of questions for one session. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Result<Self, RequestError> {
        if questions.is_empty() {
            return Err(RequestError::EmptyQuestionSet);
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    /// How many questions offer `symbol` as one of their options.
    pub fn offering(&self, symbol: TraitSymbol) -> usize {
        self.questions.iter().filter(|q| q.offers(symbol)).count()
    }
}

/// The computed personality type returned by the result endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalityResult {
    /// Four-letter type label (e.g. "INTJ").
    pub mbti_type: String,
    pub character_name: String,
    pub description: String,
    #[serde(default)]
    pub traits: Vec<String>,
    #[serde(default)]
    pub emoji: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl PersonalityResult {
    pub fn portrait(&self) -> Portrait {
        match self.image_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() => Portrait::Image {
                url: url.to_string(),
                fallback_emoji: self.emoji.clone(),
            },
            _ => Portrait::Emoji(self.emoji.clone()),
        }
    }
}

/// How the result character should be pictured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Portrait {
    /// An image, with the emoji to show if it cannot be displayed.
    Image { url: String, fallback_emoji: String },
    Emoji(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(a: TraitSymbol, b: TraitSymbol) -> Question {
        Question {
            prompt: "How do you recharge?".into(),
            answers: [
                AnswerOption {
                    text: "Friends".into(),
                    trait_symbol: a,
                },
                AnswerOption {
                    text: "Alone".into(),
                    trait_symbol: b,
                },
            ],
        }
    }

    #[test]
    fn tally_serializes_all_keys() {
        let mut tally = TraitTally::new();
        tally.increment(TraitSymbol::E);
        tally.increment(TraitSymbol::F);
        let json = serde_json::to_value(tally).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"E": 1, "I": 0, "S": 0, "N": 0, "T": 0, "F": 1, "J": 0, "P": 0})
        );
    }

    #[test]
    fn tally_counts_and_total() {
        let mut tally = TraitTally::new();
        tally.increment(TraitSymbol::J);
        tally.increment(TraitSymbol::J);
        tally.increment(TraitSymbol::N);
        assert_eq!(tally.get(TraitSymbol::J), 2);
        assert_eq!(tally.get(TraitSymbol::P), 0);
        assert_eq!(tally.total(), 3);
        assert_eq!(tally.iter().count(), 8);
    }

    #[test]
    fn question_decodes_wire_shape() {
        let json = r#"{
            "question": "Weekend plans?",
            "answers": [
                {"text": "Party", "type": "E"},
                {"text": "Book", "type": "I"}
            ]
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.prompt, "Weekend plans?");
        assert_eq!(q.option(Choice::Second).trait_symbol, TraitSymbol::I);
    }

    #[test]
    fn question_rejects_unknown_symbol() {
        let json = r#"{"question": "?", "answers": [{"text": "a", "type": "X"}, {"text": "b", "type": "I"}]}"#;
        assert!(serde_json::from_str::<Question>(json).is_err());
    }

    #[test]
    fn question_set_must_not_be_empty() {
        assert_eq!(
            QuestionSet::new(vec![]).unwrap_err(),
            RequestError::EmptyQuestionSet
        );
        let set = QuestionSet::new(vec![
            question(TraitSymbol::E, TraitSymbol::I),
            question(TraitSymbol::T, TraitSymbol::F),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.offering(TraitSymbol::E), 1);
        assert_eq!(set.offering(TraitSymbol::S), 0);
    }

    #[test]
    fn choice_parsing() {
        assert_eq!("a".parse::<Choice>().unwrap(), Choice::First);
        assert_eq!(" B ".parse::<Choice>().unwrap(), Choice::Second);
        assert_eq!("2".parse::<Choice>().unwrap(), Choice::Second);
        assert!("c".parse::<Choice>().is_err());
    }

    #[test]
    fn trait_symbol_pairs() {
        for symbol in TraitSymbol::ALL {
            assert_eq!(symbol.opposite().opposite(), symbol);
            assert_eq!(symbol.dimension(), symbol.opposite().dimension());
        }
        assert_eq!("n".parse::<TraitSymbol>().unwrap(), TraitSymbol::N);
    }

    #[test]
    fn portrait_falls_back_to_emoji() {
        let json = r#"{
            "mbtiType": "INTJ",
            "characterName": "Athena",
            "emoji": "🦉",
            "imageUrl": null,
            "description": "Strategic.",
            "traits": ["Planner"]
        }"#;
        let result: PersonalityResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.portrait(), Portrait::Emoji("🦉".into()));

        let with_image = PersonalityResult {
            image_url: Some("https://img.example/zeus.png".into()),
            ..result
        };
        assert_eq!(
            with_image.portrait(),
            Portrait::Image {
                url: "https://img.example/zeus.png".into(),
                fallback_emoji: "🦉".into(),
            }
        );
    }
}
