//! Domain entities: core data structures

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Anything that can be stored in an [`OrderedEntryStore`](crate::domain::OrderedEntryStore).
///
/// The key is the only part of an entry the store ever looks at. Returning
/// `None` marks the entry as unorderable and makes insertion fail.
pub trait Keyed {
    fn key(&self) -> Option<&str>;
}

impl Keyed for String {
    fn key(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl Keyed for &str {
    fn key(&self) -> Option<&str> {
        Some(self)
    }
}

/// One of the four answer slots of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Choice {
    A,
    B,
    C,
    D,
}

impl Choice {
    pub const ALL: [Choice; 4] = [Choice::A, Choice::B, Choice::C, Choice::D];
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Choice::A => "A",
            Choice::B => "B",
            Choice::C => "C",
            Choice::D => "D",
        };
        write!(f, "{}", letter)
    }
}

/// Error parsing a choice letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceParseError {
    pub input: String,
}

impl fmt::Display for ChoiceParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a choice (expected A, B, C or D): {:?}", self.input)
    }
}

impl std::error::Error for ChoiceParseError {}

impl FromStr for Choice {
    type Err = ChoiceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Choice::A),
            "B" => Ok(Choice::B),
            "C" => Ok(Choice::C),
            "D" => Ok(Choice::D),
            _ => Err(ChoiceParseError {
                input: s.to_string(),
            }),
        }
    }
}

/// A trivia question: album title plus four candidate artists.
///
/// The question text doubles as the ordering key. It is optional so that a
/// feed record without one can still be read and then rejected by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub question: Option<String>,
    /// Media reference, e.g. a cover image path
    #[serde(default)]
    pub img: Option<String>,
    pub a: String,
    pub b: String,
    pub c: String,
    pub d: String,
    pub answer: Choice,
}

impl Question {
    pub fn text(&self) -> &str {
        self.question.as_deref().unwrap_or_default()
    }

    pub fn choice_text(&self, choice: Choice) -> &str {
        match choice {
            Choice::A => &self.a,
            Choice::B => &self.b,
            Choice::C => &self.c,
            Choice::D => &self.d,
        }
    }

    /// All choices in display order.
    pub fn choices(&self) -> impl Iterator<Item = (Choice, &str)> {
        Choice::ALL.into_iter().map(move |c| (c, self.choice_text(c)))
    }

    pub fn is_correct(&self, choice: Choice) -> bool {
        self.answer == choice
    }
}

impl Keyed for Question {
    fn key(&self) -> Option<&str> {
        self.question.as_deref()
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}
