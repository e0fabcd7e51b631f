//! Linear quiz over the store's ordered sequence.

use std::fmt;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{Choice, OrderedEntryStore, Question};

/// Points awarded per correct answer unless configured otherwise.
pub const DEFAULT_POINTS_PER_CORRECT: u32 = 10;

/// Position of the current question, one-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub number: usize,
    pub total: usize,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Question {} of {}", self.number, self.total)
    }
}

/// Result of grading one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub expected: Choice,
}

/// Final tally once every question has been answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub score: u32,
    pub max_score: u32,
    pub correct: usize,
    pub total: usize,
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "You got a score of {}/{}", self.score, self.max_score)
    }
}

/// Cursor and score over an ordered question sequence.
#[derive(Debug, Clone)]
pub struct QuizSession<'a> {
    questions: Vec<&'a Question>,
    cursor: usize,
    score: u32,
    correct: usize,
    points_per_correct: u32,
}

impl<'a> QuizSession<'a> {
    pub fn new(questions: Vec<&'a Question>, points_per_correct: u32) -> Self {
        Self {
            questions,
            cursor: 0,
            score: 0,
            correct: 0,
            points_per_correct,
        }
    }

    /// Session over the store's in-order traversal.
    pub fn from_store(store: &'a OrderedEntryStore<Question>, points_per_correct: u32) -> Self {
        Self::new(store.produce_ordered(), points_per_correct)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn correct_count(&self) -> usize {
        self.correct
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.questions.len()
    }

    pub fn current(&self) -> Option<&'a Question> {
        self.questions.get(self.cursor).copied()
    }

    pub fn progress(&self) -> Option<Progress> {
        (!self.is_complete()).then(|| Progress {
            number: self.cursor + 1,
            total: self.questions.len(),
        })
    }

    /// Grades `choice` against the current question and moves on.
    #[instrument(level = "debug", skip(self), fields(cursor = self.cursor))]
    pub fn answer(&mut self, choice: Choice) -> ApplicationResult<AnswerOutcome> {
        let question = self.current().ok_or(ApplicationError::SessionComplete)?;
        let correct = question.is_correct(choice);
        if correct {
            self.score = self.score.saturating_add(self.points_per_correct);
            self.correct += 1;
        }
        self.cursor += 1;
        debug!(correct, score = self.score, "answer graded");

        if self.is_complete() {
            info!(score = self.score, correct = self.correct, "quiz completed");
        }
        Ok(AnswerOutcome {
            correct,
            expected: question.answer,
        })
    }

    pub fn summary(&self) -> Option<Completion> {
        self.is_complete().then(|| Completion {
            score: self.score,
            max_score: self.max_score(),
            correct: self.correct,
            total: self.questions.len(),
        })
    }

    pub fn max_score(&self) -> u32 {
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        total.saturating_mul(self.points_per_correct)
    }

    pub fn restart(&mut self) {
        debug!("restarting quiz");
        self.cursor = 0;
        self.score = 0;
        self.correct = 0;
    }
}
