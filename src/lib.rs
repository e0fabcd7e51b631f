//! Album trivia quiz backed by an unbalanced binary search tree.
//!
//! Layers, innermost first:
//! - [`domain`]: [`OrderedEntryStore`], the BST keyed on question text
//! - [`application`]: question feed loading and the [`QuizSession`] that walks
//!   the store's ordered output
//! - [`cli`]: argument parsing and the terminal quiz

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use application::{ApplicationError, ApplicationResult, QuizSession};
pub use domain::{Choice, DomainError, DomainResult, Keyed, OrderedEntryStore, Question};
