//! Question feed: the batch of records the store is built from.
//!
//! A feed is a TOML document with one `[[questions]]` table per record:
//!
//! ```toml
//! [[questions]]
//! question = "Illmatic (1994)"
//! img = "img/IllmaticNas.jpeg"
//! a = "Biggie"
//! b = "Jay Z"
//! c = "Drake"
//! d = "Nas"
//! answer = "D"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{OrderedEntryStore, Question};

const BUILTIN_FEED: &str = include_str!("../../resources/albums.toml");

/// Origin reported for errors in the embedded feed.
pub const BUILTIN_FEED_ORIGIN: &str = "<builtin>";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuestionFeed {
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Parse feed content; `origin` only labels errors.
pub fn parse_feed(content: &str, origin: &Path) -> ApplicationResult<Vec<Question>> {
    let feed: QuestionFeed = toml::from_str(content).map_err(|e| ApplicationError::Feed {
        path: origin.to_path_buf(),
        message: e.message().to_string(),
    })?;
    debug!(count = feed.questions.len(), "parsed question feed");
    Ok(feed.questions)
}

#[instrument(level = "debug")]
pub fn load_feed(path: &Path) -> ApplicationResult<Vec<Question>> {
    let content = std::fs::read_to_string(path).with_path_context("read question feed", path)?;
    parse_feed(&content, path)
}

/// The album trivia set shipped with the binary.
pub fn builtin_feed() -> ApplicationResult<Vec<Question>> {
    parse_feed(BUILTIN_FEED, Path::new(BUILTIN_FEED_ORIGIN))
}

/// Loads `path` if given, the built-in feed otherwise.
pub fn load_feed_or_builtin(path: Option<&Path>) -> ApplicationResult<Vec<Question>> {
    match path {
        Some(p) => load_feed(p),
        None => builtin_feed(),
    }
}

/// Bulk-load questions into a store, in feed order.
#[instrument(level = "debug", skip(questions), fields(count = questions.len()))]
pub fn build_store(questions: Vec<Question>) -> ApplicationResult<OrderedEntryStore<Question>> {
    let store = OrderedEntryStore::from_entries(questions)?;
    info!(
        questions = store.len(),
        height = store.height(),
        "question store built"
    );
    Ok(store)
}
