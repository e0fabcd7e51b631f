//! Application layer: question feed and quiz session
//!
//! This layer feeds the domain store and consumes its ordered output.

pub mod error;
pub mod error_ext;
pub mod feed;
pub mod session;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use feed::{build_store, builtin_feed, load_feed, load_feed_or_builtin, QuestionFeed};
pub use session::{AnswerOutcome, Completion, Progress, QuizSession, DEFAULT_POINTS_PER_CORRECT};
