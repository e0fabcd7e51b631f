//! Domain layer: entities and the ordered store
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod store;

pub use entities::{Choice, ChoiceParseError, Keyed, Question};
pub use error::{DomainError, DomainResult};
pub use store::{Entries, InOrderIterator, OrderedEntryStore, StoreNode, StoreState};
