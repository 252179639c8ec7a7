pub mod error;
pub mod frequency;
pub mod language;

pub use error::{FrequencyError, SetupError};
pub use frequency::{FrequencyAggregator, OccurrenceCounter, PresenceCounter};
pub use language::{Analyzer, ContentFilter, Token};
