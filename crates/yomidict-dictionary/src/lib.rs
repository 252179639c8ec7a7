pub mod archive;
pub mod format;
pub mod types;

pub use archive::{ArchiveError, output_path, render, save, term_entries};
pub use format::{abbreviate, annotation};
pub use types::{DictIndex, TermMeta};
