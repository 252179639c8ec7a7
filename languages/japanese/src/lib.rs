pub mod analyzer;
pub mod charclass;
pub mod extract;
pub mod maker;

#[cfg(test)]
mod testing;

pub use analyzer::VibratoAnalyzer;
pub use charclass::{clean_text, is_content};
pub use extract::{ExtractError, SourceFormat, extract_file};
pub use maker::{BatchError, BatchReport, DictMaker, IngestError, SkippedFile};
