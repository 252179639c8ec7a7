use std::path::PathBuf;

/// Analyzer could not be brought up; nothing has been ingested yet
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Analyzer dictionary not found: {}", .0.display())]
    DictionaryMissing(PathBuf),

    #[error(
        "Analyzer dictionary {} is {size} bytes, expected at least {minimum}",
        path.display()
    )]
    DictionaryTooSmall {
        path: PathBuf,
        size: u64,
        minimum: u64,
    },

    #[error("Failed to read analyzer dictionary {}: {reason}", path.display())]
    DictionaryRead { path: PathBuf, reason: String },

    #[error("Incompatible analyzer dictionary: {0}")]
    Incompatible(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrequencyError {
    #[error("Document presence is already normalized; use rescale_presence to divide again")]
    AlreadyNormalized,

    #[error("Cannot normalize document presence by zero")]
    ZeroDivisor,
}
