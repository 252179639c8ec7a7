use std::env;

use serde::{Deserialize, Serialize};

fn default_reset_presence() -> bool {
    true
}

fn default_normalize_presence() -> bool {
    true
}

/// Per-batch ingestion options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct FeedConfig {
    /// Clear the document-presence counter before the batch starts
    #[serde(default = "default_reset_presence")]
    pub reset_presence: bool,
    /// Divide presence by the number of successfully ingested files once the batch ends
    #[serde(default = "default_normalize_presence")]
    pub normalize_presence: bool,
    /// Lenient mode: log and skip files that cannot be processed instead of aborting
    #[serde(default)]
    pub skip_failed_files: bool,
}

impl FeedConfig {
    pub fn new() -> Self {
        let skip_failed_files = env::var("YOMIDICT_SKIP_FAILED")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);

        Self {
            skip_failed_files,
            ..Self::default()
        }
    }

    /// Batch options that keep presence counts running across several calls
    pub fn accumulate() -> Self {
        Self {
            reset_presence: false,
            normalize_presence: false,
            ..Self::default()
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            reset_presence: default_reset_presence(),
            normalize_presence: default_normalize_presence(),
            skip_failed_files: false,
        }
    }
}
