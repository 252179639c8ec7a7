use std::env;

use serde::{Deserialize, Serialize};

fn default_dictionary_path() -> String {
    "system.dic.zst".to_string()
}

/// UniDic-cwj ships a compressed system dictionary of roughly 40MB; anything
/// far below that is a truncated download or the wrong bundle.
fn default_min_dictionary_bytes() -> u64 {
    10_000_000
}

fn default_lemma_field() -> usize {
    7
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Path to the vibrato system dictionary (`.dic` or zstd-compressed `.dic.zst`)
    #[serde(default = "default_dictionary_path")]
    pub dictionary_path: String,
    /// Smallest dictionary file accepted at setup
    #[serde(default = "default_min_dictionary_bytes")]
    pub min_dictionary_bytes: u64,
    /// Zero-based feature column holding the lemma
    #[serde(default = "default_lemma_field")]
    pub lemma_field: usize,
}

impl AnalyzerConfig {
    pub fn new() -> Self {
        let dictionary_path =
            env::var("YOMIDICT_DICTIONARY").unwrap_or_else(|_| default_dictionary_path());

        let min_dictionary_bytes = env::var("YOMIDICT_MIN_DICTIONARY_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_min_dictionary_bytes);

        let lemma_field = env::var("YOMIDICT_LEMMA_FIELD")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_lemma_field);

        Self {
            dictionary_path,
            min_dictionary_bytes,
            lemma_field,
        }
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            dictionary_path: default_dictionary_path(),
            min_dictionary_bytes: default_min_dictionary_bytes(),
            lemma_field: default_lemma_field(),
        }
    }
}
