use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::analyzer::AnalyzerConfig;
pub use self::extract::ExtractConfig;
pub use self::feed::FeedConfig;
pub use self::save::SaveConfig;

pub mod analyzer;
pub mod extract;
pub mod feed;
pub mod save;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub analyzer: AnalyzerConfig,
    pub extract: ExtractConfig,
    pub feed: FeedConfig,
    pub save: SaveConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        Config {
            analyzer: AnalyzerConfig::new(),
            extract: ExtractConfig::default(),
            feed: FeedConfig::new(),
            save: SaveConfig::new(),
        }
    }

    /// Load a JSON config file; missing sections and fields keep their defaults
    pub fn from_file(path: &Path) -> Result<Self, serde_json::Error> {
        tracing::info!("Loading config from {}", path.display());
        let file = File::open(path).map_err(serde_json::Error::io)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_are_strict_and_normalizing() {
        let config = Config::default();
        assert!(config.feed.reset_presence);
        assert!(config.feed.normalize_presence);
        assert!(!config.feed.skip_failed_files);
        assert!(config.save.include_presence);
        assert_eq!(config.analyzer.lemma_field, 7);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"feed": {{"skip_failed_files": true}}, "save": {{"name": "Anime", "abbreviate_all": true}}}}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert!(config.feed.skip_failed_files);
        assert!(config.feed.normalize_presence);
        assert_eq!(config.save.name, "Anime");
        assert!(config.save.rank_abbreviated());
        assert!(config.save.frequency_abbreviated());
        assert_eq!(config.analyzer.dictionary_path, "system.dic.zst");
    }

    #[test]
    fn abbreviation_switches_are_independent() {
        let save = SaveConfig {
            abbreviate_frequency: true,
            ..SaveConfig::default()
        };
        assert!(!save.rank_abbreviated());
        assert!(save.frequency_abbreviated());
    }

    #[test]
    fn accumulate_keeps_presence_running() {
        let feed = FeedConfig::accumulate();
        assert!(!feed.reset_presence);
        assert!(!feed.normalize_presence);
    }
}
