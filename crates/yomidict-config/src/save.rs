use std::env;

use serde::{Deserialize, Serialize};

fn default_name() -> String {
    "yomidict".to_string()
}

fn default_include_presence() -> bool {
    true
}

/// Output options for the frequency archive
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SaveConfig {
    /// Dictionary title shown by the lookup tool
    #[serde(default = "default_name")]
    pub name: String,
    /// Append the document coverage percentage to each entry
    #[serde(default = "default_include_presence")]
    pub include_presence: bool,
    #[serde(default)]
    pub abbreviate_rank: bool,
    #[serde(default)]
    pub abbreviate_frequency: bool,
    /// Forces both rank and frequency abbreviation
    #[serde(default)]
    pub abbreviate_all: bool,
}

impl SaveConfig {
    pub fn new() -> Self {
        let name = env::var("YOMIDICT_NAME").unwrap_or_else(|_| default_name());

        Self {
            name,
            ..Self::default()
        }
    }

    pub fn rank_abbreviated(&self) -> bool {
        self.abbreviate_all || self.abbreviate_rank
    }

    pub fn frequency_abbreviated(&self) -> bool {
        self.abbreviate_all || self.abbreviate_frequency
    }
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            include_presence: default_include_presence(),
            abbreviate_rank: false,
            abbreviate_frequency: false,
            abbreviate_all: false,
        }
    }
}
