use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ExtractConfig {
    /// Apply NFKC before character filtering (half-width kana, compatibility ideographs)
    pub fold_width: bool,
}
