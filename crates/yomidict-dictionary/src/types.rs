use serde::{Deserialize, Serialize};

/// Archive entry holding the dictionary metadata
pub const INDEX_ENTRY: &str = "index.json";
/// Archive entry holding the ranked term list
pub const TERM_META_ENTRY: &str = "term_meta_bank_1.json";

pub const FORMAT_VERSION: u32 = 3;
pub const REVISION: &str = "frequency1";
/// Category label shared by every term entry
pub const FREQUENCY_CATEGORY: &str = "freq";

/// Dictionary metadata record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictIndex {
    pub title: String,
    pub format: u32,
    pub revision: String,
}

impl DictIndex {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            format: FORMAT_VERSION,
            revision: REVISION.to_string(),
        }
    }
}

/// One ranked term, serialized as `[term, category, annotation]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermMeta(pub String, pub String, pub String);

impl TermMeta {
    pub fn frequency(term: &str, annotation: String) -> Self {
        Self(term.to_string(), FREQUENCY_CATEGORY.to_string(), annotation)
    }

    pub fn term(&self) -> &str {
        &self.0
    }

    pub fn annotation(&self) -> &str {
        &self.2
    }
}
