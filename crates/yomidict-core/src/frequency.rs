use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;

use crate::error::FrequencyError;
use crate::language::ContentFilter;

/// Token occurrence counts that remember first-insertion order
#[derive(Debug, Default, Clone)]
pub struct OccurrenceCounter {
    counts: IndexMap<String, u64>,
}

impl OccurrenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, token: &str) {
        match self.counts.get_mut(token) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(token.to_string(), 1);
            }
        }
    }

    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
    }

    /// Entries by descending count; equal counts stay in first-seen order
    pub fn most_common(&self) -> Vec<(&str, u64)> {
        let mut ranked: Vec<(&str, u64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Per-token count of documents containing it, optionally scaled to a fraction
#[derive(Debug, Default, Clone)]
pub struct PresenceCounter {
    values: HashMap<String, f64>,
    normalized: bool,
}

impl PresenceCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one document; each distinct token adds 1 regardless of repetitions
    pub fn add_document<'a>(&mut self, tokens: impl IntoIterator<Item = &'a str>) {
        let distinct: HashSet<&str> = tokens.into_iter().collect();
        for token in distinct {
            *self.values.entry(token.to_string()).or_insert(0.0) += 1.0;
        }
    }

    pub fn get(&self, token: &str) -> Option<f64> {
        self.values.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values
            .iter()
            .map(|(token, value)| (token.as_str(), *value))
    }

    /// Divide every entry once; a second call is refused
    pub fn normalize(&mut self, divisor: usize) -> Result<(), FrequencyError> {
        if self.normalized {
            return Err(FrequencyError::AlreadyNormalized);
        }
        self.rescale(divisor)
    }

    /// Divide every entry, whatever has been done before
    pub fn rescale(&mut self, divisor: usize) -> Result<(), FrequencyError> {
        if divisor == 0 {
            return Err(FrequencyError::ZeroDivisor);
        }
        let divisor = divisor as f64;
        for value in self.values.values_mut() {
            *value /= divisor;
        }
        self.normalized = true;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.values.clear();
        self.normalized = false;
    }
}

/// Global occurrence and document-presence tables for one pipeline run
pub struct FrequencyAggregator {
    occurrences: OccurrenceCounter,
    presence: PresenceCounter,
    filter: Box<dyn ContentFilter>,
    documents: usize,
}

impl FrequencyAggregator {
    pub fn new(filter: impl ContentFilter + 'static) -> Self {
        Self {
            occurrences: OccurrenceCounter::new(),
            presence: PresenceCounter::new(),
            filter: Box::new(filter),
            documents: 0,
        }
    }

    /// Count one file's tokens in both tables
    pub fn record_file<S: AsRef<str>>(&mut self, tokens: &[S]) {
        let content = self.record(tokens);
        self.presence.add_document(content);
        self.documents += 1;
    }

    /// Count tokens in the global table only
    pub fn record_occurrences<S: AsRef<str>>(&mut self, tokens: &[S]) {
        self.record(tokens);
    }

    fn record<'a, S: AsRef<str>>(&mut self, tokens: &'a [S]) -> Vec<&'a str> {
        let content: Vec<&str> = tokens
            .iter()
            .map(|token| token.as_ref())
            .filter(|token| self.filter.is_content(token))
            .collect();
        for token in &content {
            self.occurrences.add(token);
        }
        content
    }

    pub fn normalize_presence(&mut self, divisor: usize) -> Result<(), FrequencyError> {
        self.presence.normalize(divisor)?;
        tracing::debug!("Normalized document presence by {}", divisor);
        Ok(())
    }

    pub fn rescale_presence(&mut self, divisor: usize) -> Result<(), FrequencyError> {
        self.presence.rescale(divisor)?;
        tracing::debug!("Rescaled document presence by {}", divisor);
        Ok(())
    }

    pub fn reset_presence(&mut self) {
        self.presence.reset();
        self.documents = 0;
    }

    pub fn occurrences(&self) -> &OccurrenceCounter {
        &self.occurrences
    }

    pub fn presence(&self) -> &PresenceCounter {
        &self.presence
    }

    /// Files recorded since the presence table was last reset
    pub fn documents(&self) -> usize {
        self.documents
    }
}
