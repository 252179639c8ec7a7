use std::path::{Path, PathBuf};

use yomidict_config::{ExtractConfig, FeedConfig, SaveConfig};
use yomidict_core::{Analyzer, FrequencyAggregator, FrequencyError};
use yomidict_dictionary::ArchiveError;

use crate::charclass::{self, clean_text_folded};
use crate::extract::{ExtractError, SourceFormat};

/// A file that could not be ingested
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Unable to process {}: unsupported format {extension:?}", path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract text from {}: {source}", path.display())]
    Extraction {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },
}

impl IngestError {
    fn new(path: &Path, err: ExtractError) -> Self {
        let path = path.to_path_buf();
        match err {
            ExtractError::UnsupportedFormat(extension) => {
                IngestError::UnsupportedFormat { path, extension }
            }
            ExtractError::IoError(source) => IngestError::Read { path, source },
            source => IngestError::Extraction { path, source },
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            IngestError::UnsupportedFormat { path, .. }
            | IngestError::Read { path, .. }
            | IngestError::Extraction { path, .. } => path,
        }
    }
}

/// A batch that stopped before or during ingestion
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(
        "Document presence is already normalized; reset it before adding another batch"
    )]
    PresenceNormalized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of one `feed_files` call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub skipped: Vec<SkippedFile>,
    /// Divisor applied to document presence, if the batch normalized it
    pub presence_divisor: Option<usize>,
}

impl BatchReport {
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Builds a frequency dictionary from corpus files
pub struct DictMaker {
    analyzer: Box<dyn Analyzer>,
    aggregator: FrequencyAggregator,
    extract: ExtractConfig,
}

impl DictMaker {
    pub fn new(analyzer: impl Analyzer + 'static, extract: ExtractConfig) -> Self {
        Self {
            analyzer: Box::new(analyzer),
            aggregator: FrequencyAggregator::new(charclass::is_content),
            extract,
        }
    }

    /// Feed text that did not come from a file; it is cleaned like plain text
    ///
    /// With `count_presence` the text counts as one document.
    pub fn feed_text(&mut self, text: &str, count_presence: bool) {
        let cleaned = clean_text_folded(text, self.extract.fold_width);
        let tokens = self.analyzer.tokenize_text(&cleaned);
        if count_presence {
            self.aggregator.record_file(&tokens);
        } else {
            self.aggregator.record_occurrences(&tokens);
        }
    }

    /// Extract, tokenize and count one file
    pub fn feed_file(&mut self, path: &Path) -> Result<(), IngestError> {
        let format = SourceFormat::from_path(path).map_err(|e| IngestError::new(path, e))?;
        let text = format
            .extract(path, &self.extract)
            .map_err(|e| IngestError::new(path, e))?;

        let tokens = self.analyzer.tokenize_text(&text);
        tracing::debug!("{}: {} tokens", path.display(), tokens.len());
        self.aggregator.record_file(&tokens);
        Ok(())
    }

    /// Feed a batch of files in order
    ///
    /// In strict mode the first failure is returned and counts from the files
    /// before it stay in place. In lenient mode failures are logged and
    /// skipped, and presence is normalized by the number of files that made it.
    ///
    /// Raw document counts never land on a normalized presence table: without
    /// `reset_presence` such a batch is refused before any file is read.
    pub fn feed_files<P: AsRef<Path>>(
        &mut self,
        paths: &[P],
        options: &FeedConfig,
    ) -> Result<BatchReport, BatchError> {
        if options.reset_presence {
            self.aggregator.reset_presence();
        } else if self.aggregator.presence().is_normalized() {
            return Err(BatchError::PresenceNormalized);
        }

        let total = paths.len();
        let mut report = BatchReport::default();
        for (i, path) in paths.iter().enumerate() {
            let path = path.as_ref();
            tracing::info!("[{}/{}] {}", i + 1, total, path.display());

            match self.feed_file(path) {
                Ok(()) => report.processed += 1,
                Err(e) if options.skip_failed_files => {
                    tracing::warn!("Skipping file: {}", e);
                    report.skipped.push(SkippedFile {
                        path: path.to_path_buf(),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }

        tracing::info!(
            "Batch finished: {} processed, {} skipped",
            report.processed,
            report.skipped_count()
        );

        if options.normalize_presence {
            report.presence_divisor = self.normalize_batch(report.processed);
        }
        Ok(report)
    }

    fn normalize_batch(&mut self, divisor: usize) -> Option<usize> {
        match self.aggregator.normalize_presence(divisor) {
            Ok(()) => Some(divisor),
            Err(e) => {
                tracing::warn!("Document presence left as is: {}", e);
                None
            }
        }
    }

    /// Normalize presence after batches fed without automatic normalization
    pub fn normalize_presence(&mut self, divisor: usize) -> Result<(), FrequencyError> {
        self.aggregator.normalize_presence(divisor)
    }

    /// Divide presence again, even if it was normalized before
    pub fn rescale_presence(&mut self, divisor: usize) -> Result<(), FrequencyError> {
        self.aggregator.rescale_presence(divisor)
    }

    pub fn aggregator(&self) -> &FrequencyAggregator {
        &self.aggregator
    }

    /// Write the frequency archive; returns the path actually written
    pub fn save(&self, path: &Path, options: &SaveConfig) -> Result<PathBuf, ArchiveError> {
        yomidict_dictionary::save(&self.aggregator, path, options)
    }
}
