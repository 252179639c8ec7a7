use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use yomidict_config::SaveConfig;
use yomidict_core::FrequencyAggregator;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::format::annotation;
use crate::types::{DictIndex, INDEX_ENTRY, TERM_META_ENTRY, TermMeta};

const ARCHIVE_EXTENSION: &str = "zip";

#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Zip error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to move archive into place: {0}")]
    PersistError(#[from] tempfile::PersistError),
}

/// Ranked term entries, most frequent first
pub fn term_entries(aggregator: &FrequencyAggregator, options: &SaveConfig) -> Vec<TermMeta> {
    let presence = aggregator.presence();
    aggregator
        .occurrences()
        .most_common()
        .into_iter()
        .enumerate()
        .map(|(i, (term, frequency))| {
            TermMeta::frequency(term, annotation(i + 1, frequency, presence.get(term), options))
        })
        .collect()
}

fn entry_options() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// Build the complete archive in memory
pub fn render(
    aggregator: &FrequencyAggregator,
    options: &SaveConfig,
) -> Result<Vec<u8>, ArchiveError> {
    let index = serde_json::to_vec(&DictIndex::new(&options.name))?;
    let terms = serde_json::to_vec(&term_entries(aggregator, options))?;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    writer.start_file(INDEX_ENTRY, entry_options())?;
    writer.write_all(&index)?;
    writer.start_file(TERM_META_ENTRY, entry_options())?;
    writer.write_all(&terms)?;

    Ok(writer.finish()?.into_inner())
}

/// Append `.zip` when the requested path lacks it
pub fn output_path(path: &Path) -> PathBuf {
    if path.extension().is_some_and(|ext| ext == ARCHIVE_EXTENSION) {
        return path.to_path_buf();
    }
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(ARCHIVE_EXTENSION);
    PathBuf::from(name)
}

/// Write the archive; the target path only ever holds a complete archive
pub fn save(
    aggregator: &FrequencyAggregator,
    path: &Path,
    options: &SaveConfig,
) -> Result<PathBuf, ArchiveError> {
    let bytes = render(aggregator, options)?;
    let target = output_path(path);
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(&bytes)?;
    file.flush()?;
    file.persist(&target)?;

    tracing::info!(
        "Saved {} terms to {}",
        aggregator.occurrences().len(),
        target.display()
    );
    Ok(target)
}
