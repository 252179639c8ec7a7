//! Per-format text extraction. Every extractor returns text whose lines are
//! sentence or caption boundaries and whose characters pass
//! [`charclass::is_allowed`](crate::charclass::is_allowed).

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use yomidict_config::ExtractConfig;

use crate::charclass::clean_text_folded;

pub mod ass;
pub mod epub;
pub mod html;
pub mod srt;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Unsupported file format: {0:?}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid UTF-8: {0}")]
    EncodingError(#[from] std::string::FromUtf8Error),

    #[error("Zip error: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Malformed {format} content: {reason}")]
    Malformed { format: &'static str, reason: String },
}

impl ExtractError {
    pub(crate) fn malformed(format: SourceFormat, reason: impl Into<String>) -> Self {
        ExtractError::Malformed {
            format: format.extension(),
            reason: reason.into(),
        }
    }
}

/// Supported corpus formats, keyed by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Text,
    Html,
    Srt,
    Epub,
    Ass,
}

impl SourceFormat {
    pub const ALL: [SourceFormat; 5] = [
        SourceFormat::Text,
        SourceFormat::Html,
        SourceFormat::Srt,
        SourceFormat::Epub,
        SourceFormat::Ass,
    ];

    /// Case-sensitive extension lookup, without the leading dot
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == extension)
    }

    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_extension(&extension).ok_or(ExtractError::UnsupportedFormat(extension))
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SourceFormat::Text => "txt",
            SourceFormat::Html => "html",
            SourceFormat::Srt => "srt",
            SourceFormat::Epub => "epub",
            SourceFormat::Ass => "ass",
        }
    }

    /// Read and clean one file of this format
    pub fn extract(&self, path: &Path, config: &ExtractConfig) -> Result<String, ExtractError> {
        let fold = config.fold_width;
        match self {
            SourceFormat::Text => Ok(clean_text_folded(&read_text(path)?, fold)),
            SourceFormat::Html => Ok(html::clean(&read_text(path)?, fold)),
            SourceFormat::Srt => srt::clean(&read_text(path)?, fold),
            SourceFormat::Ass => ass::clean(&read_text(path)?, fold),
            SourceFormat::Epub => {
                let reader = BufReader::new(File::open(path)?);
                epub::extract(reader, fold)
            }
        }
    }
}

/// Resolve the format from the extension, then extract
pub fn extract_file(path: &Path, config: &ExtractConfig) -> Result<String, ExtractError> {
    SourceFormat::from_path(path)?.extract(path, config)
}

/// UTF-8 decoding that skips a leading byte-order mark
pub fn decode_utf8(bytes: Vec<u8>) -> Result<String, ExtractError> {
    let text = String::from_utf8(bytes)?;
    Ok(match text.strip_prefix(BYTE_ORDER_MARK) {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

fn read_text(path: &Path) -> Result<String, ExtractError> {
    decode_utf8(fs::read(path)?)
}
