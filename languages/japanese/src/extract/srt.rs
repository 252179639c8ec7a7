use std::sync::LazyLock;

use regex::Regex;

use super::{ExtractError, SourceFormat};
use crate::charclass::clean_text_folded;

static TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+:\d{1,2}:\d{1,2}[,.]\d{1,3})\s*-->\s*(\d+:\d{1,2}:\d{1,2}[,.]\d{1,3})")
        .expect("timing pattern")
});

/// Parenthesized speaker names, full-width or ASCII
static SPEAKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"（[^）\n]*）|\([^)\n]*\)").expect("speaker pattern"));

/// One timed caption
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caption {
    pub index: Option<u32>,
    pub start: String,
    pub end: String,
    pub text: String,
}

/// Parse captions in file order
pub fn parse(raw: &str) -> Result<Vec<Caption>, ExtractError> {
    let normalized = raw.replace("\r\n", "\n");
    let mut captions = Vec::new();
    let mut block: Vec<&str> = Vec::new();

    for line in normalized.split('\n').chain(std::iter::once("")) {
        if !line.trim().is_empty() {
            block.push(line);
            continue;
        }
        if !block.is_empty() {
            captions.push(parse_block(&block, captions.len() + 1)?);
            block.clear();
        }
    }

    Ok(captions)
}

fn parse_block(block: &[&str], ordinal: usize) -> Result<Caption, ExtractError> {
    let (index, rest) = match block[0].trim().parse::<u32>() {
        Ok(index) => (Some(index), &block[1..]),
        Err(_) => (None, block),
    };

    let timing = rest.first().and_then(|line| TIMING.captures(line)).ok_or_else(|| {
        ExtractError::malformed(
            SourceFormat::Srt,
            format!("caption {ordinal} has no timing line: {:?}", block[0]),
        )
    })?;

    Ok(Caption {
        index,
        start: timing[1].to_string(),
        end: timing[2].to_string(),
        text: rest[1..].join("\n"),
    })
}

/// Remove `（name）` and `(name)` speaker annotations
pub fn strip_speakers(text: &str) -> String {
    SPEAKER.replace_all(text, "").into_owned()
}

/// One caption per line, speaker names removed, then plain-text cleaning
pub fn clean(raw: &str, fold_width: bool) -> Result<String, ExtractError> {
    let text: String = parse(raw)?
        .iter()
        .map(|caption| format!("{}\n", strip_speakers(&caption.text)))
        .collect();
    Ok(clean_text_folded(&text, fold_width))
}
