use std::io::{Read, Seek};
use std::sync::LazyLock;

use regex::Regex;
use zip::ZipArchive;

use super::{ExtractError, SourceFormat, decode_utf8, html};

const CONTAINER_PATH: &str = "META-INF/container.xml";
const DOCUMENT_MEDIA_TYPE: &str = "application/xhtml+xml";
/// Largest entry read from a book; the declared size comes from the archive itself
const MAX_ENTRY_BYTES: u64 = 256 * 1024 * 1024;

static ROOTFILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(?:\w+:)?rootfile\b[^>]*>").expect("rootfile pattern"));

static MANIFEST_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(?:\w+:)?item\b[^>]*>").expect("item pattern"));

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([\w:-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("attribute pattern")
});

fn attribute<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    ATTRIBUTE
        .captures_iter(tag)
        .find(|caps| &caps[1] == name)
        .and_then(|caps| caps.get(2).or_else(|| caps.get(3)))
        .map(|value| value.as_str())
}

fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<String, ExtractError> {
    let entry = archive.by_name(name)?;
    if entry.size() > MAX_ENTRY_BYTES {
        return Err(ExtractError::malformed(
            SourceFormat::Epub,
            format!("{} declares {} bytes", name, entry.size()),
        ));
    }

    let mut bytes = Vec::new();
    entry.take(MAX_ENTRY_BYTES).read_to_end(&mut bytes)?;
    decode_utf8(bytes)
}

/// Join an href onto the package directory, resolving `.` and `..`
fn resolve(base: &str, href: &str) -> String {
    let href = href.split('#').next().unwrap_or(href);
    let mut parts: Vec<&str> = base.split('/').filter(|part| !part.is_empty()).collect();
    for part in href.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            _ => parts.push(part),
        }
    }
    parts.join("/")
}

/// Archive paths of the package's XHTML documents, in manifest order
pub fn document_paths<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Vec<String>, ExtractError> {
    let container = read_entry(archive, CONTAINER_PATH)?;
    let package_path = ROOTFILE
        .find_iter(&container)
        .find_map(|tag| attribute(tag.as_str(), "full-path"))
        .ok_or_else(|| ExtractError::malformed(SourceFormat::Epub, "container has no rootfile"))?
        .to_string();

    let package = read_entry(archive, &package_path)?;
    let base = package_path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("");

    Ok(MANIFEST_ITEM
        .find_iter(&package)
        .map(|tag| tag.as_str())
        .filter(|tag| attribute(tag, "media-type") == Some(DOCUMENT_MEDIA_TYPE))
        .filter_map(|tag| attribute(tag, "href"))
        .map(|href| resolve(base, href))
        .collect())
}

/// Concatenate every XHTML document and clean the result as HTML
pub fn extract<R: Read + Seek>(reader: R, fold_width: bool) -> Result<String, ExtractError> {
    let mut archive = ZipArchive::new(reader)?;
    let paths = document_paths(&mut archive)?;
    tracing::debug!("EPUB has {} documents", paths.len());

    let mut text = String::new();
    for path in &paths {
        text.push_str(&read_entry(&mut archive, path)?);
        text.push('\n');
    }
    Ok(html::clean(&text, fold_width))
}
