use super::{ExtractError, SourceFormat};
use crate::charclass::clean_text_folded;

const EVENTS_SECTION: &str = "[events]";
/// Field layout used when the section has no `Format:` line
const DEFAULT_FORMAT: [&str; 10] = [
    "layer", "start", "end", "style", "name", "marginl", "marginr", "marginv", "effect", "text",
];

/// Malformed override syntax inside one dialogue line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TagParseError {
    #[error("unterminated override block at byte {0}")]
    Unterminated(usize),

    #[error("nested override block at byte {0}")]
    Nested(usize),
}

/// One `Dialogue:` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueEvent {
    pub start: String,
    pub end: String,
    pub style: String,
    /// Raw text, override tags included
    pub text: String,
}

/// Parse dialogue events of the `[Events]` section in file order
pub fn parse(raw: &str) -> Result<Vec<DialogueEvent>, ExtractError> {
    let mut in_events = false;
    let mut seen_events = false;
    let mut format: Vec<String> = DEFAULT_FORMAT.iter().map(|f| f.to_string()).collect();
    let mut events = Vec::new();

    for (number, line) in raw.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.starts_with('[') {
            in_events = line.trim().eq_ignore_ascii_case(EVENTS_SECTION);
            seen_events |= in_events;
            continue;
        }
        if !in_events {
            continue;
        }

        if let Some(fields) = line.strip_prefix("Format:") {
            format = fields
                .split(',')
                .map(|field| field.trim().to_ascii_lowercase())
                .collect();
        } else if let Some(fields) = line.strip_prefix("Dialogue:") {
            events.push(parse_dialogue(fields, &format, number + 1)?);
        }
    }

    if !seen_events {
        return Err(ExtractError::malformed(SourceFormat::Ass, "no [Events] section"));
    }
    Ok(events)
}

fn parse_dialogue(
    fields: &str,
    format: &[String],
    line: usize,
) -> Result<DialogueEvent, ExtractError> {
    // Text is the last column and may itself contain commas
    let values: Vec<&str> = fields.splitn(format.len(), ',').collect();
    if values.len() != format.len() {
        return Err(ExtractError::malformed(
            SourceFormat::Ass,
            format!("line {line}: expected {} fields, found {}", format.len(), values.len()),
        ));
    }

    let field = |name: &str| {
        format
            .iter()
            .position(|f| f == name)
            .map(|i| values[i].trim_start().to_string())
            .unwrap_or_default()
    };

    Ok(DialogueEvent {
        start: field("start"),
        end: field("end"),
        style: field("style"),
        text: field("text"),
    })
}

fn drawing_scale(block: &str) -> Option<u32> {
    let mut scale = None;
    let mut rest = block;
    while let Some(at) = rest.find("\\p") {
        rest = &rest[at + 2..];
        let digits: String = rest.chars().take_while(char::is_ascii_digit).collect();
        if !digits.is_empty() {
            scale = digits.parse().ok();
        }
    }
    scale
}

/// Plain text of one event: override blocks removed, drawings skipped,
/// `\N`, `\n` and `\h` turned into spaces
pub fn plain_text(raw: &str) -> Result<String, TagParseError> {
    let mut text = String::with_capacity(raw.len());
    let mut drawing = false;
    let mut chars = raw.char_indices().peekable();

    while let Some((at, c)) = chars.next() {
        match c {
            '{' => {
                let rest = &raw[at + 1..];
                let close = rest.find('}').ok_or(TagParseError::Unterminated(at))?;
                if let Some(nested) = rest[..close].find('{') {
                    return Err(TagParseError::Nested(at + 1 + nested));
                }
                if let Some(scale) = drawing_scale(&rest[..close]) {
                    drawing = scale > 0;
                }
                let end = at + 1 + close;
                while chars.next_if(|&(i, _)| i <= end).is_some() {}
            }
            _ if drawing => {}
            '\\' if matches!(chars.peek(), Some((_, 'N' | 'n' | 'h'))) => {
                chars.next();
                text.push(' ');
            }
            _ => text.push(c),
        }
    }

    Ok(text)
}

/// One event per line, then plain-text cleaning
pub fn clean(raw: &str, fold_width: bool) -> Result<String, ExtractError> {
    let mut text = String::new();
    for event in parse(raw)? {
        match plain_text(&event.text) {
            Ok(plain) => text.push_str(&plain),
            Err(e) => tracing::debug!("Dropping dialogue at {}: {}", event.start, e),
        }
        text.push('\n');
    }
    Ok(clean_text_folded(&text, fold_width))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "\u{FEFF}[Script Info]\r
Title: sample\r
ScriptType: v4.00+\r
\r
[V4+ Styles]\r
Format: Name, Fontname, Fontsize\r
Style: Default,Arial,20\r
\r
[Events]\r
Format: Layer, Start, End, Style, Name, MarginL, MarginR, MarginV, Effect, Text\r
Dialogue: 0,0:00:01.00,0:00:02.00,Default,,0,0,0,,{\\i1}猫が{\\i0}好き\\N可愛い\r
Comment: 0,0:00:02.00,0:00:03.00,Default,,0,0,0,,コメント\r
Dialogue: 0,0:00:03.00,0:00:04.00,Default,,0,0,0,,{\\pos(10,20)壊れた\r
Dialogue: 0,0:00:05.00,0:00:06.00,Default,,0,0,0,,犬、猫\r
";

    #[test]
    fn parses_dialogue_only() {
        let events = parse(SCRIPT).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].start, "0:00:01.00");
        assert_eq!(events[0].style, "Default");
        assert_eq!(events[2].text, "犬、猫");
    }

    #[test]
    fn tags_and_escapes() {
        assert_eq!(plain_text("{\\i1}猫が{\\i0}好き\\N可愛い").unwrap(), "猫が好き 可愛い");
        assert_eq!(plain_text("一\\h二\\n三").unwrap(), "一 二 三");
        assert_eq!(plain_text("{}").unwrap(), "");
    }

    #[test]
    fn drawings_are_skipped() {
        let raw = "前{\\p1}m 0 0 l 100 0 100 100{\\p0}後";
        assert_eq!(plain_text(raw).unwrap(), "前後");
    }

    #[test]
    fn malformed_tags_are_errors() {
        assert_eq!(plain_text("{\\pos(1,2)猫"), Err(TagParseError::Unterminated(0)));
        assert_eq!(plain_text("猫{\\b1{\\i1}}"), Err(TagParseError::Nested(7)));
    }

    #[test]
    fn malformed_event_becomes_empty_line() {
        assert_eq!(clean(SCRIPT, false).unwrap(), "猫が好き可愛い\n犬、猫\n");
    }

    #[test]
    fn missing_events_section_is_malformed() {
        let err = parse("[Script Info]\nTitle: x\n").unwrap_err();
        assert!(matches!(err, ExtractError::Malformed { format: "ass", .. }));
    }

    #[test]
    fn short_dialogue_is_malformed() {
        let err = parse("[Events]\nDialogue: 0,0:00:01.00\n").unwrap_err();
        assert!(matches!(err, ExtractError::Malformed { format: "ass", .. }));
    }
}
