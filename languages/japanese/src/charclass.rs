//! Character classes used to clean extracted text and to tell vocabulary from
//! particles, punctuation and numerals.

use unicode_normalization::UnicodeNormalization;

/// Punctuation and brackets that delimit sentences, plus the newline itself
pub const SENTENCE_MARKERS: &str = "。、!！？」「』『（）〝〟)(\n";

pub fn is_hiragana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{3096}' | 'ゝ' | 'ゞ')
}

pub fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A1}'..='\u{30FA}' | 'ー' | 'ヽ' | 'ヾ' | '\u{FF66}'..='\u{FF9D}')
}

pub fn is_kana(c: char) -> bool {
    is_hiragana(c) || is_katakana(c)
}

pub fn is_kanji(c: char) -> bool {
    matches!(c, '一'..='龯' | '〆' | '々')
}

pub fn is_digit(c: char) -> bool {
    matches!(c, '0'..='9' | '０'..='９')
}

pub fn is_sentence_marker(c: char) -> bool {
    SENTENCE_MARKERS.contains(c)
}

/// Characters that survive text cleaning
pub fn is_allowed(c: char) -> bool {
    is_kanji(c) || is_kana(c) || is_digit(c) || is_sentence_marker(c)
}

/// Whether a lemma is vocabulary worth counting
pub fn is_content(token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let all = |class: fn(char) -> bool| token.chars().all(class);
    !(all(is_kana) || all(is_sentence_marker) || all(is_digit) || all(char::is_numeric))
}

/// Drop every character outside the allowed classes and collapse newline runs
pub fn clean_text(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for c in text.chars().filter(|&c| is_allowed(c)) {
        if c == '\n' && cleaned.ends_with('\n') {
            continue;
        }
        cleaned.push(c);
    }
    cleaned
}

/// `clean_text`, with NFKC folding first when `fold_width` is set
pub fn clean_text_folded(text: &str, fold_width: bool) -> String {
    if fold_width {
        clean_text(&text.nfkc().collect::<String>())
    } else {
        clean_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_latin_and_symbols() {
        let raw = "Chapter 1: 猫が好き。★ <b>Hello</b> ｶﾀｶﾅ!";
        assert_eq!(clean_text(raw), "1猫が好き。ｶﾀｶﾅ!");
    }

    #[test]
    fn collapses_newline_runs() {
        assert_eq!(clean_text("猫\n\n\r\n犬\n"), "猫\n犬\n");
        assert_eq!(clean_text("\n\n猫"), "\n猫");
    }

    #[test]
    fn cleaning_is_idempotent() {
        let raw = "abc\n\n漢字とカナ、１２３です。\r\n\n(笑)ok 々〆";
        let once = clean_text(raw);
        assert_eq!(clean_text(&once), once);
        assert!(once.chars().all(is_allowed));
    }

    #[test]
    fn kanji_range_and_exceptions() {
        assert!(is_kanji('一'));
        assert!(is_kanji('龯'));
        assert!(is_kanji('々'));
        assert!(is_kanji('〆'));
        assert!(!is_kanji('あ'));
        assert!(!is_kanji('A'));
    }

    #[test]
    fn non_content_tokens() {
        for token in ["", "が", "ている", "テレビ", "ｶﾀｶﾅ", "。", "」「", "123", "１２", "½", "Ⅻ"] {
            assert!(!is_content(token), "{token:?} should not be content");
        }
    }

    #[test]
    fn tokens_with_kanji_are_content() {
        for token in ["猫", "好き", "可愛い", "三", "一つ", "々", "100円"] {
            assert!(is_content(token), "{token:?} should be content");
        }
    }

    #[test]
    fn folding_widens_half_width_kana() {
        assert_eq!(clean_text_folded("ｶﾀｶﾅ", true), "カタカナ");
        assert_eq!(clean_text_folded("ｶﾀｶﾅ", false), "ｶﾀｶﾅ");
    }
}
