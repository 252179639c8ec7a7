use std::sync::LazyLock;

use regex::Regex;

use crate::charclass::clean_text_folded;

/// Ruby readings and small print; pronunciation aids that must not be counted
static ANNOTATIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)<rt\b[^>]*>.*?</rt\s*>|<rp\b[^>]*>.*?</rp\s*>|<font\s+size\s*=\s*["']?1["']?[^>]*>.*?</font\s*>"#,
    )
    .expect("annotation pattern")
});

static BOUNDARIES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(?:p|div|span)\s*>|<br\b[^>]*>").expect("boundary pattern"));

static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern"));

/// Clean an HTML or XHTML document
pub fn clean(raw: &str, fold_width: bool) -> String {
    let text = ANNOTATIONS.replace_all(raw, "");
    let text = BOUNDARIES.replace_all(&text, "\n");
    let text = TAGS.replace_all(&text, "");
    clean_text_folded(&text, fold_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ruby_readings_are_dropped() {
        let raw = "<p><ruby>猫<rp>（</rp><rt>ねこ</rt><rp>）</rp></ruby>が好き</p>";
        assert_eq!(clean(raw, false), "猫が好き\n");
    }

    #[test]
    fn small_font_is_dropped() {
        let raw = r#"本文<font size="1">注釈です</font>続き"#;
        assert_eq!(clean(raw, false), "本文続き");
    }

    #[test]
    fn block_ends_and_breaks_become_newlines() {
        let raw = "<div>一行目</div><p>二行目<br/>三行目</p><p>四行目<BR>五行目</p>";
        assert_eq!(clean(raw, false), "一行目\n二行目\n三行目\n四行目\n五行目\n");
    }

    #[test]
    fn span_ends_become_newlines() {
        let raw = r#"<span class="line">猫が好き</span><span>犬も好き</SPAN >終わり"#;
        assert_eq!(clean(raw, false), "猫が好き\n犬も好き\n終わり");
    }

    #[test]
    fn attribute_values_do_not_leak() {
        let raw = r#"<img alt="表紙" src="cover.jpg"/><p title="題名">本文</p>"#;
        assert_eq!(clean(raw, false), "本文\n");
    }

    #[test]
    fn multiline_ruby_is_dropped() {
        let raw = "<ruby>漢字<rt>\nかんじ\n</rt></ruby>";
        assert_eq!(clean(raw, false), "漢字");
    }
}
