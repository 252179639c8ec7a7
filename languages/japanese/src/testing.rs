use yomidict_core::{Analyzer, Token};

/// `(surface, lemma)` pairs known to the lexicon analyzer
const LEXICON: &[(&str, Option<&str>)] = &[
    ("猫", None),
    ("犬", None),
    ("が", None),
    ("は", None),
    ("も", None),
    ("好き", None),
    ("可愛い", None),
    ("可愛かっ", Some("可愛い")),
    ("食べ", Some("食べる")),
    ("た", None),
];

/// Greedy longest-match analyzer; characters outside the lexicon become
/// single-character morphemes
pub(crate) struct LexiconAnalyzer;

impl Analyzer for LexiconAnalyzer {
    fn segment(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut rest = text;

        while let Some(c) = rest.chars().next() {
            let (surface, normalized) = LEXICON
                .iter()
                .filter(|(surface, _)| rest.starts_with(surface))
                .max_by_key(|(surface, _)| surface.len())
                .map(|(surface, lemma)| (*surface, lemma.map(str::to_string)))
                .unwrap_or_else(|| (&rest[..c.len_utf8()], None));

            tokens.push(Token {
                surface: surface.to_string(),
                normalized,
            });
            rest = &rest[surface.len()..];
        }

        tokens
    }
}
