/// Morphological analysis interface for language implementations
pub trait Analyzer: Send + Sync {
    /// Split one sentence into morphemes, in text order
    fn segment(&self, text: &str) -> Vec<Token>;

    /// Lemmas of every morpheme in one line
    fn tokenize_line(&self, line: &str) -> Vec<String> {
        self.segment(line)
            .into_iter()
            .map(Token::into_lemma)
            .collect()
    }

    /// Lemmas of every newline-delimited segment, concatenated in order
    fn tokenize_text(&self, text: &str) -> Vec<String> {
        text.split('\n')
            .filter(|line| !line.is_empty())
            .flat_map(|line| self.tokenize_line(line))
            .collect()
    }
}

/// Decides which lemmas carry vocabulary and get counted
pub trait ContentFilter: Send + Sync {
    fn is_content(&self, token: &str) -> bool;
}

impl<F> ContentFilter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_content(&self, token: &str) -> bool {
        self(token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub surface: String,
    /// Dictionary form, when the analyzer knows one
    pub normalized: Option<String>,
}

impl Token {
    pub fn lemma(&self) -> &str {
        self.normalized.as_deref().unwrap_or(&self.surface)
    }

    pub fn into_lemma(self) -> String {
        self.normalized.unwrap_or(self.surface)
    }
}
