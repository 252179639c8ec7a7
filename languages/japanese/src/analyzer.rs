use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use vibrato::{Dictionary, Tokenizer};
use yomidict_config::AnalyzerConfig;
use yomidict_core::{Analyzer, SetupError, Token};

/// Sentence tokenized once at load time to check the feature layout
const PROBE_SENTENCE: &str = "猫が好き";
const UNKNOWN_FEATURE: &str = "*";

/// Morphological analyzer backed by a vibrato system dictionary in UniDic layout
pub struct VibratoAnalyzer {
    tokenizer: Tokenizer,
    lemma_field: usize,
}

impl VibratoAnalyzer {
    /// Load and validate the dictionary named by the config
    pub fn load(config: &AnalyzerConfig) -> Result<Self, SetupError> {
        let path = PathBuf::from(&config.dictionary_path);
        tracing::info!("Loading analyzer dictionary from {}", path.display());

        let size = fs::metadata(&path)
            .map_err(|_| SetupError::DictionaryMissing(path.clone()))?
            .len();
        if size < config.min_dictionary_bytes {
            return Err(SetupError::DictionaryTooSmall {
                path,
                size,
                minimum: config.min_dictionary_bytes,
            });
        }

        let analyzer = Self::new(read_dictionary(&path)?, config.lemma_field);
        analyzer.probe()?;
        tracing::info!("Analyzer dictionary loaded ({} bytes)", size);
        Ok(analyzer)
    }

    pub fn new(dictionary: Dictionary, lemma_field: usize) -> Self {
        Self {
            tokenizer: Tokenizer::new(dictionary),
            lemma_field,
        }
    }

    fn probe(&self) -> Result<(), SetupError> {
        let mut worker = self.tokenizer.new_worker();
        worker.reset_sentence(PROBE_SENTENCE);
        worker.tokenize();

        let columns = worker
            .token_iter()
            .map(|token| token.feature().split(',').count())
            .min()
            .unwrap_or(0);
        if columns <= self.lemma_field {
            return Err(SetupError::Incompatible(format!(
                "features have {} columns, lemma column is {}; a UniDic dictionary is required",
                columns, self.lemma_field
            )));
        }
        Ok(())
    }
}

fn read_dictionary(path: &Path) -> Result<Dictionary, SetupError> {
    let reader = BufReader::new(File::open(path)?);
    let dictionary = if path.extension().is_some_and(|ext| ext == "zst") {
        Dictionary::read(zstd::Decoder::with_buffer(reader)?)
    } else {
        Dictionary::read(reader)
    };

    dictionary.map_err(|e| SetupError::DictionaryRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Lemma column of a CSV feature string
///
/// UniDic glosses some lemmas with a suffix (`パン-pão`); only the part before
/// the first `-` is kept. `*` and empty columns mean the lemma is unknown.
pub fn lemma_from_feature(feature: &str, field: usize) -> Option<String> {
    let column = feature.split(',').nth(field)?;
    let lemma = column.split('-').next().unwrap_or(column);
    if lemma.is_empty() || lemma == UNKNOWN_FEATURE {
        None
    } else {
        Some(lemma.to_string())
    }
}

impl Analyzer for VibratoAnalyzer {
    fn segment(&self, text: &str) -> Vec<Token> {
        let mut worker = self.tokenizer.new_worker();
        worker.reset_sentence(text);
        worker.tokenize();

        worker
            .token_iter()
            .map(|token| Token {
                surface: token.surface().to_string(),
                normalized: lemma_from_feature(token.feature(), self.lemma_field),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABERU: &str = "動詞,一般,*,*,下一段-バ行,連用形-一般,タベル,食べる,食べ,タベ,食べる,タベル,和,*,*,*,*";

    fn config_for(path: &Path, min_dictionary_bytes: u64) -> AnalyzerConfig {
        AnalyzerConfig {
            dictionary_path: path.to_string_lossy().into_owned(),
            min_dictionary_bytes,
            ..AnalyzerConfig::default()
        }
    }

    #[test]
    fn lemma_column() {
        assert_eq!(lemma_from_feature(TABERU, 7).as_deref(), Some("食べる"));
        assert_eq!(
            lemma_from_feature("名詞,普通名詞,一般,*,*,*,パン,パン-pão,パン", 7).as_deref(),
            Some("パン")
        );
    }

    #[test]
    fn unknown_lemma_falls_back() {
        assert_eq!(lemma_from_feature("名詞,普通名詞,一般,*,*,*,*,*", 7), None);
        assert_eq!(lemma_from_feature("補助記号,一般", 7), None);
        assert_eq!(lemma_from_feature("補助記号,一般,*,*,*,*,*,-", 7), None);
    }

    #[test]
    fn missing_dictionary_is_a_setup_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_for(&dir.path().join("system.dic.zst"), 0);
        assert!(matches!(
            VibratoAnalyzer::load(&config),
            Err(SetupError::DictionaryMissing(_))
        ));
    }

    #[test]
    fn undersized_dictionary_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.dic");
        fs::write(&path, vec![0u8; 128]).unwrap();

        let err = VibratoAnalyzer::load(&config_for(&path, 1024)).err().unwrap();
        assert!(matches!(
            err,
            SetupError::DictionaryTooSmall { size: 128, minimum: 1024, .. }
        ));
        assert_eq!(
            err.to_string(),
            format!("Analyzer dictionary {} is 128 bytes, expected at least 1024", path.display())
        );
    }

    #[test]
    fn corrupt_dictionary_is_a_setup_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("system.dic");
        fs::write(&path, b"definitely not a vibrato dictionary").unwrap();

        assert!(matches!(
            VibratoAnalyzer::load(&config_for(&path, 0)),
            Err(SetupError::DictionaryRead { .. })
        ));
    }
}
