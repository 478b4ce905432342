//! Static word lists used by the metrics calculator.
//!
//! Three sets are needed: stopwords, positive opinion words and negative
//! opinion words. Built-in lists are compiled into the binary from the
//! `lexicon/` directory; any of them can be replaced by a file at startup.
//!
//! # File format
//!
//! One word per line. Blank lines and lines starting with `;` are ignored,
//! which is the layout of the published opinion lexicon files. Words are
//! lower-cased on load because matching happens on lower-cased tokens.
//!
//! A [`Lexicon`] is built once in `main` and shared read-only with every
//! worker through an `Arc`.

use crate::errors::LexiconError;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

static BUILTIN_STOPWORDS: Lazy<HashSet<String>> =
    Lazy::new(|| parse_word_list(include_str!("../lexicon/stopwords-en.txt")));
static BUILTIN_POSITIVE: Lazy<HashSet<String>> =
    Lazy::new(|| parse_word_list(include_str!("../lexicon/positive-words.txt")));
static BUILTIN_NEGATIVE: Lazy<HashSet<String>> =
    Lazy::new(|| parse_word_list(include_str!("../lexicon/negative-words.txt")));

#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    pub stopwords: HashSet<String>,
    pub positive: HashSet<String>,
    pub negative: HashSet<String>,
}

/// Optional replacement files for the built-in lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconPaths<'a> {
    pub stopwords: Option<&'a Path>,
    pub positive: Option<&'a Path>,
    pub negative: Option<&'a Path>,
}

impl Lexicon {
    /// The lists compiled into the binary from `lexicon/`.
    pub fn builtin() -> Self {
        Self {
            stopwords: BUILTIN_STOPWORDS.clone(),
            positive: BUILTIN_POSITIVE.clone(),
            negative: BUILTIN_NEGATIVE.clone(),
        }
    }

    /// Build a lexicon from explicit word lists (lower-cased on the way in).
    #[cfg(test)]
    pub fn from_words<S, P, N>(stopwords: S, positive: P, negative: N) -> Self
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
        N: IntoIterator,
        N::Item: AsRef<str>,
    {
        fn collect<I>(words: I) -> HashSet<String>
        where
            I: IntoIterator,
            I::Item: AsRef<str>,
        {
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        }
        Self {
            stopwords: collect(stopwords),
            positive: collect(positive),
            negative: collect(negative),
        }
    }

    /// Load the lexicon, reading each list from its file when one is given
    /// and keeping the built-in list otherwise.
    ///
    /// # Arguments
    ///
    /// * `paths` - Replacement files; `None` entries keep the built-in list
    ///
    /// # Errors
    ///
    /// Returns [`LexiconError::Read`] if a given file cannot be read.
    #[instrument(level = "info", skip_all)]
    pub async fn load(paths: LexiconPaths<'_>) -> Result<Self, LexiconError> {
        let mut lexicon = Self::builtin();
        if let Some(path) = paths.stopwords {
            lexicon.stopwords = read_word_list(path).await?;
        }
        if let Some(path) = paths.positive {
            lexicon.positive = read_word_list(path).await?;
        }
        if let Some(path) = paths.negative {
            lexicon.negative = read_word_list(path).await?;
        }

        info!(
            stopwords = lexicon.stopwords.len(),
            positive = lexicon.positive.len(),
            negative = lexicon.negative.len(),
            "Loaded lexicon"
        );
        Ok(lexicon)
    }
}

async fn read_word_list(path: &Path) -> Result<HashSet<String>, LexiconError> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|source| LexiconError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(parse_word_list(&text))
}

fn parse_word_list(text: &str) -> HashSet<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(';'))
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_word_list_skips_comments_and_blanks() {
        let words = parse_word_list("; header\n;\n\nGood\n  nice  \n");
        assert_eq!(words.len(), 2);
        assert!(words.contains("good"));
        assert!(words.contains("nice"));
    }

    #[test]
    fn test_builtin_lists_are_populated() {
        let lexicon = Lexicon::builtin();
        assert!(lexicon.stopwords.contains("the"));
        assert!(lexicon.stopwords.contains("i"));
        assert!(!lexicon.stopwords.contains("us"));
        assert_eq!(lexicon.positive.len(), 2006);
        assert_eq!(lexicon.negative.len(), 4783);
        for word in ["love", "like", "gain", "gains", "well"] {
            assert!(lexicon.positive.contains(word), "{word}");
        }
        for word in ["hate", "kill", "killed", "killing", "naïve"] {
            assert!(lexicon.negative.contains(word), "{word}");
        }
    }

    #[test]
    fn test_builtin_lists_overlap_only_on_envy() {
        let lexicon = Lexicon::builtin();
        let mut shared: Vec<&str> = lexicon
            .positive
            .intersection(&lexicon.negative)
            .map(String::as_str)
            .collect();
        shared.sort_unstable();
        assert_eq!(shared, vec!["envious", "enviously", "enviousness"]);
    }

    #[test]
    fn test_from_words_lowercases() {
        let lexicon = Lexicon::from_words(["The"], ["Love"], Vec::<String>::new());
        assert!(lexicon.stopwords.contains("the"));
        assert!(lexicon.positive.contains("love"));
        assert!(lexicon.negative.is_empty());
    }

    #[tokio::test]
    async fn test_load_overrides_only_given_lists() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "; custom list").unwrap();
        writeln!(file, "splendid").unwrap();

        let lexicon = Lexicon::load(LexiconPaths {
            positive: Some(file.path()),
            ..LexiconPaths::default()
        })
        .await
        .unwrap();

        assert_eq!(lexicon.positive.len(), 1);
        assert!(lexicon.positive.contains("splendid"));
        assert!(lexicon.stopwords.contains("the"));
        assert!(lexicon.negative.contains("hate"));
    }

    #[tokio::test]
    async fn test_load_without_paths_is_builtin() {
        let loaded = Lexicon::load(LexiconPaths::default()).await.unwrap();
        let builtin = Lexicon::builtin();
        assert_eq!(loaded.stopwords, builtin.stopwords);
        assert_eq!(loaded.positive, builtin.positive);
        assert_eq!(loaded.negative, builtin.negative);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        let err = Lexicon::load(LexiconPaths {
            stopwords: Some(Path::new("/nonexistent/stopwords.txt")),
            ..LexiconPaths::default()
        })
        .await
        .unwrap_err();
        assert!(matches!(err, LexiconError::Read { .. }));
    }
}
