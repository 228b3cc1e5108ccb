//! Common-word reference lists for the Dale-Chall formula.

use std::collections::HashSet;
use std::io::BufRead;

use camino::Utf8Path;

use crate::dictionaries::common_words::BASIC_ENGLISH;
use crate::error::WordListError;

/// Membership lookup against a list of familiar words.
pub trait WordList: Send + Sync {
    /// Whether `word` is familiar. Callers pass lowercase forms.
    fn contains(&self, word: &str) -> bool;
}

/// An in-memory set of familiar words, stored lowercase.
#[derive(Debug, Clone, Default)]
pub struct CommonWords {
    words: HashSet<String>,
}

impl CommonWords {
    /// Build a list from any iterator of words.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// The built-in basic English list.
    pub fn basic_english() -> Self {
        Self::from_words(BASIC_ENGLISH.iter())
    }

    /// Read one word per line. Blank lines and lines starting with `#` are
    /// skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> std::io::Result<Self> {
        let mut words = HashSet::new();
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            words.insert(word.to_lowercase());
        }
        Ok(Self { words })
    }

    /// Load a word list file.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn load(path: &Utf8Path) -> Result<Self, WordListError> {
        let io_err = |source: std::io::Error| WordListError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = std::fs::File::open(path.as_std_path()).map_err(io_err)?;
        let list = Self::from_reader(std::io::BufReader::new(file)).map_err(io_err)?;
        tracing::debug!(words = list.len(), "loaded common-word list");
        Ok(list)
    }

    /// Number of words in the list.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl WordList for CommonWords {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}
