//! Input documents and language tags.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::markdown;

/// Language of a document, as supplied by the caller.
///
/// No detection is performed; the tag selects syllable heuristics,
/// abbreviation tables, and which formula family applies.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize,
    JsonSchema,
)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Language {
    /// English.
    En,
    /// Russian.
    Ru,
    /// Any other or unidentified language.
    #[default]
    Unknown,
}

impl Language {
    /// Returns the language as a short lowercase code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a language code or name. Unrecognized input maps to
    /// [`Language::Unknown`].
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_lowercase().as_str() {
            "en" | "eng" | "english" => Self::En,
            "ru" | "rus" | "russian" => Self::Ru,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A body of text to score, tagged with its language.
///
/// Created once and never mutated; preprocessing returns a new document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Document {
    text: String,
    language: Language,
}

impl Document {
    /// Create a document from raw text.
    pub fn new(text: impl Into<String>, language: Language) -> Self {
        Self {
            text: text.into(),
            language,
        }
    }

    /// The raw text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The caller-supplied language tag.
    pub const fn language(&self) -> Language {
        self.language
    }

    /// Whether the document contains nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Treat the text as Markdown and return a document holding only its prose.
    pub fn to_prose(&self) -> Self {
        Self {
            text: markdown::strip_to_prose(&self.text),
            language: self.language,
        }
    }
}
