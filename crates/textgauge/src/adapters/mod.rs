//! Capability interfaces for the external NLP collaborators.
//!
//! The engine never calls a concrete NLP library. Tokenization, tagging,
//! word-list lookup and translation are injected as trait objects, each with
//! at least one dependency-free implementation so the pipeline runs without
//! a live service.

pub mod tagger;
pub mod tokenizer;
pub mod translate;
pub mod word_list;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub use tagger::{LexiconTagger, NullTagger, PosTagger};
pub use tokenizer::{RuleTokenizer, Tokenizer, WhitespaceTokenizer};
pub use translate::{StaticTranslator, Translator, translate_with_timeout};
pub use word_list::{CommonWords, WordList};

/// A word form taken from a document, in appearance order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Wrap a surface form.
    pub fn new(form: impl Into<String>) -> Self {
        Self(form.into())
    }

    /// The surface form as written.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Coarse part-of-speech class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PosClass {
    /// Noun.
    Noun,
    /// Verb.
    Verb,
    /// Adjective.
    Adjective,
    /// Anything else, including untagged tokens.
    Other,
}

impl PosClass {
    /// Map a Russian National Corpus style tag (`S`, `V`, `A`, with any
    /// grammatical suffix such as `S=m,nom,sg`).
    pub fn from_russian_tag(tag: &str) -> Self {
        // ADV, APRO, SPRO etc. are not content words
        let head = tag.split(['=', ',']).next().unwrap_or_default();
        match head {
            "S" => Self::Noun,
            "V" => Self::Verb,
            "A" => Self::Adjective,
            _ => Self::Other,
        }
    }

    /// Map a Penn Treebank tag (`NN*`, `VB*`, `JJ*`).
    pub fn from_penn_tag(tag: &str) -> Self {
        if tag.starts_with("NN") {
            Self::Noun
        } else if tag.starts_with("VB") {
            Self::Verb
        } else if tag.starts_with("JJ") {
            Self::Adjective
        } else {
            Self::Other
        }
    }
}

/// A token with its coarse part-of-speech class.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct TaggedToken {
    /// The token.
    pub token: Token,
    /// Its class.
    pub class: PosClass,
}

impl TaggedToken {
    /// Pair a token with a class.
    pub const fn new(token: Token, class: PosClass) -> Self {
        Self { token, class }
    }
}
