//! Error types for textgauge.
//!
//! Degenerate text (no words, no sentences) is never an error here; those
//! cases resolve to zeroed features or undefined metric outcomes. The types
//! below cover configuration, pipeline construction, and adapter failures.

use std::time::Duration;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::document::Language;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while assembling an evaluation pipeline.
///
/// These are the only failures that abort a whole evaluation, because
/// without them no features can be extracted at all.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// No tokenizer was supplied to the builder.
    #[error("no tokenizer configured")]
    MissingTokenizer,

    /// The configured common-word list could not be loaded.
    #[error(transparent)]
    WordList(#[from] WordListError),

    /// An unknown metric name was provided.
    #[error("unknown metric: {name}. Use: {available}")]
    UnknownMetric {
        /// The metric name that was requested.
        name: String,
        /// Comma-separated list of available metric names.
        available: String,
    },
}

/// Result type alias using [`PipelineError`].
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Failures reported by a tokenizer or tagger adapter at call time.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The backing service or model is not reachable.
    #[error("adapter unavailable: {0}")]
    Unavailable(String),

    /// The adapter returned a different number of items than it was given.
    #[error("adapter output misaligned: expected {expected} items, got {actual}")]
    Misaligned {
        /// Number of input tokens.
        expected: usize,
        /// Number of tagged tokens returned.
        actual: usize,
    },
}

/// Failures from the translation collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// The source text does not need translating.
    #[error("translation not applicable for {0} text")]
    NotApplicable(Language),

    /// No translator is configured or it cannot be reached.
    #[error("translator unavailable: {0}")]
    Unavailable(String),

    /// The translator reported an error.
    #[error("translation failed: {0}")]
    Failed(String),

    /// The translator did not answer in time.
    #[error("translation timed out after {0:?}")]
    TimedOut(Duration),
}

/// Errors loading a common-word reference list.
#[derive(Error, Debug)]
pub enum WordListError {
    /// The word list file could not be read.
    #[error("failed to read word list {path}: {source}")]
    Io {
        /// Path that was being read.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}
