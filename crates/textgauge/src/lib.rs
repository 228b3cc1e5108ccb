//! Readability and text-complexity scoring for English and Russian prose.
//!
//! Text flows through four stages:
//!
//! 1. [`adapters`]: injected tokenizer, part-of-speech tagger, common-word
//!    list and translator
//! 2. [`features`]: one immutable [`DerivedFeatures`] value per document
//! 3. [`metrics`]: pure formulas over those features
//! 4. [`report`]: a [`MetricResult`] with one outcome per requested metric
//!
//! [`Evaluator`] wires the stages together.
//!
//! # Quick Start
//!
//! ```no_run
//! use textgauge::{Document, EvaluationOptions, Evaluator, Language, MetricId, RuleTokenizer};
//!
//! let evaluator = Evaluator::builder()
//!     .tokenizer(RuleTokenizer)
//!     .build()
//!     .expect("tokenizer is set");
//!
//! let doc = Document::new("The cat sat on the mat.", Language::En);
//! let result = evaluator.evaluate(&doc, &EvaluationOptions::default());
//! println!("FRE = {:?}", result.score(MetricId::Fre));
//! ```
#![deny(unsafe_code)]

pub mod adapters;
pub mod config;
pub mod dictionaries;
pub mod document;
pub mod error;
pub mod features;
pub mod markdown;
pub mod metrics;
pub mod pipeline;
pub mod report;
pub mod text;

pub use adapters::{
    CommonWords, LexiconTagger, NullTagger, PosClass, PosTagger, RuleTokenizer, StaticTranslator,
    TaggedToken, Token, Tokenizer, Translator, WhitespaceTokenizer, WordList,
};
pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use document::{Document, Language};
pub use error::{
    AdapterError, ConfigError, ConfigResult, PipelineError, PipelineResult, TranslationError,
    WordListError,
};
pub use features::{DerivedFeatures, FeatureExtractor, LexicalFeatures, LexicalProfile, TextProfile};
pub use metrics::{MetricId, MetricOutcome, UndefinedReason};
pub use pipeline::{EvaluationOptions, Evaluator, EvaluatorBuilder};
pub use report::{
    CorpusSummary, MetricResult, TranslatedSummary, TranslationStatus, build_report,
};
