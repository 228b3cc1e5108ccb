//! The evaluation pipeline: document in, [`MetricResult`] out.
//!
//! An [`Evaluator`] owns the injected adapters and is built once, then
//! shared. Each evaluation extracts features, optionally translates the text
//! for the English formulas, and aggregates the requested metrics. Only
//! construction can fail; evaluation always returns a result.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use crate::adapters::{
    CommonWords, NullTagger, PosTagger, Tokenizer, Translator, WordList, translate_with_timeout,
};
use crate::config::{Config, DEFAULT_TRANSLATION_TIMEOUT};
use crate::document::{Document, Language};
use crate::error::{PipelineError, PipelineResult, TranslationError};
use crate::features::{FeatureExtractor, TextProfile};
use crate::metrics::{MetricId, UndefinedReason};
use crate::report::{EnglishProfile, MetricResult, ReportInputs, TranslationStatus, build_report};

/// Per-call evaluation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationOptions {
    /// Metrics to compute. `None` selects the defaults for the language.
    pub metrics: Option<BTreeSet<MetricId>>,
    /// Translate non-English text so the English formulas can run.
    pub translate_if_foreign: bool,
    /// Strip Markdown formatting before scoring.
    pub strip_markdown: bool,
}

impl EvaluationOptions {
    /// Build options from configuration.
    ///
    /// Fails with [`PipelineError::UnknownMetric`] on an unrecognized name.
    pub fn from_config(config: &Config) -> PipelineResult<Self> {
        let metrics = config
            .metrics
            .as_ref()
            .map(|names| {
                names
                    .iter()
                    .map(|name| name.parse::<MetricId>())
                    .collect::<PipelineResult<BTreeSet<_>>>()
            })
            .transpose()?;
        Ok(Self {
            metrics,
            translate_if_foreign: config.translate_if_foreign,
            strip_markdown: config.strip_markdown,
        })
    }

    /// Select exactly `metrics`.
    pub fn with_metrics(mut self, metrics: impl IntoIterator<Item = MetricId>) -> Self {
        self.metrics = Some(metrics.into_iter().collect());
        self
    }

    /// Request translation of non-English text.
    pub const fn translated(mut self) -> Self {
        self.translate_if_foreign = true;
        self
    }

    fn requested(&self, language: Language) -> BTreeSet<MetricId> {
        self.metrics.clone().unwrap_or_else(|| {
            let mut set = MetricId::defaults_for(language);
            if self.translate_if_foreign && language != Language::En {
                set.extend(MetricId::ENGLISH_FAMILY);
            }
            set
        })
    }
}

/// Builder for [`Evaluator`].
#[derive(Default)]
pub struct EvaluatorBuilder {
    tokenizer: Option<Arc<dyn Tokenizer>>,
    tagger: Option<Arc<dyn PosTagger>>,
    common_words: Option<Arc<dyn WordList>>,
    translator: Option<Arc<dyn Translator>>,
    translation_timeout: Option<Duration>,
}

impl EvaluatorBuilder {
    /// Set the tokenizer. Required.
    pub fn tokenizer(mut self, tokenizer: impl Tokenizer + 'static) -> Self {
        self.tokenizer = Some(Arc::new(tokenizer));
        self
    }

    /// Set the part-of-speech tagger. Defaults to [`NullTagger`].
    pub fn tagger(mut self, tagger: impl PosTagger + 'static) -> Self {
        self.tagger = Some(Arc::new(tagger));
        self
    }

    /// Set the familiar-word list used by Dale-Chall.
    pub fn common_words(mut self, words: impl WordList + 'static) -> Self {
        self.common_words = Some(Arc::new(words));
        self
    }

    /// Set the translator for the English path.
    pub fn translator(mut self, translator: impl Translator + 'static) -> Self {
        self.translator = Some(Arc::new(translator));
        self
    }

    /// Bound each translation call. Defaults to ten seconds.
    pub const fn translation_timeout(mut self, timeout: Duration) -> Self {
        self.translation_timeout = Some(timeout);
        self
    }

    /// Apply configuration.
    ///
    /// Loads `common_words_file` when set; otherwise installs the built-in
    /// basic English list unless a list was already supplied.
    pub fn configure(mut self, config: &Config) -> PipelineResult<Self> {
        if let Some(path) = &config.common_words_file {
            self.common_words = Some(Arc::new(CommonWords::load(path)?));
        } else if self.common_words.is_none() {
            self.common_words = Some(Arc::new(CommonWords::basic_english()));
        }
        self.translation_timeout = Some(config.translation_timeout());
        Ok(self)
    }

    /// Finish construction.
    pub fn build(self) -> PipelineResult<Evaluator> {
        let tokenizer = self.tokenizer.ok_or(PipelineError::MissingTokenizer)?;
        Ok(Evaluator {
            tokenizer,
            tagger: self.tagger.unwrap_or_else(|| Arc::new(NullTagger)),
            common_words: self.common_words,
            translator: self.translator,
            translation_timeout: self
                .translation_timeout
                .unwrap_or(DEFAULT_TRANSLATION_TIMEOUT),
        })
    }
}

/// Scores documents with a fixed set of adapters.
///
/// Cheap to clone and safe to share across threads.
#[derive(Clone)]
pub struct Evaluator {
    tokenizer: Arc<dyn Tokenizer>,
    tagger: Arc<dyn PosTagger>,
    common_words: Option<Arc<dyn WordList>>,
    translator: Option<Arc<dyn Translator>>,
    translation_timeout: Duration,
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("common_words", &self.common_words.is_some())
            .field("translator", &self.translator.is_some())
            .field("translation_timeout", &self.translation_timeout)
            .finish_non_exhaustive()
    }
}

impl Evaluator {
    /// Start building an evaluator.
    pub fn builder() -> EvaluatorBuilder {
        EvaluatorBuilder::default()
    }

    fn extractor(&self) -> FeatureExtractor<'_> {
        FeatureExtractor::new(&*self.tokenizer, &*self.tagger)
    }

    fn prepare<'d>(document: &'d Document, options: &EvaluationOptions) -> Cow<'d, Document> {
        if options.strip_markdown {
            Cow::Owned(document.to_prose())
        } else {
            Cow::Borrowed(document)
        }
    }

    fn report(
        &self,
        native: &TextProfile,
        english: EnglishProfile<'_>,
        translation: TranslationStatus,
        requested: &BTreeSet<MetricId>,
    ) -> MetricResult {
        let inputs = ReportInputs {
            native,
            english,
            common_words: self.common_words.as_deref(),
            translation,
        };
        build_report(&inputs, requested)
    }

    /// Evaluate `document` without translation.
    ///
    /// English-family metrics are defined only for English documents; for
    /// other languages they are `Undefined(not_english)`.
    #[tracing::instrument(skip_all, fields(language = %document.language(), text_len = document.text().len()))]
    pub fn evaluate(&self, document: &Document, options: &EvaluationOptions) -> MetricResult {
        let document = Self::prepare(document, options);
        let language = document.language();
        let native = self.extractor().profile(&document);
        let requested = options.requested(language);

        let (english, status) = if language == Language::En {
            (
                EnglishProfile::Available(&native),
                TranslationStatus::NotApplicable,
            )
        } else {
            (
                EnglishProfile::Missing(UndefinedReason::NotEnglish),
                TranslationStatus::NotRequested,
            )
        };
        self.report(&native, english, status, &requested)
    }

    /// Evaluate `document`, translating it first when it is not English and
    /// `options.translate_if_foreign` is set.
    ///
    /// Translation failure or timeout only leaves the English-family metrics
    /// undefined; everything computed from the native text is unaffected.
    #[tracing::instrument(skip_all, fields(language = %document.language(), text_len = document.text().len()))]
    pub async fn evaluate_with_translation(
        &self,
        document: &Document,
        options: &EvaluationOptions,
    ) -> MetricResult {
        let language = document.language();
        let requested = options.requested(language);
        let wants_english = requested.iter().any(MetricId::uses_english_profile);
        if !options.translate_if_foreign || language == Language::En || !wants_english {
            return self.evaluate(document, options);
        }

        let document = Self::prepare(document, options);
        let native = self.extractor().profile(&document);

        let translated = match &self.translator {
            Some(translator) => {
                translate_with_timeout(
                    &**translator,
                    document.text(),
                    language,
                    self.translation_timeout,
                )
                .await
            }
            None => {
                tracing::warn!("translation requested but no translator configured");
                Err(TranslationError::Unavailable(
                    "no translator configured".to_string(),
                ))
            }
        };

        match translated {
            Ok(text) => {
                let english_doc = Document::new(text, Language::En);
                let english = self.extractor().profile(&english_doc);
                self.report(
                    &native,
                    EnglishProfile::Available(&english),
                    TranslationStatus::Translated,
                    &requested,
                )
            }
            Err(err) => {
                let reason = match err {
                    TranslationError::NotApplicable(_) => UndefinedReason::NotEnglish,
                    _ => UndefinedReason::TranslationFailed,
                };
                self.report(
                    &native,
                    EnglishProfile::Missing(reason),
                    TranslationStatus::from(&err),
                    &requested,
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{LexiconTagger, PosClass, RuleTokenizer, StaticTranslator};
    use crate::metrics::MetricOutcome;

    fn ru_tagger() -> LexiconTagger {
        LexiconTagger::new(Language::Ru).with_entries([
            ("кошка", PosClass::Noun),
            ("сидела", PosClass::Verb),
            ("серая", PosClass::Adjective),
        ])
    }

    #[test]
    fn build_requires_tokenizer() {
        let err = Evaluator::builder().build().unwrap_err();
        assert!(matches!(err, PipelineError::MissingTokenizer));
    }

    #[test]
    fn evaluator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Evaluator>();
    }

    #[test]
    fn options_from_config_parse_metric_names() {
        let config = Config {
            metrics: Some(vec!["fre".to_string(), "DALE-CHALL".to_string()]),
            strip_markdown: true,
            ..Config::default()
        };
        let options = EvaluationOptions::from_config(&config).unwrap();
        assert_eq!(
            options.metrics,
            Some(BTreeSet::from([MetricId::Fre, MetricId::DaleChall]))
        );
        assert!(options.strip_markdown);

        let bad = Config {
            metrics: Some(vec!["READABILITY".to_string()]),
            ..Config::default()
        };
        assert!(matches!(
            EvaluationOptions::from_config(&bad),
            Err(PipelineError::UnknownMetric { .. })
        ));
    }

    #[test]
    fn configure_installs_basic_list_and_timeout() {
        let config = Config {
            translation_timeout_ms: Some(250),
            ..Config::default()
        };
        let evaluator = Evaluator::builder()
            .tokenizer(RuleTokenizer)
            .configure(&config)
            .unwrap()
            .build()
            .unwrap();
        assert!(evaluator.common_words.is_some());
        assert_eq!(evaluator.translation_timeout, Duration::from_millis(250));
    }

    #[test]
    fn configure_fails_on_missing_word_file() {
        let config = Config {
            common_words_file: Some("/nonexistent/words.txt".into()),
            ..Config::default()
        };
        let err = Evaluator::builder().configure(&config).err().unwrap();
        assert!(matches!(err, PipelineError::WordList(_)));
    }

    #[test]
    fn russian_defaults_without_translation() {
        let evaluator = Evaluator::builder()
            .tokenizer(RuleTokenizer)
            .tagger(ru_tagger())
            .build()
            .unwrap();
        let doc = Document::new("Серая кошка сидела.", Language::Ru);
        let result = evaluator.evaluate(&doc, &EvaluationOptions::default());

        assert_eq!(
            result.metrics.keys().copied().collect::<BTreeSet<_>>(),
            MetricId::defaults_for(Language::Ru)
        );
        assert_eq!(result.translation, TranslationStatus::NotRequested);
        assert!(result.score(MetricId::QMetric).is_some());
    }

    #[test]
    fn non_english_requesting_english_metric_is_undefined() {
        let evaluator = Evaluator::builder().tokenizer(RuleTokenizer).build().unwrap();
        let doc = Document::new("Кошка сидела.", Language::Ru);
        let options = EvaluationOptions::default().with_metrics([MetricId::Ari]);
        let result = evaluator.evaluate(&doc, &options);
        assert_eq!(
            result.get(MetricId::Ari),
            Some(MetricOutcome::Undefined(UndefinedReason::NotEnglish))
        );
    }

    #[test]
    fn markdown_is_stripped_when_asked() {
        let evaluator = Evaluator::builder().tokenizer(RuleTokenizer).build().unwrap();
        let doc = Document::new("# Title\n\nThe cat sat.\n\n```\nlet x = 1;\n```\n", Language::En);
        let options = EvaluationOptions {
            strip_markdown: true,
            ..EvaluationOptions::default()
        };
        let result = evaluator.evaluate(&doc, &options);
        assert_eq!(result.summary.word_count, 3);
        assert_eq!(result.summary.sentence_count, 1);
    }

    #[tokio::test]
    async fn translation_runs_english_formulas() {
        let evaluator = Evaluator::builder()
            .tokenizer(RuleTokenizer)
            .tagger(ru_tagger())
            .common_words(CommonWords::basic_english())
            .translator(StaticTranslator::new("The grey cat sat."))
            .build()
            .unwrap();
        let doc = Document::new("Серая кошка сидела.", Language::Ru);
        let result = evaluator
            .evaluate_with_translation(&doc, &EvaluationOptions::default().translated())
            .await;

        assert_eq!(result.translation, TranslationStatus::Translated);
        for id in MetricId::ENGLISH_FAMILY {
            assert!(result.get(id).unwrap().is_defined(), "{id}");
        }
        // native summary, not the translation's
        assert_eq!(result.language, Language::Ru);
        assert!(result.score(MetricId::M3).is_some());
    }

    #[tokio::test]
    async fn missing_translator_degrades() {
        let evaluator = Evaluator::builder()
            .tokenizer(RuleTokenizer)
            .tagger(ru_tagger())
            .build()
            .unwrap();
        let doc = Document::new("Серая кошка сидела.", Language::Ru);
        let result = evaluator
            .evaluate_with_translation(&doc, &EvaluationOptions::default().translated())
            .await;

        assert_eq!(result.translation, TranslationStatus::Failed);
        assert_eq!(
            result.get(MetricId::Smog),
            Some(MetricOutcome::Undefined(UndefinedReason::TranslationFailed))
        );
        assert!(result.score(MetricId::Fre).is_some());
    }

    #[tokio::test]
    async fn english_documents_skip_translation() {
        let evaluator = Evaluator::builder()
            .tokenizer(RuleTokenizer)
            .translator(StaticTranslator::new("unused"))
            .build()
            .unwrap();
        let doc = Document::new("The cat sat.", Language::En);
        let options = EvaluationOptions::default().translated();
        let result = evaluator.evaluate_with_translation(&doc, &options).await;
        assert_eq!(result, evaluator.evaluate(&doc, &options));
        assert_eq!(result.translation, TranslationStatus::NotApplicable);
    }
}
