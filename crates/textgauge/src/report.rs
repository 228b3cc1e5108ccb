//! Report aggregation.
//!
//! [`build_report`] runs each requested formula independently against the
//! profile it reads and collects the outcomes. One metric failing never
//! removes another from the report, and every requested metric is present
//! in the output, defined or not.

use std::collections::{BTreeMap, BTreeSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::adapters::WordList;
use crate::document::Language;
use crate::error::TranslationError;
use crate::features::{DerivedFeatures, TextProfile};
use crate::metrics::{self, MetricId, MetricOutcome, UndefinedReason};

/// What happened on the English-formula path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TranslationStatus {
    /// The caller did not ask for translation.
    #[default]
    NotRequested,
    /// The text was already English.
    NotApplicable,
    /// The text was translated and the English formulas ran on the result.
    Translated,
    /// The translator failed.
    Failed,
    /// The translator did not answer in time.
    TimedOut,
}

impl From<&TranslationError> for TranslationStatus {
    fn from(err: &TranslationError) -> Self {
        match err {
            TranslationError::NotApplicable(_) => Self::NotApplicable,
            TranslationError::TimedOut(_) => Self::TimedOut,
            TranslationError::Unavailable(_) | TranslationError::Failed(_) => Self::Failed,
        }
    }
}

/// Corpus-level counts reported alongside the metrics.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct CorpusSummary {
    /// Number of words.
    pub word_count: usize,
    /// Number of sentences.
    pub sentence_count: usize,
    /// Estimated number of syllables.
    pub syllable_count: usize,
    /// Average sentence length in words.
    pub average_sentence_length: f64,
    /// Average syllables per word.
    pub average_syllables_per_word: f64,
}

impl From<&DerivedFeatures> for CorpusSummary {
    fn from(f: &DerivedFeatures) -> Self {
        Self {
            word_count: f.counts.word_count,
            sentence_count: f.counts.sentence_count,
            syllable_count: f.counts.syllable_count,
            average_sentence_length: f.average_sentence_length,
            average_syllables_per_word: f.average_syllables_per_word,
        }
    }
}

/// The translated text's counts and its Flesch Reading Ease.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct TranslatedSummary {
    /// Corpus counts of the English translation.
    pub summary: CorpusSummary,
    /// English FRE of the translation.
    pub fre: MetricOutcome,
}

/// The scores for one evaluated document.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct MetricResult {
    /// Language of the evaluated document.
    pub language: Language,
    /// Corpus counts of the native text.
    pub summary: CorpusSummary,
    /// What happened on the English path.
    pub translation: TranslationStatus,
    /// One entry per requested metric.
    ///
    /// `FRE` always scores the native text with its language's coefficients.
    pub metrics: BTreeMap<MetricId, MetricOutcome>,
    /// Present only when the English formulas ran on a translation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated: Option<TranslatedSummary>,
}

impl MetricResult {
    /// The outcome for `id`, if it was requested.
    pub fn get(&self, id: MetricId) -> Option<MetricOutcome> {
        self.metrics.get(&id).copied()
    }

    /// The score for `id`, if requested and defined.
    pub fn score(&self, id: MetricId) -> Option<f64> {
        self.get(id).and_then(|o| o.score())
    }

    /// Defined scores keyed by canonical name.
    pub fn scores(&self) -> BTreeMap<&'static str, f64> {
        self.metrics
            .iter()
            .filter_map(|(id, o)| o.score().map(|v| (id.as_str(), v)))
            .collect()
    }
}

/// The English-language features, or why there are none.
#[derive(Debug, Clone, Copy)]
pub enum EnglishProfile<'a> {
    /// English features to run the English formulas on.
    Available(&'a TextProfile),
    /// No English text was available.
    Missing(UndefinedReason),
}

/// Everything [`build_report`] reads.
#[derive(Clone, Copy)]
pub struct ReportInputs<'a> {
    /// Features of the document as written.
    pub native: &'a TextProfile,
    /// Features of the English text, native or translated.
    pub english: EnglishProfile<'a>,
    /// Familiar-word list for Dale-Chall.
    pub common_words: Option<&'a dyn WordList>,
    /// Outcome of the translation step.
    pub translation: TranslationStatus,
}

impl std::fmt::Debug for ReportInputs<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportInputs")
            .field("native", &self.native.features)
            .field("english", &self.english)
            .field("common_words", &self.common_words.is_some())
            .field("translation", &self.translation)
            .finish()
    }
}

/// Compute one metric from the inputs.
pub fn compute_metric(id: MetricId, inputs: &ReportInputs<'_>) -> MetricOutcome {
    let native = &inputs.native.features;
    match id {
        MetricId::Fre => metrics::flesch_reading_ease(native),
        MetricId::Smog => on_english(inputs, |p| metrics::smog_index(&p.features)),
        MetricId::Ari => on_english(inputs, |p| metrics::automated_readability_index(&p.features)),
        MetricId::GunningFog => on_english(inputs, |p| metrics::gunning_fog(&p.features)),
        MetricId::ColemanLiau => on_english(inputs, |p| metrics::coleman_liau_index(&p.features)),
        MetricId::DaleChall => on_english(inputs, |p| match inputs.common_words {
            Some(common) => metrics::dale_chall(&p.features, &p.tokens, common),
            None => MetricOutcome::Undefined(UndefinedReason::WordListUnavailable),
        }),
        MetricId::Ttr => metrics::ttr(native),
        MetricId::TtrNoun => metrics::ttr_noun(native),
        MetricId::TtrVerb => metrics::ttr_verb(native),
        MetricId::TtrAdj => metrics::ttr_adjective(native),
        MetricId::Nav => metrics::nav(native),
        MetricId::Unav => metrics::unav(native),
        MetricId::M3 => metrics::m3(native),
        MetricId::QMetric => metrics::q_metric(native),
    }
}

fn on_english(
    inputs: &ReportInputs<'_>,
    score: impl FnOnce(&TextProfile) -> MetricOutcome,
) -> MetricOutcome {
    match inputs.english {
        EnglishProfile::Available(profile) => score(profile),
        EnglishProfile::Missing(reason) => MetricOutcome::Undefined(reason),
    }
}

/// Compute every requested metric and assemble the result.
#[tracing::instrument(skip_all, fields(language = %inputs.native.features.language, requested = requested.len()))]
pub fn build_report(inputs: &ReportInputs<'_>, requested: &BTreeSet<MetricId>) -> MetricResult {
    let metrics: BTreeMap<MetricId, MetricOutcome> = requested
        .iter()
        .map(|&id| (id, compute_metric(id, inputs)))
        .collect();

    let undefined = metrics.values().filter(|o| !o.is_defined()).count();
    tracing::debug!(
        computed = metrics.len() - undefined,
        undefined,
        "report built"
    );

    let translated = match (inputs.translation, inputs.english) {
        (TranslationStatus::Translated, EnglishProfile::Available(english)) => {
            Some(TranslatedSummary {
                summary: CorpusSummary::from(&english.features),
                fre: metrics::flesch_reading_ease(&english.features),
            })
        }
        _ => None,
    };

    MetricResult {
        language: inputs.native.features.language,
        summary: CorpusSummary::from(&inputs.native.features),
        translation: inputs.translation,
        metrics,
        translated,
    }
}
