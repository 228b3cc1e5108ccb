//! Readability and lexical-complexity formulas.
//!
//! Every formula is a pure function over [`DerivedFeatures`]. None of them
//! panics or divides by zero: a zero denominator yields
//! [`MetricOutcome::Undefined`] with the reason, and so does any result that
//! is not a finite number.
//!
//! English-oriented:
//!
//! | Formula | Definition |
//! |---|---|
//! | ARI | `4.71 * (letters/words) + 0.5 * (words/sentences) - 21.43` |
//! | Coleman-Liau | `0.0588 * L - 0.296 * S - 15.8` |
//! | Gunning-Fog | `0.4 * (words/sentences + 100 * complex/words)` |
//! | SMOG | `1.0430 * sqrt(30 * polysyllables/sentences) + 3.1291` |
//! | Dale-Chall | `0.1579 * (pct_difficult/ASL) + 0.0496 * (ASL/words)` |
//! | FRE | `206.835 - 1.015 * ASL - 84.6 * ASW` |
//!
//! Russian-oriented: M3, the Q-metric polynomial, and the TTR/NAV/UNAV
//! ratios read from the lexical profile. FRE is shared by both languages.
//!
//! Coefficients are applied in their published order without fused
//! multiply-add so scores match reference values exactly.

// Fused multiply-add changes the last bits of the result.
#![allow(clippy::suboptimal_flops)]

use std::collections::BTreeSet;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::adapters::{Token, WordList};
use crate::document::Language;
use crate::error::PipelineError;
use crate::features::{DerivedFeatures, LexicalFeatures, LexicalProfile, LexicalUnavailable};

/// Canonical metric identifiers.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize, JsonSchema,
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum MetricId {
    /// Flesch Reading Ease.
    #[serde(rename = "FRE")]
    #[cfg_attr(feature = "clap", value(name = "FRE"))]
    Fre,
    /// SMOG grade.
    #[serde(rename = "SMOG")]
    #[cfg_attr(feature = "clap", value(name = "SMOG"))]
    Smog,
    /// Automated Readability Index.
    #[serde(rename = "ARI")]
    #[cfg_attr(feature = "clap", value(name = "ARI"))]
    Ari,
    /// Dale-Chall readability score.
    #[serde(rename = "DALE-CHALL")]
    #[cfg_attr(feature = "clap", value(name = "DALE-CHALL"))]
    DaleChall,
    /// Gunning-Fog index.
    #[serde(rename = "GUNNING-FOG")]
    #[cfg_attr(feature = "clap", value(name = "GUNNING-FOG"))]
    GunningFog,
    /// Coleman-Liau index.
    #[serde(rename = "COLEMAN-LIAU")]
    #[cfg_attr(feature = "clap", value(name = "COLEMAN-LIAU"))]
    ColemanLiau,
    /// Type-token ratio over all tokens.
    #[serde(rename = "TTR")]
    #[cfg_attr(feature = "clap", value(name = "TTR"))]
    Ttr,
    /// Type-token ratio over nouns.
    #[serde(rename = "TTR_NOUN")]
    #[cfg_attr(feature = "clap", value(name = "TTR_NOUN"))]
    TtrNoun,
    /// Type-token ratio over verbs.
    #[serde(rename = "TTR_VERB")]
    #[cfg_attr(feature = "clap", value(name = "TTR_VERB"))]
    TtrVerb,
    /// Type-token ratio over adjectives.
    #[serde(rename = "TTR_ADJ")]
    #[cfg_attr(feature = "clap", value(name = "TTR_ADJ"))]
    TtrAdj,
    /// Noun-and-adjective to verb TTR ratio.
    #[serde(rename = "NAV")]
    #[cfg_attr(feature = "clap", value(name = "NAV"))]
    Nav,
    /// Unique noun-and-adjective to unique verb ratio.
    #[serde(rename = "UNAV")]
    #[cfg_attr(feature = "clap", value(name = "UNAV"))]
    Unav,
    /// M3 regression score.
    #[serde(rename = "M3")]
    #[cfg_attr(feature = "clap", value(name = "M3"))]
    M3,
    /// Quadratic Q-metric.
    #[serde(rename = "Q_METRIC")]
    #[cfg_attr(feature = "clap", value(name = "Q_METRIC"))]
    QMetric,
}

impl MetricId {
    /// Every metric, in report order.
    pub const ALL: [Self; 14] = [
        Self::Fre,
        Self::Smog,
        Self::Ari,
        Self::DaleChall,
        Self::GunningFog,
        Self::ColemanLiau,
        Self::Ttr,
        Self::TtrNoun,
        Self::TtrVerb,
        Self::TtrAdj,
        Self::Nav,
        Self::Unav,
        Self::M3,
        Self::QMetric,
    ];

    /// Formulas calibrated on English text.
    pub const ENGLISH_FAMILY: [Self; 5] = [
        Self::Smog,
        Self::Ari,
        Self::DaleChall,
        Self::GunningFog,
        Self::ColemanLiau,
    ];

    /// The type-token ratios.
    pub const TTR_FAMILY: [Self; 4] = [Self::Ttr, Self::TtrNoun, Self::TtrVerb, Self::TtrAdj];

    /// The canonical key.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fre => "FRE",
            Self::Smog => "SMOG",
            Self::Ari => "ARI",
            Self::DaleChall => "DALE-CHALL",
            Self::GunningFog => "GUNNING-FOG",
            Self::ColemanLiau => "COLEMAN-LIAU",
            Self::Ttr => "TTR",
            Self::TtrNoun => "TTR_NOUN",
            Self::TtrVerb => "TTR_VERB",
            Self::TtrAdj => "TTR_ADJ",
            Self::Nav => "NAV",
            Self::Unav => "UNAV",
            Self::M3 => "M3",
            Self::QMetric => "Q_METRIC",
        }
    }

    /// Whether this formula reads the English feature profile.
    pub const fn uses_english_profile(&self) -> bool {
        matches!(
            self,
            Self::Smog | Self::Ari | Self::DaleChall | Self::GunningFog | Self::ColemanLiau
        )
    }

    /// The metrics reported for `language` when the caller selects none.
    ///
    /// Russian defaults exclude the English family; the pipeline adds it
    /// when a translated English path is requested.
    pub fn defaults_for(language: Language) -> BTreeSet<Self> {
        let mut set: BTreeSet<Self> = Self::TTR_FAMILY.into_iter().collect();
        set.insert(Self::Fre);
        match language {
            Language::En => set.extend(Self::ENGLISH_FAMILY),
            Language::Ru => set.extend([Self::Nav, Self::Unav, Self::M3, Self::QMetric]),
            Language::Unknown => {}
        }
        set
    }

    /// Comma-separated canonical keys, for error messages.
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for MetricId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetricId {
    type Err = PipelineError;

    /// Parse a canonical key. Case-insensitive; `-` and `_` are
    /// interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|id| id.as_str().replace('-', "_") == wanted)
            .ok_or_else(|| PipelineError::UnknownMetric {
                name: s.to_string(),
                available: Self::available(),
            })
    }
}

/// Why a metric has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedReason {
    /// The text has no words.
    NoWords,
    /// The text has no sentences.
    NoSentences,
    /// No tagger covers the document's language.
    UnsupportedLanguage,
    /// The tagger failed.
    TaggerFailed,
    /// No common-word list was supplied.
    WordListUnavailable,
    /// The formula needs English text and none was available.
    NotEnglish,
    /// Translation to English failed or timed out.
    TranslationFailed,
    /// The formula produced NaN or an infinity.
    NonFinite,
}

impl From<LexicalUnavailable> for UndefinedReason {
    fn from(reason: LexicalUnavailable) -> Self {
        match reason {
            LexicalUnavailable::UnsupportedLanguage => Self::UnsupportedLanguage,
            LexicalUnavailable::TaggerFailed => Self::TaggerFailed,
        }
    }
}

/// The value of one metric, or why it has none.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MetricOutcome {
    /// A computed score.
    Score(f64),
    /// No score could be computed.
    Undefined(UndefinedReason),
}

impl MetricOutcome {
    /// The score, or 0.0 when undefined.
    pub const fn value(&self) -> f64 {
        match self {
            Self::Score(v) => *v,
            Self::Undefined(_) => 0.0,
        }
    }

    /// The score, if defined.
    pub const fn score(&self) -> Option<f64> {
        match self {
            Self::Score(v) => Some(*v),
            Self::Undefined(_) => None,
        }
    }

    /// Whether a score was computed.
    pub const fn is_defined(&self) -> bool {
        matches!(self, Self::Score(_))
    }

    fn finite(value: f64) -> Self {
        if value.is_finite() {
            Self::Score(value)
        } else {
            Self::Undefined(UndefinedReason::NonFinite)
        }
    }
}

fn require_words(f: &DerivedFeatures) -> Result<f64, MetricOutcome> {
    match f.word_count() {
        0 => Err(MetricOutcome::Undefined(UndefinedReason::NoWords)),
        n => Ok(n as f64),
    }
}

fn require_sentences(f: &DerivedFeatures) -> Result<f64, MetricOutcome> {
    match f.sentence_count() {
        0 => Err(MetricOutcome::Undefined(UndefinedReason::NoSentences)),
        n => Ok(n as f64),
    }
}

fn require_lexical(f: &DerivedFeatures) -> Result<&LexicalFeatures, MetricOutcome> {
    match &f.lexical {
        LexicalProfile::Available(lexical) => Ok(lexical),
        LexicalProfile::Unavailable { reason } => {
            Err(MetricOutcome::Undefined((*reason).into()))
        }
    }
}

fn guarded(compute: impl FnOnce() -> Result<f64, MetricOutcome>) -> MetricOutcome {
    compute().map_or_else(|undefined| undefined, MetricOutcome::finite)
}

/// Automated Readability Index.
pub fn automated_readability_index(f: &DerivedFeatures) -> MetricOutcome {
    guarded(|| {
        let words = require_words(f)?;
        let sentences = require_sentences(f)?;
        let letters = f.counts.letter_count as f64;
        Ok(4.71 * (letters / words) + 0.5 * (words / sentences) - 21.43)
    })
}

/// Coleman-Liau index.
///
/// `L` is letters per 100 words and `S` sentences per 100 words.
pub fn coleman_liau_index(f: &DerivedFeatures) -> MetricOutcome {
    guarded(|| {
        let words = require_words(f)?;
        let l = (f.counts.letter_count as f64 / words) * 100.0;
        let s = (f.sentence_count() as f64 / words) * 100.0;
        Ok(0.0588 * l - 0.296 * s - 15.8)
    })
}

/// Gunning-Fog index.
///
/// A complex word is any token longer than three characters, which
/// approximates the textbook rule of three or more syllables.
pub fn gunning_fog(f: &DerivedFeatures) -> MetricOutcome {
    guarded(|| {
        let words = require_words(f)?;
        let sentences = require_sentences(f)?;
        let complex = f.counts.complex_word_count as f64;
        Ok(0.4 * ((words / sentences) + 100.0 * (complex / words)))
    })
}

/// SMOG grade.
///
/// A polysyllable is any token longer than two characters, which
/// approximates the textbook rule of three or more syllables.
pub fn smog_index(f: &DerivedFeatures) -> MetricOutcome {
    guarded(|| {
        require_words(f)?;
        let sentences = require_sentences(f)?;
        let polysyllables = f.counts.polysyllable_count as f64;
        Ok(1.0430 * (30.0 * (polysyllables / sentences)).sqrt() + 3.1291)
    })
}

/// Dale-Chall score.
///
/// A difficult word is a token whose lowercase form is not in `common`.
pub fn dale_chall(f: &DerivedFeatures, tokens: &[Token], common: &dyn WordList) -> MetricOutcome {
    guarded(|| {
        let words = require_words(f)?;
        require_sentences(f)?;
        let difficult = tokens
            .iter()
            .filter(|t| !common.contains(&t.as_str().to_lowercase()))
            .count() as f64;
        let percentage_difficult = (difficult / words) * 100.0;
        let asl = f.asl();
        Ok(0.1579 * (percentage_difficult / asl) + 0.0496 * (asl / words))
    })
}

/// Flesch Reading Ease, for English or Russian features alike.
pub fn flesch_reading_ease(f: &DerivedFeatures) -> MetricOutcome {
    guarded(|| {
        require_words(f)?;
        Ok(206.835 - 1.015 * f.asl() - 84.6 * f.asw())
    })
}

/// M3 regression score.
pub fn m3(f: &DerivedFeatures) -> MetricOutcome {
    guarded(|| {
        require_words(f)?;
        let lexical = require_lexical(f)?;
        Ok(-9.53 + 0.25 * f.asl() + 4.98 * f.asw() + 0.89 * lexical.unav)
    })
}

/// Quadratic Q-metric over ASL, ASW, UNAV and NAV.
pub fn q_metric(f: &DerivedFeatures) -> MetricOutcome {
    guarded(|| {
        require_words(f)?;
        let lexical = require_lexical(f)?;
        let (asl, asw, unav, nav) = (f.asl(), f.asw(), lexical.unav, lexical.nav);
        Ok(-0.124 * asl + 0.018 * asw - 0.007 * unav - 0.003 * (asl * asl)
            + 0.184 * asl * asw
            + 0.097 * asl * unav
            - 0.158 * asl * nav
            + 0.09 * (asw * asw)
            + 0.091 * asw * unav
            + 0.023 * asw * nav
            - 0.157 * (unav * unav)
            - 0.079 * unav * nav
            + 0.058 * (nav * nav))
    })
}

fn lexical_ratio(f: &DerivedFeatures, pick: fn(&LexicalFeatures) -> f64) -> MetricOutcome {
    guarded(|| {
        require_words(f)?;
        Ok(pick(require_lexical(f)?))
    })
}

/// Type-token ratio over all tokens.
pub fn ttr(f: &DerivedFeatures) -> MetricOutcome {
    lexical_ratio(f, |l| l.ttr)
}

/// Type-token ratio over nouns.
pub fn ttr_noun(f: &DerivedFeatures) -> MetricOutcome {
    lexical_ratio(f, |l| l.ttr_noun)
}

/// Type-token ratio over verbs.
pub fn ttr_verb(f: &DerivedFeatures) -> MetricOutcome {
    lexical_ratio(f, |l| l.ttr_verb)
}

/// Type-token ratio over adjectives.
pub fn ttr_adjective(f: &DerivedFeatures) -> MetricOutcome {
    lexical_ratio(f, |l| l.ttr_adjective)
}

/// NAV ratio.
pub fn nav(f: &DerivedFeatures) -> MetricOutcome {
    lexical_ratio(f, |l| l.nav)
}

/// UNAV ratio.
pub fn unav(f: &DerivedFeatures) -> MetricOutcome {
    lexical_ratio(f, |l| l.unav)
}
