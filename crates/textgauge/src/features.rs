//! Feature extraction: the shared substrate for every formula.
//!
//! [`FeatureExtractor`] is the single place that turns a [`Document`] into
//! [`DerivedFeatures`]. Every count and ratio is computed up front and stored
//! in an immutable value, so metrics never depend on each other or on the
//! order in which they run.
//!
//! Syllables are estimated by counting vowel letters, not by true
//! syllabification. Diphthongs, silent vowels and `y`-as-consonant are all
//! miscounted; the approximation is kept because published scores for these
//! formulas were produced with it.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::adapters::{PosClass, PosTagger, TaggedToken, Token, Tokenizer};
use crate::document::{Document, Language};
use crate::error::AdapterError;
use crate::text;

/// Vowel letters counted as syllables in Latin-script text.
const LATIN_VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// Vowel letters counted as syllables in Cyrillic-script text.
const CYRILLIC_VOWELS: &[char] = &['а', 'е', 'ё', 'и', 'о', 'у', 'ы', 'э', 'ю', 'я'];

/// Tokens longer than this many characters count as complex words.
const COMPLEX_WORD_MIN_CHARS: usize = 4;

/// Tokens with at least this many characters count as polysyllables.
const POLYSYLLABLE_MIN_CHARS: usize = 3;

/// Estimate the syllables in one word by counting vowel letters.
///
/// English counts `a e i o u y`, Russian counts `а е ё и о у ы э ю я`,
/// and unknown languages count both sets. Case-insensitive.
pub fn count_syllables(word: &str, language: Language) -> usize {
    word.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| match language {
            Language::En => LATIN_VOWELS.contains(c),
            Language::Ru => CYRILLIC_VOWELS.contains(c),
            Language::Unknown => LATIN_VOWELS.contains(c) || CYRILLIC_VOWELS.contains(c),
        })
        .count()
}

/// Raw surface counts from which the averages are derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
pub struct SurfaceCounts {
    /// Non-empty sentence spans.
    pub sentence_count: usize,
    /// Word tokens after punctuation stripping.
    pub word_count: usize,
    /// Estimated syllables across all words.
    pub syllable_count: usize,
    /// Characters across all words.
    pub letter_count: usize,
    /// Words longer than three characters.
    pub complex_word_count: usize,
    /// Words longer than two characters, the SMOG polysyllable stand-in.
    pub polysyllable_count: usize,
}

/// Type-token ratios and the part-of-speech composites built on them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct LexicalFeatures {
    /// Unique forms / total forms over all tokens.
    pub ttr: f64,
    /// Type-token ratio over nouns.
    pub ttr_noun: f64,
    /// Type-token ratio over verbs.
    pub ttr_verb: f64,
    /// Type-token ratio over adjectives.
    pub ttr_adjective: f64,
    /// `(ttr_adjective + ttr_noun) / ttr_verb`, 0 when there are no verbs.
    pub nav: f64,
    /// Unique nouns-and-adjectives / unique verbs (case-folded), 0 when
    /// there are no verbs.
    pub unav: f64,
}

impl LexicalFeatures {
    /// Compute every lexical ratio from a tagged token sequence.
    ///
    /// Type-token ratios compare forms as written. UNAV folds case before
    /// counting unique forms.
    pub fn from_tagged(tagged: &[TaggedToken]) -> Self {
        let forms_of = |class: PosClass| -> Vec<&str> {
            tagged
                .iter()
                .filter(|t| t.class == class)
                .map(|t| t.token.as_str())
                .collect()
        };
        let all: Vec<&str> = tagged.iter().map(|t| t.token.as_str()).collect();
        let nouns = forms_of(PosClass::Noun);
        let verbs = forms_of(PosClass::Verb);
        let adjectives = forms_of(PosClass::Adjective);

        let ttr = type_token_ratio(&all);
        let ttr_noun = type_token_ratio(&nouns);
        let ttr_verb = type_token_ratio(&verbs);
        let ttr_adjective = type_token_ratio(&adjectives);

        let nav = if ttr_verb == 0.0 {
            0.0
        } else {
            (ttr_adjective + ttr_noun) / ttr_verb
        };

        let folded = |forms: &[&str]| -> HashSet<String> {
            forms.iter().map(|f| f.to_lowercase()).collect()
        };
        let unique_verbs = folded(&verbs).len();
        let mut nouns_and_adjectives = folded(&nouns);
        nouns_and_adjectives.extend(folded(&adjectives));
        let unav = if unique_verbs == 0 {
            0.0
        } else {
            nouns_and_adjectives.len() as f64 / unique_verbs as f64
        };

        Self {
            ttr,
            ttr_noun,
            ttr_verb,
            ttr_adjective,
            nav,
            unav,
        }
    }
}

/// Unique forms divided by total forms; 0 for an empty sequence.
pub fn type_token_ratio(forms: &[&str]) -> f64 {
    if forms.is_empty() {
        return 0.0;
    }
    let types: HashSet<&str> = forms.iter().copied().collect();
    types.len() as f64 / forms.len() as f64
}

/// Why lexical features could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LexicalUnavailable {
    /// The tagger does not cover the document's language.
    UnsupportedLanguage,
    /// The tagger failed or returned misaligned output.
    TaggerFailed,
}

/// Lexical features, or the reason they are missing.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LexicalProfile {
    /// Tagging succeeded.
    Available(LexicalFeatures),
    /// Tagging was not possible.
    Unavailable {
        /// Why.
        reason: LexicalUnavailable,
    },
}

impl LexicalProfile {
    /// The features, if available.
    pub const fn features(&self) -> Option<&LexicalFeatures> {
        match self {
            Self::Available(features) => Some(features),
            Self::Unavailable { .. } => None,
        }
    }
}

/// Every derived quantity for one document.
///
/// Built only through [`DerivedFeatures::from_counts`], which computes the
/// averages from the counts, so no field can be read before the fields it
/// depends on exist.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[non_exhaustive]
pub struct DerivedFeatures {
    /// Language the counts were taken in.
    pub language: Language,
    /// Surface counts.
    pub counts: SurfaceCounts,
    /// Words per sentence (ASL); 0 when there are no sentences.
    pub average_sentence_length: f64,
    /// Syllables per word (ASW); 0 when there are no words.
    pub average_syllables_per_word: f64,
    /// Part-of-speech based features.
    pub lexical: LexicalProfile,
}

impl DerivedFeatures {
    /// Derive the averages from `counts` and assemble the value.
    pub fn from_counts(language: Language, counts: SurfaceCounts, lexical: LexicalProfile) -> Self {
        let average_sentence_length = if counts.sentence_count == 0 {
            0.0
        } else {
            counts.word_count as f64 / counts.sentence_count as f64
        };
        let average_syllables_per_word = if counts.word_count == 0 {
            0.0
        } else {
            counts.syllable_count as f64 / counts.word_count as f64
        };

        Self {
            language,
            counts,
            average_sentence_length,
            average_syllables_per_word,
            lexical,
        }
    }

    /// Shorthand for `counts.sentence_count`.
    pub const fn sentence_count(&self) -> usize {
        self.counts.sentence_count
    }

    /// Shorthand for `counts.word_count`.
    pub const fn word_count(&self) -> usize {
        self.counts.word_count
    }

    /// ASL.
    pub const fn asl(&self) -> f64 {
        self.average_sentence_length
    }

    /// ASW.
    pub const fn asw(&self) -> f64 {
        self.average_syllables_per_word
    }
}

/// Features plus the token sequence they were computed from.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TextProfile {
    /// The derived features.
    pub features: DerivedFeatures,
    /// Word tokens in appearance order.
    pub tokens: Vec<Token>,
}

/// Turns documents into [`DerivedFeatures`] using injected adapters.
pub struct FeatureExtractor<'a> {
    tokenizer: &'a dyn Tokenizer,
    tagger: &'a dyn PosTagger,
}

impl<'a> FeatureExtractor<'a> {
    /// Create an extractor over the given adapters.
    pub fn new(tokenizer: &'a dyn Tokenizer, tagger: &'a dyn PosTagger) -> Self {
        Self { tokenizer, tagger }
    }

    /// Compute the derived features of `document`.
    pub fn extract(&self, document: &Document) -> DerivedFeatures {
        self.profile(document).features
    }

    /// Compute features and keep the tokens for token-level metrics.
    #[tracing::instrument(skip_all, fields(language = %document.language(), text_len = document.text().len()))]
    pub fn profile(&self, document: &Document) -> TextProfile {
        let language = document.language();
        let text = document.text();

        let (sentence_count, tokens) = if document.is_blank() {
            (0, Vec::new())
        } else {
            let sentence_count = self
                .tokenizer
                .segment_sentences(text, language)
                .iter()
                .filter(|s| !s.trim().is_empty())
                .count();

            // External tokenizers may leave punctuation attached or emit it as
            // separate tokens; normalize both.
            let tokens: Vec<Token> = self
                .tokenizer
                .tokenize_words(text, language)
                .iter()
                .map(|t| text::strip_punctuation(t.as_str()))
                .filter(|form| !form.is_empty())
                .map(Token::new)
                .collect();
            (sentence_count, tokens)
        };

        let mut counts = SurfaceCounts {
            sentence_count,
            word_count: tokens.len(),
            ..SurfaceCounts::default()
        };
        for token in &tokens {
            let chars = token.char_len();
            let syllables = count_syllables(token.as_str(), language);
            counts.letter_count += chars;
            counts.syllable_count += syllables;
            if chars >= COMPLEX_WORD_MIN_CHARS {
                counts.complex_word_count += 1;
            }
            if chars >= POLYSYLLABLE_MIN_CHARS {
                counts.polysyllable_count += 1;
            }
        }

        if counts.word_count == 0 || counts.sentence_count == 0 {
            tracing::debug!(
                words = counts.word_count,
                sentences = counts.sentence_count,
                "degenerate input, averages default to zero"
            );
        }

        let lexical = self.lexical_profile(&tokens, language);
        let features = DerivedFeatures::from_counts(language, counts, lexical);
        tracing::debug!(
            words = counts.word_count,
            sentences = counts.sentence_count,
            syllables = counts.syllable_count,
            asl = features.average_sentence_length,
            asw = features.average_syllables_per_word,
            "features extracted"
        );

        TextProfile { features, tokens }
    }

    fn lexical_profile(&self, tokens: &[Token], language: Language) -> LexicalProfile {
        if !self.tagger.supports(language) {
            return LexicalProfile::Unavailable {
                reason: LexicalUnavailable::UnsupportedLanguage,
            };
        }

        let tagged = self.tagger.tag(tokens, language).and_then(|tagged| {
            if tagged.len() == tokens.len() {
                Ok(tagged)
            } else {
                Err(AdapterError::Misaligned {
                    expected: tokens.len(),
                    actual: tagged.len(),
                })
            }
        });

        match tagged {
            Ok(tagged) => LexicalProfile::Available(LexicalFeatures::from_tagged(&tagged)),
            Err(err) => {
                tracing::warn!(error = %err, %language, "tagging failed, lexical features unavailable");
                LexicalProfile::Unavailable {
                    reason: LexicalUnavailable::TaggerFailed,
                }
            }
        }
    }
}
