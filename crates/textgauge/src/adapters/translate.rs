//! Translation of non-English text for the English-formula path.
//!
//! Translation is the only operation in the pipeline that may block on an
//! external service. It is always bounded by a timeout, and any failure only
//! disables the English formulas for that evaluation.

use std::time::Duration;

use async_trait::async_trait;

use crate::document::Language;
use crate::error::TranslationError;

/// Converts text into English.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` written in `source` into English.
    ///
    /// Returns [`TranslationError::NotApplicable`] when there is nothing to
    /// translate (English input, or a source language the service declines).
    async fn translate_to_english(
        &self,
        text: &str,
        source: Language,
    ) -> Result<String, TranslationError>;
}

/// Run `translator` with an upper bound on how long it may take.
///
/// English input short-circuits to [`TranslationError::NotApplicable`]
/// without calling the translator.
#[tracing::instrument(skip(translator, text), fields(text_len = text.len()))]
pub async fn translate_with_timeout(
    translator: &dyn Translator,
    text: &str,
    source: Language,
    timeout: Duration,
) -> Result<String, TranslationError> {
    if source == Language::En {
        return Err(TranslationError::NotApplicable(source));
    }

    match tokio::time::timeout(timeout, translator.translate_to_english(text, source)).await {
        Ok(Ok(translated)) => {
            tracing::debug!(translated_len = translated.len(), "translation complete");
            Ok(translated)
        }
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "translation failed");
            Err(err)
        }
        Err(_) => {
            tracing::warn!(?timeout, "translation timed out");
            Err(TranslationError::TimedOut(timeout))
        }
    }
}

/// Translator that returns a fixed English text for every non-English input.
///
/// A test double for exercising the English path without a service.
#[derive(Debug, Clone)]
pub struct StaticTranslator {
    english: String,
}

impl StaticTranslator {
    /// Always answer with `english`.
    pub fn new(english: impl Into<String>) -> Self {
        Self {
            english: english.into(),
        }
    }
}

#[async_trait]
impl Translator for StaticTranslator {
    async fn translate_to_english(
        &self,
        _text: &str,
        source: Language,
    ) -> Result<String, TranslationError> {
        if source == Language::En {
            return Err(TranslationError::NotApplicable(source));
        }
        Ok(self.english.clone())
    }
}
