//! Part-of-speech tagging.

use std::collections::HashMap;

use crate::adapters::{PosClass, TaggedToken, Token};
use crate::document::Language;
use crate::error::AdapterError;

/// Assigns a coarse part-of-speech class to each token.
///
/// Output must align 1:1 with the input. For a language the tagger does not
/// cover, `tag` returns every token as [`PosClass::Other`] instead of failing;
/// `supports` lets callers tell that apart from a real tagging.
pub trait PosTagger: Send + Sync {
    /// Whether this tagger produces meaningful classes for `language`.
    fn supports(&self, language: Language) -> bool;

    /// Tag `tokens`.
    fn tag(&self, tokens: &[Token], language: Language) -> Result<Vec<TaggedToken>, AdapterError>;
}

fn all_other(tokens: &[Token]) -> Vec<TaggedToken> {
    tokens
        .iter()
        .map(|t| TaggedToken::new(t.clone(), PosClass::Other))
        .collect()
}

/// A tagger for no language at all.
///
/// Tags everything [`PosClass::Other`], so lexical metrics come out
/// undefined rather than failing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTagger;

impl PosTagger for NullTagger {
    fn supports(&self, _language: Language) -> bool {
        false
    }

    fn tag(&self, tokens: &[Token], _language: Language) -> Result<Vec<TaggedToken>, AdapterError> {
        Ok(all_other(tokens))
    }
}

/// Dictionary tagger for a single language.
///
/// Looks each form up case-insensitively in a caller-supplied lexicon;
/// forms not in the lexicon are [`PosClass::Other`].
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    language: Language,
    lexicon: HashMap<String, PosClass>,
}

impl LexiconTagger {
    /// Create an empty lexicon for `language`.
    pub fn new(language: Language) -> Self {
        Self {
            language,
            lexicon: HashMap::new(),
        }
    }

    /// Add entries to the lexicon. Later entries replace earlier ones.
    pub fn with_entries<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PosClass)>,
        S: AsRef<str>,
    {
        self.lexicon.extend(
            entries
                .into_iter()
                .map(|(form, class)| (form.as_ref().to_lowercase(), class)),
        );
        self
    }

    /// Number of forms in the lexicon.
    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    /// Whether the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }
}

impl PosTagger for LexiconTagger {
    fn supports(&self, language: Language) -> bool {
        language == self.language
    }

    fn tag(&self, tokens: &[Token], language: Language) -> Result<Vec<TaggedToken>, AdapterError> {
        if !self.supports(language) {
            return Ok(all_other(tokens));
        }
        Ok(tokens
            .iter()
            .map(|t| {
                let class = self
                    .lexicon
                    .get(&t.as_str().to_lowercase())
                    .copied()
                    .unwrap_or(PosClass::Other);
                TaggedToken::new(t.clone(), class)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(forms: &[&str]) -> Vec<Token> {
        forms.iter().map(|f| Token::new(*f)).collect()
    }

    #[test]
    fn null_tagger_supports_nothing_and_tags_other() {
        let toks = tokens(&["the", "cat"]);
        assert!(!NullTagger.supports(Language::En));
        let tagged = NullTagger.tag(&toks, Language::En).unwrap();
        assert_eq!(tagged.len(), 2);
        assert!(tagged.iter().all(|t| t.class == PosClass::Other));
    }

    #[test]
    fn lexicon_lookup_is_case_insensitive() {
        let tagger = LexiconTagger::new(Language::Ru).with_entries([
            ("кошка", PosClass::Noun),
            ("сидела", PosClass::Verb),
            ("серая", PosClass::Adjective),
        ]);
        let tagged = tagger
            .tag(&tokens(&["Серая", "кошка", "сидела", "тихо"]), Language::Ru)
            .unwrap();
        let classes: Vec<_> = tagged.iter().map(|t| t.class).collect();
        assert_eq!(
            classes,
            vec![PosClass::Adjective, PosClass::Noun, PosClass::Verb, PosClass::Other]
        );
        // surface form preserved
        assert_eq!(tagged[0].token.as_str(), "Серая");
    }

    #[test]
    fn lexicon_tagger_degrades_for_other_languages() {
        let tagger = LexiconTagger::new(Language::Ru).with_entries([("cat", PosClass::Noun)]);
        assert!(!tagger.supports(Language::En));
        let tagged = tagger.tag(&tokens(&["cat"]), Language::En).unwrap();
        assert_eq!(tagged[0].class, PosClass::Other);
    }

    #[test]
    fn later_entries_win() {
        let tagger = LexiconTagger::new(Language::En)
            .with_entries([("run", PosClass::Noun)])
            .with_entries([("Run", PosClass::Verb)]);
        assert_eq!(tagger.len(), 1);
        let tagged = tagger.tag(&tokens(&["run"]), Language::En).unwrap();
        assert_eq!(tagged[0].class, PosClass::Verb);
    }
}
