//! Sentence segmentation and word tokenization.

use crate::adapters::Token;
use crate::document::Language;
use crate::text;

/// Splits text into sentences and words.
///
/// Implementations must return spans and tokens in appearance order, strip
/// surrounding punctuation from word forms without discarding the word, and
/// return empty sequences (not errors) for empty input.
pub trait Tokenizer: Send + Sync {
    /// Split `text` into sentence spans.
    fn segment_sentences(&self, text: &str, language: Language) -> Vec<String>;

    /// Split `text` into word tokens.
    fn tokenize_words(&self, text: &str, language: Language) -> Vec<Token>;
}

/// Context-aware rule tokenizer.
///
/// Sentence boundaries honour abbreviations, initials, decimals, ellipses,
/// URLs and emails for English and Russian. Words are whitespace-separated
/// forms with edge punctuation stripped.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleTokenizer;

impl Tokenizer for RuleTokenizer {
    fn segment_sentences(&self, text: &str, language: Language) -> Vec<String> {
        text::split_sentences(text, language)
    }

    fn tokenize_words(&self, text: &str, _language: Language) -> Vec<Token> {
        text::extract_words(text).into_iter().map(Token::new).collect()
    }
}

/// Naive tokenizer: sentences end at every `.`, words are whitespace runs.
///
/// Useful as a predictable test double and for reproducing scores computed
/// with the period-only rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn segment_sentences(&self, text: &str, _language: Language) -> Vec<String> {
        text::split_on_periods(text)
    }

    fn tokenize_words(&self, text: &str, _language: Language) -> Vec<Token> {
        text::extract_words(text).into_iter().map(Token::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forms(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(Token::as_str).collect()
    }

    #[test]
    fn rule_tokenizer_splits_on_all_terminators() {
        let tok = RuleTokenizer;
        let sentences = tok.segment_sentences("Wait! Is it done? Yes.", Language::En);
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn whitespace_tokenizer_splits_on_periods_only() {
        let tok = WhitespaceTokenizer;
        let sentences = tok.segment_sentences("Wait! Is it done? Yes.", Language::En);
        assert_eq!(sentences, vec!["Wait! Is it done? Yes"]);
    }

    #[test]
    fn both_tokenizers_strip_punctuation() {
        let text = "«Кошка», сказал он.";
        for tokens in [
            RuleTokenizer.tokenize_words(text, Language::Ru),
            WhitespaceTokenizer.tokenize_words(text, Language::Ru),
        ] {
            assert_eq!(forms(&tokens), vec!["Кошка", "сказал", "он"]);
        }
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(RuleTokenizer.segment_sentences("", Language::En).is_empty());
        assert!(RuleTokenizer.tokenize_words("", Language::En).is_empty());
        assert!(WhitespaceTokenizer.segment_sentences("", Language::Ru).is_empty());
        assert!(WhitespaceTokenizer.tokenize_words("  ", Language::Ru).is_empty());
    }
}
