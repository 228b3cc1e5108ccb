//! Rule-based sentence splitting and word extraction.
//!
//! These are the default segmentation rules behind
//! [`RuleTokenizer`](crate::adapters::tokenizer::RuleTokenizer). They know
//! about abbreviations, initials, decimals, URLs and emails in both English
//! and Russian text.

use regex::Regex;
use std::sync::LazyLock;

use crate::dictionaries::abbreviations::is_abbreviation;
use crate::document::Language;

/// Regex for decimal numbers (3.14, 2.5, etc.).
static DECIMAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+").expect("valid regex"));

/// Regex for URLs.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+").expect("valid regex"));

/// Regex for email addresses.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid regex")
});

/// Regex for initials in Latin or Cyrillic script (J.K., А.Ф., etc.).
static INITIALS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-ZА-ЯЁ]\.(?:[A-ZА-ЯЁ]\.)*").expect("valid regex"));

/// Split text into sentences.
///
/// Boundaries are `.`, `!` and `?`, filtered through context checks so that
/// abbreviations, initials, decimals, ellipses, URLs and emails do not end a
/// sentence. Spans without any letter or digit are dropped.
#[tracing::instrument(skip(text), fields(text_len = text.len()))]
pub fn split_sentences(text: &str, language: Language) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut sentences = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = text.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        current.push(ch);

        if is_sentence_terminator(ch) {
            let context = extract_context(&chars, i);
            if is_sentence_boundary(&context, &current, language) {
                push_sentence(&mut sentences, &current);
                current.clear();
            }
        }
    }

    push_sentence(&mut sentences, &current);
    sentences
}

/// Split on periods only, keeping every non-empty trimmed span.
///
/// This is the naive rule some corpora were scored with; it is exposed for
/// [`WhitespaceTokenizer`](crate::adapters::tokenizer::WhitespaceTokenizer).
pub fn split_on_periods(text: &str) -> Vec<String> {
    text.split('.')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract words from text in appearance order, splitting on whitespace and
/// stripping surrounding punctuation. Case is preserved.
pub fn extract_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(strip_punctuation)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strip punctuation from both ends of a word form.
///
/// Everything that is not a letter or digit is trimmed from the edges:
/// `,.!?;:()«»`, straight and typographic quotes, dashes, brackets.
/// Inner characters (hyphens, apostrophes) are kept.
pub fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| !c.is_alphanumeric())
}

fn push_sentence(sentences: &mut Vec<String>, span: &str) {
    let sentence = span.trim();
    if sentence.chars().any(char::is_alphanumeric) {
        sentences.push(sentence.to_string());
    }
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

/// Context around a potential sentence boundary.
struct SentenceContext {
    punctuation: char,
    word_before: String,
    char_after: Option<char>,
    text_after: String,
    is_end_of_text: bool,
}

fn extract_context(chars: &[char], pos: usize) -> SentenceContext {
    let mut after_start = pos + 1;
    while after_start < chars.len() && chars[after_start].is_whitespace() {
        after_start += 1;
    }

    SentenceContext {
        punctuation: chars[pos],
        word_before: word_before(chars, pos),
        char_after: chars.get(after_start).copied(),
        text_after: chars[after_start.min(chars.len())..].iter().take(20).collect(),
        is_end_of_text: pos == chars.len() - 1,
    }
}

fn word_before(chars: &[char], pos: usize) -> String {
    let mut i = pos;

    // Skip back past periods and whitespace
    while i > 0 {
        i -= 1;
        if !chars[i].is_whitespace() && chars[i] != '.' {
            break;
        }
    }

    let mut word_chars = Vec::new();
    loop {
        if chars[i].is_alphanumeric() || chars[i] == '.' {
            word_chars.push(chars[i]);
        } else {
            break;
        }
        if i == 0 {
            break;
        }
        i -= 1;
    }

    word_chars.iter().rev().collect()
}

fn is_sentence_boundary(context: &SentenceContext, current: &str, language: Language) -> bool {
    if context.is_end_of_text {
        return true;
    }

    // ! and ? end a sentence unless a lowercase continuation follows
    if context.punctuation == '!' || context.punctuation == '?' {
        return next_starts_sentence(context);
    }

    if is_likely_abbreviation(&context.word_before, language)
        || is_likely_initial(&context.word_before)
        || ends_with_decimal(current)
        || current.ends_with("...")
        || contains_url_or_email(current)
    {
        return false;
    }

    // Digit after a period that follows a digit: 3.14
    if let Some(next) = context.char_after
        && next.is_ascii_digit()
        && context
            .word_before
            .chars()
            .last()
            .is_some_and(|c| c.is_ascii_digit())
    {
        return false;
    }

    match context.char_after {
        Some(next) if next.is_lowercase() => false,
        _ => true,
    }
}

fn next_starts_sentence(context: &SentenceContext) -> bool {
    match context.char_after {
        Some(next) if next.is_lowercase() => false,
        Some('"' | '\'' | '«' | '“') => context
            .text_after
            .chars()
            .nth(1)
            .is_none_or(|c| !c.is_lowercase()),
        _ => true,
    }
}

fn is_likely_abbreviation(word: &str, language: Language) -> bool {
    if word.is_empty() {
        return false;
    }
    let cleaned = word.trim_end_matches('.');
    if is_abbreviation(cleaned, language) {
        return true;
    }
    // Single uppercase letter = likely initial
    let mut letters = cleaned.chars();
    matches!((letters.next(), letters.next()), (Some(c), None) if c.is_uppercase())
}

fn is_likely_initial(word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    let mut letters = word.chars();
    if let (Some(first), Some('.'), None) = (letters.next(), letters.next(), letters.next())
        && first.is_uppercase()
    {
        return true;
    }
    INITIALS_PATTERN.is_match(word)
}

fn tail(sentence: &str, count: usize) -> String {
    let skip = sentence.chars().count().saturating_sub(count);
    sentence.chars().skip(skip).collect()
}

fn ends_with_decimal(sentence: &str) -> bool {
    DECIMAL_PATTERN.is_match(&tail(sentence, 10))
}

fn contains_url_or_email(sentence: &str) -> bool {
    let last_part = tail(sentence, 50);
    URL_PATTERN.is_match(&last_part) || EMAIL_PATTERN.is_match(&last_part)
}
