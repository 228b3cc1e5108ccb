//! Abbreviation tables for sentence boundary detection.
//!
//! A period after one of these does not end a sentence. Entries are stored
//! lowercase without the trailing period.

use std::collections::HashSet;
use std::sync::LazyLock;

use crate::document::Language;

/// English abbreviations.
pub static ENGLISH: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // Titles and honorifics
    set.extend([
        "mr", "mrs", "ms", "dr", "prof", "rev", "fr", "sr", "jr", "hon", "esq", "capt", "col",
        "gen", "lt", "maj", "sgt", "sen", "rep", "gov", "pres",
    ]);

    // Degrees and Latin
    set.extend([
        "ph.d", "m.d", "b.a", "m.a", "etc", "vs", "e.g", "i.e", "cf", "viz", "ibid", "al",
    ]);

    // Dates and places
    set.extend([
        "a.m", "p.m", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct",
        "nov", "dec", "st", "ave", "blvd", "rd", "u.s", "u.k", "inc", "corp", "ltd", "co",
    ]);

    // References and units
    set.extend([
        "vol", "no", "pp", "fig", "eq", "approx", "ch", "ed", "ft", "lb", "oz",
    ]);

    set
});

/// Russian abbreviations (сокращения).
pub static RUSSIAN: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // т.е., т.д., т.п., т.к. and similar
    set.extend([
        "т", "т.е", "т.д", "т.п", "т.к", "т.н", "т.о", "и.о", "др", "пр", "см", "ср", "напр",
    ]);

    // Titles and ranks
    set.extend(["г", "гг", "акад", "проф", "доц", "им", "тов", "гр"]);

    // Addresses, references, units
    set.extend([
        "ул", "пер", "просп", "д", "кв", "обл", "стр", "с", "рис", "табл", "гл", "ч", "п", "вып",
        "изд", "руб", "коп", "тыс", "млн", "млрд", "км", "кг", "мин", "сек", "в", "вв",
    ]);

    set
});

/// Check whether `word` (with or without trailing period) is a known
/// abbreviation for `language`. Unknown languages consult both tables.
pub fn is_abbreviation(word: &str, language: Language) -> bool {
    let lower = word.to_lowercase();
    let trimmed = lower.trim_matches('.');
    match language {
        Language::En => ENGLISH.contains(trimmed),
        Language::Ru => RUSSIAN.contains(trimmed),
        Language::Unknown => ENGLISH.contains(trimmed) || RUSSIAN.contains(trimmed),
    }
}
