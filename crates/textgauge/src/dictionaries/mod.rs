//! Static word tables used by segmentation and the default word list.

pub mod abbreviations;
pub mod common_words;
