//! Built-in list of familiar English words.
//!
//! A compact stand-in for the Dale-Chall familiar-word list: function words
//! plus the most frequent everyday nouns, verbs, and adjectives. Callers
//! scoring real corpora should load the full list from a file instead.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Familiar English words, lowercase.
pub static BASIC_ENGLISH: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // Function words
    set.extend([
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
        "are", "as", "at", "be", "because", "been", "before", "being", "below", "between",
        "both", "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during",
        "each", "few", "for", "from", "further", "had", "has", "have", "having", "he", "her",
        "here", "hers", "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is",
        "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not",
        "now", "of", "off", "on", "once", "only", "or", "other", "our", "ours", "out", "over",
        "own", "same", "she", "should", "so", "some", "such", "than", "that", "the", "their",
        "them", "then", "there", "these", "they", "this", "those", "through", "to", "too",
        "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
        "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours",
    ]);

    // Everyday nouns
    set.extend([
        "air", "animal", "apple", "arm", "baby", "bag", "ball", "bed", "bird", "boat", "body",
        "book", "box", "boy", "bread", "brother", "car", "cat", "chair", "child", "children",
        "city", "day", "dog", "door", "egg", "eye", "face", "family", "farm", "father", "fire",
        "fish", "floor", "flower", "food", "foot", "friend", "game", "garden", "girl", "hand",
        "head", "home", "horse", "house", "man", "men", "milk", "money", "morning", "mother",
        "name", "night", "paper", "people", "place", "rain", "road", "room", "school", "sea",
        "sister", "snow", "song", "street", "sun", "table", "teacher", "thing", "time", "town",
        "tree", "water", "way", "window", "woman", "women", "word", "work", "world", "year",
    ]);

    // Everyday verbs
    set.extend([
        "ask", "came", "come", "cut", "eat", "fall", "find", "fly", "gave", "get", "give", "go",
        "going", "got", "grow", "help", "hold", "jump", "keep", "know", "laugh", "let", "like",
        "live", "look", "made", "make", "may", "must", "open", "play", "put", "ran", "read",
        "ride", "run", "said", "sat", "saw", "say", "see", "sing", "sit", "sleep", "stand",
        "stop", "take", "tell", "think", "try", "walk", "want", "went", "wish", "write",
    ]);

    // Everyday adjectives and adverbs
    set.extend([
        "bad", "big", "black", "blue", "cold", "dark", "early", "fast", "first", "good", "great",
        "green", "happy", "hot", "last", "late", "little", "long", "new", "nice", "old", "red",
        "right", "sad", "slow", "small", "soft", "warm", "well", "white", "yellow", "young",
    ]);

    set
});
