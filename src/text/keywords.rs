// Keyword extraction for topical similarity between a brief and reference examples

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::config::constants::MAX_KEYWORDS;

/// Alphabetic runs of at least three letters (German umlauts included)
static WORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zäöüß]{3,}\b").expect("word pattern compiles"));

/// Capitalised and CamelCase compound terms ("Leadership", "KundenService")
static TERM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-ZÄÖÜ][a-zäöüß]+(?:[A-ZÄÖÜ][a-zäöüß]+)*\b").expect("term pattern compiles")
});

/// German and English function words that carry no topical signal
const STOP_WORDS: &[&str] = &[
    "der", "die", "das", "und", "in", "zu", "den", "von", "für", "mit", "auf", "ist", "im",
    "sich", "des", "ein", "eine", "als", "auch", "es", "an", "werden", "aus", "er", "hat",
    "dass", "sie", "nach", "wird", "bei", "einer", "um", "am", "sind", "noch", "wie", "einem",
    "über", "so", "zum", "kann", "nur", "sein", "ich", "nicht", "was", "oder", "aber", "wenn",
    "ihre", "man", "mehr", "neue", "neuen", "können", "durch", "diese", "dieser", "einen",
    "the", "and", "to", "of", "a", "is", "that", "it", "for", "on", "are", "with", "be",
    "this", "was", "have", "from", "your", "you", "we", "our",
];

const MIN_KEYWORD_CHARS: usize = 4;

/// Extract up to `MAX_KEYWORDS` salient terms from `text`, in first-seen order.
///
/// Never fails; returns an empty list for text without usable terms.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();

    let words = WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .filter(|w| !STOP_WORDS.contains(&w.as_str()) && w.chars().count() >= MIN_KEYWORD_CHARS);

    let terms = TERM_RE
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|t| t.chars().count() >= MIN_KEYWORD_CHARS)
        .map(str::to_lowercase);

    let mut seen = HashSet::new();
    words
        .chain(terms)
        .filter(|kw| seen.insert(kw.clone()))
        .take(MAX_KEYWORDS)
        .collect()
}
