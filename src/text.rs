//! Text normalization and segmentation
//!
//! Cleans raw profile text before classification: alphanumeric spacing
//! repair, numeric-domination rejection, sentence and chunk splitting, and
//! the year/language pre-filters that keep junk fragments away from the
//! classifier.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use whatlang::Lang;

use crate::constants::SHORT_TEXT_TOKEN_FLOOR;

/// Letter immediately followed by a digit ("GPT4").
static ALPHA_THEN_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-zA-Z])(\d)").unwrap());

/// Digit immediately followed by a letter ("4th-gen" style fusions).
static DIGIT_THEN_ALPHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d)([a-zA-Z])").unwrap());

/// Chunk delimiters: semicolons and parentheses, runs collapsed.
static CHUNK_DELIMITERS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[;()]+").unwrap());

/// Four consecutive digits (publication years, date stamps).
static FOUR_DIGIT_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

/// Number words counted as numeric tokens alongside digit tokens.
static NUMBER_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
        "eleven", "twelve", "twenty", "thirty", "forty", "fifty", "hundred", "thousand",
        "million", "billion",
    ]
    .into_iter()
    .collect()
});

/// Abbreviations whose trailing period is not a sentence boundary.
static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "dr", "prof", "mr", "mrs", "ms", "st", "vs", "etc", "al", "et", "fig", "eq", "no",
        "vol", "pp", "cf", "ca", "approx", "dept", "univ", "e.g", "i.e",
    ]
    .into_iter()
    .collect()
});

/// Repair fused letter/digit runs and reject numeric-dominated text.
///
/// Inserts a boundary between adjacent letter and digit runs so downstream
/// tokenization does not fuse distinct tokens ("GPT4" becomes "GPT 4").
/// If more than half of the resulting tokens are numeral-like, the fragment
/// carries no classifiable content and `None` is returned.
pub fn clean_text(text: &str) -> Option<String> {
    let spaced = ALPHA_THEN_DIGIT.replace_all(text, "$1 $2");
    let spaced = DIGIT_THEN_ALPHA.replace_all(&spaced, "$1 $2");

    let tokens: Vec<&str> = spaced.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    let numeric = tokens.iter().filter(|t| is_numeral_token(t)).count();
    if numeric * 2 > tokens.len() {
        return None;
    }

    Some(spaced.trim().to_string())
}

/// Whether a single token reads as a number.
fn is_numeral_token(token: &str) -> bool {
    let stripped = token.trim_matches(|c: char| !c.is_alphanumeric());
    if stripped.is_empty() {
        return false;
    }
    if stripped.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    if stripped.replace(',', "").parse::<f64>().is_ok() {
        return true;
    }
    NUMBER_WORDS.contains(stripped.to_lowercase().as_str())
}

/// Break a sentence into smaller spans on semicolons and parentheses.
///
/// A single sentence may contain one AI-relevant clause and one irrelevant
/// one; classifying at chunk granularity keeps one clause's irrelevance from
/// diluting another's relevance score.
pub fn split_chunks(sentence: &str) -> Vec<String> {
    CHUNK_DELIMITERS
        .split(sentence)
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(str::to_string)
        .collect()
}

/// Segment prose into trimmed, non-empty sentences.
///
/// A boundary is `.`, `!` or `?` followed by whitespace (or end of text),
/// unless the preceding word is a known abbreviation or a single initial.
pub fn split_into_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    for (i, &(offset, c)) in chars.iter().enumerate() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        let followed_by_space = chars
            .get(i + 1)
            .map(|&(_, next)| next.is_whitespace())
            .unwrap_or(true);
        if !followed_by_space {
            continue;
        }
        if c == '.' && preceding_word_is_abbreviation(&text[start..offset]) {
            continue;
        }

        let end = offset + c.len_utf8();
        let sentence = text[start..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        start = end;
    }

    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }

    sentences
}

/// Whether the last word before a period looks like an abbreviation or a
/// lone initial ("J." in "J. Smith").
fn preceding_word_is_abbreviation(prefix: &str) -> bool {
    let word = prefix
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphanumeric() && c != '.');

    if word.is_empty() {
        return false;
    }
    if word.chars().count() == 1 && word.chars().all(char::is_alphabetic) {
        return true;
    }
    ABBREVIATIONS.contains(word.to_lowercase().trim_end_matches('.'))
}

/// Whether a phrase is a year reference or purely numeric.
///
/// Used to pre-reject citation-year fragments before they reach the
/// classifier, saving calls and avoiding nonsensical classifications.
pub fn is_year_or_numeric(phrase: &str) -> bool {
    let cleaned = phrase.trim().to_lowercase();
    if FOUR_DIGIT_RUN.is_match(&cleaned) {
        return true;
    }
    !cleaned.is_empty() && cleaned.chars().all(|c| c.is_ascii_digit())
}

/// Whether text is (probably) English.
///
/// Fragments under [`SHORT_TEXT_TOKEN_FLOOR`] tokens are assumed English:
/// language identifiers are unreliable on short strings, and rejecting them
/// would lose meaningful acronyms like "AI". Detection failures count as
/// not English.
pub fn is_english(text: &str) -> bool {
    if text.trim().is_empty() {
        return false;
    }
    if text.split_whitespace().count() < SHORT_TEXT_TOKEN_FLOOR {
        return true;
    }
    whatlang::detect(text)
        .map(|info| info.lang() == Lang::Eng)
        .unwrap_or(false)
}
