//! Title-casing for free-text names and addresses
//!
//! Source text is upper case. Tokens are checked in a fixed order: known
//! acronyms, ordinals, word-plus-digit codes, dotted abbreviations, then
//! plain words.

use regex::Regex;
use std::sync::LazyLock;

/// Tokens passed through untouched
const ACRONYMS: &[&str] = &["KPMG", "P.O.", "PO", "LLP"];

static ORDINAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\d+(?:st|nd|rd|th)|\d+[a-z])$").expect("valid ordinal pattern")
});

static WORD_WITH_DIGITS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z]+-?\d+$").expect("valid word with digits pattern")
});

static DOTTED_ABBREVIATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w\.\w").expect("valid dotted abbreviation pattern"));

/// Title-case a line of free text word by word
pub fn convert_to_title_case(text: &str) -> String {
    text.split(' ')
        .map(convert_token)
        .collect::<Vec<_>>()
        .join(" ")
}

fn convert_token(token: &str) -> String {
    if token.is_empty() || ACRONYMS.contains(&token) {
        return token.to_string();
    }
    if ORDINAL.is_match(token) {
        return token.to_lowercase();
    }
    if WORD_WITH_DIGITS.is_match(token) {
        return token.to_string();
    }
    if DOTTED_ABBREVIATION.is_match(token) {
        return token
            .split('.')
            .map(capitalise)
            .collect::<Vec<_>>()
            .join(".");
    }
    capitalise(token)
}

/// Lower-case a word and upper-case its first letter
fn capitalise(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut capitalised = String::with_capacity(lower.len());
    let mut done = false;
    for c in lower.chars() {
        if !done && c.is_alphabetic() {
            capitalised.extend(c.to_uppercase());
            done = true;
        } else {
            capitalised.push(c);
        }
    }
    capitalised
}
