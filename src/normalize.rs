//! Free-text canonicalization for cross-system comparisons
//!
//! Sector and equipment labels come from two sources that never agree on
//! accents, casing, or zero-padding ("Depósito 3" locally vs "deposito 03"
//! in the registry). Every equality or containment check between the two
//! systems goes through [`normalize`] on both sides.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize free text for comparison.
///
/// Lowercases, strips diacritics via NFD decomposition, drops every
/// character outside `[a-z0-9 ]`, zero-pads standalone single digits 1-9
/// to two digits, collapses whitespace runs, and trims. Idempotent.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();

    let mut tokens = Vec::new();
    for token in cleaned.split_whitespace() {
        tokens.push(pad_single_digit(token));
    }
    tokens.join(" ")
}

/// Zero-pad a token that is exactly one digit 1-9. Digits inside longer
/// tokens ("10", "a3") are left alone so already-padded labels are stable.
fn pad_single_digit(token: &str) -> String {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_digit() && c != '0' => format!("0{c}"),
        _ => token.to_string(),
    }
}
