use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::Condition;

/// Condition labels at or above this length are treated as stray text.
pub const MAX_CONDITION_LEN: usize = 50;

// Word-bounded so that e.g. "counterparts" does not read as "parts".
static CONDITION_KEYWORDS: Lazy<Vec<(Regex, Condition)>> = Lazy::new(|| {
    [
        (r"\b(?:neuf|brand new)\b", Condition::New),
        (r"\b(?:occasion|pre-owned)\b", Condition::Used),
        (r"\b(?:reconditionné|refurbished|certified)\b", Condition::Refurbished),
        (r"\b(?:pièces|parts|broken)\b", Condition::ForParts),
    ]
    .into_iter()
    .map(|(pattern, condition)| {
        let re = Regex::new(&format!("(?i){}", pattern)).expect("Invalid condition regex");
        (re, condition)
    })
    .collect()
});

/// Clean an explicit condition label such as `"Occasion | Vendeur pro"`.
///
/// Seller info after the first `|` is dropped. Returns `None` when the
/// remainder is empty or too long to be a condition.
pub fn condition_from_label(label: &str) -> Option<String> {
    let head = label.split('|').next().unwrap_or_default();
    let cleaned = super::clean_text(head);

    if cleaned.is_empty() || cleaned.chars().count() >= MAX_CONDITION_LEN {
        None
    } else {
        Some(cleaned)
    }
}

/// Map free text to a canonical condition by keyword, checked in the order
/// new, used, refurbished, for parts.
pub fn condition_from_keywords(text: &str) -> Option<Condition> {
    CONDITION_KEYWORDS
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, condition)| *condition)
}
