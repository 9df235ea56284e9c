use once_cell::sync::Lazy;
use regex::Regex;

const ACCESSIBILITY_PHRASES: &[&str] = &[
    "La page s'ouvre dans une nouvelle fenêtre ou un nouvel onglet",
    "Opens in a new window or tab",
];

const PROMOTIONAL_PHRASES: &[&str] = &["shop on ebay", "boutique sur ebay"];

static NEW_LISTING_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:Nouvelle annonce|New Listing)\s*")
        .expect("Invalid new-listing prefix regex")
});

/// Strip screen-reader boilerplate and "new listing" prefixes from a raw
/// card title. The result may be empty.
pub fn clean_title(raw: &str) -> String {
    let mut title = raw.to_string();
    for phrase in ACCESSIBILITY_PHRASES {
        title = title.replace(phrase, "");
    }

    let title = super::clean_text(&title);
    NEW_LISTING_PREFIX.replace(&title, "").trim().to_string()
}

/// True when the text carries the marketplace's "shop on site" placeholder.
pub fn is_promotional(text: &str) -> bool {
    let lowered = text.to_lowercase();
    PROMOTIONAL_PHRASES.iter().any(|phrase| lowered.contains(phrase))
}
