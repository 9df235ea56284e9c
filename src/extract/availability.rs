use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

use super::selectors::{DETAIL_ELEMENTS, ENDED_MARKER};
use super::spaced_text;
use crate::parsers::{is_promotional, normalize_for_match};

const NEGATIVE_PHRASES: &[&str] = &[
    // French
    "vente terminée",
    "vendu",
    "plus disponible",
    "épuisé",
    "rupture",
    // English
    "out of stock",
    "sold",
    "ended",
    "no longer available",
    "sold out",
];

static ZERO_QUANTITY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"\b0\s*disponible",
        r"\b0\s*available",
        r"quantité\s*:\s*0\b",
        r"quantity\s*:\s*0\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("Invalid quantity regex"))
    .collect()
});

/// Verdict for one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Availability {
    Available,
    Promotional,
    EndedMarker,
    NegativePhrase(&'static str),
    ZeroQuantity,
}

impl Availability {
    pub fn is_available(&self) -> bool {
        matches!(self, Availability::Available)
    }
}

/// Decides from a card's own subtree whether it is a purchasable offer.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityFilter {
    sold_search: bool,
}

impl AvailabilityFilter {
    /// `sold_search` disables every rule except the promotional one.
    pub fn new(sold_search: bool) -> Self {
        Self { sold_search }
    }

    pub fn check(&self, candidate: ElementRef<'_>) -> Availability {
        let text = normalize_for_match(&spaced_text(candidate));

        if is_promotional(&text) {
            return Availability::Promotional;
        }

        if self.sold_search {
            return Availability::Available;
        }

        if candidate.select(&ENDED_MARKER).next().is_some() {
            return Availability::EndedMarker;
        }

        for detail in candidate.select(&DETAIL_ELEMENTS) {
            let detail_text = normalize_for_match(&spaced_text(detail));
            if let Some(phrase) = NEGATIVE_PHRASES.iter().copied().find(|p| detail_text.contains(p)) {
                return Availability::NegativePhrase(phrase);
            }
        }

        if ZERO_QUANTITY_PATTERNS.iter().any(|re| re.is_match(&text)) {
            return Availability::ZeroQuantity;
        }

        Availability::Available
    }
}
