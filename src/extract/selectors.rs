//! CSS selectors for marketplace search-result cards.
//!
//! Chains are evaluated selector by selector: the first selector that matches
//! anything wins, regardless of where its match sits in the document.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Selector};

/// Ordered selector fallbacks for one field.
#[derive(Debug)]
pub struct SelectorChain {
    selectors: Vec<Selector>,
}

impl SelectorChain {
    fn new(patterns: &[&str]) -> Self {
        Self {
            selectors: patterns.iter().map(|p| selector(p)).collect(),
        }
    }

    /// First element under `scope` matched by the earliest selector that
    /// matches at all.
    pub fn first_match<'a>(&self, scope: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.selectors
            .iter()
            .find_map(|selector| scope.select(selector).next())
    }
}

fn selector(pattern: &str) -> Selector {
    Selector::parse(pattern).expect("Invalid built-in selector")
}

// Layout containers
pub static MODERN_CARD: Lazy<Selector> = Lazy::new(|| selector(".s-card"));
pub static LEGACY_CARD: Lazy<Selector> = Lazy::new(|| selector(".s-item"));
pub static GENERIC_LIST_ITEM: Lazy<Selector> = Lazy::new(|| selector("li[data-view='mi:1686']"));
pub static LEGACY_WRAPPER: Lazy<Selector> = Lazy::new(|| selector(".s-item__wrapper"));

// Availability
pub static ENDED_MARKER: Lazy<Selector> = Lazy::new(|| selector(".s-item__ended-date"));
pub static DETAIL_ELEMENTS: Lazy<Selector> = Lazy::new(|| {
    selector(".s-item__detail, .s-card__subtitle, .s-item__subtitle, [class*='detail']")
});

// Title
pub static MODERN_TITLE: Lazy<Selector> = Lazy::new(|| selector(".s-card__title"));
pub static LEGACY_INFO: Lazy<Selector> = Lazy::new(|| selector(".s-item__info"));
pub static LEGACY_TITLE: Lazy<SelectorChain> =
    Lazy::new(|| SelectorChain::new(&[".s-item__title", "h3"]));

pub static PRICE: Lazy<SelectorChain> = Lazy::new(|| {
    SelectorChain::new(&[
        ".s-item__price",
        ".s-item__price--new",
        ".POSITIVE",
        ".STRIKETHROUGH",
        ".s-card__price",
    ])
});

pub static DATE: Lazy<SelectorChain> = Lazy::new(|| {
    SelectorChain::new(&[
        ".s-item__caption",
        ".s-item__detail--secondary",
        ".s-item__ended-date",
        "[class*='date']",
    ])
});

pub static CONDITION: Lazy<SelectorChain> = Lazy::new(|| {
    SelectorChain::new(&[
        ".s-card__subtitle",
        ".SECONDARY_INFO",
        ".s-item__subtitle",
        "[class*='condition']",
        ".s-item__detail--secondary",
    ])
});

pub static LINK: Lazy<SelectorChain> =
    Lazy::new(|| SelectorChain::new(&["a.s-card__link", "a.s-item__link", "a"]));

pub static IMAGE: Lazy<Selector> = Lazy::new(|| selector("img"));
