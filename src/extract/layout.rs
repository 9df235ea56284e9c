use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::selectors::{GENERIC_LIST_ITEM, LEGACY_CARD, LEGACY_WRAPPER, MODERN_CARD};
use crate::error::ExtractError;
use crate::models::{CardLayout, Confidence};

/// Layout chosen for one document, plus the selector used to enumerate its
/// candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedLayout {
    pub layout: CardLayout,
    pub confidence: Confidence,
}

/// Classify a document. Modern wins over Legacy when both container
/// selectors match; the generic list-item pattern is tried last and is read
/// with the Legacy field selectors.
pub fn detect_layout(document: &Html) -> Result<DetectedLayout, ExtractError> {
    let detected = if matches_any(document, &MODERN_CARD) {
        DetectedLayout {
            layout: CardLayout::Modern,
            confidence: Confidence::Primary,
        }
    } else if matches_any(document, &LEGACY_CARD) {
        DetectedLayout {
            layout: CardLayout::Legacy,
            confidence: Confidence::Primary,
        }
    } else if matches_any(document, &GENERIC_LIST_ITEM) {
        DetectedLayout {
            layout: CardLayout::Legacy,
            confidence: Confidence::Secondary,
        }
    } else {
        return Err(ExtractError::NoListingsFound);
    };

    debug!(
        "Detected {} layout ({:?} confidence)",
        detected.layout, detected.confidence
    );
    Ok(detected)
}

fn matches_any(document: &Html, selector: &Selector) -> bool {
    document.select(selector).next().is_some()
}

impl DetectedLayout {
    fn container_selector(&self) -> &'static Selector {
        match (self.layout, self.confidence) {
            (CardLayout::Modern, _) => &*MODERN_CARD,
            (CardLayout::Legacy, Confidence::Primary) => &*LEGACY_CARD,
            (CardLayout::Legacy, Confidence::Secondary) => &*GENERIC_LIST_ITEM,
        }
    }

    /// Candidate nodes in document order.
    pub fn candidates<'a>(&self, document: &'a Html) -> Vec<ElementRef<'a>> {
        document.select(self.container_selector()).collect()
    }

    /// Structural membership check for a candidate under this layout.
    pub fn is_member(&self, element: ElementRef<'_>) -> bool {
        match self.layout {
            CardLayout::Modern => element.value().classes().any(|class| class == "s-card"),
            CardLayout::Legacy => {
                element.value().classes().any(|class| class == "s-item__wrapper")
                    || element.select(&LEGACY_WRAPPER).next().is_some()
            }
        }
    }
}
