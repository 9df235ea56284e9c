use serde::{Deserialize, Serialize};
use std::fmt;

use super::{CardLayout, Confidence};
use crate::extract::RetryState;

/// Canonical condition labels used when no explicit condition text is found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    New,
    Used,
    Refurbished,
    ForParts,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::New => write!(f, "Neuf"),
            Condition::Used => write!(f, "Occasion"),
            Condition::Refurbished => write!(f, "Reconditionné"),
            Condition::ForParts => write!(f, "Pour pièces"),
        }
    }
}

/// One validated listing.
///
/// Only constructed for candidates with a non-empty title and a price above
/// zero; missing optional fields hold the `N/A` / `#` sentinels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub title: String,
    pub price: f64,
    pub shipping: f64,
    pub total_price: f64,
    pub date: String,
    pub condition: String,
    pub link: String,
    pub image: String,
    pub source: String,
}

/// Why an extraction pass produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyReason {
    /// Neither the layout containers nor the secondary pattern matched.
    NoListingsFound,
    /// Too few raw candidates to trust the page; assembly was skipped.
    TooFewCandidates,
    /// Every candidate was excluded by the availability filter.
    AllUnavailable,
    /// Candidates were found but none had both a title and a price.
    AllRejected,
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NoListingsFound => write!(f, "no listing containers detected"),
            EmptyReason::TooFewCandidates => {
                write!(f, "too few candidates, page blocked or selectors out of date")
            }
            EmptyReason::AllUnavailable => write!(f, "all listings unavailable or ended"),
            EmptyReason::AllRejected => write!(f, "all listings missing a title or price"),
        }
    }
}

/// Result of one engine pass over one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOutcome {
    /// Records in document order.
    pub records: Vec<ListingRecord>,
    pub skipped_unavailable: usize,
    /// Candidates dropped for a missing or promotional title, or no price.
    pub rejected: usize,
    pub raw_candidate_count: usize,
    pub layout: Option<CardLayout>,
    pub confidence: Option<Confidence>,
    /// Set when the caller should re-fetch this URL and run the engine again.
    pub retry_url: Option<String>,
}

impl ExtractionOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn empty_reason(&self) -> Option<EmptyReason> {
        if !self.records.is_empty() {
            return None;
        }

        if self.raw_candidate_count == 0 || self.layout.is_none() {
            Some(EmptyReason::NoListingsFound)
        } else if RetryState::is_triggered(self.raw_candidate_count) {
            Some(EmptyReason::TooFewCandidates)
        } else if self.skipped_unavailable > 0 && self.rejected == 0 {
            Some(EmptyReason::AllUnavailable)
        } else {
            Some(EmptyReason::AllRejected)
        }
    }
}
