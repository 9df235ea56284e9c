//! Listing extraction engine.
//!
//! One call takes the raw HTML of a search-result page and its source URL and
//! returns an [`ExtractionOutcome`]. The engine performs no I/O: when a sold
//! search looks blocked it returns a rewritten URL for the caller to fetch.

pub mod availability;
pub mod fields;
pub mod layout;
pub mod query;
pub mod retry;
pub mod selectors;

pub use availability::{Availability, AvailabilityFilter};
pub use fields::{
    Candidate, ConditionField, DateField, FieldExtractor, ImageField, LinkField, PriceField,
    TitleField,
};
pub use layout::{detect_layout, DetectedLayout};
pub use query::SearchQuery;
pub use retry::{RetryState, RETRY_TRIGGER_MAX_CANDIDATES};

use scraper::{ElementRef, Html};
use tracing::{debug, info, warn};

use crate::error::ExtractError;
use crate::models::{ExtractionOutcome, ListingRecord, NOT_AVAILABLE, NO_LINK, SOURCE_TAG};
use crate::parsers::DatePatternTable;

/// Text nodes concatenated as-is.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}

/// Trimmed text nodes joined with single spaces.
pub(crate) fn spaced_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The full pipeline: layout detection, availability gate, field extraction,
/// validation and the retry decision.
#[derive(Debug, Clone, Default)]
pub struct ListingExtractor {
    title: TitleField,
    price: PriceField,
    date: DateField,
    condition: ConditionField,
    link: LinkField,
    image: ImageField,
}

impl ListingExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_patterns(patterns: DatePatternTable) -> Self {
        Self {
            date: DateField::new(patterns),
            ..Self::default()
        }
    }

    pub fn extract(&self, html: &str, source_url: &str, state: RetryState) -> ExtractionOutcome {
        let document = Html::parse_document(html);
        let query = SearchQuery::parse(source_url);

        let detected = match detect_layout(&document) {
            Ok(detected) => detected,
            Err(ExtractError::NoListingsFound) => {
                warn!("No listing containers found for {}", source_url);
                return ExtractionOutcome {
                    retry_url: state.decide(0, &query),
                    ..Default::default()
                };
            }
        };

        let candidates = detected.candidates(&document);
        let mut outcome = ExtractionOutcome {
            raw_candidate_count: candidates.len(),
            layout: Some(detected.layout),
            confidence: Some(detected.confidence),
            ..Default::default()
        };

        if RetryState::is_triggered(candidates.len()) {
            warn!(
                "Only {} raw candidates found ({} layout), page blocked or selectors out of date",
                candidates.len(),
                detected.layout
            );
            outcome.retry_url = state.decide(candidates.len(), &query);
            return outcome;
        }

        info!(
            "Found {} raw candidates ({} layout)",
            candidates.len(),
            detected.layout
        );

        let filter = AvailabilityFilter::new(query.is_completed_search());
        for (idx, element) in candidates.into_iter().enumerate() {
            if !detected.is_member(element) {
                debug!("Candidate {} is not a {} card, skipping", idx, detected.layout);
                continue;
            }

            let availability = filter.check(element);
            if !availability.is_available() {
                debug!("Candidate {} unavailable: {:?}", idx, availability);
                outcome.skipped_unavailable += 1;
                continue;
            }

            let candidate = Candidate {
                element,
                layout: detected.layout,
                base_url: query.url(),
            };

            match self.assemble(&candidate) {
                Some(record) => outcome.records.push(record),
                None => {
                    debug!("Candidate {} rejected: missing title or price", idx);
                    outcome.rejected += 1;
                }
            }
        }

        if outcome.skipped_unavailable > 0 {
            info!(
                "{} listings filtered out as unavailable or ended",
                outcome.skipped_unavailable
            );
        }
        info!(
            "Extracted {} listings ({} rejected)",
            outcome.records.len(),
            outcome.rejected
        );

        outcome
    }

    /// Build a record for one available candidate, or `None` when it has no
    /// usable title or no positive price.
    fn assemble(&self, candidate: &Candidate<'_>) -> Option<ListingRecord> {
        let title = self.title.extract(candidate)?;
        let price = self.price.extract(candidate).filter(|p| *p > 0.0)?;

        Some(ListingRecord {
            title,
            price,
            shipping: 0.0,
            total_price: price,
            date: self
                .date
                .extract(candidate)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            condition: self
                .condition
                .extract(candidate)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            link: self
                .link
                .extract(candidate)
                .unwrap_or_else(|| NO_LINK.to_string()),
            image: self
                .image
                .extract(candidate)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            source: SOURCE_TAG.to_string(),
        })
    }
}

/// Run the engine on a first-hop page.
pub fn extract_listings(html: &str, source_url: &str) -> ExtractionOutcome {
    ListingExtractor::new().extract(html, source_url, RetryState::Initial)
}
