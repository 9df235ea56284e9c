use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::query::SearchQuery;

/// At or below this many raw candidates the page is treated as blocked or as
/// a broken selector rather than as a genuinely empty search.
pub const RETRY_TRIGGER_MAX_CANDIDATES: usize = 1;

/// Two-state retry controller. `RetriedOnce` is terminal, so a request is
/// re-fetched at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RetryState {
    #[default]
    Initial,
    RetriedOnce,
}

impl RetryState {
    /// Whether a pass with this many raw candidates looks blocked.
    pub fn is_triggered(raw_candidate_count: usize) -> bool {
        raw_candidate_count <= RETRY_TRIGGER_MAX_CANDIDATES
    }

    /// The URL the caller should fetch next, if any.
    pub fn decide(self, raw_candidate_count: usize, query: &SearchQuery) -> Option<String> {
        if !Self::is_triggered(raw_candidate_count) {
            return None;
        }

        match self {
            RetryState::RetriedOnce => {
                info!("Retry already attempted for {}, giving up", query.as_str());
                None
            }
            RetryState::Initial if query.requests_sold() => {
                let retry_url = query.without_sale_filters()?;
                warn!(
                    "Only {} raw candidates on sold search, falling back to active listings: {}",
                    raw_candidate_count, retry_url
                );
                Some(retry_url)
            }
            RetryState::Initial => None,
        }
    }

    /// State to pass to the engine for the re-fetched page.
    pub fn advance(self) -> RetryState {
        RetryState::RetriedOnce
    }
}
