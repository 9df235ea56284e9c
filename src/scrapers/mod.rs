use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::Result;
use crate::models::ExtractionOutcome;

mod ebay;

pub use ebay::EbayScraper;

/// Outcome of one search request, after at most one retry hop.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub requested_url: String,
    /// URL whose page produced `outcome`.
    pub final_url: String,
    pub retried: bool,
    pub outcome: ExtractionOutcome,
}

#[async_trait]
pub trait ListingScraper: Send + Sync {
    async fn scrape(&self, client: &Client, url: &str) -> Result<SearchReport>;
}
