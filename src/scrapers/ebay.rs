use async_trait::async_trait;
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::Result;
use crate::extract::{ListingExtractor, RetryState};
use crate::scrapers::{ListingScraper, SearchReport};
use crate::utils::debug_dump::dump_html;
use crate::utils::http::fetch_page;

pub struct EbayScraper {
    config: Arc<Config>,
    extractor: ListingExtractor,
}

impl EbayScraper {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            extractor: ListingExtractor::new(),
        }
    }

    pub fn with_extractor(config: Arc<Config>, extractor: ListingExtractor) -> Self {
        Self { config, extractor }
    }

    fn maybe_dump(&self, html: &str, raw_candidate_count: usize) {
        if !self.config.debug.dump_html || !RetryState::is_triggered(raw_candidate_count) {
            return;
        }

        if let Err(e) = dump_html(Path::new(&self.config.debug.dump_dir), html) {
            error!("Could not save debug HTML: {}", e);
        }
    }
}

#[async_trait]
impl ListingScraper for EbayScraper {
    async fn scrape(&self, client: &Client, url: &str) -> Result<SearchReport> {
        let mut current_url = url.to_string();
        let mut state = RetryState::Initial;

        loop {
            info!("Scraping: {}", current_url);
            let html = fetch_page(client, &current_url, self.config.http.max_retries).await?;
            let outcome = self.extractor.extract(&html, &current_url, state);
            self.maybe_dump(&html, outcome.raw_candidate_count);

            match outcome.retry_url.clone() {
                Some(retry_url) if state == RetryState::Initial => {
                    warn!("Falling back to active listings: {}", retry_url);
                    current_url = retry_url;
                    state = state.advance();
                }
                _ => {
                    if let Some(reason) = outcome.empty_reason() {
                        warn!("No listings extracted from {}: {}", current_url, reason);
                    }
                    return Ok(SearchReport {
                        requested_url: url.to_string(),
                        final_url: current_url,
                        retried: state == RetryState::RetriedOnce,
                        outcome,
                    });
                }
            }
        }
    }
}
