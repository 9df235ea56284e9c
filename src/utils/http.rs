use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, warn};

use crate::config::HttpConfig;
use crate::error::{Result, ScrapeError};

const ACCEPT_HTML: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

pub fn create_client(config: &HttpConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));
    if let Ok(language) = HeaderValue::from_str(&config.accept_language) {
        headers.insert(ACCEPT_LANGUAGE, language);
    }

    let client = ClientBuilder::new()
        .user_agent(config.user_agent.as_str())
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_seconds))
        .pool_max_idle_per_host(config.pool_max_idle_per_host)
        .build()?;

    Ok(client)
}

/// Fetch a page body, retrying failures with exponential backoff.
///
/// Only a 2xx response yields HTML; everything else is an error, so a
/// blocked page is never mistaken for an empty search.
pub async fn fetch_page(client: &Client, url: &str, max_retries: u32) -> Result<String> {
    fetch_page_with_backoff(client, url, max_retries, Duration::from_secs(1)).await
}

const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// `base_delay * 2^attempt`, capped at one minute.
fn backoff_delay(base_delay: Duration, attempt: u32) -> Duration {
    base_delay
        .saturating_mul(2u32.saturating_pow(attempt))
        .min(MAX_BACKOFF)
}

pub(crate) async fn fetch_page_with_backoff(
    client: &Client,
    url: &str,
    max_retries: u32,
    base_delay: Duration,
) -> Result<String> {
    let max_retries = max_retries.max(1);
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < max_retries {
        match client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response.text().await?);
                }

                warn!("HTTP error {}: {}", status, url);
                last_error = Some(if status == StatusCode::SERVICE_UNAVAILABLE {
                    ScrapeError::Blocked {
                        url: url.to_string(),
                    }
                } else {
                    ScrapeError::HttpStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    }
                });
            }
            Err(e) => {
                error!("Request failed for {}: {}", url, e);
                last_error = Some(e.into());
            }
        }

        attempts += 1;
        if attempts < max_retries {
            let delay = backoff_delay(base_delay, attempts);
            warn!("Retrying in {:?}... (attempt {}/{})", delay, attempts + 1, max_retries);
            sleep(delay).await;
        }
    }

    Err(last_error.unwrap_or_else(|| ScrapeError::HttpStatus {
        status: 0,
        url: url.to_string(),
    }))
}
