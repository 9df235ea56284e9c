//! Run the extraction engine on a saved HTML page, e.g. a `debug_dump_*.html`.
//!
//! Usage: analyze_html <file.html> [source-url]

use anyhow::{bail, Context, Result};
use scraper::{Html, Selector};
use std::fs;

use listing_extractor::extract::{detect_layout, ListingExtractor, RetryState};
use listing_extractor::utils::debug_dump::page_title;

const PROBE_SELECTORS: &[&str] = &[
    ".s-card",
    ".s-item",
    ".s-item__wrapper",
    "li[data-view='mi:1686']",
    ".s-card__title",
    ".s-item__title",
    ".s-card__price",
    ".s-item__price",
    ".s-item__ended-date",
];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("listing_extractor=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        bail!("usage: analyze_html <file.html> [source-url]");
    };
    let source_url = args
        .next()
        .unwrap_or_else(|| "https://www.ebay.fr/sch/i.html".to_string());

    let html = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path))?;
    println!("Title: {}", page_title(&html).unwrap_or_else(|| "No Title".to_string()));

    {
        let document = Html::parse_document(&html);
        for pattern in PROBE_SELECTORS {
            if let Ok(selector) = Selector::parse(pattern) {
                let count = document.select(&selector).count();
                if count > 0 {
                    println!("Selector '{}' matched {} elements", pattern, count);
                }
            }
        }

        match detect_layout(&document) {
            Ok(detected) => println!(
                "Layout: {} ({:?} confidence)",
                detected.layout, detected.confidence
            ),
            Err(e) => println!("Layout: {}", e),
        }
    }

    let outcome = ListingExtractor::new().extract(&html, &source_url, RetryState::Initial);
    println!(
        "Raw candidates: {}, extracted: {}, unavailable: {}, rejected: {}",
        outcome.raw_candidate_count,
        outcome.records.len(),
        outcome.skipped_unavailable,
        outcome.rejected
    );
    if let Some(reason) = outcome.empty_reason() {
        println!("Empty because: {}", reason);
    }
    if let Some(retry_url) = &outcome.retry_url {
        println!("Would retry with: {}", retry_url);
    }
    println!("{}", serde_json::to_string_pretty(&outcome.records)?);

    Ok(())
}
