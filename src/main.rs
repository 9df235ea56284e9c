use anyhow::{Context, Result};
use clap::Parser;
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use listing_extractor::utils::http::create_client;
use listing_extractor::{
    export_file_name, Config, CsvExporter, EbayScraper, ExportMode, ListingScraper, ListingStore,
    SearchReport,
};

const DEFAULT_SEARCH_URL: &str = "https://www.ebay.fr/sch/i.html?_nkw=ps5+console";

#[derive(Parser, Debug)]
#[command(name = "listing-extractor", about = "Extract marketplace listings from search-result pages")]
struct Cli {
    /// Search-result URLs to scrape
    #[arg(default_values_t = vec![DEFAULT_SEARCH_URL.to_string()])]
    urls: Vec<String>,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for CSV exports
    #[arg(short, long)]
    output_dir: Option<String>,

    /// Export only title, total price and link
    #[arg(long)]
    reduced: bool,

    /// Skip the CSV export
    #[arg(long)]
    no_export: bool,

    /// Print the records as JSON on stdout
    #[arg(long)]
    json: bool,

    /// Debug-level logging for this crate
    #[arg(short, long)]
    verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,
}

/// `RUST_LOG` when set, otherwise this crate at info (or debug when verbose).
fn log_filter(env_directives: Option<String>, verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };
    env_directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(format!("listing_extractor={}", level)))
}

fn init_logging(verbose: bool, json: bool) {
    let filter = log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), verbose);

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    if json {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_json);

    info!("Starting listing extractor");

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(dir) = &cli.output_dir {
        config.export.output_dir = dir.clone();
    }
    if cli.reduced {
        config.export.mode = ExportMode::Reduced;
    }
    let config = Arc::new(config);

    let client = create_client(&config.http).context("Failed to build HTTP client")?;
    let scraper = EbayScraper::new(config.clone());
    let exporter = CsvExporter::new(&config.export.output_dir, config.export.mode);

    // Each URL is an independent engine run
    let searches = cli.urls.iter().map(|url| {
        let client = &client;
        let scraper = &scraper;
        async move { (url, scraper.scrape(client, url).await) }
    });
    let results = join_all(searches).await;

    let mut reports: Vec<SearchReport> = Vec::new();
    for (url, result) in results {
        match result {
            Ok(report) => {
                info!(
                    "{}: {} listings ({} unavailable, {} rejected, {} raw candidates)",
                    url,
                    report.outcome.records.len(),
                    report.outcome.skipped_unavailable,
                    report.outcome.rejected,
                    report.outcome.raw_candidate_count
                );
                reports.push(report);
            }
            Err(e) => error!("Failed to scrape {}: {}", url, e),
        }
    }

    if !cli.no_export {
        for report in &reports {
            let file_name = export_file_name(&report.requested_url);
            if let Err(e) = exporter.save(&report.outcome.records, &file_name).await {
                error!("Failed to export {}: {:#}", file_name, e);
            }
        }
    }

    if cli.json {
        let records: Vec<_> = reports.iter().flat_map(|r| r.outcome.records.iter()).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        for report in &reports {
            if report.retried {
                warn!("{} fell back to {}", report.requested_url, report.final_url);
            }
            println!(
                "{} -> {} listings",
                report.requested_url,
                report.outcome.records.len()
            );
        }
    }

    Ok(())
}
