pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod parsers;
pub mod scrapers;
pub mod storage;
pub mod utils;

pub use crate::config::Config;
pub use crate::error::{ExtractError, ScrapeError};
pub use crate::extract::{extract_listings, ListingExtractor, RetryState, SearchQuery};
pub use crate::models::{CardLayout, EmptyReason, ExtractionOutcome, ListingRecord};
pub use crate::scrapers::{EbayScraper, ListingScraper, SearchReport};
pub use crate::storage::{export_file_name, CsvExporter, ExportMode, ListingStore};
