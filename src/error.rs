use thiserror::Error;

/// Engine-internal signals. None of these escape `ListingExtractor::extract`;
/// they are folded into the returned outcome.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no listing containers matched the primary or secondary selectors")]
    NoListingsFound,
}

/// Failures of the collaborators around the engine (fetching, exporting).
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP error {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("blocked by remote site (HTTP 503) for {url}")]
    Blocked { url: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
