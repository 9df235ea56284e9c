pub mod layout;
pub mod listing;

pub use layout::*;
pub use listing::*;

// Sentinel values for fields that could not be extracted
pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_LINK: &str = "#";

/// Tag stamped on every record produced by this engine.
pub const SOURCE_TAG: &str = "ebay";
