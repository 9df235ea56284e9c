use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::Result;
use crate::models::ListingRecord;

mod csv;
pub use self::csv::{export_file_name, CsvExporter};

/// Column set written by an exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportMode {
    /// Title, Total Price, Date, Condition, Image, Link.
    #[default]
    Full,
    /// Title, Total Price, Link.
    Reduced,
}

#[async_trait]
pub trait ListingStore: Send + Sync {
    /// Persist records under `file_name`. Returns the written path, or `None`
    /// when there was nothing to write.
    async fn save(&self, records: &[ListingRecord], file_name: &str) -> Result<Option<PathBuf>>;
}
