use async_trait::async_trait;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{ExportMode, ListingStore};
use crate::error::Result;
use crate::extract::SearchQuery;
use crate::models::ListingRecord;

const FALLBACK_SITE: &str = "site";
const FALLBACK_TERM: &str = "default";

/// `<siteName>_<searchTerm>.csv` for a search URL.
pub fn export_file_name(url: &str) -> String {
    let query = SearchQuery::parse(url);
    let site = query.site_name().unwrap_or_else(|| FALLBACK_SITE.to_string());
    let term = query.search_term().unwrap_or_else(|| FALLBACK_TERM.to_string());
    format!("{}_{}.csv", site, term)
}

pub struct CsvExporter {
    output_dir: PathBuf,
    mode: ExportMode,
}

impl CsvExporter {
    pub fn new(output_dir: impl Into<PathBuf>, mode: ExportMode) -> Self {
        Self {
            output_dir: output_dir.into(),
            mode,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn headers(&self) -> &'static [&'static str] {
        match self.mode {
            ExportMode::Full => &["Title", "Total Price", "Date", "Condition", "Image", "Link"],
            ExportMode::Reduced => &["Title", "Total Price", "Link"],
        }
    }

    fn row(&self, record: &ListingRecord) -> Vec<String> {
        let total = record.total_price.to_string();
        match self.mode {
            ExportMode::Full => vec![
                record.title.clone(),
                total,
                record.date.clone(),
                record.condition.clone(),
                record.image.clone(),
                record.link.clone(),
            ],
            ExportMode::Reduced => vec![record.title.clone(), total, record.link.clone()],
        }
    }

    /// Serialize records to CSV into any writer.
    pub fn write_to<W: Write>(&self, writer: W, records: &[ListingRecord]) -> Result<()> {
        let mut csv_writer = ::csv::Writer::from_writer(writer);
        csv_writer.write_record(self.headers())?;
        for record in records {
            csv_writer.write_record(self.row(record))?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

#[async_trait]
impl ListingStore for CsvExporter {
    async fn save(&self, records: &[ListingRecord], file_name: &str) -> Result<Option<PathBuf>> {
        if records.is_empty() {
            info!("No listings to export, skipping {}", file_name);
            return Ok(None);
        }

        fs::create_dir_all(&self.output_dir)?;

        let path = self.output_dir.join(file_name);
        let file = fs::File::create(&path)?;
        self.write_to(file, records)?;

        info!("Saved {} listings to {}", records.len(), path.display());
        Ok(Some(path))
    }
}
