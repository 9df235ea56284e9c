use chrono::Local;
use scraper::{Html, Selector};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::Result;

/// `<title>` of a page, used to tell captcha/interstitial pages apart.
pub fn page_title(html: &str) -> Option<String> {
    let selector = Selector::parse("title").ok()?;
    let document = Html::parse_document(html);
    let title = document.select(&selector).next()?;
    let text = crate::parsers::clean_text(&title.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

/// Save raw HTML for offline inspection with `analyze_html`.
pub fn dump_html(dir: &Path, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let file_name = format!("debug_dump_{}.html", Local::now().format("%Y%m%d_%H%M%S%3f"));
    let path = dir.join(file_name);
    fs::write(&path, html)?;

    match page_title(html) {
        Some(title) => warn!("Suspicious page title: {}", title),
        None => warn!("Suspicious page has no title"),
    }
    info!("Saved HTML to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_page_title() {
        assert_eq!(
            page_title("<html><head><title> Pardon Our  Interruption </title></head></html>").as_deref(),
            Some("Pardon Our Interruption")
        );
        assert_eq!(page_title("<html><body></body></html>"), None);
    }

    #[test]
    fn writes_dump_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dump_html(dir.path(), "<html>blocked</html>").unwrap();
        assert!(path.starts_with(dir.path()));
        assert_eq!(fs::read_to_string(path).unwrap(), "<html>blocked</html>");
    }
}
