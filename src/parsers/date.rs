use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered list of date patterns; the first capture group of the first
/// matching pattern is the extracted date.
///
/// Patterns are passed explicitly to the date extractor instead of relying on
/// any process-wide locale.
#[derive(Debug, Clone)]
pub struct DatePatternTable {
    patterns: Vec<Regex>,
}

// "Vendu le 26 nov. 2025", "Vendu le 3 décembre 2025"
const FRENCH_SOLD: &str = r"(?i)vendu\s+le\s+(\d{1,2}\s+\p{L}+\.?\s+\d{4})";
// "Sold Nov 26, 2025", "Sold 26 Nov 2025"
const ENGLISH_SOLD: &str = r"(?i)sold\s+(\p{L}+\.?\s+\d{1,2},?\s+\d{4}|\d{1,2}\s+\p{L}+\.?\s+\d{4})";
// "26 nov. 2025"
const BARE_DATE: &str = r"(\d{1,2}\s+\p{L}+\.?\s+\d{4})";

static DEFAULT_TABLE: Lazy<DatePatternTable> = Lazy::new(|| {
    DatePatternTable::from_patterns(&[FRENCH_SOLD, ENGLISH_SOLD, BARE_DATE])
        .expect("Invalid built-in date patterns")
});

impl DatePatternTable {
    /// Build a table from raw patterns; each must contain one capture group.
    pub fn from_patterns(patterns: &[&str]) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// French sold prefix, English sold prefix, then a bare worded date.
    pub fn french_english() -> Self {
        DEFAULT_TABLE.clone()
    }

    pub fn find_date(&self, text: &str) -> Option<String> {
        self.patterns.iter().find_map(|pattern| {
            pattern
                .captures(text)
                .and_then(|captures| captures.get(1))
                .map(|m| m.as_str().trim().to_string())
        })
    }
}

impl Default for DatePatternTable {
    fn default() -> Self {
        Self::french_english()
    }
}
