pub mod condition;
pub mod date;
pub mod media;
pub mod price;
pub mod title;

pub use condition::*;
pub use date::*;
pub use media::*;
pub use price::*;
pub use title::*;

use html_escape::decode_html_entities;

/// Clean and normalize text by removing extra whitespace and decoding HTML entities
pub fn clean_text(text: &str) -> String {
    let decoded = decode_html_entities(text);
    decoded
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercased, whitespace-normalized form used for phrase matching.
pub fn normalize_for_match(text: &str) -> String {
    clean_text(text).to_lowercase()
}
