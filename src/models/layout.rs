use serde::{Deserialize, Serialize};
use std::fmt;

/// Card template used by a search-result page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardLayout {
    /// `.s-item` cards wrapped in `.s-item__wrapper`.
    Legacy,
    /// `.s-card` cards.
    Modern,
}

impl CardLayout {
    pub fn key(&self) -> &'static str {
        match self {
            CardLayout::Legacy => "s-item",
            CardLayout::Modern => "s-card",
        }
    }
}

impl fmt::Display for CardLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// How confidently the layout was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// A layout-defining container selector matched.
    Primary,
    /// Only the generic list-item attribute pattern matched.
    Secondary,
}
