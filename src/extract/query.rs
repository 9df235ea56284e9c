use url::Url;

const SOLD_PARAM: &str = "LH_Sold";
const COMPLETE_PARAM: &str = "LH_Complete";
const SEARCH_TERM_PARAMS: &[&str] = &["_nkw", "k"];

/// The source URL of a search page, inspected for the sold/completed filters.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    raw: String,
    url: Option<Url>,
}

impl SearchQuery {
    pub fn parse(source_url: &str) -> Self {
        Self {
            raw: source_url.to_string(),
            url: Url::parse(source_url.trim()).ok(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn url(&self) -> Option<&Url> {
        self.url.as_ref()
    }

    fn has_flag(&self, name: &str) -> bool {
        match &self.url {
            Some(url) => url.query_pairs().any(|(k, v)| k == name && v == "1"),
            None => self.raw.contains(&format!("{}=1", name)),
        }
    }

    /// True for sold-listings queries (the retry trigger).
    pub fn requests_sold(&self) -> bool {
        self.has_flag(SOLD_PARAM)
    }

    /// True when the query targets ended listings in any form.
    pub fn is_completed_search(&self) -> bool {
        self.has_flag(SOLD_PARAM) || self.has_flag(COMPLETE_PARAM)
    }

    /// Same URL with the sold and completed filters removed; other parameters
    /// keep their order.
    pub fn without_sale_filters(&self) -> Option<String> {
        let url = self.url.as_ref()?;
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .filter(|(k, _)| k != SOLD_PARAM && k != COMPLETE_PARAM)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        let query = serde_urlencoded::to_string(&pairs).ok()?;
        let mut rewritten = url.clone();
        if query.is_empty() {
            rewritten.set_query(None);
        } else {
            rewritten.set_query(Some(&query));
        }
        Some(rewritten.to_string())
    }

    /// Primary search term (`_nkw`, else `k`), spaces replaced with `-`.
    pub fn search_term(&self) -> Option<String> {
        let url = self.url.as_ref()?;
        SEARCH_TERM_PARAMS.iter().find_map(|name| {
            url.query_pairs()
                .find(|(k, v)| k == name && !v.trim().is_empty())
                .map(|(_, v)| v.trim().replace(' ', "-"))
        })
    }

    /// Second-to-last host label, e.g. `ebay` for `www.ebay.fr`.
    pub fn site_name(&self) -> Option<String> {
        let host = self.url.as_ref()?.host_str()?;
        let labels: Vec<&str> = host.split('.').collect();
        if labels.len() < 2 {
            return None;
        }
        Some(labels[labels.len() - 2].to_string())
    }
}
