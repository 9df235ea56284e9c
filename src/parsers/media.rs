use url::Url;

// Thumbnail suffix -> high-resolution suffix
const IMAGE_UPGRADES: &[(&str, &str)] = &[
    ("s-l140.jpg", "s-l500.jpg"),
    ("s-l225.jpg", "s-l500.jpg"),
    ("s-l140.webp", "s-l500.webp"),
    ("s-l225.webp", "s-l500.webp"),
];

/// Drop tracking parameters from a listing href and resolve it against the
/// page URL when it is relative. Placeholder anchors and non-http schemes
/// yield `None`.
pub fn normalize_listing_link(href: &str, base_url: Option<&Url>) -> Option<String> {
    let href = href.trim();
    let without_query = href.split('?').next().unwrap_or_default();
    if without_query.is_empty() || without_query.starts_with('#') {
        return None;
    }

    let mut url = match Url::parse(without_query) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => base_url?.join(without_query).ok()?,
        Err(_) => return None,
    };
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    url.set_query(None);
    Some(url.to_string())
}

/// Rewrite known thumbnail file names to their high-resolution equivalent.
pub fn upgrade_image_url(src: &str) -> String {
    IMAGE_UPGRADES
        .iter()
        .fold(src.trim().to_string(), |url, (low, high)| url.replace(low, high))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tracking_query() {
        assert_eq!(
            normalize_listing_link("https://www.ebay.fr/itm/123456?hash=item1c&_trkparms=x", None).as_deref(),
            Some("https://www.ebay.fr/itm/123456")
        );
    }

    #[test]
    fn resolves_relative_links() {
        let base = Url::parse("https://www.ebay.fr/sch/i.html?_nkw=ps5").unwrap();
        assert_eq!(
            normalize_listing_link("/itm/42?foo=bar", Some(&base)).as_deref(),
            Some("https://www.ebay.fr/itm/42")
        );
        assert_eq!(normalize_listing_link("/itm/42", None), None);
    }

    #[test]
    fn empty_href_is_none() {
        assert_eq!(normalize_listing_link("", None), None);
        assert_eq!(normalize_listing_link("?only=query", None), None);
    }

    #[test]
    fn placeholder_and_script_links_are_none() {
        let base = Url::parse("https://www.ebay.fr/sch/i.html?_nkw=ps5").unwrap();
        assert_eq!(normalize_listing_link("#", Some(&base)), None);
        assert_eq!(normalize_listing_link("#details", Some(&base)), None);
        assert_eq!(normalize_listing_link("javascript:void(0)", Some(&base)), None);
        assert_eq!(normalize_listing_link("mailto:seller@example.com", None), None);
    }

    #[test]
    fn upgrades_thumbnails() {
        assert_eq!(
            upgrade_image_url("https://i.ebayimg.com/images/g/abc/s-l225.jpg"),
            "https://i.ebayimg.com/images/g/abc/s-l500.jpg"
        );
        assert_eq!(
            upgrade_image_url("https://i.ebayimg.com/images/g/abc/s-l140.webp"),
            "https://i.ebayimg.com/images/g/abc/s-l500.webp"
        );
        assert_eq!(
            upgrade_image_url("https://i.ebayimg.com/images/g/abc/s-l1600.jpg"),
            "https://i.ebayimg.com/images/g/abc/s-l1600.jpg"
        );
    }
}
