use once_cell::sync::Lazy;
use regex::Regex;

static PRICE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)")
        .expect("Invalid price regex")
});

static PRICE_BEFORE_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:[.,]\d+)?)EUR")
        .expect("Invalid price-before-code regex")
});

static PRICE_AFTER_CODE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"EUR(\d+(?:[.,]\d+)?)")
        .expect("Invalid price-after-code regex")
});

const CURRENCY_TOKENS: &[&str] = &["EUR", "USD", "GBP", "€", "$", "£"];

/// Parse the first decimal number out of a price label.
///
/// Whitespace (including non-breaking and narrow no-break spaces) and
/// currency tokens are dropped first, so `"1 234,56 €"` and `"1234.56EUR"`
/// both parse to `1234.56`. A comma is treated as the fractional separator.
pub fn parse_price(price_text: &str) -> Option<f64> {
    let mut compact: String = price_text.chars().filter(|c| !c.is_whitespace()).collect();
    for token in CURRENCY_TOKENS {
        compact = compact.replace(token, "");
    }

    let captures = PRICE_REGEX.captures(&compact)?;
    to_decimal(captures.get(1)?.as_str())
}

/// Search free text for a number glued to a currency code, in either order.
pub fn find_price_near_currency(text: &str) -> Option<f64> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();

    PRICE_BEFORE_CODE_REGEX
        .captures(&compact)
        .or_else(|| PRICE_AFTER_CODE_REGEX.captures(&compact))
        .and_then(|captures| captures.get(1))
        .and_then(|m| to_decimal(m.as_str()))
}

fn to_decimal(number: &str) -> Option<f64> {
    number
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_french_and_compact_formats_identically() {
        assert_eq!(parse_price("1 234,56 €"), Some(1234.56));
        assert_eq!(parse_price("1234.56EUR"), Some(1234.56));
        assert_eq!(parse_price("1\u{a0}234,56\u{a0}€"), Some(1234.56));
        assert_eq!(parse_price("1\u{202f}234,56 €"), Some(1234.56));
    }

    #[test]
    fn parses_integers_and_ranges() {
        assert_eq!(parse_price("EUR 42"), Some(42.0));
        assert_eq!(parse_price("10,00 EUR à 20,00 EUR"), Some(10.0));
        assert_eq!(parse_price("$19.99"), Some(19.99));
    }

    #[test]
    fn non_numeric_label_yields_none() {
        assert_eq!(parse_price("Prix sur demande"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn finds_number_adjacent_to_currency_code() {
        assert_eq!(find_price_near_currency("Prix: 99,90 EUR livraison"), Some(99.9));
        assert_eq!(find_price_near_currency("EUR 15,00 + frais"), Some(15.0));
        assert_eq!(find_price_near_currency("no currency 12,00 here"), None);
    }
}
