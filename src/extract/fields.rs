use scraper::ElementRef;
use url::Url;

use super::selectors::{
    CONDITION, DATE, IMAGE, LEGACY_INFO, LEGACY_TITLE, LINK, MODERN_TITLE, PRICE,
};
use super::{element_text, spaced_text};
use crate::models::CardLayout;
use crate::parsers::{
    clean_title, condition_from_keywords, condition_from_label, find_price_near_currency,
    is_promotional, normalize_listing_link, parse_price, upgrade_image_url, DatePatternTable,
};

/// A node scoped to one prospective listing.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub element: ElementRef<'a>,
    pub layout: CardLayout,
    pub base_url: Option<&'a Url>,
}

/// One field of a listing. `None` means the field is absent; the assembler
/// decides whether that rejects the candidate or maps to a sentinel.
pub trait FieldExtractor {
    type Value;

    fn extract(&self, candidate: &Candidate<'_>) -> Option<Self::Value>;
}

/// Card title. `None` rejects the whole candidate.
#[derive(Debug, Default, Clone, Copy)]
pub struct TitleField;

impl FieldExtractor for TitleField {
    type Value = String;

    fn extract(&self, candidate: &Candidate<'_>) -> Option<String> {
        let title_elem = match candidate.layout {
            CardLayout::Modern => candidate.element.select(&MODERN_TITLE).next(),
            CardLayout::Legacy => {
                let info = candidate
                    .element
                    .select(&LEGACY_INFO)
                    .next()
                    .unwrap_or(candidate.element);
                LEGACY_TITLE.first_match(info)
            }
        }?;

        let title = clean_title(&element_text(title_elem));
        if title.is_empty() || is_promotional(&title) {
            None
        } else {
            Some(title)
        }
    }
}

/// Price from the first known price container, else a number glued to a
/// currency code anywhere in the card.
#[derive(Debug, Default, Clone, Copy)]
pub struct PriceField;

impl FieldExtractor for PriceField {
    type Value = f64;

    fn extract(&self, candidate: &Candidate<'_>) -> Option<f64> {
        PRICE
            .first_match(candidate.element)
            .and_then(|elem| parse_price(&element_text(elem)))
            .filter(|price| *price > 0.0)
            .or_else(|| find_price_near_currency(&element_text(candidate.element)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DateField {
    patterns: DatePatternTable,
}

impl DateField {
    pub fn new(patterns: DatePatternTable) -> Self {
        Self { patterns }
    }
}

impl FieldExtractor for DateField {
    type Value = String;

    fn extract(&self, candidate: &Candidate<'_>) -> Option<String> {
        let source = DATE
            .first_match(candidate.element)
            .unwrap_or(candidate.element);
        self.patterns.find_date(&spaced_text(source))
    }
}

/// Explicit condition label, else a keyword-mapped canonical condition.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConditionField;

impl FieldExtractor for ConditionField {
    type Value = String;

    fn extract(&self, candidate: &Candidate<'_>) -> Option<String> {
        CONDITION
            .first_match(candidate.element)
            .and_then(|elem| condition_from_label(&element_text(elem)))
            .or_else(|| {
                condition_from_keywords(&spaced_text(candidate.element))
                    .map(|condition| condition.to_string())
            })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LinkField;

impl FieldExtractor for LinkField {
    type Value = String;

    fn extract(&self, candidate: &Candidate<'_>) -> Option<String> {
        let anchor = LINK.first_match(candidate.element)?;
        let href = anchor.value().attr("href")?;
        normalize_listing_link(href, candidate.base_url)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ImageField;

impl FieldExtractor for ImageField {
    type Value = String;

    fn extract(&self, candidate: &Candidate<'_>) -> Option<String> {
        let img = candidate.element.select(&IMAGE).next()?;
        let non_empty = |name: &str| img.value().attr(name).filter(|v| !v.trim().is_empty());

        non_empty("src")
            .or_else(|| non_empty("data-src"))
            .map(upgrade_image_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn with_candidate<T>(
        html: &str,
        layout: CardLayout,
        f: impl FnOnce(&Candidate<'_>) -> T,
    ) -> T {
        let document = Html::parse_document(html);
        let selector = Selector::parse(".card").unwrap();
        let base = Url::parse("https://www.ebay.fr/sch/i.html?_nkw=console").unwrap();
        let candidate = Candidate {
            element: document.select(&selector).next().unwrap(),
            layout,
            base_url: Some(&base),
        };
        f(&candidate)
    }

    #[test]
    fn modern_title_is_cleaned() {
        let html = r#"<li class="card"><div class="s-card__title"><span>Nouvelle annonce</span>Console X<span>La page s'ouvre dans une nouvelle fenêtre ou un nouvel onglet</span></div></li>"#;
        let title = with_candidate(html, CardLayout::Modern, |c| TitleField.extract(c));
        assert_eq!(title.as_deref(), Some("Console X"));
    }

    #[test]
    fn legacy_title_falls_back_to_h3() {
        let html = r#"<li class="card"><div class="s-item__info"><h3>Manette Y</h3></div></li>"#;
        let title = with_candidate(html, CardLayout::Legacy, |c| TitleField.extract(c));
        assert_eq!(title.as_deref(), Some("Manette Y"));
    }

    #[test]
    fn promotional_or_empty_title_rejected() {
        let html = r#"<li class="card"><div class="s-item__title">Shop on eBay</div></li>"#;
        assert_eq!(with_candidate(html, CardLayout::Legacy, |c| TitleField.extract(c)), None);

        let html = r#"<li class="card"><div class="s-card__title">Opens in a new window or tab</div></li>"#;
        assert_eq!(with_candidate(html, CardLayout::Modern, |c| TitleField.extract(c)), None);
    }

    #[test]
    fn price_from_selector_then_currency_fallback() {
        let html = r#"<li class="card"><span class="s-card__price">123,45&nbsp;€</span></li>"#;
        assert_eq!(with_candidate(html, CardLayout::Modern, |c| PriceField.extract(c)), Some(123.45));

        let html = r#"<li class="card"><span class="s-card__price">Voir le prix</span><span>Total 59,00 EUR</span></li>"#;
        assert_eq!(with_candidate(html, CardLayout::Modern, |c| PriceField.extract(c)), Some(59.0));

        let html = r#"<li class="card"><span>gratuit</span></li>"#;
        assert_eq!(with_candidate(html, CardLayout::Modern, |c| PriceField.extract(c)), None);
    }

    #[test]
    fn date_from_caption_or_whole_card() {
        let html = r#"<li class="card"><div class="s-item__caption"><span>Vendu le</span> <span>26 nov. 2025</span></div></li>"#;
        let date = with_candidate(html, CardLayout::Legacy, |c| DateField::default().extract(c));
        assert_eq!(date.as_deref(), Some("26 nov. 2025"));

        let html = r#"<li class="card"><p>Sold Nov 26, 2025</p></li>"#;
        let date = with_candidate(html, CardLayout::Modern, |c| DateField::default().extract(c));
        assert_eq!(date.as_deref(), Some("Nov 26, 2025"));

        let html = r#"<li class="card"><p>Achat immédiat</p></li>"#;
        assert_eq!(with_candidate(html, CardLayout::Modern, |c| DateField::default().extract(c)), None);
    }

    #[test]
    fn condition_label_then_keywords() {
        let html = r#"<li class="card"><div class="s-card__subtitle">Occasion · Vendeur pro | 98% évaluations</div></li>"#;
        let condition = with_candidate(html, CardLayout::Modern, |c| ConditionField.extract(c));
        assert_eq!(condition.as_deref(), Some("Occasion · Vendeur pro"));

        let html = r#"<li class="card"><p>Console reconditionné garantie</p></li>"#;
        let condition = with_candidate(html, CardLayout::Modern, |c| ConditionField.extract(c));
        assert_eq!(condition.as_deref(), Some("Reconditionné"));

        let html = r#"<li class="card"><p>Console</p></li>"#;
        assert_eq!(with_candidate(html, CardLayout::Modern, |c| ConditionField.extract(c)), None);
    }

    #[test]
    fn link_prefers_layout_class_and_drops_tracking() {
        let html = r#"<li class="card"><a href="/other">x</a><a class="s-item__link" href="https://www.ebay.fr/itm/1?hash=abc">t</a></li>"#;
        let link = with_candidate(html, CardLayout::Legacy, |c| LinkField.extract(c));
        assert_eq!(link.as_deref(), Some("https://www.ebay.fr/itm/1"));

        let html = r#"<li class="card"><a>no href</a></li>"#;
        assert_eq!(with_candidate(html, CardLayout::Legacy, |c| LinkField.extract(c)), None);
    }

    #[test]
    fn placeholder_link_is_none() {
        let html = r##"<li class="card"><a class="s-card__link" href="#">t</a></li>"##;
        assert_eq!(with_candidate(html, CardLayout::Modern, |c| LinkField.extract(c)), None);

        let html = r#"<li class="card"><a class="s-card__link" href="javascript:void(0)">t</a></li>"#;
        assert_eq!(with_candidate(html, CardLayout::Modern, |c| LinkField.extract(c)), None);
    }

    #[test]
    fn image_uses_lazy_attribute_and_upgrades() {
        let html = r#"<li class="card"><img src="" data-src="https://i.ebayimg.com/g/s-l225.jpg"></li>"#;
        let image = with_candidate(html, CardLayout::Modern, |c| ImageField.extract(c));
        assert_eq!(image.as_deref(), Some("https://i.ebayimg.com/g/s-l500.jpg"));

        let html = r#"<li class="card"><p>no image</p></li>"#;
        assert_eq!(with_candidate(html, CardLayout::Modern, |c| ImageField.extract(c)), None);
    }
}
