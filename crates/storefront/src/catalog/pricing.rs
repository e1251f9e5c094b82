//! Price rules parsed from catalog price text.
//!
//! A product's price is written the way the nursery writes it on the site:
//!
//! ```text
//! 800 грн/шт                              single price
//! !800 грн/шт                             single price, currently unavailable
//! 600 грн/шт (1м) / 800 грн/шт (1,4м+)    one tier per seedling height
//! 600 грн/шт (1м) / !800 грн/шт (1,4м+)   second tier unavailable
//! ```
//!
//! Anything unparseable falls back to the unified price of 800 грн.

use std::sync::LazyLock;

use oleh_garden_core::{HeightTag, Price};
use regex::Regex;
use serde::Serialize;

/// One `<price> грн/шт (<height>)` tier, with an optional leading `!`.
static TIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\s*(\d+)\s*грн/шт\s*\(([^)]+)\)").expect("tier pattern is valid")
});

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("number pattern is valid"));

/// A single purchasable price tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceOption {
    pub height: HeightTag,
    pub price: Price,
    /// Display label, e.g. `600 грн/шт (1м)`.
    pub label: String,
    pub available: bool,
}

impl PriceOption {
    fn standard(price: Price, available: bool) -> Self {
        Self {
            height: HeightTag::standard(),
            price,
            label: price.label(),
            available,
        }
    }
}

/// All price tiers of a product, in the order they are listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PriceRule {
    options: Vec<PriceOption>,
}

impl PriceRule {
    /// Parse price text. `None` yields the unified single price.
    #[must_use]
    pub fn parse(text: Option<&str>) -> Self {
        let Some(text) = text else {
            return Self::unified();
        };

        if text.contains('/') && text.contains('м') {
            let options: Vec<PriceOption> = TIER_PATTERN
                .captures_iter(text)
                .filter_map(|caps| {
                    let unavailable = caps.get(1).is_some_and(|m| m.as_str() == "!");
                    let price = Price::new(caps.get(2)?.as_str().parse().ok()?);
                    let height = caps.get(3)?.as_str().trim();
                    Some(PriceOption {
                        height: HeightTag::from(height),
                        price,
                        label: format!("{} ({height})", price.label()),
                        available: !unavailable,
                    })
                })
                .collect();

            if options.is_empty() {
                return Self::unified();
            }
            return Self { options };
        }

        let unavailable = text.trim().starts_with('!');
        let price = FIRST_NUMBER
            .find(text)
            .and_then(|m| m.as_str().parse().ok())
            .map_or(Price::UNIFIED, Price::new);

        Self {
            options: vec![PriceOption::standard(price, !unavailable)],
        }
    }

    fn unified() -> Self {
        Self {
            options: vec![PriceOption::standard(Price::UNIFIED, true)],
        }
    }

    #[must_use]
    pub fn options(&self) -> &[PriceOption] {
        &self.options
    }

    /// Whether the product is sold in more than one height tier.
    #[must_use]
    pub fn is_tiered(&self) -> bool {
        self.options.len() > 1
    }

    /// Resolve the tier for a height tag.
    ///
    /// Falls back to the first listed tier when no tag is given or the tag is
    /// no longer offered.
    #[must_use]
    pub fn resolve(&self, height: Option<&HeightTag>) -> Option<&PriceOption> {
        height
            .and_then(|h| self.options.iter().find(|opt| &opt.height == h))
            .or_else(|| self.options.first())
    }

    /// The tier preselected on a product page: the first available one.
    #[must_use]
    pub fn first_available(&self) -> Option<&PriceOption> {
        self.options.iter().find(|opt| opt.available)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_text_uses_unified_price() {
        let rule = PriceRule::parse(None);
        assert_eq!(rule.options().len(), 1);
        assert_eq!(rule.options()[0].price, Price::UNIFIED);
        assert!(rule.options()[0].height.is_standard());
        assert_eq!(rule.options()[0].label, "800 грн/шт");
    }

    #[test]
    fn test_single_price() {
        let rule = PriceRule::parse(Some("650 грн/шт"));
        let option = rule.resolve(None).unwrap();
        assert_eq!(option.price, Price::new(650));
        assert!(option.available);
        assert!(!rule.is_tiered());
    }

    #[test]
    fn test_single_price_unavailable_marker() {
        let rule = PriceRule::parse(Some("  !700 грн/шт"));
        let option = rule.resolve(None).unwrap();
        assert_eq!(option.price, Price::new(700));
        assert!(!option.available);
    }

    #[test]
    fn test_single_price_without_number_falls_back() {
        let rule = PriceRule::parse(Some("ціну уточнюйте"));
        assert_eq!(rule.resolve(None).unwrap().price, Price::UNIFIED);
    }

    #[test]
    fn test_tiered_prices() {
        let rule = PriceRule::parse(Some("600 грн/шт (1м) / !800 грн/шт (1,4м+)"));
        assert!(rule.is_tiered());

        let low = &rule.options()[0];
        assert_eq!(low.height.as_str(), "1м");
        assert_eq!(low.price, Price::new(600));
        assert_eq!(low.label, "600 грн/шт (1м)");
        assert!(low.available);

        let high = &rule.options()[1];
        assert_eq!(high.height.as_str(), "1,4м+");
        assert_eq!(high.price, Price::new(800));
        assert!(!high.available);
    }

    #[test]
    fn test_tiered_text_without_tiers_falls_back() {
        let rule = PriceRule::parse(Some("від 600 / до 900 за саджанець, залежно від розміру"));
        assert_eq!(rule.options().len(), 1);
        assert_eq!(rule.options()[0].price, Price::UNIFIED);
    }

    #[test]
    fn test_resolve_by_height() {
        let rule = PriceRule::parse(Some("600 грн/шт (1м) / 800 грн/шт (1,4м+)"));
        let tag = HeightTag::from("1,4м+");
        assert_eq!(rule.resolve(Some(&tag)).unwrap().price, Price::new(800));
    }

    #[test]
    fn test_resolve_unknown_height_falls_back_to_first() {
        let rule = PriceRule::parse(Some("600 грн/шт (1м) / 800 грн/шт (1,4м+)"));
        let tag = HeightTag::from("2м");
        assert_eq!(rule.resolve(Some(&tag)).unwrap().price, Price::new(600));
    }

    #[test]
    fn test_first_available_skips_unavailable_tiers() {
        let rule = PriceRule::parse(Some("!600 грн/шт (1м) / 800 грн/шт (1,4м+)"));
        assert_eq!(rule.first_available().unwrap().height.as_str(), "1,4м+");
    }
}
