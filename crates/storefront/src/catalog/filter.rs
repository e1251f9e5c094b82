//! Catalog filtering and filter-option discovery.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Product;

/// Value meaning "no filter" in query strings.
const ALL: &str = "all";

/// Species families the storefront groups by.
const KNOWN_CATEGORIES: [&str; 3] = ["хурма", "персик", "абрикос"];

/// A product category derived from the species text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    /// Category of a species: the first known family it mentions, or the
    /// species itself.
    #[must_use]
    pub fn of(species: &str) -> Self {
        let lower = species.to_lowercase();
        KNOWN_CATEGORIES
            .iter()
            .find(|family| lower.contains(*family))
            .map_or_else(|| Self(species.to_owned()), |family| Self((*family).to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Product listing filter, deserialized from the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub category: Option<String>,
    pub rootstock: Option<String>,
}

impl ProductFilter {
    /// Whether a product passes every active criterion.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = active(self.category.as_deref())
            && !product
                .species
                .to_lowercase()
                .contains(&category.to_lowercase())
        {
            return false;
        }

        if let Some(rootstock) = active(self.rootstock.as_deref())
            && product.rootstock != rootstock
        {
            return false;
        }

        true
    }
}

fn active(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty() && *v != ALL)
}

/// Distinct values for each filter, sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub categories: Vec<Category>,
    pub rootstocks: Vec<String>,
    pub ripening_terms: Vec<String>,
    pub frost_resistance: Vec<String>,
    pub yields: Vec<String>,
}

impl FilterOptions {
    /// Collect filter values from a product list.
    #[must_use]
    pub fn collect(products: &[Product]) -> Self {
        let mut categories = BTreeSet::new();
        let mut rootstocks = BTreeSet::new();
        let mut ripening_terms = BTreeSet::new();
        let mut frost_resistance = BTreeSet::new();
        let mut yields = BTreeSet::new();

        for product in products {
            categories.insert(Category::of(&product.species));

            if has_data(&product.rootstock) {
                rootstocks.insert(product.rootstock.clone());
            }

            if has_data(&product.ripening_term) {
                ripening_terms.extend(
                    product
                        .ripening_term
                        .split(|c: char| c == ',' || c.is_whitespace())
                        .filter(|part| part.chars().count() > 2 && !part.contains('—'))
                        .map(str::to_owned),
                );
            }

            if let Some(level) = frost_level(&product.frost_resistance) {
                frost_resistance.insert(level.to_owned());
            }

            if let Some(level) = yield_level(&product.yield_) {
                yields.insert(level.to_owned());
            }
        }

        Self {
            categories: categories.into_iter().collect(),
            rootstocks: rootstocks.into_iter().collect(),
            ripening_terms: ripening_terms.into_iter().collect(),
            frost_resistance: frost_resistance.into_iter().collect(),
            yields: yields.into_iter().collect(),
        }
    }
}

fn has_data(value: &str) -> bool {
    !value.trim().is_empty() && value.trim() != "—"
}

fn frost_level(text: &str) -> Option<&'static str> {
    if !has_data(text) {
        return None;
    }
    let lower = text.to_lowercase();
    if lower.contains("висока") {
        Some("висока")
    } else if lower.contains("середня") || lower.contains("помірна") {
        Some("середня")
    } else if lower.contains("низька") || lower.contains("нижче середнього") {
        Some("низька")
    } else if lower.contains("хороша") {
        Some("хороша")
    } else {
        None
    }
}

fn yield_level(text: &str) -> Option<&'static str> {
    if !has_data(text) {
        return None;
    }
    let lower = text.to_lowercase();
    if lower.contains("дуже висока") {
        Some("дуже висока")
    } else if lower.contains("висока") {
        Some("висока")
    } else if lower.contains("хороша") {
        Some("хороша")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use oleh_garden_core::Availability;

    use super::*;
    use crate::catalog::Catalog;
    use crate::catalog::tests::product;

    #[test]
    fn test_category_of_known_family() {
        assert_eq!(Category::of("Хурма гібридна").as_str(), "хурма");
        assert_eq!(Category::of("персик звичайний").as_str(), "персик");
    }

    #[test]
    fn test_category_of_unknown_species_is_species() {
        assert_eq!(Category::of("інжир").as_str(), "інжир");
    }

    #[test]
    fn test_all_means_no_filter() {
        let filter = ProductFilter {
            category: Some("all".to_string()),
            rootstock: Some(String::new()),
        };
        assert!(filter.matches(&product(1, None, Availability::InStock)));
    }

    #[test]
    fn test_category_filter() {
        let mut peach = product(2, None, Availability::InStock);
        peach.species = "персик".to_string();
        let persimmon = product(1, None, Availability::InStock);

        let filter = ProductFilter {
            category: Some("персик".to_string()),
            rootstock: None,
        };
        assert!(filter.matches(&peach));
        assert!(!filter.matches(&persimmon));
    }

    #[test]
    fn test_rootstock_filter_is_exact() {
        let filter = ProductFilter {
            category: None,
            rootstock: Some("хурма кавказька".to_string()),
        };
        assert!(!filter.matches(&product(1, None, Availability::InStock)));
    }

    #[test]
    fn test_builtin_filter_options() {
        let options = Catalog::builtin().filter_options();
        assert_eq!(options.categories, vec![Category::of("хурма")]);
        assert_eq!(options.rootstocks, vec!["хурма вірджинська".to_string()]);
        assert!(options.frost_resistance.contains(&"висока".to_string()));
        assert!(options.yields.contains(&"дуже висока".to_string()));
        assert!(options.ripening_terms.contains(&"жовтня".to_string()));
    }
}
