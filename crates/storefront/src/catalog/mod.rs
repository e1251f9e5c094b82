//! Product catalog.
//!
//! The catalog is the read-only, authoritative source of prices and stock.
//! Everything that holds product data for a while (the cart, submitted
//! orders) re-resolves it through [`ProductLookup`] instead of trusting its
//! own copy.
//!
//! # Example
//!
//! ```rust
//! use oleh_garden_core::{HeightTag, ProductId};
//! use oleh_garden_storefront::catalog::{Catalog, ProductLookup};
//!
//! let catalog = Catalog::builtin();
//! let product = catalog.find_by_id(ProductId::new(1)).expect("seeded product");
//! let resolved = product.resolve(Some(&HeightTag::from("1м"))).expect("priced");
//! assert!(resolved.price.amount() > 0);
//! ```

mod filter;
mod pricing;
mod seed;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use oleh_garden_core::{Availability, HeightTag, Price, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use filter::{Category, FilterOptions, ProductFilter};
pub use pricing::{PriceOption, PriceRule};

/// Errors that can occur when loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid JSON for a product list.
    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an id.
    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}

/// Growing notes shown on the product page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cultivation {
    pub planting: String,
    pub care: String,
    pub bearing_period: String,
}

/// A cultivar offered by the nursery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub species: String,
    pub image: String,
    /// Raw price text, see [`PriceRule::parse`].
    #[serde(default)]
    pub price: Option<String>,
    /// Current stock flag for the product as a whole.
    #[serde(default)]
    pub stock: Availability,
    pub ripening_term: String,
    pub fruits: String,
    pub taste: String,
    pub self_fertility: String,
    #[serde(rename = "yield")]
    pub yield_: String,
    pub frost_resistance: String,
    pub rootstock: String,
    pub cultivation: Cultivation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soil: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disease_resistance: Option<String>,
}

/// Price and stock of a product for one height tier, as of now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrice {
    pub height: HeightTag,
    pub price: Price,
    pub label: String,
    pub availability: Availability,
}

impl Product {
    /// Parsed price tiers.
    #[must_use]
    pub fn price_rule(&self) -> PriceRule {
        PriceRule::parse(self.price.as_deref())
    }

    /// Resolve the current price and availability for a height tier.
    ///
    /// A tier marked unavailable resolves to `OutOfStock`; otherwise the
    /// product's stock flag applies.
    #[must_use]
    pub fn resolve(&self, height: Option<&HeightTag>) -> Option<ResolvedPrice> {
        let rule = self.price_rule();
        let option = rule.resolve(height)?;
        let availability = if option.available {
            self.stock
        } else {
            Availability::OutOfStock
        };
        Some(ResolvedPrice {
            height: option.height.clone(),
            price: option.price,
            label: option.label.clone(),
            availability,
        })
    }
}

/// Why a product can no longer be put in a cart or ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Unsellable {
    #[error("product {0} is no longer in the catalog")]
    Unknown(ProductId),

    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),
}

impl Unsellable {
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        match self {
            Self::Unknown(id) | Self::OutOfStock(id) => *id,
        }
    }
}

/// Lookup contract consumed by the cart and order submission.
pub trait ProductLookup {
    /// Find a product by id; `None` once a product leaves the catalog.
    fn find_by_id(&self, id: ProductId) -> Option<&Product>;

    /// Resolve a line against the current catalog, rejecting products that
    /// are gone or out of stock.
    ///
    /// # Errors
    ///
    /// Returns `Unsellable` when the product is unknown or its resolved
    /// tier is out of stock.
    fn resolve_for_sale(
        &self,
        id: ProductId,
        height: Option<&HeightTag>,
    ) -> Result<(&Product, ResolvedPrice), Unsellable> {
        let product = self.find_by_id(id).ok_or(Unsellable::Unknown(id))?;
        let resolved = product
            .resolve(height)
            .filter(|r| r.availability.is_sellable())
            .ok_or(Unsellable::OutOfStock(id))?;
        Ok((product, resolved))
    }
}

impl<T: ProductLookup + ?Sized> ProductLookup for &T {
    fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        (**self).find_by_id(id)
    }
}

impl<T: ProductLookup + ?Sized> ProductLookup for Arc<T> {
    fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        (**self).find_by_id(id)
    }
}

/// In-memory catalog indexed by product id.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog from a product list.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products, index })
    }

    /// The catalog shipped with the storefront.
    #[must_use]
    pub fn builtin() -> Self {
        let products = seed::products();
        let index = products
            .iter()
            .enumerate()
            .map(|(position, product)| (product.id, position))
            .collect();
        Self { products, index }
    }

    /// Load a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// contains duplicate ids.
    pub fn from_json_file(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let products: Vec<Product> = serde_json::from_str(&raw)?;
        Self::new(products)
    }

    /// All products in listing order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Products matching a filter, in listing order.
    #[must_use]
    pub fn filter(&self, filter: &ProductFilter) -> Vec<&Product> {
        self.products.iter().filter(|p| filter.matches(p)).collect()
    }

    /// Values available for each filter.
    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::collect(&self.products)
    }
}

impl ProductLookup for Catalog {
    fn find_by_id(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|&position| self.products.get(position))
    }
}
