//! Reading persisted carts back against the live catalog.
//!
//! A stored cart is a snapshot; prices change and cultivars sell out between
//! sessions. Only `id`, `qty` and `height` are trusted from the blob. Price,
//! availability and label are resolved again, and lines that can no longer
//! be sold are dropped.

use oleh_garden_core::{HeightTag, ProductId};
use serde::Deserialize;
use tracing::debug;

use super::{CartState, NewCartItem};
use crate::catalog::ProductLookup;

/// Stored cart layout.
///
/// Stored `price`, `availability` and `priceLabel` are never trusted, so they
/// are not read at all; older blobs that lack them load the same way.
#[derive(Debug, Deserialize)]
pub(super) struct PersistedCart {
    #[serde(default)]
    pub items: Vec<PersistedItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PersistedItem {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "one")]
    pub qty: u32,
    #[serde(default)]
    pub height: Option<HeightTag>,
}

const fn one() -> u32 {
    1
}

impl PersistedItem {
    /// A line about to be added with `qty`.
    pub(super) fn from_new(item: NewCartItem, qty: u32) -> Self {
        Self {
            id: item.id,
            title: item.title,
            image: item.image,
            qty,
            height: item.height,
        }
    }
}

/// Parse a stored blob.
pub(super) fn parse(blob: &str) -> Result<PersistedCart, serde_json::Error> {
    serde_json::from_str(blob)
}

/// Rebuild cart state from stored lines, in order.
///
/// Each line is re-resolved through the catalog; unknown or out-of-stock
/// products are dropped and `qty` is clamped to at least one. Lines sharing
/// an id are merged with add semantics.
pub(super) fn rehydrate<C, I>(catalog: &C, items: I) -> CartState
where
    C: ProductLookup + ?Sized,
    I: IntoIterator<Item = PersistedItem>,
{
    let mut state = CartState::default();
    for item in items {
        if let Some((new_item, qty)) = resolve(catalog, item) {
            state.add(new_item, qty);
        }
    }
    state
}

/// Re-resolve one line against the catalog, or `None` if it can no longer
/// be sold.
pub(super) fn resolve<C>(catalog: &C, item: PersistedItem) -> Option<(NewCartItem, u32)>
where
    C: ProductLookup + ?Sized,
{
    let (product, resolved) = match catalog.resolve_for_sale(item.id, item.height.as_ref()) {
        Ok(found) => found,
        Err(reason) => {
            debug!(product_id = %item.id, %reason, "Dropping cart line on rehydration");
            return None;
        }
    };

    // Single-tier products carry no tag, as in `NewCartItem::from_product`.
    let height = product.price_rule().is_tiered().then_some(resolved.height);

    let new_item = NewCartItem {
        id: item.id,
        title: item.title,
        image: item.image,
        price: resolved.price,
        availability: resolved.availability,
        height,
        price_label: Some(resolved.label),
    };
    Some((new_item, item.qty.max(1)))
}
