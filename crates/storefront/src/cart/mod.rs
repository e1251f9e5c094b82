//! Cart state container.
//!
//! [`Cart`] owns the shopping cart of one session. It is the only thing that
//! mutates [`CartState`], writes every change to a [`CartStore`], and on
//! session start rebuilds itself from the store against the current catalog
//! (see [`Cart::hydrate`]).
//!
//! None of the operations fail. Unknown ids are ignored, out-of-stock items
//! are refused silently, and storage failures are logged and otherwise
//! ignored so the in-memory state stays authoritative.
//!
//! # Example
//!
//! ```rust
//! use oleh_garden_core::ProductId;
//! use oleh_garden_storefront::cart::{Cart, MemoryStore, NewCartItem};
//! use oleh_garden_storefront::catalog::{Catalog, ProductLookup};
//!
//! let catalog = Catalog::builtin();
//! let item = catalog
//!     .find_by_id(ProductId::new(2))
//!     .and_then(|p| NewCartItem::from_product(p, None))
//!     .expect("seeded product");
//!
//! let mut cart = Cart::new(MemoryStore::new(), &catalog);
//! cart.hydrate();
//! cart.add(item, 2);
//! assert_eq!(cart.total_items(), 2);
//! ```

mod hydrate;
pub mod store;

use oleh_garden_core::{Availability, HeightTag, Price, ProductId};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

pub use store::{CartStore, FileStore, MemoryStore, StoreError};

use crate::catalog::{Product, ProductLookup};

/// Storage key of the persisted cart.
pub const STORAGE_KEY: &str = "cart:v1";

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: ProductId,
    /// Snapshot taken when the item was added.
    pub title: String,
    /// Snapshot taken when the item was added.
    pub image: String,
    pub price: Price,
    pub qty: u32,
    pub availability: Availability,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<HeightTag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_label: Option<String>,
}

impl CartItem {
    /// `price * qty`.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.price.line_total(self.qty)
    }
}

/// Item as offered to [`Cart::add`], without a quantity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCartItem {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub price: Price,
    pub availability: Availability,
    pub height: Option<HeightTag>,
    pub price_label: Option<String>,
}

impl NewCartItem {
    /// Build the item a product page would add for the given height tier.
    ///
    /// Products sold in a single tier carry no height tag.
    #[must_use]
    pub fn from_product(product: &Product, height: Option<&HeightTag>) -> Option<Self> {
        let resolved = product.resolve(height)?;
        let height = product.price_rule().is_tiered().then_some(resolved.height);
        Some(Self {
            id: product.id,
            title: product.title.clone(),
            image: product.image.clone(),
            price: resolved.price,
            availability: resolved.availability,
            height,
            price_label: Some(resolved.label),
        })
    }
}

/// Ordered cart lines, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartState {
    pub items: Vec<CartItem>,
}

impl CartState {
    /// Sum of all quantities.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |total, item| total.saturating_add(item.qty))
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn total_price(&self) -> u64 {
        self.items
            .iter()
            .fold(0_u64, |total, item| total.saturating_add(item.line_total()))
    }

    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn find_mut(&mut self, id: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    /// Returns whether anything changed.
    fn add(&mut self, item: NewCartItem, qty: u32) -> bool {
        if qty == 0 || !item.availability.is_sellable() {
            return false;
        }

        if let Some(existing) = self.find_mut(item.id) {
            existing.qty = existing.qty.saturating_add(qty);
            return true;
        }

        self.items.push(CartItem {
            id: item.id,
            title: item.title,
            image: item.image,
            price: item.price,
            qty,
            availability: item.availability,
            height: item.height,
            price_label: item.price_label,
        });
        true
    }

    fn remove(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    fn inc(&mut self, id: ProductId) -> bool {
        self.find_mut(id).is_some_and(|item| {
            item.qty = item.qty.saturating_add(1);
            true
        })
    }

    fn dec(&mut self, id: ProductId) -> bool {
        self.find_mut(id).is_some_and(|item| {
            if item.qty > 1 {
                item.qty -= 1;
                true
            } else {
                false
            }
        })
    }
}

/// Progress of the one-shot load from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HydrationState {
    #[default]
    Uninitialized,
    Hydrating,
    Hydrated,
}

/// What subscribers see after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    /// Zero until hydrated, like [`Cart::total_items`].
    pub total_items: u32,
    pub hydrated: bool,
}

/// A mutation issued before hydration.
#[derive(Debug, Clone)]
enum PendingOp {
    Add(NewCartItem, u32),
    Remove(ProductId),
    Inc(ProductId),
    Dec(ProductId),
    Clear,
}

/// Shopping cart of one session.
///
/// Mutations issued before [`Cart::hydrate`] only touch memory and are
/// logged; hydration replays them in order over the stored cart and persists
/// the result.
pub struct Cart<S, C> {
    state: CartState,
    hydration: HydrationState,
    pending: Vec<PendingOp>,
    store: S,
    catalog: C,
    key: String,
    changes: watch::Sender<CartSnapshot>,
}

impl<S: CartStore, C: ProductLookup> Cart<S, C> {
    /// Create an empty, not yet hydrated cart stored under [`STORAGE_KEY`].
    pub fn new(store: S, catalog: C) -> Self {
        let (changes, _) = watch::channel(CartSnapshot::default());
        Self {
            state: CartState::default(),
            hydration: HydrationState::Uninitialized,
            pending: Vec::new(),
            store,
            catalog,
            key: STORAGE_KEY.to_owned(),
            changes,
        }
    }

    /// Use a different storage key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub const fn hydration_state(&self) -> HydrationState {
        self.hydration
    }

    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.hydration == HydrationState::Hydrated
    }

    /// Load the stored cart, re-resolving every line against the catalog.
    ///
    /// Lines whose product is gone or out of stock are dropped; a blob that
    /// cannot be read or parsed yields an empty cart. Runs once per session,
    /// later calls do nothing.
    pub fn hydrate(&mut self) {
        if self.hydration != HydrationState::Uninitialized {
            return;
        }
        self.hydration = HydrationState::Hydrating;

        let stored = match self.store.read(&self.key) {
            Ok(Some(blob)) => match hydrate::parse(&blob) {
                Ok(cart) => cart.items,
                Err(e) => {
                    warn!(key = %self.key, error = %e, "Discarding malformed stored cart");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read stored cart");
                Vec::new()
            }
        };

        let pending = std::mem::take(&mut self.pending);
        let replay = !pending.is_empty();

        self.state = hydrate::rehydrate(&self.catalog, stored);
        for op in pending {
            match op {
                PendingOp::Add(item, qty) => {
                    let line = hydrate::PersistedItem::from_new(item, qty);
                    if let Some((item, qty)) = hydrate::resolve(&self.catalog, line) {
                        self.state.add(item, qty);
                    }
                }
                PendingOp::Remove(id) => {
                    self.state.remove(id);
                }
                PendingOp::Inc(id) => {
                    self.state.inc(id);
                }
                PendingOp::Dec(id) => {
                    self.state.dec(id);
                }
                PendingOp::Clear => self.state.items.clear(),
            }
        }
        self.hydration = HydrationState::Hydrated;
        debug!(
            key = %self.key,
            lines = self.state.items.len(),
            "Cart hydrated"
        );

        if replay {
            self.persist();
        }
        self.notify();
    }

    /// Current lines, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.state.items
    }

    #[must_use]
    pub const fn state(&self) -> &CartState {
        &self.state
    }

    /// Sum of quantities, reported as zero until hydrated.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        if self.is_hydrated() {
            self.state.total_items()
        } else {
            0
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Receive a [`CartSnapshot`] after every change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.changes.subscribe()
    }

    /// Add `qty` of an item, accumulating onto an existing line with the
    /// same id. Out-of-stock items and a zero quantity are ignored.
    pub fn add(&mut self, item: NewCartItem, qty: u32) {
        let id = item.id;
        let op = (!self.is_hydrated()).then(|| PendingOp::Add(item.clone(), qty));
        if self.state.add(item, qty) {
            self.pending.extend(op);
            self.commit();
        } else {
            debug!(product_id = %id, qty, "Ignoring add");
        }
    }

    /// Remove the line with `id`, if any.
    pub fn remove(&mut self, id: ProductId) {
        self.log(PendingOp::Remove(id));
        if self.state.remove(id) {
            self.commit();
        }
    }

    /// Increase the quantity of `id` by one.
    pub fn inc(&mut self, id: ProductId) {
        self.log(PendingOp::Inc(id));
        if self.state.inc(id) {
            self.commit();
        }
    }

    /// Decrease the quantity of `id` by one, never below one.
    pub fn dec(&mut self, id: ProductId) {
        self.log(PendingOp::Dec(id));
        if self.state.dec(id) {
            self.commit();
        }
    }

    /// Empty the cart and persist the empty state.
    pub fn clear(&mut self) {
        self.log(PendingOp::Clear);
        self.state.items.clear();
        self.commit();
    }

    /// Record `op` for replay by [`Cart::hydrate`]. The target line may
    /// exist only in storage, so ops are kept even when they changed nothing.
    fn log(&mut self, op: PendingOp) {
        if !self.is_hydrated() {
            self.pending.push(op);
        }
    }

    fn commit(&mut self) {
        if self.is_hydrated() {
            self.persist();
        }
        self.notify();
    }

    fn persist(&self) {
        let blob = match serde_json::to_string(&self.state) {
            Ok(blob) => blob,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.store.write(&self.key, &blob) {
            warn!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }

    fn notify(&self) {
        self.changes.send_replace(CartSnapshot {
            items: self.state.items.clone(),
            total_items: self.total_items(),
            hydrated: self.is_hydrated(),
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::catalog::tests::product;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            product(1, Some("100 грн/шт"), Availability::InStock),
            product(3, Some("900 грн/шт"), Availability::OutOfStock),
            product(7, Some("650 грн/шт"), Availability::InStock),
            product(8, Some("600 грн/шт (1м) / 800 грн/шт (1,4м+)"), Availability::Limited),
        ])
        .unwrap()
    }

    fn item(id: i32, price: u32, availability: Availability) -> NewCartItem {
        NewCartItem {
            id: ProductId::new(id),
            title: format!("Сорт {id}"),
            image: String::new(),
            price: Price::new(price),
            availability,
            height: None,
            price_label: None,
        }
    }

    fn hydrated(store: MemoryStore) -> Cart<MemoryStore, Catalog> {
        let mut cart = Cart::new(store, catalog());
        cart.hydrate();
        cart
    }

    fn stored(store: &MemoryStore) -> CartState {
        serde_json::from_str(&store.read(STORAGE_KEY).unwrap().unwrap()).unwrap()
    }

    /// Store whose every operation fails.
    struct BrokenStore;

    impl CartStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Poisoned)
        }

        fn write(&self, _key: &str, _blob: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    #[test]
    fn test_repeated_adds_accumulate_on_one_line() {
        let mut cart = hydrated(MemoryStore::new());
        cart.add(item(1, 100, Availability::InStock), 1);
        cart.add(item(7, 650, Availability::InStock), 1);
        cart.add(item(1, 100, Availability::InStock), 2);
        cart.add(item(1, 100, Availability::InStock), 4);

        let lines: Vec<_> = cart.items().iter().filter(|i| i.id.as_i32() == 1).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].qty, 7);
        assert_eq!(cart.items()[0].id, ProductId::new(1));
    }

    #[test]
    fn test_dec_floors_at_one() {
        let mut cart = hydrated(MemoryStore::new());
        cart.add(item(1, 100, Availability::InStock), 1);
        cart.dec(ProductId::new(1));
        cart.dec(ProductId::new(1));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].qty, 1);
    }

    #[test]
    fn test_remove_drops_line_regardless_of_qty() {
        let mut cart = hydrated(MemoryStore::new());
        cart.add(item(1, 100, Availability::InStock), 9);
        cart.add(item(7, 650, Availability::InStock), 1);
        cart.remove(ProductId::new(1));
        assert!(cart.items().iter().all(|i| i.id != ProductId::new(1)));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_clear_twice_leaves_empty_cart() {
        let store = MemoryStore::new();
        let mut cart = hydrated(store.clone());
        cart.add(item(1, 100, Availability::InStock), 2);

        cart.clear();
        assert!(cart.items().is_empty());
        assert_eq!(cart.total_items(), 0);
        cart.clear();
        assert!(cart.items().is_empty());
        assert_eq!(cart.total_items(), 0);
        assert!(stored(&store).items.is_empty());
    }

    #[test]
    fn test_out_of_stock_add_is_ignored() {
        let store = MemoryStore::new();
        let mut cart = hydrated(store.clone());
        cart.add(item(1, 100, Availability::InStock), 1);
        let before = cart.items().to_vec();

        cart.add(item(3, 900, Availability::OutOfStock), 1);
        cart.add(item(1, 100, Availability::OutOfStock), 5);

        assert_eq!(cart.items(), before.as_slice());
        assert_eq!(stored(&store).items, before);
    }

    #[test]
    fn test_zero_qty_add_is_ignored() {
        let mut cart = hydrated(MemoryStore::new());
        cart.add(item(1, 100, Availability::InStock), 0);
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let mut cart = hydrated(MemoryStore::new());
        cart.add(item(1, 100, Availability::InStock), 1);
        cart.inc(ProductId::new(99));
        cart.dec(ProductId::new(99));
        cart.remove(ProductId::new(99));
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_inc_increments_by_one() {
        let mut cart = hydrated(MemoryStore::new());
        cart.add(item(7, 650, Availability::InStock), 1);
        cart.inc(ProductId::new(7));
        assert_eq!(cart.items()[0].qty, 2);
    }

    #[test]
    fn test_rehydration_reprices() {
        let blob = r#"{"items":[{"id":7,"title":"Сорт 7","image":"","price":500,"qty":2,"availability":"in_stock"}]}"#;
        let cart = hydrated(MemoryStore::with_entry(STORAGE_KEY, blob));

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].price, Price::new(650));
        assert_eq!(cart.items()[0].qty, 2);
    }

    #[test]
    fn test_rehydration_drops_out_of_stock() {
        let blob = r#"{"items":[
            {"id":3,"title":"Сорт 3","image":"","price":900,"qty":1,"availability":"in_stock"},
            {"id":7,"title":"Сорт 7","image":"","price":650,"qty":1,"availability":"in_stock"}
        ]}"#;
        let cart = hydrated(MemoryStore::with_entry(STORAGE_KEY, blob));
        assert!(cart.items().iter().all(|i| i.id != ProductId::new(3)));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_total_items_gated_until_hydrated() {
        let blob = r#"{"items":[{"id":7,"title":"","image":"","price":650,"qty":4,"availability":"in_stock"}]}"#;
        let mut cart = Cart::new(MemoryStore::with_entry(STORAGE_KEY, blob), catalog());
        assert_eq!(cart.hydration_state(), HydrationState::Uninitialized);
        assert_eq!(cart.total_items(), 0);

        cart.hydrate();
        assert_eq!(cart.hydration_state(), HydrationState::Hydrated);
        assert_eq!(cart.total_items(), 4);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let store = MemoryStore::new();
        let mut cart = hydrated(store.clone());
        let id = ProductId::new(1);

        cart.add(item(1, 100, Availability::InStock), 1);
        cart.add(item(1, 100, Availability::InStock), 2);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].qty, 3);
        assert_eq!(cart.total_items(), 3);

        cart.dec(id);
        cart.dec(id);
        cart.dec(id);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].qty, 1);

        cart.remove(id);
        assert!(cart.items().is_empty());
        assert!(stored(&store).items.is_empty());
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let store = MemoryStore::new();
        let mut cart = hydrated(store.clone());
        cart.add(item(7, 650, Availability::InStock), 2);
        assert_eq!(stored(&store).items[0].qty, 2);
        cart.inc(ProductId::new(7));
        assert_eq!(stored(&store).items[0].qty, 3);
        cart.dec(ProductId::new(7));
        assert_eq!(stored(&store).items[0].qty, 2);
    }

    #[test]
    fn test_stored_layout_is_camel_case() {
        let store = MemoryStore::new();
        let mut cart = hydrated(store.clone());
        let product = cart.catalog().find_by_id(ProductId::new(8)).unwrap().clone();
        let tall = HeightTag::from("1,4м+");
        cart.add(NewCartItem::from_product(&product, Some(&tall)).unwrap(), 1);

        let blob: serde_json::Value =
            serde_json::from_str(&store.read(STORAGE_KEY).unwrap().unwrap()).unwrap();
        let line = &blob["items"][0];
        assert_eq!(line["id"], 8);
        assert_eq!(line["price"], 800);
        assert_eq!(line["availability"], "limited");
        assert_eq!(line["height"], "1,4м+");
        assert_eq!(line["priceLabel"], "800 грн/шт (1,4м+)");
    }

    #[test]
    fn test_reload_round_trip() {
        let store = MemoryStore::new();
        let mut first = hydrated(store.clone());
        first.add(item(7, 650, Availability::InStock), 2);
        first.add(item(1, 100, Availability::InStock), 1);

        let second = hydrated(store);
        let summary = |cart: &Cart<MemoryStore, Catalog>| {
            cart.items()
                .iter()
                .map(|i| (i.id, i.qty, i.price))
                .collect::<Vec<_>>()
        };
        assert_eq!(summary(&second), summary(&first));
    }

    #[test]
    fn test_malformed_blob_starts_empty() {
        let mut cart = hydrated(MemoryStore::with_entry(STORAGE_KEY, "{not json"));
        assert!(cart.items().is_empty());
        assert!(cart.is_hydrated());

        cart.add(item(1, 100, Availability::InStock), 1);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn test_storage_failures_are_swallowed() {
        let mut cart = Cart::new(BrokenStore, catalog());
        cart.hydrate();
        assert!(cart.is_hydrated());

        cart.add(item(1, 100, Availability::InStock), 2);
        cart.inc(ProductId::new(1));
        assert_eq!(cart.total_items(), 3);
        cart.clear();
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_hydrate_is_one_shot() {
        let store = MemoryStore::new();
        let mut cart = hydrated(store.clone());
        cart.add(item(1, 100, Availability::InStock), 1);

        let blob = r#"{"items":[{"id":7,"qty":5}]}"#;
        store.write(STORAGE_KEY, blob).unwrap();
        cart.hydrate();

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].id, ProductId::new(1));
    }

    #[test]
    fn test_pre_hydration_adds_merge_without_clobbering() {
        let blob = r#"{"items":[{"id":7,"title":"Сорт 7","image":"","qty":2}]}"#;
        let store = MemoryStore::with_entry(STORAGE_KEY, blob);
        let mut cart = Cart::new(store.clone(), catalog());

        cart.add(item(7, 1, Availability::InStock), 1);
        cart.add(item(1, 100, Availability::InStock), 1);
        // Not written before hydration.
        assert_eq!(store.read(STORAGE_KEY).unwrap().as_deref(), Some(blob));
        assert_eq!(cart.total_items(), 0);

        cart.hydrate();
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].qty, 3);
        assert_eq!(cart.items()[0].price, Price::new(650));
        assert_eq!(stored(&store).items, cart.items());
    }

    #[test]
    fn test_pre_hydration_remove_and_inc_apply_to_stored_lines() {
        let blob = r#"{"items":[{"id":7,"qty":2},{"id":1,"qty":1}]}"#;
        let store = MemoryStore::with_entry(STORAGE_KEY, blob);
        let mut cart = Cart::new(store.clone(), catalog());

        cart.remove(ProductId::new(7));
        cart.inc(ProductId::new(1));
        cart.hydrate();

        let lines: Vec<_> = cart.items().iter().map(|i| (i.id.as_i32(), i.qty)).collect();
        assert_eq!(lines, vec![(1, 2)]);
        assert_eq!(stored(&store).items, cart.items());
    }

    #[test]
    fn test_pre_hydration_clear_empties_stored_cart() {
        let blob = r#"{"items":[{"id":7,"qty":2},{"id":1,"qty":1}]}"#;
        let store = MemoryStore::with_entry(STORAGE_KEY, blob);
        let mut cart = Cart::new(store.clone(), catalog());

        cart.clear();
        cart.remove(ProductId::new(7));
        cart.hydrate();
        assert!(cart.items().is_empty());
        assert!(stored(&store).items.is_empty());

        let mut cart = Cart::new(store.clone(), catalog());
        cart.clear();
        cart.add(item(1, 100, Availability::InStock), 1);
        cart.hydrate();
        let lines: Vec<_> = cart.items().iter().map(|i| (i.id.as_i32(), i.qty)).collect();
        assert_eq!(lines, vec![(1, 1)]);
        assert_eq!(stored(&store).items, cart.items());
    }

    #[test]
    fn test_subscribers_see_changes() {
        let mut cart = hydrated(MemoryStore::new());
        let mut changes = cart.subscribe();
        assert!(changes.borrow_and_update().hydrated);

        cart.add(item(7, 650, Availability::InStock), 2);
        assert!(changes.has_changed().unwrap());
        let snapshot = changes.borrow_and_update().clone();
        assert_eq!(snapshot.total_items, 2);
        assert_eq!(snapshot.items.len(), 1);

        cart.remove(ProductId::new(42));
        assert!(!changes.has_changed().unwrap());
    }

    #[test]
    fn test_total_price() {
        let mut cart = hydrated(MemoryStore::new());
        cart.add(item(1, 100, Availability::InStock), 3);
        cart.add(item(7, 650, Availability::InStock), 2);
        assert_eq!(cart.state().total_price(), 1600);
    }
}
