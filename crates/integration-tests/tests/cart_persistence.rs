//! Cart sessions over a file store.
//!
//! Each test plays several sessions against the same data directory, the way
//! a returning visitor would, sometimes with the catalog changing between
//! visits.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use oleh_garden_core::{Availability, HeightTag, Price, ProductId};
use oleh_garden_integration_tests::{catalog, product};
use oleh_garden_storefront::cart::{Cart, CartStore, FileStore, NewCartItem, STORAGE_KEY};
use oleh_garden_storefront::catalog::{Catalog, ProductLookup};

fn item(catalog: &Catalog, id: i32, height: Option<&str>) -> NewCartItem {
    let height = height.map(HeightTag::from);
    let product = catalog.find_by_id(ProductId::new(id)).unwrap();
    NewCartItem::from_product(product, height.as_ref()).unwrap()
}

fn opening_catalog() -> Catalog {
    catalog(&[
        product(1, "Соснівська", Some("600 грн/шт (1м) / 800 грн/шт (1,4м+)"), "in_stock"),
        product(2, "Дар Софіївки", Some("800 грн/шт"), "in_stock"),
        product(3, "Чучупака", Some("650 грн/шт"), "limited"),
    ])
}

#[test]
fn test_cart_survives_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let opening = opening_catalog();

    {
        let mut cart = Cart::new(FileStore::new(dir.path()), &opening);
        cart.hydrate();
        cart.add(item(&opening, 1, Some("1,4м+")), 1);
        cart.add(item(&opening, 2, None), 2);
        cart.inc(ProductId::new(1));
    }

    let mut cart = Cart::new(FileStore::new(dir.path()), &opening);
    assert_eq!(cart.total_items(), 0, "nothing reported before hydration");
    cart.hydrate();

    assert_eq!(cart.total_items(), 4);
    let first = &cart.items()[0];
    assert_eq!(first.id, ProductId::new(1));
    assert_eq!(first.qty, 2);
    assert_eq!(first.height, Some(HeightTag::from("1,4м+")));
    assert_eq!(first.price, Price::new(800));
    assert_eq!(cart.state().total_price(), 3200);
}

#[test]
fn test_catalog_changes_between_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let opening = opening_catalog();

    {
        let mut cart = Cart::new(FileStore::new(dir.path()), &opening);
        cart.hydrate();
        cart.add(item(&opening, 1, Some("1м")), 1);
        cart.add(item(&opening, 2, None), 1);
        cart.add(item(&opening, 3, None), 3);
    }

    // Price raised for the small tier, product 2 sold out, product 3 retired.
    let next_season = catalog_next_season();

    let mut cart = Cart::new(FileStore::new(dir.path()), &next_season);
    cart.hydrate();

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].id, ProductId::new(1));
    assert_eq!(cart.items()[0].price, Price::new(700));
    assert_eq!(cart.items()[0].availability, Availability::InStock);
    assert_eq!(cart.total_items(), 1);
}

fn catalog_next_season() -> Catalog {
    catalog(&[
        product(1, "Соснівська", Some("700 грн/шт (1м) / 900 грн/шт (1,4м+)"), "in_stock"),
        product(2, "Дар Софіївки", Some("800 грн/шт"), "out_of_stock"),
    ])
}

#[test]
fn test_hydration_does_not_rewrite_unchanged_blob() {
    let dir = tempfile::tempdir().unwrap();
    let opening = opening_catalog();
    let store = FileStore::new(dir.path());

    {
        let mut cart = Cart::new(store.clone(), &opening);
        cart.hydrate();
        cart.add(item(&opening, 2, None), 1);
    }
    let before = store.read(STORAGE_KEY).unwrap().unwrap();

    // Hydrating against a catalog that dropped everything leaves the stored
    // cart alone until the next mutation.
    let empty = catalog(&[product(9, "Інша", None, "in_stock")]);
    let mut cart = Cart::new(store.clone(), &empty);
    cart.hydrate();
    assert_eq!(cart.total_items(), 0);
    assert_eq!(store.read(STORAGE_KEY).unwrap().unwrap(), before);

    cart.add(item(&empty, 9, None), 1);
    let after = store.read(STORAGE_KEY).unwrap().unwrap();
    assert!(after.contains("\"id\":9"));
    assert!(!after.contains("\"id\":2"));
}

#[test]
fn test_corrupted_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let opening = opening_catalog();
    let store = FileStore::new(dir.path());
    store.write(STORAGE_KEY, "{not json").unwrap();

    let mut cart = Cart::new(store.clone(), &opening);
    cart.hydrate();
    assert!(cart.is_hydrated());
    assert_eq!(cart.total_items(), 0);

    cart.add(item(&opening, 3, None), 2);
    let mut reopened = Cart::new(store, &opening);
    reopened.hydrate();
    assert_eq!(reopened.total_items(), 2);
}

#[test]
fn test_changes_before_hydration_are_merged() {
    let dir = tempfile::tempdir().unwrap();
    let opening = opening_catalog();

    {
        let mut cart = Cart::new(FileStore::new(dir.path()), &opening);
        cart.hydrate();
        cart.add(item(&opening, 2, None), 1);
    }

    let mut cart = Cart::new(FileStore::new(dir.path()), &opening);
    cart.add(item(&opening, 2, None), 1);
    cart.add(item(&opening, 3, None), 1);
    assert_eq!(cart.total_items(), 0);

    cart.hydrate();
    assert_eq!(cart.total_items(), 3);
    assert_eq!(cart.state().find(ProductId::new(2)).unwrap().qty, 2);

    let mut reopened = Cart::new(FileStore::new(dir.path()), &opening);
    reopened.hydrate();
    assert_eq!(reopened.total_items(), 3);
}

#[test]
fn test_clear_persists_empty_cart() {
    let dir = tempfile::tempdir().unwrap();
    let opening = opening_catalog();

    let mut cart = Cart::new(FileStore::new(dir.path()), &opening);
    cart.hydrate();
    cart.add(item(&opening, 1, None), 1);
    cart.clear();

    let mut reopened = Cart::new(FileStore::new(dir.path()), &opening);
    reopened.hydrate();
    assert!(reopened.items().is_empty());
}
