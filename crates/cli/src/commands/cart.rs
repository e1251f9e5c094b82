//! Cart commands.
//!
//! Every invocation is one session: the cart is hydrated from the data
//! directory, changed, and written back by the cart itself.

use std::fmt::Write as _;

use oleh_garden_core::{HeightTag, ProductId, group_thousands};
use oleh_garden_storefront::cart::{CartItem, NewCartItem};
use oleh_garden_storefront::catalog::ProductLookup;

use super::{CliError, FileCart};

/// Add `qty` of a product at the given height tier.
///
/// # Errors
///
/// Returns `CliError::UnknownProduct` for an id outside the catalog and
/// `CliError::NotSellable` when the chosen tier is out of stock.
pub fn add(cart: &mut FileCart, id: ProductId, height: Option<&str>, qty: u32) -> Result<(), CliError> {
    let height = height.map(HeightTag::from);
    let product = cart
        .catalog()
        .find_by_id(id)
        .ok_or(CliError::UnknownProduct(id))?;
    let item = NewCartItem::from_product(product, height.as_ref())
        .filter(|item| item.availability.is_sellable())
        .ok_or(CliError::NotSellable(id))?;

    cart.add(item, qty);
    Ok(())
}

/// Cart lines with line totals and the grand total.
pub fn format_cart(items: &[CartItem]) -> String {
    if items.is_empty() {
        return "Кошик порожній\n".to_owned();
    }

    let mut out = String::new();
    let mut count = 0_u64;
    let mut total = 0_u64;
    for item in items {
        let label = item
            .price_label
            .clone()
            .unwrap_or_else(|| item.price.label());
        let _ = writeln!(
            out,
            "{:>3}  {} × {}  {label} = {} грн",
            item.id,
            item.title,
            item.qty,
            group_thousands(item.line_total())
        );
        count += u64::from(item.qty);
        total += item.line_total();
    }
    let _ = writeln!(out, "Разом: {count} шт., {} грн", group_thousands(total));
    out
}

/// Print the cart.
#[allow(clippy::print_stdout)]
pub fn show(cart: &FileCart) {
    print!("{}", format_cart(cart.items()));
}
