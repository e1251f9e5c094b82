//! Catalog browsing commands.

use std::fmt::Write as _;

use oleh_garden_core::ProductId;
use oleh_garden_storefront::catalog::{Product, ProductFilter, ProductLookup};

use super::{CliError, Session};

/// One line per product: id, title, price text and stock.
pub fn format_listing(products: &[&Product]) -> String {
    let mut out = String::new();
    for product in products {
        let price = product
            .price_rule()
            .options()
            .iter()
            .map(|option| option.label.as_str())
            .collect::<Vec<_>>()
            .join(" / ");
        let _ = writeln!(
            out,
            "{:>3}  {}  [{}]  {}",
            product.id, product.title, product.stock, price
        );
    }
    out
}

/// Product details with every price tier.
pub fn format_product(product: &Product) -> String {
    let mut out = format!("#{} {}\n", product.id, product.title);
    let _ = writeln!(out, "Вид: {}", product.species);
    let _ = writeln!(out, "Підщепа: {}", product.rootstock);
    let _ = writeln!(out, "Дозрівання: {}", product.ripening_term);
    let _ = writeln!(out, "Морозостійкість: {}", product.frost_resistance);
    let _ = writeln!(out, "Наявність: {}", product.stock);
    out.push_str("Ціни:\n");
    for option in product.price_rule().options() {
        let marker = if option.available { "" } else { " (немає)" };
        let _ = writeln!(out, "  {}{marker}", option.label);
    }
    out
}

/// List products matching the filters.
#[allow(clippy::print_stdout)]
pub fn list(session: &Session, category: Option<String>, rootstock: Option<String>) {
    let filter = ProductFilter {
        category,
        rootstock,
    };
    let products = session.catalog().filter(&filter);
    if products.is_empty() {
        println!("No products match");
        return;
    }
    print!("{}", format_listing(&products));
}

/// Show a single product.
///
/// # Errors
///
/// Returns `CliError::UnknownProduct` if the id is not in the catalog.
#[allow(clippy::print_stdout)]
pub fn show(session: &Session, id: ProductId) -> Result<(), CliError> {
    let product = session
        .catalog()
        .find_by_id(id)
        .ok_or(CliError::UnknownProduct(id))?;
    print!("{}", format_product(product));
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use oleh_garden_storefront::catalog::Catalog;

    use super::*;

    #[test]
    fn test_listing_shows_tiers() {
        let catalog = Catalog::builtin();
        let product = catalog.find_by_id(ProductId::new(1)).unwrap();
        let listing = format_listing(&[product]);
        assert!(listing.contains("Соснівська"));
        assert!(listing.contains("600 грн/шт (1м) / 800 грн/шт (1,4м+)"));
    }

    #[test]
    fn test_product_marks_unavailable_tier() {
        let catalog = Catalog::builtin();
        let product = catalog.find_by_id(ProductId::new(3)).unwrap();
        let details = format_product(product);
        assert!(details.contains("850 грн/шт (1,4м+) (немає)"));
        assert!(!details.contains("650 грн/шт (1м) (немає)"));
    }
}
