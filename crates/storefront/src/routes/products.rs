//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use oleh_garden_core::ProductId;
use serde::Serialize;
use tracing::instrument;

use crate::catalog::{Category, FilterOptions, PriceOption, Product, ProductFilter, ProductLookup};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product with its parsed price tiers, as shown on the product page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    #[serde(flatten)]
    pub product: Product,
    pub category: Category,
    pub price_options: Vec<PriceOption>,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            category: Category::of(&product.species),
            price_options: product.price_rule().options().to_vec(),
            product: product.clone(),
        }
    }
}

/// List products, optionally filtered by category and rootstock.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> Json<Vec<ProductView>> {
    let products = state
        .catalog()
        .filter(&filter)
        .into_iter()
        .map(ProductView::from)
        .collect();
    Json(products)
}

/// Distinct values for the catalog filters.
pub async fn filters(State(state): State<AppState>) -> Json<FilterOptions> {
    Json(state.catalog().filter_options())
}

/// Show a single product.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<ProductView>> {
    let product = id
        .parse::<ProductId>()
        .ok()
        .and_then(|id| state.catalog().find_by_id(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(ProductView::from(product)))
}
