//! Order submission.
//!
//! Orders are not stored; a validated order is rendered as a Telegram message
//! and sent to the shop's chat, where it is processed by hand.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::order::{OrderRequest, render_message};
use crate::state::AppState;

/// Validate an order and forward it to Telegram.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    payload: std::result::Result<Json<OrderRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let Json(request) = payload?;
    let order = request.validate(state.catalog())?;

    let telegram = state
        .telegram()
        .ok_or(AppError::NotConfigured("Telegram"))?;

    let text = render_message(
        &order,
        &state.config().store_name,
        chrono::Local::now().naive_local(),
    );
    telegram.send_message(&text).await?;

    let lines = order.lines.len().to_string();
    let amount = order.total_amount().to_string();
    add_breadcrumb(
        "order",
        "Order sent to Telegram",
        Some(&[("lines", lines.as_str()), ("amount", amount.as_str())]),
    );
    tracing::info!(lines = order.lines.len(), amount = order.total_amount(), "Order submitted");

    Ok(Json(json!({ "success": true })))
}
