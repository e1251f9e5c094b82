//! Nova Poshta lookups for the delivery part of the order form.
//!
//! The form first searches settlements by name, then lists the warehouses of
//! the chosen settlement's `DeliveryCity`.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::NovaPoshtaClient;
use crate::services::novaposhta::{Paging, Settlement, Warehouse};
use crate::state::AppState;

/// Page or limit, sent by the form either as text or as a number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PageParam {
    Text(String),
    Number(u64),
}

impl PageParam {
    fn into_text(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Body of `POST /api/novapost/divisions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementQuery {
    #[serde(default)]
    pub city_name: Option<Value>,
    #[serde(default)]
    pub page: Option<PageParam>,
    #[serde(default)]
    pub limit: Option<PageParam>,
}

/// Body of `POST /api/novapost/local-divisions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseQuery {
    #[serde(default)]
    pub delivery_city: Option<Value>,
    #[serde(default)]
    pub page: Option<PageParam>,
    #[serde(default)]
    pub limit: Option<PageParam>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementsResponse {
    pub success: bool,
    pub data: Vec<Settlement>,
    pub total: u64,
    pub city_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehousesResponse {
    pub success: bool,
    pub data: Vec<Warehouse>,
    pub total: usize,
    pub delivery_city: String,
}

/// A non-blank JSON string, or `None`.
fn required_text(value: Option<Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Some(text),
        _ => None,
    }
}

fn client(state: &AppState) -> Result<&NovaPoshtaClient> {
    state
        .nova_poshta()
        .ok_or(AppError::NotConfigured("Nova Poshta"))
}

/// Search settlements by name.
#[instrument(skip_all)]
pub async fn divisions(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SettlementQuery>, JsonRejection>,
) -> Result<Json<SettlementsResponse>> {
    let Json(query) = payload?;
    let city_name = required_text(query.city_name).ok_or_else(|| {
        AppError::BadRequest("City name is required and must be a string".to_string())
    })?;
    let client = client(&state)?;

    let page = query.page.map(PageParam::into_text);
    let limit = query.limit.map(PageParam::into_text);
    let found = client
        .search_settlements(
            &city_name,
            Paging {
                page: page.as_deref(),
                limit: limit.as_deref(),
            },
        )
        .await?;

    Ok(Json(SettlementsResponse {
        success: true,
        data: found.settlements.clone(),
        total: found.total,
        city_name,
    }))
}

/// List the warehouses of a city.
#[instrument(skip_all)]
pub async fn local_divisions(
    State(state): State<AppState>,
    payload: std::result::Result<Json<WarehouseQuery>, JsonRejection>,
) -> Result<Json<WarehousesResponse>> {
    let Json(query) = payload?;
    let delivery_city = required_text(query.delivery_city).ok_or_else(|| {
        AppError::BadRequest(
            "DeliveryCity (city reference) is required and must be a string".to_string(),
        )
    })?;
    let client = client(&state)?;

    let page = query.page.map(PageParam::into_text);
    let limit = query.limit.map(PageParam::into_text);
    let warehouses = client
        .warehouses(
            &delivery_city,
            Paging {
                page: page.as_deref(),
                limit: limit.as_deref(),
            },
        )
        .await?;

    Ok(Json(WarehousesResponse {
        success: true,
        total: warehouses.len(),
        data: warehouses.as_ref().clone(),
        delivery_city,
    }))
}

/// Usage description for `GET /api/novapost/divisions`.
pub async fn divisions_usage() -> Json<Value> {
    Json(json!({
        "message": "Nova Poshta Divisions API",
        "description": "POST endpoint for searching Nova Poshta divisions by city",
        "usage": {
            "method": "POST",
            "body": {
                "cityName": "string (required) - Name of the city",
                "page": "string (optional) - Page number, default: 1",
                "limit": "string (optional) - Number of results per page, default: 50"
            },
            "example": {
                "cityName": "Київ",
                "page": "1",
                "limit": "20"
            }
        }
    }))
}

/// Usage description for `GET /api/novapost/local-divisions`.
pub async fn local_divisions_usage() -> Json<Value> {
    Json(json!({
        "message": "Nova Poshta Local Divisions API",
        "description": "POST endpoint for getting Nova Poshta warehouses by city reference",
        "usage": {
            "method": "POST",
            "body": {
                "deliveryCity": "string (required) - City reference (DeliveryCity from searchSettlements)",
                "page": "string (optional) - Page number, default: 1",
                "limit": "string (optional) - Number of results per page, default: 50"
            },
            "example": {
                "deliveryCity": "8d5a980d-391c-11dd-90d9-001a92567626",
                "page": "1",
                "limit": "20"
            }
        },
        "note": "Use deliveryCity from the searchSettlements API response"
    }))
}
