//! Nova Poshta JSON API request and response types.
//!
//! Only the fields the order form relies on are typed; everything else the
//! API returns is kept in `other` and passed through unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope of every API call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiRequest<'a, P> {
    pub api_key: &'a str,
    pub model_name: &'static str,
    pub called_method: &'static str,
    pub method_properties: P,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct SearchSettlementsProperties<'a> {
    pub city_name: &'a str,
    pub page: &'a str,
    pub limit: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct GetWarehousesProperties<'a> {
    pub city_ref: &'a str,
    pub page: &'a str,
    pub limit: &'a str,
}

/// Envelope of every API response.
#[derive(Debug, Deserialize)]
pub(super) struct ApiResponse<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
}

/// One `searchSettlements` result page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct SettlementSearch {
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub addresses: Vec<Settlement>,
}

/// A settlement matched by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Settlement {
    /// Display name, e.g. `м. Умань, Уманський р-н, Черкаська обл.`.
    #[serde(default)]
    pub present: String,
    #[serde(default)]
    pub main_description: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub region: String,
    #[serde(default, rename = "Ref")]
    pub settlement_ref: String,
    /// City ref to pass to the warehouse lookup.
    #[serde(default)]
    pub delivery_city: String,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// A branch or parcel locker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Warehouse {
    #[serde(default, rename = "Ref")]
    pub warehouse_ref: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub short_address: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub city_ref: String,
    #[serde(default)]
    pub city_description: String,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Settlements matching a search, with the API's total count.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementPage {
    pub settlements: Vec<Settlement>,
    pub total: u64,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_request_envelope() {
        let request = ApiRequest {
            api_key: "key",
            model_name: "AddressGeneral",
            called_method: "getWarehouses",
            method_properties: GetWarehousesProperties {
                city_ref: "city",
                page: "1",
                limit: "50",
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "apiKey": "key",
                "modelName": "AddressGeneral",
                "calledMethod": "getWarehouses",
                "methodProperties": {"CityRef": "city", "Page": "1", "Limit": "50"}
            })
        );
    }

    #[test]
    fn test_settlement_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "Present": "м. Умань",
            "Warehouses": 21,
            "MainDescription": "Умань",
            "Area": "Черкаська",
            "Region": "Уманський",
            "Ref": "s-ref",
            "DeliveryCity": "c-ref",
            "StreetsAvailability": true
        });
        let settlement: Settlement = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(settlement.delivery_city, "c-ref");
        assert_eq!(settlement.settlement_ref, "s-ref");
        assert_eq!(serde_json::to_value(&settlement).unwrap(), raw);
    }

    #[test]
    fn test_response_with_errors() {
        let raw = r#"{"success": false, "data": [], "errors": ["API key expired"], "warnings": []}"#;
        let response: ApiResponse<Warehouse> = serde_json::from_str(raw).unwrap();
        assert!(!response.success);
        assert_eq!(response.errors[0], "API key expired");
    }
}
