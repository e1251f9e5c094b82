//! Nova Poshta address lookup client.
//!
//! Wraps the two calls the order form needs: settlement search by name
//! (`searchSettlements`) and the warehouse list of a city (`getWarehouses`).
//! Results are cached using `moka` (5-minute TTL); the form searches as the
//! customer types, so repeated queries are common.

mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

use crate::config::NovaPoshtaConfig;

pub use types::{Settlement, SettlementPage, Warehouse};
use types::{
    ApiRequest, ApiResponse, GetWarehousesProperties, SearchSettlementsProperties,
    SettlementSearch,
};

/// Page requested when the caller gives none.
pub const DEFAULT_PAGE: &str = "1";
/// Page size requested when the caller gives none.
pub const DEFAULT_LIMIT: &str = "50";

const MODEL_ADDRESS: &str = "AddressGeneral";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur when talking to the Nova Poshta API.
#[derive(Debug, Error)]
pub enum NovaPoshtaError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success HTTP status.
    #[error("API error: HTTP {0}")]
    Status(u16),

    /// API processed the call and reported errors.
    #[error("API rejected request: {}", .errors.join("; "))]
    Rejected {
        errors: Vec<String>,
        warnings: Vec<String>,
    },
}

/// Cached lookup results.
#[derive(Debug, Clone)]
enum CacheValue {
    Settlements(Arc<SettlementPage>),
    Warehouses(Arc<Vec<Warehouse>>),
}

/// Page selection for a lookup; blank values fall back to the defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paging<'a> {
    pub page: Option<&'a str>,
    pub limit: Option<&'a str>,
}

impl<'a> Paging<'a> {
    fn page(&self) -> &'a str {
        self.page
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PAGE)
    }

    fn limit(&self) -> &'a str {
        self.limit
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LIMIT)
    }
}

/// Client for the Nova Poshta JSON API.
#[derive(Clone)]
pub struct NovaPoshtaClient {
    inner: Arc<NovaPoshtaClientInner>,
}

struct NovaPoshtaClientInner {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    cache: Cache<String, CacheValue>,
}

impl NovaPoshtaClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &NovaPoshtaConfig) -> Result<Self, NovaPoshtaError> {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            inner: Arc::new(NovaPoshtaClientInner {
                client,
                endpoint: config.api_url.clone(),
                api_key: config.api_key.expose_secret().to_string(),
                cache,
            }),
        })
    }

    /// Call an API method and unwrap the response envelope.
    async fn call<P, T>(&self, method: &'static str, properties: P) -> Result<Vec<T>, NovaPoshtaError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let request = ApiRequest {
            api_key: &self.inner.api_key,
            model_name: MODEL_ADDRESS,
            called_method: method,
            method_properties: properties,
        };

        let response = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NovaPoshtaError::Status(status.as_u16()));
        }

        let body: ApiResponse<T> = response.json().await?;
        debug!(
            method,
            success = body.success,
            results = body.data.len(),
            errors = body.errors.len(),
            warnings = body.warnings.len(),
            "Nova Poshta response"
        );

        if !body.success || !body.errors.is_empty() {
            return Err(NovaPoshtaError::Rejected {
                errors: body.errors,
                warnings: body.warnings,
            });
        }

        Ok(body.data)
    }

    /// Search settlements by name.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API rejects it.
    #[instrument(skip(self), fields(city_name = %city_name))]
    pub async fn search_settlements(
        &self,
        city_name: &str,
        paging: Paging<'_>,
    ) -> Result<Arc<SettlementPage>, NovaPoshtaError> {
        let city_name = city_name.trim();
        let (page, limit) = (paging.page(), paging.limit());
        let cache_key = format!("settlements:{}:{page}:{limit}", city_name.to_lowercase());

        if let Some(CacheValue::Settlements(found)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for settlements");
            return Ok(found);
        }

        let data: Vec<SettlementSearch> = self
            .call(
                "searchSettlements",
                SearchSettlementsProperties {
                    city_name,
                    page,
                    limit,
                },
            )
            .await?;

        let search = data.into_iter().next().unwrap_or_default();
        let total = if search.total_count > 0 {
            search.total_count
        } else {
            u64::try_from(search.addresses.len()).unwrap_or(u64::MAX)
        };
        let found = Arc::new(SettlementPage {
            settlements: search.addresses,
            total,
        });

        self.inner
            .cache
            .insert(cache_key, CacheValue::Settlements(Arc::clone(&found)))
            .await;

        Ok(found)
    }

    /// List the warehouses of a city.
    ///
    /// `city_ref` is the `DeliveryCity` of a [`Settlement`].
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the API rejects it.
    #[instrument(skip(self), fields(city_ref = %city_ref))]
    pub async fn warehouses(
        &self,
        city_ref: &str,
        paging: Paging<'_>,
    ) -> Result<Arc<Vec<Warehouse>>, NovaPoshtaError> {
        let city_ref = city_ref.trim();
        let (page, limit) = (paging.page(), paging.limit());
        let cache_key = format!("warehouses:{city_ref}:{page}:{limit}");

        if let Some(CacheValue::Warehouses(found)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for warehouses");
            return Ok(found);
        }

        let data: Vec<Warehouse> = self
            .call(
                "getWarehouses",
                GetWarehousesProperties {
                    city_ref,
                    page,
                    limit,
                },
            )
            .await?;
        let found = Arc::new(data);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Warehouses(Arc::clone(&found)))
            .await;

        Ok(found)
    }
}
