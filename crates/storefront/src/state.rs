//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::{Catalog, CatalogError};
use crate::config::StorefrontConfig;
use crate::services::{NovaPoshtaClient, NovaPoshtaError, TelegramClient, TelegramError};

/// Error creating the application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("failed to create Telegram client: {0}")]
    Telegram(#[from] TelegramError),
    #[error("failed to create Nova Poshta client: {0}")]
    NovaPoshta(#[from] NovaPoshtaError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog, configuration and the clients of configured integrations.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    telegram: Option<TelegramClient>,
    nova_poshta: Option<NovaPoshtaClient>,
}

impl AppState {
    /// Create the state with an explicit catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured HTTP client cannot be built.
    pub fn new(config: StorefrontConfig, catalog: Catalog) -> Result<Self, StateError> {
        let telegram = config
            .telegram
            .as_ref()
            .map(TelegramClient::new)
            .transpose()?;
        let nova_poshta = config
            .nova_poshta
            .as_ref()
            .map(NovaPoshtaClient::new)
            .transpose()?;

        if telegram.is_none() {
            tracing::warn!("Telegram is not configured; order submission is disabled");
        }
        if nova_poshta.is_none() {
            tracing::warn!("Nova Poshta is not configured; address lookups are disabled");
        }

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog: Arc::new(catalog),
                telegram,
                nova_poshta,
            }),
        })
    }

    /// Create the state, loading the catalog named by the configuration or
    /// falling back to the built-in one.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be loaded or a client
    /// cannot be built.
    pub fn from_config(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = match &config.catalog_path {
            Some(path) => {
                let catalog = Catalog::from_json_file(path)?;
                tracing::info!(path = %path.display(), products = catalog.len(), "Catalog loaded");
                catalog
            }
            None => Catalog::builtin(),
        };
        Self::new(config, catalog)
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.inner.catalog
    }

    /// Get the Telegram client, if configured.
    #[must_use]
    pub fn telegram(&self) -> Option<&TelegramClient> {
        self.inner.telegram.as_ref()
    }

    /// Get the Nova Poshta client, if configured.
    #[must_use]
    pub fn nova_poshta(&self) -> Option<&NovaPoshtaClient> {
        self.inner.nova_poshta.as_ref()
    }
}
