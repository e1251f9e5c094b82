//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod order;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use oleh_garden_core::ProductId;
use oleh_garden_storefront::cart::{Cart, FileStore};
use oleh_garden_storefront::catalog::{Catalog, CatalogError};
use oleh_garden_storefront::order::OrderError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Catalog file could not be loaded.
    #[error("Failed to load catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// No product with this id.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// Product exists but cannot be put in the cart.
    #[error("Product {0} is not available for sale")]
    NotSellable(ProductId),

    /// Order failed validation.
    #[error("Invalid order: {0}")]
    Order(#[from] OrderError),

    /// HTTP request to the storefront failed.
    #[error("Storefront request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Storefront refused the order.
    #[error("Storefront rejected the order (HTTP {status}): {body}")]
    Rejected { status: u16, body: String },

    /// Storefront URL cannot be extended with the order path.
    #[error("Invalid storefront URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// A cart persisted in the data directory, checked against the catalog.
pub type FileCart = Cart<FileStore, Arc<Catalog>>;

/// Everything a command needs: the catalog and where the cart lives.
pub struct Session {
    data_dir: PathBuf,
    catalog: Arc<Catalog>,
}

impl Session {
    /// Open a session, loading the catalog from `catalog_path` if given.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog file cannot be loaded.
    pub fn open(data_dir: PathBuf, catalog_path: Option<&Path>) -> Result<Self, CliError> {
        let catalog = match catalog_path {
            Some(path) => Catalog::from_json_file(path)?,
            None => Catalog::builtin(),
        };
        tracing::debug!(
            data_dir = %data_dir.display(),
            products = catalog.len(),
            "Session opened"
        );
        Ok(Self {
            data_dir,
            catalog: Arc::new(catalog),
        })
    }

    pub const fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// The session's cart, hydrated from the data directory.
    pub fn cart(&self) -> FileCart {
        let mut cart = Cart::new(
            FileStore::new(self.data_dir.clone()),
            Arc::clone(&self.catalog),
        );
        cart.hydrate();
        cart
    }
}
