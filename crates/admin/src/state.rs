//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::catalog::{CatalogClient, CatalogError, Product};
use crate::config::AdminConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration, the catalog API client, and the product snapshot.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    catalog: CatalogClient,
    /// Last-fetched product collection. Replaced wholesale after every list
    /// fetch; never merged or patched per item.
    products: RwLock<Vec<Product>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: AdminConfig) -> Self {
        let catalog = CatalogClient::new(&config.catalog);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                products: RwLock::new(Vec::new()),
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Clone the current product snapshot.
    pub async fn products(&self) -> Vec<Product> {
        self.inner.products.read().await.clone()
    }

    /// Replace the product snapshot wholesale.
    pub async fn replace_products(&self, products: Vec<Product>) {
        *self.inner.products.write().await = products;
    }

    /// Re-fetch the full product collection and replace the snapshot.
    ///
    /// Called after every mutation and on each dashboard render. On failure
    /// the previous snapshot stays in place.
    ///
    /// # Errors
    ///
    /// Returns the catalog error from the list fetch.
    pub async fn refresh_products(&self) -> Result<(), CatalogError> {
        let products = self.inner.catalog.list_products().await?;
        self.replace_products(products).await;
        Ok(())
    }
}
