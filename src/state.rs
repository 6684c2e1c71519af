//! Application State
//!
//! Holds the immutable catalog and every live cart.

use crate::cart::Cart;
use crate::catalog::{load_catalog, Catalog};
use crate::config::Config;
use crate::error::CatalogError;
use dashmap::DashMap;
use std::sync::Arc;

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

pub struct AppState {
    /// Loaded once at startup and never modified.
    pub catalog: Arc<Catalog>,

    /// In-memory storage for carts, keyed by cart_id.
    /// DashMap allows concurrent access without external Mutexes.
    pub carts: DashMap<String, Cart>,
}

impl AppState {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            carts: DashMap::new(),
        }
    }

    /// Loads the catalog named by `config` and builds the state around it.
    pub fn load(config: &Config) -> Result<Self, CatalogError> {
        let path = config.resolve_catalog_path();
        let catalog = load_catalog(&path, config.price_parse)?;
        Ok(Self::new(catalog))
    }

    /// Copy of the cart's contents, or an empty cart when unknown.
    pub fn cart_snapshot(&self, cart_id: &str) -> Cart {
        self.carts
            .get(cart_id)
            .map(|cart| cart.value().clone())
            .unwrap_or_default()
    }
}
