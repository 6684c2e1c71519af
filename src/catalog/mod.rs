//! Product Catalog Domain Module
//!
//! This module contains the catalog side of the storefront:
//! - Raw and normalized product models
//! - Ingestion with a configurable price-parse policy
//! - The filter → sort → group query engine
//! - Search input coalescing and per-user browsing sessions
//! - REST API handlers

pub mod debounce;
pub mod handlers;
pub mod ingest;
pub mod models;
pub mod query;
pub mod session;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use ingest::{load_catalog, Catalog, PriceParsePolicy};
pub use models::Product;
pub use query::{evaluate, CategoryFilter, FilterState, PriceRange, QueryResult, SortOption};
pub use session::{CatalogSession, CatalogView};
