//! Error types
//!
//! Catalog ingestion errors and the API error surface returned by the
//! HTTP handlers.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or normalizing the product catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog document is not a JSON array of product records.
    #[error("Malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A price field could not be parsed and the strict policy is active.
    #[error("Product {id}: unparseable selling price {raw:?}")]
    MalformedPrice { id: String, raw: String },
}

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The requested product id is not in the catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// The product exists but cannot be added to a cart.
    #[error("Product is out of stock: {0}")]
    OutOfStock(String),

    /// The coupon code submitted with an order is not recognised.
    #[error("Invalid Coupon Code: {0}")]
    InvalidCoupon(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnknownProduct(_) => StatusCode::NOT_FOUND,
            ApiError::OutOfStock(_) => StatusCode::CONFLICT,
            ApiError::InvalidCoupon(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_status_codes() {
        assert_eq!(
            ApiError::UnknownProduct("p1".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::OutOfStock("p1".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::InvalidCoupon("SAVE1O".into()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[test]
    fn test_malformed_price_message() {
        let err = CatalogError::MalformedPrice {
            id: "p9".into(),
            raw: "N/A".into(),
        };
        assert_eq!(
            err.to_string(),
            "Product p9: unparseable selling price \"N/A\""
        );
    }
}
