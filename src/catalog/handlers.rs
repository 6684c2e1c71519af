//! REST API handlers for catalog browsing
//!
//! Queries are evaluated directly; debouncing is the caller's concern.

use super::{query::FilterState, session::CatalogView};
use crate::error::ApiError;
use crate::state::SharedState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

/// Creates routes for catalog-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/catalog/query", post(query_catalog))
        .route("/catalog/products/:id", get(get_product))
}

/// Input for a catalog query
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryInput {
    #[serde(flatten)]
    pub filter: FilterState,

    /// Narrows the displayed groups to one pattern tag
    #[serde(default)]
    pub selected_pattern: Option<String>,
}

/// Endpoint: POST /catalog/query
/// Evaluates the filter state against the catalog and returns the grouped view.
async fn query_catalog(
    State(state): State<SharedState>,
    Json(payload): Json<QueryInput>,
) -> impl IntoResponse {
    let result = super::evaluate(state.catalog.products(), &payload.filter);
    let view = CatalogView::from_result(
        result,
        state.catalog.len(),
        payload.selected_pattern.as_deref(),
    );
    Json(view).into_response()
}

/// Endpoint: GET /catalog/products/:id
async fn get_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .catalog
        .get(&id)
        .ok_or_else(|| ApiError::UnknownProduct(id.clone()))?;
    Ok(Json(super::session::ProductView::from(product)).into_response())
}
