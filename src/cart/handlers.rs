//! REST API handlers for shopping cart operations
//!
//! This module implements HTTP endpoints for cart mutation, coupon preview
//! and checkout.

use super::{
    coupon::{apply_coupon, coupon_percent},
    helpers::*,
    models::*,
    state::Cart,
};
use crate::error::ApiError;
use crate::state::{AppState, SharedState};
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart/:cart_id", get(get_cart))
        .route("/cart/add", post(add_to_cart))
        .route("/cart/update", post(update_quantity))
        .route("/cart/remove", post(remove_item))
        .route("/checkout/coupon", post(preview_coupon))
        .route("/checkout", post(checkout))
}

fn cart_view(cart_id: String, cart: &Cart) -> CartView {
    CartView {
        cart_id,
        items: cart.items().to_vec(),
        total_minor: cart.total_minor(),
    }
}

fn price_with_coupon(cart_total_minor: u64, code: Option<&str>) -> CouponResponse {
    let outcome = code.map(|code| apply_coupon(code, cart_total_minor));
    CouponResponse {
        cart_total_minor,
        discount_minor: outcome.map_or(0, |o| o.discount_minor),
        final_total_minor: outcome
            .map_or(cart_total_minor, |o| o.final_total_minor(cart_total_minor)),
        valid: outcome.map_or(true, |o| o.valid),
        message: outcome.and_then(|o| o.message()).map(str::to_string),
    }
}

/// Endpoint: GET /cart/:cart_id
async fn get_cart(
    State(state): State<SharedState>,
    Path(cart_id): Path<String>,
) -> impl IntoResponse {
    let cart = state.cart_snapshot(&cart_id);
    Json(cart_view(cart_id, &cart))
}

/// Endpoint: POST /cart/add
/// Adds one unit of a catalog product. Out-of-stock products are refused here,
/// the cart itself does not check stock.
async fn add_to_cart(
    State(state): State<SharedState>,
    Json(payload): Json<AddToCartInput>,
) -> Result<impl IntoResponse, ApiError> {
    let product = state
        .catalog
        .get(&payload.product_id)
        .ok_or_else(|| ApiError::UnknownProduct(payload.product_id.clone()))?;

    if product.out_of_stock {
        return Err(ApiError::OutOfStock(product.id.clone()));
    }

    let cart_id = get_or_create_cart_id(payload.cart_id);
    let mut cart = state.carts.entry(cart_id.clone()).or_default();
    cart.add_to_cart(product);

    tracing::info!(cart = %cart_id, product = %product.id, "item added");
    Ok(Json(cart_view(cart_id, &cart)))
}

/// Endpoint: POST /cart/update
async fn update_quantity(
    State(state): State<SharedState>,
    Json(payload): Json<UpdateQuantityInput>,
) -> impl IntoResponse {
    if let Some(mut cart) = state.carts.get_mut(&payload.cart_id) {
        cart.update_quantity(&payload.product_id, payload.quantity);
    }
    Json(cart_view(
        payload.cart_id.clone(),
        &state.cart_snapshot(&payload.cart_id),
    ))
}

/// Endpoint: POST /cart/remove
async fn remove_item(
    State(state): State<SharedState>,
    Json(payload): Json<RemoveItemInput>,
) -> impl IntoResponse {
    if let Some(mut cart) = state.carts.get_mut(&payload.cart_id) {
        cart.remove_item(&payload.product_id);
    }
    Json(cart_view(
        payload.cart_id.clone(),
        &state.cart_snapshot(&payload.cart_id),
    ))
}

/// Endpoint: POST /checkout/coupon
/// Previews a coupon against the cart total. Unknown codes are reported in
/// the body, never as an HTTP error.
async fn preview_coupon(
    State(state): State<SharedState>,
    Json(payload): Json<CouponInput>,
) -> impl IntoResponse {
    let total = state.cart_snapshot(&payload.cart_id).total_minor();
    Json(price_with_coupon(total, Some(payload.code.as_str())))
}

/// Endpoint: POST /checkout
/// Places the order: prices the cart, then clears it. An unknown coupon code
/// rejects the order and leaves the cart untouched.
async fn checkout(
    State(state): State<SharedState>,
    Json(payload): Json<CheckoutInput>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(place_order(&state, payload)?))
}

fn place_order(state: &AppState, payload: CheckoutInput) -> Result<CheckoutResponse, ApiError> {
    if let Some(code) = payload.code.as_deref() {
        if coupon_percent(code).is_none() {
            return Err(ApiError::InvalidCoupon(code.to_string()));
        }
    }

    let cart = state
        .carts
        .remove(&payload.cart_id)
        .map(|(_, cart)| cart)
        .unwrap_or_default();

    let pricing = price_with_coupon(cart.total_minor(), payload.code.as_deref());
    let status = if cart.is_empty() { "empty" } else { "checked_out" };

    if !cart.is_empty() {
        tracing::info!(
            cart = %payload.cart_id,
            items = %format_item_summary(cart.items()),
            total = pricing.final_total_minor,
            "checkout"
        );
    }

    Ok(CheckoutResponse {
        status: status.to_string(),
        cart_id: payload.cart_id,
        items: cart.into_items(),
        pricing,
    })
}
