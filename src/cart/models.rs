//! Shopping Cart Domain Models
//!
//! This module contains all data structures related to the shopping cart
//! business domain.

use serde::{Deserialize, Serialize};

/// Image used when a product has no images of its own
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/150?text=No+Image";

// =============================================================================
// Cart Domain Models
// =============================================================================

/// Represents an item in the shopping cart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,

    /// Product title at the time it was added
    pub name: String,

    /// Price per unit in minor units, frozen at the time it was added
    pub unit_price_minor: u64,

    pub image_url: String,

    /// Always at least 1
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total_minor(&self) -> u64 {
        self.unit_price_minor.saturating_mul(u64::from(self.quantity))
    }
}

// =============================================================================
// Request Inputs
// =============================================================================

/// Input for adding one unit of a product
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartInput {
    /// Optional cart identifier; a new cart is created when absent
    pub cart_id: Option<String>,
    pub product_id: String,
}

/// Input for setting an item's quantity
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityInput {
    pub cart_id: String,
    pub product_id: String,

    /// Requested quantity; values below 1 clamp to 1
    pub quantity: i64,
}

/// Input for removing an item
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemInput {
    pub cart_id: String,
    pub product_id: String,
}

/// Input for previewing a coupon against a cart
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponInput {
    pub cart_id: String,
    pub code: String,
}

/// Input for placing an order
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutInput {
    pub cart_id: String,

    #[serde(default)]
    pub code: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

/// Current contents of a cart
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub cart_id: String,
    pub items: Vec<CartItem>,
    pub total_minor: u64,
}

/// Outcome of applying a coupon at checkout
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponResponse {
    pub cart_total_minor: u64,
    pub discount_minor: u64,
    pub final_total_minor: u64,
    pub valid: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Response for order placement
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    /// `"checked_out"` or `"empty"`
    pub status: String,
    pub cart_id: String,
    pub items: Vec<CartItem>,

    #[serde(flatten)]
    pub pricing: CouponResponse,
}
