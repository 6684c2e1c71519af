//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - Domain models (CartItem, inputs, responses)
//! - The cart aggregator (add, update, remove, totals)
//! - Coupon discounts
//! - REST API handlers

pub mod coupon;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod state;

// Re-export commonly used types for convenience
pub use coupon::{apply_coupon, CouponOutcome};
pub use handlers::routes;
pub use models::CartItem;
pub use state::Cart;
