//! Storefront Catalog Library
//!
//! This library provides catalog browsing (filter, sort and group a fixed
//! product catalog) and cart aggregation with coupon pricing, plus a thin
//! HTTP surface over both.

// Domain modules
pub mod cart;
pub mod catalog;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;
