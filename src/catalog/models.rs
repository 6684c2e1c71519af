//! Catalog Domain Models
//!
//! Raw records as delivered by the catalog source, and the normalized
//! `Product` the query engine and cart work with.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Grouping key used when a product carries no `Pattern` attribute
pub const OTHER_PATTERN: &str = "Other";

/// Attribute key that supplies the grouping tag
pub const PATTERN_KEY: &str = "Pattern";

// =============================================================================
// Raw Catalog Records
// =============================================================================

/// A numeric field that the source may deliver as text or as a JSON number.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TextOrNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

/// A product record exactly as the catalog source delivers it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProduct {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default)]
    pub selling_price: Option<TextOrNumber>,

    #[serde(default)]
    pub discount: Option<TextOrNumber>,

    #[serde(default)]
    pub average_rating: Option<TextOrNumber>,

    #[serde(default)]
    pub out_of_stock: bool,

    /// List of single-key attribute maps, e.g. `{"Pattern": "Solid"}`
    #[serde(default)]
    pub product_details: Vec<HashMap<String, Value>>,
}

impl RawProduct {
    /// First non-empty string value keyed `Pattern`, else `"Other"`.
    pub fn pattern_tag(&self) -> String {
        self.product_details
            .iter()
            .find_map(|detail| {
                detail
                    .get(PATTERN_KEY)
                    .and_then(Value::as_str)
                    .filter(|tag| !tag.is_empty())
            })
            .unwrap_or(OTHER_PATTERN)
            .to_string()
    }
}

// =============================================================================
// Normalized Product
// =============================================================================

/// Immutable, normalized catalog entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub brand: Option<String>,
    pub images: Vec<String>,

    /// Selling price in currency minor units
    pub selling_price_minor: u64,

    /// Discount in percent, always within 1..=100 when present
    pub discount_percent: Option<u8>,

    pub average_rating: f64,
    pub out_of_stock: bool,
    pub pattern_tag: String,
}

impl Product {
    /// Price before the discount was applied, for strike-through display.
    ///
    /// Returns the selling price unchanged when there is no discount or the
    /// discount is 100%, which would otherwise divide by zero.
    pub fn original_price_minor(&self) -> u64 {
        match self.discount_percent {
            Some(percent) if percent > 0 && percent < 100 => {
                let remaining = u128::from(100 - percent);
                let scaled = u128::from(self.selling_price_minor) * 100;
                let rounded = (scaled + remaining / 2) / remaining;
                u64::try_from(rounded).unwrap_or(u64::MAX)
            }
            _ => self.selling_price_minor,
        }
    }

    pub fn is_discounted(&self) -> bool {
        self.discount_percent.is_some_and(|p| p > 0)
    }

    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}
