//! Catalog ingestion
//!
//! Normalizes raw source records into `Product`s. Prices arrive as text with
//! grouping separators; how unparseable prices are treated is governed by
//! `PriceParsePolicy`.

use super::models::{Product, RawProduct, TextOrNumber};
use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// What to do with a record whose selling price cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceParsePolicy {
    /// Treat the price as `0` and keep the record.
    #[default]
    Lenient,
    /// Reject the whole load with `CatalogError::MalformedPrice`.
    Strict,
}

/// Parses a price such as `"1,299"` into minor units.
///
/// Grouping commas are dropped and the leading run of digits is read, so
/// `"499.00"` yields `499`. Returns `None` when no digit leads the text.
pub fn parse_minor_units(text: &str) -> Option<u64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != ',').collect();
    let digits: String = cleaned.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    // Overlong digit runs saturate rather than fail.
    Some(digits.parse().unwrap_or(u64::MAX))
}

fn number_to_minor_units(value: &TextOrNumber) -> Option<u64> {
    match value {
        TextOrNumber::Int(n) => u64::try_from(*n).ok(),
        TextOrNumber::Float(f) if f.is_finite() && *f >= 0.0 => Some(f.trunc() as u64),
        TextOrNumber::Float(_) => None,
        TextOrNumber::Text(text) => parse_minor_units(text),
    }
}

/// Reads the leading integer of a discount such as `"40% off"`.
///
/// Zero or unparseable means no discount; values above 100 clamp to 100.
pub fn parse_discount_percent(value: &TextOrNumber) -> Option<u8> {
    let percent = number_to_minor_units(value)?;
    match percent {
        0 => None,
        p => Some(p.min(100) as u8),
    }
}

/// Parses an average rating, defaulting to `0.0`.
pub fn parse_rating(value: Option<&TextOrNumber>) -> f64 {
    let rating = match value {
        Some(TextOrNumber::Int(n)) => *n as f64,
        Some(TextOrNumber::Float(f)) => *f,
        Some(TextOrNumber::Text(text)) => text.trim().parse().unwrap_or(0.0),
        None => 0.0,
    };
    if rating.is_finite() {
        rating
    } else {
        0.0
    }
}

/// Converts one raw record into a `Product`.
pub fn normalize(raw: RawProduct, policy: PriceParsePolicy) -> Result<Product, CatalogError> {
    let selling_price_minor = match raw.selling_price.as_ref().and_then(number_to_minor_units) {
        Some(price) => price,
        None => {
            let shown = match &raw.selling_price {
                Some(TextOrNumber::Text(text)) => text.clone(),
                Some(TextOrNumber::Int(n)) => n.to_string(),
                Some(TextOrNumber::Float(f)) => f.to_string(),
                None => String::new(),
            };
            match policy {
                PriceParsePolicy::Strict => {
                    return Err(CatalogError::MalformedPrice {
                        id: raw.id,
                        raw: shown,
                    })
                }
                PriceParsePolicy::Lenient => {
                    tracing::warn!(product = %raw.id, raw = %shown, "unparseable selling price, using 0");
                    0
                }
            }
        }
    };

    let pattern_tag = raw.pattern_tag();

    Ok(Product {
        discount_percent: raw.discount.as_ref().and_then(parse_discount_percent),
        average_rating: parse_rating(raw.average_rating.as_ref()),
        id: raw.id,
        title: raw.title,
        brand: raw.brand.filter(|b| !b.is_empty()),
        images: raw.images,
        selling_price_minor,
        out_of_stock: raw.out_of_stock,
        pattern_tag,
    })
}

// =============================================================================
// Catalog
// =============================================================================

/// The immutable product list for a session, in source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        let mut index = HashMap::with_capacity(products.len());
        for (position, product) in products.iter().enumerate() {
            if index.contains_key(&product.id) {
                tracing::warn!(product = %product.id, "duplicate product id, keeping first");
                continue;
            }
            index.insert(product.id.clone(), position);
        }
        Self { products, index }
    }

    /// Parses a JSON array of raw product records.
    pub fn from_json_str(json: &str, policy: PriceParsePolicy) -> Result<Self, CatalogError> {
        let raw: Vec<RawProduct> = serde_json::from_str(json)?;
        let products = raw
            .into_iter()
            .map(|record| normalize(record, policy))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(products))
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.index.get(id).map(|&position| &self.products[position])
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Reads and normalizes the catalog file at `path`.
pub fn load_catalog(path: &Path, policy: PriceParsePolicy) -> Result<Catalog, CatalogError> {
    let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let catalog = Catalog::from_json_str(&json, policy)?;
    tracing::info!(path = %path.display(), products = catalog.len(), "catalog loaded");
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawProduct {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_parse_minor_units() {
        assert_eq!(parse_minor_units("1,299"), Some(1299));
        assert_eq!(parse_minor_units(" 499 "), Some(499));
        assert_eq!(parse_minor_units("499.00"), Some(499));
        assert_eq!(parse_minor_units("12,34,567"), Some(1234567));
        assert_eq!(parse_minor_units("N/A"), None);
        assert_eq!(parse_minor_units(""), None);
    }

    #[test]
    fn test_parse_discount_percent() {
        assert_eq!(parse_discount_percent(&TextOrNumber::Text("40% off".into())), Some(40));
        assert_eq!(parse_discount_percent(&TextOrNumber::Int(15)), Some(15));
        assert_eq!(parse_discount_percent(&TextOrNumber::Int(0)), None);
        assert_eq!(parse_discount_percent(&TextOrNumber::Int(150)), Some(100));
        assert_eq!(parse_discount_percent(&TextOrNumber::Text("sale".into())), None);
    }

    #[test]
    fn test_parse_rating_defaults_to_zero() {
        assert_eq!(parse_rating(Some(&TextOrNumber::Text("3.9".into()))), 3.9);
        assert_eq!(parse_rating(Some(&TextOrNumber::Text("".into()))), 0.0);
        assert_eq!(parse_rating(None), 0.0);
    }

    #[test]
    fn test_normalize_lenient_price_falls_back_to_zero() {
        let product = normalize(
            raw(json!({ "_id": "p1", "title": "Pants", "selling_price": "call us" })),
            PriceParsePolicy::Lenient,
        )
        .unwrap();
        assert_eq!(product.selling_price_minor, 0);
    }

    #[test]
    fn test_normalize_strict_price_rejects_record() {
        let err = normalize(
            raw(json!({ "_id": "p1", "title": "Pants", "selling_price": "call us" })),
            PriceParsePolicy::Strict,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::MalformedPrice { ref id, .. } if id == "p1"));
    }

    #[test]
    fn test_normalize_full_record() {
        let product = normalize(
            raw(json!({
                "_id": "p2",
                "title": "Solid Men Black Track Pants",
                "brand": "York",
                "images": ["https://img.example/a.jpg"],
                "selling_price": "921",
                "discount": "69% off",
                "average_rating": "3.9",
                "out_of_stock": true,
                "product_details": [{ "Pattern": "Solid" }]
            })),
            PriceParsePolicy::Strict,
        )
        .unwrap();
        assert_eq!(product.selling_price_minor, 921);
        assert_eq!(product.discount_percent, Some(69));
        assert_eq!(product.average_rating, 3.9);
        assert!(product.out_of_stock);
        assert_eq!(product.pattern_tag, "Solid");
        assert_eq!(product.brand.as_deref(), Some("York"));
    }

    #[test]
    fn test_catalog_lookup_and_order() {
        let catalog = Catalog::from_json_str(
            r#"[
                {"_id": "a", "title": "A", "selling_price": "100"},
                {"_id": "b", "title": "B", "selling_price": "200"}
            ]"#,
            PriceParsePolicy::Lenient,
        )
        .unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.products()[0].id, "a");
        assert_eq!(catalog.get("b").unwrap().selling_price_minor, 200);
        assert!(catalog.get("zzz").is_none());
    }

    #[test]
    fn test_catalog_rejects_non_array() {
        let err = Catalog::from_json_str(r#"{"not": "an array"}"#, PriceParsePolicy::Lenient)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn test_load_catalog_missing_file() {
        let err = load_catalog(Path::new("/nonexistent/products.json"), PriceParsePolicy::Lenient)
            .unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
