//! Shopping Cart Helpers
//!
//! Cart id handling and formatting used by the handlers.

use super::models::CartItem;
use uuid::Uuid;

/// Returns the provided `cart_id` or creates a new UUID string when `None`.
///
/// This guarantees that every cart operation works with a non-empty identifier.
pub fn get_or_create_cart_id(cart_id: Option<String>) -> String {
    cart_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string())
}

/// Produces a human-readable one-line summary for a list of cart items.
///
/// Example output: `"2x Apple, 1x Banana"`.
pub fn format_item_summary(items: &[CartItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.name))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, quantity: u32) -> CartItem {
        CartItem {
            product_id: name.to_lowercase(),
            name: name.into(),
            unit_price_minor: 100,
            image_url: String::new(),
            quantity,
        }
    }

    #[test]
    fn test_format_item_summary() {
        let items = vec![item("Apple", 2), item("Banana", 1)];
        assert_eq!(format_item_summary(&items), "2x Apple, 1x Banana");
        assert_eq!(format_item_summary(&[]), "");
    }

    #[test]
    fn test_cart_id_is_kept_or_generated() {
        assert_eq!(get_or_create_cart_id(Some("abc".into())), "abc");
        let generated = get_or_create_cart_id(None);
        assert_eq!(generated.len(), 32);
        assert_ne!(get_or_create_cart_id(Some(String::new())), "");
    }
}
