//! Shopping Cart State
//!
//! `Cart` is the aggregator for one shopper: at most one item per product,
//! quantities never below 1, items kept in the order they were first added.
//!
//! Stock is not checked here. Callers must not add out-of-stock products;
//! the HTTP layer enforces that before calling `add_to_cart`.

use super::models::{CartItem, PLACEHOLDER_IMAGE};
use crate::catalog::Product;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`, creating the item on first add.
    pub fn add_to_cart(&mut self, product: &Product) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            return;
        }

        self.items.push(CartItem {
            product_id: product.id.clone(),
            name: product.title.clone(),
            unit_price_minor: product.selling_price_minor,
            image_url: product
                .primary_image()
                .unwrap_or(PLACEHOLDER_IMAGE)
                .to_string(),
            quantity: 1,
        });
    }

    /// Sets the quantity of `product_id`, clamping to at least 1.
    /// Unknown ids are ignored.
    pub fn update_quantity(&mut self, product_id: &str, new_quantity: i64) {
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = u32::try_from(new_quantity.max(1)).unwrap_or(u32::MAX);
        }
    }

    /// Removes `product_id` if present.
    pub fn remove_item(&mut self, product_id: &str) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Sum of unit price times quantity; `0` for an empty cart.
    pub fn total_minor(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |total, item| total.saturating_add(item.line_total_minor()))
    }

    pub fn get(&self, product_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn into_items(self) -> Vec<CartItem> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::fixtures::product;

    #[test]
    fn test_add_twice_aggregates_quantity() {
        let mut cart = Cart::new();
        let p = product("a", 500);
        cart.add_to_cart(&p);
        cart.add_to_cart(&p);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get("a").unwrap().quantity, 2);
    }

    #[test]
    fn test_add_copies_product_fields() {
        let mut cart = Cart::new();
        let p = product("a", 500);
        cart.add_to_cart(&p);

        let item = cart.get("a").unwrap();
        assert_eq!(item.name, p.title);
        assert_eq!(item.unit_price_minor, 500);
        assert_eq!(item.image_url, "https://img.example/a.jpg");
    }

    #[test]
    fn test_add_without_images_uses_placeholder() {
        let mut cart = Cart::new();
        let mut p = product("a", 500);
        p.images.clear();
        cart.add_to_cart(&p);
        assert_eq!(cart.get("a").unwrap().image_url, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_add_does_not_check_stock() {
        let mut cart = Cart::new();
        let mut p = product("a", 500);
        p.out_of_stock = true;
        cart.add_to_cart(&p);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_update_quantity_clamps_to_one() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product("a", 500));

        cart.update_quantity("a", 0);
        assert_eq!(cart.get("a").unwrap().quantity, 1);

        cart.update_quantity("a", -3);
        assert_eq!(cart.get("a").unwrap().quantity, 1);

        cart.update_quantity("a", 4);
        assert_eq!(cart.get("a").unwrap().quantity, 4);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product("a", 500));
        let before = cart.clone();

        cart.update_quantity("missing", 7);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_after_add_restores_empty_cart() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product("a", 500));
        cart.remove_item("a");
        assert_eq!(cart, Cart::new());

        // Removing again is a no-op.
        cart.remove_item("a");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total() {
        let mut cart = Cart::new();
        assert_eq!(cart.total_minor(), 0);

        let a = product("a", 500);
        cart.add_to_cart(&a);
        cart.add_to_cart(&a);
        cart.add_to_cart(&product("b", 1200));
        assert_eq!(cart.total_minor(), 2200);
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut cart = Cart::new();
        cart.add_to_cart(&product("b", 1));
        cart.add_to_cart(&product("a", 1));
        cart.add_to_cart(&product("b", 1));
        let ids: Vec<_> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }
}
