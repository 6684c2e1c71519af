//! Coupon discounts
//!
//! Coupons are looked up in a fixed table. Applying one is a pure function of
//! the code and the cart total, so re-applying never stacks.

use serde::Serialize;

/// Message shown when a code is not in the table
pub const INVALID_COUPON_MESSAGE: &str = "Invalid Coupon Code";

/// Known codes and their percentage off the cart total
const COUPONS: &[(&str, u64)] = &[("SAVE10", 10), ("SAVE20", 20)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouponOutcome {
    pub discount_minor: u64,
    pub valid: bool,
}

impl CouponOutcome {
    pub fn invalid() -> Self {
        Self {
            discount_minor: 0,
            valid: false,
        }
    }

    pub fn final_total_minor(&self, cart_total_minor: u64) -> u64 {
        cart_total_minor.saturating_sub(self.discount_minor)
    }

    /// User-visible message for an invalid code.
    pub fn message(&self) -> Option<&'static str> {
        (!self.valid).then_some(INVALID_COUPON_MESSAGE)
    }
}

/// Percentage off for `code`, matched exactly.
pub fn coupon_percent(code: &str) -> Option<u64> {
    COUPONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, percent)| *percent)
}

/// Computes the discount `code` grants on `cart_total_minor`, rounded down.
pub fn apply_coupon(code: &str, cart_total_minor: u64) -> CouponOutcome {
    match coupon_percent(code) {
        Some(percent) => {
            let discount = u128::from(cart_total_minor) * u128::from(percent) / 100;
            CouponOutcome {
                discount_minor: u64::try_from(discount).unwrap_or(cart_total_minor),
                valid: true,
            }
        }
        None => CouponOutcome::invalid(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(
            apply_coupon("SAVE10", 1000),
            CouponOutcome {
                discount_minor: 100,
                valid: true
            }
        );
        assert_eq!(apply_coupon("SAVE20", 1000).discount_minor, 200);
    }

    #[test]
    fn test_unknown_code_is_invalid() {
        let outcome = apply_coupon("BOGUS", 1000);
        assert_eq!(outcome, CouponOutcome::invalid());
        assert_eq!(outcome.final_total_minor(1000), 1000);
        assert_eq!(outcome.message(), Some(INVALID_COUPON_MESSAGE));
    }

    #[test]
    fn test_codes_are_case_sensitive() {
        assert!(!apply_coupon("save10", 1000).valid);
    }

    #[test]
    fn test_discount_rounds_down() {
        // 10% of 999 is 99.9
        let outcome = apply_coupon("SAVE10", 999);
        assert_eq!(outcome.discount_minor, 99);
        assert_eq!(outcome.final_total_minor(999), 900);
    }

    #[test]
    fn test_reapplying_does_not_stack() {
        let first = apply_coupon("SAVE20", 2200);
        let second = apply_coupon("SAVE20", 2200);
        assert_eq!(first, second);
        assert_eq!(second.final_total_minor(2200), 1760);
    }

    #[test]
    fn test_empty_cart() {
        let outcome = apply_coupon("SAVE10", 0);
        assert!(outcome.valid);
        assert_eq!(outcome.discount_minor, 0);
        assert_eq!(outcome.message(), None);
    }
}
