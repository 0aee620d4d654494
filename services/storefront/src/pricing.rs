//! Checkout arithmetic for a cart: shipping, tax and the single discount code

use common::models::CartLine;
use serde::Serialize;

/// Subtotal at or above which shipping is free
pub const FREE_SHIPPING_THRESHOLD: f64 = 200.0;
/// Shipping charged below the free-shipping threshold
pub const FLAT_SHIPPING: f64 = 50.0;
pub const TAX_RATE: f64 = 0.05;

const SAVE10_CODE: &str = "SAVE10";
const SAVE10_RATE: f64 = 0.10;

/// A recognised discount code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountCode {
    Save10,
}

impl DiscountCode {
    /// Parse a user-entered code; surrounding whitespace and case are ignored.
    /// Returns None for unknown codes.
    pub fn parse(code: &str) -> Option<Self> {
        if code.trim().eq_ignore_ascii_case(SAVE10_CODE) {
            Some(DiscountCode::Save10)
        } else {
            None
        }
    }

    fn amount(self, subtotal: f64) -> f64 {
        match self {
            DiscountCode::Save10 => subtotal * SAVE10_RATE,
        }
    }
}

/// Priced view of a cart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: u64,
    pub subtotal: f64,
    pub shipping: f64,
    pub tax: f64,
    pub discount: f64,
    pub total: f64,
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

impl CartSummary {
    pub fn compute(cart: &[CartLine], code: Option<DiscountCode>) -> Self {
        let item_count = cart.iter().map(|line| u64::from(line.quantity)).sum();
        let subtotal: f64 = cart
            .iter()
            .map(|line| line.price * f64::from(line.quantity))
            .sum();

        let shipping = if cart.is_empty() || subtotal >= FREE_SHIPPING_THRESHOLD {
            0.0
        } else {
            FLAT_SHIPPING
        };
        let tax = subtotal * TAX_RATE;
        let discount = code.map_or(0.0, |code| code.amount(subtotal));

        CartSummary {
            item_count,
            subtotal: round_cents(subtotal),
            shipping,
            tax: round_cents(tax),
            discount: round_cents(discount),
            total: round_cents(subtotal + shipping + tax - discount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(product_id: &str, price: f64, quantity: u32) -> CartLine {
        CartLine {
            product_id: product_id.to_string(),
            name: product_id.to_string(),
            price,
            img: String::new(),
            quantity,
        }
    }

    #[test]
    fn test_empty_cart_costs_nothing() {
        let summary = CartSummary::compute(&[], Some(DiscountCode::Save10));
        assert_eq!(summary.item_count, 0);
        assert_eq!(summary.shipping, 0.0);
        assert_eq!(summary.total, 0.0);
    }

    #[test]
    fn test_small_cart_pays_shipping_and_tax() {
        let summary = CartSummary::compute(&[line("P1", 50.0, 2)], None);

        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.subtotal, 100.0);
        assert_eq!(summary.shipping, FLAT_SHIPPING);
        assert_eq!(summary.tax, 5.0);
        assert_eq!(summary.discount, 0.0);
        assert_eq!(summary.total, 155.0);
    }

    #[test]
    fn test_large_cart_ships_free_and_takes_discount() {
        let cart = [line("P1", 150.0, 1), line("P2", 25.0, 2)];
        let summary = CartSummary::compute(&cart, Some(DiscountCode::Save10));

        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal, 200.0);
        assert_eq!(summary.shipping, 0.0);
        assert_eq!(summary.tax, 10.0);
        assert_eq!(summary.discount, 20.0);
        assert_eq!(summary.total, 190.0);
    }

    #[test]
    fn test_amounts_are_rounded_to_cents() {
        let summary = CartSummary::compute(&[line("P1", 19.99, 3)], None);

        assert_eq!(summary.subtotal, 59.97);
        assert_eq!(summary.tax, 3.0);
        assert_eq!(summary.total, 112.97);
    }

    #[test]
    fn test_discount_code_parsing() {
        assert_eq!(DiscountCode::parse("SAVE10"), Some(DiscountCode::Save10));
        assert_eq!(DiscountCode::parse(" save10 "), Some(DiscountCode::Save10));
        assert_eq!(DiscountCode::parse("SAVE20"), None);
        assert_eq!(DiscountCode::parse(""), None);
    }
}
