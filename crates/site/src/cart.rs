//! Shopping cart engine.
//!
//! The cart is a plain collection of line items keyed by service id, held
//! in the visitor's session and nowhere else; it does not survive a server
//! restart. Totals are
//! derived on demand from the current items, never stored, so there is no
//! compounding rounding error; rounding to two decimals happens only at the
//! presentation boundary.

use mowlid_core::ServiceId;
use rust_decimal::Decimal;
use rust_decimal::dec;
use serde::{Deserialize, Serialize};

use crate::catalog::ServiceView;
use crate::store::OrderItem;

/// Flat tax rate applied to the subtotal.
///
/// Hardcoded business policy; kept as a named constant so it can be made
/// configurable without guessing intent.
pub const TAX_RATE: Decimal = dec!(0.08);

/// One line in the cart: a catalog service plus a requested quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub service_id: ServiceId,
    pub title: String,
    pub description: String,
    pub unit_price: Decimal,
    pub category: String,
    /// Always >= 1; a line that would reach 0 is removed instead.
    pub quantity: u32,
}

impl CartItem {
    /// Line total (`unit_price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The cart: an ordered collection of line items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// True when the cart holds no items. Checkout is unreachable for an
    /// empty cart.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total quantity across all lines (for the cart count badge).
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Add a service to the cart.
    ///
    /// An existing line for the same service has its quantity incremented;
    /// otherwise a new line with quantity 1 is appended. Always succeeds.
    pub fn add(&mut self, service: &ServiceView) {
        if let Some(item) = self
            .items
            .iter_mut()
            .find(|item| item.service_id == service.id)
        {
            item.quantity += 1;
            return;
        }
        self.items.push(CartItem {
            service_id: service.id,
            title: service.title.clone(),
            description: service.description.clone(),
            unit_price: service.unit_price,
            category: service.category.clone(),
            quantity: 1,
        });
    }

    /// Adjust a line's quantity by `delta`.
    ///
    /// A missing id is a no-op. A resulting quantity <= 0 removes the line
    /// entirely; the cart never retains a zero-quantity item.
    pub fn update_quantity(&mut self, id: ServiceId, delta: i64) {
        let Some(index) = self.items.iter().position(|item| item.service_id == id) else {
            return;
        };
        let Some(item) = self.items.get_mut(index) else {
            return;
        };
        // Saturate rather than wrap: an absurdly large delta pins the
        // quantity at the bound instead of overflowing into a removal.
        let new_quantity = i64::from(item.quantity).saturating_add(delta);
        match u32::try_from(new_quantity) {
            Ok(quantity) if quantity > 0 => item.quantity = quantity,
            Err(_) if new_quantity > 0 => item.quantity = u32::MAX,
            _ => {
                self.items.remove(index);
            }
        }
    }

    /// Remove a line unconditionally. Idempotent: removing an absent id is
    /// a no-op.
    pub fn remove(&mut self, id: ServiceId) {
        self.items.retain(|item| item.service_id != id);
    }

    /// Empty the cart (after a successful checkout).
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Flat tax on the subtotal.
    #[must_use]
    pub fn tax(&self) -> Decimal {
        self.subtotal() * TAX_RATE
    }

    /// Subtotal plus tax.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.subtotal() + self.tax()
    }

    /// Snapshot the cart for an order record.
    ///
    /// The copy is denormalized into the order so later catalog edits never
    /// retroactively change historical orders.
    #[must_use]
    pub fn snapshot(&self) -> Vec<OrderItem> {
        self.items
            .iter()
            .map(|item| OrderItem {
                id: item.service_id,
                title: item.title.clone(),
                description: item.description.clone(),
                price: item.unit_price,
                quantity: item.quantity,
                category: item.category.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use mowlid_core::PriceRange;

    use super::*;

    fn service(id: i64, title: &str, price: Decimal) -> ServiceView {
        ServiceView {
            id: ServiceId::new(id),
            title: title.to_string(),
            description: format!("{title} description"),
            price: PriceRange::fixed(price),
            unit_price: price,
            category: "Service".to_string(),
        }
    }

    #[test]
    fn test_add_new_item() {
        let mut cart = Cart::new();
        cart.add(&service(1, "Web Development", dec!(500)));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn test_add_same_service_twice_merges() {
        let mut cart = Cart::new();
        let svc = service(1, "Web Development", dec!(500));
        cart.add(&svc);
        cart.add(&svc);
        assert_eq!(cart.items().len(), 1, "must merge, not duplicate");
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_update_quantity_increment_and_decrement() {
        let mut cart = Cart::new();
        cart.add(&service(1, "Web Development", dec!(500)));
        cart.update_quantity(ServiceId::new(1), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        cart.update_quantity(ServiceId::new(1), -1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add(&service(1, "Web Development", dec!(500)));
        cart.update_quantity(ServiceId::new(1), -1);
        assert!(cart.is_empty(), "a line reaching 0 must be removed");
    }

    #[test]
    fn test_update_quantity_unknown_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(&service(1, "Web Development", dec!(500)));
        cart.update_quantity(ServiceId::new(99), 1);
        assert_eq!(cart.items()[0].quantity, 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cart = Cart::new();
        cart.add(&service(1, "Web Development", dec!(500)));
        cart.remove(ServiceId::new(1));
        let after_first = cart.items().to_vec();
        cart.remove(ServiceId::new(1));
        assert_eq!(cart.items(), after_first.as_slice());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_extreme_delta_saturates() {
        let mut cart = Cart::new();
        cart.add(&service(1, "Web Development", dec!(500)));

        // A huge positive delta must clamp, never remove the line.
        cart.update_quantity(ServiceId::new(1), i64::MAX);
        assert_eq!(cart.items()[0].quantity, u32::MAX);

        // And a huge negative delta removes it like any other decrement.
        cart.update_quantity(ServiceId::new(1), i64::MIN);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_no_sequence_produces_nonpositive_quantity() {
        let mut cart = Cart::new();
        let svc_a = service(1, "A", dec!(100));
        let svc_b = service(2, "B", dec!(200));

        cart.add(&svc_a);
        cart.add(&svc_b);
        cart.update_quantity(ServiceId::new(1), -5);
        cart.add(&svc_a);
        cart.update_quantity(ServiceId::new(2), 3);
        cart.update_quantity(ServiceId::new(2), -4);
        cart.remove(ServiceId::new(3));

        assert!(cart.items().iter().all(|item| item.quantity >= 1));
    }

    #[test]
    fn test_totals_two_line_cart() {
        // cart = [{price: 500, qty: 1}, {price: 300, qty: 2}]
        let mut cart = Cart::new();
        cart.add(&service(1, "Web Development", dec!(500)));
        cart.add(&service(2, "Consulting", dec!(300)));
        cart.update_quantity(ServiceId::new(2), 1);

        assert_eq!(cart.subtotal(), dec!(1100));
        assert_eq!(cart.tax(), dec!(88.00));
        assert_eq!(cart.total(), dec!(1188.00));
    }

    #[test]
    fn test_total_is_subtotal_plus_tax() {
        let mut cart = Cart::new();
        cart.add(&service(1, "A", dec!(123.45)));
        cart.add(&service(2, "B", dec!(67.89)));
        cart.update_quantity(ServiceId::new(2), 2);

        assert_eq!(cart.total(), cart.subtotal() + cart.tax());
        assert_eq!(cart.tax(), cart.subtotal() * TAX_RATE);
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let cart = Cart::new();
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert_eq!(cart.tax(), Decimal::ZERO);
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_snapshot_is_independent_of_cart() {
        let mut cart = Cart::new();
        cart.add(&service(1, "Web Development", dec!(500)));
        let snapshot = cart.snapshot();
        cart.clear();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].price, dec!(500));
        assert_eq!(snapshot[0].quantity, 1);
    }
}
