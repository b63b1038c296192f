//! Cart engine flows a visitor can actually produce through the UI.
//!
//! Each test is a full click sequence, not a single operation: add from the
//! catalog, step quantities with the +/- controls, remove lines, and check
//! the derived totals after every step.

use mowlid_core::{PriceRange, ServiceId};
use mowlid_site::cart::Cart;
use mowlid_site::catalog::ServiceView;
use rust_decimal::dec;
use rust_decimal::Decimal;

fn service(id: i64, title: &str, unit_price: Decimal) -> ServiceView {
    ServiceView {
        id: ServiceId::new(id),
        title: title.to_string(),
        description: format!("{title} description"),
        price: PriceRange::fixed(unit_price),
        unit_price,
        category: "Service".to_string(),
    }
}

#[test]
fn test_two_service_order_totals() {
    // $500 web development twice, $100 consultation once.
    let web = service(1, "Web Development", dec!(500));
    let consult = service(2, "Consultation", dec!(100));

    let mut cart = Cart::new();
    cart.add(&web);
    cart.add(&web);
    cart.add(&consult);

    assert_eq!(cart.items().len(), 2, "same service merges into one line");
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.subtotal(), dec!(1100));
    assert_eq!(cart.tax(), dec!(88.00));
    assert_eq!(cart.total(), dec!(1188.00));
}

#[test]
fn test_stepping_quantity_down_to_zero_removes_line() {
    let web = service(1, "Web Development", dec!(500));

    let mut cart = Cart::new();
    cart.add(&web);
    cart.update_quantity(ServiceId::new(1), 1);
    assert_eq!(cart.item_count(), 2);

    cart.update_quantity(ServiceId::new(1), -1);
    cart.update_quantity(ServiceId::new(1), -1);
    assert!(cart.is_empty(), "quantity 0 must drop the line");

    // Further decrements on the vanished line are no-ops.
    cart.update_quantity(ServiceId::new(1), -1);
    assert!(cart.is_empty());
    assert_eq!(cart.total(), Decimal::ZERO);
}

#[test]
fn test_remove_is_idempotent() {
    let web = service(1, "Web Development", dec!(500));
    let consult = service(2, "Consultation", dec!(100));

    let mut cart = Cart::new();
    cart.add(&web);
    cart.add(&consult);

    cart.remove(ServiceId::new(1));
    cart.remove(ServiceId::new(1));
    cart.remove(ServiceId::new(99));

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.subtotal(), dec!(100));
}

#[test]
fn test_readding_after_remove_starts_fresh() {
    let web = service(1, "Web Development", dec!(500));

    let mut cart = Cart::new();
    cart.add(&web);
    cart.add(&web);
    cart.remove(ServiceId::new(1));
    cart.add(&web);

    assert_eq!(cart.item_count(), 1, "removed line does not remember its quantity");
}

#[test]
fn test_unpriced_service_carts_at_zero() {
    // A "contact for quote" service parses to a zero price and still carts.
    let quote = service(3, "Custom Work", Decimal::ZERO);

    let mut cart = Cart::new();
    cart.add(&quote);

    assert_eq!(cart.item_count(), 1);
    assert_eq!(cart.total(), Decimal::ZERO);
}
