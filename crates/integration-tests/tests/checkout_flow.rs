//! Checkout assembly: from a filled cart and form to the order record the
//! store receives.

use chrono::Utc;
use mowlid_core::{OrderRef, OrderStatus, PriceRange, ServiceId};
use mowlid_site::cart::Cart;
use mowlid_site::catalog::ServiceView;
use mowlid_site::routes::checkout::{CheckoutForm, build_order, validate};
use rust_decimal::dec;

fn filled_cart() -> Cart {
    let mut cart = Cart::new();
    let web = ServiceView {
        id: ServiceId::new(1),
        title: "Web Development".to_string(),
        description: "Full site build".to_string(),
        price: PriceRange::fixed(dec!(500)),
        unit_price: dec!(500),
        category: "Service".to_string(),
    };
    let consult = ServiceView {
        id: ServiceId::new(2),
        title: "Consultation".to_string(),
        description: "One-hour call".to_string(),
        price: PriceRange::fixed(dec!(100)),
        unit_price: dec!(100),
        category: "Service".to_string(),
    };
    cart.add(&web);
    cart.add(&web);
    cart.add(&consult);
    cart
}

fn filled_form() -> CheckoutForm {
    CheckoutForm {
        full_name: "Jane Doe".to_string(),
        email: "Jane@Example.com".to_string(),
        phone: "+1 555 0100".to_string(),
        address: "1 Main St".to_string(),
        city: "Minneapolis".to_string(),
        postal_code: "55401".to_string(),
        country: "USA".to_string(),
    }
}

#[test]
fn test_order_reference_format() {
    let order_ref = OrderRef::generate(Utc::now());
    let s = order_ref.as_str();

    assert!(s.starts_with("ORD-"));
    let digits = &s["ORD-".len()..];
    assert!(!digits.is_empty());
    assert!(digits.chars().all(|c| c.is_ascii_digit()));
    // And it survives a parse round trip.
    assert_eq!(OrderRef::parse(s).expect("valid reference").as_str(), s);
}

#[test]
fn test_build_order_carries_cart_totals() {
    let cart = filled_cart();
    let order = build_order(&filled_form(), &cart, OrderRef::generate(Utc::now()));

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.subtotal, dec!(1100));
    assert_eq!(order.tax, dec!(88.00));
    assert_eq!(order.total, dec!(1188.00));
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.customer_email, "jane@example.com", "email is normalized");
}

#[test]
fn test_order_snapshot_is_independent_of_cart() {
    let mut cart = filled_cart();
    let order = build_order(&filled_form(), &cart, OrderRef::generate(Utc::now()));

    // Checkout clears the cart afterwards; the order must not change.
    cart.clear();
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.subtotal, dec!(1100));
}

#[test]
fn test_order_serializes_to_store_shape() {
    let cart = filled_cart();
    let order_ref = OrderRef::parse("ORD-1700000000123").expect("valid");
    let order = build_order(&filled_form(), &cart, order_ref);

    let json = serde_json::to_value(&order).expect("serialize");
    assert_eq!(json["order_id"], "ORD-1700000000123");
    assert_eq!(json["status"], "pending");
    assert_eq!(json["customer_name"], "Jane Doe");
    assert_eq!(json["items"][0]["title"], "Web Development");
    // Decimals travel as strings on the wire.
    assert_eq!(json["subtotal"], "1100");
}

#[test]
fn test_validation_rejects_incomplete_forms() {
    let mut form = filled_form();
    form.full_name = String::new();
    assert!(validate(&form).is_err());

    let mut form = filled_form();
    form.email = "jane@".to_string();
    assert!(validate(&form).is_err());

    let mut form = filled_form();
    form.phone = "   ".to_string();
    assert!(validate(&form).is_err());

    assert!(validate(&filled_form()).is_ok());
}
