//! Checkout and order confirmation.
//!
//! Submission is causally sequential: validate, persist the order, attempt
//! the owner notification (best-effort), then reveal the confirmation. A
//! store failure leaves the cart and form untouched so the user can retry;
//! a notification failure is logged and never surfaces.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use mowlid_core::{Email, OrderRef, OrderStatus};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::Cart;
use crate::error::AppError;
use crate::filters;
use crate::routes::cart::{load_cart, save_cart};
use crate::state::AppState;
use crate::store::NewOrder;

/// Checkout form data. Name, email, and phone are required; the address
/// block is optional but echoed into the order verbatim.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub cart: Cart,
    pub form: CheckoutForm,
    pub error: Option<String>,
}

/// Order confirmation template, rendered from the locally assembled order
/// (no re-fetch from the store).
#[derive(Template, WebTemplate)]
#[template(path = "confirmation.html")]
pub struct ConfirmationTemplate {
    pub order: NewOrder,
}

/// Validate the required checkout fields.
///
/// # Errors
///
/// Returns a user-facing message naming the first missing or malformed
/// field. Nothing has been persisted when this fails.
pub fn validate(form: &CheckoutForm) -> Result<(), String> {
    if form.full_name.trim().is_empty() {
        return Err("Please fill in all required fields".to_string());
    }
    if Email::parse(&form.email).is_err() {
        return Err("Please enter a valid email address".to_string());
    }
    if form.phone.trim().is_empty() {
        return Err("Please fill in all required fields".to_string());
    }
    Ok(())
}

/// Assemble an order record from the form and a cart snapshot.
///
/// Pure: no I/O, no clock access (the reference is passed in). Totals come
/// from the cart engine; the item snapshot is denormalized so later catalog
/// edits never rewrite this order.
#[must_use]
pub fn build_order(form: &CheckoutForm, cart: &Cart, order_ref: OrderRef) -> NewOrder {
    NewOrder {
        order_id: order_ref,
        customer_name: form.full_name.trim().to_string(),
        customer_email: form.email.trim().to_lowercase(),
        customer_phone: form.phone.trim().to_string(),
        address_street: form.address.clone(),
        address_city: form.city.clone(),
        address_postal: form.postal_code.clone(),
        address_country: form.country.clone(),
        items: cart.snapshot(),
        subtotal: cart.subtotal(),
        tax: cart.tax(),
        total: cart.total(),
        status: OrderStatus::Pending,
    }
}

/// Display the checkout form. An empty cart cannot reach checkout.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Response {
    let cart = load_cart(&session).await;
    if cart.is_empty() {
        return Redirect::to("/").into_response();
    }
    CheckoutTemplate {
        cart,
        form: CheckoutForm::default(),
        error: None,
    }
    .into_response()
}

/// Submit the checkout form.
#[instrument(skip(state, session, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CheckoutForm>,
) -> Result<Response, AppError> {
    let cart = load_cart(&session).await;

    if cart.is_empty() {
        return Err(AppError::Validation("cart is empty".to_string()));
    }

    // Validation failures happen before any network call; the cart and the
    // submitted form are both preserved.
    if let Err(message) = validate(&form) {
        return Ok(CheckoutTemplate {
            cart,
            form,
            error: Some(message),
        }
        .into_response());
    }

    let order = build_order(&form, &cart, OrderRef::generate(Utc::now()));

    // Persist first. The order must be durably stored before any
    // notification is attempted.
    if let Err(e) = state.store().create_order(&order).await {
        tracing::error!(error = %e, order_id = %order.order_id, "failed to persist order");
        return Ok(CheckoutTemplate {
            cart,
            form,
            error: Some("Failed to save order. Please try again.".to_string()),
        }
        .into_response());
    }

    // Best-effort notification; failure is operator-visible but never rolls
    // back or blocks the confirmation.
    if let Err(e) = state.notifier().order_received(&order).await {
        tracing::error!(error = %e, order_id = %order.order_id, "order notification failed");
    }

    let mut cart = cart;
    cart.clear();
    if let Err(e) = save_cart(&session, &cart).await {
        tracing::error!("Failed to clear cart in session: {e}");
    }

    tracing::info!(order_id = %order.order_id, total = %order.total, "order placed");
    Ok(ConfirmationTemplate { order }.into_response())
}

#[cfg(test)]
mod tests {
    use mowlid_core::{PriceRange, ServiceId};
    use rust_decimal::dec;

    use super::*;
    use crate::catalog::ServiceView;

    fn filled_form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 555 0100".to_string(),
            address: "1 Main St".to_string(),
            city: "Minneapolis".to_string(),
            postal_code: "55401".to_string(),
            country: "USA".to_string(),
        }
    }

    fn cart_with_one_service() -> Cart {
        let mut cart = Cart::new();
        cart.add(&ServiceView {
            id: ServiceId::new(1),
            title: "Web Development".to_string(),
            description: "Full site build".to_string(),
            price: PriceRange::fixed(dec!(500)),
            unit_price: dec!(500),
            category: "Service".to_string(),
        });
        cart
    }

    #[test]
    fn test_validate_missing_full_name() {
        let mut form = filled_form();
        form.full_name = "  ".to_string();
        assert!(validate(&form).is_err());
    }

    #[test]
    fn test_validate_bad_email() {
        let mut form = filled_form();
        form.email = "not-an-email".to_string();
        assert!(validate(&form).is_err());
    }

    #[test]
    fn test_validate_missing_phone() {
        let mut form = filled_form();
        form.phone = String::new();
        assert!(validate(&form).is_err());
    }

    #[test]
    fn test_validate_empty_address_is_fine() {
        let mut form = filled_form();
        form.address = String::new();
        form.city = String::new();
        form.postal_code = String::new();
        form.country = String::new();
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn test_build_order_shape() {
        let cart = cart_with_one_service();
        let order_ref = OrderRef::parse("ORD-1700000000123").expect("valid");
        let order = build_order(&filled_form(), &cart, order_ref);

        assert_eq!(order.order_id.as_str(), "ORD-1700000000123");
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.subtotal, dec!(500));
        assert_eq!(order.tax, dec!(40.00));
        assert_eq!(order.total, dec!(540.00));
        assert_eq!(order.items.len(), 1);
        // Empty address fields are echoed verbatim
        assert_eq!(order.address_street, "1 Main St");
    }

    #[test]
    fn test_order_snapshot_survives_catalog_edit() {
        let cart = cart_with_one_service();
        let order = build_order(
            &filled_form(),
            &cart,
            OrderRef::generate(Utc::now()),
        );

        // "Edit" the catalog after the fact; the order's snapshot is a copy.
        drop(cart);
        assert_eq!(order.items[0].price, dec!(500));
        assert_eq!(order.items[0].title, "Web Development");
    }
}
