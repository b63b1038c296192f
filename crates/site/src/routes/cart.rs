//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The cart itself lives in the session; handlers load it, apply one cart
//! engine operation, and save it back.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use mowlid_core::ServiceId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::Cart;
use crate::catalog::ServiceView;
use crate::error::AppError;
use crate::filters;
use crate::models::session_keys;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the cart from the session, defaulting to empty.
pub async fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(session_keys::CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

/// Save the cart back to the session.
pub async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub service_id: i64,
}

/// Update quantity form data. `delta` is +1 or -1 from the quantity
/// stepper buttons.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub service_id: i64,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub service_id: i64,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartShowTemplate {
    pub cart: Cart,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: Cart,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartShowTemplate { cart }
}

/// Add a service to the cart (HTMX).
///
/// Looks the service up in the (cached) catalog so the cart line carries a
/// snapshot of title and price. Returns an HTMX trigger so the count badge
/// and any open cart view refresh.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response, AppError> {
    let service_id = ServiceId::new(form.service_id);

    let services = match state.store().list_services().await {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch services for cart add");
            return Ok((
                StatusCode::BAD_GATEWAY,
                Html("<span class=\"error\">Error adding to cart</span>"),
            )
                .into_response());
        }
    };

    let Some(service) = services
        .iter()
        .find(|row| row.id == service_id)
        .map(ServiceView::from)
    else {
        return Ok((
            StatusCode::NOT_FOUND,
            Html("<span class=\"error\">Service not found</span>"),
        )
            .into_response());
    };

    let mut cart = load_cart(&session).await;
    cart.add(&service);
    let count = cart.item_count();
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate { count },
    )
        .into_response())
}

/// Adjust a line's quantity (HTMX).
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response, AppError> {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(ServiceId::new(form.service_id), form.delta);
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response())
}

/// Remove a line from the cart (HTMX).
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response, AppError> {
    let mut cart = load_cart(&session).await;
    cart.remove(ServiceId::new(form.service_id));
    save_cart(&session, &cart).await?;

    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CartCountTemplate {
        count: cart.item_count(),
    }
}
