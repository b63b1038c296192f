//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Portfolio home (services, projects, contact)
//! GET  /health                 - Liveness check
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add service (returns count fragment)
//! POST /cart/update            - Adjust quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove line (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Checkout form (redirects home when cart empty)
//! POST /checkout               - Submit order
//!
//! # Contact
//! POST /contact                - Submit contact form (fragment)
//!
//! # Admin
//! GET  /admin                  - Login page (redirects to dashboard when authed)
//! POST /admin/login            - Login action
//! POST /admin/logout           - Logout action
//! GET  /admin/dashboard        - Overview (protected)
//! GET/POST /admin/{services,projects}[...]  - Catalog CRUD (protected)
//! GET/POST /admin/{orders,contacts}[...]    - Status updates + deletes (protected)
//!
//! # Diagnostics (development aids)
//! GET  /debug/store            - Per-table store reachability
//! GET  /debug/email            - Relay health
//! POST /debug/email            - Send a test notification
//!
//! Any unknown route redirects to /.
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod diagnostics;
pub mod home;

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .nest("/cart", cart_routes())
        .route("/checkout", get(checkout::show).post(checkout::submit))
        .route("/contact", post(contact::submit))
        .nest("/admin", admin::routes())
        .nest("/debug", diagnostics::routes())
        .fallback(get(redirect_home))
}

/// Wildcard: anything unknown goes back to the portfolio.
async fn redirect_home() -> Redirect {
    Redirect::to("/")
}
