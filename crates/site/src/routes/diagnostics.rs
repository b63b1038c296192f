//! Development diagnostics.
//!
//! JSON endpoints for checking store and relay connectivity from a browser
//! or curl. They expose reachability booleans only, never data or keys.

use axum::{
    Json,
    Router,
    extract::State,
    routing::get,
};
use serde_json::{Value, json};
use tracing::instrument;

use crate::state::AppState;

/// Create the diagnostics routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/store", get(store_health))
        .route("/email", get(relay_health).post(send_test_notification))
}

/// Probe each store table and report per-table reachability.
#[instrument(skip(state))]
pub async fn store_health(State(state): State<AppState>) -> Json<Value> {
    let health = state.store().health().await;
    Json(json!({
        "ok": health.ok(),
        "tables": {
            "services": health.services,
            "projects": health.projects,
            "orders": health.orders,
            "contacts": health.contacts,
        },
    }))
}

/// Check whether the email relay is up.
#[instrument(skip(state))]
pub async fn relay_health(State(state): State<AppState>) -> Json<Value> {
    let up = state.notifier().health().await;
    Json(json!({ "ok": up }))
}

/// Send a test contact notification through the relay.
#[instrument(skip(state))]
pub async fn send_test_notification(State(state): State<AppState>) -> Json<Value> {
    let result = state
        .notifier()
        .contact_received(
            "Diagnostics",
            "diagnostics@localhost",
            None,
            "Test notification from /debug/email",
        )
        .await;

    match result {
        Ok(()) => Json(json!({ "ok": true })),
        Err(e) => {
            tracing::warn!(error = %e, "test notification failed");
            Json(json!({ "ok": false, "error": e.to_string() }))
        }
    }
}
