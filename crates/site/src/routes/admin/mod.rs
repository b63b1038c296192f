//! Admin dashboard routes.
//!
//! Everything except the login page sits behind the [`RequireAdmin`]
//! extractor. Mutations redirect back to their list page, which re-fetches
//! from the store; a failed mutation redirects with an `error` query
//! parameter the list page renders as a banner.

pub mod auth;
pub mod contacts;
pub mod orders;
pub mod projects;
pub mod services;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Create the admin routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(auth::login_page))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/dashboard", get(dashboard))
        .route(
            "/services",
            get(services::list).post(services::create),
        )
        .route("/services/{id}", post(services::update))
        .route("/services/{id}/delete", post(services::delete))
        .route(
            "/projects",
            get(projects::list).post(projects::create),
        )
        .route("/projects/{id}", post(projects::update))
        .route("/projects/{id}/delete", post(projects::delete))
        .route("/orders", get(orders::list))
        .route("/orders/{id}/status", post(orders::update_status))
        .route("/orders/{id}/delete", post(orders::delete))
        .route("/contacts", get(contacts::list))
        .route("/contacts/{id}/status", post(contacts::update_status))
        .route("/contacts/{id}/delete", post(contacts::delete))
}

/// `?error=` banner carried across a mutation redirect.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub error: Option<String>,
}

/// Redirect target for a failed mutation: back to the list with a banner.
fn error_redirect(list_path: &str, message: &str) -> axum::response::Redirect {
    // Query-string encoding; the message is our own text, not user input.
    let encoded = message.replace(' ', "+");
    axum::response::Redirect::to(&format!("{list_path}?error={encoded}"))
}

/// Admin dashboard template: entity counts and quick links.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub service_count: usize,
    pub project_count: usize,
    pub order_count: usize,
    pub pending_order_count: usize,
    pub contact_count: usize,
    pub new_contact_count: usize,
}

/// Overview page. A store failure for one entity degrades that count to
/// zero rather than failing the whole page.
#[instrument(skip(state))]
pub async fn dashboard(_admin: RequireAdmin, State(state): State<AppState>) -> impl IntoResponse {
    let service_count = state
        .store()
        .list_services()
        .await
        .map_or(0, |rows| rows.len());
    let project_count = state
        .store()
        .list_projects()
        .await
        .map_or(0, |rows| rows.len());

    let (order_count, pending_order_count) = match state.store().list_orders().await {
        Ok(rows) => {
            let pending = rows
                .iter()
                .filter(|row| row.status == mowlid_core::OrderStatus::Pending)
                .count();
            (rows.len(), pending)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch orders for dashboard");
            (0, 0)
        }
    };

    let (contact_count, new_contact_count) = match state.store().list_contacts().await {
        Ok(rows) => {
            let new = rows
                .iter()
                .filter(|row| row.status == mowlid_core::ContactStatus::New)
                .count();
            (rows.len(), new)
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch contacts for dashboard");
            (0, 0)
        }
    };

    DashboardTemplate {
        service_count,
        project_count,
        order_count,
        pending_order_count,
        contact_count,
        new_contact_count,
    }
}
