//! Portfolio home page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::catalog::{ProjectView, ServiceView};
use crate::filters;
use crate::state::AppState;

/// Home page template: bio, services, projects, contact form.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub services: Vec<ServiceView>,
    pub projects: Vec<ProjectView>,
}

/// Display the portfolio home page.
///
/// A store failure degrades to an empty catalog section rather than an
/// error page; the rest of the portfolio still renders.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let services = match state.store().list_services().await {
        Ok(rows) => rows.iter().map(ServiceView::from).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch services");
            Vec::new()
        }
    };

    let projects = match state.store().list_projects().await {
        Ok(rows) => rows.iter().map(ProjectView::from).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch projects");
            Vec::new()
        }
    };

    HomeTemplate { services, projects }
}
