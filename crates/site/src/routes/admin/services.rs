//! Admin CRUD for the services catalog.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use mowlid_core::ServiceId;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use super::{ListQuery, error_redirect};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;
use crate::store::{NewService, ServiceRow};

const LIST_PATH: &str = "/admin/services";

/// Create/update form data. The price is stored as the display string the
/// owner typed (e.g. `$500-$2000`); it is parsed at the catalog boundary.
#[derive(Debug, Deserialize)]
pub struct ServiceForm {
    pub name: String,
    pub price: String,
    pub description: String,
}

impl ServiceForm {
    fn into_payload(self) -> Result<NewService, &'static str> {
        if self.name.trim().is_empty() || self.price.trim().is_empty() {
            return Err("Name and price are required");
        }
        Ok(NewService {
            name: self.name.trim().to_string(),
            price: self.price.trim().to_string(),
            description: self.description.trim().to_string(),
        })
    }
}

/// Services management page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/services.html")]
pub struct ServicesTemplate {
    pub services: Arc<Vec<ServiceRow>>,
    pub error: Option<String>,
}

/// List services with create/edit forms.
#[instrument(skip(state))]
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    match state.store().list_services().await {
        Ok(services) => ServicesTemplate {
            services,
            error: query.error,
        }
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to list services");
            ServicesTemplate {
                services: Arc::new(Vec::new()),
                error: Some("Failed to load services".to_string()),
            }
            .into_response()
        }
    }
}

/// Create a service.
#[instrument(skip(state, form), fields(name = %form.name))]
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ServiceForm>,
) -> Redirect {
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(message) => return error_redirect(LIST_PATH, message),
    };

    match state.store().create_service(&payload).await {
        Ok(row) => {
            tracing::info!(id = %row.id, "service created");
            Redirect::to(LIST_PATH)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to create service");
            error_redirect(LIST_PATH, "Failed to create service")
        }
    }
}

/// Update a service.
#[instrument(skip(state, form))]
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ServiceForm>,
) -> Redirect {
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(message) => return error_redirect(LIST_PATH, message),
    };

    match state.store().update_service(ServiceId::new(id), &payload).await {
        Ok(row) => {
            tracing::info!(id = %row.id, "service updated");
            Redirect::to(LIST_PATH)
        }
        Err(e) => {
            tracing::error!(error = %e, id, "failed to update service");
            error_redirect(LIST_PATH, "Failed to update service")
        }
    }
}

/// Delete a service. Existing orders keep their item snapshots.
#[instrument(skip(state))]
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Redirect {
    match state.store().delete_service(ServiceId::new(id)).await {
        Ok(()) => {
            tracing::info!(id, "service deleted");
            Redirect::to(LIST_PATH)
        }
        Err(e) => {
            tracing::error!(error = %e, id, "failed to delete service");
            error_redirect(LIST_PATH, "Failed to delete service")
        }
    }
}
