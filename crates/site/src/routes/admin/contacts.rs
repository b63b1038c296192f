//! Admin contact inbox: status updates and deletion.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use mowlid_core::{ContactId, ContactStatus};
use tracing::instrument;

use super::{ListQuery, error_redirect};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::routes::admin::orders::StatusForm;
use crate::state::AppState;
use crate::store::ContactRow;

const LIST_PATH: &str = "/admin/contacts";

/// Contact inbox page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/contacts.html")]
pub struct ContactsTemplate {
    pub contacts: Vec<ContactRow>,
    pub statuses: &'static [ContactStatus],
    pub error: Option<String>,
}

/// List contact messages, newest first.
#[instrument(skip(state))]
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    match state.store().list_contacts().await {
        Ok(contacts) => ContactsTemplate {
            contacts,
            statuses: &ContactStatus::ALL,
            error: query.error,
        }
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to list contacts");
            ContactsTemplate {
                contacts: Vec::new(),
                statuses: &ContactStatus::ALL,
                error: Some("Failed to load messages".to_string()),
            }
            .into_response()
        }
    }
}

/// Overwrite a contact's status.
#[instrument(skip(state, form))]
pub async fn update_status(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<StatusForm>,
) -> Redirect {
    let Ok(status) = form.status.parse::<ContactStatus>() else {
        return error_redirect(LIST_PATH, "Unknown contact status");
    };

    match state
        .store()
        .update_contact_status(ContactId::new(id), status)
        .await
    {
        Ok(row) => {
            tracing::info!(id = %row.id, status = %status, "contact status updated");
            Redirect::to(LIST_PATH)
        }
        Err(e) => {
            tracing::error!(error = %e, id, "failed to update contact status");
            error_redirect(LIST_PATH, "Failed to update contact status")
        }
    }
}

/// Delete a contact message.
#[instrument(skip(state))]
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Redirect {
    match state.store().delete_contact(ContactId::new(id)).await {
        Ok(()) => {
            tracing::info!(id, "contact deleted");
            Redirect::to(LIST_PATH)
        }
        Err(e) => {
            tracing::error!(error = %e, id, "failed to delete contact");
            error_redirect(LIST_PATH, "Failed to delete contact")
        }
    }
}
