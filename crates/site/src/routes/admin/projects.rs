//! Admin CRUD for the portfolio projects.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use mowlid_core::ProjectId;
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

use super::{ListQuery, error_redirect};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::state::AppState;
use crate::store::{NewProject, ProjectRow};

const LIST_PATH: &str = "/admin/projects";

/// Create/update form data. `is_live` is a checkbox: present when checked,
/// absent otherwise. Empty URL fields become `NULL` columns.
#[derive(Debug, Deserialize)]
pub struct ProjectForm {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub is_live: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub technology: String,
    #[serde(default)]
    pub official_link: String,
}

fn blank_to_none(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl ProjectForm {
    fn into_payload(self) -> Result<NewProject, &'static str> {
        if self.name.trim().is_empty() {
            return Err("Project name is required");
        }
        Ok(NewProject {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            is_live: self.is_live.is_some(),
            link: blank_to_none(self.link),
            image: blank_to_none(self.image),
            technology: self.technology.trim().to_string(),
            official_link: blank_to_none(self.official_link),
        })
    }
}

/// Projects management page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/projects.html")]
pub struct ProjectsTemplate {
    pub projects: Arc<Vec<ProjectRow>>,
    pub error: Option<String>,
}

/// List projects with create/edit forms.
#[instrument(skip(state))]
pub async fn list(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    match state.store().list_projects().await {
        Ok(projects) => ProjectsTemplate {
            projects,
            error: query.error,
        }
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to list projects");
            ProjectsTemplate {
                projects: Arc::new(Vec::new()),
                error: Some("Failed to load projects".to_string()),
            }
            .into_response()
        }
    }
}

/// Create a project.
#[instrument(skip(state, form), fields(name = %form.name))]
pub async fn create(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<ProjectForm>,
) -> Redirect {
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(message) => return error_redirect(LIST_PATH, message),
    };

    match state.store().create_project(&payload).await {
        Ok(row) => {
            tracing::info!(id = %row.id, "project created");
            Redirect::to(LIST_PATH)
        }
        Err(e) => {
            tracing::error!(error = %e, "failed to create project");
            error_redirect(LIST_PATH, "Failed to create project")
        }
    }
}

/// Update a project.
#[instrument(skip(state, form))]
pub async fn update(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ProjectForm>,
) -> Redirect {
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(message) => return error_redirect(LIST_PATH, message),
    };

    match state.store().update_project(ProjectId::new(id), &payload).await {
        Ok(row) => {
            tracing::info!(id = %row.id, "project updated");
            Redirect::to(LIST_PATH)
        }
        Err(e) => {
            tracing::error!(error = %e, id, "failed to update project");
            error_redirect(LIST_PATH, "Failed to update project")
        }
    }
}

/// Delete a project.
#[instrument(skip(state))]
pub async fn delete(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Redirect {
    match state.store().delete_project(ProjectId::new(id)).await {
        Ok(()) => {
            tracing::info!(id, "project deleted");
            Redirect::to(LIST_PATH)
        }
        Err(e) => {
            tracing::error!(error = %e, id, "failed to delete project");
            error_redirect(LIST_PATH, "Failed to delete project")
        }
    }
}
