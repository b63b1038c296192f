//! Admin login and logout.
//!
//! A plaintext credential compare against configured values, gating a
//! single session flag. A placeholder, not a security boundary.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::filters;
use crate::middleware::{clear_admin_flag, is_admin_authenticated, set_admin_flag};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Display the login page. Already-authenticated admins go straight to the
/// dashboard.
#[instrument(skip(session))]
pub async fn login_page(session: Session) -> Response {
    if is_admin_authenticated(&session).await {
        return Redirect::to("/admin/dashboard").into_response();
    }
    LoginTemplate { error: None }.into_response()
}

/// Process a login attempt.
///
/// The same generic message covers a wrong username and a wrong password.
#[instrument(skip(state, session, form), fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    if !state.config().admin.matches(&form.username, &form.password) {
        tracing::warn!("failed admin login attempt");
        return LoginTemplate {
            error: Some("Invalid credentials".to_string()),
        }
        .into_response();
    }

    if let Err(e) = set_admin_flag(&session).await {
        tracing::error!(error = %e, "failed to set admin session flag");
        return LoginTemplate {
            error: Some("Login failed. Please try again.".to_string()),
        }
        .into_response();
    }

    tracing::info!("admin logged in");
    Redirect::to("/admin/dashboard").into_response()
}

/// Log out: clear the admin flag and return to the login page.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_admin_flag(&session).await {
        tracing::error!(error = %e, "failed to clear admin session flag");
    }
    Redirect::to("/admin")
}
