//! Admin session gate.
//!
//! The gate is a single boolean flag in the session, set by a plaintext
//! credential compare at login. Explicitly a placeholder, not a security
//! boundary: no hashing, no lockout, no server-issued token.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::session_keys;

/// Extractor that requires the admin flag.
///
/// Redirects to the login page when the flag is absent.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(_admin: RequireAdmin) -> impl IntoResponse {
///     // only reachable with the flag set
/// }
/// ```
#[derive(Debug)]
pub struct RequireAdmin;

/// Rejection: redirect to the admin login page.
#[derive(Debug)]
pub struct AdminAuthRejection;

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        Redirect::to("/admin").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AdminAuthRejection)?;

        if is_admin_authenticated(session).await {
            Ok(Self)
        } else {
            Err(AdminAuthRejection)
        }
    }
}

/// Read the admin flag from the session.
pub async fn is_admin_authenticated(session: &Session) -> bool {
    session
        .get::<bool>(session_keys::ADMIN_AUTHENTICATED)
        .await
        .ok()
        .flatten()
        .unwrap_or(false)
}

/// Set the admin flag (login).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_admin_flag(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::ADMIN_AUTHENTICATED, true).await
}

/// Clear the admin flag (logout).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_admin_flag(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<bool>(session_keys::ADMIN_AUTHENTICATED)
        .await?;
    Ok(())
}
