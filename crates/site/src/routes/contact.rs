//! Contact form handler.
//!
//! The submission is persisted first, then the owner notification is
//! attempted. A notification failure never fails the submission; the
//! inquiry is already saved and visible in the admin inbox.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use mowlid_core::{ContactStatus, Email};
use serde::Deserialize;
use tracing::instrument;

use crate::state::AppState;
use crate::store::NewContact;

/// Contact form data. Phone is optional.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

/// Contact form result fragment (HTMX swaps it in place of the form).
#[derive(Template, WebTemplate)]
#[template(path = "partials/contact_result.html")]
pub struct ContactResultTemplate {
    pub success: bool,
    pub message: String,
}

fn failure(message: &str) -> ContactResultTemplate {
    ContactResultTemplate {
        success: false,
        message: message.to_string(),
    }
}

/// Submit the contact form (HTMX).
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<ContactForm>,
) -> impl IntoResponse {
    if form.name.trim().is_empty() || form.message.trim().is_empty() {
        return failure("Please fill in all required fields");
    }
    let email = match Email::parse(&form.email) {
        Ok(email) => email,
        Err(_) => return failure("Please enter a valid email address"),
    };

    let contact = NewContact {
        name: form.name.trim().to_string(),
        email: email.to_string(),
        phone: if form.phone.trim().is_empty() {
            None
        } else {
            Some(form.phone.trim().to_string())
        },
        message: form.message.trim().to_string(),
        status: ContactStatus::New,
    };

    if let Err(e) = state.store().create_contact(&contact).await {
        tracing::error!(error = %e, "failed to save contact submission");
        return failure("Failed to send message. Please try again.");
    }

    // Best-effort; the submission is already saved.
    if let Err(e) = state
        .notifier()
        .contact_received(
            &contact.name,
            &contact.email,
            contact.phone.as_deref(),
            &contact.message,
        )
        .await
    {
        tracing::error!(error = %e, "contact notification failed");
    }

    tracing::info!(name = %contact.name, "contact submission received");
    ContactResultTemplate {
        success: true,
        message: "Thanks for reaching out! I'll get back to you soon.".to_string(),
    }
}
