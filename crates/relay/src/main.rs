//! mowlid.dev email relay.
//!
//! A small local service (port 3001) that turns notification payloads from
//! the site into SMTP mail to the site owner.
//!
//! # Endpoints
//!
//! - `POST /api/send-email` - `{type, data}` envelope, contact or order
//! - `GET  /api/health` - liveness check

#![cfg_attr(not(test), forbid(unsafe_code))]

mod config;
mod mailer;
mod payload;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::{get, post},
};
use serde_json::{Value, json};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use config::RelayConfig;
use mailer::EmailService;
use payload::NotificationRequest;

#[tokio::main]
async fn main() {
    let config = RelayConfig::from_env().expect("Failed to load configuration");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mowlid_relay=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let service = EmailService::new(&config.smtp, &config.owner_address)
        .expect("Failed to configure SMTP transport");
    let state = Arc::new(service);

    let app = Router::new()
        .route("/api/send-email", post(send_email))
        .route("/api/health", get(health))
        .with_state(state);

    let addr = config.socket_addr();
    tracing::info!("relay listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Liveness health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Accept a notification envelope and deliver it to the owner.
///
/// A malformed or unknown-type envelope is a 400; an SMTP failure is a 500.
/// Both carry `{success: false, message}` so the caller can log one shape.
async fn send_email(
    State(service): State<Arc<EmailService>>,
    request: Result<Json<NotificationRequest>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let Json(request) = match request {
        Ok(json) => json,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "rejected malformed notification");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "message": "Invalid notification payload" })),
            );
        }
    };

    let result = match &request {
        NotificationRequest::Contact(contact) => {
            tracing::info!(name = %contact.name, "sending contact notification");
            service.send_contact_notification(contact).await
        }
        NotificationRequest::Order(order) => {
            tracing::info!(order_id = %order.order_id, "sending order notification");
            service.send_order_notification(order).await
        }
    };

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({ "success": true, "message": "Email sent successfully" })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to send notification");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "success": false, "message": "Failed to send email" })),
            )
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
