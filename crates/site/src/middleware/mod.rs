//! HTTP middleware stack for the site.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Session layer (tower-sessions, in-memory store)

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, clear_admin_flag, is_admin_authenticated, set_admin_flag};
pub use session::create_session_layer;
