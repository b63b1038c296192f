//! One-shot catalog seeder.
//!
//! Populates an empty deployment's `services` and `projects` tables with
//! the sample catalog, then exits. Safe to re-run: existing rows are
//! matched by name and skipped.
//!
//! ```bash
//! cargo run -p mowlid-site --bin seed
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use mowlid_site::config::SiteConfig;
use mowlid_site::seed::seed_catalog;
use mowlid_site::store::StoreClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mowlid_site=info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match SiteConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "failed to load configuration");
            return std::process::ExitCode::FAILURE;
        }
    };

    let store = StoreClient::new(&config.store);
    match seed_catalog(&store).await {
        Ok(result) if result.errors.is_empty() => {
            tracing::info!(
                inserted = result.inserted,
                skipped = result.skipped,
                "catalog seeded"
            );
            std::process::ExitCode::SUCCESS
        }
        Ok(result) => {
            for (name, error) in &result.errors {
                tracing::error!(%name, %error, "row was not seeded");
            }
            std::process::ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "could not read existing catalog");
            std::process::ExitCode::FAILURE
        }
    }
}
