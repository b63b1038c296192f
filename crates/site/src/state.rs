//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::SiteConfig;
use crate::notify::Notifier;
use crate::store::StoreClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds configuration, the remote store
/// client, and the relay notifier.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    store: StoreClient,
    notifier: Notifier,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        let store = StoreClient::new(&config.store);
        let notifier = Notifier::new(&config.relay_url);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                notifier,
            }),
        }
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the remote data store client.
    #[must_use]
    pub fn store(&self) -> &StoreClient {
        &self.inner.store
    }

    /// Get a reference to the relay notifier.
    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.inner.notifier
    }
}
