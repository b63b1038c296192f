//! Client for the remote data store.
//!
//! The store is a hosted table service with a PostgREST-style interface:
//! four tables (`services`, `projects`, `orders`, `contacts`) addressed by
//! URL, filtered with query parameters, and authenticated with an API key.
//! Catalog reads (services, projects) are cached with `moka` (5-minute TTL);
//! catalog mutations invalidate the cached entry so the admin dashboard
//! always sees its own writes.

pub mod records;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use moka::future::Cache;
use mowlid_core::{ContactId, ContactStatus, OrderRowId, OrderStatus, ProjectId, ServiceId};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::instrument;

use crate::config::StoreConfig;
pub use records::{
    ContactRow, NewContact, NewOrder, NewProject, NewService, OrderItem, OrderRow, ProjectRow,
    ServiceRow,
};

/// Catalog cache TTL.
const CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors from the remote data store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport-level failure (store unreachable, TLS, timeout).
    #[error("store request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The store answered with a body we could not decode.
    #[error("failed to parse store response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A mutation returned an empty representation (row does not exist).
    #[error("row not found")]
    NotFound,
}

/// Per-table reachability report from [`StoreClient::health`].
#[derive(Debug, Clone, Copy)]
pub struct StoreHealth {
    pub services: bool,
    pub projects: bool,
    pub orders: bool,
    pub contacts: bool,
}

impl StoreHealth {
    /// True when every table answered.
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.services && self.projects && self.orders && self.contacts
    }
}

/// Cached catalog listings. Values are `Arc`-wrapped so cache hits clone a
/// pointer, not a vector.
#[derive(Clone)]
enum CatalogEntry {
    Services(Arc<Vec<ServiceRow>>),
    Projects(Arc<Vec<ProjectRow>>),
}

/// Client for the remote data store.
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    client: reqwest::Client,
    base: String,
    api_key: String,
    catalog_cache: Cache<&'static str, CatalogEntry>,
}

impl StoreClient {
    /// Create a new store client.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        let catalog_cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(CACHE_TTL)
            .build();

        let base = format!("{}/rest/v1", config.url.as_str().trim_end_matches('/'));

        Self {
            inner: Arc::new(StoreClientInner {
                client: reqwest::Client::new(),
                base,
                api_key: config.api_key.expose_secret().to_string(),
                catalog_cache,
            }),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.inner.base)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.inner.api_key)
            .bearer_auth(&self.inner.api_key)
    }

    /// Decode a response, surfacing non-success statuses with a body
    /// snippet for diagnostics.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, StoreError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "store returned non-success status"
            );
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch all rows of a table, newest first.
    async fn list<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, StoreError> {
        let response = self
            .authed(self.inner.client.get(self.table_url(table)))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Insert a row and return the stored representation.
    async fn insert<T: DeserializeOwned, P: Serialize>(
        &self,
        table: &str,
        payload: &P,
    ) -> Result<T, StoreError> {
        let response = self
            .authed(self.inner.client.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await?;
        let mut rows: Vec<T> = Self::decode(response).await?;
        rows.pop().ok_or(StoreError::NotFound)
    }

    /// Update a row by id and return the stored representation.
    async fn update<T: DeserializeOwned, P: Serialize>(
        &self,
        table: &str,
        id: i64,
        payload: &P,
    ) -> Result<T, StoreError> {
        let response = self
            .authed(self.inner.client.patch(self.table_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=representation")
            .json(payload)
            .send()
            .await?;
        let mut rows: Vec<T> = Self::decode(response).await?;
        rows.pop().ok_or(StoreError::NotFound)
    }

    /// Delete a row by id.
    async fn delete(&self, table: &str, id: i64) -> Result<(), StoreError> {
        let response = self
            .authed(self.inner.client.delete(self.table_url(table)))
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }
        Ok(())
    }

    /// Probe one table without fetching rows.
    async fn probe(&self, table: &str) -> bool {
        let result = self
            .authed(self.inner.client.get(self.table_url(table)))
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await;
        match result {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(table, error = %e, "store probe failed");
                false
            }
        }
    }

    // =========================================================================
    // Services
    // =========================================================================

    /// List services, newest first. Served from cache when fresh.
    #[instrument(skip(self))]
    pub async fn list_services(&self) -> Result<Arc<Vec<ServiceRow>>, StoreError> {
        if let Some(CatalogEntry::Services(rows)) = self.inner.catalog_cache.get("services").await {
            return Ok(rows);
        }
        let rows = Arc::new(self.list::<ServiceRow>("services").await?);
        self.inner
            .catalog_cache
            .insert("services", CatalogEntry::Services(Arc::clone(&rows)))
            .await;
        Ok(rows)
    }

    /// Create a service and invalidate the catalog cache.
    #[instrument(skip(self, service), fields(name = %service.name))]
    pub async fn create_service(&self, service: &NewService) -> Result<ServiceRow, StoreError> {
        let row = self.insert("services", service).await?;
        self.inner.catalog_cache.invalidate("services").await;
        Ok(row)
    }

    /// Update a service and invalidate the catalog cache.
    #[instrument(skip(self, service))]
    pub async fn update_service(
        &self,
        id: ServiceId,
        service: &NewService,
    ) -> Result<ServiceRow, StoreError> {
        let row = self.update("services", id.as_i64(), service).await?;
        self.inner.catalog_cache.invalidate("services").await;
        Ok(row)
    }

    /// Delete a service and invalidate the catalog cache.
    #[instrument(skip(self))]
    pub async fn delete_service(&self, id: ServiceId) -> Result<(), StoreError> {
        self.delete("services", id.as_i64()).await?;
        self.inner.catalog_cache.invalidate("services").await;
        Ok(())
    }

    // =========================================================================
    // Projects
    // =========================================================================

    /// List projects, newest first. Served from cache when fresh.
    #[instrument(skip(self))]
    pub async fn list_projects(&self) -> Result<Arc<Vec<ProjectRow>>, StoreError> {
        if let Some(CatalogEntry::Projects(rows)) = self.inner.catalog_cache.get("projects").await {
            return Ok(rows);
        }
        let rows = Arc::new(self.list::<ProjectRow>("projects").await?);
        self.inner
            .catalog_cache
            .insert("projects", CatalogEntry::Projects(Arc::clone(&rows)))
            .await;
        Ok(rows)
    }

    /// Create a project and invalidate the catalog cache.
    #[instrument(skip(self, project), fields(name = %project.name))]
    pub async fn create_project(&self, project: &NewProject) -> Result<ProjectRow, StoreError> {
        let row = self.insert("projects", project).await?;
        self.inner.catalog_cache.invalidate("projects").await;
        Ok(row)
    }

    /// Update a project and invalidate the catalog cache.
    #[instrument(skip(self, project))]
    pub async fn update_project(
        &self,
        id: ProjectId,
        project: &NewProject,
    ) -> Result<ProjectRow, StoreError> {
        let row = self.update("projects", id.as_i64(), project).await?;
        self.inner.catalog_cache.invalidate("projects").await;
        Ok(row)
    }

    /// Delete a project and invalidate the catalog cache.
    #[instrument(skip(self))]
    pub async fn delete_project(&self, id: ProjectId) -> Result<(), StoreError> {
        self.delete("projects", id.as_i64()).await?;
        self.inner.catalog_cache.invalidate("projects").await;
        Ok(())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// List orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<OrderRow>, StoreError> {
        self.list("orders").await
    }

    /// Persist a new order.
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn create_order(&self, order: &NewOrder) -> Result<OrderRow, StoreError> {
        self.insert("orders", order).await
    }

    /// Overwrite an order's status. No transition-legality check.
    #[instrument(skip(self))]
    pub async fn update_order_status(
        &self,
        id: OrderRowId,
        status: OrderStatus,
    ) -> Result<OrderRow, StoreError> {
        let payload = serde_json::json!({
            "status": status,
            "updated_at": Utc::now(),
        });
        self.update("orders", id.as_i64(), &payload).await
    }

    /// Delete an order.
    #[instrument(skip(self))]
    pub async fn delete_order(&self, id: OrderRowId) -> Result<(), StoreError> {
        self.delete("orders", id.as_i64()).await
    }

    // =========================================================================
    // Contacts
    // =========================================================================

    /// List contact messages, newest first.
    #[instrument(skip(self))]
    pub async fn list_contacts(&self) -> Result<Vec<ContactRow>, StoreError> {
        self.list("contacts").await
    }

    /// Persist a new contact message.
    #[instrument(skip(self, contact), fields(email = %contact.email))]
    pub async fn create_contact(&self, contact: &NewContact) -> Result<ContactRow, StoreError> {
        self.insert("contacts", contact).await
    }

    /// Overwrite a contact's status. No transition-legality check.
    #[instrument(skip(self))]
    pub async fn update_contact_status(
        &self,
        id: ContactId,
        status: ContactStatus,
    ) -> Result<ContactRow, StoreError> {
        let payload = serde_json::json!({
            "status": status,
            "updated_at": Utc::now(),
        });
        self.update("contacts", id.as_i64(), &payload).await
    }

    /// Delete a contact message.
    #[instrument(skip(self))]
    pub async fn delete_contact(&self, id: ContactId) -> Result<(), StoreError> {
        self.delete("contacts", id.as_i64()).await
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    /// Probe each table once and report reachability.
    #[instrument(skip(self))]
    pub async fn health(&self) -> StoreHealth {
        StoreHealth {
            services: self.probe("services").await,
            projects: self.probe("projects").await,
            orders: self.probe("orders").await,
            contacts: self.probe("contacts").await,
        }
    }
}
