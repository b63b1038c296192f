//! Catalog adapter: stored rows to UI-ready view models.
//!
//! The remote store keeps display-oriented data (price strings, comma
//! separated technology lists). This module converts it once, at the data
//! boundary, into typed views the templates and cart work with.

use mowlid_core::{PriceRange, ProjectId, ServiceId};
use rust_decimal::Decimal;

use crate::store::{ProjectRow, ServiceRow};

/// Image shown for projects without a stored image.
const DEFAULT_PROJECT_IMAGE: &str = "/static/images/default-project.jpg";

/// A service ready for display and carting.
#[derive(Debug, Clone)]
pub struct ServiceView {
    pub id: ServiceId,
    pub title: String,
    pub description: String,
    /// Structured price parsed from the stored display string.
    pub price: PriceRange,
    /// The single amount used for cart arithmetic (lower bound of the range).
    pub unit_price: Decimal,
    /// The store has no category column; everything is a "Service".
    pub category: String,
}

impl From<&ServiceRow> for ServiceView {
    fn from(row: &ServiceRow) -> Self {
        let price = PriceRange::parse(&row.price);
        Self {
            id: row.id,
            title: row.name.clone(),
            description: row.description.clone(),
            price,
            unit_price: price.representative(),
            category: "Service".to_string(),
        }
    }
}

/// A portfolio project ready for display.
#[derive(Debug, Clone)]
pub struct ProjectView {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub image: String,
    pub tech: Vec<String>,
    /// Clickable link, present only for live projects. A not-live project's
    /// stored link is inert regardless of its value.
    pub url: Option<String>,
    pub repo_url: Option<String>,
}

impl From<&ProjectRow> for ProjectView {
    fn from(row: &ProjectRow) -> Self {
        let url = if row.is_live {
            row.link.clone().filter(|link| !link.is_empty())
        } else {
            None
        };
        Self {
            id: row.id,
            name: row.name.clone(),
            description: row.description.clone(),
            image: row
                .image
                .clone()
                .filter(|image| !image.is_empty())
                .unwrap_or_else(|| DEFAULT_PROJECT_IMAGE.to_string()),
            tech: row
                .technology
                .split(',')
                .map(str::trim)
                .filter(|tech| !tech.is_empty())
                .map(String::from)
                .collect(),
            url,
            repo_url: row.official_link.clone().filter(|link| !link.is_empty()),
        }
    }
}
