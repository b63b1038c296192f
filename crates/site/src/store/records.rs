//! Row and payload types for the remote data store.
//!
//! Rows are what the store returns; `New*` payloads are what we send on
//! insert. Update payloads reuse the `New*` shapes since the store treats
//! them as partial column sets.

use chrono::{DateTime, Utc};
use mowlid_core::{ContactId, ContactStatus, OrderRef, OrderRowId, OrderStatus, ProjectId, ServiceId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A service offering as stored in the `services` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRow {
    pub id: ServiceId,
    pub name: String,
    /// Display price string, e.g. `"$500-$2000"`. Parsed at the catalog
    /// boundary, never here.
    pub price: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert/update payload for the `services` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewService {
    pub name: String,
    pub price: String,
    pub description: String,
}

/// A portfolio project as stored in the `projects` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectRow {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub is_live: bool,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Comma-separated technology list.
    pub technology: String,
    #[serde(default)]
    pub official_link: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert/update payload for the `projects` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub name: String,
    pub description: String,
    pub is_live: bool,
    pub link: Option<String>,
    pub image: Option<String>,
    pub technology: String,
    pub official_link: Option<String>,
}

/// One line of an order's item snapshot.
///
/// A copy of the cart line at checkout time; later catalog edits never
/// rewrite it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ServiceId,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
    pub category: String,
}

/// An order as stored in the `orders` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRow {
    pub id: OrderRowId,
    pub order_id: OrderRef,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    #[serde(default)]
    pub address_street: Option<String>,
    #[serde(default)]
    pub address_city: Option<String>,
    #[serde(default)]
    pub address_postal: Option<String>,
    #[serde(default)]
    pub address_country: Option<String>,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert payload for the `orders` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewOrder {
    pub order_id: OrderRef,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub address_street: String,
    pub address_city: String,
    pub address_postal: String,
    pub address_country: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub status: OrderStatus,
}

/// A contact message as stored in the `contacts` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactRow {
    pub id: ContactId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert payload for the `contacts` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: ContactStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_row_deserializes_store_shape() {
        let json = serde_json::json!({
            "id": 12,
            "order_id": "ORD-1700000000123",
            "customer_name": "Jane Doe",
            "customer_email": "jane@example.com",
            "customer_phone": "+1 555 0100",
            "items": [{
                "id": 3,
                "title": "Web Development",
                "description": "Full site build",
                "price": "500",
                "quantity": 2,
                "category": "Service"
            }],
            "subtotal": "1000",
            "tax": "80",
            "total": "1080",
            "status": "pending",
            "created_at": "2024-01-15T10:00:00Z"
        });

        let row: OrderRow = serde_json::from_value(json).expect("deserialize");
        assert_eq!(row.order_id.as_str(), "ORD-1700000000123");
        assert_eq!(row.status, mowlid_core::OrderStatus::Pending);
        assert_eq!(row.items.len(), 1);
        assert!(row.address_street.is_none());
        assert!(row.updated_at.is_none());
    }

    #[test]
    fn test_project_row_optional_fields_default() {
        let json = serde_json::json!({
            "id": 1,
            "name": "Food Tracker",
            "description": "Meal logging app",
            "is_live": false,
            "technology": "React, TypeScript",
            "created_at": "2024-01-15T10:00:00Z"
        });

        let row: ProjectRow = serde_json::from_value(json).expect("deserialize");
        assert!(row.link.is_none());
        assert!(row.image.is_none());
        assert!(row.official_link.is_none());
    }
}
