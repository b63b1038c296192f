//! Wire types for the `/api/send-email` endpoint.
//!
//! The site posts a `{type, data}` envelope; the two variants carry the
//! contact submission or the order snapshot the notification describes.

use rust_decimal::Decimal;
use serde::Deserialize;

/// The `{type, data}` notification envelope.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NotificationRequest {
    Contact(ContactPayload),
    Order(OrderPayload),
}

/// Contact form notification payload.
#[derive(Debug, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

/// Order notification payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub order_id: String,
    pub customer: CustomerPayload,
    pub address: AddressPayload,
    pub items: Vec<ItemPayload>,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct CustomerPayload {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Deserialize)]
pub struct AddressPayload {
    pub street: String,
    pub city: String,
    pub postal: String,
    pub country: String,
}

/// One line of the order's item snapshot.
#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_envelope_parses() {
        let json = serde_json::json!({
            "type": "contact",
            "data": {
                "name": "Jane",
                "email": "jane@example.com",
                "message": "Hello"
            }
        });
        let request: NotificationRequest = serde_json::from_value(json).expect("parse");
        match request {
            NotificationRequest::Contact(contact) => {
                assert_eq!(contact.name, "Jane");
                assert!(contact.phone.is_none());
            }
            NotificationRequest::Order(_) => panic!("expected contact variant"),
        }
    }

    #[test]
    fn test_order_envelope_parses() {
        let json = serde_json::json!({
            "type": "order",
            "data": {
                "orderId": "ORD-1700000000123",
                "customer": {"name": "Jane", "email": "jane@example.com", "phone": "+1 555 0100"},
                "address": {"street": "1 Main St", "city": "Minneapolis", "postal": "55401", "country": "USA"},
                "items": [{"id": 1, "title": "Web Development", "price": "500", "quantity": 2}],
                "subtotal": "1000",
                "tax": "80.00",
                "total": "1080.00"
            }
        });
        let request: NotificationRequest = serde_json::from_value(json).expect("parse");
        match request {
            NotificationRequest::Order(order) => {
                assert_eq!(order.order_id, "ORD-1700000000123");
                assert_eq!(order.items.len(), 1);
                assert_eq!(order.items[0].quantity, 2);
            }
            NotificationRequest::Contact(_) => panic!("expected order variant"),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let json = serde_json::json!({"type": "refund", "data": {}});
        assert!(serde_json::from_value::<NotificationRequest>(json).is_err());
    }
}
