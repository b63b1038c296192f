//! Best-effort notifications to the email relay.
//!
//! The relay is a separate local process that turns these payloads into
//! SMTP mail to the site owner. Notification is fire-and-forget: the order
//! or contact is already durably stored before a notification is attempted,
//! and a failure here is logged at ERROR (operator-visible) but never rolls
//! anything back or blocks the user flow.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use crate::store::{NewOrder, OrderItem};

/// Errors from the relay. Callers only ever log these.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// Relay unreachable or transport failure.
    #[error("relay request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Relay answered but reported failure.
    #[error("relay rejected notification: {0}")]
    Rejected(String),
}

/// The `{type, data}` envelope the relay accepts.
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
enum NotificationRequest<'a> {
    Contact(ContactPayload<'a>),
    Order(OrderPayload<'a>),
}

/// Contact form notification payload.
#[derive(Debug, Serialize)]
struct ContactPayload<'a> {
    name: &'a str,
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone: Option<&'a str>,
    message: &'a str,
}

/// Order notification payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct OrderPayload<'a> {
    order_id: &'a str,
    customer: CustomerPayload<'a>,
    address: AddressPayload<'a>,
    items: &'a [OrderItem],
    subtotal: Decimal,
    tax: Decimal,
    total: Decimal,
}

#[derive(Debug, Serialize)]
struct CustomerPayload<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
}

#[derive(Debug, Serialize)]
struct AddressPayload<'a> {
    street: &'a str,
    city: &'a str,
    postal: &'a str,
    country: &'a str,
}

/// Relay success/failure response body.
#[derive(Debug, serde::Deserialize)]
struct RelayResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Client for the email relay process.
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    send_url: String,
    health_url: String,
}

impl Notifier {
    /// Create a notifier for the relay at `relay_url`.
    #[must_use]
    pub fn new(relay_url: &str) -> Self {
        let base = relay_url.trim_end_matches('/');
        Self {
            client: reqwest::Client::new(),
            send_url: format!("{base}/api/send-email"),
            health_url: format!("{base}/api/health"),
        }
    }

    /// Notify the owner of a new contact message.
    ///
    /// # Errors
    ///
    /// Returns an error when the relay is unreachable or reports failure.
    #[instrument(skip(self, message))]
    pub async fn contact_received(
        &self,
        name: &str,
        email: &str,
        phone: Option<&str>,
        message: &str,
    ) -> Result<(), NotifyError> {
        self.send(&NotificationRequest::Contact(ContactPayload {
            name,
            email,
            phone,
            message,
        }))
        .await
    }

    /// Notify the owner of a new order.
    ///
    /// # Errors
    ///
    /// Returns an error when the relay is unreachable or reports failure.
    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub async fn order_received(&self, order: &NewOrder) -> Result<(), NotifyError> {
        self.send(&NotificationRequest::Order(OrderPayload {
            order_id: order.order_id.as_str(),
            customer: CustomerPayload {
                name: &order.customer_name,
                email: &order.customer_email,
                phone: &order.customer_phone,
            },
            address: AddressPayload {
                street: &order.address_street,
                city: &order.address_city,
                postal: &order.address_postal,
                country: &order.address_country,
            },
            items: &order.items,
            subtotal: order.subtotal,
            tax: order.tax,
            total: order.total,
        }))
        .await
    }

    /// Check whether the relay process is up.
    pub async fn health(&self) -> bool {
        match self.client.get(&self.health_url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::warn!(error = %e, "relay health check failed");
                false
            }
        }
    }

    async fn send(&self, request: &NotificationRequest<'_>) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.send_url)
            .json(request)
            .send()
            .await?;

        let body: RelayResponse = response.json().await?;
        if body.success {
            Ok(())
        } else {
            Err(NotifyError::Rejected(
                body.message.unwrap_or_else(|| "unknown error".to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use mowlid_core::{OrderRef, OrderStatus, ServiceId};
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_contact_envelope_shape() {
        let request = NotificationRequest::Contact(ContactPayload {
            name: "Jane",
            email: "jane@example.com",
            phone: None,
            message: "Hello",
        });
        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["type"], "contact");
        assert_eq!(json["data"]["name"], "Jane");
        assert!(json["data"].get("phone").is_none());
    }

    #[test]
    fn test_order_envelope_shape() {
        let order = NewOrder {
            order_id: OrderRef::parse("ORD-1700000000123").expect("valid"),
            customer_name: "Jane".to_string(),
            customer_email: "jane@example.com".to_string(),
            customer_phone: "+1 555 0100".to_string(),
            address_street: "1 Main St".to_string(),
            address_city: "Minneapolis".to_string(),
            address_postal: "55401".to_string(),
            address_country: "USA".to_string(),
            items: vec![OrderItem {
                id: ServiceId::new(1),
                title: "Web Development".to_string(),
                description: "Full site build".to_string(),
                price: dec!(500),
                quantity: 1,
                category: "Service".to_string(),
            }],
            subtotal: dec!(500),
            tax: dec!(40.00),
            total: dec!(540.00),
            status: OrderStatus::Pending,
        };

        let request = NotificationRequest::Order(OrderPayload {
            order_id: order.order_id.as_str(),
            customer: CustomerPayload {
                name: &order.customer_name,
                email: &order.customer_email,
                phone: &order.customer_phone,
            },
            address: AddressPayload {
                street: &order.address_street,
                city: &order.address_city,
                postal: &order.address_postal,
                country: &order.address_country,
            },
            items: &order.items,
            subtotal: order.subtotal,
            tax: order.tax,
            total: order.total,
        });

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["type"], "order");
        assert_eq!(json["data"]["orderId"], "ORD-1700000000123");
        assert_eq!(json["data"]["customer"]["name"], "Jane");
        assert_eq!(json["data"]["address"]["postal"], "55401");
        assert_eq!(json["data"]["items"][0]["quantity"], 1);
    }
}
