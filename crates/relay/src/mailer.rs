//! Owner notification delivery.
//!
//! Uses SMTP via lettre with Askama HTML templates. Every notification is a
//! multipart message (plain text plus HTML) addressed to the site owner.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::SmtpConfig;
use crate::payload::{ContactPayload, OrderPayload};

/// HTML template for contact notifications.
#[derive(Template)]
#[template(path = "email/contact.html")]
struct ContactEmailHtml<'a> {
    name: &'a str,
    email: &'a str,
    phone: Option<&'a str>,
    message: &'a str,
}

/// Plain text template for contact notifications.
#[derive(Template)]
#[template(path = "email/contact.txt")]
struct ContactEmailText<'a> {
    name: &'a str,
    email: &'a str,
    phone: Option<&'a str>,
    message: &'a str,
}

/// One rendered order line. Money is preformatted so the templates stay
/// plain string substitution.
struct LineView {
    title: String,
    quantity: u32,
    price: String,
}

/// HTML template for order notifications.
#[derive(Template)]
#[template(path = "email/order.html")]
struct OrderEmailHtml<'a> {
    order_id: &'a str,
    customer_name: &'a str,
    customer_email: &'a str,
    customer_phone: &'a str,
    address: String,
    items: Vec<LineView>,
    subtotal: String,
    tax: String,
    total: String,
}

/// Plain text template for order notifications.
#[derive(Template)]
#[template(path = "email/order.txt")]
struct OrderEmailText<'a> {
    order_id: &'a str,
    customer_name: &'a str,
    customer_email: &'a str,
    customer_phone: &'a str,
    address: String,
    items: Vec<LineView>,
    subtotal: String,
    tax: String,
    total: String,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Render an amount as `$<two decimals>`.
fn money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

/// Join the optional address fields into one display line.
fn format_address(payload: &OrderPayload) -> String {
    let parts: Vec<&str> = [
        payload.address.street.as_str(),
        payload.address.city.as_str(),
        payload.address.postal.as_str(),
        payload.address.country.as_str(),
    ]
    .into_iter()
    .filter(|part| !part.trim().is_empty())
    .collect();

    if parts.is_empty() {
        "Not provided".to_string()
    } else {
        parts.join(", ")
    }
}

fn line_views(payload: &OrderPayload) -> Vec<LineView> {
    payload
        .items
        .iter()
        .map(|item| LineView {
            title: item.title.clone(),
            quantity: item.quantity,
            price: money(item.price),
        })
        .collect()
}

/// Email service for delivering owner notifications.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    owner_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &SmtpConfig, owner_address: &str) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.username.clone(),
            config.password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?
            .port(config.port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            owner_address: owner_address.to_string(),
        })
    }

    /// Notify the owner of a new contact message.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or template fails to render.
    pub async fn send_contact_notification(
        &self,
        payload: &ContactPayload,
    ) -> Result<(), EmailError> {
        let html = ContactEmailHtml {
            name: &payload.name,
            email: &payload.email,
            phone: payload.phone.as_deref(),
            message: &payload.message,
        }
        .render()?;
        let text = ContactEmailText {
            name: &payload.name,
            email: &payload.email,
            phone: payload.phone.as_deref(),
            message: &payload.message,
        }
        .render()?;

        let subject = format!("New contact message from {}", payload.name);
        self.send_multipart_email(&subject, &text, &html).await
    }

    /// Notify the owner of a new order.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or template fails to render.
    pub async fn send_order_notification(&self, payload: &OrderPayload) -> Result<(), EmailError> {
        let address = format_address(payload);

        let html = OrderEmailHtml {
            order_id: &payload.order_id,
            customer_name: &payload.customer.name,
            customer_email: &payload.customer.email,
            customer_phone: &payload.customer.phone,
            address: address.clone(),
            items: line_views(payload),
            subtotal: money(payload.subtotal),
            tax: money(payload.tax),
            total: money(payload.total),
        }
        .render()?;
        let text = OrderEmailText {
            order_id: &payload.order_id,
            customer_name: &payload.customer.name,
            customer_email: &payload.customer.email,
            customer_phone: &payload.customer.phone,
            address,
            items: line_views(payload),
            subtotal: money(payload.subtotal),
            tax: money(payload.tax),
            total: money(payload.total),
        }
        .render()?;

        let subject = format!("New order {}", payload.order_id);
        self.send_multipart_email(&subject, &text, &html).await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(self
                .owner_address
                .parse()
                .map_err(|_| EmailError::InvalidAddress(self.owner_address.clone()))?)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text_body.to_string()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html_body.to_string()),
                    ),
            )?;

        self.mailer.send(email).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;
    use crate::payload::{AddressPayload, CustomerPayload, ItemPayload};

    fn order_payload(street: &str) -> OrderPayload {
        OrderPayload {
            order_id: "ORD-1700000000123".to_string(),
            customer: CustomerPayload {
                name: "Jane".to_string(),
                email: "jane@example.com".to_string(),
                phone: "+1 555 0100".to_string(),
            },
            address: AddressPayload {
                street: street.to_string(),
                city: String::new(),
                postal: String::new(),
                country: "USA".to_string(),
            },
            items: vec![ItemPayload {
                id: 1,
                title: "Web Development".to_string(),
                description: String::new(),
                price: dec!(500),
                quantity: 2,
                category: "Service".to_string(),
            }],
            subtotal: dec!(1000),
            tax: dec!(80.00),
            total: dec!(1080.00),
        }
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(dec!(1080)), "$1080.00");
        assert_eq!(money(dec!(0.5)), "$0.50");
    }

    #[test]
    fn test_address_skips_blank_fields() {
        let formatted = format_address(&order_payload("1 Main St"));
        assert_eq!(formatted, "1 Main St, USA");
    }

    #[test]
    fn test_address_all_blank() {
        let mut payload = order_payload("");
        payload.address.country = String::new();
        assert_eq!(format_address(&payload), "Not provided");
    }

    #[test]
    fn test_order_templates_render() {
        let payload = order_payload("1 Main St");
        let html = OrderEmailHtml {
            order_id: &payload.order_id,
            customer_name: &payload.customer.name,
            customer_email: &payload.customer.email,
            customer_phone: &payload.customer.phone,
            address: format_address(&payload),
            items: line_views(&payload),
            subtotal: money(payload.subtotal),
            tax: money(payload.tax),
            total: money(payload.total),
        }
        .render()
        .expect("render html");
        assert!(html.contains("ORD-1700000000123"));
        assert!(html.contains("$1080.00"));
    }

    #[test]
    fn test_contact_templates_render() {
        let text = ContactEmailText {
            name: "Jane",
            email: "jane@example.com",
            phone: None,
            message: "Hello there",
        }
        .render()
        .expect("render text");
        assert!(text.contains("Jane"));
        assert!(text.contains("Hello there"));
    }
}
