//! Status enums for orders and contact messages.
//!
//! Status values are plain overwrites: the admin dashboard may move any
//! status to any other status, so no transition table is enforced here.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Created as `Pending` at checkout; mutated only by admin status updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order, for rendering select inputs.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Confirmed,
        Self::Processing,
        Self::Shipped,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Lowercase wire/display form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "processing" => Ok(Self::Processing),
            "shipped" => Ok(Self::Shipped),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Contact message status.
///
/// Created as `New` by the public contact form; mutated only by admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    #[default]
    New,
    Read,
    Replied,
    Archived,
}

impl ContactStatus {
    /// All statuses for rendering select inputs.
    pub const ALL: [Self; 4] = [Self::New, Self::Read, Self::Replied, Self::Archived];

    /// Lowercase wire/display form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
            Self::Archived => "archived",
        }
    }
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ContactStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("invalid contact status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_order_status_roundtrip() {
        for status in OrderStatus::ALL {
            let parsed = OrderStatus::from_str(&status.to_string()).expect("roundtrip");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_order_status_serde_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Shipped).expect("serialize");
        assert_eq!(json, "\"shipped\"");
    }

    #[test]
    fn test_any_transition_is_representable() {
        // Status updates are unchecked overwrites; a delivered order can go
        // back to pending.
        let mut status = OrderStatus::Delivered;
        assert_eq!(status, OrderStatus::Delivered);
        status = OrderStatus::Pending;
        assert_eq!(status, OrderStatus::Pending);
    }

    #[test]
    fn test_contact_status_roundtrip() {
        for status in ContactStatus::ALL {
            let parsed = ContactStatus::from_str(&status.to_string()).expect("roundtrip");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_invalid_status_rejected() {
        assert!(OrderStatus::from_str("refunded").is_err());
        assert!(ContactStatus::from_str("spam").is_err());
    }
}
