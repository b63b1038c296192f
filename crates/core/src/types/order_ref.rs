//! Public order references.
//!
//! Orders are identified to customers by a reference of the form
//! `ORD-<unix-millis>`. Collision risk at this scale is accepted; the
//! reference is not a cryptographic identifier and is never retried.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`OrderRef`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum OrderRefError {
    /// The input does not start with the `ORD-` prefix.
    #[error("order reference must start with {}", OrderRef::PREFIX)]
    MissingPrefix,
    /// The suffix after the prefix is not all digits.
    #[error("order reference suffix must be numeric")]
    NonNumericSuffix,
}

/// A customer-facing order reference (`ORD-<digits>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderRef(String);

impl OrderRef {
    /// Prefix shared by every order reference.
    pub const PREFIX: &'static str = "ORD-";

    /// Generate a reference from a timestamp.
    #[must_use]
    pub fn generate(now: DateTime<Utc>) -> Self {
        Self(format!("{}{}", Self::PREFIX, now.timestamp_millis()))
    }

    /// Parse an existing reference, validating the `ORD-<digits>` shape.
    ///
    /// # Errors
    ///
    /// Returns an error if the prefix is missing or the suffix contains
    /// non-digit characters.
    pub fn parse(s: &str) -> Result<Self, OrderRefError> {
        let suffix = s
            .strip_prefix(Self::PREFIX)
            .ok_or(OrderRefError::MissingPrefix)?;
        if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OrderRefError::NonNumericSuffix);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the reference as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_shape() {
        let order_ref = OrderRef::generate(Utc::now());
        assert!(order_ref.as_str().starts_with("ORD-"));
        assert!(OrderRef::parse(order_ref.as_str()).is_ok());
    }

    #[test]
    fn test_generate_uses_millis() {
        let now = DateTime::from_timestamp_millis(1_700_000_000_123).expect("valid");
        assert_eq!(OrderRef::generate(now).as_str(), "ORD-1700000000123");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            OrderRef::parse("1700000000123"),
            Err(OrderRefError::MissingPrefix)
        ));
        assert!(matches!(
            OrderRef::parse("ORD-"),
            Err(OrderRefError::NonNumericSuffix)
        ));
        assert!(matches!(
            OrderRef::parse("ORD-12ab"),
            Err(OrderRefError::NonNumericSuffix)
        ));
    }
}
