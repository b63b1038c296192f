//! Structured price ranges for catalog services.
//!
//! The remote data store keeps service prices as display strings such as
//! `"$500-$2000"` or `"$150"`. Parsing happens once at the data-model
//! boundary; everything downstream works with `Decimal` amounts and string
//! formatting stays a presentation concern.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price range in USD.
///
/// `min` is the representative amount quoted when a single number is needed
/// (cart line items, order totals). `max` is present only for ranged quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound of the quoted range.
    pub min: Decimal,
    /// Upper bound, when the quote is a range rather than a fixed price.
    pub max: Option<Decimal>,
}

impl PriceRange {
    /// A zero price, used when a stored price string cannot be parsed.
    pub const ZERO: Self = Self {
        min: Decimal::ZERO,
        max: None,
    };

    /// Create a fixed (non-ranged) price.
    #[must_use]
    pub const fn fixed(amount: Decimal) -> Self {
        Self {
            min: amount,
            max: None,
        }
    }

    /// Parse a display string like `"$500-$2000"` or `"$150"`.
    ///
    /// Takes the first embedded number as the lower bound and, if present,
    /// a second number as the upper bound. Unparseable input yields
    /// [`PriceRange::ZERO`] rather than an error: a service with a garbled
    /// price still renders, it just cannot be meaningfully added to a cart.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        let mut numbers = extract_amounts(s);
        let Some(min) = numbers.next() else {
            return Self::ZERO;
        };
        Self {
            min,
            max: numbers.next(),
        }
    }

    /// The single amount quoted for this price (the lower bound).
    #[must_use]
    pub const fn representative(&self) -> Decimal {
        self.min
    }
}

impl fmt::Display for PriceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "${}-${max}", self.min),
            None => write!(f, "${}", self.min),
        }
    }
}

/// Iterate over the decimal amounts embedded in a price string.
fn extract_amounts(s: &str) -> impl Iterator<Item = Decimal> + '_ {
    s.split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .filter(|chunk| !chunk.is_empty())
        .filter_map(|chunk| chunk.parse::<Decimal>().ok())
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_parse_range() {
        let price = PriceRange::parse("$500-$2000");
        assert_eq!(price.min, dec!(500));
        assert_eq!(price.max, Some(dec!(2000)));
        assert_eq!(price.representative(), dec!(500));
    }

    #[test]
    fn test_parse_fixed() {
        let price = PriceRange::parse("$150");
        assert_eq!(price.min, dec!(150));
        assert_eq!(price.max, None);
    }

    #[test]
    fn test_parse_with_decimals() {
        let price = PriceRange::parse("$99.99");
        assert_eq!(price.representative(), dec!(99.99));
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert_eq!(PriceRange::parse("contact us"), PriceRange::ZERO);
        assert_eq!(PriceRange::parse(""), PriceRange::ZERO);
    }

    #[test]
    fn test_display_roundtrip() {
        assert_eq!(PriceRange::parse("$500-$2000").to_string(), "$500-$2000");
        assert_eq!(PriceRange::parse("$150").to_string(), "$150");
    }
}
