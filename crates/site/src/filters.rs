//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use rust_decimal::Decimal;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Format a decimal amount as money with two decimals, e.g. `$1188.00`.
///
/// Rounding happens here, at the presentation boundary, and nowhere else.
///
/// Usage in templates: `{{ cart.total()|money }}`
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let amount = value.to_string().parse::<Decimal>().unwrap_or_default();
    Ok(format_money(amount))
}

/// Render an amount as `$<two decimals>`.
fn format_money(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    #[test]
    fn test_money_two_decimals() {
        assert_eq!(format_money(dec!(1188)), "$1188.00");
        assert_eq!(format_money(dec!(88)), "$88.00");
    }

    #[test]
    fn test_money_rounds_at_presentation() {
        assert_eq!(format_money(dec!(88.006)), "$88.01");
        assert_eq!(format_money(dec!(0.004)), "$0.00");
    }
}
