//! Custom Askama template filters.

use std::fmt::Display;
use std::str::FromStr;

use rust_decimal::Decimal;

/// Formats a decimal amount as a display price, e.g. `$19.99`.
///
/// Usage in templates: `{{ product.price|money }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn money(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(format_money(&value.to_string()))
}

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Render a decimal string with a dollar sign and two decimal places.
/// Longer fractions are rounded, not truncated. Non-numeric input
/// passes through unchanged behind the sign.
fn format_money(raw: &str) -> String {
    Decimal::from_str(raw).map_or_else(
        |_| format!("${raw}"),
        |amount| format!("${:.2}", amount.round_dp(2)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_pads_to_two_decimals() {
        assert_eq!(format_money("9.9"), "$9.90");
    }

    #[test]
    fn test_money_whole_number() {
        assert_eq!(format_money("120"), "$120.00");
    }

    #[test]
    fn test_money_rounds_long_fractions() {
        assert_eq!(format_money("3.999"), "$4.00");
        assert_eq!(format_money("3.991"), "$3.99");
    }

    #[test]
    fn test_money_passes_through_non_numbers() {
        assert_eq!(format_money("n/a"), "$n/a");
    }
}
