//! # Formatting Utilities
//!
//! Number, currency and percentage formatting for market tables.
//!
//! ## Functions
//!
//! - [`format_number`] - Format numbers with comma separators
//! - [`format_currency`] - Format an amount as en-US currency
//! - [`format_usd`] - Shorthand for `format_currency(value, "USD")`
//! - [`format_percentage`] - Format a percentage change with one decimal

/// Format a number with commas (e.g., 1234567.89 -> "1,234,567.89")
///
/// # Arguments
///
/// * `value` - The number to format
/// * `decimals` - Number of decimal places to show
///
/// # Examples
///
/// ```rust
/// use lib_utils::format::format_number;
///
/// assert_eq!(format_number(1234567.89, 2), "1,234,567.89");
/// assert_eq!(format_number(-123.0, 2), "-123.00");
/// ```
pub fn format_number(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.prec$}", value.abs(), prec = decimals);
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((int, dec)) => (int, dec),
        None => (formatted.as_str(), ""),
    };

    // Add commas to integer part
    let mut result = String::new();
    for (i, ch) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }

    let integer_with_commas: String = result.chars().rev().collect();
    let sign = if is_negative(value, decimals) { "-" } else { "" };

    if decimal_part.is_empty() {
        format!("{}{}", sign, integer_with_commas)
    } else {
        format!("{}{}.{}", sign, integer_with_commas, decimal_part)
    }
}

/// Format an amount as currency in the en-US style with two fraction digits.
///
/// The sign goes in front of the symbol (`-$5.00`). Codes without a known
/// symbol are written as a prefix (`CHF 5.00`).
///
/// ```rust
/// use lib_utils::format::format_currency;
///
/// assert_eq!(format_currency(1234.5, "USD"), "$1,234.50");
/// assert_eq!(format_currency(-0.5, "EUR"), "-€0.50");
/// ```
pub fn format_currency(value: f64, currency: &str) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let symbol = match currency.to_ascii_uppercase().as_str() {
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        other => format!("{} ", other),
    };

    let sign = if is_negative(value, 2) { "-" } else { "" };
    format!("{}{}{}", sign, symbol, format_number(value.abs(), 2))
}

/// Format a USD amount (e.g., 1234.5 -> "$1,234.50")
pub fn format_usd(value: f64) -> String {
    format_currency(value, "USD")
}

/// Format a percentage change with one decimal place.
///
/// Missing or non-finite values render as `0.0%`. No `+` is added; callers
/// that want a sign on gains prepend it themselves.
///
/// ```rust
/// use lib_utils::format::format_percentage;
///
/// assert_eq!(format_percentage(Some(2.345)), "2.3%");
/// assert_eq!(format_percentage(None), "0.0%");
/// ```
pub fn format_percentage(change: Option<f64>) -> String {
    match change {
        Some(value) if value.is_finite() => format!("{:.1}%", value),
        _ => "0.0%".to_string(),
    }
}

/// True when `value` still reads as negative after rounding to `decimals`.
fn is_negative(value: f64, decimals: usize) -> bool {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() < 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1234567.89, 2), "1,234,567.89");
        assert_eq!(format_number(100.0, 2), "100.00");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(-1234.5, 1), "-1,234.5");
    }

    #[test]
    fn test_format_currency_usd() {
        assert_eq!(format_usd(1234.5), "$1,234.50");
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_usd(-42.129), "-$42.13");
    }

    #[test]
    fn test_format_currency_rounding_to_zero_drops_sign() {
        assert_eq!(format_usd(-0.001), "$0.00");
    }

    #[test]
    fn test_format_currency_other_codes() {
        assert_eq!(format_currency(10.0, "gbp"), "£10.00");
        assert_eq!(format_currency(10.0, "CHF"), "CHF 10.00");
        assert_eq!(format_currency(f64::NAN, "USD"), "-");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(Some(-4.06)), "-4.1%");
        assert_eq!(format_percentage(Some(12.0)), "12.0%");
        assert_eq!(format_percentage(Some(f64::NAN)), "0.0%");
    }
}
