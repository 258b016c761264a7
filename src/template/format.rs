//! Money formatting and payload field checks shared by the templates

use crate::notification::{NotificationError, NotificationResult};

/// Render `value` with exactly two fraction digits behind `symbol`.
///
/// Rounding follows Rust's float formatting: nearest, ties to even on the
/// exact binary value.
pub fn format_currency(symbol: &str, value: f64) -> String {
    // -0.0 would otherwise print as "-0.00"
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{}{:.2}", symbol, value)
}

pub(crate) fn require_text(field: &str, value: &str) -> NotificationResult<()> {
    if value.trim().is_empty() {
        return Err(NotificationError::InvalidArgument(format!(
            "{} is required",
            field
        )));
    }
    Ok(())
}

pub(crate) fn require_amount(field: &str, value: f64) -> NotificationResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(NotificationError::InvalidArgument(format!(
            "{} must be a finite, non-negative amount (got {})",
            field, value
        )));
    }
    Ok(())
}

pub(crate) fn require_optional_amount(field: &str, value: Option<f64>) -> NotificationResult<()> {
    match value {
        Some(amount) => require_amount(field, amount),
        None => Ok(()),
    }
}

/// Optional rows are only shown for present, non-zero amounts
pub(crate) fn shown_amount(value: Option<f64>) -> Option<f64> {
    value.filter(|amount| *amount != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency_two_digits() {
        assert_eq!(format_currency("₹", 2000.0), "₹2000.00");
        assert_eq!(format_currency("₹", 49.9), "₹49.90");
        assert_eq!(format_currency("$", 0.0), "$0.00");
        assert_eq!(format_currency("₹", -0.0), "₹0.00");
    }

    #[test]
    fn test_format_currency_rounding() {
        assert_eq!(format_currency("₹", 10.456), "₹10.46");
        assert_eq!(format_currency("₹", 10.454), "₹10.45");
        assert_eq!(format_currency("₹", 999.999), "₹1000.00");
    }

    #[test]
    fn test_require_text() {
        assert!(require_text("name", "Asha").is_ok());
        assert!(matches!(
            require_text("name", "  "),
            Err(NotificationError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_require_amount() {
        assert!(require_amount("subtotal", 0.0).is_ok());
        assert!(require_amount("subtotal", 12.5).is_ok());
        assert!(require_amount("subtotal", -1.0).is_err());
        assert!(require_amount("subtotal", f64::NAN).is_err());
        assert!(require_amount("subtotal", f64::INFINITY).is_err());
        assert!(require_optional_amount("tax", None).is_ok());
        assert!(require_optional_amount("tax", Some(-0.5)).is_err());
    }

    #[test]
    fn test_shown_amount() {
        assert_eq!(shown_amount(None), None);
        assert_eq!(shown_amount(Some(0.0)), None);
        assert_eq!(shown_amount(Some(40.0)), Some(40.0));
    }
}
