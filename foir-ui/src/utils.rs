use foir_core::calculations::common::round_to;
use rust_decimal::Decimal;
use thiserror::Error;

/// Currency prefixes accepted (and ignored) in front of an amount.
const CURRENCY_PREFIXES: [&str; 3] = ["₹", "$", "Rs."];

/// Error returned when a string cannot be used as a money amount.
#[derive(Debug, Error)]
pub enum ParseAmountError {
    #[error("invalid amount '{input}': {source}")]
    Invalid {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("amount '{input}' must not be negative")]
    Negative { input: String },
}

/// Normalizes input for decimal parsing: trims whitespace, drops a leading
/// currency symbol and removes commas (thousands separator).
fn normalize_amount_input(s: &str) -> String {
    let trimmed = s.trim();
    let unprefixed = CURRENCY_PREFIXES
        .iter()
        .find_map(|p| trimmed.strip_prefix(p))
        .unwrap_or(trimmed);
    unprefixed.trim().replace(',', "")
}

/// Parses a non-negative money amount.
///
/// Handles comma as thousands separator (e.g. `"1,234.56"`) and a leading
/// `₹`, `$` or `Rs.`. Empty or whitespace-only input is treated as 0.
pub fn parse_amount(s: &str) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    let value: Decimal = normalized.parse().map_err(|e| ParseAmountError::Invalid {
        input: s.to_string(),
        source: e,
    })?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ParseAmountError::Negative {
            input: s.to_string(),
        });
    }
    Ok(value)
}

/// Parses like [`parse_amount`] but falls back to zero, logging a warning.
pub fn coerce_amount(s: &str) -> Decimal {
    parse_amount(s).unwrap_or_else(|e| {
        tracing::warn!(input = %s, "treating amount as zero: {}", e);
        Decimal::ZERO
    })
}

/// Formats an amount with `,` between every three integer digits.
///
/// Every significant fractional digit is kept and trailing zeros are
/// dropped, so the output always parses back to the same value.
pub fn format_amount(value: Decimal) -> String {
    let normalized = value.normalize();
    let negative = normalized.is_sign_negative() && !normalized.is_zero();
    let digits = normalized.abs().to_string();
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = String::with_capacity(digits.len() + int_part.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Formats an amount prefixed with the currency symbol, e.g. `₹16,000`.
pub fn format_money(
    symbol: &str,
    value: Decimal,
) -> String {
    format!("{symbol}{}", format_amount(value))
}

/// Formats a percentage with a fixed number of decimal places (no `%` sign).
pub fn format_percent(
    value: Decimal,
    places: u32,
) -> String {
    round_to(value, places).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("1,234,567.89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_amount_trims_whitespace_and_currency() {
        assert_eq!(parse_amount("  123.45  ").unwrap(), dec!(123.45));
        assert_eq!(parse_amount("₹50,000").unwrap(), dec!(50000));
        assert_eq!(parse_amount("$ 10").unwrap(), dec!(10));
        assert_eq!(parse_amount("Rs.2,500").unwrap(), dec!(2500));
    }

    #[test]
    fn parse_amount_empty_treated_as_zero() {
        assert_eq!(parse_amount("").unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("   ").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_keeps_decimals() {
        assert_eq!(parse_amount("10,000.75").unwrap(), dec!(10000.75));
    }

    #[test]
    fn parse_amount_invalid_returns_error() {
        assert!(matches!(parse_amount("abc"), Err(ParseAmountError::Invalid { .. })));
        assert!(matches!(parse_amount("12.3.4"), Err(ParseAmountError::Invalid { .. })));
    }

    #[test]
    fn parse_amount_rejects_negative() {
        assert!(matches!(parse_amount("-5"), Err(ParseAmountError::Negative { .. })));
    }

    #[test]
    fn coerce_amount_falls_back_to_zero() {
        assert_eq!(coerce_amount("nope"), Decimal::ZERO);
        assert_eq!(coerce_amount("-100"), Decimal::ZERO);
        assert_eq!(coerce_amount("2,000"), dec!(2000));
    }

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(dec!(0)), "0");
        assert_eq!(format_amount(dec!(999)), "999");
        assert_eq!(format_amount(dec!(1000)), "1,000");
        assert_eq!(format_amount(dec!(16000)), "16,000");
        assert_eq!(format_amount(dec!(1234567)), "1,234,567");
    }

    #[test]
    fn format_amount_keeps_significant_fraction() {
        assert_eq!(format_amount(dec!(1234.50)), "1,234.5");
        assert_eq!(format_amount(dec!(1000.00)), "1,000");
        assert_eq!(format_amount(dec!(0.05)), "0.05");
    }

    #[test]
    fn format_amount_negative() {
        assert_eq!(format_amount(dec!(-1234.5)), "-1,234.5");
    }

    #[test]
    fn formatted_amounts_parse_back_unchanged() {
        for value in [dec!(0), dec!(7), dec!(1000), dec!(12345.678), dec!(987654321.01), dec!(0.5)] {
            assert_eq!(parse_amount(&format_amount(value)).unwrap(), value);
        }
    }

    #[test]
    fn format_money_prefixes_symbol() {
        assert_eq!(format_money("₹", dec!(50000)), "₹50,000");
    }

    #[test]
    fn format_percent_pads_places() {
        assert_eq!(format_percent(dec!(32), 1), "32.0");
        assert_eq!(format_percent(dec!(32), 2), "32.00");
        assert_eq!(format_percent(dec!(60.005), 2), "60.01");
    }
}
