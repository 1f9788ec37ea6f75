//! Decimal price parsing.
//!
//! The upstream store sends prices as decimal strings (`"149.99"`), and uses
//! an empty string when no sale price is set. Values are parsed with
//! `rust_decimal` so no precision is lost; anything that does not parse is
//! treated as absent rather than zero.

use std::str::FromStr;

use rust_decimal::Decimal;

/// Parse a decimal-as-string amount.
///
/// Returns `None` for empty or whitespace-only input and for anything that is
/// not a plain decimal number.
#[must_use]
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Decimal::from_str(trimmed).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_plain() {
        assert_eq!(parse_amount("149.99"), Some(Decimal::new(14999, 2)));
        assert_eq!(parse_amount(" 20 "), Some(Decimal::new(20, 0)));
    }

    #[test]
    fn test_parse_amount_empty_is_none() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
    }

    #[test]
    fn test_parse_amount_garbage_is_none() {
        assert_eq!(parse_amount("£12"), None);
        assert_eq!(parse_amount("10-20"), None);
    }
}
