//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`] from user input.
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("price must be a decimal number")]
    Invalid,
    /// The amount is negative.
    #[error("price cannot be negative")]
    Negative,
}

/// A price with currency information.
///
/// Amounts use decimal arithmetic (never floats) and are kept in the
/// currency's standard unit (e.g., dollars, not cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    amount: Decimal,
    /// ISO 4217 currency code.
    currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a price from form input, in the default currency.
    ///
    /// Accepts plain decimals as well as display-formatted values with a
    /// leading currency symbol and thousands separators (`"$1,299.90"`).
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, not a decimal number, or
    /// negative.
    pub fn parse(input: &str) -> Result<Self, PriceError> {
        let cleaned: String = input
            .trim()
            .trim_start_matches(['$', '€', '£'])
            .replace(',', "");

        if cleaned.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount = Decimal::from_str(&cleaned).map_err(|_| PriceError::Invalid)?;

        if amount.is_sign_negative() {
            return Err(PriceError::Negative);
        }

        Ok(Self::new(amount, CurrencyCode::default()))
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The ISO 4217 currency code.
    #[must_use]
    pub const fn currency_code(&self) -> CurrencyCode {
        self.currency_code
    }
}

impl fmt::Display for Price {
    /// Format for display (e.g., `$19.99`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", self.currency_code.symbol(), self.amount)
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// The display symbol for this currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    /// The ISO 4217 code for this currency.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_decimal() {
        let price = Price::parse("12.34").unwrap();
        assert_eq!(price.amount(), Decimal::new(1234, 2));
        assert_eq!(price.currency_code(), CurrencyCode::USD);
    }

    #[test]
    fn test_parse_formatted_input() {
        let price = Price::parse(" $1,299.90 ").unwrap();
        assert_eq!(price.amount(), Decimal::new(129_990, 2));
    }

    #[test]
    fn test_parse_integer_amount() {
        let price = Price::parse("40").unwrap();
        assert_eq!(price.amount(), Decimal::new(40, 0));
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Price::parse(""), Err(PriceError::Empty)));
        assert!(matches!(Price::parse("  $ "), Err(PriceError::Empty)));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(Price::parse("abc"), Err(PriceError::Invalid)));
        assert!(matches!(Price::parse("12.3.4"), Err(PriceError::Invalid)));
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(Price::parse("-5.00"), Err(PriceError::Negative)));
    }

    #[test]
    fn test_display_two_decimal_places() {
        let price = Price::new(Decimal::new(1999, 2), CurrencyCode::USD);
        assert_eq!(price.to_string(), "$19.99");

        let whole = Price::new(Decimal::new(5, 0), CurrencyCode::GBP);
        assert_eq!(whole.to_string(), "£5.00");
    }
}
