//! Type-safe price representation using decimal arithmetic.
//!
//! Amounts are kept as [`Decimal`] in the currency's standard unit (rupees,
//! dollars), never as floats, so that cart totals add up to the cent.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when building a [`Price`] or parsing a currency.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Amount is below zero.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
    /// Amount is not a decimal number.
    #[error("invalid price amount: {0}")]
    InvalidAmount(String),
    /// Currency code is not one we sell in.
    #[error("unsupported currency code: {0}")]
    UnsupportedCurrency(String),
}

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., rupees, not paise).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
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

    /// Create a price from an amount in the smallest currency unit.
    #[must_use]
    pub fn from_minor_units(minor: i64, currency_code: CurrencyCode) -> Self {
        Self::new(Decimal::new(minor, 2), currency_code)
    }

    /// Amount rounded to two decimal places, midpoint away from zero.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format for display (e.g., "Rs 25.50", "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.prefix(), self.rounded())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Parse a non-negative unit price such as `"32.50"`.
///
/// # Errors
///
/// Returns `PriceError::InvalidAmount` if the input is not a decimal number,
/// or `PriceError::Negative` if it is below zero.
pub fn parse_unit_price(s: &str) -> Result<Decimal, PriceError> {
    let amount =
        Decimal::from_str(s.trim()).map_err(|_| PriceError::InvalidAmount(s.to_string()))?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(PriceError::Negative(amount));
    }
    Ok(amount)
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    INR,
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
}

impl CurrencyCode {
    /// Display prefix placed before the amount.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::INR => "Rs ",
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::INR => "INR",
            Self::USD => "USD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INR" => Ok(Self::INR),
            "USD" => Ok(Self::USD),
            "EUR" => Ok(Self::EUR),
            "GBP" => Ok(Self::GBP),
            "CAD" => Ok(Self::CAD),
            "AUD" => Ok(Self::AUD),
            _ => Err(PriceError::UnsupportedCurrency(s.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display_rupees() {
        let price = Price::from_minor_units(2550, CurrencyCode::INR);
        assert_eq!(price.display(), "Rs 25.50");
    }

    #[test]
    fn test_display_pads_and_rounds() {
        let whole = Price::new(Decimal::new(10, 0), CurrencyCode::USD);
        assert_eq!(whole.to_string(), "$10.00");

        // 2.605 rounds away from zero
        let midpoint = Price::new(Decimal::new(2605, 3), CurrencyCode::GBP);
        assert_eq!(midpoint.display(), "£2.61");
    }

    #[test]
    fn test_parse_unit_price() {
        assert_eq!(parse_unit_price("32.50").unwrap(), Decimal::new(3250, 2));
        assert_eq!(parse_unit_price(" 0 ").unwrap(), Decimal::ZERO);
        assert!(matches!(
            parse_unit_price("-1.00"),
            Err(PriceError::Negative(_))
        ));
        assert!(matches!(
            parse_unit_price("cheap"),
            Err(PriceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_currency_from_str() {
        assert_eq!("inr".parse::<CurrencyCode>().unwrap(), CurrencyCode::INR);
        assert_eq!("EUR".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
        assert!(matches!(
            "XYZ".parse::<CurrencyCode>(),
            Err(PriceError::UnsupportedCurrency(_))
        ));
    }

    #[test]
    fn test_serializes_camel_case() {
        let price = Price::from_minor_units(550, CurrencyCode::USD);
        let value = serde_json::to_value(price).unwrap();
        assert_eq!(value["amount"], "5.50");
        assert_eq!(value["currencyCode"], "USD");
        assert!(value.get("currency_code").is_none());
    }

    #[test]
    fn test_default_currency_is_rupee() {
        assert_eq!(CurrencyCode::default().code(), "INR");
    }
}
