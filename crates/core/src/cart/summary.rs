//! Checkout summary: subtotal, tax, total and item count.

use core::fmt;
use core::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use thiserror::Error;

use super::store::CartStore;
use crate::repository::CartRepository;
use crate::types::{CurrencyCode, Price};

/// Errors that can occur when building a [`TaxRate`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TaxRateError {
    #[error("tax rate must be between 0 and 1, got {0}")]
    OutOfRange(Decimal),
    #[error("invalid tax rate: {0}")]
    Invalid(String),
}

/// A sales tax rate expressed as a fraction (`0.08` is 8%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaxRate(Decimal);

impl TaxRate {
    /// Create a tax rate.
    ///
    /// # Errors
    ///
    /// Returns `TaxRateError::OutOfRange` unless `0 <= rate <= 1`.
    pub fn new(rate: Decimal) -> Result<Self, TaxRateError> {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(TaxRateError::OutOfRange(rate));
        }
        Ok(Self(rate))
    }

    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl Default for TaxRate {
    /// Pharmacy sales tax, 8%.
    fn default() -> Self {
        Self(Decimal::new(8, 2))
    }
}

impl FromStr for TaxRate {
    type Err = TaxRateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rate = Decimal::from_str(s.trim()).map_err(|_| TaxRateError::Invalid(s.to_string()))?;
        Self::new(rate)
    }
}

impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", (self.0 * Decimal::ONE_HUNDRED).normalize())
    }
}

/// Read-only checkout figures derived from a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub subtotal: Price,
    pub tax_rate: TaxRate,
    pub tax: Price,
    pub total: Price,
    pub item_count: u64,
}

impl CartSummary {
    /// Summarize `store` at `tax_rate`.
    ///
    /// Tax is rounded to two decimal places, midpoint away from zero. Figures
    /// that would exceed `Decimal::MAX` saturate at it.
    #[must_use]
    pub fn new<R: CartRepository>(
        store: &CartStore<R>,
        tax_rate: TaxRate,
        currency: CurrencyCode,
    ) -> Self {
        let subtotal = store.total_price();
        let tax = subtotal
            .saturating_mul(tax_rate.as_decimal())
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

        Self {
            subtotal: Price::new(subtotal, currency),
            tax_rate,
            tax: Price::new(tax, currency),
            total: Price::new(subtotal.saturating_add(tax), currency),
            item_count: store.item_count(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::repository::{KeyValueCartRepository, MemoryStore};
    use crate::types::{CartCandidate, ProductId};

    fn cart_with(prices: &[(i32, i64)]) -> CartStore<KeyValueCartRepository<MemoryStore>> {
        let mut cart = CartStore::open(KeyValueCartRepository::new(MemoryStore::new()));
        for &(id, cents) in prices {
            let candidate =
                CartCandidate::new(ProductId::new(id), "Item", Decimal::new(cents, 2), "")
                    .unwrap();
            let _ = cart.add_item(candidate);
        }
        cart
    }

    #[test]
    fn test_default_tax_rate() {
        assert_eq!(TaxRate::default().as_decimal(), Decimal::new(8, 2));
        assert_eq!(TaxRate::default().to_string(), "8%");
    }

    #[test]
    fn test_tax_rate_bounds() {
        assert!(TaxRate::new(Decimal::ZERO).is_ok());
        assert!(TaxRate::new(Decimal::ONE).is_ok());
        assert!(matches!(
            TaxRate::new(Decimal::new(-1, 2)),
            Err(TaxRateError::OutOfRange(_))
        ));
        assert!(matches!(
            "1.5".parse::<TaxRate>(),
            Err(TaxRateError::OutOfRange(_))
        ));
        assert!(matches!(
            "eight".parse::<TaxRate>(),
            Err(TaxRateError::Invalid(_))
        ));
    }

    #[test]
    fn test_summary_of_empty_cart() {
        let cart = cart_with(&[]);
        let summary = CartSummary::new(&cart, TaxRate::default(), CurrencyCode::INR);
        assert_eq!(summary.subtotal.amount, Decimal::ZERO);
        assert_eq!(summary.tax.amount, Decimal::ZERO);
        assert_eq!(summary.total.display(), "Rs 0.00");
        assert_eq!(summary.item_count, 0);
    }

    #[test]
    fn test_summary_applies_tax() {
        // 32.50 + 32.50 + 120.00 = 185.00, tax 14.80
        let cart = cart_with(&[(1, 3250), (1, 3250), (2, 12000)]);
        let summary = CartSummary::new(&cart, TaxRate::default(), CurrencyCode::INR);

        assert_eq!(summary.subtotal.display(), "Rs 185.00");
        assert_eq!(summary.tax.display(), "Rs 14.80");
        assert_eq!(summary.total.display(), "Rs 199.80");
        assert_eq!(summary.item_count, 3);
    }

    #[test]
    fn test_summary_rounds_tax() {
        // 25.75 * 0.08 = 2.06
        let cart = cart_with(&[(6, 2575)]);
        let summary = CartSummary::new(&cart, TaxRate::default(), CurrencyCode::USD);
        assert_eq!(summary.tax.amount, Decimal::new(206, 2));
        assert_eq!(summary.total.display(), "$27.81");
    }

    #[test]
    fn test_summary_saturates_near_max() {
        let mut cart = CartStore::open(KeyValueCartRepository::new(MemoryStore::new()));
        let candidate =
            CartCandidate::new(ProductId::new(1), "Max", Decimal::MAX, "").unwrap();
        assert!(cart.add_item(candidate).is_saved());

        let summary = CartSummary::new(&cart, TaxRate::default(), CurrencyCode::INR);
        assert_eq!(summary.subtotal.amount, Decimal::MAX);
        assert!(summary.tax.amount > Decimal::ZERO);
        assert_eq!(summary.total.amount, Decimal::MAX);
    }
}
