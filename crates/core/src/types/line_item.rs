//! Cart line items and the catalog candidates they are built from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::PriceError;

/// A product offered to the cart by the catalog surface.
///
/// Name, price and image are copied into the cart when the candidate is
/// added. The cart never re-queries the catalog, so later price changes do
/// not affect items already in a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartCandidate {
    id: ProductId,
    name: String,
    unit_price: Decimal,
    image_ref: String,
}

impl CartCandidate {
    /// Create a cart candidate.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Negative` if `unit_price` is below zero.
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: Decimal,
        image_ref: impl Into<String>,
    ) -> Result<Self, PriceError> {
        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(PriceError::Negative(unit_price));
        }

        Ok(Self {
            id,
            name: name.into(),
            unit_price,
            image_ref: image_ref.into(),
        })
    }

    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    #[must_use]
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }
}

/// One product entry in the cart.
///
/// Serialized with camelCase field names. `price` and `image` are accepted
/// on input so carts saved under the older field names still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    #[serde(alias = "price")]
    pub unit_price: Decimal,
    #[serde(alias = "image")]
    pub image_ref: String,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl LineItem {
    /// Build a line item with quantity 1 from a candidate.
    #[must_use]
    pub fn from_candidate(candidate: CartCandidate) -> Self {
        Self {
            id: candidate.id,
            name: candidate.name,
            unit_price: candidate.unit_price,
            image_ref: candidate.image_ref,
            quantity: 1,
        }
    }

    /// `unit_price × quantity`, or `None` if it does not fit in a `Decimal`.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.unit_price.checked_mul(Decimal::from(self.quantity))
    }

    /// Whether the item satisfies the cart invariants on its own.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.quantity >= 1 && !(self.unit_price.is_sign_negative() && !self.unit_price.is_zero())
    }
}

/// Sum of the line totals of `items`, or `None` on overflow.
#[must_use]
pub fn checked_total(items: &[LineItem]) -> Option<Decimal> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.line_total()?))
}
