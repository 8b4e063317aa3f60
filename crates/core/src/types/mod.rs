//! Core types for CareCart.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod line_item;
pub mod price;

pub use id::*;
pub use line_item::{CartCandidate, LineItem, checked_total};
pub use price::{CurrencyCode, Price, PriceError, parse_unit_price};
