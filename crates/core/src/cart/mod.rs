//! The cart store and checkout summary.
//!
//! A [`CartStore`] is created once per session by the application's
//! composition root and handed by reference to every consumer (pharmacy
//! page, navigation badge, checkout summary). There is no global instance.

mod store;
mod summary;

pub use store::{CartStore, SaveOutcome};
pub use summary::{CartSummary, TaxRate, TaxRateError};
