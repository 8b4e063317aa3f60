//! Integration tests for CareCart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p carecart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Carts surviving across sessions on a real directory
//! - `cart_properties` - Store invariants over longer operation sequences
//!
//! This library holds the shared fixtures: a small pharmacy catalog to add
//! products from.

use carecart_core::{CartCandidate, ProductId};
use rust_decimal::Decimal;

/// Catalog entries as `(id, name, price in paise, image)`.
const CATALOG: &[(i32, &str, i64, &str)] = &[
    (1, "Aspirin 325mg", 3250, "/images/aspirin.jpg"),
    (2, "Amoxicillin 500mg", 12000, "/images/amoxicillin.jpg"),
    (3, "Lisinopril 10mg", 8575, "/images/lisinopril.jpg"),
    (4, "Loratadine 10mg", 4550, "/images/loratadine.jpg"),
    (5, "Metformin 500mg", 6525, "/images/metformin.jpg"),
    (6, "Ibuprofen 200mg", 2575, "/images/ibuprofen.jpg"),
    (7, "Vitamin D3 1000IU", 14500, "/images/vitamin-d3.jpg"),
    (8, "Omeprazole 20mg", 8950, "/images/omeprazole.jpg"),
];

/// The pharmacy catalog as cart candidates.
#[must_use]
pub fn pharmacy_catalog() -> Vec<CartCandidate> {
    CATALOG
        .iter()
        .filter_map(|&(id, name, paise, image)| {
            CartCandidate::new(ProductId::new(id), name, Decimal::new(paise, 2), image).ok()
        })
        .collect()
}

/// Catalog entry for `id`, if the catalog carries it.
#[must_use]
pub fn product(id: i32) -> Option<CartCandidate> {
    pharmacy_catalog()
        .into_iter()
        .find(|candidate| candidate.id() == ProductId::new(id))
}
