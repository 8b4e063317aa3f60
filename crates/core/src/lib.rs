//! CareCart Core - Cart store and shared types.
//!
//! This crate provides the cart aggregation engine used by every CareCart
//! surface:
//! - `storage` - File-backed key-value store that persists carts between sessions
//! - `cli` - Command-line shopping session (the composition root)
//!
//! # Architecture
//!
//! The core crate contains types, the cart store, and the persistence traits -
//! no filesystem access, no HTTP clients. Persistence is reached only through
//! [`repository::CartRepository`], so the same store logic runs against the
//! in-memory fakes in tests and against real storage in the binary.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, and line items
//! - [`repository`] - Key-value store and cart repository abstractions
//! - [`cart`] - The cart store and checkout summary

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod repository;
pub mod types;

pub use cart::{CartStore, CartSummary, SaveOutcome, TaxRate, TaxRateError};
pub use repository::{
    CART_KEY, CartRepository, KeyValueCartRepository, KeyValueStore, MemoryStore,
    RepositoryError, StoreError,
};
pub use types::*;
