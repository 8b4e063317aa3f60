//! Persistence abstractions for the cart.
//!
//! Two layers:
//!
//! - [`KeyValueStore`] - a byte store addressed by string keys (the browser
//!   local storage analogue). [`MemoryStore`] is the in-memory fake; the
//!   `carecart-storage` crate provides a file-backed one.
//! - [`CartRepository`] - `load()`/`save(items)` for the cart's line items.
//!   [`KeyValueCartRepository`] encodes the items as JSON under [`CART_KEY`].
//!
//! The cart store depends only on [`CartRepository`].

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::types::{LineItem, checked_total};

/// Key the cart is persisted under.
pub const CART_KEY: &str = "cart";

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The write would exceed the store's capacity.
    #[error("storage quota exceeded writing {key}: {needed} bytes, limit {limit}")]
    QuotaExceeded {
        /// Key being written.
        key: String,
        /// Total bytes the store would hold after the write.
        needed: usize,
        /// Maximum bytes the store may hold.
        limit: usize,
    },

    /// The key cannot be used with this store.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Errors raised by a [`CartRepository`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The backing store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// The persisted value is not a JSON list of line items.
    #[error("corrupt cart data: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The persisted value parsed but breaks the cart invariants.
    #[error("invalid cart data: {0}")]
    Invalid(String),
}

/// A byte store addressed by string keys.
pub trait KeyValueStore {
    /// Read the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails. The previous value (if any)
    /// is left in place.
    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Delete `key`. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the store cannot be modified.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-memory [`KeyValueStore`].
///
/// An optional byte quota mimics browser storage limits so that failed
/// writes can be exercised without a real medium.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty store with no quota.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that rejects writes once it would hold more
    /// than `limit` bytes (keys and values combined).
    #[must_use]
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(limit),
        }
    }

    /// Change the quota. `None` removes the limit.
    pub const fn set_quota(&mut self, limit: Option<usize>) {
        self.quota = limit;
    }

    /// Seed a raw value, bypassing the quota.
    pub fn insert_raw(&mut self, key: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Raw bytes under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        if let Some(limit) = self.quota {
            let needed = self.used_without(key) + key.len() + value.len();
            if needed > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Load and save the cart's line items.
pub trait CartRepository {
    /// Load the persisted items. `Ok(None)` means nothing was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the store fails or the persisted value
    /// is not a valid list of line items.
    fn load(&self) -> Result<Option<Vec<LineItem>>, RepositoryError>;

    /// Persist `items`, overwriting whatever was saved before.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the items cannot be encoded or written.
    fn save(&mut self, items: &[LineItem]) -> Result<(), RepositoryError>;
}

/// [`CartRepository`] that stores the items as a JSON array under
/// [`CART_KEY`] in a [`KeyValueStore`].
#[derive(Debug, Clone, Default)]
pub struct KeyValueCartRepository<S> {
    store: S,
}

impl<S: KeyValueStore> KeyValueCartRepository<S> {
    /// Wrap a key-value store.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Borrow the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Mutably borrow the backing store.
    pub const fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Unwrap the backing store.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> CartRepository for KeyValueCartRepository<S> {
    fn load(&self) -> Result<Option<Vec<LineItem>>, RepositoryError> {
        let Some(bytes) = self.store.get(CART_KEY)? else {
            return Ok(None);
        };

        let items: Vec<LineItem> = serde_json::from_slice(&bytes)?;
        validate_items(&items)?;
        Ok(Some(items))
    }

    fn save(&mut self, items: &[LineItem]) -> Result<(), RepositoryError> {
        let bytes = serde_json::to_vec(items)?;
        self.store.set(CART_KEY, &bytes)?;
        Ok(())
    }
}

/// Check the invariants a loaded list must satisfy: positive quantities,
/// non-negative prices, unique ids, and a total that fits in a `Decimal`.
fn validate_items(items: &[LineItem]) -> Result<(), RepositoryError> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !item.is_valid() {
            return Err(RepositoryError::Invalid(format!(
                "item {} has quantity {} and unit price {}",
                item.id, item.quantity, item.unit_price
            )));
        }
        if !seen.insert(item.id) {
            return Err(RepositoryError::Invalid(format!(
                "duplicate item id {}",
                item.id
            )));
        }
    }
    if checked_total(items).is_none() {
        return Err(RepositoryError::Invalid(
            "cart total overflows".to_string(),
        ));
    }
    Ok(())
}
