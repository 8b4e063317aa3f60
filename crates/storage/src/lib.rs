//! CareCart Storage - persistent medium for carts.
//!
//! # Modules
//!
//! - [`file_store`] - [`FileStore`], a directory-backed key-value byte store
//! - [`config`] - [`StorageConfig`], loaded from environment variables
//!
//! Open a session's cart with [`open_cart`]:
//!
//! ```rust,no_run
//! use carecart_storage::{StorageConfig, open_cart};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorageConfig::from_env()?;
//! let cart = open_cart(&config)?;
//! println!("{} items", cart.item_count());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod file_store;

use carecart_core::{CartStore, KeyValueCartRepository, StoreError};

pub use config::{ConfigError, StorageConfig};
pub use file_store::FileStore;

/// Cart store persisted to a [`FileStore`].
pub type FileCart = CartStore<KeyValueCartRepository<FileStore>>;

/// Open the data directory from `config` and hydrate its cart.
///
/// # Errors
///
/// Returns `StoreError::Io` if the data directory cannot be created.
pub fn open_cart(config: &StorageConfig) -> Result<FileCart, StoreError> {
    let store = FileStore::open(&config.data_dir)?;
    Ok(CartStore::open(KeyValueCartRepository::new(store)))
}
