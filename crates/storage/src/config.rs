//! Storage configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CARECART_DATA_DIR` - Directory holding persisted carts (default: `.carecart`)
//! - `CARECART_TAX_RATE` - Sales tax as a fraction (default: `0.08`)
//! - `CARECART_CURRENCY` - ISO 4217 display currency (default: `INR`)

use std::path::PathBuf;

use carecart_core::{CurrencyCode, TaxRate};
use thiserror::Error;

const DEFAULT_DATA_DIR: &str = ".carecart";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart storage and checkout configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Directory the file store writes to
    pub data_dir: PathBuf,
    /// Tax applied in the checkout summary
    pub tax_rate: TaxRate,
    /// Currency prices are displayed in
    pub currency: CurrencyCode,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            tax_rate: TaxRate::default(),
            currency: CurrencyCode::default(),
        }
    }
}

impl StorageConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup("CARECART_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let tax_rate = match lookup("CARECART_TAX_RATE") {
            Some(raw) => raw.parse::<TaxRate>().map_err(|e| {
                ConfigError::InvalidEnvVar("CARECART_TAX_RATE".to_string(), e.to_string())
            })?,
            None => TaxRate::default(),
        };

        let currency = match lookup("CARECART_CURRENCY") {
            Some(raw) => raw.parse::<CurrencyCode>().map_err(|e| {
                ConfigError::InvalidEnvVar("CARECART_CURRENCY".to_string(), e.to_string())
            })?,
            None => CurrencyCode::default(),
        };

        Ok(Self {
            data_dir,
            tax_rate,
            currency,
        })
    }

    /// Replace the data directory (e.g. from a command-line flag).
    #[must_use]
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use rust_decimal::Decimal;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = StorageConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StorageConfig::default());
        assert_eq!(config.data_dir, PathBuf::from(".carecart"));
        assert_eq!(config.currency, CurrencyCode::INR);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = StorageConfig::from_lookup(lookup_from(&[
            ("CARECART_DATA_DIR", "/var/lib/carecart"),
            ("CARECART_TAX_RATE", "0.18"),
            ("CARECART_CURRENCY", "usd"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/var/lib/carecart"));
        assert_eq!(config.tax_rate.as_decimal(), Decimal::new(18, 2));
        assert_eq!(config.currency, CurrencyCode::USD);
    }

    #[test]
    fn test_blank_data_dir_uses_default() {
        let config =
            StorageConfig::from_lookup(lookup_from(&[("CARECART_DATA_DIR", "  ")])).unwrap();
        assert_eq!(config.data_dir, PathBuf::from(".carecart"));
    }

    #[test]
    fn test_invalid_tax_rate() {
        let err = StorageConfig::from_lookup(lookup_from(&[("CARECART_TAX_RATE", "8")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref name, _) if name == "CARECART_TAX_RATE"));
    }

    #[test]
    fn test_invalid_currency() {
        let err =
            StorageConfig::from_lookup(lookup_from(&[("CARECART_CURRENCY", "BTC")])).unwrap_err();
        assert!(err.to_string().contains("CARECART_CURRENCY"));
    }

    #[test]
    fn test_with_data_dir_overrides() {
        let config = StorageConfig::default().with_data_dir("/tmp/cart");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cart"));
    }
}
