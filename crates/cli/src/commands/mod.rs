//! Command dispatch.
//!
//! `run` is the composition root: it loads configuration, opens the one
//! cart store for this session, and hands it to the command.

use std::path::PathBuf;

use thiserror::Error;

use carecart_core::{CartCandidate, PriceError, SaveOutcome, StoreError};
use carecart_storage::{ConfigError, StorageConfig, open_cart};

use crate::Commands;

pub mod cart;
pub mod show;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The data directory could not be opened.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// The product offered to the cart is invalid.
    #[error("Invalid product: {0}")]
    Product(#[from] PriceError),

    /// The summary could not be encoded.
    #[error("Output error: {0}")]
    Output(#[from] serde_json::Error),
}

/// Run `command` against the cart in the configured data directory.
///
/// # Errors
///
/// Returns `CliError` if configuration, storage, or input is invalid. A
/// failed save is reported as a warning, not an error.
pub fn run(command: Commands, data_dir: Option<PathBuf>) -> Result<(), CliError> {
    let mut config = StorageConfig::from_env()?;
    if let Some(dir) = data_dir {
        config = config.with_data_dir(dir);
    }

    let mut store = open_cart(&config)?;

    let outcome = match command {
        Commands::Show { json } => {
            emit(&show::render(&store, &config, json)?);
            return Ok(());
        }
        Commands::Add {
            id,
            name,
            price,
            image,
        } => cart::add(&mut store, CartCandidate::new(id, name, price, image)?),
        Commands::Remove { id } => cart::remove(&mut store, id),
        Commands::Update { id, quantity } => cart::update(&mut store, id, quantity),
        Commands::Clear => cart::clear(&mut store),
    };

    report(&outcome);
    emit(&show::render(&store, &config, false)?);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn emit(output: &str) {
    println!("{output}");
}

#[allow(clippy::print_stderr)]
fn report(outcome: &SaveOutcome) {
    match outcome {
        SaveOutcome::Saved => {}
        SaveOutcome::Unchanged => eprintln!("Quantity must be at least 1; cart unchanged"),
        SaveOutcome::Failed(e) => {
            eprintln!("Warning: cart could not be saved ({e}); changes last only this session");
        }
    }
}
