//! CareCart CLI - pharmacy cart from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of a product
//! carecart add --id 1 --name "Aspirin 325mg" --price 32.50 --image /img/aspirin.jpg
//!
//! # Set a quantity, remove an item, empty the cart
//! carecart update 1 3
//! carecart remove 1
//! carecart clear
//!
//! # Print the cart and checkout summary
//! carecart show
//! carecart show --json
//! ```
//!
//! Every invocation is one session: the cart is hydrated from the data
//! directory, the command runs, and the summary is printed.
//!
//! # Environment Variables
//!
//! - `CARECART_DATA_DIR`, `CARECART_TAX_RATE`, `CARECART_CURRENCY` - see
//!   `carecart_storage::config`
//! - `RUST_LOG` - log filter (default: `warn`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

use carecart_core::{ProductId, parse_unit_price};

mod commands;

#[derive(Parser)]
#[command(name = "carecart")]
#[command(author, version, about = "CareCart pharmacy cart")]
struct Cli {
    /// Directory holding the persisted cart (overrides `CARECART_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add one unit of a product to the cart
    Add {
        /// Catalog product ID
        #[arg(long)]
        id: ProductId,

        /// Product display name
        #[arg(long)]
        name: String,

        /// Unit price, e.g. 32.50
        #[arg(long, value_parser = parse_unit_price)]
        price: Decimal,

        /// Product image reference
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Remove a product from the cart
    Remove {
        /// Catalog product ID
        id: ProductId,
    },
    /// Set the quantity of a product already in the cart
    Update {
        /// Catalog product ID
        id: ProductId,

        /// New quantity (must be at least 1)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every product from the cart
    Clear,
    /// Print the cart and checkout summary
    Show {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Logs go to stderr so stdout stays clean for `show --json`
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli.command, cli.data_dir) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}
