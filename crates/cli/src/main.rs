//! Wholesale CLI - price quotes and policy management.
//!
//! # Usage
//!
//! ```bash
//! # Price 12 units at $40 with a bulk price of $32 from 10 units
//! wt-cli quote --price 40 --bulk-quantity 10 --bulk-price 32 --quantity 12
//!
//! # List products with their wholesale policies
//! wt-cli policy list
//!
//! # Set a product's wholesale policy
//! wt-cli policy set --product 8001 --quantity 10 --price 32
//! ```
//!
//! # Commands
//!
//! - `quote` - Resolve a unit price offline
//! - `policy list` - List products and policies from the store
//! - `policy set` - Write a product's policy to the store

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

#[derive(Parser)]
#[command(name = "wt-cli")]
#[command(author, version, about = "Wholesale pricing CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the unit price for a quantity without contacting the store
    Quote {
        /// Regular unit price
        #[arg(long)]
        price: Decimal,

        /// Quantity that unlocks the bulk price (0 disables it)
        #[arg(long, default_value_t = 0)]
        bulk_quantity: i64,

        /// Bulk unit price
        #[arg(long, default_value_t = Decimal::ZERO)]
        bulk_price: Decimal,

        /// Requested quantity
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },
    /// Manage wholesale policies in the store
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },
}

#[derive(Subcommand)]
enum PolicyAction {
    /// List products with their wholesale policies
    List {
        /// Number of products to fetch (defaults to `WHOLESALE_PAGE_SIZE`)
        #[arg(short, long)]
        first: Option<i64>,
    },
    /// Set a product's wholesale policy
    Set {
        /// Product id (numeric or `gid://shopify/Product/...`)
        #[arg(short, long)]
        product: String,

        /// Quantity that unlocks the bulk price (0 disables it)
        #[arg(short, long)]
        quantity: i64,

        /// Bulk unit price
        #[arg(long)]
        price: Decimal,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Quote {
            price,
            bulk_quantity,
            bulk_price,
            quantity,
        } => commands::quote::run(price, bulk_quantity, bulk_price, quantity)?,
        Commands::Policy { action } => match action {
            PolicyAction::List { first } => commands::policy::list(first).await?,
            PolicyAction::Set {
                product,
                quantity,
                price,
            } => commands::policy::set(&product, quantity, price).await?,
        },
    }
    Ok(())
}
