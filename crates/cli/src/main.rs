//! Amana CLI - browse the catalog and manage a file-backed cart.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! amana catalog
//!
//! # Add a book to the cart (repeat to increase quantity)
//! amana cart add 3
//!
//! # Set a quantity, remove a line, or empty the cart
//! amana cart set 3 4
//! amana cart remove 3
//! amana cart clear
//!
//! # Show the cart with line totals
//! amana --store /tmp/cart.json cart show
//! ```
//!
//! The cart lives in a JSON key-value file (`--store`, `AMANA_CART_FILE`,
//! default `amana-cart.json`) under the same `cart` key the storefront uses.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "amana")]
#[command(author, version, about = "Amana Bookstore CLI tools")]
struct Cli {
    /// Path of the JSON key-value store holding the cart
    #[arg(long, env = "AMANA_CART_FILE", default_value = "amana-cart.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every book in the catalog
    Catalog,
    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart lines and the total
    Show,
    /// Add one copy of a book
    Add {
        /// Book ID
        book_id: String,
    },
    /// Set the quantity of a book already in the cart
    Set {
        /// Book ID
        book_id: String,
        /// New quantity (at least 1)
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a book from the cart
    Remove {
        /// Book ID
        book_id: String,
    },
    /// Remove every line from the cart
    Clear,
}

fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "amana_cli=info,amana_storefront=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

#[allow(clippy::print_stdout)]
fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let session = commands::cart::CartSession::open(&cli.store);

    let output = match cli.command {
        Commands::Catalog => commands::catalog::list(session.catalog()),
        Commands::Cart { action } => match action {
            CartAction::Show => session.show(),
            CartAction::Add { book_id } => session.add(&book_id)?,
            CartAction::Set { book_id, quantity } => session.set(&book_id, quantity)?,
            CartAction::Remove { book_id } => session.remove(&book_id)?,
            CartAction::Clear => session.clear()?,
        },
    };

    println!("{output}");
    Ok(())
}
