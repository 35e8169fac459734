//! Shopfront CLI - manage your addresses and orders from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # List saved addresses
//! shop addresses list
//!
//! # Pick the address checkout should ship to
//! shop addresses select 64f0c2a9e1
//!
//! # Show orders that are still in progress
//! shop orders list --tab current
//!
//! # Cancel an order without the confirmation prompt
//! shop --yes orders cancel 64f0c2b7aa
//!
//! # Show where you are in checkout
//! shop checkout shipping
//! ```
//!
//! # Environment Variables
//!
//! See [`shopfront_client::config`]. `RUST_LOG` controls log output, which
//! goes to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use shopfront_client::views::CheckoutStep;
use shopfront_core::{AddressId, OrderId, OrderTab};

mod commands;

#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about = "Shopfront account tools")]
struct Cli {
    /// Answer yes to every confirmation prompt
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage saved addresses
    Addresses {
        #[command(subcommand)]
        action: AddressAction,
    },
    /// View and manage orders
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Show the checkout progress indicator
    Checkout {
        /// Current step (cart, shipping, payment, review)
        step: CheckoutStep,
    },
}

#[derive(Subcommand)]
enum AddressAction {
    /// List saved addresses
    List,
    /// Show one address
    Show { id: AddressId },
    /// Save a new address
    Add(commands::addresses::AddressArgs),
    /// Change fields of an address
    Edit {
        id: AddressId,
        #[command(flatten)]
        fields: commands::addresses::AddressEditArgs,
    },
    /// Delete an address
    Remove { id: AddressId },
    /// Use an address for checkout
    Select { id: AddressId },
    /// Show the address checkout will use
    Selected {
        /// Forget the selection instead of showing it
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum OrderAction {
    /// List orders
    List {
        /// Which orders to show (current, past, all)
        #[arg(short, long, default_value = "current")]
        tab: OrderTab,
    },
    /// Show one order with its line items
    Show { id: OrderId },
    /// Cancel an order that has not shipped
    Cancel { id: OrderId },
    /// Request a return for a delivered order
    Return {
        id: OrderId,
        /// Why the order is being returned
        #[arg(short, long)]
        reason: String,
    },
}

#[tokio::main]
async fn main() {
    // Logs go to stderr so command output stays pipeable.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopfront_client=info,shopfront_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let ctx = commands::Context::from_env(cli.yes)?;

    match cli.command {
        Commands::Addresses { action } => match action {
            AddressAction::List => commands::addresses::list(&ctx).await,
            AddressAction::Show { id } => commands::addresses::show(&ctx, &id).await,
            AddressAction::Add(args) => commands::addresses::add(&ctx, args).await,
            AddressAction::Edit { id, fields } => commands::addresses::edit(&ctx, &id, fields).await,
            AddressAction::Remove { id } => commands::addresses::remove(&ctx, &id).await,
            AddressAction::Select { id } => commands::addresses::select(&ctx, id).await,
            AddressAction::Selected { clear } => commands::addresses::selected(&ctx, clear).await,
        },
        Commands::Orders { action } => match action {
            OrderAction::List { tab } => commands::orders::list(&ctx, tab).await,
            OrderAction::Show { id } => commands::orders::show(&ctx, &id).await,
            OrderAction::Cancel { id } => commands::orders::cancel(&ctx, &id).await,
            OrderAction::Return { id, reason } => {
                commands::orders::request_return(&ctx, &id, &reason).await
            }
        },
        Commands::Checkout { step } => commands::checkout::show(&ctx, step).await,
    }
}
