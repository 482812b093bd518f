//! LojaTech CLI - a terminal storefront.
//!
//! Commands:
//! - `loja catalog` - Browse and filter the product catalog
//! - `loja product` - Show a product's details
//! - `loja promos` - List discounted products
//! - `loja cart` - Show and change the cart
//! - `loja checkout` - Start checkout
//! - `loja profile` - Profile page with the cart summary
//! - `loja country` / `loja theme` - Shopper preferences
//! - `loja rates` - Exchange rates in use
//! - `loja shop` - Interactive session
//! - `loja config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{
    CartArgs, CatalogArgs, ConfigArgs, CountryArgs, ProductArgs, RatesArgs, ThemeArgs,
};

/// LojaTech CLI - browse the store, manage the cart and preferences
#[derive(Parser)]
#[command(name = "loja")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output (repeat for more log detail)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Never contact the exchange-rate service
    #[arg(long, global = true)]
    offline: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog
    Catalog(CatalogArgs),

    /// Show a product
    Product(ProductArgs),

    /// List products on promotion
    Promos,

    /// Show or change the cart
    Cart(CartArgs),

    /// Proceed to checkout
    Checkout,

    /// Show the profile page
    Profile,

    /// Show or select the country
    Country(CountryArgs),

    /// Show or select the theme
    Theme(ThemeArgs),

    /// Show the exchange rates in use
    Rates(RatesArgs),

    /// Interactive shopping session
    Shop,

    /// Manage configuration
    Config(ConfigArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose > 0, cli.json);

    // Load config
    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output, cli.offline)?;

    // Logging
    let mut logging = ctx.config.logging.clone();
    for _ in 0..cli.verbose {
        logging.level = logging.level.more_verbose();
    }
    if let Err(e) = loja_observability::init_logging(&logging) {
        ctx.output.warn(&format!("Logging disabled: {}", e));
    }

    // Execute command
    let result = match cli.command {
        Commands::Catalog(args) => commands::catalog::run(args, &ctx).await,
        Commands::Product(args) => commands::catalog::run_product(args, &ctx).await,
        Commands::Promos => commands::catalog::run_promos(&ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Checkout => commands::cart::run_checkout(&ctx).await,
        Commands::Profile => commands::cart::run_profile(&ctx).await,
        Commands::Country(args) => commands::prefs::run_country(args, &ctx).await,
        Commands::Theme(args) => commands::prefs::run_theme(args, &ctx).await,
        Commands::Rates(args) => commands::prefs::run_rates(args, &ctx).await,
        Commands::Shop => commands::shop::run(&ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
