//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod prefs;
pub mod shop;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args, Default)]
pub struct CatalogArgs {
    /// Text to search for in product names.
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Category name ("Todas" for every category).
    #[arg(short, long, default_value = "")]
    pub category: String,

    /// Minimum list price, in reais.
    #[arg(long, default_value = "")]
    pub min: String,

    /// Maximum list price, in reais.
    #[arg(long, default_value = "")]
    pub max: String,

    /// Page to show.
    #[arg(short, long, default_value = "1")]
    pub page: usize,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product id, as it would appear in `?id=`.
    pub id: String,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add one unit of a product.
    Add {
        /// Product id.
        id: i64,
    },
    /// Remove a product from the cart.
    Remove {
        /// Product id.
        id: i64,
    },
    /// One more unit of a product already in the cart.
    Inc {
        /// Product id.
        id: i64,
    },
    /// One less unit; the line goes away at zero.
    Dec {
        /// Product id.
        id: i64,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the country command.
#[derive(Args)]
pub struct CountryArgs {
    /// Country to select: br, us or eu. Shows the current one when omitted.
    pub country: Option<String>,
}

/// Arguments for the theme command.
#[derive(Args)]
pub struct ThemeArgs {
    /// Theme to select. Shows the current one when omitted.
    pub theme: Option<String>,
}

/// Arguments for the rates command.
#[derive(Args)]
pub struct RatesArgs {
    /// Only use cached or built-in rates.
    #[arg(long)]
    pub cached: bool,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a config value.
    Get {
        /// Config key (dot-separated).
        key: String,
    },
    /// Set a config value.
    Set {
        /// Config key (dot-separated).
        key: String,
        /// Value to set.
        value: String,
    },
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Print the path of the config file in use.
    Path,
    /// Validate the config file.
    Validate,
}
