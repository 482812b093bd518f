//! CLI configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use loja_commerce::catalog::DEFAULT_CATALOG_PATH;
use loja_commerce::currency::DEFAULT_RATES_URL;
use loja_observability::LoggingConfig;
use serde::{Deserialize, Serialize};

/// File names searched for, in order, from the working directory upwards.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["loja.toml", ".loja.toml", "loja.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where client-side state is kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Where the product catalog comes from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Exchange-rate service.
    #[serde(default)]
    pub rates: RatesConfig,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file. `.json` files are JSON, anything else TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Problems that make the config unusable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.storage.dir.trim().is_empty() {
            errors.push("storage.dir must not be empty".to_string());
        }
        if self.catalog.source.trim().is_empty() {
            errors.push("catalog.source must not be empty".to_string());
        }
        if self.rates.ttl_hours == 0 {
            errors.push("rates.ttl_hours must be at least 1".to_string());
        }
        if self.rates.enabled && !self.rates.url.starts_with("http") {
            errors.push(format!("rates.url '{}' is not an HTTP URL", self.rates.url));
        }

        errors
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == "json")
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the cart, preferences and rate cache.
    #[serde(default = "default_storage_dir")]
    pub dir: String,
}

fn default_storage_dir() -> String {
    ".lojatech".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// Catalog configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// File path or `http(s)://` URL of the product list.
    #[serde(default = "default_catalog_source")]
    pub source: String,
}

fn default_catalog_source() -> String {
    DEFAULT_CATALOG_PATH.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            source: default_catalog_source(),
        }
    }
}

/// Exchange-rate configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatesConfig {
    /// Whether to contact the rate service at all. When off, only a fresh
    /// cache entry or the built-in rates are used.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Rate service URL.
    #[serde(default = "default_rates_url")]
    pub url: String,

    /// How long fetched rates are reused.
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,
}

fn default_true() -> bool {
    true
}

fn default_rates_url() -> String {
    DEFAULT_RATES_URL.to_string()
}

fn default_ttl_hours() -> u64 {
    12
}

impl RatesConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours.saturating_mul(60 * 60))
    }
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            url: default_rates_url(),
            ttl_hours: default_ttl_hours(),
        }
    }
}

/// Generate a default loja.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# LojaTech storefront configuration

[storage]
dir = "{storage}"

[catalog]
# A file path or an http(s) URL
source = "{catalog}"

[rates]
enabled = true
url = "{rates}"
ttl_hours = {ttl}

[logging]
# trace, debug, info, warn or error; RUST_LOG takes precedence
level = "warn"
# human or json
format = "human"
"#,
        storage = default_storage_dir(),
        catalog = DEFAULT_CATALOG_PATH,
        rates = DEFAULT_RATES_URL,
        ttl = default_ttl_hours(),
    )
}
