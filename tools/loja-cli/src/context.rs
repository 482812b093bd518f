//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::Utc;
use loja_cache::Cache;
use loja_commerce::catalog::{catalog_source_for, Catalog};
use loja_commerce::currency::{CurrencyConverter, HttpRateSource, RateStatus};
use loja_commerce::repository::KvRateCache;
use loja_commerce::storefront::Storefront;

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Config file the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Never contact the rate service.
    pub offline: bool,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output, offline: bool) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = PathBuf::from(path);
            (CliConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
            offline,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(&config_path) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory relative paths in the config are resolved against: the
    /// config file's directory, or the working directory without one.
    pub fn base_dir(&self) -> PathBuf {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.cwd.clone())
    }

    /// Resolve a configured path.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir().join(path)
        }
    }

    /// Get the storage directory.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Open the client-side store.
    pub fn open_cache(&self) -> Result<Cache> {
        let dir = self.storage_dir();
        Cache::open(dir.clone()).with_context(|| format!("Failed to open storage at {}", dir.display()))
    }

    /// Catalog location with relative file paths resolved.
    pub fn catalog_location(&self) -> String {
        let source = &self.config.catalog.source;
        if source.starts_with("http://") || source.starts_with("https://") {
            source.clone()
        } else {
            self.resolve_path(source).to_string_lossy().into_owned()
        }
    }

    /// Load the catalog. A failed load is reported and yields an empty catalog.
    pub async fn load_catalog(&self) -> Catalog {
        let source = catalog_source_for(&self.catalog_location());
        self.output.debug(&format!("Loading catalog from {}", source.describe()));

        let spinner = self.output.spinner("Carregando produtos...");
        let catalog = Catalog::load(&*source).await;
        spinner.finish_and_clear();

        if catalog.is_empty() {
            self.output
                .warn(&format!("No products loaded from {}", source.describe()));
        }
        catalog
    }

    /// Converter with the configured TTL and the built-in rates.
    pub fn converter(&self) -> CurrencyConverter {
        CurrencyConverter::new().with_ttl(self.config.rates.ttl())
    }

    /// Bring the converter's rates up to date: a fresh cache entry, then the
    /// rate service unless disabled or offline.
    pub async fn refresh_rates(&self, converter: &mut CurrencyConverter, cache: &Cache) -> RateStatus {
        let rate_cache = KvRateCache::new(cache.clone());

        if self.offline || !self.config.rates.enabled {
            converter.apply_cached(&rate_cache, Utc::now());
            return converter.status();
        }

        let source = HttpRateSource::new(self.config.rates.url.as_str());
        let spinner = self.output.spinner("Atualizando câmbio...");
        let status = converter.refresh(&rate_cache, &source).await;
        spinner.finish_and_clear();

        if status == RateStatus::Fallback {
            self.output
                .debug("Exchange rates unavailable, using built-in rates");
        }
        status
    }

    /// Open a full storefront session: catalog, stored state and rates.
    pub async fn open_storefront(&self) -> Result<Storefront> {
        let cache = self.open_cache()?;
        let catalog = self.load_catalog().await;
        let mut converter = self.converter();
        self.refresh_rates(&mut converter, &cache).await;

        Ok(Storefront::with_cache(catalog, &cache, converter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(config_path: Option<PathBuf>, cwd: PathBuf) -> Context {
        Context {
            config: CliConfig::default(),
            config_path,
            output: Output::new(false, true),
            cwd,
            offline: true,
        }
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let ctx = context(
            Some(PathBuf::from("/srv/loja/loja.toml")),
            PathBuf::from("/home/user"),
        );
        assert_eq!(ctx.storage_dir(), PathBuf::from("/srv/loja/.lojatech"));
        assert_eq!(
            ctx.catalog_location(),
            "/srv/loja/assets/data/products.json"
        );
    }

    #[test]
    fn test_paths_resolve_against_cwd_without_config() {
        let ctx = context(None, PathBuf::from("/home/user"));
        assert_eq!(ctx.storage_dir(), PathBuf::from("/home/user/.lojatech"));
    }

    #[test]
    fn test_remote_catalog_is_untouched() {
        let mut ctx = context(None, PathBuf::from("/home/user"));
        ctx.config.catalog.source = "https://cdn.loja/products.json".to_string();
        assert_eq!(ctx.catalog_location(), "https://cdn.loja/products.json");
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(
            root.path().join("loja.toml"),
            "[storage]\ndir = \"estado\"\n",
        )
        .unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.storage.dir, "estado");
        assert_eq!(path, root.path().join("loja.toml"));
    }

    #[tokio::test]
    async fn test_offline_refresh_uses_builtin_rates() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(None, dir.path().to_path_buf());
        let cache = ctx.open_cache().unwrap();

        let mut converter = ctx.converter();
        assert_eq!(
            ctx.refresh_rates(&mut converter, &cache).await,
            RateStatus::Fallback
        );
    }
}
