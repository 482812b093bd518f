//! Typed persistence for the storefront's client-side state.
//!
//! Every repository owns its storage key and format. Loads never fail: a
//! missing, malformed or unreadable entry yields the documented default and
//! is logged. Saves report errors so callers can log and carry on.
//!
//! Several processes sharing one storage directory are not coordinated; the
//! last writer wins.

use std::fmt;
use std::sync::Arc;

use loja_cache::Cache;
use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartLine};
use crate::currency::{CachedRates, Country};
use crate::error::CommerceError;

/// Storage key of the cart.
pub const CART_KEY: &str = "lojaTechCarrinho";
/// Storage key of the selected theme.
pub const THEME_KEY: &str = "lojaTechTheme";
/// Storage key of the selected country.
pub const COUNTRY_KEY: &str = "lojaTechCountry";
/// Storage key of the cached exchange rates.
pub const RATES_KEY: &str = "lojaTechRates";

/// Persisted cart.
pub trait CartRepository: Send + Sync {
    /// The stored cart, or an empty cart.
    fn load(&self) -> Cart;

    /// Replace the stored cart.
    fn save(&self, cart: &Cart) -> Result<(), CommerceError>;
}

/// Persisted exchange-rate cache.
pub trait RateCacheRepository: Send + Sync {
    /// The stored entry, if one can be read. Freshness is the caller's call.
    fn load(&self) -> Option<CachedRates>;

    fn save(&self, rates: &CachedRates) -> Result<(), CommerceError>;
}

/// Persisted shopper preferences.
pub trait PreferenceRepository: Send + Sync {
    /// Selected country, `br` when unset or unrecognized.
    fn country(&self) -> Country;

    fn set_country(&self, country: Country) -> Result<(), CommerceError>;

    /// Selected theme, `roxo` when unset.
    fn theme(&self) -> Theme;

    fn set_theme(&self, theme: &Theme) -> Result<(), CommerceError>;
}

impl<T: CartRepository + ?Sized> CartRepository for Box<T> {
    fn load(&self) -> Cart {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        (**self).save(cart)
    }
}

impl<T: CartRepository + ?Sized> CartRepository for Arc<T> {
    fn load(&self) -> Cart {
        (**self).load()
    }

    fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        (**self).save(cart)
    }
}

/// UI theme name. Any non-empty name is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Theme(String);

impl Theme {
    pub const DEFAULT: &'static str = "roxo";

    /// Create a theme; blank names fall back to the default.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            Self::default()
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cart stored as a JSON array of lines under [`CART_KEY`].
#[derive(Debug, Clone)]
pub struct KvCartRepository {
    cache: Cache,
}

impl KvCartRepository {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }
}

impl CartRepository for KvCartRepository {
    fn load(&self) -> Cart {
        match self.cache.get::<Vec<CartLine>>(CART_KEY) {
            Ok(Some(lines)) => Cart::from_lines(lines),
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!(key = CART_KEY, error = %e, "unreadable cart, starting empty");
                Cart::new()
            }
        }
    }

    fn save(&self, cart: &Cart) -> Result<(), CommerceError> {
        self.cache.set(CART_KEY, cart)?;
        Ok(())
    }
}

/// Rate cache stored as `{timestamp, rates}` under [`RATES_KEY`].
#[derive(Debug, Clone)]
pub struct KvRateCache {
    cache: Cache,
}

impl KvRateCache {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }
}

impl RateCacheRepository for KvRateCache {
    fn load(&self) -> Option<CachedRates> {
        match self.cache.get::<CachedRates>(RATES_KEY) {
            Ok(cached) => cached,
            Err(e) => {
                tracing::debug!(key = RATES_KEY, error = %e, "ignoring unreadable rate cache");
                None
            }
        }
    }

    fn save(&self, rates: &CachedRates) -> Result<(), CommerceError> {
        self.cache.set(RATES_KEY, rates)?;
        Ok(())
    }
}

/// Country and theme stored as bare strings, not JSON.
#[derive(Debug, Clone)]
pub struct KvPreferences {
    cache: Cache,
}

impl KvPreferences {
    pub fn new(cache: Cache) -> Self {
        Self { cache }
    }

    fn read_string(&self, key: &str) -> Option<String> {
        match self.cache.get_raw(key) {
            Ok(Some(bytes)) => String::from_utf8(bytes).ok(),
            Ok(None) => None,
            Err(e) => {
                tracing::warn!(key, error = %e, "unreadable preference, using default");
                None
            }
        }
    }
}

impl PreferenceRepository for KvPreferences {
    fn country(&self) -> Country {
        self.read_string(COUNTRY_KEY)
            .and_then(|raw| Country::parse(&raw))
            .unwrap_or_default()
    }

    fn set_country(&self, country: Country) -> Result<(), CommerceError> {
        self.cache.set_raw(COUNTRY_KEY, country.code().as_bytes())?;
        Ok(())
    }

    fn theme(&self) -> Theme {
        self.read_string(THEME_KEY)
            .map(Theme::new)
            .unwrap_or_default()
    }

    fn set_theme(&self, theme: &Theme) -> Result<(), CommerceError> {
        self.cache.set_raw(THEME_KEY, theme.as_str().as_bytes())?;
        Ok(())
    }
}

/// All three repositories over one cache.
pub fn kv_repositories(cache: &Cache) -> (KvCartRepository, KvRateCache, KvPreferences) {
    (
        KvCartRepository::new(cache.clone()),
        KvRateCache::new(cache.clone()),
        KvPreferences::new(cache.clone()),
    )
}
