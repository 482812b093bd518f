//! Base-currency to display-currency conversion.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::currency::{
    format_amount, CachedRates, Country, CurrencySettings, RateSource, RateTable, RATES_TTL,
};
use crate::money::Money;
use crate::repository::RateCacheRepository;

/// Where the rates in use came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RateStatus {
    /// A fresh cache entry.
    Cached,
    /// The rate service, just now.
    Fetched,
    /// Built-in or previously loaded rates, because nothing fresher was available.
    Fallback,
}

impl fmt::Display for RateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateStatus::Cached => write!(f, "cached"),
            RateStatus::Fetched => write!(f, "fetched"),
            RateStatus::Fallback => write!(f, "fallback"),
        }
    }
}

/// A price ready to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedPrice {
    pub symbol: &'static str,
    /// Amount with two decimals and locale separators, no symbol.
    pub amount: String,
    pub currency_code: &'static str,
    pub locale: &'static str,
}

impl fmt::Display for FormattedPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.symbol, self.amount)
    }
}

/// Converts base-currency amounts for display.
///
/// Formatting is synchronous and always uses the best rates currently in
/// memory; refreshing is a separate async step that never fails.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    table: RateTable,
    ttl: Duration,
    status: RateStatus,
    rates_as_of: Option<DateTime<Utc>>,
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl CurrencyConverter {
    /// A converter using the built-in rates.
    pub fn new() -> Self {
        Self::with_table(RateTable::default())
    }

    pub fn with_table(table: RateTable) -> Self {
        Self {
            table,
            ttl: RATES_TTL,
            status: RateStatus::Fallback,
            rates_as_of: None,
        }
    }

    /// Override how long cached rates stay usable.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn table(&self) -> &RateTable {
        &self.table
    }

    pub fn settings(&self, country: Country) -> CurrencySettings {
        self.table.get(country)
    }

    /// Where the current rates came from.
    pub fn status(&self) -> RateStatus {
        self.status
    }

    /// When the current rates were fetched, if they came from the service or cache.
    pub fn rates_as_of(&self) -> Option<DateTime<Utc>> {
        self.rates_as_of
    }

    /// Convert and format a base-currency amount for `country`.
    pub fn format_price(&self, amount_base: f64, country: Country) -> FormattedPrice {
        let settings = self.table.get(country);
        FormattedPrice {
            symbol: settings.symbol,
            amount: format_amount(amount_base * settings.rate, settings.locale),
            currency_code: settings.currency.code(),
            locale: settings.locale.tag(),
        }
    }

    /// Same as [`format_price`](Self::format_price) for base-currency money.
    pub fn format_money(&self, amount: Money, country: Country) -> FormattedPrice {
        self.format_price(amount.to_decimal(), country)
    }

    /// Use the cached rates if they are fresh and complete at `now`.
    /// Returns whether they were applied.
    pub fn apply_cached(&mut self, cache: &dyn RateCacheRepository, now: DateTime<Utc>) -> bool {
        let Some(cached) = cache.load() else {
            return false;
        };
        if !cached.is_usable(now, self.ttl) {
            tracing::debug!(timestamp = cached.timestamp, "cached rates are stale or incomplete");
            return false;
        }
        self.table.apply_quote(&cached.rates);
        self.status = RateStatus::Cached;
        self.rates_as_of = cached.fetched_at();
        true
    }

    /// Refresh rates as of the current time.
    pub async fn refresh(
        &mut self,
        cache: &dyn RateCacheRepository,
        source: &dyn RateSource,
    ) -> RateStatus {
        self.refresh_at(cache, source, Utc::now()).await
    }

    /// Refresh rates: a usable cache entry wins, otherwise the source is
    /// asked and a good answer is cached. On any failure the rates already
    /// in memory are kept.
    pub async fn refresh_at(
        &mut self,
        cache: &dyn RateCacheRepository,
        source: &dyn RateSource,
        now: DateTime<Utc>,
    ) -> RateStatus {
        if self.apply_cached(cache, now) {
            return self.status;
        }

        match source.fetch().await {
            Ok(quote) => {
                if self.table.apply_quote(&quote) {
                    if let Err(e) = cache.save(&CachedRates::new(quote, now)) {
                        tracing::warn!(error = %e, "failed to cache exchange rates");
                    }
                    self.status = RateStatus::Fetched;
                    self.rates_as_of = Some(now);
                    tracing::debug!(usd = ?quote.usd, eur = ?quote.eur, "exchange rates fetched");
                } else {
                    tracing::warn!(usd = ?quote.usd, eur = ?quote.eur, "rate service returned unusable rates, keeping current rates");
                    self.status = RateStatus::Fallback;
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "exchange rate fetch failed, keeping current rates");
                self.status = RateStatus::Fallback;
            }
        }
        self.status
    }
}
