//! Rate table and its cached form.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::currency::{Country, Locale};
use crate::money::Currency;

/// How long cached rates stay usable.
pub const RATES_TTL: Duration = Duration::from_secs(12 * 60 * 60);

/// How prices are shown for one country.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurrencySettings {
    pub currency: Currency,
    pub locale: Locale,
    pub symbol: &'static str,
    /// Units of `currency` per unit of base currency.
    pub rate: f64,
}

impl CurrencySettings {
    fn new(currency: Currency, locale: Locale, rate: f64) -> Self {
        Self {
            currency,
            locale,
            symbol: currency.symbol(),
            rate,
        }
    }
}

/// Conversion settings for every country.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateTable {
    br: CurrencySettings,
    us: CurrencySettings,
    eu: CurrencySettings,
}

impl Default for RateTable {
    /// Built-in rates used until something better is known.
    fn default() -> Self {
        Self {
            br: CurrencySettings::new(Currency::BRL, Locale::PtBr, 1.0),
            us: CurrencySettings::new(Currency::USD, Locale::EnUs, 0.20),
            eu: CurrencySettings::new(Currency::EUR, Locale::DeDe, 0.18),
        }
    }
}

impl RateTable {
    pub fn get(&self, country: Country) -> CurrencySettings {
        match country {
            Country::Br => self.br,
            Country::Us => self.us,
            Country::Eu => self.eu,
        }
    }

    /// Replace a country's rate.
    ///
    /// The base currency is fixed at 1; non-finite or non-positive rates are
    /// rejected. Returns whether the rate was applied.
    pub fn set_rate(&mut self, country: Country, rate: f64) -> bool {
        if !rate.is_finite() || rate <= 0.0 {
            return false;
        }
        match country {
            Country::Br => false,
            Country::Us => {
                self.us.rate = rate;
                true
            }
            Country::Eu => {
                self.eu.rate = rate;
                true
            }
        }
    }

    /// Apply the numeric fields of a quote. Returns whether anything changed.
    pub fn apply_quote(&mut self, quote: &RateQuote) -> bool {
        let usd = quote.usd.is_some_and(|r| self.set_rate(Country::Us, r));
        let eur = quote.eur.is_some_and(|r| self.set_rate(Country::Eu, r));
        usd || eur
    }

    /// The non-base rates as a quote.
    pub fn quote(&self) -> RateQuote {
        RateQuote {
            usd: Some(self.us.rate),
            eur: Some(self.eu.rate),
        }
    }
}

/// Rates for the non-base currencies, as returned by the rate service.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RateQuote {
    #[serde(rename = "USD", default, skip_serializing_if = "Option::is_none")]
    pub usd: Option<f64>,
    #[serde(rename = "EUR", default, skip_serializing_if = "Option::is_none")]
    pub eur: Option<f64>,
}

impl RateQuote {
    pub fn new(usd: f64, eur: f64) -> Self {
        Self {
            usd: Some(usd),
            eur: Some(eur),
        }
    }

    /// Both rates present and finite.
    pub fn is_complete(&self) -> bool {
        matches!((self.usd, self.eur), (Some(u), Some(e)) if u.is_finite() && e.is_finite())
    }
}

/// A quote together with when it was fetched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CachedRates {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub rates: RateQuote,
}

impl CachedRates {
    pub fn new(rates: RateQuote, fetched_at: DateTime<Utc>) -> Self {
        Self {
            timestamp: fetched_at.timestamp_millis(),
            rates,
        }
    }

    /// When the rates were fetched, if the timestamp is valid.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// Whether the entry is younger than `ttl` at `now`. A zero timestamp
    /// counts as missing.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        if self.timestamp <= 0 {
            return false;
        }
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        now.timestamp_millis().saturating_sub(self.timestamp) <= ttl_ms
    }

    /// Fresh and carrying both rates.
    pub fn is_usable(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.is_fresh(now, ttl) && self.rates.is_complete()
    }
}
