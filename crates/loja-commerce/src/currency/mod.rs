//! Currency conversion for display.
//!
//! Catalog and cart amounts are always in the base currency (BRL); this
//! module turns them into the shopper's currency using a rate table that can
//! be refreshed from a rate service and cached with a time-to-live.

mod converter;
mod locale;
mod rates;
mod source;

pub use converter::{CurrencyConverter, FormattedPrice, RateStatus};
pub use locale::{format_amount, Country, Locale};
pub use rates::{CachedRates, CurrencySettings, RateQuote, RateTable, RATES_TTL};
pub use source::{parse_rate_response, HttpRateSource, RateSource, DEFAULT_RATES_URL};
