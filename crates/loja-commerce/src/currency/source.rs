//! Exchange-rate sources.

use async_trait::async_trait;
use loja_data::FetchClient;
use serde_json::Value;

use crate::currency::RateQuote;
use crate::error::RateError;

/// Public rate service queried for BRL -> USD/EUR.
pub const DEFAULT_RATES_URL: &str = "https://api.exchangerate.host/latest?base=BRL&symbols=USD,EUR";

/// A supplier of fresh exchange rates.
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch(&self) -> Result<RateQuote, RateError>;
}

/// Rates fetched from an HTTP endpoint.
#[derive(Debug, Clone)]
pub struct HttpRateSource {
    client: FetchClient,
    url: String,
}

impl Default for HttpRateSource {
    fn default() -> Self {
        Self::new(DEFAULT_RATES_URL)
    }
}

impl HttpRateSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(FetchClient::new(), url)
    }

    pub fn with_client(client: FetchClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch(&self) -> Result<RateQuote, RateError> {
        let body: Value = self
            .client
            .get(self.url.as_str())
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?
            .json()?;
        parse_rate_response(&body)
    }
}

/// Extract USD/EUR from a rate response.
///
/// Rates are read from the `rates` object when there is one, otherwise from
/// the top level. Only numeric fields count; a response with neither rate is
/// malformed.
pub fn parse_rate_response(body: &Value) -> Result<RateQuote, RateError> {
    let rates = match body.get("rates") {
        Some(Value::Object(map)) => map,
        _ => body
            .as_object()
            .ok_or_else(|| RateError::Malformed("expected a JSON object".to_string()))?,
    };

    let quote = RateQuote {
        usd: rates.get("USD").and_then(Value::as_f64),
        eur: rates.get("EUR").and_then(Value::as_f64),
    };

    if quote.usd.is_none() && quote.eur.is_none() {
        return Err(RateError::Malformed(
            "no numeric USD or EUR rate".to_string(),
        ));
    }
    Ok(quote)
}
