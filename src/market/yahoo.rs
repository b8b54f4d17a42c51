//! Yahoo Finance chart API client
//!
//! Uses the public v8 chart endpoint for both spot quotes and daily
//! history. Quotes come from the chart metadata, candles from the quote
//! indicator arrays (which carry nulls on holidays; those rows are
//! dropped).

use chrono::DateTime;
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use super::{Candle, HistoryRange, PriceError, PriceSource};
use async_trait::async_trait;

const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
const USER_AGENT: &str = concat!("papertrade/", env!("CARGO_PKG_VERSION"));

/// Live price source backed by Yahoo Finance
pub struct YahooFinanceSource {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

#[derive(Debug, Deserialize, Default)]
struct QuoteBlock {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

impl YahooFinanceSource {
    /// Create a client against the public Yahoo endpoint
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client with a custom endpoint (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch_chart(
        &self,
        ticker: &str,
        range: &str,
    ) -> Result<ChartResult, PriceError> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);
        debug!(%url, range, "Fetching chart data");

        let response = self
            .client
            .get(&url)
            .query(&[("interval", "1d"), ("range", range)])
            .send()
            .await
            .map_err(|e| PriceError::unavailable(ticker, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PriceError::unavailable(
                ticker,
                format!("endpoint returned status {}", status),
            ));
        }

        let parsed: ChartResponse = response
            .json()
            .await
            .map_err(|e| PriceError::unavailable(ticker, e.to_string()))?;

        if let Some(error) = parsed.chart.error {
            if !error.is_null() {
                return Err(PriceError::unavailable(ticker, error.to_string()));
            }
        }

        parsed
            .chart
            .result
            .and_then(|mut results| {
                if results.is_empty() {
                    None
                } else {
                    Some(results.remove(0))
                }
            })
            .ok_or_else(|| PriceError::unavailable(ticker, "empty chart result"))
    }
}

impl Default for YahooFinanceSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSource for YahooFinanceSource {
    async fn current_price(&self, ticker: &str) -> Result<Decimal, PriceError> {
        let result = self.fetch_chart(ticker, "1d").await?;

        let price = result
            .meta
            .regular_market_price
            .ok_or_else(|| PriceError::unavailable(ticker, "no market price in response"))?;

        decimal_from(price, ticker)
    }

    async fn daily_history(
        &self,
        ticker: &str,
        range: HistoryRange,
    ) -> Result<Vec<Candle>, PriceError> {
        let result = self.fetch_chart(ticker, range.as_str()).await?;

        let quote = result
            .indicators
            .quote
            .into_iter()
            .next()
            .unwrap_or_default();

        let mut candles = Vec::with_capacity(result.timestamp.len());
        for (i, ts) in result.timestamp.iter().enumerate() {
            let date = match DateTime::from_timestamp(*ts, 0) {
                Some(dt) => dt.date_naive(),
                None => continue,
            };
            // Holiday rows carry nulls; skip the whole candle
            let (open, high, low, close) = match (
                value_at(&quote.open, i),
                value_at(&quote.high, i),
                value_at(&quote.low, i),
                value_at(&quote.close, i),
            ) {
                (Some(o), Some(h), Some(l), Some(c)) => (o, h, l, c),
                _ => continue,
            };

            candles.push(Candle {
                date,
                open: decimal_from(open, ticker)?,
                high: decimal_from(high, ticker)?,
                low: decimal_from(low, ticker)?,
                close: decimal_from(close, ticker)?,
                volume: quote.volume.get(i).copied().flatten().unwrap_or(0),
            });
        }

        if candles.is_empty() {
            return Err(PriceError::unavailable(ticker, "no candles in range"));
        }

        Ok(candles)
    }
}

fn value_at(values: &[Option<f64>], index: usize) -> Option<f64> {
    values.get(index).copied().flatten()
}

fn decimal_from(value: f64, ticker: &str) -> Result<Decimal, PriceError> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(4))
        .ok_or_else(|| PriceError::unavailable(ticker, format!("unrepresentable price {}", value)))
}
