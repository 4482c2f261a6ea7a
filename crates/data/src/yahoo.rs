//! Yahoo Finance chart API client with rate limiting.
//!
//! Fetches daily bars through `/v8/finance/chart/{symbol}` and converts them
//! into a [`PriceSeries`] keyed by the exchange-local calendar date.

use async_trait::async_trait;
use chrono::DateTime;
use governor::{clock::DefaultClock, state::InMemoryState, state::NotKeyed, Quota, RateLimiter};
use reqwest::{Client, StatusCode};
use reversal_core::{PriceBar, PriceProvider, PriceSeries, ProviderConfig, ProviderError};
use serde::Deserialize;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Default Yahoo Finance API host.
pub const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com";

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Daily price source backed by the Yahoo Finance chart endpoint.
pub struct YahooChartProvider {
    /// HTTP client
    http: Client,
    /// Base URL for API
    base_url: String,
    /// Shared across all concurrent scans
    rate_limiter: Arc<DirectRateLimiter>,
}

impl YahooChartProvider {
    /// Creates a provider with the given request quota and timeout.
    ///
    /// # Errors
    /// Returns [`ProviderError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        requests_per_second: u32,
        request_timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, ProviderError> {
        let quota = Quota::per_second(NonZeroU32::new(requests_per_second).unwrap_or(NonZeroU32::MIN));

        let http = Client::builder()
            .timeout(request_timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: YAHOO_CHART_URL.to_string(),
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        })
    }

    /// Creates a provider from the `[provider]` configuration section.
    ///
    /// # Errors
    /// Returns [`ProviderError::Transport`] if the HTTP client cannot be built.
    pub fn from_config(config: &ProviderConfig) -> Result<Self, ProviderError> {
        Ok(Self::new(
            config.requests_per_second,
            config.request_timeout(),
            &config.user_agent,
        )?
        .with_base_url(config.base_url.clone()))
    }

    /// Sets a custom base URL (useful for testing).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_chart(&self, symbol: &str, range: &str) -> Result<ChartResult, ProviderError> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);
        tracing::debug!("GET {} range={}", url, range);

        let response = self
            .http
            .get(&url)
            .query(&[("range", range), ("interval", "1d")])
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ProviderError::not_found(symbol));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: ChartEnvelope = response
            .json()
            .await
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;

        if let Some(error) = envelope.chart.error {
            tracing::debug!("{} chart error: {} {:?}", symbol, error.code, error.description);
            return Err(ProviderError::not_found(symbol));
        }

        envelope
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| ProviderError::not_found(symbol))
    }
}

#[async_trait]
impl PriceProvider for YahooChartProvider {
    async fn fetch(&self, symbol: &str, lookback_days: u32) -> Result<PriceSeries, ProviderError> {
        let range = format!("{lookback_days}d");
        let result = self.fetch_chart(symbol, &range).await?;
        let series = result.into_series(symbol)?;

        if series.is_empty() {
            return Err(ProviderError::not_found(symbol));
        }
        Ok(series)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartApiError>,
}

#[derive(Debug, Deserialize)]
struct ChartApiError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    /// Seconds east of UTC for the listing exchange.
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

impl ChartResult {
    /// Pairs timestamps with closes, preferring the split/dividend-adjusted
    /// column when it lines up with the timestamps.
    fn into_series(self, symbol: &str) -> Result<PriceSeries, ProviderError> {
        let Self {
            meta,
            timestamp,
            indicators,
        } = self;

        let adjusted = indicators
            .adjclose
            .into_iter()
            .next()
            .map(|a| a.adjclose)
            .filter(|closes| closes.len() == timestamp.len());

        let closes = match adjusted {
            Some(closes) => closes,
            None => indicators
                .quote
                .into_iter()
                .next()
                .map(|q| q.close)
                .unwrap_or_default(),
        };

        if closes.len() != timestamp.len() {
            return Err(ProviderError::Malformed(format!(
                "{symbol}: {} timestamps but {} closes",
                timestamp.len(),
                closes.len()
            )));
        }

        let mut bars = Vec::with_capacity(timestamp.len());
        for (ts, close) in timestamp.into_iter().zip(closes) {
            let Some(close) = close else { continue };
            let date = ts
                .checked_add(meta.gmtoffset)
                .and_then(|local| DateTime::from_timestamp(local, 0))
                .ok_or_else(|| {
                    ProviderError::Malformed(format!(
                        "{symbol}: timestamp {ts} with offset {} is out of range",
                        meta.gmtoffset
                    ))
                })?;
            bars.push(PriceBar::new(date.date_naive(), close));
        }

        Ok(PriceSeries::from_bars(symbol, bars))
    }
}
