//! Scripted price provider shared by the scanner tests.

use async_trait::async_trait;
use chrono::{Duration as Days, NaiveDate};
use reversal_core::{PriceBar, PriceProvider, PriceSeries, ProviderError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

enum Script {
    Closes(Vec<f64>),
    Status(u16),
    Stall,
    Panic,
}

#[derive(Default)]
pub struct FixtureProvider {
    scripts: HashMap<String, Script>,
    latency: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_closes(mut self, symbol: &str, closes: &[f64]) -> Self {
        self.scripts.insert(symbol.to_string(), Script::Closes(closes.to_vec()));
        self
    }

    pub fn with_status(mut self, symbol: &str, status: u16) -> Self {
        self.scripts.insert(symbol.to_string(), Script::Status(status));
        self
    }

    /// The fetch for `symbol` never completes.
    pub fn with_stall(mut self, symbol: &str) -> Self {
        self.scripts.insert(symbol.to_string(), Script::Stall);
        self
    }

    pub fn with_panic(mut self, symbol: &str) -> Self {
        self.scripts.insert(symbol.to_string(), Script::Panic);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriceProvider for FixtureProvider {
    async fn fetch(&self, symbol: &str, _lookback_days: u32) -> Result<PriceSeries, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        let _in_flight = InFlight(&self.in_flight);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        match self.scripts.get(symbol) {
            Some(Script::Closes(closes)) => Ok(daily_series(symbol, closes)),
            Some(Script::Status(status)) => Err(ProviderError::Status {
                status: *status,
                body: "scripted failure".to_string(),
            }),
            Some(Script::Stall) => std::future::pending().await,
            Some(Script::Panic) => panic!("scripted panic for {symbol}"),
            None => Err(ProviderError::not_found(symbol)),
        }
    }

    fn name(&self) -> &str {
        "fixture"
    }
}

pub fn daily_series(symbol: &str, closes: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar::new(start + Days::days(i as i64), close));
    PriceSeries::from_bars(symbol, bars)
}

/// `len` closes rising by one from 100, with a drop to 90 at `dip`.
pub fn trending_with_dip(len: usize, dip: usize) -> Vec<f64> {
    (0..len)
        .map(|i| if i == dip { 90.0 } else { 100.0 + i as f64 })
        .collect()
}
