//! Concurrent fan-out over the symbol universe.
//!
//! Every symbol is evaluated in its own task. A semaphore bounds how many
//! evaluations are in flight, each evaluation has its own deadline, and the
//! aggregating task is the only writer of the result list. A failing symbol
//! is logged and omitted; it never aborts the scan.

use crate::error::EvaluationError;
use crate::evaluate::evaluate_symbol;
use reversal_core::config::{ProviderConfig, ScanConfig};
use reversal_core::{MetricBundle, PriceProvider};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Limits applied to one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPolicy {
    pub max_concurrency: usize,
    pub per_symbol_timeout: Duration,
    pub lookback_days: u32,
    pub min_observations: usize,
}

impl ScanPolicy {
    #[must_use]
    pub fn from_config(scan: &ScanConfig, provider: &ProviderConfig) -> Self {
        Self {
            max_concurrency: scan.max_concurrency,
            per_symbol_timeout: scan.per_symbol_timeout(),
            lookback_days: provider.lookback_days,
            min_observations: scan.min_observations,
        }
    }
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self::from_config(&ScanConfig::default(), &ProviderConfig::default())
    }
}

/// Why a symbol is missing from the ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Omission {
    /// History was usable but holds no reversal point.
    NoSignal,
    Failed(String),
    TimedOut,
}

impl fmt::Display for Omission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSignal => write!(f, "no signal"),
            Self::Failed(reason) => write!(f, "failed: {reason}"),
            Self::TimedOut => write!(f, "timed out"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmittedSymbol {
    pub symbol: String,
    pub reason: Omission,
}

/// Outcome of a scan: the ranked rows plus an account of every other symbol.
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    /// Ascending by days since reversal, ties by symbol.
    pub results: Vec<MetricBundle>,
    /// Sorted by symbol.
    pub omitted: Vec<OmittedSymbol>,
    pub elapsed: Duration,
}

impl ScanReport {
    #[must_use]
    pub fn scanned(&self) -> usize {
        self.results.len() + self.omitted.len()
    }
}

pub struct Aggregator {
    provider: Arc<dyn PriceProvider>,
    policy: ScanPolicy,
}

impl Aggregator {
    #[must_use]
    pub fn new(provider: Arc<dyn PriceProvider>, policy: ScanPolicy) -> Self {
        Self { provider, policy }
    }

    #[must_use]
    pub const fn policy(&self) -> &ScanPolicy {
        &self.policy
    }

    /// Ranked metric rows for `universe`.
    pub async fn aggregate(&self, universe: &[String]) -> Vec<MetricBundle> {
        self.scan(universe).await.results
    }

    /// Evaluates every symbol in `universe` and returns once each task has
    /// completed, failed, or timed out.
    pub async fn scan(&self, universe: &[String]) -> ScanReport {
        let started = Instant::now();

        if universe.is_empty() {
            info!("Symbol universe is empty, nothing to scan");
            return ScanReport::default();
        }

        info!(
            "Scanning {} symbols via {} (concurrency {}, timeout {:?})",
            universe.len(),
            self.provider.name(),
            self.policy.max_concurrency,
            self.policy.per_symbol_timeout
        );

        let semaphore = Arc::new(Semaphore::new(self.policy.max_concurrency.max(1)));
        let mut tasks = JoinSet::new();
        let mut symbols_by_task = HashMap::with_capacity(universe.len());

        for symbol in universe {
            let provider = Arc::clone(&self.provider);
            let semaphore = Arc::clone(&semaphore);
            let policy = self.policy.clone();
            let task_symbol = symbol.clone();

            let handle = tasks.spawn(async move {
                let outcome = evaluate_with_permit(provider, semaphore, &task_symbol, &policy).await;
                (task_symbol, outcome)
            });
            symbols_by_task.insert(handle.id(), symbol.clone());
        }

        let mut report = ScanReport::default();

        while let Some(joined) = tasks.join_next().await {
            let (symbol, outcome) = match joined {
                Ok(finished) => finished,
                Err(e) => {
                    let symbol = symbols_by_task
                        .get(&e.id())
                        .cloned()
                        .unwrap_or_else(|| "<unknown>".to_string());
                    (symbol, Err(EvaluationError::TaskFailed(e.to_string())))
                }
            };

            match outcome {
                Ok(Some(bundle)) => {
                    info!(
                        "{symbol}: {} days since reversal, oscillator {:?}",
                        bundle.days_since_reversal, bundle.oscillator
                    );
                    report.results.push(bundle);
                }
                Ok(None) => {
                    info!("{symbol}: no reversal signal");
                    report.omitted.push(OmittedSymbol {
                        symbol,
                        reason: Omission::NoSignal,
                    });
                }
                Err(EvaluationError::TimedOut(after)) => {
                    warn!("{symbol}: evaluation timed out after {after:?}");
                    report.omitted.push(OmittedSymbol {
                        symbol,
                        reason: Omission::TimedOut,
                    });
                }
                Err(e @ EvaluationError::TaskFailed(_)) => {
                    error!("{symbol}: {e}");
                    report.omitted.push(OmittedSymbol {
                        symbol,
                        reason: Omission::Failed(e.to_string()),
                    });
                }
                Err(e) => {
                    warn!("{symbol}: {e}");
                    report.omitted.push(OmittedSymbol {
                        symbol,
                        reason: Omission::Failed(e.to_string()),
                    });
                }
            }
        }

        rank(&mut report.results);
        report.omitted.sort_by(|a, b| a.symbol.cmp(&b.symbol));
        report.elapsed = started.elapsed();

        info!(
            "Scan finished in {:?}: {} ranked, {} omitted",
            report.elapsed,
            report.results.len(),
            report.omitted.len()
        );

        report
    }
}

async fn evaluate_with_permit(
    provider: Arc<dyn PriceProvider>,
    semaphore: Arc<Semaphore>,
    symbol: &str,
    policy: &ScanPolicy,
) -> Result<Option<MetricBundle>, EvaluationError> {
    let _permit = semaphore
        .acquire_owned()
        .await
        .map_err(|e| EvaluationError::TaskFailed(e.to_string()))?;

    // Deadline starts once the permit is held; time spent queued does not count.
    let evaluation = evaluate_symbol(
        provider.as_ref(),
        symbol,
        policy.lookback_days,
        policy.min_observations,
    );
    tokio::time::timeout(policy.per_symbol_timeout, evaluation)
        .await
        .unwrap_or(Err(EvaluationError::TimedOut(policy.per_symbol_timeout)))
}

/// Orders rows by days since reversal, then symbol.
pub fn rank(results: &mut [MetricBundle]) {
    results.sort_by(|a, b| {
        a.days_since_reversal
            .cmp(&b.days_since_reversal)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });
}
