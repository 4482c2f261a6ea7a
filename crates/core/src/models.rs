use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily observation: calendar date and closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

impl PriceBar {
    #[must_use]
    pub const fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Daily closing prices for one symbol, strictly increasing by date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    /// Builds a series from raw provider bars.
    ///
    /// Bars are sorted by date, non-finite closes are dropped, and when a date
    /// appears more than once the last bar for it wins.
    pub fn from_bars(symbol: impl Into<String>, bars: impl IntoIterator<Item = PriceBar>) -> Self {
        let mut bars: Vec<PriceBar> = bars.into_iter().filter(|b| b.close.is_finite()).collect();
        // stable sort keeps provider order within a date, so the last one survives dedup
        bars.sort_by_key(|b| b.date);

        let mut deduped: Vec<PriceBar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.date == bar.date => *last = bar,
                _ => deduped.push(bar),
            }
        }

        Self {
            symbol: symbol.into(),
            bars: deduped,
        }
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    #[must_use]
    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }
}

/// A price series row paired with its trailing moving average.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AveragedPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub ma: Option<f64>,
}

/// A row of the working series: the moving average is always defined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub ma: f64,
}

impl WorkingPoint {
    #[must_use]
    pub fn is_below_average(&self) -> bool {
        self.close < self.ma
    }
}

/// The lowest close inside one below-average run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReversalPoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Per-symbol ranking row.
///
/// Serialized with the short keys the dashboard reads (`sym`, `dg`, `gg`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricBundle {
    #[serde(rename = "sym")]
    pub symbol: String,
    /// Calendar days from the latest reversal to the latest observation.
    #[serde(rename = "dg")]
    pub days_since_reversal: i64,
    /// Percent move from the reversal price; `None` when that price is zero.
    #[serde(rename = "gg")]
    pub gain_since_reversal: Option<f64>,
    #[serde(rename = "d1")]
    pub gain_1d: f64,
    #[serde(rename = "d3")]
    pub gain_3d: f64,
    #[serde(rename = "d5")]
    pub gain_5d: f64,
    #[serde(rename = "d20")]
    pub gain_20d: f64,
    #[serde(rename = "rsi")]
    pub oscillator: Option<f64>,
}

/// Plot-ready view of one symbol's working series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub symbol: String,
    pub dates: Vec<NaiveDate>,
    pub prices: Vec<f64>,
    pub ma3: Vec<f64>,
    pub reversals: Vec<ReversalPoint>,
}
