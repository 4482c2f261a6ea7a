use crate::analysis::SeriesAnalysis;
use reversal_core::{ChartError, ChartSeries, PriceSeries};

/// Projects a price series into plot-ready columns.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartProjector;

impl ChartProjector {
    /// Builds the chart view over the working series.
    ///
    /// # Errors
    /// Returns [`ChartError::NotFound`] when the series is empty.
    pub fn project(series: &PriceSeries) -> Result<ChartSeries, ChartError> {
        if series.is_empty() {
            return Err(ChartError::NotFound);
        }

        let analysis = SeriesAnalysis::new(series);
        let (dates, (prices, ma3)): (Vec<_>, (Vec<_>, Vec<_>)) = analysis
            .working
            .iter()
            .map(|p| (p.date, (p.close, p.ma)))
            .unzip();

        Ok(ChartSeries {
            symbol: series.symbol().to_string(),
            dates,
            prices,
            ma3,
            reversals: analysis.reversals,
        })
    }
}
