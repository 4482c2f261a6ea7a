use anyhow::Result;
use clap::Args;
use reversal_core::{AppConfig, ChartSeries};
use std::collections::HashSet;
use std::fmt::Write;

#[derive(Args, Debug, Clone)]
pub struct ChartArgs {
    /// Ticker symbol, e.g. AAPL
    pub symbol: String,

    /// Print the chart series as JSON
    #[arg(long)]
    pub json: bool,
}

/// # Errors
/// Returns an error if the symbol is malformed or has no data.
pub async fn run_chart(config: AppConfig, args: ChartArgs) -> Result<()> {
    let service = super::build_service(&config).await?;
    let chart = service.chart(&args.symbol).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&chart)?);
    } else {
        print!("{}", format_chart(&chart));
    }

    Ok(())
}

/// One line per working day; reversal days are marked with `<`.
pub fn format_chart(chart: &ChartSeries) -> String {
    let reversal_dates: HashSet<_> = chart.reversals.iter().map(|r| r.date).collect();
    let mut out = String::new();

    let _ = writeln!(out, "{} ({} days, {} reversals)", chart.symbol, chart.dates.len(), chart.reversals.len());
    let _ = writeln!(out, "{:<12} {:>10} {:>10}", "Date", "Close", "MA3");
    for ((date, price), ma) in chart.dates.iter().zip(&chart.prices).zip(&chart.ma3) {
        let marker = if reversal_dates.contains(date) { " <" } else { "" };
        let _ = writeln!(out, "{:<12} {:>10.2} {:>10.2}{}", date.to_string(), price, ma, marker);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use reversal_core::ReversalPoint;

    #[test]
    fn marks_reversal_days() {
        let d = |day| NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        let chart = ChartSeries {
            symbol: "AMD".to_string(),
            dates: vec![d(3), d(4), d(5)],
            prices: vec![10.0, 8.0, 9.5],
            ma3: vec![10.5, 9.25, 9.1667],
            reversals: vec![ReversalPoint {
                date: d(4),
                price: 8.0,
            }],
        };

        let text = format_chart(&chart);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "AMD (3 days, 1 reversals)");
        assert!(lines[2].starts_with("2024-06-03"));
        assert!(!lines[2].ends_with('<'));
        assert!(lines[3].ends_with("9.25 <"));
        assert!(lines[4].ends_with("9.17"));
    }
}
