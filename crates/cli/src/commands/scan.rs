use anyhow::{Context, Result};
use clap::Args;
use reversal_core::{normalize_symbol, AppConfig, MetricBundle};
use reversal_scanner::ScanReport;
use std::fmt::Write;

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Comma-separated symbols to scan instead of the tracked universe
    #[arg(long, value_delimiter = ',')]
    pub symbols: Vec<String>,

    /// Print the ranked rows as JSON
    #[arg(long)]
    pub json: bool,
}

/// Runs a one-off scan and prints the ranking.
///
/// # Errors
/// Returns an error if a given symbol is malformed or the universe cannot be listed.
pub async fn run_scan(config: AppConfig, args: ScanArgs) -> Result<()> {
    let service = super::build_service(&config).await?;

    let report = if args.symbols.is_empty() {
        service.scan().await.context("Failed to scan symbol universe")?
    } else {
        let mut universe = args
            .symbols
            .iter()
            .map(|s| normalize_symbol(s))
            .collect::<Result<Vec<_>, _>>()?;
        universe.sort();
        universe.dedup();
        tracing::info!("Scanning {} symbols given on the command line", universe.len());
        service.aggregator().scan(&universe).await
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report.results)?);
    } else {
        print!("{}", format_report(&report));
    }

    Ok(())
}

fn opt(value: Option<f64>, dp: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{v:.dp$}"))
}

fn row(bundle: &MetricBundle) -> String {
    format!(
        "{:<8} {:>5} {:>10} {:>8.2} {:>8.2} {:>8.2} {:>8.2} {:>6}",
        bundle.symbol,
        bundle.days_since_reversal,
        opt(bundle.gain_since_reversal, 2),
        bundle.gain_1d,
        bundle.gain_3d,
        bundle.gain_5d,
        bundle.gain_20d,
        opt(bundle.oscillator, 1),
    )
}

pub fn format_report(report: &ScanReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<8} {:>5} {:>10} {:>8} {:>8} {:>8} {:>8} {:>6}",
        "Symbol", "Days", "Since Rev", "1D %", "3D %", "5D %", "20D %", "RSI"
    );
    let _ = writeln!(out, "{}", "-".repeat(70));
    for bundle in &report.results {
        let _ = writeln!(out, "{}", row(bundle));
    }

    if !report.omitted.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Omitted:");
        for omitted in &report.omitted {
            let _ = writeln!(out, "  {:<8} {}", omitted.symbol, omitted.reason);
        }
    }

    let _ = writeln!(
        out,
        "\n{} ranked of {} scanned in {:.1}s",
        report.results.len(),
        report.scanned(),
        report.elapsed.as_secs_f64()
    );
    out
}
