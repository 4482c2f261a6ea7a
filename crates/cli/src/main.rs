use clap::{Parser, Subcommand};

mod commands;

use commands::{ChartArgs, ScanArgs, ServeArgs, SymbolsCommand};

#[derive(Parser)]
#[command(name = "reversal")]
#[command(about = "MA3 reversal point scanner for daily stock prices", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true, default_value = "config/Config.toml")]
    config: String,

    /// Config profile layered over the base file (reads config/Config.<profile>.toml)
    #[arg(long, global = true, env = "APP_PROFILE")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web API server
    Serve(ServeArgs),
    /// Scan the universe (or the given symbols) and print the ranking
    Scan(ScanArgs),
    /// Show price, MA3 and reversal points for one symbol
    Chart(ChartArgs),
    /// Manage the tracked symbol universe
    #[command(subcommand)]
    Symbols(SymbolsCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = commands::load_config(&cli.config, cli.profile.as_deref())?;

    match cli.command {
        Commands::Serve(args) => commands::run_serve(config, args).await?,
        Commands::Scan(args) => commands::run_scan(config, args).await?,
        Commands::Chart(args) => commands::run_chart(config, args).await?,
        Commands::Symbols(cmd) => commands::run_symbols(config, cmd).await?,
    }

    Ok(())
}
