use anyhow::Result;
use clap::Subcommand;
use reversal_core::AppConfig;

#[derive(Subcommand, Debug, Clone)]
pub enum SymbolsCommand {
    /// List tracked symbols
    List,
    /// Validate a symbol against the price provider and start tracking it
    Add {
        symbol: String,
    },
    /// Stop tracking a symbol
    Remove {
        symbol: String,
    },
}

/// # Errors
/// Returns an error if the symbol is rejected or the store fails.
pub async fn run_symbols(config: AppConfig, cmd: SymbolsCommand) -> Result<()> {
    let service = super::build_service(&config).await?;

    match cmd {
        SymbolsCommand::List => {
            let symbols = service.list_symbols().await?;
            for symbol in &symbols {
                println!("{symbol}");
            }
            eprintln!("{} symbols", symbols.len());
        }
        SymbolsCommand::Add { symbol } => {
            let change = service.add_symbol(&symbol).await?;
            println!("Added {} ({} symbols)", change.symbol, change.count);
        }
        SymbolsCommand::Remove { symbol } => {
            let change = service.remove_symbol(&symbol).await?;
            println!("Removed {} ({} symbols)", change.symbol, change.count);
        }
    }

    Ok(())
}
