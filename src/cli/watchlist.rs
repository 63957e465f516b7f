//! Watchlist command implementation

use crate::config::Config;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct WatchlistArgs {
    /// Ticker symbols; at least one must remain after trimming
    pub symbols: Vec<String>,

    /// Read symbols from a file, one per line
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

impl WatchlistArgs {
    /// Symbols from the arguments followed by those in the file
    pub async fn collect_symbols(&self) -> anyhow::Result<Vec<String>> {
        let mut symbols = self.symbols.clone();
        if let Some(path) = &self.file {
            let content = tokio::fs::read_to_string(path).await?;
            symbols.extend(content.lines().map(str::to_string));
        }
        Ok(symbols)
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = super::build_client(config)?;
        let symbols = client.update_symbols(self.collect_symbols().await?).await?;
        tracing::info!(symbols = ?symbols, "Watchlist sent");

        super::print_table(&client, !self.no_color).await
    }
}
