//! CLI interface for momentum-board
//!
//! Provides subcommands for:
//! - `watch`: Live dashboard, refreshed every 30 seconds
//! - `export`: Dump the raw snapshot as pretty JSON
//! - `watchlist`: Replace the server's watchlist
//! - `macros`: Replace the macro proxy symbols
//! - `reset-cache`: Clear the server's quote cache
//! - `config`: Show the effective configuration

mod export;
mod macros;
mod watch;
mod watchlist;

pub use export::ExportArgs;
pub use macros::MacrosArgs;
pub use watch::WatchArgs;
pub use watchlist::WatchlistArgs;

use crate::client::DashboardClient;
use crate::config::Config;
use crate::engine;
use crate::render::ConsoleSink;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "momentum-board")]
#[command(about = "Live momentum dashboard for a watchlist of tickers")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Live dashboard
    Watch(WatchArgs),
    /// Print the raw snapshot
    Export(ExportArgs),
    /// Replace the watchlist
    ///
    /// An empty list is rejected here, although the server itself would
    /// accept `[]` and clear the watchlist.
    Watchlist(WatchlistArgs),
    /// Replace the macro proxy symbols
    Macros(MacrosArgs),
    /// Clear the server's quote cache
    ResetCache,
    /// Show configuration
    Config,
}

pub fn build_client(config: &Config) -> anyhow::Result<DashboardClient> {
    Ok(DashboardClient::with_config(
        config.client.to_dashboard_config(),
    )?)
}

/// Fetch once and print the table, without a countdown
pub async fn print_table(client: &DashboardClient, color: bool) -> anyhow::Result<()> {
    let sink = ConsoleSink::stdout()
        .with_color(color)
        .with_countdown(false);
    let scheduler = engine::run_once(client, sink).await?;
    tracing::debug!(rows = scheduler.display_set().len(), "Table printed");
    Ok(())
}
