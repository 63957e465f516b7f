//! Export command implementation

use crate::config::Config;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ExportArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = super::build_client(config)?;
        let snapshot = client.fetch_data().await?;
        let json = snapshot.to_pretty_json();

        match &self.output {
            Some(path) => {
                tokio::fs::write(path, format!("{json}\n")).await?;
                tracing::info!(path = ?path, bytes = json.len(), "Snapshot exported");
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}
