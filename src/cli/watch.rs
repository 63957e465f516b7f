//! Watch command implementation

use crate::config::Config;
use crate::engine::PollRuntime;
use crate::render::ConsoleSink;
use clap::Args;
use std::io::BufRead;

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,

    /// Append redraws instead of clearing the screen
    #[arg(long)]
    pub no_clear: bool,
}

impl WatchArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = super::build_client(config)?;
        tracing::info!(base_url = %client.base_url(), "Watching dashboard");

        let sink = ConsoleSink::stdout()
            .with_color(!self.no_color)
            .with_clear_screen(!self.no_clear);
        let (runtime, handle) = PollRuntime::new(client, sink);
        let task = tokio::spawn(runtime.run());

        // Enter on stdin forces a refresh. A plain thread, so a pending read
        // never holds up runtime shutdown.
        let refresh_handle = handle.clone();
        std::thread::spawn(move || {
            for line in std::io::stdin().lock().lines() {
                if line.is_err() || refresh_handle.blocking_refresh().is_err() {
                    break;
                }
            }
        });

        tokio::signal::ctrl_c().await?;
        tracing::info!("Interrupt received, shutting down");
        handle.shutdown().await?;

        let scheduler = task.await?;
        tracing::info!(
            rows = scheduler.display_set().len(),
            last_success = ?scheduler.last_success(),
            "Watch stopped"
        );
        Ok(())
    }
}
