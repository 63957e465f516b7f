use clap::Parser;
use momentum_board::cli::{build_client, Cli, Commands};
use momentum_board::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from {}: {}", cli.config, e);
        eprintln!("Using default configuration");
        Config::default()
    });

    // Initialize telemetry
    let _telemetry = momentum_board::telemetry::init_telemetry(&config.telemetry)?;

    match cli.command {
        Commands::Watch(args) => {
            tracing::info!("Starting live dashboard");
            args.execute(&config).await?;
        }
        Commands::Export(args) => {
            args.execute(&config).await?;
        }
        Commands::Watchlist(args) => {
            args.execute(&config).await?;
        }
        Commands::Macros(args) => {
            args.execute(&config).await?;
        }
        Commands::ResetCache => {
            build_client(&config)?.reset_cache().await?;
            println!("Server cache cleared");
        }
        Commands::Config => {
            println!("Current configuration:");
            println!("  Server: {}", config.client.base_url);
            println!("  Timeout: {}s", config.client.timeout_secs);
            println!(
                "  Poll interval: {}s (fixed)",
                momentum_board::engine::POLL_INTERVAL_SECS
            );
            println!(
                "  Logging: {} ({:?})",
                config.telemetry.log_level, config.telemetry.log_format
            );
            match config.telemetry.metrics_port {
                Some(port) => println!("  Metrics: port {}", port),
                None => println!("  Metrics: disabled"),
            }
        }
    }

    Ok(())
}
