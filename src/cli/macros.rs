//! Macros command implementation

use crate::client::MacroConfig;
use crate::config::Config;
use clap::Args;

#[derive(Args, Debug)]
pub struct MacrosArgs {
    /// Broad market proxy
    #[arg(long, default_value = "")]
    pub market: String,

    /// Volatility proxy
    #[arg(long, default_value = "")]
    pub volatility: String,

    /// Bond proxy
    #[arg(long, default_value = "")]
    pub bonds: String,

    /// Dollar proxy
    #[arg(long, default_value = "")]
    pub dollar: String,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,
}

impl MacrosArgs {
    /// Omitted fields fall back to the default proxies once normalized
    pub fn macro_config(&self) -> MacroConfig {
        MacroConfig {
            market: self.market.clone(),
            volatility: self.volatility.clone(),
            bonds: self.bonds.clone(),
            dollar: self.dollar.clone(),
        }
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let client = super::build_client(config)?;
        client.update_macros(&self.macro_config()).await?;
        super::print_table(&client, !self.no_color).await
    }
}
