//! Watchlist and macro settings pushed to the server

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MARKET: &str = "SPY";
pub const DEFAULT_VOLATILITY: &str = "VXX";
pub const DEFAULT_BONDS: &str = "IEF";
pub const DEFAULT_DOLLAR: &str = "UUP";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("watchlist is empty after normalization")]
    EmptyWatchlist,
}

/// Trim, uppercase and drop empty entries, keeping order
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let symbol = raw.trim().to_uppercase();
    (!symbol.is_empty()).then_some(symbol)
}

/// Normalize a watchlist; an empty result is rejected
pub fn normalize_symbols<I, S>(raw: I) -> Result<Vec<String>, SettingsError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let symbols: Vec<String> = raw
        .into_iter()
        .filter_map(|s| normalize_symbol(s.as_ref()))
        .collect();

    if symbols.is_empty() {
        return Err(SettingsError::EmptyWatchlist);
    }
    Ok(symbols)
}

/// Proxy symbols the server uses for the header indicators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroConfig {
    pub market: String,
    pub volatility: String,
    pub bonds: String,
    pub dollar: String,
}

impl Default for MacroConfig {
    fn default() -> Self {
        Self {
            market: DEFAULT_MARKET.to_string(),
            volatility: DEFAULT_VOLATILITY.to_string(),
            bonds: DEFAULT_BONDS.to_string(),
            dollar: DEFAULT_DOLLAR.to_string(),
        }
    }
}

impl MacroConfig {
    /// Normalize every field; blank fields fall back to their default symbol
    pub fn normalized(&self) -> Self {
        let pick = |raw: &str, default: &str| {
            normalize_symbol(raw).unwrap_or_else(|| default.to_string())
        };
        Self {
            market: pick(&self.market, DEFAULT_MARKET),
            volatility: pick(&self.volatility, DEFAULT_VOLATILITY),
            bonds: pick(&self.bonds, DEFAULT_BONDS),
            dollar: pick(&self.dollar, DEFAULT_DOLLAR),
        }
    }
}
