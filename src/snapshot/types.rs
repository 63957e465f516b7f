//! Snapshot payload types
//!
//! Every field is decoded leniently: a wrong JSON shape degrades to "absent"
//! instead of failing the whole payload.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Typed view over one `/data` payload
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Snapshot {
    /// Opaque display timestamp
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
    /// Market session token (source-defined)
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    /// Macro indicator blocks
    #[serde(default, deserialize_with = "lenient_object")]
    pub summary: Option<Summary>,
    /// Instrument rows in display order
    #[serde(default, deserialize_with = "lenient_tickers")]
    pub tickers: Option<Vec<Instrument>>,
}

impl Snapshot {
    /// Instruments of this snapshot, empty when the section is absent
    pub fn instruments(&self) -> &[Instrument] {
        self.tickers.as_deref().unwrap_or(&[])
    }
}

/// Named indicator blocks shown above the table
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Summary {
    #[serde(default, deserialize_with = "lenient_object")]
    pub bond_yields: Option<IndicatorBlock>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub us_dollar: Option<IndicatorBlock>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub market_fear: Option<IndicatorBlock>,
}

/// One indicator block; each field updates its own fragment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorBlock {
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub tag: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
}

/// One instrument row as sent by the backend
///
/// Numeric fields stay raw JSON; they are interpreted only by the formatter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Instrument {
    #[serde(default, deserialize_with = "lenient_string")]
    pub ticker: Option<String>,
    #[serde(default)]
    pub price: Value,
    #[serde(default)]
    pub gap_percent: Value,
    #[serde(default)]
    pub volume: Value,
    #[serde(default)]
    pub atr_percent: Value,
    #[serde(default)]
    pub rsi: Value,
    #[serde(default)]
    pub vwap: Value,
    #[serde(default, deserialize_with = "lenient_string")]
    pub trend: Option<String>,
    #[serde(default)]
    pub score: Value,
}

impl Instrument {
    /// Row key, if the record carries a usable ticker
    pub fn key(&self) -> Option<&str> {
        self.ticker.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Market session derived from the snapshot status token
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MarketSession {
    PreMarket,
    Open,
    AfterHours,
    Closed,
    /// Token this client does not know; still rendered verbatim
    Other(String),
}

impl MarketSession {
    /// Map a status token onto a session
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_uppercase().replace('_', "-").as_str() {
            "PRE-MARKET" => MarketSession::PreMarket,
            "OPEN" => MarketSession::Open,
            "AFTER-HOURS" => MarketSession::AfterHours,
            "CLOSED" => MarketSession::Closed,
            _ => MarketSession::Other(token.to_string()),
        }
    }

    /// Style class for a status token: `status-` + lowercase, `_` as `-`
    pub fn style_class(token: &str) -> String {
        format!("status-{}", token.trim().to_lowercase().replace('_', "-"))
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(object_or_none(Value::deserialize(deserializer)?))
}

fn lenient_tickers<'de, D>(deserializer: D) -> Result<Option<Vec<Instrument>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => {
            let total = items.len();
            let instruments: Vec<Instrument> =
                items.into_iter().filter_map(object_or_none).collect();
            if instruments.len() < total {
                tracing::warn!(
                    skipped = total - instruments.len(),
                    "Ignoring non-object entries in tickers"
                );
            }
            Ok(Some(instruments))
        }
        _ => Ok(None),
    }
}

/// Decode `value` as `T` only when it is a JSON object
fn object_or_none<T: DeserializeOwned>(value: Value) -> Option<T> {
    if value.is_object() {
        serde_json::from_value(value).ok()
    } else {
        None
    }
}
