//! Snapshot model
//!
//! A snapshot is kept twice: the verbatim JSON body (for export) and a
//! lenient typed view (for reconciliation and the summary header).

mod types;

pub use types::{IndicatorBlock, Instrument, MarketSession, Snapshot, Summary};

use chrono::{DateTime, Utc};
use serde_json::Value;

/// A snapshot as received from the data source
#[derive(Debug, Clone)]
pub struct ReceivedSnapshot {
    /// Body exactly as decoded, key order preserved
    raw: Value,
    /// Typed view over `raw`
    view: Snapshot,
    /// Local receive time
    received_at: DateTime<Utc>,
}

impl ReceivedSnapshot {
    /// Decode a response body
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: Value = serde_json::from_slice(body)?;
        Self::from_value(raw)
    }

    /// Build from an already decoded JSON value
    ///
    /// The top level must be an object; everything below it degrades leniently.
    pub fn from_value(raw: Value) -> Result<Self, serde_json::Error> {
        if !raw.is_object() {
            return Err(<serde_json::Error as serde::de::Error>::custom(
                "snapshot body must be a JSON object",
            ));
        }
        let view: Snapshot = serde_json::from_value(raw.clone())?;
        Ok(Self {
            raw,
            view,
            received_at: Utc::now(),
        })
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn view(&self) -> &Snapshot {
        &self.view
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Instruments in snapshot order (empty when `tickers` is absent)
    pub fn instruments(&self) -> &[Instrument] {
        self.view.instruments()
    }

    /// Raw body pretty-printed with two-space indentation
    pub fn to_pretty_json(&self) -> String {
        // Serializing a `Value` cannot fail
        serde_json::to_string_pretty(&self.raw).unwrap_or_default()
    }
}
