//! Data source for snapshots
//!
//! [`SnapshotSource`] is the seam between the engine and the network; the
//! runtime only ever talks to the trait.

mod http;
mod settings;
mod types;

pub use http::{DashboardClient, DashboardConfig, DEFAULT_BASE_URL};
pub use settings::{normalize_symbol, normalize_symbols, MacroConfig, SettingsError};
pub use types::ClientError;

use crate::snapshot::ReceivedSnapshot;
use async_trait::async_trait;

/// Anything that can produce the current snapshot
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch_snapshot(&self) -> Result<ReceivedSnapshot, ClientError>;
}

#[async_trait]
impl<T: SnapshotSource + ?Sized> SnapshotSource for std::sync::Arc<T> {
    async fn fetch_snapshot(&self) -> Result<ReceivedSnapshot, ClientError> {
        (**self).fetch_snapshot().await
    }
}
