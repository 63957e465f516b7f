//! Scheduler state and fetch tickets

/// Seconds between the end of one successful poll and the start of the next
pub const POLL_INTERVAL_SECS: u32 = 30;

/// Lifecycle of the polling loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Not started, or stopped
    Idle,
    /// A fetch is in flight
    Loading,
    /// Latest snapshot rendered. Transient: `on_snapshot` moves on to
    /// `CountingDown` before returning, so callers never observe it.
    Displayed,
    /// Waiting for the next poll
    CountingDown { remaining: u32 },
    /// Last fetch failed. Only `refresh` or `start` leaves this state.
    Error,
}

impl SchedulerState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SchedulerState::Loading)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, SchedulerState::Error)
    }
}

/// Identifies one fetch
///
/// A result is only accepted with the ticket of the fetch currently in
/// flight; anything else is stale and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchTicket(pub(crate) u64);

impl FetchTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for FetchTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
