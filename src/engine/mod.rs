//! Incremental sync engine
//!
//! [`Scheduler`] owns the display state and decides when to fetch;
//! [`PollRuntime`] supplies the clock and the network on a tokio task.

mod runtime;
mod scheduler;
mod types;

pub use runtime::{run_once, Control, PollRuntime, RuntimeHandle};
pub use scheduler::Scheduler;
pub use types::{FetchTicket, SchedulerState, POLL_INTERVAL_SECS};
