//! Render sinks
//!
//! The engine never draws anything itself. It emits [`RenderEvent`]s in order
//! to a [`RenderSink`], which owns whatever output it maintains.

mod console;
mod memory;

pub use console::ConsoleSink;
pub use memory::MemorySink;

use crate::reconcile::RowOp;
use crate::summary::HeaderUpdate;

/// One instruction for the output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    /// Show the loading placeholder and hide the content area.
    /// Only emitted until the first successful load.
    Loading,
    /// First successful load: hide the placeholder, reveal the content
    ContentReady,
    /// Header fragments present in the latest snapshot
    Header(HeaderUpdate),
    /// Keyed row operations for the latest snapshot
    Rows(Vec<RowOp>),
    /// Seconds left until the next poll
    Countdown { remaining: u32 },
    /// Replace the content area with an error indicator
    Error { message: String },
}

/// Destination for render events
pub trait RenderSink {
    fn render(&mut self, event: RenderEvent);
}

impl<S: RenderSink + ?Sized> RenderSink for Box<S> {
    fn render(&mut self, event: RenderEvent) {
        (**self).render(event)
    }
}
