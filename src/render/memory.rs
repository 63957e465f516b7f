//! In-memory sink that records every event

use super::{RenderEvent, RenderSink};
use crate::reconcile::RowOp;

/// Records events in arrival order
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Vec<RenderEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[RenderEvent] {
        &self.events
    }

    /// Drain recorded events
    pub fn take(&mut self) -> Vec<RenderEvent> {
        std::mem::take(&mut self.events)
    }

    /// All row operations, flattened across batches
    pub fn row_ops(&self) -> Vec<&RowOp> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Rows(ops) => Some(ops.iter()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    /// Countdown values in the order they were shown
    pub fn countdowns(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Countdown { remaining } => Some(*remaining),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RenderEvent::Error { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&RenderEvent) -> bool) -> usize {
        self.events.iter().filter(|e| predicate(e)).count()
    }
}

impl RenderSink for MemorySink {
    fn render(&mut self, event: RenderEvent) {
        self.events.push(event);
    }
}
