//! Poll scheduler
//!
//! A timer-free state machine. The owner delivers one `on_tick` per second
//! and performs the fetches the scheduler asks for; results come back through
//! `on_snapshot` / `on_fetch_error` together with the ticket they were issued
//! under.

use super::types::{FetchTicket, SchedulerState, POLL_INTERVAL_SECS};
use crate::reconcile::{DisplaySet, OpCounts, Reconciler};
use crate::render::{RenderEvent, RenderSink};
use crate::snapshot::ReceivedSnapshot;
use crate::summary;
use crate::telemetry::{self, CounterMetric, GaugeMetric, LatencyMetric};
use chrono::{DateTime, Utc};
use std::fmt::Display;
use std::time::Instant;

/// Drives fetches, reconciliation and the countdown for one render sink
pub struct Scheduler<S: RenderSink> {
    sink: S,
    state: SchedulerState,
    reconciler: Reconciler,
    next_ticket: u64,
    in_flight: Option<FetchTicket>,
    loaded: bool,
    last_snapshot: Option<ReceivedSnapshot>,
    last_success: Option<DateTime<Utc>>,
    last_error: Option<String>,
}

impl<S: RenderSink> Scheduler<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            state: SchedulerState::Idle,
            reconciler: Reconciler::new(),
            next_ticket: 0,
            in_flight: None,
            loaded: false,
            last_snapshot: None,
            last_success: None,
            last_error: None,
        }
    }

    /// Begin polling
    ///
    /// Always issues a fetch. Any fetch or countdown from a previous run is
    /// abandoned.
    pub fn start(&mut self) -> FetchTicket {
        if self.in_flight.take().is_some() {
            tracing::debug!("Restart abandons in-flight fetch");
        }
        tracing::info!(loaded = self.loaded, "Starting poll loop");
        self.begin_fetch()
    }

    /// Stop polling
    ///
    /// Cancels the countdown and orphans any in-flight fetch. Cached data and
    /// the display set are kept.
    pub fn stop(&mut self) {
        if let Some(ticket) = self.in_flight.take() {
            tracing::debug!(ticket = %ticket, "Stop orphans in-flight fetch");
        }
        self.state = SchedulerState::Idle;
        tracing::info!("Poll loop stopped");
    }

    /// Manual refresh
    ///
    /// Returns `None` while a fetch is already in flight.
    pub fn refresh(&mut self) -> Option<FetchTicket> {
        if let Some(ticket) = self.in_flight {
            tracing::debug!(ticket = %ticket, "Refresh ignored, fetch in flight");
            return None;
        }
        Some(self.begin_fetch())
    }

    /// One second elapsed
    ///
    /// Decrements the countdown. When it reaches zero the next fetch is
    /// issued. Outside `CountingDown` a tick does nothing.
    pub fn on_tick(&mut self) -> Option<FetchTicket> {
        let SchedulerState::CountingDown { remaining } = self.state else {
            return None;
        };

        let remaining = remaining.saturating_sub(1);
        self.state = SchedulerState::CountingDown { remaining };
        self.sink.render(RenderEvent::Countdown { remaining });

        if remaining == 0 {
            return Some(self.begin_fetch());
        }
        None
    }

    /// Fetch succeeded
    ///
    /// Returns `false` when the ticket is stale and the snapshot was dropped.
    pub fn on_snapshot(&mut self, ticket: FetchTicket, snapshot: ReceivedSnapshot) -> bool {
        if !self.accept(ticket) {
            return false;
        }

        let started = Instant::now();
        if !self.loaded {
            self.loaded = true;
            self.sink.render(RenderEvent::ContentReady);
        }

        let header = summary::project(snapshot.view());
        if !header.is_empty() {
            self.sink.render(RenderEvent::Header(header));
        }

        let ops = self.reconciler.apply(snapshot.instruments());
        let counts = OpCounts::of(&ops);
        self.sink.render(RenderEvent::Rows(ops));
        self.state = SchedulerState::Displayed;
        telemetry::record_latency(LatencyMetric::Reconcile, started.elapsed());

        tracing::info!(
            ticket = %ticket,
            rows = self.reconciler.len(),
            removed = counts.removed,
            updated = counts.updated,
            unchanged = counts.unchanged,
            inserted = counts.inserted,
            "Snapshot applied"
        );

        self.last_success = Some(snapshot.received_at());
        self.last_snapshot = Some(snapshot);
        self.last_error = None;

        telemetry::increment(CounterMetric::PollsCompleted, 1);
        telemetry::increment(CounterMetric::RowsInserted, counts.inserted as u64);
        telemetry::increment(CounterMetric::RowsRemoved, counts.removed as u64);
        telemetry::set_gauge(GaugeMetric::DisplayedRows, self.reconciler.len() as f64);
        if let Some(at) = self.last_success {
            telemetry::set_gauge(GaugeMetric::LastSuccess, at.timestamp() as f64);
        }

        self.start_countdown();
        true
    }

    /// Fetch failed
    ///
    /// Enters `Error` with no countdown. Cached snapshot and display set are
    /// left untouched. Returns `false` for a stale ticket.
    pub fn on_fetch_error(&mut self, ticket: FetchTicket, error: impl Display) -> bool {
        if !self.accept(ticket) {
            return false;
        }

        let message = error.to_string();
        tracing::warn!(ticket = %ticket, error = %message, "Fetch failed");
        telemetry::increment(CounterMetric::PollsFailed, 1);

        self.state = SchedulerState::Error;
        self.sink.render(RenderEvent::Error {
            message: message.clone(),
        });
        self.last_error = Some(message);
        true
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_counting_down(&self) -> bool {
        matches!(self.state, SchedulerState::CountingDown { .. })
    }

    pub fn in_flight(&self) -> Option<FetchTicket> {
        self.in_flight
    }

    /// Whether any load has succeeded yet
    pub fn has_loaded(&self) -> bool {
        self.loaded
    }

    pub fn display_set(&self) -> DisplaySet {
        self.reconciler.display_set()
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Most recent successfully applied snapshot
    pub fn last_snapshot(&self) -> Option<&ReceivedSnapshot> {
        self.last_snapshot.as_ref()
    }

    pub fn last_success(&self) -> Option<DateTime<Utc>> {
        self.last_success
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn begin_fetch(&mut self) -> FetchTicket {
        self.next_ticket += 1;
        let ticket = FetchTicket(self.next_ticket);
        self.in_flight = Some(ticket);
        self.state = SchedulerState::Loading;

        if !self.loaded {
            self.sink.render(RenderEvent::Loading);
        }
        tracing::debug!(ticket = %ticket, "Fetch issued");
        ticket
    }

    fn accept(&mut self, ticket: FetchTicket) -> bool {
        if self.in_flight != Some(ticket) {
            tracing::debug!(ticket = %ticket, "Dropping stale fetch result");
            telemetry::increment(CounterMetric::StaleResults, 1);
            return false;
        }
        self.in_flight = None;
        true
    }

    fn start_countdown(&mut self) {
        self.state = SchedulerState::CountingDown {
            remaining: POLL_INTERVAL_SECS,
        };
        self.sink.render(RenderEvent::Countdown {
            remaining: POLL_INTERVAL_SECS,
        });
    }
}
