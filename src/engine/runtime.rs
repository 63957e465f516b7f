//! Tokio driver for the scheduler
//!
//! One task owns the [`Scheduler`]. It feeds it a one-second tick while the
//! countdown runs and performs the fetches it issues. Other tasks reach it
//! only through the [`Control`] channel.

use super::scheduler::Scheduler;
use super::types::FetchTicket;
use crate::client::SnapshotSource;
use crate::render::RenderSink;
use crate::telemetry::{self, LatencyMetric};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

const TICK: Duration = Duration::from_secs(1);
const CONTROL_CAPACITY: usize = 16;

/// Commands accepted by a running [`PollRuntime`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Fetch now, unless a fetch is already in flight
    Refresh,
    /// Stop polling and return the scheduler
    Shutdown,
}

/// Sending side of the control channel
#[derive(Debug, Clone)]
pub struct RuntimeHandle {
    tx: mpsc::Sender<Control>,
}

impl RuntimeHandle {
    pub async fn refresh(&self) -> anyhow::Result<()> {
        self.send(Control::Refresh).await
    }

    pub async fn shutdown(&self) -> anyhow::Result<()> {
        self.send(Control::Shutdown).await
    }

    /// Request a refresh from outside the runtime
    pub fn blocking_refresh(&self) -> anyhow::Result<()> {
        self.tx
            .blocking_send(Control::Refresh)
            .map_err(|_| anyhow::anyhow!("Poll runtime has stopped"))
    }

    async fn send(&self, control: Control) -> anyhow::Result<()> {
        self.tx
            .send(control)
            .await
            .map_err(|_| anyhow::anyhow!("Poll runtime has stopped"))
    }
}

/// Polling loop over a snapshot source
pub struct PollRuntime<Src, S: RenderSink> {
    source: Src,
    scheduler: Scheduler<S>,
    control: mpsc::Receiver<Control>,
}

enum FetchOutcome {
    Done,
    Shutdown,
}

impl<Src, S> PollRuntime<Src, S>
where
    Src: SnapshotSource,
    S: RenderSink,
{
    pub fn new(source: Src, sink: S) -> (Self, RuntimeHandle) {
        Self::with_scheduler(source, Scheduler::new(sink))
    }

    /// Resume from an existing scheduler, keeping its display set
    pub fn with_scheduler(source: Src, scheduler: Scheduler<S>) -> (Self, RuntimeHandle) {
        let (tx, control) = mpsc::channel(CONTROL_CAPACITY);
        let runtime = Self {
            source,
            scheduler,
            control,
        };
        (runtime, RuntimeHandle { tx })
    }

    /// Run until shut down or every handle is dropped
    pub async fn run(mut self) -> Scheduler<S> {
        let mut ticker = time::interval_at(time::Instant::now() + TICK, TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut pending = Some(self.scheduler.start());
        loop {
            if let Some(ticket) = pending.take() {
                if let FetchOutcome::Shutdown = self.fetch(ticket).await {
                    break;
                }
                // Countdown starts only once processing is complete
                ticker.reset();
                continue;
            }

            tokio::select! {
                _ = ticker.tick(), if self.scheduler.is_counting_down() => {
                    pending = self.scheduler.on_tick();
                }
                control = self.control.recv() => match control {
                    Some(Control::Refresh) => {
                        tracing::info!("Manual refresh requested");
                        pending = self.scheduler.refresh();
                    }
                    Some(Control::Shutdown) | None => break,
                },
            }
        }

        self.scheduler.stop();
        self.scheduler
    }

    /// Perform one fetch, still honouring shutdown while it is in flight
    async fn fetch(&mut self, ticket: FetchTicket) -> FetchOutcome {
        let started = Instant::now();
        let fetch = self.source.fetch_snapshot();
        tokio::pin!(fetch);

        let result = loop {
            tokio::select! {
                result = &mut fetch => break result,
                control = self.control.recv() => match control {
                    Some(Control::Refresh) => {
                        tracing::debug!(ticket = %ticket, "Refresh ignored, fetch in flight");
                    }
                    Some(Control::Shutdown) | None => return FetchOutcome::Shutdown,
                },
            }
        };
        telemetry::record_latency(LatencyMetric::Fetch, started.elapsed());

        match result {
            Ok(snapshot) => {
                self.scheduler.on_snapshot(ticket, snapshot);
            }
            Err(e) => {
                self.scheduler.on_fetch_error(ticket, &e);
            }
        }
        FetchOutcome::Done
    }
}

/// Fetch and render a single snapshot without arming the loop
pub async fn run_once<Src, S>(source: &Src, sink: S) -> anyhow::Result<Scheduler<S>>
where
    Src: SnapshotSource + ?Sized,
    S: RenderSink,
{
    let mut scheduler = Scheduler::new(sink);
    let ticket = scheduler.start();

    match source.fetch_snapshot().await {
        Ok(snapshot) => {
            scheduler.on_snapshot(ticket, snapshot);
            scheduler.stop();
            Ok(scheduler)
        }
        Err(e) => {
            scheduler.on_fetch_error(ticket, &e);
            Err(e.into())
        }
    }
}
