//! Integration tests for the poll scheduler and its tokio runtime

use async_trait::async_trait;
use momentum_board::client::{ClientError, SnapshotSource};
use momentum_board::engine::{PollRuntime, Scheduler, SchedulerState, POLL_INTERVAL_SECS};
use momentum_board::render::{MemorySink, RenderEvent};
use momentum_board::snapshot::ReceivedSnapshot;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn snapshot(tickers: &[&str]) -> ReceivedSnapshot {
    let tickers: Vec<_> = tickers.iter().map(|t| json!({"ticker": t, "score": 0})).collect();
    ReceivedSnapshot::from_value(json!({"status": "OPEN", "tickers": tickers})).unwrap()
}

/// Counts fetches; fails every fetch after `fail_after` successes
struct CountingSource {
    calls: AtomicUsize,
    fail_after: usize,
}

impl CountingSource {
    fn new(fail_after: usize) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_after,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SnapshotSource for CountingSource {
    async fn fetch_snapshot(&self) -> Result<ReceivedSnapshot, ClientError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        if n >= self.fail_after {
            return Err(ClientError::Status {
                status: 500,
                body: "internal error".into(),
            });
        }
        Ok(snapshot(&["AAPL", "MSFT"]))
    }
}

#[test]
fn test_thirty_ticks_issue_exactly_one_fetch() {
    let mut scheduler = Scheduler::new(MemorySink::new());
    let ticket = scheduler.start();
    scheduler.on_snapshot(ticket, snapshot(&["A"]));
    assert_eq!(scheduler.state(), SchedulerState::CountingDown { remaining: 30 });

    let mut fetches = Vec::new();
    for _ in 0..POLL_INTERVAL_SECS {
        if let Some(ticket) = scheduler.on_tick() {
            fetches.push(ticket);
        }
    }

    assert_eq!(fetches.len(), 1);
    assert_eq!(scheduler.state(), SchedulerState::Loading);
    let expected: Vec<u32> = (0..=POLL_INTERVAL_SECS).rev().collect();
    assert_eq!(scheduler.sink().countdowns(), expected);

    // Nothing further happens while the fetch is outstanding
    for _ in 0..10 {
        assert!(scheduler.on_tick().is_none());
    }
}

#[test]
fn test_failing_fetch_enters_error_without_countdown() {
    let mut scheduler = Scheduler::new(MemorySink::new());
    let ticket = scheduler.start();
    scheduler.on_fetch_error(ticket, "connection refused");

    assert_eq!(scheduler.state(), SchedulerState::Error);
    assert!(scheduler.sink().countdowns().is_empty());
    assert_eq!(scheduler.sink().errors(), vec!["connection refused"]);
    for _ in 0..60 {
        assert!(scheduler.on_tick().is_none());
    }

    // Manual refresh is the way out
    let ticket = scheduler.refresh().unwrap();
    scheduler.on_snapshot(ticket, snapshot(&["A"]));
    assert!(scheduler.is_counting_down());
    assert!(scheduler.last_error().is_none());
}

#[test]
fn test_countdown_restart_replaces_previous() {
    let mut scheduler = Scheduler::new(MemorySink::new());
    let ticket = scheduler.start();
    scheduler.on_snapshot(ticket, snapshot(&["A"]));
    for _ in 0..10 {
        scheduler.on_tick();
    }
    assert_eq!(scheduler.state(), SchedulerState::CountingDown { remaining: 20 });

    let ticket = scheduler.refresh().unwrap();
    scheduler.on_snapshot(ticket, snapshot(&["A"]));
    assert_eq!(scheduler.state(), SchedulerState::CountingDown { remaining: 30 });
}

#[test]
fn test_event_order_for_first_load() {
    let mut scheduler = Scheduler::new(MemorySink::new());
    let ticket = scheduler.start();
    scheduler.on_snapshot(ticket, snapshot(&["A"]));

    let kinds: Vec<&str> = scheduler
        .sink()
        .events()
        .iter()
        .map(|e| match e {
            RenderEvent::Loading => "loading",
            RenderEvent::ContentReady => "ready",
            RenderEvent::Header(_) => "header",
            RenderEvent::Rows(_) => "rows",
            RenderEvent::Countdown { .. } => "countdown",
            RenderEvent::Error { .. } => "error",
        })
        .collect();
    assert_eq!(kinds, vec!["loading", "ready", "header", "rows", "countdown"]);
}

#[tokio::test(start_paused = true)]
async fn test_runtime_polls_every_thirty_seconds() {
    let source = CountingSource::new(usize::MAX);
    let (runtime, handle) = PollRuntime::new(source.clone(), MemorySink::new());
    let task = tokio::spawn(runtime.run());

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(source.calls(), 1);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(source.calls(), 2);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(source.calls(), 3);

    handle.shutdown().await.unwrap();
    let scheduler = task.await.unwrap();
    assert_eq!(scheduler.state(), SchedulerState::Idle);
    assert_eq!(scheduler.display_set().len(), 2);
    assert_eq!(scheduler.sink().count(|e| matches!(e, RenderEvent::Loading)), 1);
}

#[tokio::test(start_paused = true)]
async fn test_runtime_stops_polling_after_error() {
    let source = CountingSource::new(1);
    let (runtime, handle) = PollRuntime::new(source.clone(), MemorySink::new());
    let task = tokio::spawn(runtime.run());

    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(source.calls(), 2);

    handle.shutdown().await.unwrap();
    let scheduler = task.await.unwrap();
    assert_eq!(scheduler.sink().errors(), vec!["HTTP 500: internal error"]);
    assert!(scheduler.last_snapshot().is_some());
    assert_eq!(scheduler.display_set().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_manual_refresh_recovers_from_error() {
    let source = CountingSource::new(0);
    let (runtime, handle) = PollRuntime::new(source.clone(), MemorySink::new());
    let task = tokio::spawn(runtime.run());

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(source.calls(), 1);

    handle.refresh().await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(source.calls(), 2);

    handle.shutdown().await.unwrap();
    let scheduler = task.await.unwrap();
    assert_eq!(scheduler.sink().errors().len(), 2);
    assert!(!scheduler.has_loaded());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_stops_runtime() {
    let source = CountingSource::new(usize::MAX);
    let (runtime, handle) = PollRuntime::new(source, MemorySink::new());
    let task = tokio::spawn(runtime.run());

    tokio::time::sleep(Duration::from_secs(1)).await;
    drop(handle);
    let scheduler = task.await.unwrap();
    assert_eq!(scheduler.state(), SchedulerState::Idle);
}
