//! Prometheus metrics

use std::time::Duration;

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Snapshots fetched and rendered
    PollsCompleted,
    /// Fetches that ended in the error state
    PollsFailed,
    /// Results dropped because their fetch was superseded
    StaleResults,
    RowsInserted,
    RowsRemoved,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Rows currently in the display set
    DisplayedRows,
    /// Unix timestamp of the last successful load
    LastSuccess,
}

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Snapshot request, including body decode
    Fetch,
    /// Header projection plus row reconciliation
    Reconcile,
}

impl CounterMetric {
    fn name(self) -> &'static str {
        match self {
            CounterMetric::PollsCompleted => "momentum_board_polls_completed_total",
            CounterMetric::PollsFailed => "momentum_board_polls_failed_total",
            CounterMetric::StaleResults => "momentum_board_stale_results_total",
            CounterMetric::RowsInserted => "momentum_board_rows_inserted_total",
            CounterMetric::RowsRemoved => "momentum_board_rows_removed_total",
        }
    }
}

/// Increment a counter
pub fn increment(metric: CounterMetric, by: u64) {
    metrics::counter!(metric.name()).increment(by);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    let metric_name = match metric {
        GaugeMetric::DisplayedRows => "momentum_board_displayed_rows",
        GaugeMetric::LastSuccess => "momentum_board_last_success_timestamp_seconds",
    };
    metrics::gauge!(metric_name).set(value);
}

/// Record a latency measurement in milliseconds
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let metric_name = match metric {
        LatencyMetric::Fetch => "momentum_board_fetch_latency_ms",
        LatencyMetric::Reconcile => "momentum_board_reconcile_latency_ms",
    };
    metrics::histogram!(metric_name).record(duration.as_secs_f64() * 1000.0);
}
