//! momentum-board: live-refreshing momentum dashboard client
//!
//! This library provides the core components for:
//! - Lenient decoding of dashboard snapshots
//! - Score classification and row formatting
//! - Keyed, order-preserving row reconciliation
//! - A poll scheduler with a 30-second countdown
//! - HTTP access to the dashboard server
//! - Console and in-memory render sinks
//! - Logging and Prometheus metrics

pub mod classify;
pub mod cli;
pub mod client;
pub mod config;
pub mod engine;
pub mod format;
pub mod reconcile;
pub mod render;
pub mod snapshot;
pub mod summary;
pub mod telemetry;
