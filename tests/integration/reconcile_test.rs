//! Integration tests for snapshot decoding, formatting and reconciliation

use momentum_board::classify::Label;
use momentum_board::format::{Tone, PLACEHOLDER};
use momentum_board::reconcile::{reconcile, DisplaySet, OpCounts, Reconciler, RowOp};
use momentum_board::snapshot::ReceivedSnapshot;
use serde_json::json;

fn snapshot(value: serde_json::Value) -> ReceivedSnapshot {
    ReceivedSnapshot::from_value(value).unwrap()
}

fn keys(ops: &[RowOp]) -> Vec<(&'static str, String)> {
    ops.iter()
        .map(|op| {
            let kind = match op {
                RowOp::Remove { .. } => "remove",
                RowOp::Update { .. } => "update",
                RowOp::Insert { .. } => "insert",
            };
            (kind, op.key().to_string())
        })
        .collect()
}

#[test]
fn test_full_snapshot_rows() {
    let snap = snapshot(json!({
        "timestamp": "2026-03-02 09:45:10",
        "status": "OPEN",
        "tickers": [
            {"ticker": "NVDA", "price": 120.5, "gap_percent": 2.25, "volume": 45_600_000,
             "atr_percent": 3.1, "rsi": 61.24, "vwap": 119.8, "trend": "UP", "score": 4},
            {"ticker": "VXX", "price": "44.10", "gap_percent": -1.5, "volume": "1200000",
             "atr_percent": 5.0, "rsi": 38.0, "vwap": 44.5, "trend": "DOWN", "score": -2},
            {"ticker": "XYZ", "price": "abc", "volume": null, "score": "n/a"}
        ]
    }));

    let mut reconciler = Reconciler::new();
    let ops = reconciler.apply(snap.instruments());
    assert_eq!(
        keys(&ops),
        vec![
            ("insert", "NVDA".to_string()),
            ("insert", "VXX".to_string()),
            ("insert", "XYZ".to_string()),
        ]
    );

    let nvda = reconciler.row("NVDA").unwrap();
    assert_eq!(nvda.price.text, "120.50");
    assert_eq!(nvda.gap_percent.tone, Tone::Positive);
    assert_eq!(nvda.score.label, Label::Bull);

    let vxx = reconciler.row("VXX").unwrap();
    assert_eq!(vxx.price.text, "44.10");
    assert_eq!(vxx.score.label, Label::Safe);
    assert_eq!(vxx.gap_percent.tone, Tone::Negative);

    let xyz = reconciler.row("XYZ").unwrap();
    assert_eq!(xyz.price.text, PLACEHOLDER);
    assert_eq!(xyz.volume, PLACEHOLDER);
    assert_eq!(xyz.score.text, PLACEHOLDER);
    assert_eq!(xyz.score.label, Label::Neutral);
}

#[test]
fn test_ordering_across_snapshots() {
    let first = snapshot(json!({"tickers": [{"ticker": "A"}, {"ticker": "B"}, {"ticker": "C"}]}));
    let second = snapshot(json!({"tickers": [{"ticker": "B"}, {"ticker": "C"}, {"ticker": "D"}]}));

    let mut reconciler = Reconciler::new();
    reconciler.apply(first.instruments());
    let ops = reconciler.apply(second.instruments());

    assert_eq!(
        keys(&ops),
        vec![
            ("remove", "A".to_string()),
            ("update", "B".to_string()),
            ("update", "C".to_string()),
            ("insert", "D".to_string()),
        ]
    );
    assert_eq!(reconciler.keys().collect::<Vec<_>>(), vec!["B", "C", "D"]);
}

#[test]
fn test_idempotent_second_pass() {
    let snap = snapshot(json!({"tickers": [{"ticker": "A", "price": 1}, {"ticker": "B", "price": 2}]}));

    let mut reconciler = Reconciler::new();
    reconciler.apply(snap.instruments());
    let ops = reconciler.apply(snap.instruments());

    assert_eq!(
        OpCounts::of(&ops),
        OpCounts { removed: 0, updated: 0, unchanged: 2, inserted: 0 }
    );
}

#[test]
fn test_missing_tickers_clears_display() {
    let previous: DisplaySet = ["A", "B"].iter().map(|s| s.to_string()).collect();
    let snap = snapshot(json!({"status": "CLOSED"}));

    let (ops, next) = reconcile(&previous, snap.instruments());
    assert_eq!(
        keys(&ops),
        vec![("remove", "A".to_string()), ("remove", "B".to_string())]
    );
    assert!(next.is_empty());
}

#[test]
fn test_non_object_entries_skipped() {
    let snap = snapshot(json!({"tickers": [42, {"ticker": "A"}, "junk", {"ticker": ""}]}));
    let (ops, next) = reconcile(&DisplaySet::new(), snap.instruments());
    assert_eq!(keys(&ops), vec![("insert", "A".to_string())]);
    assert_eq!(next.len(), 1);
}

#[test]
fn test_export_is_verbatim() {
    let body = br#"{"timestamp":"t","tickers":[{"ticker":"A","price":"abc","custom":[1,2]}],"status":"OPEN"}"#;
    let snap = ReceivedSnapshot::from_slice(body).unwrap();

    let exported: serde_json::Value = serde_json::from_str(&snap.to_pretty_json()).unwrap();
    let original: serde_json::Value = serde_json::from_slice(body).unwrap();
    assert_eq!(exported, original);
    assert!(snap.to_pretty_json().starts_with("{\n  \"timestamp\""));
}
