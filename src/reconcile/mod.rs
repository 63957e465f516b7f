//! Keyed reconciliation of snapshots against the displayed rows
//!
//! Rows are identified by ticker. A row keeps the position it was first
//! inserted at for as long as its key stays in consecutive snapshots; new keys
//! are appended in snapshot order and nothing is ever re-sorted.

mod types;

pub use types::{OpCounts, RowOp};

use crate::format::{format_row, FormattedRow};
use crate::snapshot::Instrument;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;

/// Keys currently materialized in the output, in display order
pub type DisplaySet = IndexSet<String>;

/// Stateful reconciler owning the display set
///
/// Each key maps to the last row formatted for it. A key seeded from a bare
/// display set has no known row yet, so its first update always reports
/// `changed`.
#[derive(Debug, Clone, Default)]
pub struct Reconciler {
    rows: IndexMap<String, Option<FormattedRow>>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing display set whose row contents are unknown
    pub fn with_display_set(keys: &DisplaySet) -> Self {
        Self {
            rows: keys.iter().map(|k| (k.clone(), None)).collect(),
        }
    }

    /// Diff `tickers` against the current rows and adopt them
    ///
    /// Emits removes first (in display order), then one update or insert per
    /// keyed instrument in snapshot order. Instruments without a ticker are
    /// skipped. Afterwards the display set equals the incoming key set.
    pub fn apply(&mut self, tickers: &[Instrument]) -> Vec<RowOp> {
        let keyed: Vec<(&str, &Instrument)> = tickers
            .iter()
            .filter_map(|instrument| match instrument.key() {
                Some(key) => Some((key, instrument)),
                None => {
                    tracing::warn!("Skipping instrument without ticker");
                    None
                }
            })
            .collect();

        let incoming: HashSet<&str> = keyed.iter().map(|(key, _)| *key).collect();
        let mut ops = Vec::with_capacity(self.rows.len() + keyed.len());

        for key in self.rows.keys() {
            if !incoming.contains(key.as_str()) {
                ops.push(RowOp::Remove { key: key.clone() });
            }
        }
        self.rows.retain(|key, _| incoming.contains(key.as_str()));

        for (key, instrument) in keyed {
            let row = format_row(instrument);
            match self.rows.get_mut(key) {
                Some(last) => {
                    let changed = last.as_ref() != Some(&row);
                    *last = Some(row.clone());
                    ops.push(RowOp::Update {
                        key: key.to_string(),
                        row,
                        changed,
                    });
                }
                None => {
                    self.rows.insert(key.to_string(), Some(row.clone()));
                    ops.push(RowOp::Insert {
                        key: key.to_string(),
                        row,
                    });
                }
            }
        }

        ops
    }

    /// Keys in display order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn display_set(&self) -> DisplaySet {
        self.rows.keys().cloned().collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    /// Last formatted row for `key`, if known
    pub fn row(&self, key: &str) -> Option<&FormattedRow> {
        self.rows.get(key).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Diff a previous display set against a snapshot's instruments
///
/// Returns the operations and the new display set. Without row history every
/// update is reported as changed.
pub fn reconcile(previous: &DisplaySet, tickers: &[Instrument]) -> (Vec<RowOp>, DisplaySet) {
    let mut reconciler = Reconciler::with_display_set(previous);
    let ops = reconciler.apply(tickers);
    (ops, reconciler.display_set())
}
