//! Row operation types

use crate::format::FormattedRow;

/// One keyed change to apply to the rendered table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOp {
    /// Drop the row; its key is no longer in the snapshot
    Remove { key: String },
    /// Repaint an existing row in place
    Update {
        key: String,
        row: FormattedRow,
        /// Whether the formatted content differs from the last known row
        changed: bool,
    },
    /// Append a new row after all existing rows
    Insert { key: String, row: FormattedRow },
}

impl RowOp {
    pub fn key(&self) -> &str {
        match self {
            RowOp::Remove { key } | RowOp::Update { key, .. } | RowOp::Insert { key, .. } => key,
        }
    }

    pub fn is_remove(&self) -> bool {
        matches!(self, RowOp::Remove { .. })
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, RowOp::Insert { .. })
    }

    pub fn is_update(&self) -> bool {
        matches!(self, RowOp::Update { .. })
    }
}

/// Operation counts, used for logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounts {
    pub removed: usize,
    pub updated: usize,
    pub unchanged: usize,
    pub inserted: usize,
}

impl OpCounts {
    pub fn of(ops: &[RowOp]) -> Self {
        ops.iter().fold(Self::default(), |mut counts, op| {
            match op {
                RowOp::Remove { .. } => counts.removed += 1,
                RowOp::Update { changed: true, .. } => counts.updated += 1,
                RowOp::Update { changed: false, .. } => counts.unchanged += 1,
                RowOp::Insert { .. } => counts.inserted += 1,
            }
            counts
        })
    }
}
