//! History collaborator.
//!
//! The editor commits exactly one layer snapshot per completed operation
//! (gesture end, style application, split, duplication); live per-frame
//! updates never reach history. Diffing and undo are the host's concern.

use artboard_core::Layer;

/// Receives committed layer snapshots.
pub trait History {
    /// Record a new snapshot of the full layer set.
    fn commit(&mut self, layers: &[Layer]);
}

/// Discards every snapshot. For hosts that track history elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHistory;

impl History for NullHistory {
    fn commit(&mut self, _layers: &[Layer]) {}
}

/// In-memory snapshot log. Used by tests and headless hosts.
#[derive(Debug, Default)]
pub struct SnapshotHistory {
    snapshots: Vec<Vec<Layer>>,
}

impl SnapshotHistory {
    /// Create an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The most recent snapshot, if any.
    #[must_use]
    pub fn last(&self) -> Option<&[Layer]> {
        self.snapshots.last().map(Vec::as_slice)
    }
}

impl History for SnapshotHistory {
    fn commit(&mut self, layers: &[Layer]) {
        tracing::debug!("history commit: {} layers", layers.len());
        self.snapshots.push(layers.to_vec());
    }
}
