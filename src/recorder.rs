//! Interaction recording
//!
//! The recorder is the sole owner and writer of a session's counters. Every
//! interaction produces exactly one increment, in arrival order.

use crate::types::{InteractionKind, SessionCounters};
use tracing::debug;

/// Accumulates Expand/Collapse counts for the current session
#[derive(Debug, Clone, Default)]
pub struct InteractionRecorder {
    counters: SessionCounters,
}

impl InteractionRecorder {
    /// Create a recorder with both counts at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one interaction
    pub fn record(&mut self, kind: InteractionKind) {
        match kind {
            InteractionKind::Expand => {
                self.counters.expand_count = self.counters.expand_count.saturating_add(1)
            }
            InteractionKind::Collapse => {
                self.counters.collapse_count = self.counters.collapse_count.saturating_add(1)
            }
        }

        debug!(
            kind = %kind,
            expand_count = self.counters.expand_count,
            collapse_count = self.counters.collapse_count,
            "recorded interaction"
        );
    }

    /// Record a detail-panel toggle given its visibility after the toggle
    pub fn record_visibility(&mut self, details_visible_after: bool) -> InteractionKind {
        let kind = InteractionKind::from_visibility(details_visible_after);
        self.record(kind);
        kind
    }

    /// Record a sequence of interactions in order
    pub fn record_all<I>(&mut self, kinds: I)
    where
        I: IntoIterator<Item = InteractionKind>,
    {
        for kind in kinds {
            self.record(kind);
        }
    }

    /// Snapshot of the current counters
    pub fn counters(&self) -> SessionCounters {
        self.counters
    }

    /// Total number of recorded interactions
    pub fn total(&self) -> u128 {
        self.counters.total()
    }
}
