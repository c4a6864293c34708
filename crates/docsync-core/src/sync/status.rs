//! Read-only view of the sync state

use serde::{Deserialize, Serialize};

use crate::Result;
use crate::ports::ContentSource;
use crate::state::SyncState;

use super::engine::{SyncEngine, stale_identifiers};
use super::reconcile::ChangeKind;

/// Pending changes, present only when the source was consulted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingChanges {
    pub to_add: Vec<String>,
    pub to_update: Vec<String>,
    pub unchanged: usize,
    pub stale: Vec<String>,
}

/// Summary of the local sync state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    /// Number of identifiers in the state file
    pub tracked: usize,
    /// Records without a remote reference (left by older tooling)
    pub pending: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<PendingChanges>,
}

impl StatusReport {
    fn from_state(state: &SyncState) -> Self {
        Self {
            tracked: state.len(),
            pending: state.pending().map(str::to_string).collect(),
            changes: None,
        }
    }

    /// Whether a sync would change nothing, as far as this report knows
    pub fn is_clean(&self) -> bool {
        self.pending.is_empty()
            && self
                .changes
                .as_ref()
                .is_none_or(|c| c.to_add.is_empty() && c.to_update.is_empty())
    }
}

impl SyncEngine {
    /// Summarise the state file without contacting anything.
    pub fn status(&self) -> Result<StatusReport> {
        let state = self.store().load()?;
        Ok(StatusReport::from_state(&state))
    }

    /// Summarise the state file and what a sync would do right now.
    pub fn status_against<S: ContentSource>(&self, source: &mut S) -> Result<StatusReport> {
        let (state, items, plan) = self.plan(source)?;
        let mut report = StatusReport::from_state(&state);

        let mut changes = PendingChanges {
            unchanged: plan.unchanged.len(),
            stale: stale_identifiers(&state, &items),
            ..PendingChanges::default()
        };
        for op in plan.ops {
            match op.kind {
                ChangeKind::Added => changes.to_add.push(op.identifier),
                ChangeKind::Updated => changes.to_update.push(op.identifier),
            }
        }
        report.changes = Some(changes);
        Ok(report)
    }
}
