//! SyncEngine implementation
//!
//! One run is strictly sequential: load state, fetch, reconcile, then for
//! each planned op write the cache file and upload it, folding every outcome
//! into the committed state. The state file is written once, at the end.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cache::ArticleCache;
use crate::config::PathsConfig;
use crate::item::Item;
use crate::ports::{ContentSource, RemoteIndex, UploadRequest};
use crate::state::{StateStore, SyncState};
use crate::{Error, Result};

use super::reconcile::{self, ChangeKind, OpOutcome, Plan, SyncOp};

/// Options for a sync run
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// If true, fetch and reconcile only. Nothing is written or uploaded.
    pub dry_run: bool,
}

/// What happened to one planned op
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpReport {
    pub identifier: String,
    pub kind: ChangeKind,
    /// `None` on a dry run
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<OpOutcome>,
}

/// Report from a sync run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    pub dry_run: bool,
    /// New items uploaded (planned, on a dry run)
    pub added: usize,
    /// Changed items uploaded (planned, on a dry run)
    pub updated: usize,
    /// Items whose content matched the recorded digest
    pub skipped: usize,
    /// Ops whose upload failed; retried on the next run
    pub failed: usize,
    pub ops: Vec<OpReport>,
    /// Identifiers kept in state that the source no longer returns
    pub stale: Vec<String>,
}

impl SyncReport {
    /// Whether every planned op went through
    pub fn success(&self) -> bool {
        self.failed == 0
    }

    fn record(&mut self, op: &SyncOp, outcome: Option<OpOutcome>) {
        match &outcome {
            Some(OpOutcome::Failed { .. }) => self.failed += 1,
            _ => match op.kind {
                ChangeKind::Added => self.added += 1,
                ChangeKind::Updated => self.updated += 1,
            },
        }
        self.ops.push(OpReport {
            identifier: op.identifier.clone(),
            kind: op.kind,
            outcome,
        });
    }
}

/// Engine for mirroring a content source into a remote index
#[derive(Debug, Clone)]
pub struct SyncEngine {
    store: StateStore,
    cache: ArticleCache,
}

impl SyncEngine {
    pub fn new(store: StateStore, cache: ArticleCache) -> Self {
        Self { store, cache }
    }

    /// Engine using the state file and cache directory from `paths`
    pub fn from_paths(paths: &PathsConfig) -> Self {
        Self::new(
            StateStore::new(paths.state_file()),
            ArticleCache::new(paths.articles_dir()),
        )
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Load state and fetch, then plan without touching anything.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be loaded or the fetch fails.
    pub fn plan<S: ContentSource>(&self, source: &mut S) -> Result<(SyncState, Vec<Item>, Plan)> {
        let state = self.store.load()?;
        let items = source.fetch().map_err(Error::fetch)?;
        tracing::info!(items = items.len(), tracked = state.len(), "fetched content");
        let plan = reconcile::reconcile(&items, &state);
        Ok((state, items, plan))
    }

    /// Dry run: report what [`run`](Self::run) would do. No index is needed
    /// and nothing is written.
    pub fn preview<S: ContentSource>(&self, source: &mut S) -> Result<SyncReport> {
        let (state, items, plan) = self.plan(source)?;
        let mut report = SyncReport {
            dry_run: true,
            skipped: plan.unchanged.len(),
            stale: stale_identifiers(&state, &items),
            ..SyncReport::default()
        };
        for op in &plan.ops {
            report.record(op, None);
        }
        Ok(report)
    }

    /// Run one full sync.
    ///
    /// Per-op failures are reported, not returned. The run itself fails only
    /// when the state cannot be loaded, the fetch fails (nothing is written
    /// in that case), or the final state cannot be saved.
    pub fn run<S, I>(&self, source: &mut S, index: &mut I, options: &SyncOptions) -> Result<SyncReport>
    where
        S: ContentSource,
        I: RemoteIndex,
    {
        if options.dry_run {
            return self.preview(source);
        }

        let (state, items, plan) = self.plan(source)?;
        let mut report = SyncReport {
            skipped: plan.unchanged.len(),
            stale: stale_identifiers(&state, &items),
            ..SyncReport::default()
        };

        // Pending records for items not fetched this run are kept like any
        // other stale entry
        let mut committed =
            state.without_pending_in(items.iter().map(|item| item.identifier.as_str()));
        for op in &plan.ops {
            let outcome = self.execute(op, &committed, index);
            reconcile::apply_outcome(&mut committed, op, &outcome);
            report.record(op, Some(outcome));
        }

        if committed != state {
            self.store.save(&committed)?;
        } else {
            tracing::debug!("state unchanged, not rewriting");
        }

        tracing::info!(
            added = report.added,
            updated = report.updated,
            skipped = report.skipped,
            failed = report.failed,
            "sync finished"
        );
        Ok(report)
    }

    fn execute<I: RemoteIndex>(&self, op: &SyncOp, committed: &SyncState, index: &mut I) -> OpOutcome {
        let item = Item::new(op.identifier.clone(), op.content.clone());
        let file_name = match ArticleCache::file_name(&item.identifier)
            .and_then(|name| self.cache.write(&item).map(|_| name))
        {
            Ok(name) => name,
            Err(e) => return OpOutcome::failed(e.to_string()),
        };

        let request = UploadRequest {
            identifier: &op.identifier,
            file_name,
            content: &op.content,
            supersedes: reconcile::live_reference(committed, &op.identifier),
        };

        match index.upload(&request) {
            Ok(uploaded) => {
                if let Some(orphan) = &uploaded.orphaned {
                    tracing::warn!(identifier = %op.identifier, %orphan, "superseded object was not deleted");
                }
                tracing::info!(identifier = %op.identifier, reference = %uploaded.reference, "uploaded");
                OpOutcome::Uploaded {
                    reference: uploaded.reference,
                    orphaned: uploaded.orphaned,
                }
            }
            Err(e) => OpOutcome::failed(e.to_string()),
        }
    }
}

/// Identifiers recorded in `state` that `items` no longer contains, sorted
pub fn stale_identifiers(state: &SyncState, items: &[Item]) -> Vec<String> {
    let fetched: HashSet<&str> = items.iter().map(|i| i.identifier.as_str()).collect();
    state
        .iter()
        .map(|(identifier, _)| identifier)
        .filter(|identifier| !fetched.contains(identifier))
        .map(str::to_string)
        .collect()
}
