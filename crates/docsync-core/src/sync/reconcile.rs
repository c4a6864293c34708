//! Change detection and post-upload state reconciliation

use serde::{Deserialize, Serialize};

use crate::Item;
use crate::state::{StateRecord, SyncState};

/// How a fetched item differs from the recorded state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Identifier never seen before
    Added,
    /// Identifier known, content digest changed
    Updated,
}

/// One upload needed to bring the remote index in line with the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOp {
    pub identifier: String,
    pub kind: ChangeKind,
    /// Fingerprint of `content`
    pub digest: String,
    pub content: String,
    /// Reference recorded for this identifier when the op was planned
    pub old_reference: Option<String>,
}

/// Output of [`reconcile`]
#[derive(Debug, Clone, Default)]
pub struct Plan {
    /// Uploads to perform, in fetch order
    pub ops: Vec<SyncOp>,
    /// Identifiers whose content matched the recorded digest
    pub unchanged: Vec<String>,
    /// State with every planned op drafted in, references still pending
    pub draft: SyncState,
}

impl Plan {
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn count(&self, kind: ChangeKind) -> usize {
        self.ops.iter().filter(|op| op.kind == kind).count()
    }
}

/// Per-op result fed back into [`apply_outcome`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum OpOutcome {
    Uploaded {
        reference: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        orphaned: Option<String>,
    },
    Failed {
        reason: String,
    },
}

impl OpOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Uploaded { .. })
    }
}

/// Classify every fetched item against `state` and plan the uploads.
///
/// Items are visited in fetch order against a draft that starts as a copy of
/// `state`, so a repeated identifier is compared with the earlier occurrence
/// rather than the persisted record. Pending records in `state` are treated
/// as absent.
pub fn reconcile(fetched: &[Item], state: &SyncState) -> Plan {
    let mut draft = state.without_pending();
    let mut ops = Vec::new();
    let mut unchanged = Vec::new();

    for item in fetched {
        let digest = item.digest();
        let (kind, old_reference) = match draft.get(&item.identifier) {
            None => (ChangeKind::Added, None),
            Some(record) if record.digest != digest => {
                (ChangeKind::Updated, record.remote_reference.clone())
            }
            Some(_) => {
                tracing::debug!(identifier = %item.identifier, "unchanged");
                unchanged.push(item.identifier.clone());
                continue;
            }
        };

        tracing::debug!(identifier = %item.identifier, ?kind, "change detected");
        draft.insert(item.identifier.clone(), StateRecord::pending(digest.clone()));
        ops.push(SyncOp {
            identifier: item.identifier.clone(),
            kind,
            digest,
            content: item.content.clone(),
            old_reference,
        });
    }

    Plan {
        ops,
        unchanged,
        draft,
    }
}

/// Reference that is live for `identifier` in the committed state.
///
/// This is what an upload for that identifier must supersede. It equals the
/// op's `old_reference` unless an earlier op in the same run already replaced
/// the object.
pub fn live_reference<'a>(committed: &'a SyncState, identifier: &str) -> Option<&'a str> {
    committed
        .get(identifier)
        .and_then(|record| record.remote_reference.as_deref())
}

/// Fold one op's outcome into the committed state.
///
/// `committed` starts as the loaded state with pending records dropped.
/// A successful upload records the new digest and reference. A failed upload
/// leaves the identifier exactly as it was: absent for a new item, old digest
/// and reference for a changed one. Either way the next run detects the item
/// again.
pub fn apply_outcome(committed: &mut SyncState, op: &SyncOp, outcome: &OpOutcome) {
    match outcome {
        OpOutcome::Uploaded { reference, .. } => {
            committed.insert(
                op.identifier.clone(),
                StateRecord::synced(op.digest.clone(), reference.clone()),
            );
        }
        OpOutcome::Failed { reason } => {
            tracing::warn!(
                identifier = %op.identifier,
                kind = ?op.kind,
                %reason,
                "upload failed, keeping previous state"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsync_fs::compute_content_checksum as sha256;
    use pretty_assertions::assert_eq;

    fn state_with(entries: &[(&str, &str, &str)]) -> SyncState {
        entries
            .iter()
            .map(|(id, content, reference)| {
                (id.to_string(), StateRecord::synced(sha256(content), *reference))
            })
            .collect()
    }

    fn uploaded(reference: &str) -> OpOutcome {
        OpOutcome::Uploaded {
            reference: reference.to_string(),
            orphaned: None,
        }
    }

    #[test]
    fn empty_fetch_plans_nothing() {
        let state = state_with(&[("a", "hello", "ref1")]);

        let plan = reconcile(&[], &state);

        assert!(plan.is_empty());
        assert!(plan.unchanged.is_empty());
        assert_eq!(plan.draft, state);
    }

    #[test]
    fn new_identifier_is_added_without_old_reference() {
        let plan = reconcile(&[Item::new("a", "hello")], &SyncState::new());

        assert_eq!(
            plan.ops,
            vec![SyncOp {
                identifier: "a".into(),
                kind: ChangeKind::Added,
                digest: sha256("hello"),
                content: "hello".into(),
                old_reference: None,
            }]
        );
        assert_eq!(plan.draft.get("a"), Some(&StateRecord::pending(sha256("hello"))));
    }

    #[test]
    fn changed_content_is_updated_with_old_reference() {
        let state = state_with(&[("a", "hello", "ref1")]);

        let plan = reconcile(&[Item::new("a", "world")], &state);

        assert_eq!(plan.ops.len(), 1);
        assert_eq!(plan.ops[0].kind, ChangeKind::Updated);
        assert_eq!(plan.ops[0].old_reference.as_deref(), Some("ref1"));
        assert_eq!(plan.draft.get("a"), Some(&StateRecord::pending(sha256("world"))));
    }

    #[test]
    fn matching_digest_is_unchanged() {
        let state = state_with(&[("a", "hello", "ref1")]);

        let plan = reconcile(&[Item::new("a", "hello")], &state);

        assert!(plan.is_empty());
        assert_eq!(plan.unchanged, vec!["a".to_string()]);
        assert_eq!(plan.draft, state);
    }

    #[test]
    fn ops_follow_fetch_order() {
        let state = state_with(&[("m", "old", "ref-m")]);
        let fetched = vec![
            Item::new("z", "new z"),
            Item::new("m", "new m"),
            Item::new("a", "new a"),
        ];

        let plan = reconcile(&fetched, &state);

        let order: Vec<_> = plan.ops.iter().map(|op| op.identifier.as_str()).collect();
        assert_eq!(order, vec!["z", "m", "a"]);
        assert_eq!(plan.count(ChangeKind::Added), 2);
        assert_eq!(plan.count(ChangeKind::Updated), 1);
    }

    #[test]
    fn duplicate_identifier_compares_against_earlier_occurrence() {
        let fetched = vec![Item::new("a", "first"), Item::new("a", "second")];

        let plan = reconcile(&fetched, &SyncState::new());

        let kinds: Vec<_> = plan.ops.iter().map(|op| op.kind).collect();
        assert_eq!(kinds, vec![ChangeKind::Added, ChangeKind::Updated]);
        assert_eq!(plan.draft.get("a").unwrap().digest, sha256("second"));
    }

    #[test]
    fn duplicate_with_identical_content_is_skipped() {
        let fetched = vec![Item::new("a", "same"), Item::new("a", "same")];

        let plan = reconcile(&fetched, &SyncState::new());

        assert_eq!(plan.ops.len(), 1);
        assert_eq!(plan.unchanged, vec!["a".to_string()]);
    }

    #[test]
    fn pending_record_is_planned_as_added() {
        let mut state = SyncState::new();
        state.insert("a", StateRecord::pending(sha256("hello")));

        let plan = reconcile(&[Item::new("a", "hello")], &state);

        assert_eq!(plan.ops.len(), 1);
        assert_eq!(plan.ops[0].kind, ChangeKind::Added);
    }

    #[test]
    fn successful_upload_commits_digest_and_reference() {
        let mut committed = SyncState::new();
        let plan = reconcile(&[Item::new("a", "hello")], &committed);

        apply_outcome(&mut committed, &plan.ops[0], &uploaded("ref1"));

        assert_eq!(committed.get("a"), Some(&StateRecord::synced(sha256("hello"), "ref1")));
    }

    #[test]
    fn failed_added_upload_leaves_no_entry() {
        let mut committed = SyncState::new();
        let plan = reconcile(&[Item::new("a", "hello")], &committed);

        apply_outcome(&mut committed, &plan.ops[0], &OpOutcome::failed("boom"));

        assert!(!committed.contains("a"));
    }

    #[test]
    fn failed_updated_upload_keeps_original_record() {
        let original = state_with(&[("a", "hello", "ref1")]);
        let mut committed = original.clone();
        let plan = reconcile(&[Item::new("a", "world")], &committed);

        apply_outcome(&mut committed, &plan.ops[0], &OpOutcome::failed("boom"));

        assert_eq!(committed, original);
    }

    #[test]
    fn live_reference_tracks_uploads_within_a_run() {
        let mut committed = SyncState::new();
        let fetched = vec![Item::new("a", "first"), Item::new("a", "second")];
        let plan = reconcile(&fetched, &committed);

        assert_eq!(live_reference(&committed, "a"), None);
        apply_outcome(&mut committed, &plan.ops[0], &uploaded("ref1"));
        assert_eq!(live_reference(&committed, "a"), Some("ref1"));
        apply_outcome(&mut committed, &plan.ops[1], &uploaded("ref2"));

        assert_eq!(committed.get("a"), Some(&StateRecord::synced(sha256("second"), "ref2")));
    }
}
