use docsync_core::PendingChanges;
use docsync_test_utils::fakes::MemorySource;
use docsync_test_utils::workspace::TestWorkspace;
use pretty_assertions::assert_eq;

#[test]
fn test_status_of_fresh_workspace() {
    let ws = TestWorkspace::new();

    let report = ws.engine().status().unwrap();

    assert_eq!(report.tracked, 0);
    assert!(report.pending.is_empty());
    assert!(report.changes.is_none());
    assert!(report.is_clean());
}

#[test]
fn test_status_against_source_lists_pending_changes() {
    let ws = TestWorkspace::new();
    ws.seed(&[("same", "s", "r1"), ("edited", "old", "r2"), ("gone", "g", "r3")]);
    let mut source = MemorySource::new([("same", "s"), ("edited", "new"), ("fresh", "f")]);

    let report = ws.engine().status_against(&mut source).unwrap();

    assert_eq!(report.tracked, 3);
    assert_eq!(
        report.changes,
        Some(PendingChanges {
            to_add: vec!["fresh".into()],
            to_update: vec!["edited".into()],
            unchanged: 1,
            stale: vec!["gone".into()],
        })
    );
    assert!(!report.is_clean());
}

#[test]
fn test_status_does_not_write_state() {
    let ws = TestWorkspace::new();
    let mut source = MemorySource::new([("a", "hello")]);

    ws.engine().status_against(&mut source).unwrap();

    assert!(ws.state_bytes().is_none());
    assert_eq!(source.fetches, 1);
}
