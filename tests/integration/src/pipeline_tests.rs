//! Full pipeline: help-center pages -> markdown items -> sync engine ->
//! vector-store index, with both ends replaced by in-memory doubles.

use std::collections::{BTreeMap, BTreeSet};

use docsync_core::{ChangeKind, ContentSource, Item, OpOutcome, SyncOptions, SyncReport};
use docsync_fs::compute_content_checksum;
use docsync_index::{IndexError, VectorStoreApi, VectorStoreIndex};
use docsync_source::{Article, ArticlePage, SourceError, client::collect_pages};
use docsync_test_utils::workspace::TestWorkspace;
use pretty_assertions::assert_eq;

/// Serves pre-parsed API pages through the real pagination and conversion code
struct PagedSource {
    pages: Vec<ArticlePage>,
    max_articles: usize,
}

impl PagedSource {
    fn new(pages: &[&str]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|raw| serde_json::from_str(raw).unwrap())
                .collect(),
            max_articles: 0,
        }
    }
}

impl ContentSource for PagedSource {
    type Error = SourceError;

    fn fetch(&mut self) -> Result<Vec<Item>, SourceError> {
        let pages = &self.pages;
        collect_pages(
            |page| Ok(pages.get(page as usize - 1).cloned().unwrap_or_default()),
            self.max_articles,
        )?
        .iter()
        .map(Article::to_item)
        .collect()
    }
}

/// Vector store kept in memory
#[derive(Default)]
struct MemoryStore {
    files: BTreeMap<String, String>,
    attached: BTreeSet<String>,
    next_id: usize,
    reject_attach: Option<String>,
}

impl MemoryStore {
    fn attached_contents(&self) -> Vec<&str> {
        self.attached.iter().map(|id| self.files[id].as_str()).collect()
    }
}

impl VectorStoreApi for MemoryStore {
    fn create_file(&mut self, file_name: &str, content: &str) -> docsync_index::Result<String> {
        self.next_id += 1;
        let id = format!("file-{}", self.next_id);
        self.files.insert(id.clone(), content.to_string());
        if self.reject_attach.as_deref() == Some(file_name) {
            // Remembered so attach_file can reject this id
            self.reject_attach = Some(id.clone());
        }
        Ok(id)
    }

    fn attach_file(&mut self, file_id: &str) -> docsync_index::Result<()> {
        if self.reject_attach.as_deref() == Some(file_id) {
            return Err(IndexError::Status {
                operation: "attach file",
                status: 500,
                body: "vector store unavailable".into(),
            });
        }
        self.attached.insert(file_id.to_string());
        Ok(())
    }

    fn delete_file(&mut self, file_id: &str) -> docsync_index::Result<()> {
        self.files.remove(file_id);
        self.attached.remove(file_id);
        Ok(())
    }
}

const PAGE_ONE: &str = r#"{
  "articles": [
    {"id": 1, "title": "Getting Started", "body": "<p>Plug it <strong>in</strong>.</p>", "html_url": "https://help.example.com/1"},
    {"id": 2, "title": "Wi-Fi Setup", "body": "<ul><li>Open settings</li><li>Pick a network</li></ul>", "html_url": "https://help.example.com/2"}
  ],
  "next_page": "https://help.example.com/api/v2/help_center/en-us/articles.json?page=2"
}"#;

const PAGE_TWO: &str = r#"{
  "articles": [
    {"id": 3, "title": null, "body": "<p>Orphan article</p>", "html_url": "https://help.example.com/3"}
  ],
  "next_page": null
}"#;

fn sync(ws: &TestWorkspace, source: &mut PagedSource, index: &mut VectorStoreIndex<MemoryStore>) -> SyncReport {
    ws.engine()
        .run(source, index, &SyncOptions::default())
        .unwrap()
}

#[test]
fn test_first_sync_mirrors_every_article() {
    let ws = TestWorkspace::new();
    let mut source = PagedSource::new(&[PAGE_ONE, PAGE_TWO]);
    let mut index = VectorStoreIndex::new(MemoryStore::default());

    let report = sync(&ws, &mut source, &mut index);

    assert_eq!((report.added, report.failed), (3, 0));
    let state = ws.state();
    let identifiers: Vec<&str> = state.iter().map(|(id, _)| id).collect();
    assert_eq!(identifiers, vec!["getting-started", "untitled", "wi-fi-setup"]);

    let cached = ws.cached("getting-started").unwrap();
    assert!(cached.starts_with("# Getting Started\n\n"));
    assert!(cached.ends_with("[Article URL](https://help.example.com/1)\n"));
    assert_eq!(
        state.get("getting-started").unwrap().digest,
        compute_content_checksum(&cached)
    );
    assert_eq!(index.api().attached.len(), 3);
}

#[test]
fn test_edited_article_replaces_remote_file() {
    let ws = TestWorkspace::new();
    let mut index = VectorStoreIndex::new(MemoryStore::default());
    sync(&ws, &mut PagedSource::new(&[PAGE_ONE, PAGE_TWO]), &mut index);
    let before = ws.state().get("wi-fi-setup").cloned().unwrap();

    let edited = PAGE_ONE.replace("Pick a network", "Pick your network");
    let report = sync(&ws, &mut PagedSource::new(&[edited.as_str(), PAGE_TWO]), &mut index);

    assert_eq!((report.updated, report.skipped), (1, 2));
    assert_eq!(report.ops[0].identifier, "wi-fi-setup");
    let after = ws.state().get("wi-fi-setup").cloned().unwrap();
    assert_ne!(after.remote_reference, before.remote_reference);
    assert!(!index.api().files.contains_key(before.remote_reference.as_deref().unwrap()));
    assert_eq!(index.api().attached.len(), 3);
    assert!(index.api().attached_contents().iter().any(|c| c.contains("Pick your network")));
}

#[test]
fn test_attach_failure_keeps_previous_version_live() {
    let ws = TestWorkspace::new();
    let mut index = VectorStoreIndex::new(MemoryStore::default());
    sync(&ws, &mut PagedSource::new(&[PAGE_ONE, PAGE_TWO]), &mut index);
    let before = ws.state_bytes().unwrap();
    let old = ws.state().get("getting-started").unwrap().remote_reference.clone().unwrap();

    let edited = PAGE_ONE.replace("Plug it", "Connect it");
    let mut fresh = MemoryStore::default();
    fresh.reject_attach = Some("getting-started.md".into());
    let mut failing = VectorStoreIndex::new(fresh);
    let report = sync(&ws, &mut PagedSource::new(&[edited.as_str(), PAGE_TWO]), &mut failing);

    assert_eq!(report.failed, 1);
    assert_eq!(report.ops[0].kind, ChangeKind::Updated);
    assert!(matches!(report.ops[0].outcome, Some(OpOutcome::Failed { .. })));
    assert_eq!(ws.state_bytes().unwrap(), before);
    assert!(failing.api().files.is_empty(), "unattached upload is cleaned up");
    assert!(index.api().attached.contains(&old));
}

#[test]
fn test_article_limit_caps_the_run() {
    let ws = TestWorkspace::new();
    let mut source = PagedSource::new(&[PAGE_ONE, PAGE_TWO]);
    source.max_articles = 1;
    let mut index = VectorStoreIndex::new(MemoryStore::default());

    let report = sync(&ws, &mut source, &mut index);

    assert_eq!(report.added, 1);
    assert_eq!(ws.state().len(), 1);
    assert!(ws.state().contains("getting-started"));
}

#[test]
fn test_legacy_state_entries_match_transliterated_slugs() {
    let ws = TestWorkspace::new();
    std::fs::create_dir_all(ws.paths().data_dir).unwrap();
    std::fs::write(
        ws.state_file(),
        format!(
            r#"{{
  "what-s-new-in-2024": {{"hash": "{}", "file_id": "file-legacy"}},
  "cafe-menu-boards": {{"hash": "{}", "file_id": "file-cafe"}}
}}"#,
            compute_content_checksum("older release notes"),
            compute_content_checksum("older menu article")
        ),
    )
    .unwrap();
    let page = r#"{
  "articles": [
    {"id": 7, "title": "What's New in 2024", "body": "<p>Release notes</p>", "html_url": "https://help.example.com/7"},
    {"id": 8, "title": "Café Menu Boards", "body": "<p>Menus</p>", "html_url": "https://help.example.com/8"}
  ],
  "next_page": null
}"#;
    let mut store = MemoryStore::default();
    for legacy in ["file-legacy", "file-cafe"] {
        store.files.insert(legacy.into(), "old".into());
        store.attached.insert(legacy.into());
    }
    let mut index = VectorStoreIndex::new(store);

    let report = sync(&ws, &mut PagedSource::new(&[page]), &mut index);

    assert_eq!((report.added, report.updated), (0, 2));
    assert!(report.ops.iter().all(|op| op.kind == ChangeKind::Updated));
    assert!(report.stale.is_empty());
    assert!(!index.api().files.contains_key("file-legacy"));
    assert!(!index.api().files.contains_key("file-cafe"));
    assert_eq!(index.api().attached.len(), 2);
    let state = ws.state();
    assert_eq!(state.len(), 2);
    assert!(state.contains("what-s-new-in-2024"));
    assert!(state.contains("cafe-menu-boards"));
}
