use std::path::Path;
use std::sync::Arc;

use arview_common::{MemoryStore, StateStore, TabKind, WorkspaceId};
use serde_json::json;

use super::*;
use crate::errors::WorkspaceError;
use crate::manager::TabManager;
use crate::session::{SessionState, SessionStore, TabSnapshot};
use crate::testing::RecordingHost;

fn coordinator(store: Arc<dyn StateStore>) -> WorkspaceCoordinator {
    WorkspaceCoordinator::new(
        TabManager::new(30),
        WorkspaceManager::load(store.clone()),
        SessionStore::new(store),
    )
}

fn targets(c: &WorkspaceCoordinator) -> Vec<String> {
    c.tabs()
        .order()
        .iter()
        .filter_map(|id| c.tabs().tab(*id))
        .map(|t| t.target().to_string())
        .collect()
}

// =============================================================================
// WorkspaceManager
// =============================================================================

#[test]
fn create_activates_and_counts_from_one() {
    let mut m = WorkspaceManager::load(Arc::new(MemoryStore::new()));
    let a = m.create(Path::new("/a.pdf"), TabKind::Pdf, None);
    let b = m.create(Path::new("/b.md"), TabKind::Markdown, None);
    assert_eq!(a, WorkspaceId(1));
    assert_eq!(b, WorkspaceId(2));
    assert_eq!(m.active_id(), Some(b));
    assert_eq!(m.find_by_path("/a.pdf"), Some(a));
}

#[test]
fn summaries_most_recent_first() {
    let mut m = WorkspaceManager::load(Arc::new(MemoryStore::new()));
    let a = m.create(Path::new("/a.pdf"), TabKind::Pdf, None);
    let b = m.create(Path::new("/b.pdf"), TabKind::Pdf, None);
    m.activate(a).unwrap();

    let summaries = m.summaries();
    assert_eq!(summaries[0].id, a);
    assert_eq!(summaries[1].id, b);
    assert_eq!(summaries[0].display_name, "a.pdf");
    assert!(summaries[0].last_accessed > summaries[1].last_accessed);
}

#[test]
fn rename_sets_and_clears_display_name() {
    let mut m = WorkspaceManager::load(Arc::new(MemoryStore::new()));
    let a = m.create(Path::new("/docs/a.pdf"), TabKind::Pdf, None);
    m.rename(a, "Thesis").unwrap();
    assert_eq!(m.get(a).unwrap().name(), "Thesis");
    m.rename(a, "  ").unwrap();
    assert_eq!(m.get(a).unwrap().name(), "a.pdf");
    assert!(matches!(
        m.rename(WorkspaceId(9), "x"),
        Err(WorkspaceError::NotFound(_))
    ));
}

#[test]
fn deleting_last_workspace_is_refused() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
    let mut m = WorkspaceManager::load(store.clone());
    let a = m.create(Path::new("/a.pdf"), TabKind::Pdf, None);
    let before = m.record().clone();

    assert!(matches!(m.delete(a), Err(WorkspaceError::LastWorkspace)));
    assert_eq!(m.record(), &before);
    assert_eq!(WorkspaceManager::load(store).record(), &before);
}

#[test]
fn deleting_active_promotes_lowest_id() {
    let mut m = WorkspaceManager::load(Arc::new(MemoryStore::new()));
    let a = m.create(Path::new("/a.pdf"), TabKind::Pdf, None);
    let b = m.create(Path::new("/b.pdf"), TabKind::Pdf, None);
    let c = m.create(Path::new("/c.pdf"), TabKind::Pdf, None);
    m.activate(b).unwrap();

    m.delete(b).unwrap();
    assert_eq!(m.active_id(), Some(a));
    m.delete(c).unwrap();
    assert_eq!(m.active_id(), Some(a));
    assert_eq!(m.len(), 1);
}

#[test]
fn record_persists_across_loads() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
    let mut m = WorkspaceManager::load(store.clone());
    m.create(Path::new("/a.pdf"), TabKind::Pdf, None);
    let b = m.create(Path::new("/b.pdf"), TabKind::Pdf, None);

    let reloaded = WorkspaceManager::load(store.clone());
    assert_eq!(reloaded.len(), 2);
    assert_eq!(reloaded.active_id(), Some(b));

    let raw = store.get(WORKSPACES_KEY).unwrap().unwrap();
    assert_eq!(raw["nextId"], json!(3));
    assert_eq!(raw["activeWorkspaceId"], json!("2"));
    assert_eq!(raw["workspaces"]["1"]["filePath"], json!("/a.pdf"));
    assert_eq!(raw["workspaces"]["1"]["fileType"], json!("pdf"));
}

#[test]
fn corrupt_record_starts_empty() {
    let store = Arc::new(MemoryStore::new());
    store.set(WORKSPACES_KEY, json!([1, 2, 3])).unwrap();
    let m = WorkspaceManager::load(store);
    assert!(m.is_empty());
    assert_eq!(m.active_id(), None);
}

#[test]
fn load_repairs_counters() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(
            WORKSPACES_KEY,
            json!({
                "workspaces": {
                    "4": {"id": "4", "filePath": "/x.pdf", "fileType": "pdf"}
                },
                "activeWorkspaceId": "9",
                "nextId": 1
            }),
        )
        .unwrap();
    let mut m = WorkspaceManager::load(store);
    assert_eq!(m.active_id(), None);
    let id = m.create(Path::new("/y.pdf"), TabKind::Pdf, None);
    assert_eq!(id, WorkspaceId(5));
}

// =============================================================================
// WorkspaceCoordinator
// =============================================================================

#[test]
fn open_file_creates_single_document_tab() {
    let mut host = RecordingHost::default();
    let mut c = coordinator(Arc::new(MemoryStore::new()));
    let id = c.open_file(Path::new("/a.pdf"), &mut host).unwrap().id();

    assert_eq!(c.workspaces().active_id(), Some(id));
    assert_eq!(targets(&c), vec!["/a.pdf"]);
    assert_eq!(c.workspaces().get(id).unwrap().tabs.len(), 1);
}

#[test]
fn open_file_rejects_non_documents() {
    let mut host = RecordingHost::default();
    let mut c = coordinator(Arc::new(MemoryStore::new()));
    assert!(matches!(
        c.open_file(Path::new("/a.txt"), &mut host),
        Err(WorkspaceError::Tab(_))
    ));
    assert!(c.workspaces().is_empty());
}

#[test]
fn reopening_active_file_is_a_no_op() {
    let mut host = RecordingHost::default();
    let mut c = coordinator(Arc::new(MemoryStore::new()));
    let first = c.open_file(Path::new("/a.pdf"), &mut host).unwrap();
    c.open_url("example.com", &mut host).unwrap();
    let before = c.tabs().order().to_vec();

    let again = c.open_file(Path::new("/a.pdf"), &mut host).unwrap();
    assert!(!first.is_already_active());
    assert_eq!(again, OpenOutcome::AlreadyActive(first.id()));
    assert_eq!(c.tabs().order(), before.as_slice());
}

#[test]
fn a_b_a_restores_order_and_active_index() {
    let mut host = RecordingHost::default();
    let mut c = coordinator(Arc::new(MemoryStore::new()));

    c.open_file(Path::new("/a.pdf"), &mut host).unwrap();
    let w1 = c.open_url("https://one.com", &mut host).unwrap();
    c.open_url("https://two.com", &mut host).unwrap();
    c.tabs_mut().record_navigation(w1, "https://one.com/next");
    c.tabs_mut().switch_to_tab(w1, &mut host);
    let order_before = targets(&c);
    let active_before = c.tabs().active_index();

    c.open_file(Path::new("/b.md"), &mut host).unwrap();
    assert_eq!(targets(&c), vec!["/b.md"]);
    assert_eq!(host.live.len(), 1);

    c.open_file(Path::new("/a.pdf"), &mut host).unwrap();
    assert_eq!(targets(&c), order_before);
    assert_eq!(c.tabs().active_index(), active_before);

    let restored = c.tabs().active_tab().unwrap();
    assert_eq!(restored.history.entries(), ["https://one.com", "https://one.com/next"]);
    assert_eq!(host.live.len(), 3);
}

#[test]
fn switch_restores_document_view_state() {
    let mut host = RecordingHost::default();
    let mut c = coordinator(Arc::new(MemoryStore::new()));
    let a = c.open_file(Path::new("/a.pdf"), &mut host).unwrap().id();
    let doc = c.tabs().first_document_tab().unwrap();
    c.tabs_mut().update_view_state(doc, json!({"page": 3}));

    c.open_file(Path::new("/b.pdf"), &mut host).unwrap();
    c.switch_workspace(a, &mut host).unwrap();

    let doc = c.tabs().first_document_tab().unwrap();
    assert_eq!(c.tabs().view_state(doc), Some(&json!({"page": 3})));
    assert_eq!(host.view_states.last().unwrap().1, json!({"page": 3}));
}

#[test]
fn switch_to_unknown_workspace_changes_nothing() {
    let mut host = RecordingHost::default();
    let mut c = coordinator(Arc::new(MemoryStore::new()));
    c.open_file(Path::new("/a.pdf"), &mut host).unwrap();
    assert!(matches!(
        c.switch_workspace(WorkspaceId(42), &mut host),
        Err(WorkspaceError::NotFound(_))
    ));
    assert_eq!(targets(&c), vec!["/a.pdf"]);
}

#[test]
fn switch_skips_tabs_that_fail_to_mount() {
    let mut host = RecordingHost::default();
    let mut c = coordinator(Arc::new(MemoryStore::new()));
    let a = c.open_file(Path::new("/a.pdf"), &mut host).unwrap().id();
    c.open_url("https://broken.com", &mut host).unwrap();
    c.open_file(Path::new("/b.pdf"), &mut host).unwrap();

    host.fail_targets.insert("https://broken.com".into());
    c.switch_workspace(a, &mut host).unwrap();
    assert_eq!(targets(&c), vec!["/a.pdf"]);
}

#[test]
fn anchor_comes_back_when_it_fails_to_mount() {
    let mut host = RecordingHost::default();
    let store: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
    let mut c = coordinator(store);
    let a = c.open_file(Path::new("/a.pdf"), &mut host).unwrap().id();
    c.open_url("https://x.com", &mut host).unwrap();
    c.open_file(Path::new("/b.pdf"), &mut host).unwrap();

    host.fail_targets.insert("/a.pdf".into());
    c.switch_workspace(a, &mut host).unwrap();
    assert_eq!(targets(&c), vec!["https://x.com"]);
    host.fail_targets.clear();

    let outcome = c.open_file(Path::new("/a.pdf"), &mut host).unwrap();
    assert_eq!(outcome, OpenOutcome::Opened(a));
    assert_eq!(targets(&c), vec!["/a.pdf", "https://x.com"]);

    c.persist_current();
    let saved: Vec<_> = c
        .workspaces()
        .get(a)
        .unwrap()
        .tabs
        .iter()
        .map(|t| t.target().to_string())
        .collect();
    assert_eq!(saved, vec!["/a.pdf", "https://x.com"]);
}

#[test]
fn switch_with_no_saved_tabs_opens_anchor() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
    let mut m = WorkspaceManager::load(store.clone());
    let empty = m.create(Path::new("/empty.md"), TabKind::Markdown, None);
    m.create(Path::new("/other.pdf"), TabKind::Pdf, None);

    let mut host = RecordingHost::default();
    let mut c = WorkspaceCoordinator::new(TabManager::new(30), m, SessionStore::new(store));
    c.switch_workspace(empty, &mut host).unwrap();
    assert_eq!(targets(&c), vec!["/empty.md"]);
    assert_eq!(c.tabs().active_index(), Some(0));
}

#[test]
fn restore_session_clamps_active_index() {
    let mut host = RecordingHost::default();
    let mut c = coordinator(Arc::new(MemoryStore::new()));
    let state = SessionState {
        tabs: vec![
            TabSnapshot::Pdf {
                target: "/a.pdf".into(),
                title: "a.pdf".into(),
                view_state: None,
            },
            TabSnapshot::Web {
                target: "https://x.com".into(),
                title: String::new(),
                history: vec!["https://x.com".into()],
                history_index: 0,
            },
        ],
        active_tab_index: 7,
        last_saved: 0,
    };
    assert_eq!(c.restore_session(&state, &mut host), 2);
    assert_eq!(c.tabs().active_index(), Some(1));
}

#[test]
fn delete_active_workspace_remounts_next() {
    let mut host = RecordingHost::default();
    let mut c = coordinator(Arc::new(MemoryStore::new()));
    c.open_file(Path::new("/a.pdf"), &mut host).unwrap();
    let b = c.open_file(Path::new("/b.pdf"), &mut host).unwrap().id();

    c.delete_workspace(b, &mut host).unwrap();
    assert_eq!(targets(&c), vec!["/a.pdf"]);
    assert!(matches!(
        c.delete_workspace(WorkspaceId(1), &mut host),
        Err(WorkspaceError::LastWorkspace)
    ));
    assert_eq!(targets(&c), vec!["/a.pdf"]);
}

#[test]
fn new_workspace_replays_saved_session() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
    {
        let mut host = RecordingHost::default();
        let mut c = coordinator(store.clone());
        c.open_file(Path::new("/a.pdf"), &mut host).unwrap();
        c.open_url("https://saved.com", &mut host).unwrap();
        c.persist_current();
    }

    // Same session store, fresh workspace record.
    store.delete(WORKSPACES_KEY).unwrap();
    let mut host = RecordingHost::default();
    let mut c = coordinator(store);
    c.open_file(Path::new("/a.pdf"), &mut host).unwrap();
    assert_eq!(targets(&c), vec!["/a.pdf", "https://saved.com"]);
}

#[test]
fn auto_save_off_skips_session_store() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
    let mut host = RecordingHost::default();
    let mut c = coordinator(store.clone());
    c.set_auto_save(false);
    c.open_file(Path::new("/a.pdf"), &mut host).unwrap();
    c.persist_current();
    assert!(c.sessions().load("/a.pdf").is_none());
    assert!(store.get(WORKSPACES_KEY).unwrap().is_some());
}
