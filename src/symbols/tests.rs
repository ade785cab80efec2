//! Tests for the symbol table and its state file.

use super::*;
use std::collections::BTreeMap;
use tempfile::TempDir;

fn store_in(dir: &TempDir) -> StateStore {
    StateStore::new(dir.path().join(".tempdd").join("state.json"))
}

#[test]
fn test_get_unset_symbol_is_unresolved() {
    let table = SymbolTable::in_memory();
    assert_eq!(table.get("PATH_PRD"), Binding::Unresolved);
    assert!(!table.get("PATH_PRD").is_resolved());
}

#[test]
fn test_set_then_get() {
    let mut table = SymbolTable::in_memory();
    table.set("PATH_PRD", "/p/docs/prd.md").unwrap();

    assert_eq!(
        table.get("PATH_PRD"),
        Binding::Resolved("/p/docs/prd.md".to_string())
    );
    assert_eq!(table.get("PATH_PRD").value(), Some("/p/docs/prd.md"));
}

#[test]
fn test_set_overwrites_last_write_wins() {
    let mut table = SymbolTable::in_memory();
    table.set("PATH_PRD", "first").unwrap();
    table.set("PATH_PRD", "second").unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.get("PATH_PRD").value(), Some("second"));
}

#[test]
fn test_load_replaces_entries() {
    let mut table = SymbolTable::in_memory();
    table.set("OLD", "x").unwrap();

    let mut mapping = BTreeMap::new();
    mapping.insert("PATH_ARCH".to_string(), "/a.md".to_string());
    table.load(mapping.clone());

    assert!(!table.contains("OLD"));
    assert_eq!(table.snapshot(), mapping);
}

#[test]
fn test_open_missing_state_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let table = SymbolTable::open(store_in(&temp_dir)).unwrap();

    assert!(table.is_empty());
    assert!(table.workflow().is_none());
}

#[test]
fn test_set_flushes_immediately() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    let mut table = SymbolTable::open(store.clone()).unwrap();

    table.set("PATH_PRD", "/p/docs/prd.md").unwrap();

    let on_disk = store.read().unwrap();
    assert_eq!(on_disk.symbols.get("PATH_PRD").unwrap(), "/p/docs/prd.md");
    assert!(on_disk.updated_at.is_some());
}

#[test]
fn test_snapshot_roundtrip_across_reopen() {
    let temp_dir = TempDir::new().unwrap();

    let mut first = SymbolTable::open(store_in(&temp_dir)).unwrap();
    first.set("PATH_PRD", "/p/docs/prd.md").unwrap();
    first.set("PATH_ARCH", "/p/docs/arch.md").unwrap();
    let snapshot = first.snapshot();
    drop(first);

    let reopened = SymbolTable::open(store_in(&temp_dir)).unwrap();
    assert_eq!(reopened.snapshot(), snapshot);
}

#[test]
fn test_workflow_selection_is_preserved_on_flush() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    store
        .write(&ProjectState {
            workflow: Some("default".to_string()),
            ..ProjectState::default()
        })
        .unwrap();

    let mut table = SymbolTable::open(store.clone()).unwrap();
    assert_eq!(table.workflow(), Some("default"));
    table.set("PATH_PRD", "x").unwrap();

    assert_eq!(store.read().unwrap().workflow.as_deref(), Some("default"));
}

#[test]
fn test_failed_flush_rolls_back() {
    let temp_dir = TempDir::new().unwrap();
    // A directory where the state file should be makes the rename fail.
    let state_path = temp_dir.path().join("state.json");
    std::fs::create_dir_all(state_path.join("occupied")).unwrap();

    let mut table = SymbolTable {
        entries: BTreeMap::new(),
        workflow: None,
        store: Some(StateStore::new(&state_path)),
    };

    assert!(table.set("PATH_PRD", "x").is_err());
    assert!(!table.contains("PATH_PRD"));
}

#[test]
fn test_corrupted_state_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "{ not json").unwrap();

    let err = SymbolTable::open(store).unwrap_err();
    assert!(err.to_string().contains("corrupted"));
}

#[test]
fn test_newer_state_version_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let store = store_in(&temp_dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), r#"{"version": 99, "symbols": {}}"#).unwrap();

    assert!(store.read().is_err());
}
