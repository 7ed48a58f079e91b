//! Tests for SnapshotStore

use std::sync::Arc;

use tempfile::TempDir;

use famtree::application::services::SnapshotStore;
use famtree::application::ApplicationError;
use famtree::domain::{FamilyTree, ParentRole, PersonData};
use famtree::infrastructure::traits::RealFileSystem;

fn store_in(dir: &TempDir, name: &str) -> SnapshotStore {
    SnapshotStore::new(Arc::new(RealFileSystem), dir.path().join(name))
}

fn john_with_sam() -> FamilyTree {
    let mut tree = FamilyTree::new(PersonData::new("Doe", "John", "1950-01-01"));
    let john = tree.root();
    let jane = tree.add_person(PersonData::new("Doe", "Jane", "1952-03-04"));
    let sam = tree.add_person(PersonData::new("Doe", "Sam", "1980-05-06"));
    tree.marry(john, jane).unwrap();
    tree.attach_child(john, sam, ParentRole::Father).unwrap();
    tree
}

#[test]
fn given_no_snapshot_when_loading_then_returns_none() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "family_tree.json");

    let loaded = store.load().unwrap();

    assert!(loaded.is_none());
    assert!(!store.exists());
}

#[test]
fn given_saved_tree_when_loading_then_restores_children_without_marriage() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "family_tree.json");
    store.save(&john_with_sam()).unwrap();

    let tree = store.load().unwrap().expect("snapshot should exist");

    let root = tree.get(tree.root()).unwrap();
    assert_eq!(root.data, PersonData::new("Doe", "John", "1950-01-01"));
    assert_eq!(root.spouse, None);
    assert_eq!(root.children.len(), 1);
    let sam = tree.get(root.children[0]).unwrap();
    assert_eq!(sam.data.given_name, "Sam");
    assert_eq!(sam.father, None);
}

#[test]
fn given_saved_tree_when_reading_file_then_is_indented_json_with_spouse_name() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "family_tree.json");

    store.save(&john_with_sam()).unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    assert!(content.starts_with("{\n  \"surname\": \"Doe\""));
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["spouse"], "Jane");
    assert_eq!(value["children"][0]["given_name"], "Sam");
    assert_eq!(value["children"][0]["spouse"], serde_json::Value::Null);
}

#[test]
fn given_existing_snapshot_when_saving_then_overwrites_it() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "family_tree.json");
    store.save(&john_with_sam()).unwrap();

    store
        .save(&FamilyTree::new(PersonData::new("Roe", "Max", "1940-02-02")))
        .unwrap();

    let tree = store.load().unwrap().unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.get(tree.root()).unwrap().data.surname, "Roe");
}

#[test]
fn given_non_ascii_names_when_saving_then_writes_them_unescaped() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "family_tree.json");
    let tree = FamilyTree::new(PersonData::new("Lefèvre", "Zoé", "1931-12-24"));

    store.save(&tree).unwrap();

    let content = std::fs::read_to_string(store.path()).unwrap();
    assert!(content.contains("\"Lefèvre\""));
    let reloaded = store.load().unwrap().unwrap();
    assert_eq!(reloaded.get(reloaded.root()).unwrap().data.given_name, "Zoé");
}

#[test]
fn given_missing_directory_when_saving_then_creates_it() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "nested/dir/family_tree.json");

    store.save(&john_with_sam()).unwrap();

    assert!(store.exists());
}

#[test]
fn given_malformed_snapshot_when_loading_then_returns_snapshot_error() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "family_tree.json");
    std::fs::write(store.path(), "{ \"surname\": \"Doe\" ").unwrap();

    let err = store.load().unwrap_err();

    match err {
        ApplicationError::Snapshot { path, .. } => assert_eq!(path, store.path()),
        other => panic!("expected snapshot error, got {other:?}"),
    }
}

#[test]
fn given_snapshot_without_children_key_when_loading_then_root_has_no_children() {
    let temp = TempDir::new().unwrap();
    let store = store_in(&temp, "family_tree.json");
    std::fs::write(
        store.path(),
        r#"{"surname": "Doe", "given_name": "John", "birth_date": "1950-01-01", "spouse": null}"#,
    )
    .unwrap();

    let tree = store.load().unwrap().unwrap();

    assert!(tree.get(tree.root()).unwrap().children.is_empty());
}
