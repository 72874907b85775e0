// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tests for watch document loading, merging and saving.

use super::*;
use std::collections::BTreeMap;

const SAMPLE_WATCH: &str = "---
- group: mykind.example.com
  version: v1alpha1
  kind: MyKind
  chart: helm-charts/mykind";

fn app_gvk() -> GroupVersionKind {
    GroupVersionKind::new("app.example.com", "v1alpha1", "App")
}

fn project_with(contents: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(WATCHES_FILE), contents).unwrap();
    dir
}

#[test]
fn test_upsert_creates_missing_document() {
    let dir = tempfile::tempdir().unwrap();

    upsert_watch(&app_gvk(), "", dir.path()).unwrap();

    let contents = fs::read_to_string(dir.path().join(WATCHES_FILE)).unwrap();
    assert_eq!(
        contents,
        "---\n- group: app.example.com\n  version: v1alpha1\n  kind: App\n"
    );

    let registry = WatchRegistry::load(dir.path().join(WATCHES_FILE)).unwrap();
    assert_eq!(registry.entries(), &[WatchEntry::new(app_gvk(), "")]);
}

#[test]
fn test_upsert_appends_after_existing_entry() {
    let dir = project_with(SAMPLE_WATCH);

    update_watch_for_resource_type(&app_gvk(), dir.path(), "appservice").unwrap();

    let contents = fs::read_to_string(dir.path().join(WATCHES_FILE)).unwrap();
    assert_eq!(
        contents,
        "---
- group: mykind.example.com
  version: v1alpha1
  kind: MyKind
  chart: helm-charts/mykind
- group: app.example.com
  version: v1alpha1
  kind: App
  chart: appservice
"
    );
}

#[test]
fn test_duplicate_upsert_leaves_document_untouched() {
    let dir = project_with(SAMPLE_WATCH);
    let path = dir.path().join(WATCHES_FILE);

    update_watch_for_resource_type(&app_gvk(), dir.path(), "").unwrap();
    let after_first = fs::read(&path).unwrap();

    let err = update_watch_for_resource_type(&app_gvk(), dir.path(), "other-chart").unwrap_err();
    assert!(matches!(&err, WatchError::Duplicate(gvk) if *gvk == app_gvk()));
    assert_eq!(err.to_string(), "duplicate GVK: app.example.com/v1alpha1, Kind=App");

    assert_eq!(fs::read(&path).unwrap(), after_first);
}

#[test]
fn test_existing_entries_keep_optional_fields() {
    let original = "---
- group: cache.example.com
  version: v1
  kind: Memcached
  chart: helm-charts/memcached
  reconcilePeriod: 30s
  overrideValues:
    image.tag: 1.6.9
- group: ''
  version: v1
  kind: ConfigMap
";
    let dir = project_with(original);
    let before = WatchRegistry::load(dir.path().join(WATCHES_FILE)).unwrap();

    upsert_watch(&app_gvk(), "helm-charts/app", dir.path()).unwrap();

    let after = WatchRegistry::load(dir.path().join(WATCHES_FILE)).unwrap();
    assert_eq!(after.len(), 3);
    assert_eq!(&after.entries()[..2], before.entries());
    assert_eq!(after.entries()[0].reconcile_period.as_deref(), Some("30s"));
    assert_eq!(after.entries()[0].override_values.len(), 1);
    assert_eq!(after.entries()[2], WatchEntry::new(app_gvk(), "helm-charts/app"));
}

#[test]
fn test_mapping_document_is_malformed() {
    let dir = project_with("---\ngroup: app.example.com\nversion: v1alpha1\nkind: App\n");

    let err = WatchRegistry::load(dir.path().join(WATCHES_FILE)).unwrap_err();
    match &err {
        WatchError::Malformed { path, line, message } => {
            assert_eq!(path, &dir.path().join(WATCHES_FILE));
            assert_eq!(*line, Some(2));
            assert!(message.contains("invalid type"));
        }
        other => panic!("unexpected error: {:?}", other),
    }

    let err = upsert_watch(&app_gvk(), "", dir.path()).unwrap_err();
    assert!(matches!(err, WatchError::Malformed { .. }));
}

#[test]
fn test_second_yaml_document_is_malformed() {
    let doc = "---
- group: a.example.com
  version: v1
  kind: A
---
- group: a.example.com
  version: v1
  kind: B
";
    let dir = project_with(doc);

    let err = WatchRegistry::load(dir.path().join(WATCHES_FILE)).unwrap_err();
    match &err {
        WatchError::Malformed { line, .. } => assert_eq!(*line, Some(5)),
        other => panic!("unexpected error: {:?}", other),
    }

    let err = upsert_watch(&app_gvk(), "", dir.path()).unwrap_err();
    assert!(matches!(err, WatchError::Malformed { .. }));
    assert_eq!(fs::read_to_string(dir.path().join(WATCHES_FILE)).unwrap(), doc);
}

#[test]
fn test_trailing_empty_document_is_tolerated() {
    let dir = project_with("- group: a.example.com\n  version: v1\n  kind: A\n---\n");

    let registry = WatchRegistry::load(dir.path().join(WATCHES_FILE)).unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_document_start_lines() {
    let doc = "# header\n- a\n---\n- b\n...\n- c\n";
    assert_eq!(document_start_line(doc, 0), Some(2));
    assert_eq!(document_start_line(doc, 1), Some(3));
    assert_eq!(document_start_line(doc, 2), Some(6));
    assert_eq!(document_start_line(doc, 3), None);
    assert_eq!(document_start_line("---\n---\n- x\n", 1), Some(2));
}

#[test]
fn test_unknown_fields_are_malformed() {
    let dir = project_with("- group: g.example.com\n  version: v1\n  kind: K\n  watchAll: true\n");

    let err = WatchRegistry::load(dir.path().join(WATCHES_FILE)).unwrap_err();
    assert!(matches!(err, WatchError::Malformed { .. }));
    assert!(err.to_string().contains("watchAll"));
}

#[test]
fn test_strict_load_of_missing_file_names_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(WATCHES_FILE);

    let err = WatchRegistry::load(&path).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains(&path.display().to_string()));

    let registry = WatchRegistry::load_or_empty(&path).unwrap();
    assert!(registry.is_empty());
    assert_eq!(registry.path(), path.as_path());
}

#[test]
fn test_duplicate_entries_in_document_are_rejected() {
    let doc = "- group: a.example.com\n  version: v1\n  kind: A\n- group: a.example.com\n  version: v1\n  kind: A\n  chart: other\n";
    let dir = project_with(doc);

    let err = WatchRegistry::load(dir.path().join(WATCHES_FILE)).unwrap_err();
    assert!(matches!(err, WatchError::Duplicate(_)));
}

#[test]
fn test_same_kind_in_other_version_is_not_duplicate() {
    let dir = project_with(SAMPLE_WATCH);
    let v2 = GroupVersionKind::new("mykind.example.com", "v1beta1", "MyKind");

    upsert_watch(&v2, "", dir.path()).unwrap();

    let registry = WatchRegistry::load(dir.path().join(WATCHES_FILE)).unwrap();
    assert_eq!(registry.len(), 2);
    assert!(registry.find(&v2).is_some());
}

#[test]
fn test_entry_without_kind_is_invalid() {
    let dir = project_with("- group: a.example.com\n  version: v1\n  kind: ''\n");

    let err = WatchRegistry::load(dir.path().join(WATCHES_FILE)).unwrap_err();
    assert!(matches!(err, WatchError::InvalidEntry { .. }));
}

#[test]
fn test_empty_document_loads_as_empty_registry() {
    for contents in ["", "---\n", "---\n[]\n", "# no watches yet\n"] {
        let dir = project_with(contents);
        let registry = WatchRegistry::load(dir.path().join(WATCHES_FILE)).unwrap();
        assert!(registry.is_empty(), "{:?} should load empty", contents);
    }
}

#[test]
fn test_invalid_resource_type_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let bad = GroupVersionKind::new("app.example.com", "v1alpha1", "app");

    let err = update_watch_for_resource_type(&bad, dir.path(), "").unwrap_err();
    assert!(matches!(err, WatchError::InvalidResource(_)));
    assert!(!dir.path().join(WATCHES_FILE).exists());
}

#[test]
fn test_registry_add_and_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(WATCHES_FILE);

    let mut entry = WatchEntry::new(app_gvk(), "helm-charts/app");
    entry.reconcile_period = Some("2m".to_string());
    entry.override_values = BTreeMap::from([(
        "service.type".to_string(),
        serde_yaml::Value::String("NodePort".to_string()),
    )]);

    let mut registry = WatchRegistry::empty(&path);
    registry.add(entry.clone()).unwrap();
    registry.save().unwrap();

    let loaded = WatchRegistry::load(&path).unwrap();
    assert_eq!(loaded, registry);
    assert_eq!(loaded.find(&app_gvk()), Some(&entry));
}

#[cfg(unix)]
#[test]
fn test_permissions_for_new_and_existing_documents() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(WATCHES_FILE);

    upsert_watch(&app_gvk(), "", dir.path()).unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, DEFAULT_FILE_MODE);

    fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();
    let other = GroupVersionKind::new("app.example.com", "v1alpha1", "Other");
    upsert_watch(&other, "", dir.path()).unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o600);
}
