// Copyright 2024-2026 Chart Operator Contributors
// SPDX-License-Identifier: Apache-2.0

//! Tests for the watches and add-watch commands.

use super::*;
use std::path::Path;
use super::super::add_watch::run_add_watch;
use super::super::args::AddWatchArgs;
use super::super::watches_format::format_entry;
use crate::k8s::types::GroupVersionKind;
use crate::watches::WatchEntry;

fn config_for(dir: &Path) -> OperatorConfig {
    OperatorConfig {
        project_dir: dir.to_path_buf(),
        ..OperatorConfig::default()
    }
}

fn add_args(kind: &str, chart: &str) -> AddWatchArgs {
    AddWatchArgs {
        gvk: GroupVersionKind::new("app.example.com", "v1alpha1", kind),
        chart: chart.to_string(),
        project: None,
    }
}

#[test]
fn test_format_entry() {
    let gvk = GroupVersionKind::new("app.example.com", "v1alpha1", "App");
    assert_eq!(
        format_entry(&WatchEntry::new(gvk.clone(), "")),
        "app.example.com/v1alpha1, Kind=App -> (default)"
    );

    let mut entry = WatchEntry::new(gvk, "helm-charts/app");
    entry.reconcile_period = Some("5m".to_string());
    assert_eq!(
        format_entry(&entry),
        "app.example.com/v1alpha1, Kind=App -> helm-charts/app (every 5m)"
    );
}

#[test]
fn test_summary_counts_entries() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    assert_eq!(run_add_watch(&add_args("App", ""), &config), EXIT_SUCCESS);

    let registry = WatchRegistry::load(config.watches_path()).unwrap();
    assert_eq!(
        format_summary(&registry),
        format!("{}: 1 watch valid", config.watches_path().display())
    );
}

#[test]
fn test_add_watch_exit_codes() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());

    assert_eq!(run_add_watch(&add_args("App", "appservice"), &config), EXIT_SUCCESS);
    assert_eq!(run_add_watch(&add_args("App", "appservice"), &config), EXIT_FAILURE);
    assert_eq!(run_add_watch(&add_args("lowercase", ""), &config), EXIT_FAILURE);

    let registry = WatchRegistry::load(config.watches_path()).unwrap();
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_add_watch_project_override() {
    let configured = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();
    let mut args = add_args("App", "");
    args.project = Some(other.path().to_path_buf());

    assert_eq!(run_add_watch(&args, &config_for(configured.path())), EXIT_SUCCESS);
    assert!(other.path().join(WATCHES_FILE).exists());
    assert!(!configured.path().join(WATCHES_FILE).exists());
}

#[test]
fn test_watches_requires_existing_document() {
    let dir = tempfile::tempdir().unwrap();
    let args = WatchesArgs {
        action: WatchesAction::Validate,
        project: None,
    };
    assert_eq!(run_watches(&args, &config_for(dir.path())), EXIT_FAILURE);
}

#[test]
fn test_watches_list_and_validate() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    run_add_watch(&add_args("App", ""), &config);

    for action in [WatchesAction::List, WatchesAction::Validate] {
        let args = WatchesArgs {
            action,
            project: Some(dir.path().to_path_buf()),
        };
        assert_eq!(run_watches(&args, &OperatorConfig::default()), EXIT_SUCCESS);
    }
}

#[test]
fn test_watches_rejects_malformed_document() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(WATCHES_FILE), "kind: App\n").unwrap();
    let args = WatchesArgs {
        action: WatchesAction::List,
        project: None,
    };
    assert_eq!(run_watches(&args, &config_for(dir.path())), EXIT_FAILURE);
}
