// tests/integration_test.rs

//! Integration tests for rypm
//!
//! These tests verify end-to-end functionality across modules over a
//! temporary project root. Nothing here touches the network; installed
//! packages are materialized by hand where a transport would normally run.

use rypm::manager::PackageManager;
use rypm::manifest::{ManifestStore, MANIFEST_FILE};
use rypm::source::SourceKind;
use std::fs;

#[test]
fn test_manager_bootstraps_module_tree() {
    let temp_dir = tempfile::tempdir().unwrap();

    let pm = PackageManager::new(temp_dir.path()).unwrap();

    assert!(
        temp_dir.path().join("modules").is_dir(),
        "modules/ should exist after construction"
    );
    for kind in SourceKind::ALL {
        assert!(
            pm.tree().source_dir(kind).is_dir(),
            "modules/{} should exist after construction",
            kind
        );
    }

    // Construction is idempotent on every run
    PackageManager::new(temp_dir.path()).unwrap();
}

#[test]
fn test_list_reports_materialized_packages() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pm = PackageManager::new(temp_dir.path()).unwrap();

    fs::create_dir(pm.tree().package_dir(SourceKind::Python, "pkgA")).unwrap();
    pm.manifest().record(SourceKind::Python, "pkgA").unwrap();

    let listing = pm.list(Some(SourceKind::Python)).unwrap();
    assert_eq!(listing.len(), 1);
    let (kind, names) = &listing[0];
    assert_eq!(*kind, SourceKind::Python);
    assert!(names.contains(&"pkgA".to_string()), "pkgA should be listed");

    // Listing all sources covers the other two as empty
    let listing = pm.list(None).unwrap();
    assert_eq!(listing.len(), 3);
}

#[test]
fn test_install_remove_manifest_lifecycle() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pm = PackageManager::new(temp_dir.path()).unwrap();

    // Materialize an install the way the clone transport would
    let target = pm.tree().package_dir(SourceKind::Ryton, "alpha");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("main.ry"), b"module alpha\n").unwrap();
    pm.manifest().record(SourceKind::Ryton, "alpha").unwrap();

    let manifest = pm.manifest().load().unwrap();
    assert!(manifest.contains(SourceKind::Ryton, "alpha"));

    pm.remove("alpha", SourceKind::Ryton).unwrap();
    assert!(!target.exists(), "directory should be deleted");

    let manifest = pm.manifest().load().unwrap();
    assert!(
        !manifest.contains(SourceKind::Ryton, "alpha"),
        "manifest entry should be forgotten"
    );
}

#[test]
fn test_remove_unknown_package_leaves_manifest_alone() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pm = PackageManager::new(temp_dir.path()).unwrap();

    pm.manifest().record(SourceKind::Zig, "mach").unwrap();
    let before = fs::read_to_string(pm.manifest().path()).unwrap();

    let result = pm.remove("ghost", SourceKind::Zig);
    assert!(result.is_err(), "removing a package with no directory fails");

    let after = fs::read_to_string(pm.manifest().path()).unwrap();
    assert_eq!(before, after, "manifest must be untouched");
}

#[test]
fn test_manifest_survives_manager_restarts() {
    let temp_dir = tempfile::tempdir().unwrap();

    {
        let pm = PackageManager::new(temp_dir.path()).unwrap();
        pm.manifest().record(SourceKind::Zig, "zap").unwrap();
    }

    let store = ManifestStore::new(temp_dir.path());
    let manifest = store.load().unwrap();
    assert!(manifest.contains(SourceKind::Zig, "zap"));

    let pm = PackageManager::new(temp_dir.path()).unwrap();
    let manifest = pm.manifest().load().unwrap();
    assert!(manifest.contains(SourceKind::Zig, "zap"));
}

#[test]
fn test_repair_reconciles_manifest_with_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pm = PackageManager::new(temp_dir.path()).unwrap();

    // A package whose directory was deleted behind rypm's back
    pm.manifest().record(SourceKind::Ryton, "vanished").unwrap();
    // A directory dropped in without a manifest write
    fs::create_dir(pm.tree().package_dir(SourceKind::Zig, "mach")).unwrap();

    let report = pm.repair().unwrap();
    assert_eq!(report.dropped.len(), 1);
    assert_eq!(report.added.len(), 1);

    let manifest = pm.manifest().load().unwrap();
    assert!(!manifest.contains(SourceKind::Ryton, "vanished"));
    assert!(manifest.contains(SourceKind::Zig, "mach"));

    // Second pass finds nothing left to fix
    let report = pm.repair().unwrap();
    assert!(report.is_empty(), "repair should be idempotent");
}

#[test]
fn test_manifest_file_keeps_historical_name_and_encoding() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pm = PackageManager::new(temp_dir.path()).unwrap();

    pm.manifest().record(SourceKind::Ryton, "alpha").unwrap();

    let path = temp_dir.path().join(MANIFEST_FILE);
    assert!(path.exists(), "manifest lives at the project root");
    assert_eq!(path.file_name().unwrap(), "ryton.toml");

    // Body is a JSON object regardless of the file name
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["dependencies"]["ryton"][0], "alpha");
}

#[test]
fn test_no_temp_archives_leak_into_module_tree() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pm = PackageManager::new(temp_dir.path()).unwrap();

    // Even after failed operations, modules/ holds only the source dirs
    let _ = pm.remove("ghost", SourceKind::Python);
    let _ = pm.repair();

    let entries: Vec<String> = fs::read_dir(pm.tree().modules_dir())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();

    for entry in &entries {
        assert!(
            ["ryton", "python", "zig"].contains(&entry.as_str()),
            "unexpected entry in modules/: {}",
            entry
        );
    }
}
