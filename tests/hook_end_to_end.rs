mod common;

use std::path::Path;

use log::Level;
use serde_json::json;

use common::{data_tree, disk_owner, key, OverlayOps, TestEmitter, TestSink};
use mount_chown::oci::{run_hook, HookError, HookOptions};
use mount_chown::types::Owner;
use mount_chown::MountChown;

/// Lay out `<bundle>/config.json` and `<bundle>/rootfs/...`; return the state payload.
fn bundle(dir: &Path, mounts: &[&str], annotations: serde_json::Value) -> Vec<u8> {
    let mounts: Vec<_> = mounts
        .iter()
        .map(|d| json!({"destination": d, "type": "bind", "source": "/host", "options": ["rbind"]}))
        .collect();
    let config = json!({
        "ociVersion": "1.0.2",
        "process": {"args": ["/bin/sh"]},
        "root": {"path": "rootfs"},
        "mounts": mounts,
        "annotations": annotations,
    });
    std::fs::write(dir.join("config.json"), config.to_string()).unwrap();
    json!({
        "ociVersion": "1.0.2",
        "id": "test-container",
        "status": "creating",
        "pid": 4242,
        "bundle": dir,
    })
    .to_string()
    .into_bytes()
}

#[test]
fn chowns_declared_mount_under_bundle_rootfs() {
    let td = tempfile::tempdir().unwrap();
    let rootfs = td.path().join("rootfs");
    let (data, nested, file) = data_tree(&rootfs);
    let state = bundle(
        td.path(),
        &["/proc", "/data"],
        json!({
            key("data", "path"): "/data",
            key("data", "owner"): "2000:2000",
            "unrelated.annotation": "ignored",
        }),
    );

    let ops = OverlayOps::default();
    let api = MountChown::new(TestEmitter::default(), TestSink::default())
        .with_ownership_ops(Box::new(ops.clone()));
    let report = run_hook(state.as_slice(), &HookOptions::default(), &api).unwrap();

    assert!(report.succeeded());
    assert_eq!(report.requests.len(), 1);
    for path in [&data, &nested, &file] {
        assert_eq!(ops.owner(path), Owner::new(2000, 2000));
    }
}

#[test]
fn requests_outside_mounts_are_skipped_unless_all_paths() {
    let td = tempfile::tempdir().unwrap();
    let rootfs = td.path().join("rootfs");
    let (data, _, _) = data_tree(&rootfs);
    let before = disk_owner(&data);
    let annotations = json!({
        key("data", "path"): "/data",
        key("data", "owner"): "2000",
    });

    let ops = OverlayOps::default();
    let sink = TestSink::default();
    let api = MountChown::new(TestEmitter::default(), sink.clone())
        .with_ownership_ops(Box::new(ops.clone()));

    let state = bundle(td.path(), &["/proc"], annotations.clone());
    let report = run_hook(state.as_slice(), &HookOptions::default(), &api).unwrap();
    assert!(report.requests.is_empty());
    assert_eq!(ops.owner(&data), before);
    assert!(sink
        .at(Level::Debug)
        .iter()
        .any(|m| m.contains("not a mount point")));

    let options = HookOptions {
        all_paths: true,
        ..HookOptions::default()
    };
    let state = bundle(td.path(), &["/proc"], annotations);
    let report = run_hook(state.as_slice(), &options, &api).unwrap();
    assert_eq!(report.requests.len(), 1);
    assert_eq!(ops.owner(&data), Owner::new(2000, 0));
}

#[test]
fn container_root_override_wins() {
    let td = tempfile::tempdir().unwrap();
    let elsewhere = tempfile::tempdir().unwrap();
    let (data, _, _) = data_tree(elsewhere.path());
    let state = bundle(
        td.path(),
        &["/data"],
        json!({
            key("data", "path"): "/data",
            key("data", "owner"): "2000:2000",
            key("data", "policy"): "root-only",
        }),
    );

    let ops = OverlayOps::default();
    let api = MountChown::new(TestEmitter::default(), TestSink::default())
        .with_ownership_ops(Box::new(ops.clone()));
    let options = HookOptions {
        container_root: Some(elsewhere.path().to_path_buf()),
        all_paths: false,
    };
    let report = run_hook(state.as_slice(), &options, &api).unwrap();

    assert!(report.succeeded());
    assert_eq!(ops.owner(&data), Owner::new(2000, 2000));
    assert_eq!(ops.owner_calls(), 1);
}

#[test]
fn unreadable_config_is_a_hook_error() {
    let td = tempfile::tempdir().unwrap();
    std::fs::write(td.path().join("config.json"), b"{ not json").unwrap();
    let state = json!({"bundle": td.path()}).to_string();

    let api = MountChown::new(TestEmitter::default(), TestSink::default());
    let err = run_hook(state.as_bytes(), &HookOptions::default(), &api).unwrap_err();
    assert!(matches!(err, HookError::ParseSpec { .. }));
}
