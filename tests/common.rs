//! Shared test helpers for the mount-chown integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::fs::Metadata;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use log::Level;
use serde_json::Value;

use mount_chown::adapters::OwnershipOps;
use mount_chown::constants::ANNOTATION_PREFIX;
use mount_chown::fs::permission_bits;
use mount_chown::logging::{DiagnosticSink, FactsEmitter};
use mount_chown::types::errors::{Error, ErrorKind, Result};
use mount_chown::types::Owner;

/// A simple in-memory emitter to capture facts during tests.
#[derive(Clone, Default, Debug)]
pub struct TestEmitter {
    pub events: Arc<Mutex<Vec<(String, String, String, Value)>>>,
}

impl FactsEmitter for TestEmitter {
    fn emit(&self, subsystem: &str, event: &str, decision: &str, fields: Value) {
        self.events
            .lock()
            .unwrap()
            .push((subsystem.into(), event.into(), decision.into(), fields));
    }
}

/// Captures diagnostics so tests can assert on drop/skip/failure decisions.
#[derive(Clone, Default, Debug)]
pub struct TestSink {
    pub lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl DiagnosticSink for TestSink {
    fn log(&self, level: Level, msg: &str) {
        self.lines.lock().unwrap().push((level, msg.to_string()));
    }
}

impl TestSink {
    pub fn at(&self, level: Level) -> Vec<String> {
        self.lines
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.lines.lock().unwrap().clear();
    }
}

/// Ownership layer kept in memory on top of a real directory tree.
///
/// Reads fall back to the real lstat metadata until an entry has been changed;
/// writes land in the overlay and are counted, so unprivileged tests can
/// "chown" to arbitrary ids.
#[derive(Clone, Default)]
pub struct OverlayOps {
    owners: Arc<Mutex<HashMap<PathBuf, Owner>>>,
    modes: Arc<Mutex<HashMap<PathBuf, u32>>>,
    refuse: Arc<Mutex<HashSet<PathBuf>>>,
    owner_calls: Arc<AtomicUsize>,
    mode_calls: Arc<AtomicUsize>,
}

impl OverlayOps {
    /// Make every mutation on `path` fail with a permission error.
    pub fn refuse(&self, path: impl Into<PathBuf>) {
        self.refuse.lock().unwrap().insert(path.into());
    }

    pub fn owner(&self, path: &Path) -> Owner {
        let md = std::fs::symlink_metadata(path).unwrap();
        self.owner_of(path, &md)
    }

    pub fn mode(&self, path: &Path) -> u32 {
        let md = std::fs::symlink_metadata(path).unwrap();
        self.mode_of(path, &md)
    }

    /// Paths whose owner was changed through the overlay.
    pub fn touched(&self) -> HashSet<PathBuf> {
        self.owners.lock().unwrap().keys().cloned().collect()
    }

    pub fn owner_calls(&self) -> usize {
        self.owner_calls.load(Ordering::SeqCst)
    }

    pub fn mode_calls(&self) -> usize {
        self.mode_calls.load(Ordering::SeqCst)
    }

    fn refused(&self, op: &str, path: &Path) -> Result<()> {
        if self.refuse.lock().unwrap().contains(path) {
            return Err(Error::new(
                ErrorKind::Io,
                format!("{op} {}: Operation not permitted (os error 1)", path.display()),
            ));
        }
        Ok(())
    }
}

impl OwnershipOps for OverlayOps {
    fn owner_of(&self, path: &Path, md: &Metadata) -> Owner {
        self.owners
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or_else(|| Owner::from(md))
    }

    fn mode_of(&self, path: &Path, md: &Metadata) -> u32 {
        self.modes
            .lock()
            .unwrap()
            .get(path)
            .copied()
            .unwrap_or_else(|| permission_bits(md))
    }

    fn set_owner(&self, path: &Path, owner: Owner) -> Result<()> {
        self.owner_calls.fetch_add(1, Ordering::SeqCst);
        self.refused("lchown", path)?;
        self.owners.lock().unwrap().insert(path.to_path_buf(), owner);
        Ok(())
    }

    fn set_mode(&self, path: &Path, mode: u32) -> Result<()> {
        self.mode_calls.fetch_add(1, Ordering::SeqCst);
        self.refused("chmod", path)?;
        self.modes.lock().unwrap().insert(path.to_path_buf(), mode);
        Ok(())
    }
}

/// Full annotation key for `<name>.<arg>`.
pub fn key(name: &str, arg: &str) -> String {
    format!("{ANNOTATION_PREFIX}{name}.{arg}")
}

/// Build `<root>/data/nested/file.txt` and return the three entry paths.
pub fn data_tree(root: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let data = root.join("data");
    let nested = data.join("nested");
    let file = nested.join("file.txt");
    std::fs::create_dir_all(&nested).unwrap();
    std::fs::write(&file, b"MOCK_CONTENT").unwrap();
    (data, nested, file)
}

/// Owner of `path` on disk, ignoring any overlay.
pub fn disk_owner(path: &Path) -> Owner {
    let md = std::fs::symlink_metadata(path).unwrap();
    Owner::from(&md)
}
