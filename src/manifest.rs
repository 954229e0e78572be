// src/manifest.rs

//! Manifest store
//!
//! The manifest is the declarative record of which packages are considered
//! installed, independent of actual directory contents. It lives at
//! `ryton.toml` in the project root and — for compatibility with existing
//! ecosystem manifests — its body is encoded as JSON despite the file name:
//! `{"dependencies": {"<source>": ["<name>", ...]}}`.
//!
//! Every mutation is a whole-file read-modify-write, funneled through one
//! scoped [`transaction`](ManifestStore::transaction) helper so upgrading to
//! exclusive file locking later stays a local change. Concurrent processes
//! are last-write-wins; rypm is a single-user local tool.

use crate::error::{Error, Result};
use crate::source::SourceKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name of the manifest inside the project root
pub const MANIFEST_FILE: &str = "ryton.toml";

/// Parsed manifest contents
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Source kind (string key) to list of declared package names
    #[serde(default)]
    pub dependencies: BTreeMap<String, Vec<String>>,
}

impl Manifest {
    /// Whether a (source, name) pair is declared
    pub fn contains(&self, kind: SourceKind, name: &str) -> bool {
        self.dependencies
            .get(kind.as_str())
            .is_some_and(|names| names.iter().any(|n| n == name))
    }

    /// Declared names for one source (empty if the key is absent)
    pub fn names(&self, kind: SourceKind) -> &[String] {
        self.dependencies
            .get(kind.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn insert(&mut self, kind: SourceKind, name: &str) {
        let names = self.dependencies.entry(kind.as_str().to_string()).or_default();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    pub(crate) fn remove(&mut self, kind: SourceKind, name: &str) {
        if let Some(names) = self.dependencies.get_mut(kind.as_str()) {
            names.retain(|n| n != name);
        }
    }
}

/// Read-modify-write access to the on-disk manifest
#[derive(Debug, Clone)]
pub struct ManifestStore {
    path: PathBuf,
}

impl ManifestStore {
    /// Store handle for the manifest inside the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            path: project_root.as_ref().join(MANIFEST_FILE),
        }
    }

    /// Path of the manifest file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the manifest, treating a missing file as empty
    pub fn load(&self) -> Result<Manifest> {
        if !self.path.exists() {
            return Ok(Manifest::default());
        }

        let text = fs::read_to_string(&self.path)?;
        serde_json::from_str(&text).map_err(|e| Error::ManifestCorrupt {
            path: self.path.display().to_string(),
            detail: e.to_string(),
        })
    }

    /// Declare a package as installed
    ///
    /// Idempotent: recording an already-recorded name leaves exactly one
    /// entry, though the file is still rewritten.
    pub fn record(&self, kind: SourceKind, name: &str) -> Result<()> {
        debug!("Recording {} package '{}' in manifest", kind, name);
        self.transaction(|manifest| manifest.insert(kind, name))
    }

    /// Drop a package from the declared set
    ///
    /// A no-op that does not create the manifest if it never existed;
    /// forgetting a name that was never recorded does not raise.
    pub fn forget(&self, kind: SourceKind, name: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        debug!("Forgetting {} package '{}' from manifest", kind, name);
        self.transaction(|manifest| manifest.remove(kind, name))
    }

    /// Scoped read-modify-write cycle: load, mutate, persist
    pub fn transaction<T>(&self, mutate: impl FnOnce(&mut Manifest) -> T) -> Result<T> {
        let mut manifest = self.load()?;
        let out = mutate(&mut manifest);
        self.persist(&manifest)?;
        Ok(out)
    }

    fn persist(&self, manifest: &Manifest) -> Result<()> {
        let text = serde_json::to_string_pretty(manifest).map_err(|e| Error::ManifestCorrupt {
            path: self.path.display().to_string(),
            detail: e.to_string(),
        })?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}
