// src/manager.rs

//! Install/remove orchestration
//!
//! `PackageManager` composes the layout manager, resolvers, fetcher, and
//! manifest store: resolve, fetch into the correct directory, record
//! (install); delete directory, forget (remove). Reinstall policy is
//! uniform across transports: installing a package whose directory already
//! exists fails with `AlreadyInstalled` before any transport runs.
//!
//! Resolve and fetch failures abort before the manifest is touched, so the
//! manifest only gains entries for confirmed on-disk installs. The reverse
//! window (directory present, manifest write failed) is possible;
//! [`repair`](PackageManager::repair) reconciles both directions on demand.

use crate::error::{Error, Result};
use crate::fetch;
use crate::layout::ModuleTree;
use crate::manifest::ManifestStore;
use crate::registry::{self, RegistryClient};
use crate::source::{PackageLocation, SourceKind};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Manifest prefix marking direct-reference (GitHub) installs
const GITHUB_PREFIX: &str = "github:";

/// Changes applied by a repair pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RepairReport {
    /// Manifest entries dropped because their directory is gone
    pub dropped: Vec<(SourceKind, String)>,
    /// Directories recorded because the manifest was missing them
    pub added: Vec<(SourceKind, String)>,
}

impl RepairReport {
    pub fn is_empty(&self) -> bool {
        self.dropped.is_empty() && self.added.is_empty()
    }
}

/// The package installer/remover, rooted at one project
pub struct PackageManager {
    tree: ModuleTree,
    manifest: ManifestStore,
    client: RegistryClient,
}

impl PackageManager {
    /// Create a manager for the given project root
    ///
    /// Bootstraps the module tree; idempotent on every run.
    pub fn new(project_root: impl Into<PathBuf>) -> Result<Self> {
        let root = project_root.into();
        let tree = ModuleTree::new(&root);
        tree.ensure()?;

        Ok(Self {
            tree,
            manifest: ManifestStore::new(&root),
            client: RegistryClient::new()?,
        })
    }

    /// The module tree this manager operates on
    pub fn tree(&self) -> &ModuleTree {
        &self.tree
    }

    /// The manifest store this manager records into
    pub fn manifest(&self) -> &ManifestStore {
        &self.manifest
    }

    /// Install a package from its source registry
    pub fn install(&self, name: &str, kind: SourceKind) -> Result<()> {
        let target = self.tree.package_dir(kind, name);
        if target.exists() {
            return Err(Error::AlreadyInstalled {
                name: name.to_string(),
                source: kind.to_string(),
            });
        }

        let location = registry::resolve(&self.client, name, kind)?;
        if let PackageLocation::Ryton { author, .. } = &location {
            info!("Installing {} by {}", name, author);
        } else {
            info!("Installing {} from {} source", name, kind);
        }

        fetch::fetch(&self.client, &self.tree, &location, &target)?;
        self.manifest.record(kind, name)?;
        Ok(())
    }

    /// Install a module directly from a GitHub reference
    ///
    /// Accepts `owner/repo` shorthand or a full URL; bypasses the resolver
    /// and clones straight into the given source's directory. Returns the
    /// derived package name. The manifest entry carries a `github:` prefix
    /// marking it as a direct-reference install.
    pub fn install_from_reference(&self, reference: &str, kind: SourceKind) -> Result<String> {
        let (url, name) = normalize_reference(reference)?;

        let target = self.tree.package_dir(kind, &name);
        if target.exists() {
            return Err(Error::AlreadyInstalled {
                name,
                source: kind.to_string(),
            });
        }

        info!("Installing {} from {}", name, url);
        fetch::clone_into(&url, &target)?;
        self.manifest.record(kind, &format!("{GITHUB_PREFIX}{name}"))?;
        Ok(name)
    }

    /// Remove an installed package
    ///
    /// Fails with `NotInstalled` (and performs no manifest change) when the
    /// package has no on-disk directory. Otherwise the directory is deleted
    /// and both the plain and the `github:`-prefixed manifest entries are
    /// forgotten.
    pub fn remove(&self, name: &str, kind: SourceKind) -> Result<()> {
        let target = self.tree.package_dir(kind, name);
        if !target.exists() {
            return Err(Error::NotInstalled {
                name: name.to_string(),
                source: kind.to_string(),
            });
        }

        info!("Removing {} from {} source", name, kind);
        fs::remove_dir_all(&target)?;

        self.manifest.forget(kind, name)?;
        self.manifest.forget(kind, &format!("{GITHUB_PREFIX}{name}"))?;
        Ok(())
    }

    /// List installed packages per source, straight from disk state
    pub fn list(&self, kind: Option<SourceKind>) -> Result<Vec<(SourceKind, Vec<String>)>> {
        let kinds: Vec<SourceKind> = match kind {
            Some(k) => vec![k],
            None => SourceKind::ALL.to_vec(),
        };

        kinds
            .into_iter()
            .map(|k| Ok((k, self.tree.installed_packages(k)?)))
            .collect()
    }

    /// Reconcile the manifest against actual directory presence
    ///
    /// Drops entries whose directory is gone and records directories the
    /// manifest is missing. Direct-install entries are matched through
    /// their `github:` prefix.
    pub fn repair(&self) -> Result<RepairReport> {
        let manifest = self.manifest.load()?;
        let mut updated = manifest.clone();
        let mut report = RepairReport::default();

        for kind in SourceKind::ALL {
            let on_disk = self.tree.installed_packages(kind)?;

            for entry in manifest.names(kind) {
                let dir_name = entry.strip_prefix(GITHUB_PREFIX).unwrap_or(entry);
                if !on_disk.iter().any(|d| d == dir_name) {
                    warn!("Dropping stale {} manifest entry '{}'", kind, entry);
                    updated.remove(kind, entry);
                    report.dropped.push((kind, entry.clone()));
                }
            }

            for dir in &on_disk {
                let covered = manifest.names(kind).iter().any(|entry| {
                    entry == dir || entry.strip_prefix(GITHUB_PREFIX) == Some(dir.as_str())
                });
                if !covered {
                    warn!("Recording untracked {} package '{}'", kind, dir);
                    updated.insert(kind, dir);
                    report.added.push((kind, dir.clone()));
                }
            }
        }

        if !report.is_empty() {
            self.manifest.transaction(|m| *m = updated)?;
        }
        Ok(report)
    }
}

/// Normalize a GitHub reference to (clone URL, package name)
///
/// `owner/repo` shorthand gains the `https://github.com/` prefix; full URLs
/// pass through. The package name is the trailing path segment with any
/// `.git` suffix trimmed.
fn normalize_reference(reference: &str) -> Result<(String, String)> {
    let trimmed = reference.trim().trim_end_matches('/');

    let url = if trimmed.contains("github.com") {
        trimmed.to_string()
    } else {
        format!("https://github.com/{trimmed}")
    };

    let name = url
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .trim_end_matches(".git")
        .to_string();

    if name.is_empty() {
        return Err(Error::CloneFailed {
            url,
            detail: "cannot derive a package name from the reference".to_string(),
        });
    }

    Ok((url, name))
}
