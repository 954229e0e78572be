// src/layout.rs

//! Module tree layout
//!
//! Owns the fixed directory tree rooted at the project: `modules/` with one
//! subdirectory per source kind. All operations take the project root
//! explicitly; nothing here depends on the process working directory.

use crate::error::Result;
use crate::source::SourceKind;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the directory holding all installed modules
const MODULES_DIR: &str = "modules";

/// The project-local module directory tree
#[derive(Debug, Clone)]
pub struct ModuleTree {
    root: PathBuf,
}

impl ModuleTree {
    /// Create a tree handle for the given project root
    ///
    /// Does not touch the filesystem; call [`ensure`](Self::ensure) before
    /// any fetch.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            root: project_root.into(),
        }
    }

    /// Guarantee the module tree's directories exist
    ///
    /// Idempotent: already-existing directories are not an error. Fails
    /// with an I/O error if creation is blocked (permissions, or a path
    /// collision with a non-directory file).
    pub fn ensure(&self) -> Result<()> {
        debug!("Ensuring module tree under {}", self.root.display());
        fs::create_dir_all(self.modules_dir())?;
        for kind in SourceKind::ALL {
            fs::create_dir_all(self.source_dir(kind))?;
        }
        Ok(())
    }

    /// The project root this tree is rooted at
    pub fn project_root(&self) -> &Path {
        &self.root
    }

    /// Path to `modules/`
    pub fn modules_dir(&self) -> PathBuf {
        self.root.join(MODULES_DIR)
    }

    /// Path to the directory for one source kind
    pub fn source_dir(&self, kind: SourceKind) -> PathBuf {
        self.modules_dir().join(kind.as_str())
    }

    /// Path to one package's directory
    pub fn package_dir(&self, kind: SourceKind, name: &str) -> PathBuf {
        self.source_dir(kind).join(name)
    }

    /// Names of the immediate subdirectories of one source's directory
    ///
    /// This is a pure read of disk state, independent of the manifest.
    pub fn installed_packages(&self, kind: SourceKind) -> Result<Vec<String>> {
        let dir = self.source_dir(kind);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}
