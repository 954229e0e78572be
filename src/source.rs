// src/source.rs

//! Source kinds and resolved package locations
//!
//! Each package source (Ryton registry, Python index, static Zig table) has
//! its own resolution algorithm, transport, and target subdirectory. The
//! closed `SourceKind` enum ties those three together; `PackageLocation` is
//! the resolver's output, carrying whatever the fetcher needs.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The three disjoint package ecosystems rypm understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum SourceKind {
    /// Git-hosted Ryton module registry
    Ryton,
    /// Python package index (PyPI)
    Python,
    /// Curated static table of Zig modules
    Zig,
}

impl SourceKind {
    /// All source kinds, in listing order
    pub const ALL: [SourceKind; 3] = [SourceKind::Ryton, SourceKind::Python, SourceKind::Zig];

    /// The string form used as manifest key and directory name
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Ryton => "ryton",
            SourceKind::Python => "python",
            SourceKind::Zig => "zig",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distribution format of a Python index artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistKind {
    /// Prebuilt binary package (zip container)
    #[serde(rename = "bdist_wheel")]
    Wheel,
    /// Source archive (gzip-tar container)
    #[serde(rename = "sdist")]
    Sdist,
}

/// A resolved, fetchable package location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageLocation {
    /// Clone URL plus attribution from the Ryton registry
    Ryton { clone_url: String, author: String },
    /// Download URL plus distribution format from the Python index
    Python {
        download_url: String,
        dist: DistKind,
        filename: String,
    },
    /// Clone URL derived from the static Zig table
    Zig { clone_url: String },
}

impl PackageLocation {
    /// The clone URL, for locations fetched via the clone transport
    pub fn clone_url(&self) -> Option<&str> {
        match self {
            PackageLocation::Ryton { clone_url, .. } | PackageLocation::Zig { clone_url } => {
                Some(clone_url)
            }
            PackageLocation::Python { .. } => None,
        }
    }
}
