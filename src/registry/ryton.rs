// src/registry/ryton.rs

//! Ryton registry resolver
//!
//! The registry is a single JSON document hosted in a git repository,
//! mapping package name to repository URL and author. The document may
//! carry `//` comment lines, which are stripped line-by-line before
//! parsing; all other lines are preserved verbatim.

use super::RegistryClient;
use crate::error::{Error, Result};
use crate::source::PackageLocation;
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Location of the registry document
pub const REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/CodeLibraty/RytonRegistry/main/packages.json";

/// One registry entry
#[derive(Debug, Clone, Deserialize)]
pub struct RegistryEntry {
    /// Clone URL of the package repository
    pub repository: String,
    /// Package author, for attribution
    pub author: String,
}

/// Resolve a name against the remote registry document
pub fn resolve(client: &RegistryClient, name: &str) -> Result<PackageLocation> {
    let document = client.fetch_document(REGISTRY_URL)?;
    lookup(&document, name)
}

/// Look a name up in a registry document
pub fn lookup(document: &str, name: &str) -> Result<PackageLocation> {
    let packages = parse_document(document)?;

    let entry = packages.get(name).ok_or_else(|| Error::PackageNotFound {
        name: name.to_string(),
        source: "ryton".to_string(),
    })?;

    debug!("Resolved '{}' to {} (author {})", name, entry.repository, entry.author);

    Ok(PackageLocation::Ryton {
        clone_url: entry.repository.clone(),
        author: entry.author.clone(),
    })
}

/// Parse the registry document, tolerating `//` comment lines
fn parse_document(document: &str) -> Result<BTreeMap<String, RegistryEntry>> {
    let stripped = strip_comment_lines(document);
    serde_json::from_str(&stripped)
        .map_err(|e| Error::RegistryUnavailable(format!("Invalid registry document: {e}")))
}

/// Drop lines whose first non-whitespace characters are `//`
///
/// All other lines, including blank ones, pass through verbatim.
fn strip_comment_lines(document: &str) -> String {
    document
        .lines()
        .filter(|line| !line.trim_start().starts_with("//"))
        .collect::<Vec<_>>()
        .join("\n")
}
