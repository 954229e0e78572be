// src/registry/python.rs

//! Python package index resolver
//!
//! Queries the per-project JSON metadata endpoint and picks a distribution
//! artifact: a wheel is strictly preferred over a source distribution, and
//! within the winning type the first-listed entry is chosen. The endpoint
//! is scoped to the latest release, so no version comparison happens here.

use super::RegistryClient;
use crate::error::{Error, Result};
use crate::source::{DistKind, PackageLocation};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

/// Base URL of the package index JSON API
pub const INDEX_URL: &str = "https://pypi.org/pypi";

/// Per-project metadata document (the parts we consume)
#[derive(Debug, Deserialize)]
struct ProjectDocument {
    #[serde(default)]
    urls: Vec<DistArtifact>,
}

/// One distribution artifact of the latest release
#[derive(Debug, Clone, Deserialize)]
pub struct DistArtifact {
    pub url: String,
    pub packagetype: String,
    pub filename: String,
}

/// Resolve a name against the package index
pub fn resolve(client: &RegistryClient, name: &str) -> Result<PackageLocation> {
    let url = format!("{INDEX_URL}/{name}/json");

    let response = client
        .get(&url)
        .map_err(|e| Error::RegistryUnavailable(format!("{url}: {e}")))?;

    if response.status() == StatusCode::NOT_FOUND {
        return Err(Error::PackageNotFound {
            name: name.to_string(),
            source: "python".to_string(),
        });
    }
    if !response.status().is_success() {
        return Err(Error::RegistryUnavailable(format!(
            "HTTP {} from {url}",
            response.status()
        )));
    }

    let document: ProjectDocument = response
        .json()
        .map_err(|e| Error::RegistryUnavailable(format!("Invalid index metadata: {e}")))?;

    let (artifact, dist) = select_distribution(&document.urls)
        .ok_or_else(|| Error::NoCompatibleDistribution(name.to_string()))?;

    debug!("Resolved '{}' to {} ({:?})", name, artifact.filename, dist);

    Ok(PackageLocation::Python {
        download_url: artifact.url.clone(),
        dist,
        filename: artifact.filename.clone(),
    })
}

/// Pick the artifact to install: first wheel, else first source distribution
fn select_distribution(urls: &[DistArtifact]) -> Option<(&DistArtifact, DistKind)> {
    if let Some(wheel) = urls.iter().find(|u| u.packagetype == "bdist_wheel") {
        return Some((wheel, DistKind::Wheel));
    }
    urls.iter()
        .find(|u| u.packagetype == "sdist")
        .map(|sdist| (sdist, DistKind::Sdist))
}
