// src/registry/mod.rs

//! Package resolution against the three source registries
//!
//! This module provides functionality for:
//! - Looking up packages in the remote Ryton registry document
//! - Querying the Python package index metadata endpoint
//! - Resolving curated Zig modules from a compiled-in table
//!
//! Each source kind has its own resolver submodule; [`resolve`] dispatches
//! on the kind and returns a [`PackageLocation`] ready for the fetcher.

pub mod python;
pub mod ryton;
pub mod zig;

use crate::error::{Error, Result};
use crate::source::{PackageLocation, SourceKind};
use reqwest::blocking::{Client, Response};
use std::io;
use std::time::Duration;
use tracing::info;

/// Default timeout for HTTP requests (30 seconds)
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client wrapper shared by resolvers and the download transport
///
/// Deliberately retry-free: a single network failure fails the whole
/// operation.
pub struct RegistryClient {
    client: Client,
}

impl RegistryClient {
    /// Create a new registry client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| Error::RegistryUnavailable(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch a remote registry document as text
    pub fn fetch_document(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::RegistryUnavailable(format!("{url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::RegistryUnavailable(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }

        response
            .text()
            .map_err(|e| Error::RegistryUnavailable(format!("{url}: {e}")))
    }

    /// Issue a GET request, leaving status handling to the caller
    pub(crate) fn get(&self, url: &str) -> reqwest::Result<Response> {
        self.client.get(url).send()
    }

    /// Stream a download into the given writer
    pub fn download_to(&self, url: &str, dest: &mut impl io::Write) -> Result<u64> {
        info!("Downloading {}", url);

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| Error::DownloadFailed(format!("{url}: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::DownloadFailed(format!(
                "HTTP {} from {url}",
                response.status()
            )));
        }

        io::copy(&mut response, dest)
            .map_err(|e| Error::DownloadFailed(format!("Failed to write downloaded data: {e}")))
    }
}

/// Resolve a package name to a fetchable location
///
/// One algorithm per source kind; no filesystem mutation happens here.
pub fn resolve(client: &RegistryClient, name: &str, kind: SourceKind) -> Result<PackageLocation> {
    match kind {
        SourceKind::Ryton => ryton::resolve(client, name),
        SourceKind::Python => python::resolve(client, name),
        SourceKind::Zig => zig::resolve(name),
    }
}
