// src/error.rs

use thiserror::Error;

/// Core error types for rypm
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Remote registry document unreachable or unparsable
    #[error("Registry unavailable: {0}")]
    RegistryUnavailable(String),

    /// Package name absent from the resolved registry or table
    #[error("Package '{name}' not found in {source} source")]
    PackageNotFound { name: String, source: String },

    /// Package index has neither a wheel nor a source distribution
    #[error("No compatible distribution found for '{0}'")]
    NoCompatibleDistribution(String),

    /// Network or HTTP failure while downloading an artifact
    #[error("Download failed: {0}")]
    DownloadFailed(String),

    /// Corrupt or unsupported archive
    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    /// External version-control invocation returned non-zero
    #[error("Clone of {url} failed: {detail}")]
    CloneFailed { url: String, detail: String },

    /// Removal requested for a package with no on-disk directory
    #[error("Package '{name}' is not installed in {source} source")]
    NotInstalled { name: String, source: String },

    /// Install requested for a package whose directory already exists
    #[error("Package '{name}' is already installed in {source} source (remove it first)")]
    AlreadyInstalled { name: String, source: String },

    /// Manifest file exists but is not valid per its documented encoding
    #[error("Manifest at {path} is corrupt: {detail}")]
    ManifestCorrupt { path: String, detail: String },
}

/// Result type alias using rypm's Error type
pub type Result<T> = std::result::Result<T, Error>;
