// src/fetch.rs

//! Artifact fetching
//!
//! Two transports, selected by the resolved location: a version-control
//! clone via the external `git` binary (Ryton, Zig, and direct GitHub
//! installs), and an HTTP download-and-extract path for Python
//! distributions. Downloads are staged in a temporary archive inside the
//! module tree root; the staging file is removed on every exit path.

use crate::error::{Error, Result};
use crate::layout::ModuleTree;
use crate::registry::RegistryClient;
use crate::source::{DistKind, PackageLocation};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::path::Path;
use std::process::Command;
use tar::Archive;
use tracing::{debug, info};
use zip::ZipArchive;

/// Materialize a resolved location into the target directory
pub fn fetch(
    client: &RegistryClient,
    tree: &ModuleTree,
    location: &PackageLocation,
    target: &Path,
) -> Result<()> {
    match location {
        PackageLocation::Ryton { clone_url, .. } | PackageLocation::Zig { clone_url } => {
            clone_into(clone_url, target)
        }
        PackageLocation::Python {
            download_url, dist, ..
        } => download_and_extract(client, tree, download_url, *dist, target),
    }
}

/// Clone a repository into the target directory
///
/// Success is determined solely by the exit code of the external tool;
/// its output is never parsed. Cloning into an existing non-empty
/// directory is an expected failure mode, reported as `CloneFailed`.
pub fn clone_into(url: &str, target: &Path) -> Result<()> {
    info!("Cloning {} into {}", url, target.display());

    let output = Command::new("git")
        .arg("clone")
        .arg(url)
        .arg(target)
        .output()
        .map_err(|e| Error::CloneFailed {
            url: url.to_string(),
            detail: format!("failed to run git: {e}"),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::CloneFailed {
            url: url.to_string(),
            detail: format!("git exited with {}: {}", output.status, stderr.trim()),
        });
    }

    Ok(())
}

/// Download a distribution archive and unpack it into the target directory
fn download_and_extract(
    client: &RegistryClient,
    tree: &ModuleTree,
    url: &str,
    dist: DistKind,
    target: &Path,
) -> Result<()> {
    let suffix = match dist {
        DistKind::Wheel => ".whl",
        DistKind::Sdist => ".tar.gz",
    };

    // NamedTempFile removes the staging archive on drop, covering both the
    // success path and every error return below.
    let mut archive = tempfile::Builder::new()
        .prefix("rypm-download-")
        .suffix(suffix)
        .tempfile_in(tree.modules_dir())?;

    let bytes = client.download_to(url, &mut archive)?;
    debug!("Downloaded {} bytes to {}", bytes, archive.path().display());

    fs::create_dir_all(target)?;
    match dist {
        DistKind::Wheel => extract_zip(archive.path(), target),
        DistKind::Sdist => extract_tar_gz(archive.path(), target),
    }
}

/// Unpack a zip container (wheel) into the target directory
fn extract_zip(archive_path: &Path, target: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)
        .map_err(|e| Error::ExtractionFailed(format!("invalid zip archive: {e}")))?;
    archive
        .extract(target)
        .map_err(|e| Error::ExtractionFailed(format!("zip extraction: {e}")))
}

/// Unpack a gzip-tar container (source distribution) into the target directory
fn extract_tar_gz(archive_path: &Path, target: &Path) -> Result<()> {
    let file = File::open(archive_path)?;
    let mut archive = Archive::new(GzDecoder::new(file));
    archive
        .unpack(target)
        .map_err(|e| Error::ExtractionFailed(format!("tar extraction: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::Compression;
    use flate2::write::GzEncoder;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_zip_fixture(path: &Path) {
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        let opts = SimpleFileOptions::default();
        zip.start_file("pkg/__init__.py", opts).unwrap();
        zip.write_all(b"VERSION = \"1.0\"\n").unwrap();
        zip.finish().unwrap();
    }

    fn write_tar_gz_fixture(path: &Path) {
        let gz = GzEncoder::new(File::create(path).unwrap(), Compression::default());
        let mut tar = tar::Builder::new(gz);

        let content = b"from setuptools import setup\n";
        let mut header = tar::Header::new_gnu();
        header.set_path("pkg-1.0/setup.py").unwrap();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        tar.append(&header, content.as_slice()).unwrap();
        tar.into_inner().unwrap().finish().unwrap();
    }

    #[test]
    fn test_extract_zip_fixture() {
        let temp_dir = tempfile::tempdir().unwrap();
        let archive = temp_dir.path().join("pkg.whl");
        write_zip_fixture(&archive);

        let target = temp_dir.path().join("out");
        fs::create_dir_all(&target).unwrap();
        extract_zip(&archive, &target).unwrap();

        assert!(target.join("pkg/__init__.py").is_file());
    }

    #[test]
    fn test_extract_tar_gz_fixture() {
        let temp_dir = tempfile::tempdir().unwrap();
        let archive = temp_dir.path().join("pkg.tar.gz");
        write_tar_gz_fixture(&archive);

        let target = temp_dir.path().join("out");
        fs::create_dir_all(&target).unwrap();
        extract_tar_gz(&archive, &target).unwrap();

        assert!(target.join("pkg-1.0/setup.py").is_file());
    }

    #[test]
    fn test_corrupt_zip_reports_extraction_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let archive = temp_dir.path().join("broken.whl");
        fs::write(&archive, b"this is not a zip file").unwrap();

        let target = temp_dir.path().join("out");
        let err = extract_zip(&archive, &target).unwrap_err();
        assert!(matches!(err, Error::ExtractionFailed(_)));
    }

    #[test]
    fn test_corrupt_tar_gz_reports_extraction_failure() {
        let temp_dir = tempfile::tempdir().unwrap();
        let archive = temp_dir.path().join("broken.tar.gz");
        fs::write(&archive, b"this is not a tarball").unwrap();

        let target = temp_dir.path().join("out");
        fs::create_dir_all(&target).unwrap();
        let err = extract_tar_gz(&archive, &target).unwrap_err();
        assert!(matches!(err, Error::ExtractionFailed(_)));
    }

    #[test]
    fn test_clone_from_nonexistent_source_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("dest");

        // Fails whether git is missing or the source does not exist;
        // either way the typed error surfaces instead of a panic.
        let err = clone_into("/nonexistent/repo.git", &target).unwrap_err();
        assert!(matches!(err, Error::CloneFailed { .. }));
    }
}
