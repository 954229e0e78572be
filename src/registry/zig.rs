// src/registry/zig.rs

//! Static Zig module resolver
//!
//! A curated allow-list of name to GitHub repository mappings, compiled in
//! and intentionally non-extensible at runtime. Resolution never touches
//! the network.

use crate::error::{Error, Result};
use crate::source::PackageLocation;

/// Curated Zig modules and their GitHub repository paths
const ZIG_PACKAGES: &[(&str, &str)] = &[
    ("mach", "hexops/mach"),
    ("zap", "zigzap/zap"),
    ("args", "MasterQ32/zig-args"),
    ("network", "MasterQ32/zig-network"),
    ("opengl", "MasterQ32/zig-opengl"),
    ("gamedev", "michal-z/zig-gamedev"),
    ("json", "getty-zig/json"),
];

/// Resolve a name against the compiled-in table
pub fn resolve(name: &str) -> Result<PackageLocation> {
    let repo = ZIG_PACKAGES
        .iter()
        .find(|(pkg, _)| *pkg == name)
        .map(|(_, repo)| *repo)
        .ok_or_else(|| Error::PackageNotFound {
            name: name.to_string(),
            source: "zig".to_string(),
        })?;

    Ok(PackageLocation::Zig {
        clone_url: format!("https://github.com/{repo}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_package() {
        let location = resolve("mach").unwrap();
        assert_eq!(
            location,
            PackageLocation::Zig {
                clone_url: "https://github.com/hexops/mach".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_unknown_package() {
        let err = resolve("raylib").unwrap_err();
        assert!(matches!(
            err,
            Error::PackageNotFound { name, source } if name == "raylib" && source == "zig"
        ));
    }

    #[test]
    fn test_all_entries_resolve() {
        for (name, repo) in ZIG_PACKAGES {
            let location = resolve(name).unwrap();
            assert_eq!(
                location.clone_url(),
                Some(format!("https://github.com/{repo}").as_str())
            );
        }
    }
}
