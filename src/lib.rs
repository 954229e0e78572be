// src/lib.rs

//! rypm Package Manager
//!
//! Multi-source package manager for a project-local dependency tree:
//! resolves a package name against one of three disjoint source registries,
//! fetches the resolved artifact, and keeps the project manifest in sync
//! with the installed set.
//!
//! # Architecture
//!
//! - Module tree: fixed per-source layout under `modules/` at the project root
//! - Sources: Ryton registry (git-hosted JSON), Python index, static Zig table
//! - Transports: external `git` clone, or HTTP download + archive extraction
//! - Manifest: `ryton.toml`, the declarative record of installed packages

mod error;
pub mod fetch;
pub mod layout;
pub mod manager;
pub mod manifest;
pub mod registry;
pub mod source;

pub use error::{Error, Result};
