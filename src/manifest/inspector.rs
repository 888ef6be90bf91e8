//! Reads project files for tool version hints
//!
//! Every lookup is optional: a missing or unparsable file is logged at debug
//! level and reported as "no hint".

use super::lock_file::{lock_file_path, PnpmLock};
use super::node_version::{parse_node_version_file, NODE_VERSION_FILES};
use super::package_json::{package_json_path, PackageJson};
use crate::fs::LocalFs;
use std::path::Path;

/// Tool version hints found in a project directory
pub struct ManifestInspector<'a> {
    fs: &'a dyn LocalFs,
    dir: &'a Path,
}

impl<'a> ManifestInspector<'a> {
    /// Create an inspector for the given project directory
    pub fn new(fs: &'a dyn LocalFs, dir: &'a Path) -> Self {
        Self { fs, dir }
    }

    /// Root package.json, if present and valid
    pub async fn package_json(&self) -> Option<PackageJson> {
        let path = package_json_path(self.dir);
        let content = self.fs.read_optional(&path).await?;
        match PackageJson::parse(&content, &path) {
            Ok(pkg) => Some(pkg),
            Err(e) => {
                tracing::debug!("ignoring {}: {}", path.display(), e);
                None
            }
        }
    }

    /// `lockfileVersion` of the existing lock file
    pub async fn lockfile_version(&self) -> Option<f64> {
        let path = lock_file_path(self.dir);
        let content = self.fs.read_optional(&path).await?;
        match PnpmLock::parse(&content, &path) {
            Ok(lock) => lock.lockfile_version,
            Err(e) => {
                tracing::debug!("ignoring {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Node range from `.nvmrc` or `.node-version`
    pub async fn node_version_file(&self) -> Option<String> {
        for name in NODE_VERSION_FILES {
            let path = self.dir.join(name);
            let Some(content) = self.fs.read_optional(&path).await else {
                continue;
            };
            if let Some(range) = parse_node_version_file(&content) {
                return Some(range);
            }
            tracing::debug!("{} does not contain a usable version", path.display());
        }
        None
    }
}
