//! pnpm-lock.yaml reader
//!
//! Only the `lockfileVersion` header is of interest. pnpm up to 7 writes it as
//! a number (`5.4`), pnpm 8 and later as a quoted string (`'6.0'`).

use crate::error::ManifestError;
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Lock file name written by pnpm
pub const LOCK_FILE_NAME: &str = "pnpm-lock.yaml";

/// Header information from a pnpm lock file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PnpmLock {
    /// Declared lock file format version
    pub lockfile_version: Option<f64>,
}

impl PnpmLock {
    /// Parse pnpm-lock.yaml content
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        let yaml: Value = serde_yaml::from_str(content)
            .map_err(|e| ManifestError::yaml_parse_error(path, e.to_string()))?;

        let lockfile_version = match yaml.get("lockfileVersion") {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        Ok(Self { lockfile_version })
    }
}

/// Path of the lock file inside a project directory
pub fn lock_file_path(dir: &Path) -> PathBuf {
    dir.join(LOCK_FILE_NAME)
}
