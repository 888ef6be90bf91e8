//! package.json hints for tool versions
//!
//! Handles:
//! - packageManager (`"pnpm@8.1.0"`, optionally with a corepack `+sha512.…` suffix)
//! - engines (`{"pnpm": ">=8", "node": ">=18"}`)

use crate::error::ManifestError;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// The parts of package.json that pin tool versions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageJson {
    /// Raw `packageManager` field
    pub package_manager: Option<String>,
    /// String entries of the `engines` mapping
    pub engines: BTreeMap<String, String>,
}

impl PackageJson {
    /// Parse package.json content
    ///
    /// Fields with unexpected types are ignored rather than rejected.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        let json: Value = serde_json::from_str(content)
            .map_err(|e| ManifestError::json_parse_error(path, e.to_string()))?;

        let package_manager = json
            .get("packageManager")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let engines = json
            .get("engines")
            .and_then(|v| v.as_object())
            .map(|map| {
                map.iter()
                    .filter_map(|(tool, range)| {
                        range.as_str().map(|r| (tool.clone(), r.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            package_manager,
            engines,
        })
    }

    /// Version declared in `packageManager` if it names `tool`
    pub fn package_manager_version(&self, tool: &str) -> Option<&str> {
        let (name, version) = self.package_manager.as_deref()?.split_once('@')?;
        if name != tool {
            return None;
        }
        // corepack appends the tarball integrity after `+`
        let version = version.split('+').next().unwrap_or(version).trim();
        if version.is_empty() {
            None
        } else {
            Some(version)
        }
    }

    /// Range declared for `tool` in `engines`
    pub fn engine(&self, tool: &str) -> Option<&str> {
        self.engines
            .get(tool)
            .map(|range| range.trim())
            .filter(|range| !range.is_empty())
    }
}

/// Path of package.json inside a project directory
pub fn package_json_path(dir: &Path) -> PathBuf {
    dir.join("package.json")
}
