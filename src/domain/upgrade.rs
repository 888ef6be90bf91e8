//! Requested upgrades handed over by the upgrade planner

use serde::{Deserialize, Serialize};
use std::fmt;

/// One requested change to the project
///
/// Regular upgrades carry a dependency name and the version it moves to.
/// A lock file maintenance entry carries neither and only sets the flag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upgrade {
    /// Name of the dependency being upgraded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dep_name: Option<String>,
    /// Version the dependency moves to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_version: Option<String>,
    /// Whether this entry asks for a full lock file regeneration
    #[serde(default)]
    pub is_lock_file_maintenance: bool,
}

impl Upgrade {
    /// Creates a regular dependency upgrade
    pub fn new(dep_name: impl Into<String>, new_version: impl Into<String>) -> Self {
        Self {
            dep_name: Some(dep_name.into()),
            new_version: Some(new_version.into()),
            is_lock_file_maintenance: false,
        }
    }

    /// Creates a lock file maintenance entry
    pub fn lock_file_maintenance() -> Self {
        Self {
            dep_name: None,
            new_version: None,
            is_lock_file_maintenance: true,
        }
    }

    /// Returns the new version if this upgrade targets `tool`
    pub fn version_for(&self, tool: &str) -> Option<&str> {
        match (&self.dep_name, &self.new_version) {
            (Some(name), Some(version)) if name == tool => Some(version.as_str()),
            _ => None,
        }
    }

    /// Parses `NAME@VERSION`, allowing scoped names such as `@types/node@20.1.0`
    pub fn parse(value: &str) -> Option<Self> {
        let (name, version) = value.rsplit_once('@')?;
        let name = name.trim();
        let version = version.trim();
        if name.is_empty() || name == "@" || version.is_empty() {
            return None;
        }
        Some(Self::new(name, version))
    }
}

impl fmt::Display for Upgrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_lock_file_maintenance {
            return write!(f, "lock file maintenance");
        }
        match (&self.dep_name, &self.new_version) {
            (Some(name), Some(version)) => write!(f, "{}@{}", name, version),
            (Some(name), None) => write!(f, "{}", name),
            _ => write!(f, "<unnamed upgrade>"),
        }
    }
}

/// Returns the version requested for `tool`, first match wins
pub fn requested_version<'a>(upgrades: &'a [Upgrade], tool: &str) -> Option<&'a str> {
    upgrades.iter().find_map(|u| u.version_for(tool))
}

/// Returns true if any upgrade asks for lock file maintenance
pub fn has_lock_file_maintenance(upgrades: &[Upgrade]) -> bool {
    upgrades.iter().any(|u| u.is_lock_file_maintenance)
}
