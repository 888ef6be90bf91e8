//! Per-run configuration for lock file generation

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::time::Duration;

/// Post update option that requests a `pnpm dedupe` after install
pub const PNPM_DEDUPE: &str = "pnpmDedupe";

/// Administrator level switches that used to live in a process-wide store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalPolicy {
    /// Allow lifecycle scripts and pnpmfile hooks to run
    #[serde(default)]
    pub allow_scripts: bool,
    /// Pass authentication related variables to the tool
    #[serde(default)]
    pub expose_all_env: bool,
    /// Upper bound for the whole command sequence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exec_timeout: Option<Duration>,
}

/// Immutable input for one regeneration run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostUpdateConfig {
    /// Explicit version ranges keyed by tool name (`pnpm`, `node`)
    #[serde(default)]
    pub constraints: BTreeMap<String, String>,
    /// Free-form flags such as [`PNPM_DEDUPE`]
    #[serde(default)]
    pub post_update_options: BTreeSet<String>,
    /// Disable lifecycle scripts for this run
    #[serde(default)]
    pub ignore_scripts: bool,
    /// Global policy in effect for this run
    #[serde(default)]
    pub policy: GlobalPolicy,
}

impl PostUpdateConfig {
    /// Creates an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a constraint for a tool (builder pattern)
    pub fn with_constraint(mut self, tool: impl Into<String>, range: impl Into<String>) -> Self {
        self.constraints.insert(tool.into(), range.into());
        self
    }

    /// Adds a post update option (builder pattern)
    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.post_update_options.insert(option.into());
        self
    }

    /// Sets ignore_scripts (builder pattern)
    pub fn with_ignore_scripts(mut self, ignore: bool) -> Self {
        self.ignore_scripts = ignore;
        self
    }

    /// Sets the global policy (builder pattern)
    pub fn with_policy(mut self, policy: GlobalPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the configured constraint for a tool
    pub fn constraint_for(&self, tool: &str) -> Option<&str> {
        self.constraints.get(tool).map(String::as_str)
    }

    /// Returns true if the given post update option is set
    pub fn has_option(&self, option: &str) -> bool {
        self.post_update_options.contains(option)
    }

    /// Returns true if lifecycle scripts must not run
    pub fn scripts_disabled(&self) -> bool {
        !self.policy.allow_scripts || self.ignore_scripts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_disables_scripts() {
        let config = PostUpdateConfig::new();
        assert!(config.scripts_disabled());
    }

    #[test]
    fn test_scripts_enabled_only_when_allowed_and_not_ignored() {
        let policy = GlobalPolicy {
            allow_scripts: true,
            ..Default::default()
        };
        let config = PostUpdateConfig::new().with_policy(policy.clone());
        assert!(!config.scripts_disabled());

        let config = PostUpdateConfig::new()
            .with_policy(policy)
            .with_ignore_scripts(true);
        assert!(config.scripts_disabled());
    }

    #[test]
    fn test_constraint_for() {
        let config = PostUpdateConfig::new().with_constraint("pnpm", "^8");
        assert_eq!(config.constraint_for("pnpm"), Some("^8"));
        assert_eq!(config.constraint_for("node"), None);
    }

    #[test]
    fn test_has_option() {
        let config = PostUpdateConfig::new().with_option(PNPM_DEDUPE);
        assert!(config.has_option("pnpmDedupe"));
        assert!(!config.has_option("yarnDedupeFewer"));
    }
}
