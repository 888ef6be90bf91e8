//! Tool constraint resolution
//!
//! Decides which pnpm and node versions the command runner should use.
//!
//! pnpm precedence, first match wins:
//! 1. An upgrade of pnpm itself (exact version)
//! 2. `constraints.pnpm` from the configuration
//! 3. `packageManager` in package.json, when it names pnpm
//! 4. `engines.pnpm` in package.json
//! 5. A lock file older than format 5.3, which only pnpm < 7 can read
//!
//! node precedence, first match wins:
//! 1. An upgrade of node itself
//! 2. `constraints.node` from the configuration
//! 3. `.nvmrc`, then `.node-version`
//! 4. `engines.node` in package.json

use crate::domain::{requested_version, PostUpdateConfig, ToolConstraint, Upgrade, NODE, PNPM};
use crate::manifest::ManifestInspector;

/// Lock files below this format version were written by pnpm 6 or older
pub const LEGACY_LOCKFILE_VERSION: f64 = 5.3;

/// Constraint emitted for legacy lock files
pub const LEGACY_PNPM_CONSTRAINT: &str = "<7";

/// Resolves the pnpm constraint
pub struct ToolConstraintResolver<'a> {
    inspector: &'a ManifestInspector<'a>,
}

impl<'a> ToolConstraintResolver<'a> {
    /// Create a resolver backed by the given inspector
    pub fn new(inspector: &'a ManifestInspector<'a>) -> Self {
        Self { inspector }
    }

    /// Resolve the effective pnpm constraint
    pub async fn resolve(
        &self,
        config: &PostUpdateConfig,
        upgrades: &[Upgrade],
    ) -> ToolConstraint {
        let constraint = match requested_version(upgrades, PNPM) {
            Some(version) => Some(version.to_string()),
            None => match config.constraint_for(PNPM) {
                Some(range) => Some(range.to_string()),
                None => self.from_project().await,
            },
        };

        let resolved = ToolConstraint::new(PNPM, constraint);
        tracing::debug!("resolved {}", resolved);
        resolved
    }

    async fn from_project(&self) -> Option<String> {
        if let Some(pkg) = self.inspector.package_json().await {
            if let Some(version) = pkg.package_manager_version(PNPM) {
                return Some(version.to_string());
            }
            if let Some(range) = pkg.engine(PNPM) {
                return Some(range.to_string());
            }
        }

        let lockfile_version = self.inspector.lockfile_version().await?;
        if lockfile_version < LEGACY_LOCKFILE_VERSION {
            tracing::debug!(
                "lockfileVersion {} requires pnpm {}",
                lockfile_version,
                LEGACY_PNPM_CONSTRAINT
            );
            return Some(LEGACY_PNPM_CONSTRAINT.to_string());
        }
        None
    }
}

/// Resolves the node constraint pnpm runs under
pub struct NodeConstraintResolver<'a> {
    inspector: &'a ManifestInspector<'a>,
}

impl<'a> NodeConstraintResolver<'a> {
    /// Create a resolver backed by the given inspector
    pub fn new(inspector: &'a ManifestInspector<'a>) -> Self {
        Self { inspector }
    }

    /// Resolve the effective node constraint
    pub async fn resolve(
        &self,
        config: &PostUpdateConfig,
        upgrades: &[Upgrade],
    ) -> ToolConstraint {
        let constraint = match requested_version(upgrades, NODE) {
            Some(version) => Some(version.to_string()),
            None => match config.constraint_for(NODE) {
                Some(range) => Some(range.to_string()),
                None => self.from_project().await,
            },
        };

        let resolved = ToolConstraint::new(NODE, constraint);
        tracing::debug!("resolved {}", resolved);
        resolved
    }

    async fn from_project(&self) -> Option<String> {
        if let Some(range) = self.inspector.node_version_file().await {
            return Some(range);
        }
        let pkg = self.inspector.package_json().await?;
        pkg.engine(NODE).map(str::to_string)
    }
}
