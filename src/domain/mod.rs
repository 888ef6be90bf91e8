//! Core domain models for relock
//!
//! This module contains the fundamental types used throughout the application:
//! - Requested upgrades
//! - Per-run configuration and global policy
//! - Tool version constraints and npm style version ranges
//! - Lock file generation results

mod config;
mod result;
mod tool;
mod upgrade;
mod version_range;

pub use config::{GlobalPolicy, PostUpdateConfig, PNPM_DEDUPE};
pub use result::GenerateLockFileResult;
pub use tool::{ToolConstraint, NODE, PNPM};
pub use upgrade::{has_lock_file_maintenance, requested_version, Upgrade};
pub use version_range::{parse_loose_version, VersionRange};
