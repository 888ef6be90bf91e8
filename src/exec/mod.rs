//! Command execution seam
//!
//! This module provides:
//! - ExecutionRequest, built once per run and handed to a runner by value
//! - CommandRunner trait for executing the request
//! - SystemCommandRunner for running commands on the host
//! - Environment helpers for the child process

mod env;
mod system;

pub use env::{base_env, scoped_env, Env, BASE_ENV_VARS};
pub use system::SystemCommandRunner;

use crate::domain::ToolConstraint;
use crate::error::ExecError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Sandbox settings passed through to the runner
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SandboxOptions {
    /// Abort the whole sequence after this long
    pub timeout: Option<Duration>,
    /// Give the child the full host environment instead of the allow-list
    pub inherit_env: bool,
}

/// Everything a runner needs to execute one command sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    /// Commands in execution order
    pub commands: Vec<String>,
    /// File whose directory the commands run in
    pub cwd_file: PathBuf,
    /// Variables layered on top of the base environment
    pub extra_env: BTreeMap<String, String>,
    /// Required tool versions
    pub tool_constraints: Vec<ToolConstraint>,
    /// Sandbox settings
    pub sandbox: SandboxOptions,
}

impl ExecutionRequest {
    /// Directory the commands run in
    pub fn cwd(&self) -> &Path {
        match self.cwd_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Constraint resolved for a tool, if any
    pub fn constraint_for(&self, tool: &str) -> Option<&str> {
        self.tool_constraints
            .iter()
            .find(|c| c.tool_name == tool)
            .and_then(|c| c.constraint.as_deref())
    }
}

/// Captured output of one successful command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// The command as requested
    pub command: String,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

/// Executes command sequences
///
/// Implementations run the commands in order and stop at the first failure,
/// reporting the failing step through [`ExecError`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run every command of the request
    async fn run(&self, request: ExecutionRequest) -> Result<Vec<CommandOutput>, ExecError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(cwd_file: &str) -> ExecutionRequest {
        ExecutionRequest {
            commands: vec!["pnpm install".to_string()],
            cwd_file: PathBuf::from(cwd_file),
            extra_env: BTreeMap::new(),
            tool_constraints: vec![
                ToolConstraint::unconstrained("node"),
                ToolConstraint::new("pnpm", Some("<7".to_string())),
            ],
            sandbox: SandboxOptions::default(),
        }
    }

    #[test]
    fn test_cwd_is_parent_of_anchor() {
        let req = request("/repo/packages/app/pnpm-lock.yaml");
        assert_eq!(req.cwd(), Path::new("/repo/packages/app"));
    }

    #[test]
    fn test_cwd_for_bare_file_name() {
        let req = request("pnpm-lock.yaml");
        assert_eq!(req.cwd(), Path::new("."));
    }

    #[test]
    fn test_constraint_for() {
        let req = request("pnpm-lock.yaml");
        assert_eq!(req.constraint_for("pnpm"), Some("<7"));
        assert_eq!(req.constraint_for("node"), None);
        assert_eq!(req.constraint_for("yarn"), None);
    }
}
