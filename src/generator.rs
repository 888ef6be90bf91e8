//! Lock file generation workflow
//!
//! This module provides:
//! - Workflow coordination: resolve → scope env → maintenance → build → execute → read back
//! - Failure classification: infrastructure errors propagate, tool errors become results
//!
//! Each call is independent; concurrent calls are fine as long as they target
//! different project directories.

use crate::command::build_commands;
use crate::constraint::{NodeConstraintResolver, ToolConstraintResolver};
use crate::domain::{GenerateLockFileResult, PostUpdateConfig, Upgrade};
use crate::error::{ExecError, TemporaryError};
use crate::exec::{scoped_env, CommandRunner, Env, ExecutionRequest, SandboxOptions};
use crate::fs::LocalFs;
use crate::maintenance::LockFileMaintenanceHandler;
use crate::manifest::{lock_file_path, ManifestInspector};
use std::path::Path;

/// Regenerates pnpm lock files through a command runner
pub struct LockFileGenerator<'a> {
    /// Filesystem for hints, maintenance and read-back
    fs: &'a dyn LocalFs,
    /// Engine executing the pnpm commands
    runner: &'a dyn CommandRunner,
}

impl<'a> LockFileGenerator<'a> {
    /// Create a generator from its collaborators
    pub fn new(fs: &'a dyn LocalFs, runner: &'a dyn CommandRunner) -> Self {
        Self { fs, runner }
    }

    /// Regenerate `pnpm-lock.yaml` in `lock_file_dir`
    ///
    /// Returns `Err` only for infrastructure failures, which the caller is
    /// expected to retry. Tool failures come back as
    /// [`GenerateLockFileResult::Failure`].
    pub async fn generate_lock_file(
        &self,
        lock_file_dir: &Path,
        env: &Env,
        config: &PostUpdateConfig,
        upgrades: &[Upgrade],
    ) -> Result<GenerateLockFileResult, TemporaryError> {
        let lock_file = lock_file_path(lock_file_dir);

        // Step 1: Resolve tool constraints
        let inspector = ManifestInspector::new(self.fs, lock_file_dir);
        let node = NodeConstraintResolver::new(&inspector)
            .resolve(config, upgrades)
            .await;
        let pnpm = ToolConstraintResolver::new(&inspector)
            .resolve(config, upgrades)
            .await;

        // Step 2: Scope the environment
        let extra_env = scoped_env(env, config.policy.expose_all_env);

        // Step 3: Clear the old lock file for maintenance upgrades
        LockFileMaintenanceHandler::new(self.fs)
            .prepare(&lock_file, upgrades)
            .await;

        // Step 4: Build commands
        let commands = build_commands(config);

        // Step 5: Execute
        let request = ExecutionRequest {
            commands,
            cwd_file: lock_file.clone(),
            extra_env,
            tool_constraints: vec![node, pnpm],
            sandbox: SandboxOptions {
                timeout: config.policy.exec_timeout,
                inherit_env: config.policy.expose_all_env,
            },
        };

        if let Err(err) = self.runner.run(request).await {
            return classify_failure(err);
        }

        // Step 6: Read back whatever pnpm wrote
        let content = self.fs.read_optional(&lock_file).await;
        if content.is_none() {
            tracing::debug!(
                "pnpm succeeded but {} could not be read",
                lock_file.display()
            );
        }
        Ok(GenerateLockFileResult::success(content))
    }
}

/// Infrastructure errors propagate untouched, everything else becomes a result
///
/// Failures that never produced output (a missing pnpm binary, an empty
/// command) report the error itself as stderr.
fn classify_failure(err: ExecError) -> Result<GenerateLockFileResult, TemporaryError> {
    match err {
        ExecError::Temporary(temporary) => Err(temporary),
        other => {
            tracing::debug!("pnpm lock file error: {}", other);
            let stdout = other.stdout().map(str::to_string);
            let stderr = match (other.stdout(), other.stderr()) {
                (None, None) => Some(other.to_string()),
                (_, stderr) => stderr.map(str::to_string),
            };
            Ok(GenerateLockFileResult::failure(stdout, stderr))
        }
    }
}
