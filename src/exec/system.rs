//! Host command runner
//!
//! Runs each command directly on the host, without a shell and without a
//! sandbox. Tool constraints cannot be enforced here; the installed versions
//! are probed and a mismatch is reported as a warning.

use super::env::{base_env, Env};
use super::{CommandOutput, CommandRunner, ExecutionRequest};
use crate::domain::{parse_loose_version, ToolConstraint, VersionRange};
use crate::error::{ExecError, TemporaryError};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Runner that spawns commands on the host
#[derive(Debug, Clone)]
pub struct SystemCommandRunner {
    /// Host environment the child environment is derived from
    host_env: Env,
}

impl SystemCommandRunner {
    /// Create a runner deriving child environments from `host_env`
    pub fn new(host_env: Env) -> Self {
        Self { host_env }
    }

    /// Environment a child process receives for the request
    pub fn child_env(&self, request: &ExecutionRequest) -> Env {
        let mut env = if request.sandbox.inherit_env {
            self.host_env.clone()
        } else {
            base_env(&self.host_env)
        };
        env.extend(request.extra_env.clone());
        env
    }

    async fn check_tool(&self, constraint: &ToolConstraint, cwd: &Path, env: &Env) {
        let Some(raw) = constraint.constraint.as_deref() else {
            return;
        };
        let Some(range) = VersionRange::parse(raw) else {
            tracing::debug!(
                "cannot interpret {} constraint '{}', skipping version check",
                constraint.tool_name,
                raw
            );
            return;
        };

        let output = Command::new(&constraint.tool_name)
            .arg("--version")
            .current_dir(cwd)
            .env_clear()
            .envs(env)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await;

        let output = match output {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                tracing::debug!(
                    "`{} --version` exited with {}",
                    constraint.tool_name,
                    output.status
                );
                return;
            }
            Err(e) => {
                tracing::debug!("could not probe {}: {}", constraint.tool_name, e);
                return;
            }
        };

        let text = String::from_utf8_lossy(&output.stdout);
        match text.lines().next().and_then(parse_loose_version) {
            Some(installed) if range.matches(&installed) => {
                tracing::debug!(
                    "{} {} satisfies {}",
                    constraint.tool_name,
                    installed,
                    range
                );
            }
            Some(installed) => {
                tracing::warn!(
                    "installed {} {} does not satisfy {}",
                    constraint.tool_name,
                    installed,
                    range
                );
            }
            None => {
                tracing::debug!(
                    "unrecognised {} version output: {}",
                    constraint.tool_name,
                    text.trim()
                );
            }
        }
    }

    async fn run_step(
        &self,
        step: usize,
        command: &str,
        cwd: &Path,
        env: &Env,
    ) -> Result<CommandOutput, ExecError> {
        let mut parts = command.split_whitespace();
        let Some(program) = parts.next() else {
            return Err(ExecError::InvalidCommand { step });
        };

        tracing::debug!("running `{}` in {}", command, cwd.display());
        let output = Command::new(program)
            .args(parts)
            .current_dir(cwd)
            .env_clear()
            .envs(env)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ExecError::spawn(step, command, e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            return Ok(CommandOutput {
                command: command.to_string(),
                stdout,
                stderr,
            });
        }

        match output.status.code() {
            Some(code) => Err(ExecError::command_failed(
                step,
                command,
                Some(code),
                stdout,
                stderr,
            )),
            // No exit code means the process was killed from outside
            None => Err(TemporaryError::new(format!(
                "`{}` was terminated by a signal",
                command
            ))
            .into()),
        }
    }

    async fn run_sequence(
        &self,
        commands: &[String],
        cwd: &Path,
        env: &Env,
    ) -> Result<Vec<CommandOutput>, ExecError> {
        let mut outputs = Vec::with_capacity(commands.len());
        for (step, command) in commands.iter().enumerate() {
            outputs.push(self.run_step(step, command, cwd, env).await?);
        }
        Ok(outputs)
    }

    /// Version probes followed by the commands, as one unit for the timeout
    async fn run_request(
        &self,
        request: &ExecutionRequest,
        cwd: &Path,
        env: &Env,
    ) -> Result<Vec<CommandOutput>, ExecError> {
        for constraint in &request.tool_constraints {
            self.check_tool(constraint, cwd, env).await;
        }
        self.run_sequence(&request.commands, cwd, env).await
    }
}

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, request: ExecutionRequest) -> Result<Vec<CommandOutput>, ExecError> {
        let cwd = request.cwd().to_path_buf();
        let env = self.child_env(&request);

        let sequence = self.run_request(&request, &cwd, &env);
        match request.sandbox.timeout {
            Some(limit) => match tokio::time::timeout(limit, sequence).await {
                Ok(result) => result,
                Err(_) => Err(TemporaryError::new(format!(
                    "command sequence timed out after {}s",
                    limit.as_secs_f64()
                ))
                .into()),
            },
            None => sequence.await,
        }
    }
}
