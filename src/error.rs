//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues parsing package.json or pnpm-lock.yaml
//! - ExecError: Failures reported by the command runner
//! - TemporaryError: Infrastructure failures the caller is expected to retry
//! - ConfigError: Issues with CLI arguments or the config file

use std::path::PathBuf;
use thiserror::Error;

/// Message carried by every infrastructure error
pub const TEMPORARY_ERROR: &str = "temporary-error";

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Infrastructure errors that escaped lock file generation
    #[error(transparent)]
    Temporary(#[from] TemporaryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to parsing project files
#[derive(Error, Debug)]
pub enum ManifestError {
    /// JSON parsing error (for package.json)
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// YAML parsing error (for pnpm-lock.yaml)
    #[error("failed to parse YAML in {path}: {message}")]
    YamlParseError { path: PathBuf, message: String },
}

/// Environmental failure (sandbox crash, timeout, killed process).
///
/// Always displays as [`TEMPORARY_ERROR`] so that callers matching on the
/// message and callers matching on the type agree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("temporary-error")]
pub struct TemporaryError {
    /// Why the environment gave up; logged, never displayed
    pub reason: String,
}

impl TemporaryError {
    /// Creates a new TemporaryError
    pub fn new(reason: impl Into<String>) -> Self {
        TemporaryError {
            reason: reason.into(),
        }
    }
}

/// Errors returned by a command runner
#[derive(Error, Debug)]
pub enum ExecError {
    /// Infrastructure failure, to be retried by the caller
    #[error(transparent)]
    Temporary(#[from] TemporaryError),

    /// A command exited unsuccessfully
    #[error("command #{step} `{command}` failed with exit code {exit_code:?}")]
    CommandFailed {
        /// Zero-based index of the failing command
        step: usize,
        command: String,
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
    },

    /// A command could not be started
    #[error("failed to start command #{step} `{command}`: {source}")]
    Spawn {
        step: usize,
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A command string was empty
    #[error("command #{step} is empty")]
    InvalidCommand { step: usize },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid TOML in the config file
    #[error("failed to parse config file {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    /// Invalid upgrade argument
    #[error("invalid upgrade '{value}': expected NAME@VERSION")]
    InvalidUpgrade { value: String },

    /// Invalid constraint argument
    #[error("invalid constraint '{value}': expected TOOL=RANGE")]
    InvalidConstraint { value: String },
}

impl ManifestError {
    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new YamlParseError
    pub fn yaml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::YamlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl ExecError {
    /// Creates a new CommandFailed error
    pub fn command_failed(
        step: usize,
        command: impl Into<String>,
        exit_code: Option<i32>,
        stdout: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        ExecError::CommandFailed {
            step,
            command: command.into(),
            exit_code,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Creates a new Spawn error
    pub fn spawn(step: usize, command: impl Into<String>, source: std::io::Error) -> Self {
        ExecError::Spawn {
            step,
            command: command.into(),
            source,
        }
    }

    /// Returns true if this is an infrastructure failure
    pub fn is_temporary(&self) -> bool {
        matches!(self, ExecError::Temporary(_))
    }

    /// Index of the command that failed, if the failure belongs to one
    pub fn step(&self) -> Option<usize> {
        match self {
            ExecError::CommandFailed { step, .. }
            | ExecError::Spawn { step, .. }
            | ExecError::InvalidCommand { step } => Some(*step),
            ExecError::Temporary(_) => None,
        }
    }

    /// Captured standard output, if any was produced
    pub fn stdout(&self) -> Option<&str> {
        match self {
            ExecError::CommandFailed { stdout, .. } => Some(stdout.as_str()),
            _ => None,
        }
    }

    /// Captured standard error, if any was produced
    pub fn stderr(&self) -> Option<&str> {
        match self {
            ExecError::CommandFailed { stderr, .. } => Some(stderr.as_str()),
            _ => None,
        }
    }
}

impl ConfigError {
    /// Creates a new ParseError
    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}
