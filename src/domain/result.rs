//! Outcome of a lock file generation run

use serde::{Deserialize, Serialize};

/// Either the regenerated lock file or the tool's diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GenerateLockFileResult {
    /// The tool ran to completion
    Success {
        /// Lock file content read back after the run, `None` if it could not be read
        lock_file: Option<String>,
    },
    /// The tool failed
    Failure {
        stdout: Option<String>,
        stderr: Option<String>,
    },
}

impl GenerateLockFileResult {
    /// Creates a Success result
    pub fn success(lock_file: Option<String>) -> Self {
        GenerateLockFileResult::Success { lock_file }
    }

    /// Creates a Failure result
    pub fn failure(stdout: Option<String>, stderr: Option<String>) -> Self {
        GenerateLockFileResult::Failure { stdout, stderr }
    }

    /// Returns true if this is a Success result
    pub fn is_success(&self) -> bool {
        matches!(self, GenerateLockFileResult::Success { .. })
    }

    /// Returns the lock file content for a Success result
    pub fn lock_file(&self) -> Option<&str> {
        match self {
            GenerateLockFileResult::Success { lock_file } => lock_file.as_deref(),
            GenerateLockFileResult::Failure { .. } => None,
        }
    }
}
