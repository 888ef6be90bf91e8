//! Lock file maintenance
//!
//! A maintenance upgrade regenerates the lock file from scratch, so the old
//! one is removed before pnpm runs. Removal is best effort: a missing lock
//! file is a valid starting point for pnpm.

use crate::domain::{has_lock_file_maintenance, Upgrade};
use crate::fs::LocalFs;
use std::fmt::Display;
use std::future::Future;
use std::path::Path;

/// Run a fallible action, log its failure and carry on
///
/// Returns `None` when the action failed.
pub async fn best_effort<T, E, F>(action: &str, fut: F) -> Option<T>
where
    E: Display,
    F: Future<Output = Result<T, E>>,
{
    match fut.await {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("{} failed, continuing: {}", action, e);
            None
        }
    }
}

/// What the maintenance handler did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaintenanceOutcome {
    /// No maintenance upgrade was requested
    NotRequested,
    /// The previous lock file was removed
    Removed,
    /// Removal failed and was ignored
    RemovalFailed,
}

/// Removes the previous lock file for maintenance upgrades
pub struct LockFileMaintenanceHandler<'a> {
    fs: &'a dyn LocalFs,
}

impl<'a> LockFileMaintenanceHandler<'a> {
    /// Create a handler using the given filesystem
    pub fn new(fs: &'a dyn LocalFs) -> Self {
        Self { fs }
    }

    /// Delete `lock_file` if any upgrade asks for maintenance
    pub async fn prepare(&self, lock_file: &Path, upgrades: &[Upgrade]) -> MaintenanceOutcome {
        if !has_lock_file_maintenance(upgrades) {
            return MaintenanceOutcome::NotRequested;
        }

        tracing::debug!(
            "removing {} first due to lock file maintenance upgrade",
            lock_file.display()
        );
        let action = format!("removing {}", lock_file.display());
        match best_effort(&action, self.fs.remove_file(lock_file)).await {
            Some(()) => MaintenanceOutcome::Removed,
            None => MaintenanceOutcome::RemovalFailed,
        }
    }
}
