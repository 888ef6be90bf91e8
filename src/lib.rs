//! relock - pnpm lock file regeneration library
//!
//! This library regenerates `pnpm-lock.yaml` for a project:
//! - Resolves which pnpm and Node.js versions to run
//! - Builds the pnpm command sequence from configuration
//! - Executes it with a scoped environment
//! - Reads the regenerated lock file back

pub mod cli;
pub mod command;
pub mod config;
pub mod constraint;
pub mod domain;
pub mod error;
pub mod exec;
pub mod fs;
pub mod generator;
pub mod maintenance;
pub mod manifest;
pub mod output;
pub mod progress;
