//! CLI argument parsing module for relock

use crate::domain::{GlobalPolicy, PostUpdateConfig, Upgrade, PNPM_DEDUPE};
use crate::error::ConfigError;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Parse an upgrade in `NAME@VERSION` format
fn parse_upgrade(s: &str) -> Result<Upgrade, String> {
    Upgrade::parse(s).ok_or_else(|| {
        ConfigError::InvalidUpgrade {
            value: s.to_string(),
        }
        .to_string()
    })
}

/// Parse a constraint in `TOOL=RANGE` format
fn parse_constraint(s: &str) -> Result<(String, String), String> {
    let invalid = || {
        ConfigError::InvalidConstraint {
            value: s.to_string(),
        }
        .to_string()
    };
    let (tool, range) = s.split_once('=').ok_or_else(invalid)?;
    let (tool, range) = (tool.trim(), range.trim());
    if tool.is_empty() || range.is_empty() {
        return Err(invalid());
    }
    Ok((tool.to_string(), range.to_string()))
}

/// pnpm lock file regenerator
#[derive(Parser, Debug, Clone)]
#[command(name = "relock", version, about = "Regenerate pnpm-lock.yaml")]
pub struct CliArgs {
    /// Project directory containing package.json (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    // Upgrades
    /// Upgrade applied before regeneration, as NAME@VERSION (repeatable)
    #[arg(long = "upgrade", value_name = "NAME@VERSION", value_parser = parse_upgrade, action = ArgAction::Append)]
    pub upgrades: Vec<Upgrade>,

    /// Delete the existing lock file and regenerate it from scratch
    #[arg(long)]
    pub lock_file_maintenance: bool,

    // Run configuration
    /// Tool version constraint, as TOOL=RANGE (repeatable)
    #[arg(long = "constraint", value_name = "TOOL=RANGE", value_parser = parse_constraint, action = ArgAction::Append)]
    pub constraints: Vec<(String, String)>,

    /// Run `pnpm dedupe` after install
    #[arg(long)]
    pub dedupe: bool,

    /// Additional post update option (repeatable)
    #[arg(long = "post-update-option", value_name = "OPTION", action = ArgAction::Append)]
    pub post_update_options: Vec<String>,

    /// Disable lifecycle scripts and pnpmfile hooks for this run
    #[arg(long)]
    pub ignore_scripts: bool,

    // Policy
    /// Allow lifecycle scripts and pnpmfile hooks
    #[arg(long)]
    pub allow_scripts: bool,

    /// Pass the full environment, including registry credentials, to pnpm
    #[arg(long)]
    pub expose_all_env: bool,

    /// Abort pnpm after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Config file (default: relock.toml in the project directory, if present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl CliArgs {
    /// Upgrades requested on the command line, maintenance entry last
    pub fn upgrades(&self) -> Vec<Upgrade> {
        let mut upgrades = self.upgrades.clone();
        if self.lock_file_maintenance {
            upgrades.push(Upgrade::lock_file_maintenance());
        }
        upgrades
    }

    /// Layer command line settings over a configuration
    ///
    /// Flags only ever switch features on; they never turn off what the
    /// config file enabled.
    pub fn apply_to(&self, mut config: PostUpdateConfig) -> PostUpdateConfig {
        for (tool, range) in &self.constraints {
            config.constraints.insert(tool.clone(), range.clone());
        }
        if self.dedupe {
            config.post_update_options.insert(PNPM_DEDUPE.to_string());
        }
        config
            .post_update_options
            .extend(self.post_update_options.iter().cloned());
        config.ignore_scripts |= self.ignore_scripts;

        let policy = GlobalPolicy {
            allow_scripts: config.policy.allow_scripts || self.allow_scripts,
            expose_all_env: config.policy.expose_all_env || self.expose_all_env,
            exec_timeout: self
                .timeout
                .map(Duration::from_secs)
                .or(config.policy.exec_timeout),
        };
        config.with_policy(policy)
    }
}
