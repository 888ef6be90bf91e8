//! pnpm command sequence construction
//!
//! The sequence always starts with the install; `pnpm dedupe` follows it when
//! requested through the `pnpmDedupe` post update option.

use crate::domain::{PostUpdateConfig, PNPM, PNPM_DEDUPE};

/// Flags that disable lifecycle scripts and `.pnpmfile.cjs` hooks
const IGNORE_SCRIPTS_FLAGS: [&str; 2] = ["--ignore-scripts", "--ignore-pnpmfile"];

/// Builds the commands for one regeneration run
#[derive(Debug, Clone, Copy)]
pub struct CommandSequenceBuilder<'a> {
    config: &'a PostUpdateConfig,
}

impl<'a> CommandSequenceBuilder<'a> {
    /// Create a builder for the given configuration
    pub fn new(config: &'a PostUpdateConfig) -> Self {
        Self { config }
    }

    /// The install command
    pub fn install_command(&self) -> String {
        let mut parts = vec![PNPM, "install", "--recursive", "--lockfile-only"];
        if self.config.scripts_disabled() {
            parts.extend(IGNORE_SCRIPTS_FLAGS);
        }
        parts.join(" ")
    }

    /// The ordered command list
    pub fn build(&self) -> Vec<String> {
        let mut commands = vec![self.install_command()];
        if self.config.has_option(PNPM_DEDUPE) {
            commands.push(format!("{} dedupe", PNPM));
        }
        tracing::trace!("pnpm commands: {:?}", commands);
        commands
    }
}

/// Build the command list for a configuration
pub fn build_commands(config: &PostUpdateConfig) -> Vec<String> {
    CommandSequenceBuilder::new(config).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GlobalPolicy;

    fn scripts_allowed() -> GlobalPolicy {
        GlobalPolicy {
            allow_scripts: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_scripts_allowed_has_no_ignore_flags() {
        let config = PostUpdateConfig::new().with_policy(scripts_allowed());
        assert_eq!(
            build_commands(&config),
            vec!["pnpm install --recursive --lockfile-only"]
        );
    }

    #[test]
    fn test_ignore_scripts_adds_both_flags() {
        let config = PostUpdateConfig::new()
            .with_policy(scripts_allowed())
            .with_ignore_scripts(true);
        let commands = build_commands(&config);
        assert_eq!(
            commands,
            vec!["pnpm install --recursive --lockfile-only --ignore-scripts --ignore-pnpmfile"]
        );
    }

    #[test]
    fn test_policy_disallowing_scripts_adds_both_flags() {
        let config = PostUpdateConfig::new();
        let install = CommandSequenceBuilder::new(&config).install_command();
        assert!(install.contains("--ignore-scripts"));
        assert!(install.contains("--ignore-pnpmfile"));
    }

    #[test]
    fn test_dedupe_follows_install() {
        let config = PostUpdateConfig::new()
            .with_policy(scripts_allowed())
            .with_option("pnpmDedupe");
        let commands = build_commands(&config);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], "pnpm install --recursive --lockfile-only");
        assert_eq!(commands[1], "pnpm dedupe");
    }

    #[test]
    fn test_unrelated_options_ignored() {
        let config = PostUpdateConfig::new()
            .with_option("npmDedupe")
            .with_option("yarnDedupeHighest");
        assert_eq!(build_commands(&config).len(), 1);
    }

    #[test]
    fn test_install_always_first() {
        let combos = [
            PostUpdateConfig::new(),
            PostUpdateConfig::new().with_option(PNPM_DEDUPE),
            PostUpdateConfig::new()
                .with_option(PNPM_DEDUPE)
                .with_ignore_scripts(true),
        ];
        for config in &combos {
            let commands = build_commands(config);
            assert!(commands[0].starts_with("pnpm install --recursive --lockfile-only"));
        }
    }
}
