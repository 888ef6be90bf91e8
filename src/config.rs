//! relock.toml configuration file
//!
//! ```toml
//! ignore_scripts = true
//! post_update_options = ["pnpmDedupe"]
//!
//! [constraints]
//! pnpm = "^8"
//! node = ">=18"
//!
//! [policy]
//! allow_scripts = false
//! expose_all_env = false
//! exec_timeout_secs = 900
//! ```

use crate::domain::{GlobalPolicy, PostUpdateConfig};
use crate::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default config file name, looked up in the project directory
pub const CONFIG_FILE_NAME: &str = "relock.toml";

/// On-disk representation of the config file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    constraints: BTreeMap<String, String>,
    #[serde(default)]
    post_update_options: Vec<String>,
    #[serde(default)]
    ignore_scripts: bool,
    #[serde(default)]
    policy: FilePolicy,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FilePolicy {
    #[serde(default)]
    allow_scripts: bool,
    #[serde(default)]
    expose_all_env: bool,
    exec_timeout_secs: Option<u64>,
}

impl From<FileConfig> for PostUpdateConfig {
    fn from(file: FileConfig) -> Self {
        PostUpdateConfig {
            constraints: file.constraints,
            post_update_options: file.post_update_options.into_iter().collect(),
            ignore_scripts: file.ignore_scripts,
            policy: GlobalPolicy {
                allow_scripts: file.policy.allow_scripts,
                expose_all_env: file.policy.expose_all_env,
                exec_timeout: file.policy.exec_timeout_secs.map(Duration::from_secs),
            },
        }
    }
}

/// Parse config file content
pub fn parse_config(content: &str, path: &Path) -> Result<PostUpdateConfig, ConfigError> {
    let file: FileConfig =
        toml::from_str(content).map_err(|e| ConfigError::parse_error(path, e.to_string()))?;
    Ok(file.into())
}

/// Load configuration
///
/// An explicit path must exist. Without one, `relock.toml` in `project_dir`
/// is used when present and defaults otherwise.
pub fn load_config(
    explicit: Option<&Path>,
    project_dir: &Path,
) -> Result<PostUpdateConfig, ConfigError> {
    let path: PathBuf = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = project_dir.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                return Ok(PostUpdateConfig::default());
            }
            candidate
        }
    };

    tracing::debug!("loading config from {}", path.display());
    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    parse_config(&content, &path)
}
