//! Project file inspection
//!
//! This module provides functionality to:
//! - Read tool hints from package.json (packageManager, engines)
//! - Read the lock file format version from pnpm-lock.yaml
//! - Read node versions from .nvmrc / .node-version

mod inspector;
mod lock_file;
mod node_version;
mod package_json;

pub use inspector::ManifestInspector;
pub use lock_file::{lock_file_path, PnpmLock, LOCK_FILE_NAME};
pub use node_version::{parse_node_version_file, NODE_VERSION_FILES};
pub use package_json::{package_json_path, PackageJson};
