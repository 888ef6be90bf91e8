//! Node version files (.nvmrc, .node-version)

use crate::domain::VersionRange;

/// Version files checked in priority order
pub const NODE_VERSION_FILES: [&str; 2] = [".nvmrc", ".node-version"];

/// Extract a usable range from a version file
///
/// Only the first non-comment line counts. Aliases such as `lts/*` or `node`
/// are not ranges and yield `None`.
pub fn parse_node_version_file(content: &str) -> Option<String> {
    let line = content
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))?;

    let version = line.strip_prefix('v').unwrap_or(line);
    if VersionRange::is_valid(version) {
        Some(version.to_string())
    } else {
        None
    }
}
