//! Tool version constraints attached to an execution request

use serde::{Deserialize, Serialize};
use std::fmt;

/// The package manager whose lock file is regenerated
pub const PNPM: &str = "pnpm";

/// The runtime pnpm needs
pub const NODE: &str = "node";

/// Version range restricting which build of a tool may be invoked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConstraint {
    /// Tool name, e.g. `pnpm`
    pub tool_name: String,
    /// Version range, `None` when unconstrained
    pub constraint: Option<String>,
}

impl ToolConstraint {
    /// Creates a new ToolConstraint
    pub fn new(tool_name: impl Into<String>, constraint: Option<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            constraint,
        }
    }

    /// Creates an unconstrained ToolConstraint
    pub fn unconstrained(tool_name: impl Into<String>) -> Self {
        Self::new(tool_name, None)
    }
}

impl fmt::Display for ToolConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.constraint {
            Some(range) => write!(f, "{}@{}", self.tool_name, range),
            None => write!(f, "{} (unconstrained)", self.tool_name),
        }
    }
}
