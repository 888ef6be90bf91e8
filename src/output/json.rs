//! JSON output formatter for machine processing

use crate::domain::{GenerateLockFileResult, Upgrade};
use crate::output::{OutputFormatter, RunReport, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of a run
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Lock file path
    path: String,
    /// Requested upgrades, verbose mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    upgrades: Option<&'a [Upgrade]>,
    /// Flattened generation result
    #[serde(flatten)]
    result: &'a GenerateLockFileResult,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport<'_>, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            path: report.lock_file.display().to_string(),
            upgrades: (self.verbosity == Verbosity::Verbose).then_some(report.upgrades),
            result: report.result,
        };

        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::path::Path;

    fn render(verbosity: Verbosity, result: &GenerateLockFileResult) -> Value {
        let upgrades = vec![Upgrade::new("pnpm", "8.6.0")];
        let report = RunReport {
            lock_file: Path::new("/repo/pnpm-lock.yaml"),
            upgrades: &upgrades,
            result,
        };
        let mut out = Vec::new();
        JsonFormatter::new(verbosity)
            .format(&report, &mut out)
            .unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn test_success_schema() {
        let json = render(
            Verbosity::Normal,
            &GenerateLockFileResult::success(Some("lockfileVersion: '6.0'\n".into())),
        );
        assert_eq!(json["path"], "/repo/pnpm-lock.yaml");
        assert_eq!(json["status"], "success");
        assert_eq!(json["lock_file"], "lockfileVersion: '6.0'\n");
        assert!(json.get("upgrades").is_none());
    }

    #[test]
    fn test_failure_schema() {
        let json = render(
            Verbosity::Normal,
            &GenerateLockFileResult::failure(None, Some("ERR_PNPM".into())),
        );
        assert_eq!(json["status"], "failure");
        assert!(json["stdout"].is_null());
        assert_eq!(json["stderr"], "ERR_PNPM");
    }

    #[test]
    fn test_verbose_includes_upgrades() {
        let json = render(Verbosity::Verbose, &GenerateLockFileResult::success(None));
        assert_eq!(json["upgrades"][0]["depName"], "pnpm");
        assert_eq!(json["upgrades"][0]["newVersion"], "8.6.0");
    }
}
