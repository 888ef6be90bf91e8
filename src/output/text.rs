//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One-line success/failure status with colors
//! - pnpm diagnostics for failed runs
//! - The requested upgrades in verbose mode

use crate::domain::GenerateLockFileResult;
use crate::output::{OutputFormatter, RunReport, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }

    fn write_block(writer: &mut dyn Write, title: &str, text: &str) -> std::io::Result<()> {
        let text = text.trim_end();
        if text.is_empty() {
            return Ok(());
        }
        writeln!(writer, "  {}:", title.dimmed())?;
        for line in text.lines() {
            writeln!(writer, "    {}", line)?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport<'_>, writer: &mut dyn Write) -> std::io::Result<()> {
        let name = report
            .lock_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| report.lock_file.display().to_string());

        if self.verbosity == Verbosity::Verbose && !report.upgrades.is_empty() {
            writeln!(writer, "{}", "Upgrades:".bold())?;
            for upgrade in report.upgrades {
                writeln!(writer, "  - {}", upgrade)?;
            }
        }

        match report.result {
            GenerateLockFileResult::Success { lock_file } => {
                if self.verbosity == Verbosity::Quiet {
                    return Ok(());
                }
                match lock_file {
                    Some(content) => writeln!(
                        writer,
                        "{} Regenerated {} ({} bytes)",
                        "✓".green(),
                        name.bold(),
                        content.len()
                    )?,
                    None => writeln!(
                        writer,
                        "{} pnpm finished but {} could not be read",
                        "!".yellow(),
                        name.bold()
                    )?,
                }
            }
            GenerateLockFileResult::Failure { stdout, stderr } => {
                writeln!(
                    writer,
                    "{} Failed to regenerate {}",
                    "✗".red(),
                    name.bold()
                )?;
                if let Some(stderr) = stderr {
                    Self::write_block(writer, "stderr", stderr)?;
                }
                if self.verbosity == Verbosity::Verbose {
                    if let Some(stdout) = stdout {
                        Self::write_block(writer, "stdout", stdout)?;
                    }
                }
            }
        }

        Ok(())
    }
}
