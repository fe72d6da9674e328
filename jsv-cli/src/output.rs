//! Report rendering.
//!
//! JSON and plain-text formatters for [`CheckReport`]. Colors are left to
//! the binary.

use std::io::Write;

use crate::report::CheckReport;

/// Write the report as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Write the report as human-readable plain text.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &CheckReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer, "  JSV SCHEMA CHECK")?;
    writeln!(writer, "{}", "=".repeat(80))?;
    writeln!(writer)?;
    writeln!(writer, "  Files checked:      {}", report.checked_files)?;
    writeln!(writer, "  Documents checked:  {}", report.checked_documents)?;
    writeln!(writer, "  Files failed:       {}", report.failed_files)?;
    writeln!(writer, "  Violations found:   {}", report.violations_count())?;
    writeln!(writer)?;

    if !report.scan_errors.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  SCAN ERRORS (files that could not be checked)")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for scan_err in &report.scan_errors {
            writeln!(writer, "{}", scan_err.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    if !report.violations.is_empty() {
        writeln!(writer, "{}", "-".repeat(80))?;
        writeln!(writer, "  VIOLATIONS")?;
        writeln!(writer, "{}", "-".repeat(80))?;
        for violation in &report.violations {
            writeln!(writer, "{}", violation.format_human_readable())?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(80))?;
    if report.ok {
        writeln!(
            writer,
            "\u{2713} All {} documents in {} files are valid",
            report.checked_documents, report.checked_files
        )?;
    } else {
        if !report.scan_errors.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} file(s) could not be checked",
                report.failed_files
            )?;
        }
        if !report.violations.is_empty() {
            writeln!(
                writer,
                "\u{2717} {} violation(s) in {} file(s)",
                report.violations_count(),
                report.invalid_files()
            )?;
        }
    }
    writeln!(writer, "{}", "=".repeat(80))?;

    Ok(())
}
