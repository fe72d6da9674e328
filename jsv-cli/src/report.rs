//! Check report types.

use serde::Serialize;

use crate::error::{ScanError, Violation};

/// Result of a check run.
///
/// `ok` is false as soon as either list is non-empty. Scan errors mean some
/// files were never checked.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct CheckReport {
    /// Files read and parsed (at least partially).
    pub checked_files: usize,
    /// Documents validated across all checked files.
    pub checked_documents: usize,
    /// Files that could not be read or parsed.
    pub failed_files: usize,
    pub ok: bool,
    pub violations: Vec<Violation>,
    pub scan_errors: Vec<ScanError>,
}

impl CheckReport {
    #[must_use]
    pub fn violations_count(&self) -> usize {
        self.violations.len()
    }

    /// Number of distinct files with at least one violation.
    #[must_use]
    pub fn invalid_files(&self) -> usize {
        let mut files: Vec<_> = self.violations.iter().map(|v| &v.file).collect();
        files.dedup();
        files.len()
    }
}
