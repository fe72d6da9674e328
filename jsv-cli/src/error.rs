//! Per-file findings of a check run.

use std::path::PathBuf;

use serde::Serialize;

/// Why a file could not be checked.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// An I/O error occurred while reading the file.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content could not be parsed as JSON.
    JsonParseError,
    /// The file content could not be parsed as YAML.
    YamlParseError,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The resolved path is outside the scanned root (symlink escape).
    OutsideRoot,
    /// `max_files` or `max_total_bytes` was reached, truncating the run.
    LimitExceeded,
    /// A directory traversal error (permission denied, loop detected, ...).
    WalkError,
    /// An exclude glob pattern could not be parsed.
    InvalidExcludePattern,
}

/// A file that could not be checked at all.
///
/// Distinct from [`Violation`]: nothing is known about the validity of the
/// file's documents, so callers must treat it as a failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanError {
    pub file: PathBuf,
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: [scan error] {}", self.file.display(), self.message)
    }
}

/// A document that parsed but does not satisfy the schema.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Violation {
    pub file: PathBuf,
    /// 1-based position of the document in a multi-document YAML stream;
    /// always 1 for JSON.
    pub document: usize,
    /// JSON pointer to the offending value (`""` for the document root).
    pub instance_path: String,
    /// Violated schema keyword.
    pub keyword: String,
    pub message: String,
}

impl Violation {
    /// `{file}: {message} (at {path})`, with `#{document}` after the file
    /// name for every document but the first.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        let mut location = self.file.display().to_string();
        if self.document > 1 {
            location = format!("{location}#{}", self.document);
        }

        if self.instance_path.is_empty() {
            format!("{location}: {} [{}]", self.message, self.keyword)
        } else {
            format!(
                "{location}: {} [{}] (at {})",
                self.message, self.keyword, self.instance_path
            )
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn violation(document: usize, instance_path: &str) -> Violation {
        Violation {
            file: PathBuf::from("data/user.yaml"),
            document,
            instance_path: instance_path.to_owned(),
            keyword: "type".to_owned(),
            message: r#""x" is not of type ["integer"]"#.to_owned(),
        }
    }

    #[test]
    fn test_format_root_violation() {
        let formatted = violation(1, "").format_human_readable();
        assert_eq!(
            formatted,
            r#"data/user.yaml: "x" is not of type ["integer"] [type]"#
        );
    }

    #[test]
    fn test_format_nested_violation_in_later_document() {
        let formatted = violation(3, "/age").format_human_readable();
        assert!(formatted.starts_with("data/user.yaml#3: "), "got: {formatted}");
        assert!(formatted.ends_with("(at /age)"), "got: {formatted}");
    }

    #[test]
    fn test_format_scan_error() {
        let err = ScanError {
            file: PathBuf::from("big.json"),
            kind: ScanErrorKind::FileTooLarge,
            message: "File exceeds maximum size of 10 bytes".to_owned(),
        };
        assert_eq!(
            err.format_human_readable(),
            "big.json: [scan error] File exceeds maximum size of 10 bytes"
        );
    }
}
