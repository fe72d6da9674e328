//! Filesystem source options for `check_fs`.
//!
//! Validation semantics (type names, failure policy) live in
//! [`jsv::ValidatorConfig`]; this type only controls how documents are found
//! and read.

use std::path::PathBuf;

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct CheckConfig {
    /// Paths to check (files or directories). Required, must be non-empty.
    pub paths: Vec<PathBuf>,
    /// Exclude patterns (glob format), matched against the full path and the
    /// file name.
    pub exclude: Vec<String>,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links.
    ///
    /// **Defaults to `false`**. Even when enabled, files resolving outside
    /// the scanned root are reported instead of read.
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
    /// Maximum number of files to check (default: `100_000`).
    pub max_files: usize,
    /// Maximum total bytes read across all files (default: 512 MB).
    pub max_total_bytes: u64,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            exclude: Vec::new(),
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
            max_files: 100_000,
            max_total_bytes: 536_870_912,
        }
    }
}
