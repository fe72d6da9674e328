//! # jsv-cli
//!
//! Checks JSON and YAML documents on disk against a [`jsv`] schema.
//!
//! The library half of the `jsv` binary: file discovery, bounded reads,
//! document parsing and reporting. Validation itself is delegated to
//! [`jsv::Validator`] unchanged.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//! use jsv::ValidatorConfig;
//! use jsv_cli::{CheckConfig, check_fs, load_schema};
//!
//! let mut check_config = CheckConfig::default();
//! check_config.paths = vec![PathBuf::from("data")];
//! check_config.exclude = vec!["*.schema.json".to_owned()];
//!
//! let schema = load_schema(Path::new("person.schema.json"), check_config.max_file_size).unwrap();
//! let report = check_fs(&check_config, &schema, &ValidatorConfig::default()).unwrap();
//! println!("Documents checked: {}", report.checked_documents);
//! println!("Violations: {}", report.violations_count());
//! println!("OK: {}", report.ok);
//! ```

mod check;
mod config;
mod error;
mod format;
pub mod output;
mod report;
mod source;

pub use check::check_fs;
pub use config::CheckConfig;
pub use error::{ScanError, ScanErrorKind, Violation};
pub use format::load_schema;
pub use report::CheckReport;
