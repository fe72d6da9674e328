//! The check loop: discover, read, parse, validate.

use jsv::{Schema, Validator, ValidatorConfig};
use tracing::{debug, info};

use crate::config::CheckConfig;
use crate::error::{ScanError, ScanErrorKind, Violation};
use crate::format::parse_documents;
use crate::report::CheckReport;
use crate::source::{ScanResult, content_format_for, find_files, read_file_bounded};

/// Validate every JSON/YAML document found under `check_config.paths`
/// against `schema`.
///
/// `validator_config.failure_policy` decides whether a document reports its
/// first violation only or all of them.
///
/// # Errors
///
/// Returns an error if `check_config.paths` is empty or a path does not
/// exist. A malformed schema aborts the run with the [`jsv::SchemaError`]
/// as the root cause (recoverable with `downcast_ref`). Unreadable and
/// unparsable files are reported in `report.scan_errors` instead.
pub fn check_fs(
    check_config: &CheckConfig,
    schema: &Schema,
    validator_config: &ValidatorConfig,
) -> anyhow::Result<CheckReport> {
    if check_config.paths.is_empty() {
        anyhow::bail!("No paths provided for checking");
    }
    for path in &check_config.paths {
        if !path.exists() {
            anyhow::bail!("Path does not exist: {}", path.display());
        }
    }

    let validator = Validator::new(validator_config);
    let (files, mut scan_errors) = find_files(check_config);
    info!(files = files.len(), "discovered documents");

    let mut violations = Vec::new();
    let mut checked_files: usize = 0;
    let mut checked_documents: usize = 0;
    // Discovery failures are already in scan_errors; count them up front.
    let mut failed_files: usize = scan_errors.len();
    let mut total_bytes: u64 = 0;

    for file_path in &files {
        if checked_files + failed_files >= check_config.max_files {
            scan_errors.push(ScanError {
                file: file_path.clone(),
                kind: ScanErrorKind::LimitExceeded,
                message: format!(
                    "Check aborted: max_files limit ({}) reached; remaining files not checked",
                    check_config.max_files
                ),
            });
            failed_files += 1;
            break;
        }

        let Some(format) = content_format_for(file_path) else {
            continue;
        };

        let content = match read_file_bounded(file_path, check_config.max_file_size) {
            ScanResult::Ok(c) => c,
            ScanResult::Err(e) => {
                scan_errors.push(e);
                failed_files += 1;
                continue;
            }
        };

        let file_bytes = content.len() as u64;
        if total_bytes.saturating_add(file_bytes) > check_config.max_total_bytes {
            scan_errors.push(ScanError {
                file: file_path.clone(),
                kind: ScanErrorKind::LimitExceeded,
                message: format!(
                    "Check aborted: max_total_bytes limit ({}) reached; remaining files not checked",
                    check_config.max_total_bytes
                ),
            });
            failed_files += 1;
            break;
        }
        total_bytes = total_bytes.saturating_add(file_bytes);

        let (documents, parse_errors) = parse_documents(&content, file_path, format);
        if !parse_errors.is_empty() {
            failed_files += 1;
            scan_errors.extend(parse_errors);
        }
        if documents.is_empty() {
            continue;
        }
        checked_files += 1;

        for (position, instance) in &documents {
            let errors = validator.errors(instance, schema).map_err(|err| {
                anyhow::Error::new(err).context(format!(
                    "Malformed schema (while checking {})",
                    file_path.display()
                ))
            })?;
            checked_documents += 1;
            debug!(
                path = %file_path.display(),
                document = position,
                violations = errors.len(),
                "checked document"
            );

            violations.extend(errors.into_iter().map(|err| Violation {
                file: file_path.clone(),
                document: *position,
                keyword: err.keyword().to_owned(),
                message: err.kind.to_string(),
                instance_path: err.instance_path,
            }));
        }
    }

    let ok = violations.is_empty() && scan_errors.is_empty();
    Ok(CheckReport {
        checked_files,
        checked_documents,
        failed_files,
        ok,
        violations,
        scan_errors,
    })
}
