//! Document parsing: JSON files hold one document, YAML files a stream of
//! one or more.
//!
//! Both go through `serde_json::Value` before conversion into
//! [`jsv::Value`], so integers and floats are told apart the same way for
//! either syntax.

use std::path::Path;

use anyhow::Context;
use jsv::{Schema, Value};

use crate::error::{ScanError, ScanErrorKind};
use crate::source::{ContentFormat, ScanResult, content_format_for, read_file_bounded};

/// Parsed documents of one file, with their 1-based position in the file.
pub type Documents = Vec<(usize, Value)>;

/// Parse `content` according to `format`.
///
/// Returns `(documents, scan_errors)`. A multi-document YAML stream with one
/// broken document still yields its valid siblings; the broken ones become
/// scan errors.
#[must_use]
pub fn parse_documents(
    content: &str,
    path: &Path,
    format: ContentFormat,
) -> (Documents, Vec<ScanError>) {
    match format {
        ContentFormat::Json => match serde_json::from_str::<serde_json::Value>(content) {
            Ok(doc) => (vec![(1, Value::from(doc))], Vec::new()),
            Err(e) => (
                Vec::new(),
                vec![ScanError {
                    file: path.to_owned(),
                    kind: ScanErrorKind::JsonParseError,
                    message: format!("JSON parse error: {e}"),
                }],
            ),
        },
        ContentFormat::Yaml => parse_yaml_documents(content, path),
    }
}

fn split_yaml_documents(content: &str) -> Vec<(usize, String)> {
    let mut documents = Vec::new();
    let mut current_doc: Vec<&str> = Vec::new();
    let mut position = 1;

    for line in content.lines() {
        if line.trim() == "---" {
            let doc = current_doc.join("\n");
            if !doc.trim().is_empty() {
                documents.push((position, doc));
                position += 1;
            }
            current_doc.clear();
            continue;
        }
        current_doc.push(line);
    }

    let doc = current_doc.join("\n");
    if !doc.trim().is_empty() {
        documents.push((position, doc));
    }
    documents
}

fn parse_yaml_documents(content: &str, path: &Path) -> (Documents, Vec<ScanError>) {
    // Parse the whole stream first; only fall back to per-document parsing
    // when the stream as a whole is rejected.
    let stream_err = match serde_saphyr::from_multiple::<serde_json::Value>(content) {
        Ok(docs) => {
            let documents = docs
                .into_iter()
                .enumerate()
                .map(|(idx, doc)| (idx + 1, Value::from(doc)))
                .collect();
            return (documents, Vec::new());
        }
        Err(e) => e,
    };

    let mut documents = Vec::new();
    let mut scan_errors = Vec::new();
    for (position, segment) in split_yaml_documents(content) {
        match serde_saphyr::from_str::<serde_json::Value>(&segment) {
            Ok(doc) => documents.push((position, Value::from(doc))),
            Err(doc_err) => scan_errors.push(ScanError {
                file: path.to_owned(),
                kind: ScanErrorKind::YamlParseError,
                message: format!(
                    "YAML parse error in document {position} of multi-document stream: {doc_err}"
                ),
            }),
        }
    }

    if documents.is_empty() {
        // Nothing parsed: report the stream error once for the whole file
        scan_errors.clear();
        scan_errors.push(ScanError {
            file: path.to_owned(),
            kind: ScanErrorKind::YamlParseError,
            message: format!("YAML parse error: {stream_err}"),
        });
    }
    (documents, scan_errors)
}

/// Load a schema file (JSON or YAML, single document, object root).
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, holds more than one
/// document, or its root is not an object.
pub fn load_schema(path: &Path, max_file_size: u64) -> anyhow::Result<Schema> {
    let format = content_format_for(path).with_context(|| {
        format!(
            "Unsupported schema file extension: {} (expected .json, .yaml or .yml)",
            path.display()
        )
    })?;

    let content = match read_file_bounded(path, max_file_size) {
        ScanResult::Ok(content) => content,
        ScanResult::Err(e) => anyhow::bail!("{}", e.format_human_readable()),
    };

    let (mut documents, scan_errors) = parse_documents(&content, path, format);
    if let Some(err) = scan_errors.first() {
        anyhow::bail!("{}", err.format_human_readable());
    }
    if documents.len() != 1 {
        anyhow::bail!(
            "{}: expected exactly one schema document, found {}",
            path.display(),
            documents.len()
        );
    }

    let (_, root) = documents.remove(0);
    root.into_schema()
        .with_context(|| format!("{}: schema root must be an object", path.display()))
}
