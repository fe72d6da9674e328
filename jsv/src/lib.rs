//! # jsv
//!
//! Schema-driven validator for JSON-like values.
//!
//! A schema is a tree of keyword constraints (`type`, `properties`, `items`,
//! `minimum`, `pattern`, `enum`, `divisibleBy`, `disallow`, ...). Validation
//! walks the instance alongside the schema and stops at the first violated
//! constraint. A malformed schema is reported as a [`SchemaError`], distinct
//! from a [`ValidationError`] about the data.
//!
//! Parsing text into [`Value`]s is left to the caller; `From<serde_json::Value>`
//! covers the common case.
//!
//! ## Quick Start
//!
//! ```rust
//! use jsv::{Validator, Value};
//! use serde_json::json;
//!
//! let schema = Value::from(json!({
//!     "properties": {
//!         "name": {"type": "string", "required": true},
//!         "age": {"type": "integer", "minimum": 0}
//!     },
//!     "additionalProperties": false
//! }))
//! .into_schema()
//! .unwrap();
//!
//! let validator = Validator::default();
//! assert!(validator.is_valid(&json!({"name": "Ada", "age": 36}).into(), &schema).unwrap());
//!
//! let err = validator
//!     .validate(&json!({"name": "Ada", "age": -1}).into(), &schema)
//!     .unwrap_err();
//! assert_eq!(err.to_string(), "-1 is less than the minimum of 0");
//! ```

mod config;
mod error;
mod keywords;
mod types;
mod validator;
mod value;

pub use config::{FailurePolicy, ValidatorConfig};
pub use error::{Error, SchemaError, ValidationError, ValidationErrorKind};
pub use keywords::{ABSORBED_KEYWORDS, Keyword};
pub use types::{ANY, BOOLEAN, Category, TypeRegistry};
pub use validator::Validator;
pub use value::{Map, Schema, Value};

/// Validate `instance` under `schema` with a default [`Validator`].
///
/// # Errors
///
/// Returns [`Error::Validation`] for the first violated constraint and
/// [`Error::Schema`] if the schema is malformed.
pub fn validate(instance: &Value, schema: &Schema) -> Result<(), Error> {
    Validator::default().validate(instance, schema)
}

/// Like [`validate`], with an explicit configuration.
///
/// # Errors
///
/// Same as [`validate`].
pub fn validate_with(
    instance: &Value,
    schema: &Schema,
    config: &ValidatorConfig,
) -> Result<(), Error> {
    Validator::new(config).validate(instance, schema)
}
