//! Error types for schema validation.
//!
//! Two disjoint kinds: [`SchemaError`] means the schema itself is malformed
//! (a caller bug), [`ValidationError`] means the instance broke a constraint.

use std::fmt;

use thiserror::Error;

use crate::value::Value;

/// The schema is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SchemaError {
    /// A schema object contains a key that is neither evaluated nor absorbed.
    #[error("'{keyword}' is not a known schema property")]
    UnknownKeyword {
        /// The offending key.
        keyword: String,
    },

    /// A type name is missing from the type registry.
    #[error("'{name}' is not a known type")]
    UnknownType {
        /// The offending type name.
        name: String,
    },

    /// A keyword value has the wrong shape.
    #[error("Invalid value for '{keyword}': expected {expected}, got {found}")]
    InvalidKeywordValue {
        /// Keyword whose value is malformed.
        keyword: &'static str,
        /// Description of the accepted shape.
        expected: &'static str,
        /// The value that was found, rendered as JSON.
        found: String,
    },

    /// A `pattern` or `patternProperties` regex does not compile.
    #[error("Invalid regular expression '{pattern}' in '{keyword}': {cause}")]
    InvalidPattern {
        /// Keyword holding the pattern.
        keyword: &'static str,
        /// The raw pattern.
        pattern: String,
        /// Compiler message.
        cause: String,
    },

    /// `divisibleBy` declares a zero divisor.
    #[error("'divisibleBy' must not be zero")]
    ZeroDivisor,
}

impl SchemaError {
    pub(crate) fn invalid(keyword: &'static str, expected: &'static str, found: &Value) -> Self {
        Self::InvalidKeywordValue {
            keyword,
            expected,
            found: found.to_string(),
        }
    }
}

/// The constraint an instance failed, with the constraint's parameters.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum ValidationErrorKind {
    Type {
        instance: Value,
        types: Value,
    },
    Dependency {
        property: String,
        dependency: String,
    },
    Required {
        property: String,
    },
    AdditionalProperties {
        extras: Vec<String>,
    },
    AdditionalItems {
        allowed: usize,
        found: usize,
    },
    Minimum {
        instance: Value,
        minimum: Value,
        exclusive: bool,
    },
    Maximum {
        instance: Value,
        maximum: Value,
        exclusive: bool,
    },
    MinItems {
        instance: Value,
        limit: usize,
    },
    MaxItems {
        instance: Value,
        limit: usize,
    },
    MinLength {
        instance: Value,
        limit: usize,
    },
    MaxLength {
        instance: Value,
        limit: usize,
    },
    Pattern {
        instance: Value,
        pattern: String,
    },
    Enum {
        instance: Value,
        options: Value,
    },
    DivisibleBy {
        instance: Value,
        divisor: Value,
    },
    Disallowed {
        instance: Value,
        disallowed: Value,
    },
}

impl ValidationErrorKind {
    /// Name of the schema keyword that was violated.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Type { .. } => "type",
            Self::Dependency { .. } => "dependencies",
            Self::Required { .. } => "required",
            Self::AdditionalProperties { .. } => "additionalProperties",
            Self::AdditionalItems { .. } => "additionalItems",
            Self::Minimum { .. } => "minimum",
            Self::Maximum { .. } => "maximum",
            Self::MinItems { .. } => "minItems",
            Self::MaxItems { .. } => "maxItems",
            Self::MinLength { .. } => "minLength",
            Self::MaxLength { .. } => "maxLength",
            Self::Pattern { .. } => "pattern",
            Self::Enum { .. } => "enum",
            Self::DivisibleBy { .. } => "divisibleBy",
            Self::Disallowed { .. } => "disallow",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type { instance, types } => write!(f, "{instance} is not of type {types}"),
            Self::Dependency {
                property,
                dependency,
            } => write!(f, "'{dependency}' is a dependency of '{property}'"),
            Self::Required { property } => write!(f, "'{property}' is a required property"),
            Self::AdditionalProperties { extras } => {
                let quoted: Vec<String> = extras.iter().map(|e| format!("'{e}'")).collect();
                let verb = if extras.len() == 1 { "was" } else { "were" };
                write!(
                    f,
                    "Additional properties are not allowed ({} {verb} unexpected)",
                    quoted.join(", ")
                )
            }
            Self::AdditionalItems { allowed, found } => write!(
                f,
                "Additional items are not allowed ({found} items, at most {allowed})"
            ),
            Self::Minimum {
                instance,
                minimum,
                exclusive,
            } => {
                let cmp = if *exclusive {
                    "less than or equal to"
                } else {
                    "less than"
                };
                write!(f, "{instance} is {cmp} the minimum of {minimum}")
            }
            Self::Maximum {
                instance,
                maximum,
                exclusive,
            } => {
                let cmp = if *exclusive {
                    "greater than or equal to"
                } else {
                    "greater than"
                };
                write!(f, "{instance} is {cmp} the maximum of {maximum}")
            }
            Self::MinItems { instance, .. } | Self::MinLength { instance, .. } => {
                write!(f, "{instance} is too short")
            }
            Self::MaxItems { instance, .. } | Self::MaxLength { instance, .. } => {
                write!(f, "{instance} is too long")
            }
            Self::Pattern { instance, pattern } => {
                write!(f, "{instance} does not match '{pattern}'")
            }
            Self::Enum { instance, options } => write!(f, "{instance} is not one of {options}"),
            Self::DivisibleBy { instance, divisor } => {
                write!(f, "{instance} is not divisible by {divisor}")
            }
            Self::Disallowed {
                instance,
                disallowed,
            } => write!(f, "{instance} is disallowed for {disallowed}"),
        }
    }
}

/// The instance failed a constraint.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct ValidationError {
    /// JSON pointer to the failing part of the instance (`""` for the root).
    pub instance_path: String,
    /// The violated constraint.
    pub kind: ValidationErrorKind,
}

impl ValidationError {
    /// Name of the schema keyword that was violated.
    #[must_use]
    pub fn keyword(&self) -> &'static str {
        self.kind.keyword()
    }

    /// Format the error for human-readable output.
    ///
    /// Root errors: `{message}`; nested errors: `{message} (at {instance_path})`.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        if self.instance_path.is_empty() {
            self.kind.to_string()
        } else {
            format!("{} (at {})", self.kind, self.instance_path)
        }
    }
}

/// Either error kind, so `?` propagates both through the evaluators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    #[must_use]
    pub fn is_schema_error(&self) -> bool {
        matches!(self, Self::Schema(_))
    }

    #[must_use]
    pub fn as_validation_error(&self) -> Option<&ValidationError> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Schema(_) => None,
        }
    }
}
