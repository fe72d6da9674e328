//! Keyword evaluators.
//!
//! Each evaluated keyword maps to a plain function through [`Keyword`]. The
//! table is fixed at compile time; adding a keyword means adding a variant
//! and an evaluator.
//!
//! Evaluators receive the keyword's value, the instance, and the whole
//! schema object (for sibling lookups such as `exclusiveMinimum`). Apart from
//! `type`, `enum` and `disallow`, each one only constrains the instance
//! category it is about and passes every other category.

mod array;
mod object;
mod scalar;
mod types;

use std::fmt;

use crate::error::{Error, SchemaError};
use crate::validator::Walk;
use crate::value::{Schema, Value};

/// Keys read by another evaluator or purely descriptive. They are skipped by
/// the dispatch loop.
pub const ABSORBED_KEYWORDS: &[&str] = &[
    "default",
    "dependencies",
    "description",
    "exclusiveMaximum",
    "exclusiveMinimum",
    "links",
    "name",
    "required",
    "title",
];

pub type Evaluator = fn(&mut Walk<'_>, &Value, &Value, &Schema) -> Result<(), Error>;

/// An evaluated schema keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Type,
    Properties,
    PatternProperties,
    AdditionalProperties,
    Items,
    AdditionalItems,
    Minimum,
    Maximum,
    MinItems,
    MaxItems,
    Pattern,
    MinLength,
    MaxLength,
    Enum,
    DivisibleBy,
    Disallow,
}

impl Keyword {
    pub const ALL: [Self; 16] = [
        Self::Type,
        Self::Properties,
        Self::PatternProperties,
        Self::AdditionalProperties,
        Self::Items,
        Self::AdditionalItems,
        Self::Minimum,
        Self::Maximum,
        Self::MinItems,
        Self::MaxItems,
        Self::Pattern,
        Self::MinLength,
        Self::MaxLength,
        Self::Enum,
        Self::DivisibleBy,
        Self::Disallow,
    ];

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.name() == name)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Properties => "properties",
            Self::PatternProperties => "patternProperties",
            Self::AdditionalProperties => "additionalProperties",
            Self::Items => "items",
            Self::AdditionalItems => "additionalItems",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::MinItems => "minItems",
            Self::MaxItems => "maxItems",
            Self::Pattern => "pattern",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Enum => "enum",
            Self::DivisibleBy => "divisibleBy",
            Self::Disallow => "disallow",
        }
    }

    pub(crate) fn evaluator(self) -> Evaluator {
        match self {
            Self::Type => types::validate_type,
            Self::Properties => object::validate_properties,
            Self::PatternProperties => object::validate_pattern_properties,
            Self::AdditionalProperties => object::validate_additional_properties,
            Self::Items => array::validate_items,
            Self::AdditionalItems => array::validate_additional_items,
            Self::Minimum => scalar::validate_minimum,
            Self::Maximum => scalar::validate_maximum,
            Self::MinItems => array::validate_min_items,
            Self::MaxItems => array::validate_max_items,
            Self::Pattern => scalar::validate_pattern,
            Self::MinLength => scalar::validate_min_length,
            Self::MaxLength => scalar::validate_max_length,
            Self::Enum => scalar::validate_enum,
            Self::DivisibleBy => scalar::validate_divisible_by,
            Self::Disallow => types::validate_disallow,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Borrow a keyword value as a subschema.
fn expect_schema(keyword: Keyword, value: &Value) -> Result<&Schema, SchemaError> {
    value
        .as_schema()
        .ok_or_else(|| SchemaError::invalid(keyword.name(), "an object", value))
}

/// Read a non-negative integer bound (`minItems`, `maxLength`, ...).
fn expect_length(keyword: Keyword, value: &Value) -> Result<usize, SchemaError> {
    match value {
        Value::Int(n) => usize::try_from(*n)
            .map_err(|_| SchemaError::invalid(keyword.name(), "a non-negative integer", value)),
        _ => Err(SchemaError::invalid(
            keyword.name(),
            "a non-negative integer",
            value,
        )),
    }
}

/// Read an optional boolean flag from the schema object (`required`,
/// `exclusiveMinimum`, ...). Absent means `false`.
fn flag(schema: &Schema, name: &'static str) -> Result<bool, SchemaError> {
    match schema.get(name) {
        None => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(SchemaError::invalid(name, "a boolean", other)),
    }
}

/// A single specifier or a list of them (`type`, `disallow`).
fn one_or_many(value: &Value) -> Vec<&Value> {
    match value {
        Value::Sequence(items) => items.iter().collect(),
        single => vec![single],
    }
}
