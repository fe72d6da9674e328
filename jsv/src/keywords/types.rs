//! `type` and its negation `disallow`.

use super::{Keyword, one_or_many};
use crate::error::{Error, SchemaError, ValidationErrorKind};
use crate::types::{ANY, Category};
use crate::validator::Walk;
use crate::value::{Schema, Value};

/// Succeeds if the instance matches any alternative (type name or subschema).
pub fn validate_type(
    walk: &mut Walk<'_>,
    types: &Value,
    instance: &Value,
    _schema: &Schema,
) -> Result<(), Error> {
    let alternatives = one_or_many(types);
    if matches_any(walk, Keyword::Type, &alternatives, instance)? {
        return Ok(());
    }

    walk.fail(ValidationErrorKind::Type {
        instance: instance.clone(),
        types: Value::Sequence(alternatives.into_iter().cloned().collect()),
    })
}

/// Fails if the instance matches any of the disallowed specifiers, each
/// probed on its own as a one-element type list.
pub fn validate_disallow(
    walk: &mut Walk<'_>,
    disallow: &Value,
    instance: &Value,
    _schema: &Schema,
) -> Result<(), Error> {
    let entries = one_or_many(disallow);
    for entry in &entries {
        if matches_any(walk, Keyword::Disallow, &[*entry], instance)? {
            return walk.fail(ValidationErrorKind::Disallowed {
                instance: instance.clone(),
                disallowed: Value::Sequence(entries.iter().map(|v| (*v).clone()).collect()),
            });
        }
    }
    Ok(())
}

/// OR over the alternatives, in declaration order.
///
/// A subschema alternative only applies to mapping instances and is probed
/// with violations swallowed. A boolean instance matches `"any"` only when
/// the list is exactly `["any"]`.
fn matches_any(
    walk: &Walk<'_>,
    keyword: Keyword,
    alternatives: &[&Value],
    instance: &Value,
) -> Result<bool, SchemaError> {
    let any_only = matches!(alternatives, [Value::Text(name)] if name == ANY);

    for alternative in alternatives {
        let matched = match alternative {
            Value::Mapping(subschema) => {
                instance.category() == Category::Mapping && walk.probe(instance, subschema)?
            }
            Value::Text(name) => walk.registry().matches(name, instance, any_only)?,
            other => {
                return Err(SchemaError::invalid(
                    keyword.name(),
                    "a type name or a schema",
                    other,
                ));
            }
        };

        if matched {
            return Ok(true);
        }
    }
    Ok(false)
}
