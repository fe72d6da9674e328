//! Object-shape keywords: `properties`, `patternProperties`,
//! `additionalProperties`.

use super::scalar::{compile_pattern, matches_at_start};
use super::{Keyword, expect_schema, flag};
use crate::error::{Error, SchemaError, ValidationErrorKind};
use crate::validator::Walk;
use crate::value::{Map, Schema, Value};

pub fn validate_properties(
    walk: &mut Walk<'_>,
    properties: &Value,
    instance: &Value,
    _schema: &Schema,
) -> Result<(), Error> {
    let properties = expect_schema(Keyword::Properties, properties)?;
    let Value::Mapping(object) = instance else {
        return Ok(());
    };

    for (property, subschema) in properties {
        let subschema = expect_schema(Keyword::Properties, subschema)?;
        if let Some(value) = object.get(property) {
            check_dependencies(walk, property, subschema, instance, object)?;
            walk.descend_into(property.clone(), value, subschema)?;
        } else if flag(subschema, "required")? {
            walk.fail(ValidationErrorKind::Required {
                property: property.clone(),
            })?;
        }
    }
    Ok(())
}

/// `dependencies` of a present property: one property name, a list of
/// names, or a schema the whole instance must also satisfy.
fn check_dependencies(
    walk: &mut Walk<'_>,
    property: &str,
    subschema: &Schema,
    instance: &Value,
    object: &Map,
) -> Result<(), Error> {
    let names: Vec<&Value> = match subschema.get("dependencies") {
        None => return Ok(()),
        Some(Value::Mapping(dependent_schema)) => return walk.descend(instance, dependent_schema),
        Some(Value::Sequence(names)) => names.iter().collect(),
        Some(single) => vec![single],
    };

    for name in names {
        let Value::Text(dependency) = name else {
            return Err(SchemaError::invalid(
                "dependencies",
                "a property name, a list of names or a schema",
                name,
            )
            .into());
        };
        if !object.contains_key(dependency) {
            walk.fail(ValidationErrorKind::Dependency {
                property: property.to_owned(),
                dependency: dependency.clone(),
            })?;
        }
    }
    Ok(())
}

/// Validates every instance key the pattern matches (match anchored at the
/// start of the key only).
pub fn validate_pattern_properties(
    walk: &mut Walk<'_>,
    patterns: &Value,
    instance: &Value,
    _schema: &Schema,
) -> Result<(), Error> {
    let patterns = expect_schema(Keyword::PatternProperties, patterns)?;
    let Value::Mapping(object) = instance else {
        return Ok(());
    };

    for (pattern, subschema) in patterns {
        let regex = compile_pattern(Keyword::PatternProperties, pattern)?;
        let subschema = expect_schema(Keyword::PatternProperties, subschema)?;
        for (key, value) in object {
            if matches_at_start(&regex, key) {
                walk.descend_into(key.clone(), value, subschema)?;
            }
        }
    }
    Ok(())
}

/// Extras are the instance keys not declared in the sibling `properties` of
/// the same schema object. `patternProperties` does not exempt a key.
pub fn validate_additional_properties(
    walk: &mut Walk<'_>,
    additional: &Value,
    instance: &Value,
    schema: &Schema,
) -> Result<(), Error> {
    let Value::Mapping(object) = instance else {
        return Ok(());
    };

    let declared = schema
        .get(Keyword::Properties.name())
        .map(|properties| expect_schema(Keyword::Properties, properties))
        .transpose()?;
    let extras = object
        .iter()
        .filter(|(key, _)| !declared.is_some_and(|d| d.contains_key(*key)));

    match additional {
        Value::Mapping(subschema) => {
            for (key, value) in extras {
                walk.descend_into(key.clone(), value, subschema)?;
            }
            Ok(())
        }
        Value::Bool(false) => {
            let extras: Vec<String> = extras.map(|(key, _)| key.clone()).collect();
            if extras.is_empty() {
                return Ok(());
            }
            walk.fail(ValidationErrorKind::AdditionalProperties { extras })
        }
        Value::Bool(true) => Ok(()),
        other => Err(SchemaError::invalid(
            Keyword::AdditionalProperties.name(),
            "a boolean or a schema",
            other,
        )
        .into()),
    }
}
