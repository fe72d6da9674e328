//! Array keywords: `items`, `additionalItems`, `minItems`, `maxItems`.

use super::{Keyword, expect_length, expect_schema};
use crate::error::{Error, SchemaError, ValidationErrorKind};
use crate::validator::Walk;
use crate::value::{Schema, Value};

/// A single schema applies to every element; a list of schemas applies
/// positionally and leaves the surplus to `additionalItems`.
pub fn validate_items(
    walk: &mut Walk<'_>,
    items: &Value,
    instance: &Value,
    _schema: &Schema,
) -> Result<(), Error> {
    let Value::Sequence(elements) = instance else {
        return Ok(());
    };

    match items {
        Value::Mapping(subschema) => {
            for (index, element) in elements.iter().enumerate() {
                walk.descend_into(index.to_string(), element, subschema)?;
            }
        }
        Value::Sequence(subschemas) => {
            for (index, (element, subschema)) in elements.iter().zip(subschemas).enumerate() {
                let subschema = expect_schema(Keyword::Items, subschema)?;
                walk.descend_into(index.to_string(), element, subschema)?;
            }
        }
        other => {
            return Err(
                SchemaError::invalid(Keyword::Items.name(), "a schema or a list of schemas", other)
                    .into(),
            );
        }
    }
    Ok(())
}

/// Elements past index `schema.len()` are the extras.
///
/// The cut-off is the number of keys in the enclosing schema object, not the
/// length of its `items` tuple.
pub fn validate_additional_items(
    walk: &mut Walk<'_>,
    additional: &Value,
    instance: &Value,
    schema: &Schema,
) -> Result<(), Error> {
    let Value::Sequence(elements) = instance else {
        return Ok(());
    };
    let declared = schema.len();

    match additional {
        Value::Mapping(subschema) => {
            for (index, element) in elements.iter().enumerate().skip(declared) {
                walk.descend_into(index.to_string(), element, subschema)?;
            }
            Ok(())
        }
        Value::Bool(false) if elements.len() > declared => {
            walk.fail(ValidationErrorKind::AdditionalItems {
                allowed: declared,
                found: elements.len(),
            })
        }
        Value::Bool(_) => Ok(()),
        other => Err(SchemaError::invalid(
            Keyword::AdditionalItems.name(),
            "a boolean or a schema",
            other,
        )
        .into()),
    }
}

pub fn validate_min_items(
    walk: &mut Walk<'_>,
    limit: &Value,
    instance: &Value,
    _schema: &Schema,
) -> Result<(), Error> {
    let limit = expect_length(Keyword::MinItems, limit)?;
    if let Value::Sequence(elements) = instance
        && elements.len() < limit
    {
        return walk.fail(ValidationErrorKind::MinItems {
            instance: instance.clone(),
            limit,
        });
    }
    Ok(())
}

pub fn validate_max_items(
    walk: &mut Walk<'_>,
    limit: &Value,
    instance: &Value,
    _schema: &Schema,
) -> Result<(), Error> {
    let limit = expect_length(Keyword::MaxItems, limit)?;
    if let Value::Sequence(elements) = instance
        && elements.len() > limit
    {
        return walk.fail(ValidationErrorKind::MaxItems {
            instance: instance.clone(),
            limit,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use crate::error::{Error, ValidationErrorKind};
    use crate::validator::Validator;
    use crate::value::{Schema, Value};
    use serde_json::json;

    fn schema(value: serde_json::Value) -> Schema {
        Value::from(value).into_schema().unwrap()
    }

    fn check(instance: serde_json::Value, schema_json: serde_json::Value) -> Result<(), Error> {
        Validator::default().validate(&instance.into(), &schema(schema_json))
    }

    #[test]
    fn test_homogeneous_items() {
        let schema_json = json!({"items": {"type": "integer"}});
        assert!(check(json!([1, 2, 3]), schema_json.clone()).is_ok());
        assert!(check(json!([]), schema_json.clone()).is_ok());

        let err = check(json!([1, "two", 3]), schema_json).unwrap_err();
        assert_eq!(err.as_validation_error().unwrap().instance_path, "/1");
    }

    #[test]
    fn test_tuple_items_check_shorter_of_both() {
        let schema_json = json!({"items": [{"type": "integer"}, {"type": "string"}]});
        assert!(check(json!([1, "a"]), schema_json.clone()).is_ok());
        assert!(check(json!([1]), schema_json.clone()).is_ok());
        assert!(check(json!([1, "a", null, {}]), schema_json.clone()).is_ok());
        assert!(check(json!(["a", 1]), schema_json).is_err());
    }

    #[test]
    fn test_items_ignore_non_arrays() {
        assert!(check(json!({"0": "x"}), json!({"items": {"type": "integer"}})).is_ok());
    }

    #[test]
    fn test_malformed_items_is_schema_error() {
        assert!(check(json!([1]), json!({"items": 4})).unwrap_err().is_schema_error());
        assert!(check(json!([1]), json!({"items": [4]})).unwrap_err().is_schema_error());
    }

    #[test]
    fn test_additional_items_cutoff_is_schema_key_count() {
        // Two keys in the schema object ("items" and "additionalItems"), so
        // elements from index 2 on are extras even though the tuple has one entry.
        let schema_json = json!({"items": [{}], "additionalItems": false});
        assert!(check(json!([1, 2]), schema_json.clone()).is_ok());

        let err = check(json!([1, 2, 3]), schema_json).unwrap_err();
        assert_eq!(
            err.as_validation_error().unwrap().kind,
            ValidationErrorKind::AdditionalItems {
                allowed: 2,
                found: 3
            }
        );
    }

    #[test]
    fn test_additional_items_schema() {
        let schema_json = json!({"items": [{}], "additionalItems": {"type": "string"}});
        assert!(check(json!([1, 2, "x"]), schema_json.clone()).is_ok());

        let err = check(json!([1, 2, 3]), schema_json).unwrap_err();
        assert_eq!(err.as_validation_error().unwrap().instance_path, "/2");
    }

    #[test]
    fn test_additional_items_true() {
        assert!(check(json!([1, 2, 3, 4]), json!({"additionalItems": true})).is_ok());
    }

    #[test]
    fn test_min_and_max_items() {
        assert!(check(json!([1]), json!({"minItems": 1})).is_ok());
        assert!(check(json!([]), json!({"minItems": 1})).is_err());
        assert!(check(json!([1, 2]), json!({"maxItems": 2})).is_ok());

        let err = check(json!([1, 2, 3]), json!({"maxItems": 2})).unwrap_err();
        assert_eq!(err.to_string(), "[1,2,3] is too long");
    }

    #[test]
    fn test_item_bounds_ignore_strings() {
        assert!(check(json!("abc"), json!({"maxItems": 1})).is_ok());
    }

    #[test]
    fn test_negative_bound_is_schema_error() {
        assert!(check(json!([]), json!({"minItems": -1})).unwrap_err().is_schema_error());
    }
}
