//! Dispatch core: walks a schema object and hands each keyword to its
//! evaluator.

use tracing::{debug, trace};

use crate::config::{FailurePolicy, ValidatorConfig};
use crate::error::{Error, SchemaError, ValidationError, ValidationErrorKind};
use crate::keywords::{ABSORBED_KEYWORDS, Keyword};
use crate::types::TypeRegistry;
use crate::value::{Schema, Value};

/// A schema validator.
///
/// Holds only immutable configuration, so one validator can be shared across
/// threads. Recursion depth follows the nesting depth of the schema and
/// instance; bounding it is up to the caller.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: TypeRegistry,
    failure_policy: FailurePolicy,
}

impl Validator {
    #[must_use]
    pub fn new(config: &ValidatorConfig) -> Self {
        Self {
            registry: TypeRegistry::new(&config.string_types, &config.number_types),
            failure_policy: config.failure_policy,
        }
    }

    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Validate `instance` under `schema`, stopping at the first violation.
    ///
    /// Keywords are evaluated in lexicographic order.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] for the first violated constraint and
    /// [`Error::Schema`] if the schema is malformed.
    pub fn validate(&self, instance: &Value, schema: &Schema) -> Result<(), Error> {
        Walk::new(self, FailurePolicy::StopOnFirst).descend(instance, schema)
    }

    /// Check whether `instance` is valid under `schema`.
    ///
    /// # Errors
    /// Only a malformed schema is an error; a violation is `Ok(false)`.
    pub fn is_valid(&self, instance: &Value, schema: &Schema) -> Result<bool, SchemaError> {
        match self.validate(instance, schema) {
            Ok(()) => Ok(true),
            Err(Error::Validation(_)) => Ok(false),
            Err(Error::Schema(err)) => Err(err),
        }
    }

    /// Collect violations according to the configured [`FailurePolicy`]:
    /// at most one for `StopOnFirst`, all of them for `CollectAll`.
    ///
    /// # Errors
    /// Returns [`SchemaError`] if the schema is malformed.
    pub fn errors(
        &self,
        instance: &Value,
        schema: &Schema,
    ) -> Result<Vec<ValidationError>, SchemaError> {
        let mut walk = Walk::new(self, self.failure_policy);
        match walk.descend(instance, schema) {
            Ok(()) => Ok(walk.errors),
            Err(Error::Validation(err)) => Ok(vec![err]),
            Err(Error::Schema(err)) => Err(err),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(&ValidatorConfig::default())
    }
}

/// Traversal state of one validation call.
pub struct Walk<'a> {
    validator: &'a Validator,
    policy: FailurePolicy,
    path: Vec<String>,
    errors: Vec<ValidationError>,
}

impl<'a> Walk<'a> {
    fn new(validator: &'a Validator, policy: FailurePolicy) -> Self {
        Self {
            validator,
            policy,
            path: Vec::new(),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.validator.registry
    }

    /// Apply every keyword of `schema` to `instance` at the current path.
    pub fn descend(&mut self, instance: &Value, schema: &Schema) -> Result<(), Error> {
        for (name, value) in schema {
            if ABSORBED_KEYWORDS.contains(&name.as_str()) {
                continue;
            }

            let keyword = Keyword::from_name(name).ok_or_else(|| SchemaError::UnknownKeyword {
                keyword: name.clone(),
            })?;

            trace!(keyword = name.as_str(), path = %self.pointer(), "evaluating keyword");
            (keyword.evaluator())(self, value, instance, schema)?;
        }
        Ok(())
    }

    /// Like [`Walk::descend`], one level down (`segment` is a property name
    /// or an element index).
    pub fn descend_into(
        &mut self,
        segment: String,
        instance: &Value,
        schema: &Schema,
    ) -> Result<(), Error> {
        self.path.push(segment);
        let result = self.descend(instance, schema);
        self.path.pop();
        result
    }

    /// Record a violation. Returns `Err` under `StopOnFirst`.
    pub fn fail(&mut self, kind: ValidationErrorKind) -> Result<(), Error> {
        let error = ValidationError {
            instance_path: self.pointer(),
            kind,
        };
        debug!(
            keyword = error.keyword(),
            path = error.instance_path.as_str(),
            "{error}"
        );

        match self.policy {
            FailurePolicy::StopOnFirst => Err(error.into()),
            FailurePolicy::CollectAll => {
                self.errors.push(error);
                Ok(())
            }
        }
    }

    /// Validity probe for OR-semantics: violations are swallowed, schema
    /// errors are not. Always runs stop-on-first.
    pub fn probe(&self, instance: &Value, schema: &Schema) -> Result<bool, SchemaError> {
        self.validator.is_valid(instance, schema)
    }

    fn pointer(&self) -> String {
        self.path
            .iter()
            .map(|segment| format!("/{}", segment.replace('~', "~0").replace('/', "~1")))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::Category;
    use serde_json::json;

    fn schema(value: serde_json::Value) -> Schema {
        Value::from(value).into_schema().unwrap()
    }

    fn collect_all() -> Validator {
        let mut config = ValidatorConfig::default();
        config.failure_policy = FailurePolicy::CollectAll;
        Validator::new(&config)
    }

    #[test]
    fn test_empty_schema_accepts_anything() {
        let validator = Validator::default();
        for instance in [json!(null), json!(1), json!("x"), json!([1]), json!({"a": 1})] {
            assert!(validator.validate(&instance.into(), &Schema::new()).is_ok());
        }
    }

    #[test]
    fn test_absorbed_keywords_are_skipped() {
        let validator = Validator::default();
        let schema = schema(json!({
            "title": "t",
            "description": "d",
            "default": 3,
            "name": "n",
            "links": [],
            "required": true,
            "dependencies": "other",
            "exclusiveMinimum": true,
            "exclusiveMaximum": false
        }));
        assert!(validator.validate(&Value::Int(1), &schema).is_ok());
    }

    #[test]
    fn test_unknown_keyword_is_schema_error() {
        let validator = Validator::default();
        let err = validator
            .validate(&Value::Int(1), &schema(json!({"bogusKeyword": 1})))
            .unwrap_err();
        assert_eq!(
            err,
            Error::Schema(SchemaError::UnknownKeyword {
                keyword: "bogusKeyword".to_owned()
            })
        );
    }

    #[test]
    fn test_is_valid_lets_schema_error_through() {
        let validator = Validator::default();
        assert!(
            validator
                .is_valid(&Value::Int(1), &schema(json!({"bogusKeyword": 1})))
                .is_err()
        );
        assert!(
            !validator
                .is_valid(&Value::Int(1), &schema(json!({"type": "string"})))
                .unwrap()
        );
    }

    #[test]
    fn test_stops_at_first_failure_in_key_order() {
        let validator = Validator::default();
        // "maximum" sorts before "type"
        let err = validator
            .validate(
                &Value::Int(10),
                &schema(json!({"type": "string", "maximum": 5})),
            )
            .unwrap_err();
        assert_eq!(err.as_validation_error().unwrap().keyword(), "maximum");
    }

    #[test]
    fn test_errors_honours_stop_on_first() {
        let validator = Validator::default();
        let errors = validator
            .errors(
                &Value::Int(10),
                &schema(json!({"type": "string", "maximum": 5})),
            )
            .unwrap();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_errors_collects_all() {
        let validator = collect_all();
        let instance = Value::from(json!({"a": "x", "b": [1, 2, 3]}));
        let schema = schema(json!({
            "properties": {
                "a": {"type": "integer"},
                "b": {"items": {"maximum": 1}},
                "c": {"required": true}
            }
        }));

        let errors = validator.errors(&instance, &schema).unwrap();
        let paths: Vec<&str> = errors.iter().map(|e| e.instance_path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/b/1", "/b/2", ""]);
        assert_eq!(errors[3].keyword(), "required");
    }

    #[test]
    fn test_validate_ignores_collect_all_policy() {
        let validator = collect_all();
        let result = validator.validate(&Value::Int(10), &schema(json!({"maximum": 5})));
        assert!(result.is_err());
    }

    #[test]
    fn test_errors_surfaces_schema_error() {
        let validator = collect_all();
        let err = validator
            .errors(&Value::Int(1), &schema(json!({"type": "decimal"})))
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownType {
                name: "decimal".to_owned()
            }
        );
    }

    #[test]
    fn test_pointer_escapes_segments() {
        let validator = Validator::default();
        let instance = Value::from(json!({"a/b": {"c~d": "x"}}));
        let schema = schema(json!({
            "properties": {"a/b": {"properties": {"c~d": {"type": "integer"}}}}
        }));
        let err = validator.validate(&instance, &schema).unwrap_err();
        assert_eq!(err.as_validation_error().unwrap().instance_path, "/a~1b/c~0d");
    }

    #[test]
    fn test_registry_reflects_config() {
        let mut config = ValidatorConfig::default();
        config.number_types = vec![Category::Float];
        let validator = Validator::new(&config);
        assert_eq!(validator.registry().lookup("number"), Some(&[Category::Float][..]));
    }

    #[test]
    fn test_validator_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Validator>();
    }
}
