//! Type registry: schema type names and the value categories they accept.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::SchemaError;
use crate::value::Value;

/// Type name that matches every registered category.
pub const ANY: &str = "any";

/// The only type name a boolean instance can match on its own.
pub const BOOLEAN: &str = "boolean";

/// Runtime category of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Null,
    Boolean,
    Integer,
    Float,
    Text,
    Sequence,
    Mapping,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Text => "text",
            Self::Sequence => "sequence",
            Self::Mapping => "mapping",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from type names (`"string"`, `"number"`, ...) to the categories
/// they accept. Built once per validator and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    entries: BTreeMap<&'static str, Vec<Category>>,
}

impl TypeRegistry {
    /// Build a registry where `"string"` and `"number"` accept the given
    /// categories and every other name has its fixed meaning. `"any"` is the
    /// union of all entries.
    #[must_use]
    pub fn new(string_types: &[Category], number_types: &[Category]) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("array", vec![Category::Sequence]);
        entries.insert(BOOLEAN, vec![Category::Boolean]);
        entries.insert("integer", vec![Category::Integer]);
        entries.insert("null", vec![Category::Null]);
        entries.insert("object", vec![Category::Mapping]);
        entries.insert("string", string_types.to_vec());
        entries.insert("number", number_types.to_vec());

        let mut any: Vec<Category> = entries.values().flatten().copied().collect();
        any.sort_unstable();
        any.dedup();
        entries.insert(ANY, any);

        Self { entries }
    }

    /// Categories accepted by `name`, or `None` for an unknown type name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&[Category]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Registered type names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// Whether `instance` matches the type name `name`.
    ///
    /// A boolean instance only matches `"boolean"`, or `"any"` when
    /// `any_only` says the enclosing type list is exactly `["any"]`. This
    /// holds even when an embedder widened another entry to include
    /// [`Category::Boolean`].
    ///
    /// # Errors
    /// Returns [`SchemaError::UnknownType`] if `name` is not registered.
    pub fn matches(&self, name: &str, instance: &Value, any_only: bool) -> Result<bool, SchemaError> {
        let categories = self.lookup(name).ok_or_else(|| SchemaError::UnknownType {
            name: name.to_owned(),
        })?;

        let category = instance.category();
        if !categories.contains(&category) {
            return Ok(false);
        }

        Ok(category != Category::Boolean || name == BOOLEAN || any_only)
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new(&[Category::Text], &[Category::Integer, Category::Float])
    }
}
