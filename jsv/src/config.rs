//! Validator configuration.

use crate::types::Category;

/// What to do when a constraint fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[non_exhaustive]
pub enum FailurePolicy {
    /// Stop at the first violation (default).
    #[default]
    StopOnFirst,
    /// Keep going and report every violation.
    ///
    /// Only affects [`Validator::errors`](crate::Validator::errors);
    /// [`Validator::validate`](crate::Validator::validate) always stops at the
    /// first violation.
    CollectAll,
}

/// Configuration fixed at validator construction.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ValidatorConfig {
    /// Categories accepted by the `"string"` type name (default: text).
    pub string_types: Vec<Category>,
    /// Categories accepted by the `"number"` type name (default: integer and float).
    ///
    /// Narrow this to `[Category::Integer]` or `[Category::Float]` when the
    /// embedding data model distinguishes the two.
    pub number_types: Vec<Category>,
    /// Failure policy for [`Validator::errors`](crate::Validator::errors).
    pub failure_policy: FailurePolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            string_types: vec![Category::Text],
            number_types: vec![Category::Integer, Category::Float],
            failure_policy: FailurePolicy::StopOnFirst,
        }
    }
}
