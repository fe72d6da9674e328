//! Range, length, pattern, enum and divisibility keywords.

use std::cmp::Ordering;

use regex::Regex;

use super::{Keyword, expect_length, flag};
use crate::error::{Error, SchemaError, ValidationErrorKind};
use crate::validator::Walk;
use crate::value::{Schema, Value, compare_int_float};

/// Remainders this close to zero (or to the divisor) count as divisible
/// when the divisor is a float.
const FLOAT_REMAINDER_TOLERANCE: f64 = 1e-10;

/// Compile a schema regex as written. Use [`matches_at_start`] to test it.
///
/// # Errors
/// Returns [`SchemaError::InvalidPattern`] if the pattern does not compile.
pub fn compile_pattern(keyword: Keyword, pattern: &str) -> Result<Regex, SchemaError> {
    Regex::new(pattern).map_err(|err| SchemaError::InvalidPattern {
        keyword: keyword.name(),
        pattern: pattern.to_owned(),
        cause: err.to_string(),
    })
}

/// Whether `regex` matches at the start of `text`, so `"f.o"` matches
/// `"fooooo"` but not `"afoo"`.
///
/// The leftmost match starts at 0 whenever any match does.
#[must_use]
pub fn matches_at_start(regex: &Regex, text: &str) -> bool {
    regex.find(text).is_some_and(|found| found.start() == 0)
}

#[derive(Debug, Clone, Copy)]
enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// Booleans are not numbers.
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(Self::Int(*n)),
            Value::Float(x) => Some(Self::Float(*x)),
            _ => None,
        }
    }

    fn expect(keyword: Keyword, value: &Value) -> Result<Self, SchemaError> {
        Self::from_value(value).ok_or_else(|| SchemaError::invalid(keyword.name(), "a number", value))
    }

    #[allow(clippy::cast_precision_loss)]
    fn as_f64(self) -> f64 {
        match self {
            Self::Int(n) => n as f64,
            Self::Float(x) => x,
        }
    }

    fn compare(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            (Self::Int(a), Self::Float(b)) => compare_int_float(a, b),
            (Self::Float(a), Self::Int(b)) => compare_int_float(b, a).map(Ordering::reverse),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(&b),
        }
    }

    #[allow(clippy::float_cmp)]
    fn is_zero(self) -> bool {
        match self {
            Self::Int(n) => n == 0,
            Self::Float(x) => x == 0.0,
        }
    }
}

/// Fails when the instance is below the bound, or equal to it when the
/// sibling `exclusiveMinimum` is `true`.
pub fn validate_minimum(
    walk: &mut Walk<'_>,
    minimum: &Value,
    instance: &Value,
    schema: &Schema,
) -> Result<(), Error> {
    let bound = Number::expect(Keyword::Minimum, minimum)?;
    let exclusive = flag(schema, "exclusiveMinimum")?;
    let Some(number) = Number::from_value(instance) else {
        return Ok(());
    };

    let failed = match number.compare(bound) {
        Some(Ordering::Less) => true,
        Some(Ordering::Equal) => exclusive,
        _ => false,
    };
    if failed {
        return walk.fail(ValidationErrorKind::Minimum {
            instance: instance.clone(),
            minimum: minimum.clone(),
            exclusive,
        });
    }
    Ok(())
}

/// Mirror of [`validate_minimum`], reading `exclusiveMaximum`.
pub fn validate_maximum(
    walk: &mut Walk<'_>,
    maximum: &Value,
    instance: &Value,
    schema: &Schema,
) -> Result<(), Error> {
    let bound = Number::expect(Keyword::Maximum, maximum)?;
    let exclusive = flag(schema, "exclusiveMaximum")?;
    let Some(number) = Number::from_value(instance) else {
        return Ok(());
    };

    let failed = match number.compare(bound) {
        Some(Ordering::Greater) => true,
        Some(Ordering::Equal) => exclusive,
        _ => false,
    };
    if failed {
        return walk.fail(ValidationErrorKind::Maximum {
            instance: instance.clone(),
            maximum: maximum.clone(),
            exclusive,
        });
    }
    Ok(())
}

pub fn validate_pattern(
    walk: &mut Walk<'_>,
    pattern: &Value,
    instance: &Value,
    _schema: &Schema,
) -> Result<(), Error> {
    let Value::Text(pattern) = pattern else {
        return Err(SchemaError::invalid(Keyword::Pattern.name(), "a string", pattern).into());
    };
    let regex = compile_pattern(Keyword::Pattern, pattern)?;

    if let Value::Text(text) = instance
        && !matches_at_start(&regex, text)
    {
        return walk.fail(ValidationErrorKind::Pattern {
            instance: instance.clone(),
            pattern: pattern.clone(),
        });
    }
    Ok(())
}

/// Length is counted in characters, not bytes.
pub fn validate_min_length(
    walk: &mut Walk<'_>,
    limit: &Value,
    instance: &Value,
    _schema: &Schema,
) -> Result<(), Error> {
    let limit = expect_length(Keyword::MinLength, limit)?;
    if let Value::Text(text) = instance
        && text.chars().count() < limit
    {
        return walk.fail(ValidationErrorKind::MinLength {
            instance: instance.clone(),
            limit,
        });
    }
    Ok(())
}

pub fn validate_max_length(
    walk: &mut Walk<'_>,
    limit: &Value,
    instance: &Value,
    _schema: &Schema,
) -> Result<(), Error> {
    let limit = expect_length(Keyword::MaxLength, limit)?;
    if let Value::Text(text) = instance
        && text.chars().count() > limit
    {
        return walk.fail(ValidationErrorKind::MaxLength {
            instance: instance.clone(),
            limit,
        });
    }
    Ok(())
}

/// Membership by value equality. `1` and `1.0` are equal, `true` and `1`
/// are not.
pub fn validate_enum(
    walk: &mut Walk<'_>,
    options: &Value,
    instance: &Value,
    _schema: &Schema,
) -> Result<(), Error> {
    let Value::Sequence(allowed) = options else {
        return Err(SchemaError::invalid(Keyword::Enum.name(), "an array", options).into());
    };
    if allowed.contains(instance) {
        return Ok(());
    }
    walk.fail(ValidationErrorKind::Enum {
        instance: instance.clone(),
        options: options.clone(),
    })
}

/// Integer divisors need an exact zero remainder. Float divisors tolerate
/// rounding noise up to [`FLOAT_REMAINDER_TOLERANCE`] on either side.
pub fn validate_divisible_by(
    walk: &mut Walk<'_>,
    divisor: &Value,
    instance: &Value,
    _schema: &Schema,
) -> Result<(), Error> {
    let by = Number::expect(Keyword::DivisibleBy, divisor)?;
    if by.is_zero() {
        return Err(SchemaError::ZeroDivisor.into());
    }
    let Some(dividend) = Number::from_value(instance) else {
        return Ok(());
    };

    if is_divisible(dividend, by) {
        return Ok(());
    }
    walk.fail(ValidationErrorKind::DivisibleBy {
        instance: instance.clone(),
        divisor: divisor.clone(),
    })
}

#[allow(clippy::float_cmp)]
fn is_divisible(dividend: Number, divisor: Number) -> bool {
    match (dividend, divisor) {
        // i64::MIN % -1 overflows; it is divisible.
        (Number::Int(n), Number::Int(d)) => n.checked_rem(d).is_none_or(|r| r == 0),
        (Number::Float(x), Number::Int(_)) => x.rem_euclid(divisor.as_f64()) == 0.0,
        (_, Number::Float(d)) => {
            let d = d.abs();
            let remainder = dividend.as_f64().rem_euclid(d);
            remainder <= FLOAT_REMAINDER_TOLERANCE || d - remainder <= FLOAT_REMAINDER_TOLERANCE
        }
    }
}
