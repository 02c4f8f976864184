//! Coercion of incoming wire values into criterion values.
//!
//! Saved filters come from URLs, older clients and hand edits, so values are
//! accepted in any reasonable spelling: stringified numbers, `"true"` for
//! flags, `m:ss` for durations, a bare id for a one-element id list.

use super::WireValue;
use crate::catalog::FieldDescriptor;
use crate::duration;
use crate::error::CriteriaError;
use crate::modifier::CriterionModifier;
use crate::resolution::ResolutionBucket;
use crate::shape::ValueShape;
use crate::value::{CriterionValue, LabeledId, NumberValue};

/// Converts a wire value into the value `field` stores under `modifier`.
///
/// Null-check modifiers ignore the wire value and yield the empty value.
///
/// # Errors
///
/// Returns [`CriteriaError::InvalidValue`] when the wire value is missing or
/// cannot be read as the field's shape.
pub fn coerce(
    field: &'static FieldDescriptor,
    modifier: CriterionModifier,
    value: Option<&WireValue>,
) -> Result<CriterionValue, CriteriaError> {
    if modifier.is_nullary() {
        return Ok(CriterionValue::empty(field.shape));
    }
    let Some(value) = value else {
        return Err(invalid(field, "nothing".to_string()));
    };

    let shape = field.shape;
    let coerced = match shape {
        _ if shape.is_text() => text(value).map(CriterionValue::Text),
        _ if shape.is_range() => range(shape, modifier, value).map(CriterionValue::Number),
        ValueShape::Resolution => match value {
            WireValue::Text(name) => ResolutionBucket::from_name(name)
                .map(|bucket| CriterionValue::Resolution(Some(bucket))),
            _ => None,
        },
        ValueShape::Enumeration | ValueShape::IsMissing => match value {
            WireValue::Text(choice) if field.options.contains(&choice.as_str()) => {
                Some(CriterionValue::Choice(Some(choice.clone())))
            }
            _ => None,
        },
        ValueShape::Boolean => flag(value).map(|b| CriterionValue::Flag(Some(b))),
        ValueShape::LabeledIds => ids(value).map(|ids| {
            CriterionValue::LabeledIds(ids.into_iter().map(LabeledId::bare).collect())
        }),
        ValueShape::String
        | ValueShape::MandatoryString
        | ValueShape::Number
        | ValueShape::MandatoryNumber
        | ValueShape::Duration => None,
    };

    coerced.ok_or_else(|| invalid(field, value.describe()))
}

fn invalid(field: &'static FieldDescriptor, found: String) -> CriteriaError {
    CriteriaError::InvalidValue {
        field: field.id,
        expected: field.shape.name(),
        found,
    }
}

fn text(value: &WireValue) -> Option<String> {
    match value {
        WireValue::Text(s) => Some(s.clone()),
        WireValue::Integer(n) => Some(n.to_string()),
        _ => None,
    }
}

/// 2^63. `i64` covers `[-2^63, 2^63)`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Integral decimals inside `i64`; anything else would saturate on the cast.
#[allow(clippy::cast_possible_truncation)]
fn integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&n) {
        Some(n as i64)
    } else {
        None
    }
}

fn scalar(shape: ValueShape, value: &WireValue) -> Option<i64> {
    match value {
        WireValue::Integer(n) => Some(*n),
        WireValue::Decimal(n) => integral(*n),
        WireValue::Text(s) => {
            let s = s.trim();
            s.parse().ok().or_else(|| {
                if shape == ValueShape::Duration {
                    duration::parse_seconds(s)
                } else {
                    None
                }
            })
        }
        _ => None,
    }
}

/// A range object is taken as-is; a lone scalar goes into the slot the
/// modifier reads.
fn range(shape: ValueShape, modifier: CriterionModifier, value: &WireValue) -> Option<NumberValue> {
    if let WireValue::Range(number) = value {
        return Some(*number);
    }
    let n = scalar(shape, value)?;
    let mut number = NumberValue::default();
    match modifier {
        CriterionModifier::Equals | CriterionModifier::NotEquals => number.exact = Some(n),
        CriterionModifier::GreaterThan => number.lower = Some(n),
        CriterionModifier::LessThan => number.upper = Some(n),
        _ => return None,
    }
    Some(number)
}

fn flag(value: &WireValue) -> Option<bool> {
    match value {
        WireValue::Flag(b) => Some(*b),
        WireValue::Text(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn ids(value: &WireValue) -> Option<Vec<String>> {
    match value {
        WireValue::Ids(ids) => Some(ids.clone()),
        WireValue::Text(id) if !id.is_empty() => Some(vec![id.clone()]),
        WireValue::Integer(id) => Some(vec![id.to_string()]),
        _ => None,
    }
}
