//! Value projection: which parts of a criterion value a modifier reads.
//!
//! The same table answers "is this criterion complete?" and "what goes on
//! the wire?", so the two can never disagree.

use regex::Regex;

use super::WireValue;
use crate::modifier::CriterionModifier;
use crate::shape::ValueShape;
use crate::value::{CriterionValue, NumberValue};

/// Outcome of projecting a value under a modifier.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    /// The modifier takes no value (`IS_NULL`, `NOT_NULL`).
    Bare,
    /// The wire value to send.
    Value(WireValue),
    /// The slots the modifier needs are not filled in yet.
    Incomplete,
}

impl Projection {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !matches!(self, Self::Incomplete)
    }

    /// Wire value, `None` for bare and incomplete projections.
    #[must_use]
    pub fn into_value(self) -> Option<WireValue> {
        match self {
            Self::Value(v) => Some(v),
            Self::Bare | Self::Incomplete => None,
        }
    }
}

/// Projects `value` of a field with `shape` under `modifier`.
///
/// Range slots the modifier does not read are ignored rather than cleared,
/// which is what lets a user flip between `BETWEEN` and `GREATER_THAN`
/// without losing the upper bound.
#[must_use]
pub fn project_value(
    shape: ValueShape,
    modifier: CriterionModifier,
    value: &CriterionValue,
) -> Projection {
    if !value.fits(shape) {
        return Projection::Incomplete;
    }
    if modifier.is_nullary() {
        return Projection::Bare;
    }

    match value {
        CriterionValue::Text(text) => project_text(modifier, text),
        CriterionValue::Number(number) => project_range(modifier, *number),
        CriterionValue::Resolution(Some(bucket)) => {
            Projection::Value(WireValue::Text(bucket.as_str().to_string()))
        }
        CriterionValue::Choice(Some(choice)) => Projection::Value(WireValue::Text(choice.clone())),
        CriterionValue::Flag(Some(flag)) => Projection::Value(WireValue::Flag(*flag)),
        CriterionValue::LabeledIds(set) if !set.is_empty() => {
            Projection::Value(WireValue::Ids(set.ids()))
        }
        CriterionValue::Resolution(None)
        | CriterionValue::Choice(None)
        | CriterionValue::Flag(None)
        | CriterionValue::LabeledIds(_) => Projection::Incomplete,
    }
}

fn project_text(modifier: CriterionModifier, text: &str) -> Projection {
    if text.is_empty() {
        return Projection::Incomplete;
    }
    let is_regex = matches!(
        modifier,
        CriterionModifier::MatchesRegex | CriterionModifier::NotMatchesRegex
    );
    if is_regex && Regex::new(text).is_err() {
        return Projection::Incomplete;
    }
    Projection::Value(WireValue::Text(text.to_string()))
}

fn project_range(modifier: CriterionModifier, number: NumberValue) -> Projection {
    let projected = match modifier {
        CriterionModifier::Equals | CriterionModifier::NotEquals => {
            number.exact.map(|exact| NumberValue {
                exact: Some(exact),
                ..NumberValue::default()
            })
        }
        CriterionModifier::GreaterThan => number.lower.map(|lower| NumberValue {
            lower: Some(lower),
            ..NumberValue::default()
        }),
        CriterionModifier::LessThan => number.upper.map(|upper| NumberValue {
            upper: Some(upper),
            ..NumberValue::default()
        }),
        CriterionModifier::Between | CriterionModifier::NotBetween => {
            match (number.lower, number.upper) {
                (Some(lower), Some(upper)) => Some(NumberValue {
                    exact: None,
                    lower: Some(lower),
                    upper: Some(upper),
                }),
                _ => None,
            }
        }
        _ => None,
    };
    projected.map_or(Projection::Incomplete, |n| Projection::Value(WireValue::Range(n)))
}
