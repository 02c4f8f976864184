//! Error types for criterion construction and mutation.

use crate::modifier::CriterionModifier;

/// Errors raised while building or editing a [`Criterion`](crate::Criterion).
///
/// All four variants indicate a wiring bug in the caller rather than bad user
/// input: pickers only offer known fields, modifier dropdowns only offer legal
/// modifiers, and widgets only write values of the shape they render.
/// Hydration of persisted filters never surfaces these; it drops the offending
/// term instead (see [`FilterSerializer::hydrate`](crate::FilterSerializer::hydrate)).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    #[error("unknown value shape category: {category}")]
    Configuration { category: String },
    #[error("unknown field: {field}")]
    UnknownField { field: String },
    #[error("modifier {modifier} is not legal for field {field}")]
    IllegalModifier {
        field: &'static str,
        modifier: CriterionModifier,
    },
    #[error("invalid value for field {field}: expected {expected}, found {found}")]
    InvalidValue {
        field: &'static str,
        expected: &'static str,
        found: String,
    },
}

/// Errors from encoding or decoding a whole wire filter document.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("json codec error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("msgpack encode error: {0}")]
    MsgPackEncode(#[from] rmp_serde::encode::Error),
    #[error("msgpack decode error: {0}")]
    MsgPackDecode(#[from] rmp_serde::decode::Error),
}
