//! Structural value types a criterion can carry.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CriteriaError;

/// The structural type of a criterion's value.
///
/// The shape decides both which [`CriterionValue`](crate::CriterionValue)
/// variant a criterion holds and which modifiers are legal for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueShape {
    /// Free text on an optional column.
    String,
    /// Free text on a column that is always populated.
    MandatoryString,
    /// Integer with exact/lower/upper range handling.
    Number,
    /// Integer on a column that is always populated (counts, age).
    MandatoryNumber,
    /// Seconds, same range handling as [`ValueShape::Number`].
    Duration,
    /// Named resolution bucket.
    Resolution,
    /// One value out of a fixed option list.
    Enumeration,
    /// True/false flag.
    Boolean,
    /// Name of a sub-field that must be missing.
    IsMissing,
    /// Set of `{id, label}` references to other catalog entities.
    LabeledIds,
}

impl ValueShape {
    /// Every shape, in declaration order.
    pub const ALL: [ValueShape; 10] = [
        ValueShape::String,
        ValueShape::MandatoryString,
        ValueShape::Number,
        ValueShape::MandatoryNumber,
        ValueShape::Duration,
        ValueShape::Resolution,
        ValueShape::Enumeration,
        ValueShape::Boolean,
        ValueShape::IsMissing,
        ValueShape::LabeledIds,
    ];

    /// Category name, as used in configuration and diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::MandatoryString => "mandatory_string",
            Self::Number => "number",
            Self::MandatoryNumber => "mandatory_number",
            Self::Duration => "duration",
            Self::Resolution => "resolution",
            Self::Enumeration => "enumeration",
            Self::Boolean => "boolean",
            Self::IsMissing => "is_missing",
            Self::LabeledIds => "labeled_ids",
        }
    }

    /// Resolves a category name back to a shape.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::Configuration`] for a name no shape carries.
    pub fn from_name(name: &str) -> Result<Self, CriteriaError> {
        Self::ALL
            .into_iter()
            .find(|shape| shape.name() == name)
            .ok_or_else(|| CriteriaError::Configuration {
                category: name.to_string(),
            })
    }

    /// True for shapes stored as an exact/lower/upper triple.
    #[must_use]
    pub fn is_range(self) -> bool {
        matches!(self, Self::Number | Self::MandatoryNumber | Self::Duration)
    }

    /// True for shapes stored as free text.
    #[must_use]
    pub fn is_text(self) -> bool {
        matches!(self, Self::String | Self::MandatoryString)
    }

    /// True for shapes whose value is drawn from the field's option list.
    #[must_use]
    pub fn is_enumerated(self) -> bool {
        matches!(self, Self::Enumeration | Self::IsMissing)
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
