//! Comparison modifiers and the per-shape legality table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CriteriaError;
use crate::shape::ValueShape;

// ---------------------------------------------------------------------------
// CriterionModifier
// ---------------------------------------------------------------------------

/// Comparison operator applied between a field and its target value(s).
///
/// Serializes to the query API's enum names (`EQUALS`, `NOT_EQUALS`, ...).
/// The PascalCase spelling (`Equals`) is accepted on input so filters saved
/// by older clients still hydrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CriterionModifier {
    #[serde(alias = "Equals")]
    Equals,
    #[serde(alias = "NotEquals")]
    NotEquals,
    #[serde(alias = "GreaterThan")]
    GreaterThan,
    #[serde(alias = "LessThan")]
    LessThan,
    #[serde(alias = "Between")]
    Between,
    #[serde(alias = "NotBetween")]
    NotBetween,
    #[serde(alias = "Includes")]
    Includes,
    #[serde(alias = "IncludesAll")]
    IncludesAll,
    #[serde(alias = "Excludes")]
    Excludes,
    #[serde(alias = "MatchesRegex")]
    MatchesRegex,
    #[serde(alias = "NotMatchesRegex")]
    NotMatchesRegex,
    #[serde(alias = "IsNull")]
    IsNull,
    #[serde(alias = "NotNull")]
    NotNull,
}

impl CriterionModifier {
    /// Wire name of the modifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "EQUALS",
            Self::NotEquals => "NOT_EQUALS",
            Self::GreaterThan => "GREATER_THAN",
            Self::LessThan => "LESS_THAN",
            Self::Between => "BETWEEN",
            Self::NotBetween => "NOT_BETWEEN",
            Self::Includes => "INCLUDES",
            Self::IncludesAll => "INCLUDES_ALL",
            Self::Excludes => "EXCLUDES",
            Self::MatchesRegex => "MATCHES_REGEX",
            Self::NotMatchesRegex => "NOT_MATCHES_REGEX",
            Self::IsNull => "IS_NULL",
            Self::NotNull => "NOT_NULL",
        }
    }

    /// Human-readable phrase used when rendering a criterion as text.
    #[must_use]
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Equals => "is",
            Self::NotEquals => "is not",
            Self::GreaterThan => "is greater than",
            Self::LessThan => "is less than",
            Self::Between => "between",
            Self::NotBetween => "not between",
            Self::Includes => "includes",
            Self::IncludesAll => "includes all",
            Self::Excludes => "excludes",
            Self::MatchesRegex => "matches regex",
            Self::NotMatchesRegex => "not matches regex",
            Self::IsNull => "is null",
            Self::NotNull => "is not null",
        }
    }

    /// True for modifiers that compare against no value at all.
    #[must_use]
    pub fn is_nullary(self) -> bool {
        matches!(self, Self::IsNull | Self::NotNull)
    }
}

impl fmt::Display for CriterionModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ModifierSet
// ---------------------------------------------------------------------------

/// Ordered list of modifiers legal for one value shape, plus its default.
///
/// Every call to [`legal_for`](ModifierSet::legal_for) builds a fresh list;
/// nothing is shared between criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierSet {
    modifiers: Vec<CriterionModifier>,
}

impl ModifierSet {
    /// Returns the legal modifiers for `shape`. The first entry is the default.
    #[must_use]
    pub fn legal_for(shape: ValueShape) -> Self {
        use CriterionModifier::{
            Between, Equals, Excludes, GreaterThan, Includes, IncludesAll, IsNull, LessThan,
            MatchesRegex, NotBetween, NotEquals, NotMatchesRegex, NotNull,
        };

        let modifiers = match shape {
            ValueShape::String => vec![
                Equals,
                NotEquals,
                Includes,
                Excludes,
                MatchesRegex,
                NotMatchesRegex,
                IsNull,
                NotNull,
            ],
            ValueShape::MandatoryString => vec![
                Equals,
                NotEquals,
                Includes,
                Excludes,
                MatchesRegex,
                NotMatchesRegex,
            ],
            ValueShape::Number | ValueShape::Duration => vec![
                Equals,
                NotEquals,
                GreaterThan,
                LessThan,
                Between,
                NotBetween,
                IsNull,
                NotNull,
            ],
            ValueShape::MandatoryNumber => {
                vec![Equals, NotEquals, GreaterThan, LessThan, Between, NotBetween]
            }
            ValueShape::Resolution => vec![Equals, NotEquals, GreaterThan, LessThan],
            ValueShape::Enumeration | ValueShape::Boolean | ValueShape::IsMissing => {
                vec![Equals]
            }
            ValueShape::LabeledIds => vec![Includes, IncludesAll, Excludes, Equals, NotEquals],
        };
        Self { modifiers }
    }

    /// Looks up the legal modifiers by shape category name (e.g. `"duration"`).
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::Configuration`] when `category` names no known shape.
    pub fn legal_for_name(category: &str) -> Result<Self, CriteriaError> {
        ValueShape::from_name(category).map(Self::legal_for)
    }

    /// The modifier a freshly created criterion of this shape starts with.
    #[must_use]
    pub fn default_modifier(&self) -> CriterionModifier {
        self.modifiers[0]
    }

    #[must_use]
    pub fn contains(&self, modifier: CriterionModifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// True when the shape offers no modifier choice.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.modifiers.len() == 1
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modifiers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CriterionModifier> + '_ {
        self.modifiers.iter().copied()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[CriterionModifier] {
        &self.modifiers
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
