//! Shape-specific criterion values and partial updates.

use serde::{Deserialize, Serialize};

use crate::resolution::ResolutionBucket;
use crate::shape::ValueShape;

// ---------------------------------------------------------------------------
// Range values
// ---------------------------------------------------------------------------

/// Selects one slot of a [`NumberValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeField {
    Exact,
    Lower,
    Upper,
}

/// Exact/lower/upper triple backing number and duration criteria.
///
/// Slots are stored as entered. Which of them a modifier reads is decided at
/// serialization time, so toggling between `Between` and `GreaterThan` keeps
/// both bounds.
///
/// Doubles as the wire form of a range value, with unset slots omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NumberValue {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub exact: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub lower: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub upper: Option<i64>,
}

impl NumberValue {
    /// Raw slot contents, `None` when never entered.
    #[must_use]
    pub fn get(&self, field: RangeField) -> Option<i64> {
        match field {
            RangeField::Exact => self.exact,
            RangeField::Lower => self.lower,
            RangeField::Upper => self.upper,
        }
    }

    /// Writes one slot, leaving the other two untouched.
    pub fn set(&mut self, field: RangeField, value: Option<i64>) {
        match field {
            RangeField::Exact => self.exact = value,
            RangeField::Lower => self.lower = value,
            RangeField::Upper => self.upper = value,
        }
    }

    /// Slot value for display, reading an unset slot as 0.
    #[must_use]
    pub fn read(&self, field: RangeField) -> i64 {
        self.get(field).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_none() && self.lower.is_none() && self.upper.is_none()
    }
}

// ---------------------------------------------------------------------------
// Labeled ids
// ---------------------------------------------------------------------------

/// Reference to another catalog entity.
///
/// `label` is denormalized for rendering only. Identity is the `id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledId {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub label: Option<String>,
}

impl LabeledId {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
        }
    }

    /// Reference without a display name, as hydrated from an id-only wire value.
    #[must_use]
    pub fn bare(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    /// Display name, falling back to the id.
    #[must_use]
    pub fn display(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }
}

impl PartialEq for LabeledId {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for LabeledId {}

/// Insertion-ordered set of [`LabeledId`]s keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LabeledId>", into = "Vec<LabeledId>")]
pub struct LabeledIdSet {
    items: Vec<LabeledId>,
}

impl LabeledIdSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `item` unless its id is already present. Returns whether it was added.
    pub fn insert(&mut self, item: LabeledId) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    /// Removes the entry with `id`. Returns whether one was present.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabeledId> {
        self.items.iter()
    }

    /// Ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<String> {
        self.items.iter().map(|item| item.id.clone()).collect()
    }
}

impl FromIterator<LabeledId> for LabeledIdSet {
    /// Builds a set, keeping the first entry for each repeated id.
    fn from_iter<I: IntoIterator<Item = LabeledId>>(iter: I) -> Self {
        let mut set = Self::new();
        for item in iter {
            set.insert(item);
        }
        set
    }
}

impl From<Vec<LabeledId>> for LabeledIdSet {
    fn from(items: Vec<LabeledId>) -> Self {
        items.into_iter().collect()
    }
}

impl From<LabeledIdSet> for Vec<LabeledId> {
    fn from(set: LabeledIdSet) -> Self {
        set.items
    }
}

// ---------------------------------------------------------------------------
// CriterionValue
// ---------------------------------------------------------------------------

/// Current value of a criterion. The variant is fixed by the field's shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CriterionValue {
    /// String and mandatory string shapes.
    Text(String),
    /// Number, mandatory number and duration shapes.
    Number(NumberValue),
    /// Resolution shape.
    Resolution(Option<ResolutionBucket>),
    /// Enumeration and is-missing shapes: one entry of the field's options.
    Choice(Option<String>),
    /// Boolean shape.
    Flag(Option<bool>),
    /// Labeled-id shape.
    LabeledIds(LabeledIdSet),
}

impl CriterionValue {
    /// Fresh zero value for `shape`.
    #[must_use]
    pub fn empty(shape: ValueShape) -> Self {
        match shape {
            ValueShape::String | ValueShape::MandatoryString => Self::Text(String::new()),
            ValueShape::Number | ValueShape::MandatoryNumber | ValueShape::Duration => {
                Self::Number(NumberValue::default())
            }
            ValueShape::Resolution => Self::Resolution(None),
            ValueShape::Enumeration | ValueShape::IsMissing => Self::Choice(None),
            ValueShape::Boolean => Self::Flag(None),
            ValueShape::LabeledIds => Self::LabeledIds(LabeledIdSet::new()),
        }
    }

    /// Whether this value variant is the one `shape` stores.
    #[must_use]
    pub fn fits(&self, shape: ValueShape) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(&Self::empty(shape))
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Resolution(_) => "resolution",
            Self::Choice(_) => "choice",
            Self::Flag(_) => "flag",
            Self::LabeledIds(_) => "labeled ids",
        }
    }
}

// ---------------------------------------------------------------------------
// ValueUpdate
// ---------------------------------------------------------------------------

/// Partial update applied through [`Criterion::set_value`](crate::Criterion::set_value).
#[derive(Debug, Clone, PartialEq)]
pub enum ValueUpdate {
    /// Replace the text of a string criterion.
    Text(String),
    /// Write (or clear, with `None`) one slot of a range value.
    Range(RangeField, Option<i64>),
    /// Select a resolution bucket.
    Resolution(ResolutionBucket),
    /// Select one option of an enumerated criterion.
    Choice(String),
    /// Set a boolean flag.
    Flag(bool),
    /// Add a reference; a repeated id is rejected.
    AddId(LabeledId),
    /// Remove a reference by id.
    RemoveId(String),
}

impl ValueUpdate {
    /// Name of the value kind this update writes, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Range(..) => "number",
            Self::Resolution(_) => "resolution",
            Self::Choice(_) => "choice",
            Self::Flag(_) => "flag",
            Self::AddId(_) | Self::RemoveId(_) => "labeled ids",
        }
    }
}
