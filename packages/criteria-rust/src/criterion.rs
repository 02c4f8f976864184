//! A single filter term: field, modifier and value.

use std::fmt;

use tracing::debug;

use crate::catalog::FieldDescriptor;
use crate::duration;
use crate::error::CriteriaError;
use crate::modifier::{CriterionModifier, ModifierSet};
use crate::shape::ValueShape;
use crate::value::{CriterionValue, LabeledIdSet, NumberValue, RangeField, ValueUpdate};
use crate::wire::{project_value, Projection, WireTerm};

/// One filter term bound to a catalog field.
///
/// Created by [`CriteriaFactory`](crate::CriteriaFactory) and edited only
/// through its setters, which keep the modifier legal for the field's shape
/// and the value of the shape's type. Switching to a different field means
/// creating a new criterion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Criterion {
    field: &'static FieldDescriptor,
    modifier: CriterionModifier,
    value: CriterionValue,
}

impl Criterion {
    pub(crate) fn new(field: &'static FieldDescriptor) -> Self {
        Self {
            field,
            modifier: ModifierSet::legal_for(field.shape).default_modifier(),
            value: CriterionValue::empty(field.shape),
        }
    }

    // -- accessors ---------------------------------------------------------

    #[must_use]
    pub fn field(&self) -> &'static FieldDescriptor {
        self.field
    }

    #[must_use]
    pub fn field_id(&self) -> &'static str {
        self.field.id
    }

    #[must_use]
    pub fn parameter_name(&self) -> &'static str {
        self.field.parameter_name
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        self.field.label
    }

    #[must_use]
    pub fn shape(&self) -> ValueShape {
        self.field.shape
    }

    /// Selectable values for enumerated fields; empty for other shapes.
    #[must_use]
    pub fn options(&self) -> &'static [&'static str] {
        self.field.options
    }

    #[must_use]
    pub fn modifier(&self) -> CriterionModifier {
        self.modifier
    }

    /// Modifiers a UI may offer for this criterion.
    #[must_use]
    pub fn legal_modifiers(&self) -> ModifierSet {
        ModifierSet::legal_for(self.field.shape)
    }

    #[must_use]
    pub fn value(&self) -> &CriterionValue {
        &self.value
    }

    /// The range triple of a number or duration criterion.
    #[must_use]
    pub fn number_value(&self) -> Option<&NumberValue> {
        match &self.value {
            CriterionValue::Number(n) => Some(n),
            _ => None,
        }
    }

    /// The references held by a labeled-id criterion.
    #[must_use]
    pub fn labeled_ids(&self) -> Option<&LabeledIdSet> {
        match &self.value {
            CriterionValue::LabeledIds(set) => Some(set),
            _ => None,
        }
    }

    // -- mutation ----------------------------------------------------------

    /// Switches the modifier. The value is left as is; slots the new modifier
    /// does not read are ignored until a modifier that reads them comes back.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::IllegalModifier`] if `modifier` is not legal
    /// for this field's shape.
    pub fn set_modifier(&mut self, modifier: CriterionModifier) -> Result<(), CriteriaError> {
        if !self.legal_modifiers().contains(modifier) {
            return Err(CriteriaError::IllegalModifier {
                field: self.field.id,
                modifier,
            });
        }
        self.modifier = modifier;
        Ok(())
    }

    /// Applies a partial update. Returns whether the value changed: adding an
    /// id already present, or removing one that is absent, changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::InvalidValue`] if the update does not match
    /// the field's shape, or selects a choice outside the field's options.
    pub fn set_value(&mut self, update: ValueUpdate) -> Result<bool, CriteriaError> {
        let field = self.field;
        match (&mut self.value, update) {
            (CriterionValue::Text(text), ValueUpdate::Text(new)) => {
                let changed = *text != new;
                *text = new;
                Ok(changed)
            }
            (CriterionValue::Number(number), ValueUpdate::Range(slot, new)) => {
                let changed = number.get(slot) != new;
                number.set(slot, new);
                Ok(changed)
            }
            (CriterionValue::Resolution(bucket), ValueUpdate::Resolution(new)) => {
                let changed = *bucket != Some(new);
                *bucket = Some(new);
                Ok(changed)
            }
            (CriterionValue::Choice(choice), ValueUpdate::Choice(new)) => {
                if !field.options.contains(&new.as_str()) {
                    return Err(CriteriaError::InvalidValue {
                        field: field.id,
                        expected: "one of the field's options",
                        found: new,
                    });
                }
                let changed = choice.as_deref() != Some(new.as_str());
                *choice = Some(new);
                Ok(changed)
            }
            (CriterionValue::Flag(flag), ValueUpdate::Flag(new)) => {
                let changed = *flag != Some(new);
                *flag = Some(new);
                Ok(changed)
            }
            (CriterionValue::LabeledIds(set), ValueUpdate::AddId(item)) => {
                let id = item.id.clone();
                let added = set.insert(item);
                if !added {
                    debug!(field = field.id, id = %id, "ignoring duplicate labeled id");
                }
                Ok(added)
            }
            (CriterionValue::LabeledIds(set), ValueUpdate::RemoveId(id)) => Ok(set.remove(&id)),
            (_, update) => Err(CriteriaError::InvalidValue {
                field: field.id,
                expected: field.shape.name(),
                found: update.kind().to_string(),
            }),
        }
    }

    /// Replaces the whole value, as a presentation widget does when it calls
    /// back with its edited copy.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::InvalidValue`] if `value` is not of the
    /// field's shape, or names a choice outside the field's options.
    pub fn replace_value(&mut self, value: CriterionValue) -> Result<(), CriteriaError> {
        if !value.fits(self.field.shape) {
            return Err(CriteriaError::InvalidValue {
                field: self.field.id,
                expected: self.field.shape.name(),
                found: value.kind().to_string(),
            });
        }
        if let CriterionValue::Choice(Some(choice)) = &value {
            if !self.field.options.contains(&choice.as_str()) {
                return Err(CriteriaError::InvalidValue {
                    field: self.field.id,
                    expected: "one of the field's options",
                    found: choice.clone(),
                });
            }
        }
        self.value = value;
        Ok(())
    }

    // -- projection --------------------------------------------------------

    /// What the current modifier reads from the current value.
    #[must_use]
    pub fn projection(&self) -> Projection {
        project_value(self.field.shape, self.modifier, &self.value)
    }

    /// True when every slot the current modifier needs is filled in.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.projection().is_complete()
    }

    /// The wire term for this criterion, `None` while incomplete.
    #[must_use]
    pub fn to_wire_term(&self) -> Option<WireTerm> {
        match self.projection() {
            Projection::Incomplete => None,
            projection => Some(WireTerm::new(self.modifier, projection.into_value())),
        }
    }

    fn format_number(&self, n: i64) -> String {
        if self.field.shape == ValueShape::Duration {
            duration::format_seconds(n)
        } else {
            n.to_string()
        }
    }

    fn describe_value(&self) -> String {
        match &self.value {
            CriterionValue::Text(text) => text.clone(),
            CriterionValue::Number(number) => match self.modifier {
                CriterionModifier::GreaterThan => self.format_number(number.read(RangeField::Lower)),
                CriterionModifier::LessThan => self.format_number(number.read(RangeField::Upper)),
                CriterionModifier::Between | CriterionModifier::NotBetween => format!(
                    "{} and {}",
                    self.format_number(number.read(RangeField::Lower)),
                    self.format_number(number.read(RangeField::Upper))
                ),
                _ => self.format_number(number.read(RangeField::Exact)),
            },
            CriterionValue::Resolution(bucket) => {
                bucket.map(|b| b.label().to_string()).unwrap_or_default()
            }
            CriterionValue::Choice(choice) => choice.clone().unwrap_or_default(),
            CriterionValue::Flag(flag) => flag.map(|b| b.to_string()).unwrap_or_default(),
            CriterionValue::LabeledIds(set) => set
                .iter()
                .map(|item| item.display())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Renders the criterion for list headers, e.g. `Rating is greater than 3`.
/// Unset numeric slots read as 0.
impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier.is_nullary() {
            return write!(f, "{} {}", self.field.label, self.modifier.phrase());
        }
        write!(
            f,
            "{} {} {}",
            self.field.label,
            self.modifier.phrase(),
            self.describe_value()
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::resolution::ResolutionBucket;
    use crate::value::LabeledId;
    use crate::wire::WireValue;

    fn criterion(id: &str) -> Criterion {
        Criterion::new(catalog::field(id).unwrap())
    }

    #[test]
    fn starts_with_shape_default() {
        let c = criterion("rating");
        assert_eq!(c.modifier(), CriterionModifier::Equals);
        assert_eq!(c.value(), &CriterionValue::Number(NumberValue::default()));
        assert!(!c.is_complete());

        let c = criterion("performers");
        assert_eq!(c.modifier(), CriterionModifier::Includes);
        assert!(c.labeled_ids().unwrap().is_empty());
    }

    #[test]
    fn illegal_modifier_is_rejected() {
        let mut c = criterion("organized");
        let err = c.set_modifier(CriterionModifier::NotEquals).unwrap_err();
        assert_eq!(
            err,
            CriteriaError::IllegalModifier {
                field: "organized",
                modifier: CriterionModifier::NotEquals,
            }
        );
        assert_eq!(c.modifier(), CriterionModifier::Equals);

        let mut c = criterion("age");
        assert!(c.set_modifier(CriterionModifier::IsNull).is_err());
    }

    #[test]
    fn range_update_targets_one_slot() {
        let mut c = criterion("duration");
        c.set_value(ValueUpdate::Range(RangeField::Upper, Some(600))).unwrap();
        c.set_value(ValueUpdate::Range(RangeField::Lower, Some(60))).unwrap();
        assert_eq!(
            c.number_value(),
            Some(&NumberValue {
                exact: None,
                lower: Some(60),
                upper: Some(600),
            })
        );
    }

    #[test]
    fn type_mismatched_update_is_rejected() {
        let mut c = criterion("rating");
        let err = c.set_value(ValueUpdate::Text("five".into())).unwrap_err();
        assert_eq!(
            err,
            CriteriaError::InvalidValue {
                field: "rating",
                expected: "number",
                found: "text".to_string(),
            }
        );
        assert!(c.number_value().unwrap().is_empty());
    }

    #[test]
    fn between_completes_only_with_both_bounds() {
        let mut c = criterion("rating");
        c.set_modifier(CriterionModifier::Between).unwrap();
        c.set_value(ValueUpdate::Range(RangeField::Lower, Some(2))).unwrap();
        assert!(!c.is_complete());
        assert!(c.to_wire_term().is_none());
        c.set_value(ValueUpdate::Range(RangeField::Upper, Some(4))).unwrap();
        assert!(c.is_complete());
        assert_eq!(
            c.to_wire_term().unwrap().value,
            Some(WireValue::Range(NumberValue {
                exact: None,
                lower: Some(2),
                upper: Some(4),
            }))
        );
    }

    #[test]
    fn modifier_switch_keeps_bounds() {
        let mut c = criterion("rating");
        c.set_modifier(CriterionModifier::Between).unwrap();
        c.set_value(ValueUpdate::Range(RangeField::Lower, Some(5))).unwrap();
        c.set_value(ValueUpdate::Range(RangeField::Upper, Some(10))).unwrap();
        c.set_modifier(CriterionModifier::GreaterThan).unwrap();
        c.set_modifier(CriterionModifier::Between).unwrap();
        let n = c.number_value().unwrap();
        assert_eq!((n.lower, n.upper), (Some(5), Some(10)));
    }

    #[test]
    fn duplicate_labeled_id_is_rejected() {
        let mut c = criterion("performers");
        assert!(c.set_value(ValueUpdate::AddId(LabeledId::new("7", "Alice"))).unwrap());
        assert!(!c.set_value(ValueUpdate::AddId(LabeledId::new("7", "Alice"))).unwrap());
        assert_eq!(c.labeled_ids().unwrap().len(), 1);
        assert!(c.set_value(ValueUpdate::RemoveId("7".into())).unwrap());
        assert!(!c.is_complete());
    }

    #[test]
    fn choice_must_be_an_option() {
        let mut c = criterion("sceneIsMissing");
        assert!(c.set_value(ValueUpdate::Choice("twitter".into())).is_err());
        c.set_value(ValueUpdate::Choice("studio".into())).unwrap();
        assert!(c.is_complete());
        assert_eq!(c.options(), catalog::SCENE_MISSING_OPTIONS);
    }

    #[test]
    fn replace_value_validates_shape_and_options() {
        let mut c = criterion("gender");
        assert!(c
            .replace_value(CriterionValue::Text("MALE".into()))
            .is_err());
        assert!(c
            .replace_value(CriterionValue::Choice(Some("ROBOT".into())))
            .is_err());
        c.replace_value(CriterionValue::Choice(Some("FEMALE".into())))
            .unwrap();
        assert_eq!(c.value(), &CriterionValue::Choice(Some("FEMALE".into())));
    }

    #[test]
    fn null_check_is_complete_without_value() {
        let mut c = criterion("url");
        c.set_modifier(CriterionModifier::IsNull).unwrap();
        assert!(c.is_complete());
        let term = c.to_wire_term().unwrap();
        assert_eq!(term.modifier, CriterionModifier::IsNull);
        assert!(term.value.is_none());
    }

    #[test]
    fn set_value_reports_change() {
        let mut c = criterion("title");
        assert!(c.set_value(ValueUpdate::Text("beach".into())).unwrap());
        assert!(!c.set_value(ValueUpdate::Text("beach".into())).unwrap());
    }

    #[test]
    fn display_renders_modifier_and_value() {
        let mut c = criterion("rating");
        c.set_modifier(CriterionModifier::GreaterThan).unwrap();
        c.set_value(ValueUpdate::Range(RangeField::Lower, Some(3))).unwrap();
        assert_eq!(c.to_string(), "Rating is greater than 3");

        let mut c = criterion("duration");
        c.set_modifier(CriterionModifier::Between).unwrap();
        c.set_value(ValueUpdate::Range(RangeField::Upper, Some(90))).unwrap();
        assert_eq!(c.to_string(), "Duration between 0:00 and 1:30");

        let mut c = criterion("performers");
        c.set_value(ValueUpdate::AddId(LabeledId::new("1", "Alice"))).unwrap();
        c.set_value(ValueUpdate::AddId(LabeledId::bare("2"))).unwrap();
        assert_eq!(c.to_string(), "Performers includes Alice, 2");

        let mut c = criterion("resolution");
        c.set_value(ValueUpdate::Resolution(ResolutionBucket::FullHd)).unwrap();
        assert_eq!(c.to_string(), "Resolution is 1080p");

        let mut c = criterion("stash_id");
        c.set_modifier(CriterionModifier::NotNull).unwrap();
        assert_eq!(c.to_string(), "Stash ID is not null");
    }
}
