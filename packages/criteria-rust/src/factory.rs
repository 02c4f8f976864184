//! Factory for fresh [`Criterion`] instances.
//!
//! [`CriteriaFactory`] is the only way to obtain a criterion: it resolves the
//! field id against the catalog and starts the criterion at its shape's
//! default modifier with an empty value.

use crate::catalog::{self, CriterionOption, EntityType};
use crate::criterion::Criterion;
use crate::error::CriteriaError;

/// Creates criteria from field ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct CriteriaFactory;

impl CriteriaFactory {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Creates a criterion for any catalog field.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::UnknownField`] if `field_id` is not in the
    /// catalog.
    pub fn create(&self, field_id: &str) -> Result<Criterion, CriteriaError> {
        catalog::field(field_id).map(Criterion::new)
    }

    /// Creates a criterion for a field offered by `entity`'s picker.
    ///
    /// # Errors
    ///
    /// Returns [`CriteriaError::UnknownField`] if `entity` does not offer
    /// `field_id`.
    pub fn create_for(&self, entity: EntityType, field_id: &str) -> Result<Criterion, CriteriaError> {
        if !entity.field_ids().contains(&field_id) {
            return Err(CriteriaError::UnknownField {
                field: field_id.to_string(),
            });
        }
        self.create(field_id)
    }

    /// Picker entries for `entity`.
    #[must_use]
    pub fn options(&self, entity: EntityType) -> Vec<CriterionOption> {
        catalog::criterion_options(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::{CriterionModifier, ModifierSet};
    use crate::value::CriterionValue;

    #[test]
    fn every_field_starts_legal_and_empty() {
        let factory = CriteriaFactory::new();
        for descriptor in catalog::FIELDS {
            let c = factory.create(descriptor.id).unwrap();
            let legal = ModifierSet::legal_for(descriptor.shape);
            assert!(legal.contains(c.modifier()), "{}", descriptor.id);
            assert_eq!(c.modifier(), legal.default_modifier());
            assert_eq!(c.value(), &CriterionValue::empty(descriptor.shape));
        }
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = CriteriaFactory::new().create("mood").unwrap_err();
        assert_eq!(
            err,
            CriteriaError::UnknownField {
                field: "mood".to_string()
            }
        );
    }

    #[test]
    fn create_for_is_scoped_to_the_picker() {
        let factory = CriteriaFactory::new();
        assert!(factory.create_for(EntityType::Scene, "duration").is_ok());
        assert!(factory.create_for(EntityType::Tag, "duration").is_err());
        assert!(factory.create_for(EntityType::Performer, "gender").is_ok());
    }

    #[test]
    fn labeled_ids_default_to_includes() {
        let c = CriteriaFactory::new().create("tags").unwrap();
        assert_eq!(c.modifier(), CriterionModifier::Includes);
    }

    #[test]
    fn options_match_catalog() {
        let factory = CriteriaFactory::new();
        assert_eq!(
            factory.options(EntityType::Studio),
            catalog::criterion_options(EntityType::Studio)
        );
    }
}
