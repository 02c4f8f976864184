//! Conversion between criteria and wire filters.
//!
//! Serialization is strict about what it emits: only complete criteria, in
//! input order, each under its parameter name. Hydration is lenient about
//! what it accepts: every term that cannot become a complete criterion is
//! dropped on its own and reported, and the rest of the filter survives.

use thiserror::Error;
use tracing::{debug, warn};

use crate::catalog::{self, EntityType};
use crate::criterion::Criterion;
use crate::error::{CodecError, CriteriaError};
use crate::modifier::CriterionModifier;
use crate::wire::{self, WireFilter, WireFormat, WireTerm};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Settings for a [`FilterSerializer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializerConfig {
    /// Entity whose field set resolves parameter names during hydration.
    pub entity: EntityType,
    /// Byte encoding used by [`FilterSerializer::encode`] and
    /// [`FilterSerializer::decode`].
    pub format: WireFormat,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            entity: EntityType::Scene,
            format: WireFormat::Json,
        }
    }
}

// ---------------------------------------------------------------------------
// Hydration report
// ---------------------------------------------------------------------------

/// Why a wire term did not become a criterion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DropReason {
    #[error("no {entity} field uses this parameter")]
    UnknownParameter { entity: EntityType },

    #[error("entry is not a filter term")]
    Malformed,

    #[error(transparent)]
    Rejected(#[from] CriteriaError),

    #[error("value is incomplete for modifier {modifier}")]
    Incomplete { modifier: CriterionModifier },
}

/// A wire term left out of a hydrated filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedTerm {
    pub parameter: String,
    pub reason: DropReason,
}

/// Result of hydrating a wire filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hydration {
    /// Criteria in wire order.
    pub criteria: Vec<Criterion>,
    /// Terms that were dropped, in the order they were met.
    pub dropped: Vec<DroppedTerm>,
}

impl Hydration {
    /// True when no term was dropped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

// ---------------------------------------------------------------------------
// FilterSerializer
// ---------------------------------------------------------------------------

/// Turns criteria into wire filters and back.
#[derive(Debug, Clone, Default)]
pub struct FilterSerializer {
    config: SerializerConfig,
}

impl FilterSerializer {
    #[must_use]
    pub fn new(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Serializer for `entity` with the default byte format.
    #[must_use]
    pub fn for_entity(entity: EntityType) -> Self {
        Self::new(SerializerConfig {
            entity,
            ..SerializerConfig::default()
        })
    }

    #[must_use]
    pub fn config(&self) -> &SerializerConfig {
        &self.config
    }

    /// Builds the wire filter for `criteria`.
    ///
    /// Incomplete criteria are skipped. When two criteria share a parameter
    /// name the later one takes the earlier one's place.
    #[must_use]
    pub fn serialize(&self, criteria: &[Criterion]) -> WireFilter {
        let mut filter = WireFilter::new();
        for criterion in criteria {
            let Some(term) = criterion.to_wire_term() else {
                debug!(
                    field = criterion.field_id(),
                    modifier = %criterion.modifier(),
                    "skipping incomplete criterion"
                );
                continue;
            };
            if filter.insert(criterion.parameter_name(), term).is_some() {
                warn!(
                    parameter = criterion.parameter_name(),
                    "criterion replaces an earlier one with the same parameter"
                );
            }
        }
        filter
    }

    /// Hydrates `filter` into criteria, dropping terms that cannot be used.
    #[must_use]
    pub fn deserialize(&self, filter: &WireFilter) -> Vec<Criterion> {
        self.hydrate(filter).criteria
    }

    /// Hydrates `filter` and reports every dropped term.
    #[must_use]
    pub fn hydrate(&self, filter: &WireFilter) -> Hydration {
        let mut hydration = Hydration::default();
        for (parameter, term) in filter.iter() {
            match self.hydrate_term(parameter, term) {
                Ok(criterion) => hydration.criteria.push(criterion),
                Err(reason) => drop_term(&mut hydration, parameter, reason),
            }
        }
        for parameter in filter.malformed() {
            drop_term(&mut hydration, parameter, DropReason::Malformed);
        }
        hydration
    }

    fn hydrate_term(&self, parameter: &str, term: &WireTerm) -> Result<Criterion, DropReason> {
        let field = catalog::field_for_parameter(self.config.entity, parameter).ok_or(
            DropReason::UnknownParameter {
                entity: self.config.entity,
            },
        )?;
        let mut criterion = Criterion::new(field);
        criterion.set_modifier(term.modifier)?;
        let value = wire::coerce(field, term.modifier, term.value.as_ref())?;
        criterion.replace_value(value)?;
        if !criterion.is_complete() {
            return Err(DropReason::Incomplete {
                modifier: term.modifier,
            });
        }
        Ok(criterion)
    }

    /// Serializes `criteria` and encodes the result in the configured format.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if encoding fails.
    pub fn encode(&self, criteria: &[Criterion]) -> Result<Vec<u8>, CodecError> {
        wire::encode(&self.serialize(criteria), self.config.format)
    }

    /// Decodes bytes in the configured format and hydrates them.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if the bytes are not a filter map. Bad terms
    /// inside a readable map are reported in [`Hydration::dropped`] instead.
    pub fn decode(&self, bytes: &[u8]) -> Result<Hydration, CodecError> {
        wire::decode(bytes, self.config.format).map(|filter| self.hydrate(&filter))
    }
}

fn drop_term(hydration: &mut Hydration, parameter: &str, reason: DropReason) {
    warn!(parameter, reason = %reason, "dropping filter term");
    hydration.dropped.push(DroppedTerm {
        parameter: parameter.to_string(),
        reason,
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
