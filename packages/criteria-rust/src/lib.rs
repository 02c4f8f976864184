//! Catalog criteria: typed filter terms, their legal modifiers, and the wire
//! filter they serialize to.

pub mod catalog;
pub mod criterion;
pub mod duration;
pub mod error;
pub mod factory;
pub mod modifier;
pub mod resolution;
pub mod serializer;
pub mod shape;
pub mod value;
pub mod wire;

pub use catalog::{CriterionOption, EntityType, FieldDescriptor};
pub use criterion::Criterion;
pub use error::{CodecError, CriteriaError};
pub use factory::CriteriaFactory;
pub use modifier::{CriterionModifier, ModifierSet};
pub use resolution::{HeightPredicate, ResolutionBucket};
pub use serializer::{DropReason, DroppedTerm, FilterSerializer, Hydration, SerializerConfig};
pub use shape::ValueShape;
pub use value::{CriterionValue, LabeledId, LabeledIdSet, NumberValue, RangeField, ValueUpdate};
pub use wire::{WireFilter, WireFormat, WireTerm, WireValue};
