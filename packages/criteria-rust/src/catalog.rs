//! Static field catalog: one descriptor per filterable field, plus the
//! per-entity picker lists.
//!
//! Adding a field or an is-missing option is a table edit here; no logic
//! elsewhere keys on individual field ids.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CriteriaError;
use crate::shape::ValueShape;

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Catalog entity a filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Scene,
    Image,
    Gallery,
    Performer,
    Studio,
    Movie,
    Tag,
}

impl EntityType {
    pub const ALL: [EntityType; 7] = [
        Self::Scene,
        Self::Image,
        Self::Gallery,
        Self::Performer,
        Self::Studio,
        Self::Movie,
        Self::Tag,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Scene => "scene",
            Self::Image => "image",
            Self::Gallery => "gallery",
            Self::Performer => "performer",
            Self::Studio => "studio",
            Self::Movie => "movie",
            Self::Tag => "tag",
        }
    }

    /// Case-insensitive lookup by [`name`](Self::name).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(name))
    }

    /// Field ids offered in this entity's "add filter" picker, in display order.
    #[must_use]
    pub fn field_ids(self) -> &'static [&'static str] {
        match self {
            Self::Scene => SCENE_FIELDS,
            Self::Image => IMAGE_FIELDS,
            Self::Gallery => GALLERY_FIELDS,
            Self::Performer => PERFORMER_FIELDS,
            Self::Studio => STUDIO_FIELDS,
            Self::Movie => MOVIE_FIELDS,
            Self::Tag => TAG_FIELDS,
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// FieldDescriptor
// ---------------------------------------------------------------------------

/// Everything the rest of the crate needs to know about one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Stable field identifier (`rating`, `sceneIsMissing`).
    pub id: &'static str,
    /// Wire-level key; several fields may share one.
    pub parameter_name: &'static str,
    /// Picker label.
    pub label: &'static str,
    pub shape: ValueShape,
    /// Closed option list for enumerated shapes, empty otherwise.
    pub options: &'static [&'static str],
}

impl FieldDescriptor {
    const fn new(id: &'static str, label: &'static str, shape: ValueShape) -> Self {
        Self {
            id,
            parameter_name: id,
            label,
            shape,
            options: &[],
        }
    }

    const fn param(self, parameter_name: &'static str) -> Self {
        Self {
            parameter_name,
            ..self
        }
    }

    const fn options(self, options: &'static [&'static str]) -> Self {
        Self { options, ..self }
    }
}

// ---------------------------------------------------------------------------
// Option lists
// ---------------------------------------------------------------------------

pub const GENDER_OPTIONS: &[&str] = &[
    "MALE",
    "FEMALE",
    "TRANSGENDER_MALE",
    "TRANSGENDER_FEMALE",
    "INTERSEX",
    "NON_BINARY",
];

pub const SCENE_MISSING_OPTIONS: &[&str] = &[
    "title",
    "url",
    "date",
    "gallery",
    "studio",
    "movie",
    "performers",
    "tags",
];

pub const IMAGE_MISSING_OPTIONS: &[&str] = &["title", "galleries", "studio", "performers", "tags"];

pub const PERFORMER_MISSING_OPTIONS: &[&str] = &[
    "url",
    "twitter",
    "instagram",
    "ethnicity",
    "country",
    "eye_color",
    "height",
    "measurements",
    "fake_tits",
    "career_length",
    "tattoos",
    "piercings",
    "aliases",
    "gender",
    "scenes",
];

pub const GALLERY_MISSING_OPTIONS: &[&str] = &[
    "title",
    "details",
    "url",
    "date",
    "studio",
    "performers",
    "tags",
    "scenes",
];

pub const TAG_MISSING_OPTIONS: &[&str] = &["image"];

pub const STUDIO_MISSING_OPTIONS: &[&str] = &["image", "stash_id", "details"];

pub const MOVIE_MISSING_OPTIONS: &[&str] = &["front_image", "back_image", "scenes"];

// ---------------------------------------------------------------------------
// Field table
// ---------------------------------------------------------------------------

use ValueShape::{
    Boolean, Duration, Enumeration, IsMissing, LabeledIds, MandatoryNumber, MandatoryString,
    Number, Resolution,
};

/// The closed set of known fields.
pub static FIELDS: &[FieldDescriptor] = &[
    // Mandatory strings
    FieldDescriptor::new("name", "Name", MandatoryString),
    FieldDescriptor::new("path", "Path", MandatoryString),
    FieldDescriptor::new("checksum", "Checksum", MandatoryString),
    FieldDescriptor::new("oshash", "OsHash", MandatoryString),
    // Optional strings
    FieldDescriptor::new("sceneChecksum", "Checksum", ValueShape::String).param("checksum"),
    FieldDescriptor::new("galleryChecksum", "Checksum", ValueShape::String).param("checksum"),
    FieldDescriptor::new("ethnicity", "Ethnicity", ValueShape::String),
    FieldDescriptor::new("country", "Country", ValueShape::String),
    FieldDescriptor::new("hair_color", "Hair Colour", ValueShape::String),
    FieldDescriptor::new("eye_color", "Eye Colour", ValueShape::String),
    FieldDescriptor::new("height", "Height", ValueShape::String),
    FieldDescriptor::new("measurements", "Measurements", ValueShape::String),
    FieldDescriptor::new("fake_tits", "Fake Tits", ValueShape::String),
    FieldDescriptor::new("career_length", "Career Length", ValueShape::String),
    FieldDescriptor::new("tattoos", "Tattoos", ValueShape::String),
    FieldDescriptor::new("piercings", "Piercings", ValueShape::String),
    FieldDescriptor::new("aliases", "Aliases", ValueShape::String),
    FieldDescriptor::new("url", "URL", ValueShape::String),
    FieldDescriptor::new("stash_id", "Stash ID", ValueShape::String),
    FieldDescriptor::new("details", "Details", ValueShape::String),
    FieldDescriptor::new("title", "Title", ValueShape::String),
    FieldDescriptor::new("phash", "PHash", ValueShape::String),
    FieldDescriptor::new("director", "Director", ValueShape::String),
    FieldDescriptor::new("synopsis", "Synopsis", ValueShape::String),
    // Numbers
    FieldDescriptor::new("rating", "Rating", Number),
    FieldDescriptor::new("birth_year", "Birth Year", Number),
    FieldDescriptor::new("death_year", "Death Year", Number),
    FieldDescriptor::new("weight", "Weight", Number),
    FieldDescriptor::new("o_counter", "O-Counter", MandatoryNumber),
    FieldDescriptor::new("scene_count", "Scene Count", MandatoryNumber),
    FieldDescriptor::new("marker_count", "Marker Count", MandatoryNumber),
    FieldDescriptor::new("image_count", "Image Count", MandatoryNumber),
    FieldDescriptor::new("gallery_count", "Gallery Count", MandatoryNumber),
    FieldDescriptor::new("performer_count", "Performer Count", MandatoryNumber),
    FieldDescriptor::new("tag_count", "Tag Count", MandatoryNumber),
    FieldDescriptor::new("age", "Age", MandatoryNumber),
    FieldDescriptor::new("duration", "Duration", Duration),
    // Resolution
    FieldDescriptor::new("resolution", "Resolution", Resolution),
    FieldDescriptor::new("average_resolution", "Average Resolution", Resolution),
    // Flags
    FieldDescriptor::new("organized", "Organized", Boolean),
    FieldDescriptor::new("favorite", "Favourite", Boolean).param("filter_favorites"),
    FieldDescriptor::new("hasMarkers", "Has Markers", Boolean).param("has_markers"),
    FieldDescriptor::new("interactive", "Interactive", Boolean),
    // Enumerations
    FieldDescriptor::new("gender", "Gender", Enumeration).options(GENDER_OPTIONS),
    // Is missing
    FieldDescriptor::new("sceneIsMissing", "Is Missing", IsMissing)
        .param("is_missing")
        .options(SCENE_MISSING_OPTIONS),
    FieldDescriptor::new("imageIsMissing", "Is Missing", IsMissing)
        .param("is_missing")
        .options(IMAGE_MISSING_OPTIONS),
    FieldDescriptor::new("performerIsMissing", "Is Missing", IsMissing)
        .param("is_missing")
        .options(PERFORMER_MISSING_OPTIONS),
    FieldDescriptor::new("galleryIsMissing", "Is Missing", IsMissing)
        .param("is_missing")
        .options(GALLERY_MISSING_OPTIONS),
    FieldDescriptor::new("tagIsMissing", "Is Missing", IsMissing)
        .param("is_missing")
        .options(TAG_MISSING_OPTIONS),
    FieldDescriptor::new("studioIsMissing", "Is Missing", IsMissing)
        .param("is_missing")
        .options(STUDIO_MISSING_OPTIONS),
    FieldDescriptor::new("movieIsMissing", "Is Missing", IsMissing)
        .param("is_missing")
        .options(MOVIE_MISSING_OPTIONS),
    // Labeled ids
    FieldDescriptor::new("tags", "Tags", LabeledIds),
    FieldDescriptor::new("sceneTags", "Scene Tags", LabeledIds).param("scene_tags"),
    FieldDescriptor::new("performerTags", "Performer Tags", LabeledIds).param("performer_tags"),
    FieldDescriptor::new("performers", "Performers", LabeledIds),
    FieldDescriptor::new("studios", "Studios", LabeledIds),
    FieldDescriptor::new("parent_studios", "Parent Studios", LabeledIds).param("parents"),
    FieldDescriptor::new("movies", "Movies", LabeledIds),
    FieldDescriptor::new("galleries", "Galleries", LabeledIds),
];

const SCENE_FIELDS: &[&str] = &[
    "title",
    "path",
    "sceneChecksum",
    "oshash",
    "phash",
    "details",
    "url",
    "stash_id",
    "rating",
    "o_counter",
    "organized",
    "duration",
    "resolution",
    "hasMarkers",
    "sceneIsMissing",
    "interactive",
    "tags",
    "performerTags",
    "performers",
    "performer_count",
    "tag_count",
    "studios",
    "movies",
];

const IMAGE_FIELDS: &[&str] = &[
    "title",
    "path",
    "checksum",
    "rating",
    "o_counter",
    "organized",
    "resolution",
    "imageIsMissing",
    "tags",
    "performerTags",
    "performers",
    "performer_count",
    "tag_count",
    "studios",
    "galleries",
];

const GALLERY_FIELDS: &[&str] = &[
    "title",
    "path",
    "galleryChecksum",
    "details",
    "url",
    "rating",
    "organized",
    "average_resolution",
    "galleryIsMissing",
    "image_count",
    "tags",
    "performerTags",
    "performers",
    "performer_count",
    "tag_count",
    "studios",
];

const PERFORMER_FIELDS: &[&str] = &[
    "name",
    "aliases",
    "gender",
    "favorite",
    "birth_year",
    "death_year",
    "age",
    "ethnicity",
    "country",
    "hair_color",
    "eye_color",
    "height",
    "weight",
    "measurements",
    "fake_tits",
    "career_length",
    "tattoos",
    "piercings",
    "url",
    "stash_id",
    "rating",
    "performerIsMissing",
    "tags",
    "sceneTags",
    "tag_count",
    "scene_count",
    "image_count",
    "gallery_count",
];

const STUDIO_FIELDS: &[&str] = &[
    "name",
    "details",
    "url",
    "stash_id",
    "parent_studios",
    "studioIsMissing",
    "sceneTags",
    "scene_count",
    "image_count",
    "gallery_count",
];

const MOVIE_FIELDS: &[&str] = &[
    "name",
    "director",
    "synopsis",
    "url",
    "rating",
    "duration",
    "movieIsMissing",
    "studios",
    "performers",
    "scene_count",
];

const TAG_FIELDS: &[&str] = &[
    "name",
    "tagIsMissing",
    "scene_count",
    "marker_count",
    "image_count",
    "gallery_count",
    "performer_count",
];

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// Finds the descriptor for `field_id`.
///
/// # Errors
///
/// Returns [`CriteriaError::UnknownField`] for ids outside the closed set.
pub fn field(field_id: &str) -> Result<&'static FieldDescriptor, CriteriaError> {
    FIELDS
        .iter()
        .find(|f| f.id == field_id)
        .ok_or_else(|| CriteriaError::UnknownField {
            field: field_id.to_string(),
        })
}

/// Resolves a wire parameter name within `entity`'s field set.
#[must_use]
pub fn field_for_parameter(
    entity: EntityType,
    parameter_name: &str,
) -> Option<&'static FieldDescriptor> {
    entity
        .field_ids()
        .iter()
        .filter_map(|id| field(id).ok())
        .find(|f| f.parameter_name == parameter_name)
}

/// Static picker entry: display label plus the field it creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionOption {
    pub label: &'static str,
    pub field_id: &'static str,
}

/// Picker entries for `entity`, in display order.
#[must_use]
pub fn criterion_options(entity: EntityType) -> Vec<CriterionOption> {
    entity
        .field_ids()
        .iter()
        .filter_map(|id| field(id).ok())
        .map(|f| CriterionOption {
            label: f.label,
            field_id: f.id,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn field_ids_are_unique() {
        let mut seen = HashSet::new();
        for f in FIELDS {
            assert!(seen.insert(f.id), "duplicate field id {}", f.id);
        }
    }

    #[test]
    fn every_picker_entry_is_a_known_field() {
        for entity in EntityType::ALL {
            for id in entity.field_ids() {
                assert!(field(id).is_ok(), "{entity}: unknown field {id}");
            }
        }
    }

    #[test]
    fn every_field_is_offered_somewhere() {
        for f in FIELDS {
            assert!(
                EntityType::ALL
                    .iter()
                    .any(|e| e.field_ids().contains(&f.id)),
                "{} is not offered by any entity",
                f.id
            );
        }
    }

    #[test]
    fn parameter_names_are_unique_per_entity() {
        for entity in EntityType::ALL {
            let mut seen = HashSet::new();
            for id in entity.field_ids() {
                let f = field(id).unwrap();
                assert!(
                    seen.insert(f.parameter_name),
                    "{entity}: parameter {} used twice",
                    f.parameter_name
                );
            }
        }
    }

    #[test]
    fn enumerated_fields_have_options() {
        for f in FIELDS {
            assert_eq!(f.shape.is_enumerated(), !f.options.is_empty(), "{}", f.id);
        }
    }

    #[test]
    fn checksum_parameter_is_shared() {
        assert_eq!(field("sceneChecksum").unwrap().parameter_name, "checksum");
        assert_eq!(field("galleryChecksum").unwrap().parameter_name, "checksum");
        assert_eq!(field("checksum").unwrap().parameter_name, "checksum");
    }

    #[test]
    fn parameter_lookup_is_scoped_to_entity() {
        let scene = field_for_parameter(EntityType::Scene, "is_missing").unwrap();
        assert_eq!(scene.id, "sceneIsMissing");
        let movie = field_for_parameter(EntityType::Movie, "is_missing").unwrap();
        assert_eq!(movie.id, "movieIsMissing");
        assert_eq!(
            field_for_parameter(EntityType::Gallery, "checksum").unwrap().id,
            "galleryChecksum"
        );
        assert!(field_for_parameter(EntityType::Tag, "rating").is_none());
    }

    #[test]
    fn unknown_field_is_an_error() {
        assert_eq!(
            field("bitrate").unwrap_err(),
            CriteriaError::UnknownField {
                field: "bitrate".to_string()
            }
        );
    }

    #[test]
    fn criterion_options_follow_picker_order() {
        let options = criterion_options(EntityType::Studio);
        assert_eq!(options.len(), STUDIO_FIELDS.len());
        assert_eq!(
            options[0],
            CriterionOption {
                label: "Name",
                field_id: "name"
            }
        );
        assert_eq!(options[4].label, "Parent Studios");
    }

    #[test]
    fn entity_names_round_trip() {
        for entity in EntityType::ALL {
            assert_eq!(EntityType::from_name(entity.name()), Some(entity));
            let json = serde_json::to_string(&entity).unwrap();
            assert_eq!(json, format!("\"{}\"", entity.name()));
        }
    }
}
