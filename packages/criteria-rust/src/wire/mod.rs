//! Wire representation of a filter as exchanged with the query API.
//!
//! A wire filter is a map from parameter name to a `{modifier, value}` term.
//! Map key order is the order of the criteria it was built from, so the
//! same criteria always produce byte-identical output.
//!
//! ```json
//! {
//!   "rating":     { "modifier": "BETWEEN", "value": { "lower": 2, "upper": 4 } },
//!   "performers": { "modifier": "INCLUDES", "value": ["7", "12"] },
//!   "is_missing": { "modifier": "EQUALS", "value": "studio" }
//! }
//! ```

mod codec;
mod coerce;
mod project;

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::modifier::CriterionModifier;
use crate::value::NumberValue;

pub use codec::{decode, encode, WireFormat};
pub use coerce::coerce;
pub use project::{project_value, Projection};

// ---------------------------------------------------------------------------
// WireValue / WireTerm
// ---------------------------------------------------------------------------

/// Shape-specific value of a wire term.
///
/// Serialization only ever produces `Flag`, `Text`, `Ids` and `Range`. The
/// scalar number variants exist so hand-written or older saved filters can be
/// read and coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireValue {
    Flag(bool),
    Integer(i64),
    Decimal(f64),
    Text(String),
    Ids(Vec<String>),
    Range(NumberValue),
}

impl WireValue {
    /// Short description used in diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Flag(b) => format!("flag {b}"),
            Self::Integer(n) => format!("integer {n}"),
            Self::Decimal(n) => format!("decimal {n}"),
            Self::Text(s) => format!("text {s:?}"),
            Self::Ids(ids) => format!("id list of {}", ids.len()),
            Self::Range(_) => "range".to_string(),
        }
    }
}

/// One filter term: the modifier plus its value, if the modifier takes one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireTerm {
    pub modifier: CriterionModifier,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<WireValue>,
}

impl WireTerm {
    #[must_use]
    pub fn new(modifier: CriterionModifier, value: Option<WireValue>) -> Self {
        Self { modifier, value }
    }
}

// ---------------------------------------------------------------------------
// WireFilter
// ---------------------------------------------------------------------------

/// Ordered map from parameter name to [`WireTerm`].
///
/// Decoding is lenient per entry: an entry whose value is not a well-formed
/// term is recorded in [`malformed`](WireFilter::malformed) instead of failing
/// the whole document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireFilter {
    terms: Vec<(String, WireTerm)>,
    malformed: Vec<String>,
}

impl WireFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the term for `parameter`. An existing entry is replaced in place
    /// and returned; a new one is appended.
    pub fn insert(&mut self, parameter: impl Into<String>, term: WireTerm) -> Option<WireTerm> {
        let parameter = parameter.into();
        if let Some(slot) = self.terms.iter_mut().find(|(p, _)| *p == parameter) {
            return Some(std::mem::replace(&mut slot.1, term));
        }
        self.terms.push((parameter, term));
        None
    }

    #[must_use]
    pub fn get(&self, parameter: &str) -> Option<&WireTerm> {
        self.terms
            .iter()
            .find(|(p, _)| p == parameter)
            .map(|(_, term)| term)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WireTerm)> {
        self.terms.iter().map(|(p, term)| (p.as_str(), term))
    }

    /// Parameter names in order.
    pub fn parameters(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(p, _)| p.as_str())
    }

    /// Parameter names whose entries could not be read as a term.
    #[must_use]
    pub fn malformed(&self) -> &[String] {
        &self.malformed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl FromIterator<(String, WireTerm)> for WireFilter {
    fn from_iter<I: IntoIterator<Item = (String, WireTerm)>>(iter: I) -> Self {
        let mut filter = Self::new();
        for (parameter, term) in iter {
            filter.insert(parameter, term);
        }
        filter
    }
}

impl Serialize for WireFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.terms.len()))?;
        for (parameter, term) in &self.terms {
            map.serialize_entry(parameter, term)?;
        }
        map.end()
    }
}

/// Either a readable term or anything else, so one bad entry does not fail
/// the whole map.
#[derive(Deserialize)]
#[serde(untagged)]
enum TermSlot {
    Term(WireTerm),
    Malformed(IgnoredAny),
}

struct WireFilterVisitor;

impl<'de> Visitor<'de> for WireFilterVisitor {
    type Value = WireFilter;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of parameter name to filter term")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut filter = WireFilter::new();
        while let Some(parameter) = access.next_key::<String>()? {
            match access.next_value::<TermSlot>()? {
                TermSlot::Term(term) => {
                    filter.insert(parameter, term);
                }
                TermSlot::Malformed(IgnoredAny) => filter.malformed.push(parameter),
            }
        }
        Ok(filter)
    }
}

impl<'de> Deserialize<'de> for WireFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(WireFilterVisitor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn range(lower: i64, upper: i64) -> WireValue {
        WireValue::Range(NumberValue {
            exact: None,
            lower: Some(lower),
            upper: Some(upper),
        })
    }

    #[test]
    fn serializes_in_insertion_order() {
        let mut filter = WireFilter::new();
        filter.insert(
            "title",
            WireTerm::new(
                CriterionModifier::Includes,
                Some(WireValue::Text("beach".into())),
            ),
        );
        filter.insert("rating", WireTerm::new(CriterionModifier::Between, Some(range(2, 4))));
        filter.insert("is_missing", WireTerm::new(CriterionModifier::IsNull, None));

        let json = serde_json::to_string(&filter).unwrap();
        assert_eq!(
            json,
            r#"{"title":{"modifier":"INCLUDES","value":"beach"},"rating":{"modifier":"BETWEEN","value":{"lower":2,"upper":4}},"is_missing":{"modifier":"IS_NULL"}}"#
        );
    }

    #[test]
    fn deserializes_preserving_order() {
        let json = r#"{"z":{"modifier":"EQUALS","value":"1"},"a":{"modifier":"EQUALS","value":"2"}}"#;
        let filter: WireFilter = serde_json::from_str(json).unwrap();
        let params: Vec<&str> = filter.parameters().collect();
        assert_eq!(params, vec!["z", "a"]);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut filter = WireFilter::new();
        filter.insert("a", WireTerm::new(CriterionModifier::Equals, None));
        filter.insert("b", WireTerm::new(CriterionModifier::Equals, None));
        let old = filter.insert("a", WireTerm::new(CriterionModifier::NotEquals, None));
        assert_eq!(old.unwrap().modifier, CriterionModifier::Equals);
        let params: Vec<&str> = filter.parameters().collect();
        assert_eq!(params, vec!["a", "b"]);
        assert_eq!(filter.get("a").unwrap().modifier, CriterionModifier::NotEquals);
    }

    #[test]
    fn malformed_entries_are_set_aside() {
        let json = r#"{
            "rating": {"modifier": "EQUALS", "value": {"exact": 3}},
            "title": {"modifier": "SOUNDS_LIKE", "value": "x"},
            "tags": 17,
            "organized": {"modifier": "EQUALS", "value": true}
        }"#;
        let filter: WireFilter = serde_json::from_str(json).unwrap();
        let params: Vec<&str> = filter.parameters().collect();
        assert_eq!(params, vec!["rating", "organized"]);
        assert_eq!(filter.malformed(), &["title".to_string(), "tags".to_string()]);
    }

    #[test]
    fn non_map_document_is_an_error() {
        assert!(serde_json::from_str::<WireFilter>("[1, 2]").is_err());
    }

    #[test]
    fn wire_value_variants_decode_by_json_type() {
        let v: WireValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, WireValue::Flag(true));
        let v: WireValue = serde_json::from_str("12").unwrap();
        assert_eq!(v, WireValue::Integer(12));
        let v: WireValue = serde_json::from_str("12.5").unwrap();
        assert_eq!(v, WireValue::Decimal(12.5));
        let v: WireValue = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(v, WireValue::Text("12".into()));
        let v: WireValue = serde_json::from_str(r#"["1","2"]"#).unwrap();
        assert_eq!(v, WireValue::Ids(vec!["1".into(), "2".into()]));
        let v: WireValue = serde_json::from_str(r#"{"upper":9}"#).unwrap();
        assert_eq!(
            v,
            WireValue::Range(NumberValue {
                exact: None,
                lower: None,
                upper: Some(9),
            })
        );
    }

    #[test]
    fn range_with_unknown_keys_is_not_a_value() {
        assert!(serde_json::from_str::<WireValue>(r#"{"min":1}"#).is_err());
    }

    #[test]
    fn absent_range_slots_are_omitted() {
        let json = serde_json::to_string(&WireValue::Range(NumberValue {
            exact: Some(5),
            lower: None,
            upper: None,
        }))
        .unwrap();
        assert_eq!(json, r#"{"exact":5}"#);
    }
}
