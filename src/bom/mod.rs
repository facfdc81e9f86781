//! Component records and the merge → filter → dedup stages of the BOM.
//!
//! A [`ComponentRecord`] is an insertion-ordered map of named fields. The
//! order matters only for output column discovery; equality between records
//! never depends on it.

pub mod dedup;
pub mod filter;
pub mod footprint;
pub mod merge;
pub mod natural;

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

pub use dedup::deduplicate;
pub use filter::retain_physical;
pub use footprint::split_footprints;
pub use merge::merge_components;

/// Well-known field names.
pub mod fields {
    pub const DESIGNATOR: &str = "Designator";
    pub const QUANTITY: &str = "Quantity";
    pub const VALUE: &str = "Value";
    pub const FOOTPRINT: &str = "Footprint";
    pub const FOOTPRINT_LIB: &str = "Footprint-lib";
    pub const FOOTPRINT_PART: &str = "Footprint-part";
    pub const NAME: &str = "Name";
    pub const MANUFACTURER: &str = "Manufacturer";
    pub const MPN: &str = "MPN";
    pub const LINK: &str = "Link";
    pub const COMPONENT_TYPE: &str = "Component type";
    pub const SMD_PADS: &str = "SMD pads";
    pub const THT_PADS: &str = "THT pads";
    pub const PCB_SIDE: &str = "PCB side";
}

/// Fields that do not take part in the equality check during grouping.
pub const IGNORED_FIELDS: [&str; 2] = [fields::DESIGNATOR, fields::QUANTITY];

/// Value of a single component field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Text(String),
    Count(u32),
}

impl FieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Count(_) => None,
        }
    }

    pub fn as_count(&self) -> Option<u32> {
        match self {
            FieldValue::Count(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Count(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        FieldValue::Count(n)
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Text(s) => serializer.serialize_str(s),
            FieldValue::Count(n) => serializer.serialize_u32(*n),
        }
    }
}

/// One physical placement on the board, or after deduplication, one BOM line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentRecord {
    fields: Vec<(String, FieldValue)>,
}

/// Canonical form of a record with the ignored fields removed, sorted by
/// field name. Two records share a key iff [`ComponentRecord::is_equivalent`]
/// holds for them.
pub type GroupKey = Vec<(String, FieldValue)>;

impl ComponentRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record with the three always-present fields.
    pub fn with_basics(designator: &str, value: &str, footprint: &str) -> Self {
        let mut record = Self::new();
        record.set(fields::DESIGNATOR, designator);
        record.set(fields::VALUE, value);
        record.set(fields::FOOTPRINT, footprint);
        record
    }

    /// Set a field, replacing an existing value in place.
    pub fn set(&mut self, name: &str, value: impl Into<FieldValue>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(k, _)| k == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.iter().find(|(k, _)| k == name).map(|(_, v)| v)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(FieldValue::as_text)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The designator, or an empty string if the record has none.
    pub fn designator(&self) -> &str {
        self.text(fields::DESIGNATOR).unwrap_or("")
    }

    pub fn quantity(&self) -> u32 {
        self.get(fields::QUANTITY)
            .and_then(FieldValue::as_count)
            .unwrap_or(0)
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Structural equality ignoring the `ignored` field names.
    ///
    /// The reduced key sets must have the same size, and every key of this
    /// record's reduced set must be present in `other` with an equal value.
    pub fn is_equivalent(&self, other: &ComponentRecord, ignored: &[&str]) -> bool {
        let reduced = |r: &ComponentRecord| {
            r.fields
                .iter()
                .filter(|(k, _)| !ignored.contains(&k.as_str()))
                .count()
        };

        if reduced(self) != reduced(other) {
            return false;
        }

        self.fields
            .iter()
            .filter(|(k, _)| !ignored.contains(&k.as_str()))
            .all(|(k, v)| other.get(k) == Some(v))
    }

    /// Canonical grouping key: non-ignored fields sorted by name.
    pub fn group_key(&self, ignored: &[&str]) -> GroupKey {
        let mut key: GroupKey = self
            .fields
            .iter()
            .filter(|(k, _)| !ignored.contains(&k.as_str()))
            .cloned()
            .collect();
        key.sort_by(|(a, _), (b, _)| a.cmp(b));
        key
    }
}

impl Serialize for ComponentRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
