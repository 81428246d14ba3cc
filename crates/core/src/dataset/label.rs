//! Integer/name label maps for intents and entity groups

use crate::error::{Error, Result};
use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// First id of the intent label map
pub const INTENT_LABEL_OFFSET: usize = 0;

/// First id of the entity label map
pub const ENTITY_LABEL_OFFSET: usize = 1;

/// Bidirectional mapping between sequential ids and names
///
/// Ids start at `offset` and follow the order the names were supplied in.
/// Serializes as a flat object keyed by id, e.g. `{"0": "play_music"}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelMap {
    offset: usize,
    names: Vec<String>,
}

impl LabelMap {
    /// Build a map assigning `offset`, `offset + 1`, ... in iteration order
    pub fn from_names<I, S>(names: I, offset: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            offset,
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// First id in the map
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Name for an id
    pub fn name(&self, id: usize) -> Option<&str> {
        id.checked_sub(self.offset)
            .and_then(|idx| self.names.get(idx))
            .map(String::as_str)
    }

    /// Id for a name
    pub fn id(&self, name: &str) -> Option<usize> {
        self.position(name).map(|pos| pos + self.offset)
    }

    /// Position of a name among the map's values, ignoring the offset
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    /// Names in id order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterate `(id, name)` pairs in id order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .map(move |(idx, name)| (idx + self.offset, name.as_str()))
    }

    /// Number of labels
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the map is empty
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Parse a flat JSON object whose ids must start at `offset`
    ///
    /// Unlike plain deserialization, an empty object keeps `offset`.
    pub fn from_json(data: &str, offset: usize) -> Result<Self> {
        let entries: BTreeMap<usize, String> = serde_json::from_str(data)?;
        Self::from_entries(entries, Some(offset))
    }

    fn from_entries(entries: BTreeMap<usize, String>, offset: Option<usize>) -> Result<Self> {
        let offset = offset
            .or_else(|| entries.keys().next().copied())
            .unwrap_or(0);
        for (expected, id) in (offset..).zip(entries.keys()) {
            if *id != expected {
                return Err(Error::Serialization(format!(
                    "label ids must be contiguous, expected {} but found {}",
                    expected, id
                )));
            }
        }
        Ok(Self {
            offset,
            names: entries.into_values().collect(),
        })
    }
}

impl Serialize for LabelMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.names.len()))?;
        for (id, name) in self.iter() {
            map.serialize_entry(&id, name)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LabelMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let entries = BTreeMap::<usize, String>::deserialize(deserializer)?;
        LabelMap::from_entries(entries, None).map_err(serde::de::Error::custom)
    }
}
