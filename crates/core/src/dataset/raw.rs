//! Raw entity and intent groups, and loading them from a dataset directory
//!
//! A dataset directory holds one sub-directory per domain:
//!
//! ```text
//! <root>/<domain>/entities/<name>.entity
//! <root>/<domain>/intents/<name>.intent
//! ```
//!
//! Every non-comment line of an entity file is a value; every non-comment
//! line of an intent file is a template.

use crate::dataset::{EntityId, LabelMap, Word, ENTITY_LABEL_OFFSET, INTENT_LABEL_OFFSET};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use intentgen_utils::{file_stem, is_comment, normalize_line};
use std::path::{Path, PathBuf};

/// Pattern for entity files under the dataset root
pub const ENTITY_PATTERN: &str = "*/entities/*.entity";

/// Pattern for intent files under the dataset root
pub const INTENT_PATTERN: &str = "*/intents/*.intent";

/// A named set of interchangeable values sharing one entity id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityGroup {
    /// Group name (file stem)
    pub name: String,

    /// Label carried by every value of the group
    pub id: EntityId,

    /// Values, each labeled with `id`
    pub values: Vec<Word>,
}

impl EntityGroup {
    /// Create a group, labeling every value with `id`
    pub fn new<I, S>(name: impl Into<String>, id: EntityId, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            id,
            values: values.into_iter().map(|v| Word::new(v, id)).collect(),
        }
    }
}

/// An intent and its utterance templates
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntentGroup {
    /// Intent name (file stem)
    pub name: String,

    /// Templates in file order
    pub templates: Vec<String>,
}

impl IntentGroup {
    /// Create an intent group
    pub fn new<I, S>(name: impl Into<String>, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            templates: templates.into_iter().map(Into::into).collect(),
        }
    }
}

/// Entity and intent groups in discovery order
#[derive(Clone, Debug)]
pub struct RawDataset {
    entities: IndexMap<String, EntityGroup>,
    intents: IndexMap<String, IntentGroup>,
    next_entity_id: EntityId,
}

impl RawDataset {
    /// Create an empty dataset
    pub fn new() -> Self {
        Self {
            entities: IndexMap::new(),
            intents: IndexMap::new(),
            next_entity_id: 1,
        }
    }

    /// Load every entity and intent file under `root`
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::MissingDatasetDirectory(root.to_path_buf()));
        }

        let mut dataset = Self::new();

        for path in discover(root, ENTITY_PATTERN)? {
            let (name, values) = read_group(&path)?;
            dataset.add_entity(name, values);
        }

        for path in discover(root, INTENT_PATTERN)? {
            let (name, templates) = read_group(&path)?;
            dataset.add_intent(name, templates);
        }

        tracing::info!(
            root = %root.display(),
            entities = dataset.entities.len(),
            intents = dataset.intents.len(),
            "loaded raw dataset"
        );

        Ok(dataset)
    }

    /// Add an entity group, assigning it the next entity id
    ///
    /// A repeated name replaces the earlier values but keeps the earlier
    /// discovery position. The id counter advances either way.
    pub fn add_entity<I, S>(&mut self, name: impl Into<String>, values: I) -> EntityId
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let id = self.next_entity_id;
        self.next_entity_id += 1;

        let group = EntityGroup::new(name, id, values);
        if self.entities.contains_key(&group.name) {
            tracing::warn!(entity = %group.name, id, "duplicate entity group replaces earlier values");
        }
        self.entities.insert(group.name.clone(), group);
        id
    }

    /// Add an intent group
    pub fn add_intent<I, S>(&mut self, name: impl Into<String>, templates: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let group = IntentGroup::new(name, templates);
        if self.intents.contains_key(&group.name) {
            tracing::warn!(intent = %group.name, "duplicate intent group replaces earlier templates");
        }
        self.intents.insert(group.name.clone(), group);
    }

    /// Builder form of [`RawDataset::add_entity`]
    pub fn with_entity<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_entity(name, values);
        self
    }

    /// Builder form of [`RawDataset::add_intent`]
    pub fn with_intent<I, S>(mut self, name: impl Into<String>, templates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_intent(name, templates);
        self
    }

    /// Entity groups keyed by name, in discovery order
    pub fn entities(&self) -> &IndexMap<String, EntityGroup> {
        &self.entities
    }

    /// Intent groups keyed by name, in discovery order
    pub fn intents(&self) -> &IndexMap<String, IntentGroup> {
        &self.intents
    }

    /// Look up an entity group
    pub fn entity(&self, name: &str) -> Option<&EntityGroup> {
        self.entities.get(name)
    }

    /// Intent label map, ids from 0
    pub fn intent_labels(&self) -> LabelMap {
        LabelMap::from_names(self.intents.keys().cloned(), INTENT_LABEL_OFFSET)
    }

    /// Entity label map, ids from 1
    ///
    /// Export only; word labels come from [`EntityGroup::id`].
    pub fn entity_labels(&self) -> LabelMap {
        LabelMap::from_names(self.entities.keys().cloned(), ENTITY_LABEL_OFFSET)
    }
}

impl Default for RawDataset {
    fn default() -> Self {
        Self::new()
    }
}

/// Wildcards never match hidden files or directories
const MATCH_OPTIONS: glob::MatchOptions = glob::MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: true,
};

fn discover(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = root.join(pattern).display().to_string();
    let mut paths = Vec::new();
    for entry in glob::glob_with(&full_pattern, MATCH_OPTIONS)? {
        paths.push(entry?);
    }
    Ok(paths)
}

fn read_group(path: &Path) -> Result<(String, Vec<String>)> {
    let name = file_stem(path).ok_or_else(|| {
        Error::Configuration(format!("invalid group file name: {}", path.display()))
    })?;

    let content = std::fs::read_to_string(path)?;
    let lines: Vec<String> = content
        .lines()
        .filter(|line| !is_comment(line))
        .map(normalize_line)
        .collect();

    tracing::debug!(group = %name, lines = lines.len(), path = %path.display(), "read group file");
    Ok((name, lines))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_follow_insertion() {
        let raw = RawDataset::new()
            .with_entity("song", ["yesterday"])
            .with_entity("city", ["paris", "new york"]);
        assert_eq!(raw.entity("song").unwrap().id, 1);
        assert_eq!(raw.entity("city").unwrap().id, 2);
        assert!(raw.entity("city").unwrap().values.iter().all(|w| w.label == 2));
    }

    #[test]
    fn test_duplicate_entity_keeps_position() {
        let raw = RawDataset::new()
            .with_entity("song", ["a"])
            .with_entity("city", ["b"])
            .with_entity("song", ["c"]);

        let names: Vec<_> = raw.entities().keys().cloned().collect();
        assert_eq!(names, vec!["song", "city"]);

        let song = raw.entity("song").unwrap();
        assert_eq!(song.id, 3);
        assert_eq!(song.values, vec![Word::new("c", 3)]);
    }

    #[test]
    fn test_label_maps() {
        let raw = RawDataset::new()
            .with_entity("song", ["a"])
            .with_entity("city", ["b"])
            .with_intent("play_music", ["play {song}"])
            .with_intent("weather", ["weather in {city}"]);

        let intents = raw.intent_labels();
        assert_eq!(intents.name(0), Some("play_music"));
        assert_eq!(intents.name(1), Some("weather"));

        let entities = raw.entity_labels();
        assert_eq!(entities.name(1), Some("song"));
        assert_eq!(entities.name(2), Some("city"));
    }

    #[test]
    fn test_load_missing_directory() {
        let result = RawDataset::load("/definitely/not/a/dataset");
        assert!(matches!(result, Err(Error::MissingDatasetDirectory(_))));
    }
}
