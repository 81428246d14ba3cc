//! Persisting generated datasets and label maps

use crate::dataset::{
    EntityId, Example, GeneratedDataset, LabelMap, ENTITY_LABEL_OFFSET, INTENT_LABEL_OFFSET,
};
use crate::error::{Error, Result};
use intentgen_utils::ensure_dir;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Intent label map file name
pub const INTENT_LABELS_FILE: &str = "intent_labels.json";

/// Entity label map file name
pub const ENTITY_LABELS_FILE: &str = "entity_labels.json";

/// Dataset file format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Delimited text with an index column
    #[default]
    Csv,

    /// Column-oriented JSON object
    Json,

    /// bincode-encoded row list
    Binary,
}

impl OutputFormat {
    /// File name the dataset is written to
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Csv => "dataset.csv",
            Self::Json => "dataset.json",
            Self::Binary => "dataset.bin",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "csv",
            Self::Json => "json",
            Self::Binary => "bin",
        };
        f.write_str(name)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "bin" | "binary" => Ok(Self::Binary),
            other => Err(Error::Configuration(format!("unknown output format: {}", other))),
        }
    }
}

/// Column-oriented table: `{"prompts": {"0": ...}, ...}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct ColumnTable {
    prompts: BTreeMap<usize, String>,
    prompt_intent: BTreeMap<usize, usize>,
    word_entities: BTreeMap<usize, Vec<EntityId>>,
}

impl ColumnTable {
    fn from_examples(examples: &[Example]) -> Self {
        let mut table = Self::default();
        for (row, ex) in examples.iter().enumerate() {
            table.prompts.insert(row, ex.prompt.clone());
            table.prompt_intent.insert(row, ex.intent);
            table.word_entities.insert(row, ex.word_entities.clone());
        }
        table
    }

    fn into_examples(mut self) -> Result<Vec<Example>> {
        let mut examples = Vec::with_capacity(self.prompts.len());
        for (row, prompt) in self.prompts {
            let intent = self.prompt_intent.remove(&row);
            let word_entities = self.word_entities.remove(&row);
            match (intent, word_entities) {
                (Some(intent), Some(word_entities)) => examples.push(Example {
                    prompt,
                    intent,
                    word_entities,
                }),
                _ => {
                    return Err(Error::Serialization(format!(
                        "row {} is missing a column",
                        row
                    )))
                }
            }
        }
        if !self.prompt_intent.is_empty() || !self.word_entities.is_empty() {
            return Err(Error::Serialization("columns have different lengths".to_string()));
        }
        Ok(examples)
    }
}

/// Reads and writes dataset artifacts in one directory
#[derive(Clone, Debug)]
pub struct DatasetStore {
    dir: PathBuf,
}

impl DatasetStore {
    /// Create a store rooted at `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the dataset file for a format
    pub fn dataset_path(&self, format: OutputFormat) -> PathBuf {
        self.dir.join(format.file_name())
    }

    /// Write both label maps as JSON
    pub fn save_maps(&self, intent_labels: &LabelMap, entity_labels: &LabelMap) -> Result<()> {
        ensure_dir(&self.dir)?;
        std::fs::write(
            self.dir.join(INTENT_LABELS_FILE),
            serde_json::to_string(intent_labels)?,
        )?;
        std::fs::write(
            self.dir.join(ENTITY_LABELS_FILE),
            serde_json::to_string(entity_labels)?,
        )?;
        Ok(())
    }

    /// Read both label maps
    pub fn load_maps(&self) -> Result<(LabelMap, LabelMap)> {
        let intents = std::fs::read_to_string(self.dir.join(INTENT_LABELS_FILE))?;
        let entities = std::fs::read_to_string(self.dir.join(ENTITY_LABELS_FILE))?;
        Ok((
            LabelMap::from_json(&intents, INTENT_LABEL_OFFSET)?,
            LabelMap::from_json(&entities, ENTITY_LABEL_OFFSET)?,
        ))
    }

    /// Write examples in the given format, returning the file path
    pub fn save_examples(&self, examples: &[Example], format: OutputFormat) -> Result<PathBuf> {
        ensure_dir(&self.dir)?;
        let path = self.dataset_path(format);

        match format {
            OutputFormat::Csv => write_csv(&path, examples)?,
            OutputFormat::Json => {
                let data = serde_json::to_string(&ColumnTable::from_examples(examples))?;
                std::fs::write(&path, data)?;
            }
            OutputFormat::Binary => {
                let data = bincode::serde::encode_to_vec(examples, bincode::config::standard())?;
                std::fs::write(&path, data)?;
            }
        }

        tracing::info!(path = %path.display(), rows = examples.len(), %format, "saved dataset");
        Ok(path)
    }

    /// Read examples written by [`DatasetStore::save_examples`]
    pub fn load_examples(&self, format: OutputFormat) -> Result<Vec<Example>> {
        let path = self.dataset_path(format);
        match format {
            OutputFormat::Csv => read_csv(&path),
            OutputFormat::Json => {
                let data = std::fs::read_to_string(&path)?;
                let table: ColumnTable = serde_json::from_str(&data)?;
                table.into_examples()
            }
            OutputFormat::Binary => {
                let data = std::fs::read(&path)?;
                let examples: Vec<Example> =
                    bincode::serde::decode_from_slice(&data, bincode::config::standard())?.0;
                Ok(examples)
            }
        }
    }
}

impl GeneratedDataset {
    /// Save label maps and examples under `dir`, returning the dataset path
    pub fn save(&self, dir: impl Into<PathBuf>, format: OutputFormat) -> Result<PathBuf> {
        let store = DatasetStore::new(dir);
        store.save_maps(&self.intent_labels, &self.entity_labels)?;
        store.save_examples(&self.examples, format)
    }
}

fn format_labels(labels: &[EntityId]) -> String {
    let inner = labels
        .iter()
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", inner)
}

fn parse_labels(field: &str) -> Result<Vec<EntityId>> {
    let inner = field
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| Error::Serialization(format!("malformed label list: {}", field)))?;

    inner
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<EntityId>()
                .map_err(|e| Error::Serialization(format!("bad label {:?}: {}", s, e)))
        })
        .collect()
}

fn write_csv(path: &Path, examples: &[Example]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["", "prompts", "prompt_intent", "word_entities"])?;
    for (row, ex) in examples.iter().enumerate() {
        writer.write_record([
            row.to_string(),
            ex.prompt.clone(),
            ex.intent.to_string(),
            format_labels(&ex.word_entities),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn read_csv(path: &Path) -> Result<Vec<Example>> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut examples = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let field = |col: usize| {
            record
                .get(col)
                .ok_or_else(|| Error::Serialization(format!("row {} has no column {}", idx, col)))
        };

        let intent = field(2)?
            .parse::<usize>()
            .map_err(|e| Error::Serialization(format!("row {}: bad intent: {}", idx, e)))?;

        examples.push(Example {
            prompt: field(1)?.to_string(),
            intent,
            word_entities: parse_labels(field(3)?)?,
        });
    }

    Ok(examples)
}
