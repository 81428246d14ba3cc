//! Dataset generation pipeline
//!
//! Stages, in order: [`RawDataset`] loading, [`LabelMap`] indexing,
//! [`SlotFiller`], [`Permutations`] expansion, label redistribution into
//! [`LabeledUtterance`]s, and [`Sampler`] assembly into [`Example`]s.

pub mod word;
pub mod label;
pub mod raw;
pub mod template;
pub mod slot;
pub mod expand;
pub mod redistribute;
pub mod sampler;
pub mod generator;
pub mod store;

pub use word::*;
pub use label::*;
pub use raw::*;
pub use template::*;
pub use slot::*;
pub use expand::*;
pub use redistribute::*;
pub use sampler::*;
pub use generator::*;
pub use store::*;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// What to do when an intent has no utterances left to sample from
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyIntentPolicy {
    /// Emit zero examples for the intent and log a warning
    #[default]
    Skip,

    /// Abort the whole run
    Fail,
}

/// Generator configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Number of examples to emit per intent
    pub samples_per_intent: usize,

    /// Whether the quota may be filled by repeating utterances when an
    /// intent expands to fewer utterances than the quota
    pub allow_duplicates: bool,

    /// Behaviour when sampling from an intent with no utterances
    pub empty_intents: EmptyIntentPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            samples_per_intent: 10,
            allow_duplicates: false,
            empty_intents: EmptyIntentPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Create default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-intent quota
    pub fn with_samples_per_intent(mut self, samples: usize) -> Self {
        self.samples_per_intent = samples;
        self
    }

    /// Allow/disallow duplicates
    pub fn with_duplicates(mut self, allow: bool) -> Self {
        self.allow_duplicates = allow;
        self
    }

    /// Set the empty intent policy
    pub fn with_empty_intents(mut self, policy: EmptyIntentPolicy) -> Self {
        self.empty_intents = policy;
        self
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.samples_per_intent == 0 {
            return Err(Error::Configuration(
                "samples_per_intent must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Load from JSON file
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self> {
        let data = std::fs::read_to_string(path.as_ref())?;
        let config: GeneratorConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = GeneratorConfig::default();
        assert_eq!(config.samples_per_intent, 10);
        assert!(!config.allow_duplicates);
        assert_eq!(config.empty_intents, EmptyIntentPolicy::Skip);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = GeneratorConfig::new()
            .with_samples_per_intent(250)
            .with_duplicates(true)
            .with_empty_intents(EmptyIntentPolicy::Fail);
        assert_eq!(config.samples_per_intent, 250);
        assert!(config.allow_duplicates);
        assert_eq!(config.empty_intents, EmptyIntentPolicy::Fail);
    }

    #[test]
    fn test_config_rejects_zero_quota() {
        let config = GeneratorConfig::new().with_samples_per_intent(0);
        assert!(matches!(config.validate(), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_config_json_partial() {
        let config: GeneratorConfig =
            serde_json::from_str(r#"{"samples_per_intent": 3, "empty_intents": "fail"}"#).unwrap();
        assert_eq!(config.samples_per_intent, 3);
        assert!(!config.allow_duplicates);
        assert_eq!(config.empty_intents, EmptyIntentPolicy::Fail);
    }

    #[test]
    fn test_config_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = GeneratorConfig::new().with_samples_per_intent(7);
        config.save_json(&path).unwrap();
        assert_eq!(GeneratorConfig::load_json(&path).unwrap(), config);
    }
}
