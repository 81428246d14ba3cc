//! Per-intent sampling and assembly of final examples

use crate::dataset::{EmptyIntentPolicy, EntityId, GeneratorConfig, LabelMap, LabeledUtterance};
use crate::error::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A final dataset row
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// Utterance text, words joined by single spaces
    #[serde(rename = "prompts")]
    pub prompt: String,

    /// Position of the owning intent in the intent label map
    #[serde(rename = "prompt_intent")]
    pub intent: usize,

    /// One entity label per word of `prompt`
    pub word_entities: Vec<EntityId>,
}

impl Example {
    /// Assemble from a labeled utterance
    pub fn assemble(utterance: &LabeledUtterance, intent: usize) -> Self {
        Self {
            prompt: utterance.text(),
            intent,
            word_entities: utterance.labels(),
        }
    }

    /// Words of the prompt
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.prompt.split_whitespace()
    }
}

/// How an intent's quota was satisfied
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SampleOutcome {
    /// Exactly the quota was drawn, with replacement
    Quota,

    /// Duplicates disallowed and too few utterances: all of them were kept
    Shortfall {
        /// Utterances available
        available: usize,
        /// Quota requested
        requested: usize,
    },

    /// Nothing to draw from; the intent was skipped
    Empty,
}

/// Draws a bounded number of utterances per intent
#[derive(Clone, Copy, Debug)]
pub struct Sampler<'a> {
    config: &'a GeneratorConfig,
}

impl<'a> Sampler<'a> {
    /// Create a sampler for a configuration
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self { config }
    }

    /// Select utterances for one intent
    ///
    /// With duplicates disallowed and fewer utterances than the quota, every
    /// utterance is taken once. Otherwise the quota is drawn uniformly with
    /// replacement, so repeats are possible even when enough distinct
    /// utterances exist.
    pub fn sample<'u, R>(
        &self,
        intent: &str,
        utterances: &'u [LabeledUtterance],
        rng: &mut R,
    ) -> Result<(Vec<&'u LabeledUtterance>, SampleOutcome)>
    where
        R: Rng + ?Sized,
    {
        let requested = self.config.samples_per_intent;
        let available = utterances.len();

        if !self.config.allow_duplicates && available < requested {
            tracing::warn!(
                intent,
                available,
                requested,
                "not enough utterances generated from templates, limiting samples"
            );
            return Ok((
                utterances.iter().collect(),
                SampleOutcome::Shortfall { available, requested },
            ));
        }

        if available == 0 {
            return match self.config.empty_intents {
                EmptyIntentPolicy::Skip => {
                    tracing::warn!(intent, "no utterances to sample, skipping intent");
                    Ok((Vec::new(), SampleOutcome::Empty))
                }
                EmptyIntentPolicy::Fail => Err(Error::EmptyPopulation {
                    intent: intent.to_string(),
                }),
            };
        }

        let drawn = (0..requested)
            .map(|_| &utterances[rng.gen_range(0..available)])
            .collect();
        Ok((drawn, SampleOutcome::Quota))
    }

    /// Sample one intent and assemble its examples
    pub fn assemble<R>(
        &self,
        intent: &str,
        utterances: &[LabeledUtterance],
        intent_labels: &LabelMap,
        rng: &mut R,
    ) -> Result<(Vec<Example>, SampleOutcome)>
    where
        R: Rng + ?Sized,
    {
        let index = intent_labels
            .position(intent)
            .ok_or_else(|| Error::UnknownIntent(intent.to_string()))?;

        let (selected, outcome) = self.sample(intent, utterances, rng)?;
        let examples = selected
            .into_iter()
            .map(|utterance| Example::assemble(utterance, index))
            .collect();
        Ok((examples, outcome))
    }
}
