//! Pipeline orchestration: raw groups in, labeled examples out

use crate::dataset::{
    expand_intent, redistribute, Example, FilledTemplate, GeneratorConfig, LabelMap, RawDataset,
    SampleOutcome, Sampler, SlotFiller,
};
use crate::error::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Per-intent generation statistics
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntentReport {
    /// Intent name
    pub intent: String,

    /// Number of templates
    pub templates: usize,

    /// Utterances produced by expansion
    pub expanded: usize,

    /// Utterances carrying per-word labels
    pub labeled: usize,

    /// Examples emitted after sampling
    pub emitted: usize,

    /// How the quota was met
    pub outcome: SampleOutcome,
}

/// Statistics for a generation run, intents in discovery order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// One entry per intent
    pub intents: Vec<IntentReport>,
}

impl GenerationReport {
    /// Total examples emitted
    pub fn total_emitted(&self) -> usize {
        self.intents.iter().map(|r| r.emitted).sum()
    }

    /// Total utterances produced by expansion
    pub fn total_expanded(&self) -> usize {
        self.intents.iter().map(|r| r.expanded).sum()
    }

    /// Intents that did not reach the quota
    pub fn shortfalls(&self) -> impl Iterator<Item = &IntentReport> {
        self.intents
            .iter()
            .filter(|r| !matches!(r.outcome, SampleOutcome::Quota))
    }

    /// Report for a single intent
    pub fn intent(&self, name: &str) -> Option<&IntentReport> {
        self.intents.iter().find(|r| r.intent == name)
    }
}

/// Output of a generation run
#[derive(Clone, Debug)]
pub struct GeneratedDataset {
    /// Examples, grouped by intent in discovery order
    pub examples: Vec<Example>,

    /// Intent id → name
    pub intent_labels: LabelMap,

    /// Entity id → name
    pub entity_labels: LabelMap,

    /// Run statistics
    pub report: GenerationReport,
}

impl GeneratedDataset {
    /// Examples belonging to one intent index
    pub fn examples_for_intent(&self, intent: usize) -> impl Iterator<Item = &Example> {
        self.examples.iter().filter(move |ex| ex.intent == intent)
    }

    /// Check if no examples were produced
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Number of examples
    pub fn len(&self) -> usize {
        self.examples.len()
    }
}

/// Turns a [`RawDataset`] into labeled examples
#[derive(Clone, Debug)]
pub struct DatasetGenerator {
    config: GeneratorConfig,
}

impl DatasetGenerator {
    /// Create a generator, validating the configuration
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Generator configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Run the whole pipeline
    ///
    /// Every template is slot-filled before any sampling, so an unknown
    /// entity reference aborts the run without producing examples.
    pub fn generate<R>(&self, raw: &RawDataset, rng: &mut R) -> Result<GeneratedDataset>
    where
        R: Rng + ?Sized,
    {
        let intent_labels = raw.intent_labels();
        let entity_labels = raw.entity_labels();

        let filler = SlotFiller::new(raw.entities());
        let filled = raw
            .intents()
            .values()
            .map(|intent| Ok((intent.name.as_str(), filler.fill_intent(intent)?)))
            .collect::<Result<Vec<(&str, Vec<FilledTemplate>)>>>()?;

        let sampler = Sampler::new(&self.config);
        let mut examples = Vec::new();
        let mut report = GenerationReport::default();

        for (intent, templates) in &filled {
            let expanded = expand_intent(templates);
            let labeled = redistribute(&expanded);

            let (intent_examples, outcome) =
                sampler.assemble(intent, &labeled, &intent_labels, rng)?;

            tracing::debug!(
                intent,
                templates = templates.len(),
                expanded = expanded.len(),
                emitted = intent_examples.len(),
                "generated intent"
            );

            report.intents.push(IntentReport {
                intent: intent.to_string(),
                templates: templates.len(),
                expanded: expanded.len(),
                labeled: labeled.len(),
                emitted: intent_examples.len(),
                outcome,
            });
            examples.extend(intent_examples);
        }

        tracing::info!(
            intents = report.intents.len(),
            expanded = report.total_expanded(),
            examples = examples.len(),
            "generated dataset"
        );

        Ok(GeneratedDataset {
            examples,
            intent_labels,
            entity_labels,
            report,
        })
    }
}
