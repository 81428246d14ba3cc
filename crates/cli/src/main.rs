//! intentgen: expand intent templates into a labeled training dataset
//!
//! Usage:
//!   intentgen ./dataset --samples-per-intent 200 --format json --seed 7

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use intentgen_core::{
    DatasetGenerator, EmptyIntentPolicy, GeneratorConfig, OutputFormat, RawDataset,
};
use intentgen_utils::{file_size, format_bytes, truncate_smart};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "intentgen")]
#[command(about = "Generate an intent classification and slot filling dataset from templates")]
struct Args {
    /// Dataset root holding <domain>/entities and <domain>/intents
    dataset: PathBuf,

    /// Examples to emit per intent
    #[arg(short = 'n', long)]
    samples_per_intent: Option<usize>,

    /// Repeat utterances to fill the quota when an intent has too few
    #[arg(short = 'd', long)]
    allow_duplicates: bool,

    /// Abort instead of skipping intents with nothing to sample
    #[arg(long)]
    fail_on_empty: bool,

    /// JSON generator config; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (defaults to the dataset root)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dataset file format
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Json,
    Bin,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => OutputFormat::Csv,
            Format::Json => OutputFormat::Json,
            Format::Bin => OutputFormat::Binary,
        }
    }
}

impl Args {
    fn generator_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => GeneratorConfig::load_json(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?,
            None => GeneratorConfig::default(),
        };

        if let Some(samples) = self.samples_per_intent {
            config = config.with_samples_per_intent(samples);
        }
        if self.allow_duplicates {
            config = config.with_duplicates(true);
        }
        if self.fail_on_empty {
            config = config.with_empty_intents(EmptyIntentPolicy::Fail);
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = args.generator_config()?;
    let generator = DatasetGenerator::new(config).context("Invalid generator configuration")?;

    let raw = RawDataset::load(&args.dataset)
        .with_context(|| format!("Failed to load dataset from {}", args.dataset.display()))?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let dataset = generator
        .generate(&raw, &mut rng)
        .context("Dataset generation failed")?;

    let short = dataset.report.shortfalls().count();
    if short > 0 {
        info!(
            intents = short,
            "{} of {} intents fell short of the requested quota",
            short,
            dataset.report.intents.len()
        );
    }

    if args.verbose {
        for example in dataset.examples.iter().take(5) {
            info!(
                intent = example.intent,
                labels = ?example.word_entities,
                "sample: {}",
                truncate_smart(&example.prompt, 80)
            );
        }
    }

    let output = args.output.clone().unwrap_or_else(|| args.dataset.clone());
    let path = dataset
        .save(&output, args.format.into())
        .with_context(|| format!("Failed to save dataset to {}", output.display()))?;

    let size = file_size(&path).map(format_bytes).unwrap_or_else(|_| "?".to_string());
    info!(
        "Wrote {} examples across {} intents to {} ({})",
        dataset.len(),
        dataset.intent_labels.len(),
        path.display(),
        size
    );

    Ok(())
}
