//! Saving and reloading generated datasets

mod common;

use intentgen_core::{
    DatasetGenerator, DatasetStore, GeneratedDataset, GeneratorConfig, OutputFormat, RawDataset,
    ENTITY_LABELS_FILE, ENTITY_LABEL_OFFSET, INTENT_LABELS_FILE,
};

fn generated() -> GeneratedDataset {
    let generator = DatasetGenerator::new(
        GeneratorConfig::new().with_samples_per_intent(4).with_duplicates(true),
    )
    .unwrap();
    generator
        .generate(&common::music_and_weather(), &mut common::rng())
        .unwrap()
}

#[test]
fn test_save_writes_label_maps() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = generated();
    dataset.save(dir.path(), OutputFormat::Csv).unwrap();

    let intents = std::fs::read_to_string(dir.path().join(INTENT_LABELS_FILE)).unwrap();
    assert_eq!(intents, r#"{"0":"play_music","1":"weather"}"#);

    let entities = std::fs::read_to_string(dir.path().join(ENTITY_LABELS_FILE)).unwrap();
    assert_eq!(entities, r#"{"1":"song","2":"city"}"#);

    let (intent_labels, entity_labels) = DatasetStore::new(dir.path()).load_maps().unwrap();
    assert_eq!(intent_labels, dataset.intent_labels);
    assert_eq!(entity_labels, dataset.entity_labels);
}

#[test]
fn test_csv_layout() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = generated();
    let path = dataset.save(dir.path(), OutputFormat::Csv).unwrap();
    assert_eq!(path, dir.path().join("dataset.csv"));

    let content = std::fs::read_to_string(&path).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some(",prompts,prompt_intent,word_entities"));
    let first = lines.next().unwrap();
    assert!(first.starts_with("0,"));
    assert!(first.ends_with("]\""));
}

#[test]
fn test_every_format_reloads() {
    let dataset = generated();
    for format in [OutputFormat::Csv, OutputFormat::Json, OutputFormat::Binary] {
        let dir = tempfile::tempdir().unwrap();
        dataset.save(dir.path(), format).unwrap();

        let loaded = DatasetStore::new(dir.path()).load_examples(format).unwrap();
        assert_eq!(loaded, dataset.examples, "format {}", format);
    }
}

#[test]
fn test_save_creates_output_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("out").join("v1");
    generated().save(&nested, OutputFormat::Json).unwrap();
    assert!(nested.join("dataset.json").is_file());
    assert!(nested.join(INTENT_LABELS_FILE).is_file());
}

#[test]
fn test_empty_entity_map_reloads_with_its_offset() {
    let raw = RawDataset::new().with_intent("greet", ["hello there"]);
    let generator =
        DatasetGenerator::new(GeneratorConfig::new().with_samples_per_intent(2)).unwrap();
    let dataset = generator.generate(&raw, &mut common::rng()).unwrap();

    let dir = tempfile::tempdir().unwrap();
    dataset.save(dir.path(), OutputFormat::Json).unwrap();
    let entities = std::fs::read_to_string(dir.path().join(ENTITY_LABELS_FILE)).unwrap();
    assert_eq!(entities, "{}");

    let (intent_labels, entity_labels) = DatasetStore::new(dir.path()).load_maps().unwrap();
    assert_eq!(intent_labels, dataset.intent_labels);
    assert_eq!(entity_labels.offset(), ENTITY_LABEL_OFFSET);
    assert_eq!(entity_labels, dataset.entity_labels);
}

#[test]
fn test_load_maps_rejects_shifted_entity_ids() {
    let dir = tempfile::tempdir().unwrap();
    generated().save(dir.path(), OutputFormat::Json).unwrap();
    std::fs::write(dir.path().join(ENTITY_LABELS_FILE), r#"{"0":"song","1":"city"}"#).unwrap();

    assert!(DatasetStore::new(dir.path()).load_maps().is_err());
}
