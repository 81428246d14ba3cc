//! Common test utilities

#![allow(dead_code)]

use intentgen_core::RawDataset;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use tempfile::TempDir;

/// Seeded RNG so sampling is deterministic
pub fn rng() -> StdRng {
    StdRng::seed_from_u64(0x5eed)
}

/// Music and weather domains, built in memory
pub fn music_and_weather() -> RawDataset {
    RawDataset::new()
        .with_entity("song", ["yesterday", "let it be"])
        .with_entity("city", ["new york", ""])
        .with_intent("play_music", ["play {song}"])
        .with_intent("weather", ["weather in {city}"])
}

/// Write a file, creating parent directories
pub fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// A dataset directory with two domains on disk
pub fn dataset_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write_file(
        root,
        "music/entities/song.entity",
        "# songs\nYesterday\nLet It Be  \n",
    );
    write_file(root, "music/intents/play_music.intent", "# templates\nplay {song}\nput on {song} please\n");
    write_file(root, "weather/entities/city.entity", "New York\n\nparis\n");
    write_file(root, "weather/intents/weather.intent", "weather in {city}\n");

    dir
}
