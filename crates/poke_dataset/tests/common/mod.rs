//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use poke_dataset::extra_data::SpeciesOverrides;
use poke_dataset::{ExportConfig, ModSource};
use serde_json::{json, Value};
use showdown_data::{DexTables, Generation, ModLearnsets};

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Config reading the fixture dumps and extra data, writing to `out_dir`.
pub fn fixture_config(out_dir: &Path) -> ExportConfig {
    let fixtures = fixtures_dir();
    ExportConfig {
        data_dir: fixtures.join("data"),
        showdown_dir: fixtures.join("showdown"),
        out_dir: out_dir.to_path_buf(),
        generations: vec![1, 8],
        mods: vec![ModSource {
            gen: 8,
            name: "gen8bdsp".to_string(),
        }],
        pretty_print: true,
    }
}

pub fn read_output(out_dir: &Path, file: &str) -> Value {
    let json = fs::read_to_string(out_dir.join(file))
        .unwrap_or_else(|e| panic!("failed to read {}: {}", file, e));
    serde_json::from_str(&json).unwrap()
}

/// Minimal species entry.
pub fn species(num: i32, name: &str) -> Value {
    json!({
        "num": num,
        "name": name,
        "types": ["Normal"],
        "baseStats": {"hp": 50, "atk": 50, "def": 50, "spa": 50, "spd": 50, "spe": 50}
    })
}

/// `species` with extra fields merged in.
pub fn species_with(num: i32, name: &str, fields: Value) -> Value {
    let mut value = species(num, name);
    if let (Some(target), Value::Object(extra)) = (value.as_object_mut(), fields) {
        target.extend(extra);
    }
    value
}

/// `{ id: { "learnset": { move: [sources] } } }` from `{ id: { move: [sources] } }`.
pub fn learnsets(raw: Value) -> Value {
    let Value::Object(entries) = raw else {
        panic!("learnsets must be an object");
    };
    Value::Object(
        entries
            .into_iter()
            .map(|(id, learnset)| (id, json!({ "learnset": learnset })))
            .collect(),
    )
}

pub fn generation(num: u8, pokedex: Value, raw_learnsets: Value) -> Generation {
    let tables = DexTables {
        pokedex: serde_json::from_value(pokedex).unwrap(),
        learnsets: serde_json::from_value(learnsets(raw_learnsets)).unwrap(),
        typechart: serde_json::from_value(json!({
            "normal": {"damageTaken": {"Fighting": 1, "Ghost": 3}}
        }))
        .unwrap(),
        ..Default::default()
    };
    Generation::from_tables(num, tables).unwrap()
}

pub fn mod_learnsets(name: &str, raw_learnsets: Value) -> ModLearnsets {
    ModLearnsets::from_entries(name, serde_json::from_value(learnsets(raw_learnsets)).unwrap())
}

pub fn overrides(value: Value) -> SpeciesOverrides {
    serde_json::from_value(value).unwrap()
}
