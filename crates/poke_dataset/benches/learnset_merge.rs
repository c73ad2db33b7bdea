//! Benchmarks for learnset merging.
//!
//! Every species of every generation goes through the merger once per
//! export, so a full run merges several thousand chains.
//!
//! Run with:
//!   cargo bench --package poke_dataset --bench learnset_merge

use std::collections::HashMap;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use indexmap::IndexMap;
use poke_dataset::extra_data::SpeciesOverrides;
use poke_dataset::learnset::{prepare_learnset, MoveSource};
use poke_dataset::{LearnsetMerger, SlugResolver, SpeciesIndex};
use serde_json::json;
use showdown_data::{DexTables, Generation, GenerationData, RawLearnset};

/// Three-stage lines with a wide learnset on every stage.
fn setup_generation(lines: usize) -> Generation {
    let mut pokedex = serde_json::Map::new();
    let mut learnsets = serde_json::Map::new();

    for line in 0..lines {
        let names: Vec<String> = (0..3).map(|stage| format!("Line{}Stage{}", line, stage)).collect();
        for (stage, name) in names.iter().enumerate() {
            let mut entry = json!({ "num": (line * 3 + stage + 1) as i32, "name": name });
            if stage > 0 {
                entry["prevo"] = json!(names[stage - 1]);
            }
            let id = name.to_lowercase();
            pokedex.insert(id.clone(), entry);

            let moves: serde_json::Map<String, serde_json::Value> = (0..60)
                .map(|m| {
                    let sources = match (m + stage) % 4 {
                        0 => json!([format!("8L{}", m), "7L1"]),
                        1 => json!(["8M", "8S0"]),
                        2 => json!(["8E"]),
                        _ => json!(["8T", "8L1"]),
                    };
                    (format!("move{}", m), sources)
                })
                .collect();
            learnsets.insert(id, json!({ "learnset": moves }));
        }
    }

    let tables = DexTables {
        pokedex: serde_json::from_value(pokedex.into()).expect("pokedex parses"),
        learnsets: serde_json::from_value(learnsets.into()).expect("learnsets parse"),
        ..Default::default()
    };
    Generation::from_tables(8, tables).expect("generation builds")
}

fn bench_source_parsing(c: &mut Criterion) {
    let raw = ["8L15", "8M", "8S2", "7L1", "8E", "4V"];
    c.bench_function("move_source_from_raw", |b| {
        b.iter(|| {
            for source in raw {
                black_box(MoveSource::from_raw(black_box(source), 8));
            }
        })
    });

    let learnset: RawLearnset = (0..120)
        .map(|m| (format!("move{}", m), vec![format!("8L{}", m % 50), "8M".to_string(), "7T".to_string()]))
        .collect::<IndexMap<_, _>>();
    c.bench_function("prepare_learnset", |b| {
        b.iter(|| prepare_learnset(black_box(&learnset), 8))
    });
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merged_learnset");

    for lines in [10usize, 100] {
        let gen = setup_generation(lines);
        let overrides = SpeciesOverrides::default();
        let manual = HashMap::new();
        let index = SpeciesIndex::build(&gen, &SlugResolver::new(&overrides)).expect("index builds");
        let merger = LearnsetMerger::new(&gen, None, &index, &overrides, &manual);

        group.throughput(Throughput::Elements(gen.species().len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines * 3), &gen, |b, gen| {
            b.iter(|| {
                for species in gen.species() {
                    black_box(merger.merged_learnset(species));
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_source_parsing, bench_merge);
criterion_main!(benches);
