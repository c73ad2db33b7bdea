//! Per-generation exporters.
//!
//! Every category writes its documents below `gen<N>/` and feeds the
//! cross-generation accumulator where a merged view exists.

pub mod abilities;
pub mod games;
pub mod items;
pub mod machines;
pub mod moves;
pub mod natures;
pub mod pokedex;
pub mod pokemon;
pub mod types;

use std::collections::{BTreeMap, BTreeSet};

use heck::ToKebabCase;
use showdown_data::{GenerationData, LearnsetSource};
use tracing::info;

use crate::error::Result;
use crate::extra_data::ExtraData;
use crate::merge::MergeData;
use crate::output::JsonWriter;

/// Everything a category exporter reads for one generation.
pub struct GenerationContext<'a> {
    pub gen: &'a dyn GenerationData,
    /// Mod learnsets consulted when the primary dump has none.
    pub alternate: Option<&'a dyn LearnsetSource>,
    pub extra: &'a ExtraData,
    /// Writer rooted at `gen<N>/`.
    pub writer: JsonWriter,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        gen: &'a dyn GenerationData,
        alternate: Option<&'a dyn LearnsetSource>,
        extra: &'a ExtraData,
        out: &JsonWriter,
    ) -> Self {
        GenerationContext {
            gen,
            alternate,
            extra,
            writer: out.nested(format!("gen{}", gen.num())),
        }
    }

    pub fn num(&self) -> u8 {
        self.gen.num()
    }
}

/// Key (move or ability id) to the slugs of the species that have it.
/// Filled while species are processed, read by the later exporters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReverseIndex(BTreeMap<String, BTreeSet<String>>);

impl ReverseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: &str, species_slug: &str) {
        self.0
            .entry(key.to_string())
            .or_default()
            .insert(species_slug.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&BTreeSet<String>> {
        self.0.get(key)
    }

    /// Sorted species slugs for `key`, `None` when nothing has it.
    pub fn species(&self, key: &str) -> Option<Vec<String>> {
        self.0
            .get(key)
            .filter(|slugs| !slugs.is_empty())
            .map(|slugs| slugs.iter().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What the species pass leaves behind for the other exporters.
#[derive(Debug, Clone, Default)]
pub struct SpeciesRefs {
    /// Slugs of every exported species.
    pub slugs: BTreeSet<String>,
    pub moves: ReverseIndex,
    pub abilities: ReverseIndex,
    /// G-Max move id to the species that use it.
    pub gmax_moves: ReverseIndex,
}

/// Number of documents written per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub gen: u8,
    pub pokemon: usize,
    pub moves: usize,
    pub abilities: usize,
    pub items: usize,
    pub natures: usize,
    pub types: usize,
    pub games: usize,
    pub pokedexes: usize,
    pub machines: usize,
}

/// Slug of a type or move category display name ("Fire" -> "fire").
pub fn name_to_slug(name: &str) -> String {
    name.to_kebab_case()
}

/// Run every category exporter for one generation.
pub fn export_generation(ctx: &GenerationContext, merge: &mut MergeData) -> Result<GenerationSummary> {
    info!("*** gen {} ***", ctx.num());

    let mut summary = GenerationSummary {
        gen: ctx.num(),
        ..Default::default()
    };

    summary.types = types::export(ctx, merge)?;
    summary.natures = natures::export(ctx, merge)?;

    let (pokemon, refs) = pokemon::export(ctx)?;
    summary.pokemon = pokemon;
    summary.moves = moves::export(ctx, &refs)?;
    summary.abilities = abilities::export(ctx, &refs, merge)?;
    summary.items = items::export(ctx)?;
    summary.games = games::export(ctx, merge)?;
    summary.pokedexes = pokedex::export(ctx, &refs, merge)?;
    summary.machines = machines::export(ctx)?;

    Ok(summary)
}
