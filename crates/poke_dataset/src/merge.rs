//! Cross-generation accumulator.
//!
//! Per-generation exporters feed their finished records in here; the merged
//! documents are written once after the last generation. Entries are only
//! ever added or unioned, never removed.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::info;

use crate::error::Result;
use crate::export::abilities::AbilityRecord;
use crate::export::natures::NatureRecord;
use crate::export::pokedex::PokedexRecord;
use crate::export::types::{CategoryRecord, TypeRecord};
use crate::extra_data::GameSet;
use crate::output::JsonWriter;

/// Generations sharing one type chart. Gen 2 added dark and steel, gen 6
/// added fairy.
const TYPE_SET_RANGES: &[&[u8]] = &[&[1], &[2, 3, 4, 5], &[6, 7, 8, 9]];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TypeSet {
    pub gens: Vec<u8>,
    pub types: Vec<TypeRecord>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MergedTypes {
    pub type_sets: Vec<TypeSet>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<CategoryRecord>>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MergedAbility {
    pub slug: String,
    pub name: String,
    /// Record per generation the ability exists in.
    pub gens: BTreeMap<u8, AbilityRecord>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MergedPokedex {
    pub slug: String,
    pub games: BTreeSet<String>,
    #[serde(flatten)]
    pub record: PokedexRecord,
}

#[derive(Debug, Default)]
pub struct MergeData {
    types: MergedTypes,
    natures: Option<Vec<NatureRecord>>,
    abilities: BTreeMap<String, BTreeMap<u8, AbilityRecord>>,
    games: Option<Vec<GameSet>>,
    pokedex: BTreeMap<String, MergedPokedex>,
}

impl MergeData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the type chart of `gen` as the chart of its whole type set,
    /// unless an earlier generation of the same set was recorded already.
    pub fn add_type_data(&mut self, gen: u8, types: &[TypeRecord], categories: &[CategoryRecord]) {
        if let Some(range) = TYPE_SET_RANGES.iter().find(|range| range.contains(&gen)) {
            let recorded = self
                .types
                .type_sets
                .iter()
                .any(|set| set.gens.as_slice() == *range);
            if !recorded {
                self.types.type_sets.push(TypeSet {
                    gens: range.to_vec(),
                    types: types.to_vec(),
                });
                self.types.type_sets.sort_by_key(|set| set.gens[0]);
            }
        }

        if self.types.categories.is_none() && !categories.is_empty() {
            self.types.categories = Some(categories.to_vec());
        }
    }

    /// Natures never change after generation 3, the first list wins.
    pub fn set_natures(&mut self, natures: &[NatureRecord]) {
        if self.natures.is_none() && !natures.is_empty() {
            self.natures = Some(natures.to_vec());
        }
    }

    pub fn add_ability(&mut self, slug: &str, gen: u8, record: AbilityRecord) {
        self.abilities
            .entry(slug.to_string())
            .or_default()
            .entry(gen)
            .or_insert(record);
    }

    pub fn set_games(&mut self, games: &[GameSet]) {
        if self.games.is_none() {
            self.games = Some(games.to_vec());
        }
    }

    /// Add a pokedex seen in one generation. The first record is kept, the
    /// games it appears in are unioned.
    pub fn add_pokedex(&mut self, slug: &str, games: &BTreeSet<String>, record: &PokedexRecord) {
        self.pokedex
            .entry(slug.to_string())
            .and_modify(|entry| entry.games.extend(games.iter().cloned()))
            .or_insert_with(|| MergedPokedex {
                slug: slug.to_string(),
                games: games.clone(),
                record: record.clone(),
            });
    }

    pub fn types(&self) -> &MergedTypes {
        &self.types
    }

    pub fn natures(&self) -> Option<&[NatureRecord]> {
        self.natures.as_deref()
    }

    pub fn abilities(&self) -> Vec<MergedAbility> {
        self.abilities
            .iter()
            .filter_map(|(slug, gens)| {
                let (_, latest) = gens.iter().next_back()?;
                Some(MergedAbility {
                    slug: slug.clone(),
                    name: latest.name.clone(),
                    gens: gens.clone(),
                })
            })
            .collect()
    }

    pub fn games(&self) -> Option<&[GameSet]> {
        self.games.as_deref()
    }

    pub fn pokedex(&self, slug: &str) -> Option<&MergedPokedex> {
        self.pokedex.get(slug)
    }

    /// Write everything under `merged/`.
    pub fn export(&self, writer: &JsonWriter) -> Result<()> {
        info!("*** merged ***");
        let writer = writer.nested("merged");

        if !self.types.type_sets.is_empty() || self.types.categories.is_some() {
            info!(
                "writing {} type sets and {} categories...",
                self.types.type_sets.len(),
                self.types.categories.as_ref().map_or(0, Vec::len)
            );
            writer.write("types.json", &self.types)?;
        }

        if let Some(natures) = &self.natures {
            info!("writing {} natures...", natures.len());
            writer.write("natures.json", natures)?;
        }

        if !self.abilities.is_empty() {
            info!("writing {} abilities...", self.abilities.len());
            writer.write("abilities.json", &self.abilities())?;
        }

        if let Some(games) = self.games.as_ref().filter(|games| !games.is_empty()) {
            info!("writing {} games...", games.len());
            writer.write("games.json", games)?;
        }

        if !self.pokedex.is_empty() {
            info!("writing {} pokedexes...", self.pokedex.len());
            for (slug, entry) in &self.pokedex {
                writer.write(format!("pokedex/{}.json", slug), entry)?;
            }
        }

        Ok(())
    }
}
