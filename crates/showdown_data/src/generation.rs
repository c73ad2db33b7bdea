//! In-memory generation built from a directory of Showdown JSON dumps.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::abilities::Ability;
use crate::error::{DexError, Result};
use crate::exists::{ability_exists, item_exists, move_exists, species_exists};
use crate::helpers::{to_id, type_display_name};
use crate::items::Item;
use crate::models::{
    AbilityData, ItemData, LearnsetEntry, MoveData, NatureData, RawLearnset, SpeciesData,
    TypeChartEntry,
};
use crate::moves::Move;
use crate::natures::Nature;
use crate::source::{GenerationData, LearnsetSource};
use crate::species::Species;
use crate::types::TypeInfo;

pub const MIN_GENERATION: u8 = 1;
pub const MAX_GENERATION: u8 = 9;

/// Raw dump tables of one generation, keyed by Showdown id in file order.
#[derive(Debug, Clone, Default)]
pub struct DexTables {
    pub pokedex: IndexMap<String, SpeciesData>,
    pub moves: IndexMap<String, MoveData>,
    pub learnsets: IndexMap<String, LearnsetEntry>,
    pub typechart: IndexMap<String, TypeChartEntry>,
    pub abilities: IndexMap<String, AbilityData>,
    pub items: IndexMap<String, ItemData>,
    pub natures: IndexMap<String, NatureData>,
}

impl DexTables {
    /// Read the dumps in `dir`. `abilities.json`, `items.json` and
    /// `natures.json` may be missing.
    pub fn load(dir: &Path) -> Result<Self> {
        Ok(DexTables {
            pokedex: read_json(&dir.join("pokedex.json"))?,
            moves: read_json(&dir.join("moves.json"))?,
            learnsets: read_json(&dir.join("learnsets.json"))?,
            typechart: read_json(&dir.join("typechart.json"))?,
            abilities: read_optional_json(&dir.join("abilities.json"))?,
            items: read_optional_json(&dir.join("items.json"))?,
            natures: read_optional_json(&dir.join("natures.json"))?,
        })
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path).map_err(|source| DexError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| DexError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional_json<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    if !path.exists() {
        debug!(path = %path.display(), "optional dump missing");
        return Ok(T::default());
    }
    read_json(path)
}

fn index_by_id<'a, I>(ids: I) -> HashMap<String, usize>
where
    I: Iterator<Item = &'a str>,
{
    ids.enumerate().map(|(i, id)| (id.to_string(), i)).collect()
}

/// One generation of upstream data with the exists filter applied.
#[derive(Debug, Clone)]
pub struct Generation {
    num: u8,
    species: Vec<Species>,
    species_by_id: HashMap<String, usize>,
    cosmetic_formes: HashMap<String, Species>,
    moves: Vec<Move>,
    moves_by_id: HashMap<String, usize>,
    abilities: Vec<Ability>,
    abilities_by_id: HashMap<String, usize>,
    items: Vec<Item>,
    items_by_id: HashMap<String, usize>,
    natures: Vec<Nature>,
    types: Vec<TypeInfo>,
    learnsets: HashMap<String, RawLearnset>,
}

impl Generation {
    pub fn load(dir: &Path, num: u8) -> Result<Self> {
        info!(gen = num, dir = %dir.display(), "loading showdown data");
        Generation::from_tables(num, DexTables::load(dir)?)
    }

    pub fn from_tables(num: u8, tables: DexTables) -> Result<Self> {
        if !(MIN_GENERATION..=MAX_GENERATION).contains(&num) {
            return Err(DexError::UnsupportedGeneration(num));
        }

        let species: Vec<Species> = tables
            .pokedex
            .into_iter()
            .map(|(id, data)| Species::from_data(&id, data))
            .filter(|s| species_exists(&s.id, s.gen, s.is_nonstandard.as_deref(), num))
            .collect();

        let mut cosmetic_formes = HashMap::new();
        for owner in &species {
            for name in &owner.cosmetic_formes {
                let forme = Species::cosmetic_forme(owner, name);
                cosmetic_formes.insert(forme.id.clone(), forme);
            }
        }

        let moves: Vec<Move> = tables
            .moves
            .into_iter()
            .map(|(id, data)| Move::from_data(&id, data))
            .filter(|m| move_exists(m.gen, m.is_nonstandard.as_deref(), num))
            .collect();

        let abilities: Vec<Ability> = if num >= 3 {
            tables
                .abilities
                .into_iter()
                .map(|(id, data)| Ability::from_data(&id, data))
                .filter(|a| ability_exists(&a.id, a.gen, a.is_nonstandard.as_deref(), num))
                .collect()
        } else {
            Vec::new()
        };

        let items: Vec<Item> = if num >= 2 {
            tables
                .items
                .into_iter()
                .map(|(id, data)| Item::from_data(&id, data))
                .filter(|i| item_exists(i.gen, i.is_nonstandard.as_deref(), num))
                .collect()
        } else {
            Vec::new()
        };

        let natures: Vec<Nature> = if num >= 3 {
            tables
                .natures
                .into_iter()
                .map(|(id, data)| Nature::from_data(&id, data))
                .collect()
        } else {
            Vec::new()
        };

        let types: Vec<TypeInfo> = tables
            .typechart
            .into_iter()
            .map(|(key, data)| TypeInfo::from_data(&key, data))
            .filter(|t| !t.is_unknown() && t.is_nonstandard.is_none())
            .collect();

        let learnsets = tables
            .learnsets
            .into_iter()
            .map(|(id, entry)| (id, entry.learnset))
            .collect();

        debug!(
            gen = num,
            species = species.len(),
            moves = moves.len(),
            abilities = abilities.len(),
            items = items.len(),
            "generation built"
        );

        Ok(Generation {
            num,
            species_by_id: index_by_id(species.iter().map(|s| s.id.as_str())),
            species,
            cosmetic_formes,
            moves_by_id: index_by_id(moves.iter().map(|m| m.id.as_str())),
            moves,
            abilities_by_id: index_by_id(abilities.iter().map(|a| a.id.as_str())),
            abilities,
            items_by_id: index_by_id(items.iter().map(|i| i.id.as_str())),
            items,
            natures,
            types,
            learnsets,
        })
    }

    fn get_type(&self, name: &str) -> Option<&TypeInfo> {
        let id = to_id(name);
        self.types.iter().find(|t| t.id == id)
    }
}

impl LearnsetSource for Generation {
    fn learnset(&self, species_id: &str) -> Option<&RawLearnset> {
        self.learnsets.get(species_id)
    }
}

impl GenerationData for Generation {
    fn num(&self) -> u8 {
        self.num
    }

    fn species(&self) -> &[Species] {
        &self.species
    }

    fn get_species(&self, name: &str) -> Option<&Species> {
        let id = to_id(name);
        self.species_by_id
            .get(&id)
            .map(|&i| &self.species[i])
            .or_else(|| self.cosmetic_formes.get(&id))
    }

    fn moves(&self) -> &[Move] {
        &self.moves
    }

    fn get_move(&self, name: &str) -> Option<&Move> {
        self.moves_by_id.get(&to_id(name)).map(|&i| &self.moves[i])
    }

    fn abilities(&self) -> &[Ability] {
        &self.abilities
    }

    fn get_ability(&self, name: &str) -> Option<&Ability> {
        self.abilities_by_id
            .get(&to_id(name))
            .map(|&i| &self.abilities[i])
    }

    fn items(&self) -> &[Item] {
        &self.items
    }

    fn get_item(&self, name: &str) -> Option<&Item> {
        self.items_by_id.get(&to_id(name)).map(|&i| &self.items[i])
    }

    fn natures(&self) -> &[Nature] {
        &self.natures
    }

    fn types(&self) -> &[TypeInfo] {
        &self.types
    }

    fn total_effectiveness(&self, attacker: &str, defender: &str) -> f64 {
        let attacker_name = self
            .get_type(attacker)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| type_display_name(attacker));
        self.get_type(defender)
            .map(|t| t.multiplier_from(&attacker_name))
            .unwrap_or(1.0)
    }
}

/// Learnsets of a mod dump (for example `gen8bdsp`), consulted when the
/// primary data has nothing for a species.
#[derive(Debug, Clone, Default)]
pub struct ModLearnsets {
    pub name: String,
    learnsets: HashMap<String, RawLearnset>,
}

impl ModLearnsets {
    pub fn load(dir: &Path, name: &str) -> Result<Self> {
        info!(name, dir = %dir.display(), "loading mod learnsets");
        let entries: IndexMap<String, LearnsetEntry> = read_json(&dir.join("learnsets.json"))?;
        Ok(ModLearnsets::from_entries(name, entries))
    }

    pub fn from_entries(name: &str, entries: IndexMap<String, LearnsetEntry>) -> Self {
        ModLearnsets {
            name: name.to_string(),
            learnsets: entries
                .into_iter()
                .map(|(id, entry)| (id, entry.learnset))
                .collect(),
        }
    }
}

impl LearnsetSource for ModLearnsets {
    fn learnset(&self, species_id: &str) -> Option<&RawLearnset> {
        self.learnsets.get(species_id)
    }
}
