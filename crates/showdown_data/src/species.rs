//! Species records with the fields the simulator derives at load time.

use indexmap::IndexMap;

use crate::helpers::{infer_species_gen, to_id};
use crate::models::{BaseStats, GenderRatio, OneOrMany, SpeciesData};

const MEGA_FORMES: &[&str] = &["Mega", "Mega-X", "Mega-Y"];

/// A species (or forme) as seen by one generation.
#[derive(Debug, Clone)]
pub struct Species {
    pub id: String,
    pub name: String,
    pub num: i32,
    pub gen: u8,
    /// Own name when this is not a forme.
    pub base_species: String,
    /// Empty for base formes.
    pub forme: String,
    pub base_forme: String,
    pub types: Vec<String>,
    pub base_stats: BaseStats,
    pub abilities: IndexMap<String, String>,
    pub heightm: Option<f64>,
    pub weightkg: Option<f64>,
    pub gender: Option<String>,
    pub gender_ratio: GenderRatio,
    pub egg_groups: Vec<String>,
    pub prevo: Option<String>,
    pub evos: Vec<String>,
    pub evo_type: Option<String>,
    pub evo_condition: Option<String>,
    pub evo_level: Option<u8>,
    pub evo_item: Option<String>,
    pub evo_move: Option<String>,
    pub other_formes: Vec<String>,
    pub cosmetic_formes: Vec<String>,
    pub forme_order: Vec<String>,
    pub battle_only: Option<OneOrMany>,
    pub changes_from: Option<String>,
    pub required_ability: Option<String>,
    pub required_item: Option<String>,
    pub required_items: Vec<String>,
    pub required_move: Option<String>,
    pub can_gigantamax: Option<String>,
    pub cannot_dynamax: bool,
    pub gmax_unreleased: bool,
    pub can_hatch: bool,
    pub unreleased_hidden: bool,
    pub is_mega: bool,
    pub is_primal: bool,
    pub is_nonstandard: Option<String>,
}

impl Species {
    pub fn from_data(id: &str, data: SpeciesData) -> Self {
        let forme = data.forme.unwrap_or_default();
        let base_species = data
            .base_species
            .filter(|base| !base.is_empty())
            .unwrap_or_else(|| data.name.clone());

        let is_mega = MEGA_FORMES.contains(&forme.as_str());
        let is_primal = forme == "Primal";

        let battle_only = data.battle_only.or_else(|| {
            (is_mega || is_primal).then(|| OneOrMany::One(base_species.clone()))
        });
        let changes_from = data
            .changes_from
            .as_ref()
            .or(battle_only.as_ref())
            .and_then(|from| from.first())
            .map(|from| from.to_string());

        let gender_ratio = match data.gender.as_deref() {
            Some("M") => GenderRatio { male: 1.0, female: 0.0 },
            Some("F") => GenderRatio { male: 0.0, female: 1.0 },
            Some("N") => GenderRatio { male: 0.0, female: 0.0 },
            _ => data.gender_ratio.unwrap_or_default(),
        };

        let gen = data
            .gen
            .unwrap_or_else(|| infer_species_gen(data.num, &forme, is_mega));

        Species {
            id: if id.is_empty() { to_id(&data.name) } else { id.to_string() },
            name: data.name,
            num: data.num,
            gen,
            base_species,
            forme,
            base_forme: data.base_forme.unwrap_or_default(),
            types: data.types,
            base_stats: data.base_stats,
            abilities: data.abilities,
            heightm: data.heightm,
            weightkg: data.weightkg,
            gender: data.gender,
            gender_ratio,
            egg_groups: data.egg_groups,
            prevo: data.prevo.filter(|p| !p.is_empty()),
            evos: data.evos,
            evo_type: data.evo_type,
            evo_condition: data.evo_condition,
            evo_level: data.evo_level,
            evo_item: data.evo_item,
            evo_move: data.evo_move,
            other_formes: data.other_formes,
            cosmetic_formes: data.cosmetic_formes,
            forme_order: data.forme_order,
            battle_only,
            changes_from,
            required_ability: data.required_ability,
            required_item: data.required_item,
            required_items: data.required_items,
            required_move: data.required_move,
            can_gigantamax: data.can_gigantamax,
            cannot_dynamax: data.cannot_dynamax,
            gmax_unreleased: data.gmax_unreleased,
            can_hatch: data.can_hatch,
            unreleased_hidden: data.unreleased_hidden,
            is_mega,
            is_primal,
            is_nonstandard: data.is_nonstandard,
        }
    }

    /// Build the record for a cosmetic forme such as "Gastrodon-East",
    /// which has no entry of its own in the dump.
    pub fn cosmetic_forme(owner: &Species, name: &str) -> Self {
        let prefix = format!("{}-", owner.name);
        let forme = name.strip_prefix(&prefix).unwrap_or(name).to_string();

        Species {
            id: to_id(name),
            name: name.to_string(),
            base_species: owner.name.clone(),
            forme,
            base_forme: String::new(),
            other_formes: Vec::new(),
            cosmetic_formes: Vec::new(),
            forme_order: Vec::new(),
            ..owner.clone()
        }
    }

    /// True when this entry is an alternate forme with its own base species.
    pub fn is_forme(&self) -> bool {
        self.base_species != self.name
    }

    pub fn is_battle_only(&self) -> bool {
        self.battle_only.is_some()
    }
}
