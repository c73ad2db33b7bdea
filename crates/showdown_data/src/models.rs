//! JSON deserialization structures for Showdown data dumps.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use crate::helpers::deserialize_truthy;

/// A field Showdown stores either as a single name or as a list of names.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    pub fn first(&self) -> Option<&str> {
        match self {
            OneOrMany::One(name) => Some(name.as_str()),
            OneOrMany::Many(names) => names.first().map(|s| s.as_str()),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BaseStats {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct GenderRatio {
    #[serde(rename = "M")]
    pub male: f64,
    #[serde(rename = "F")]
    pub female: f64,
}

impl Default for GenderRatio {
    fn default() -> Self {
        GenderRatio {
            male: 0.5,
            female: 0.5,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesData {
    pub num: i32,
    pub name: String,
    pub base_species: Option<String>,
    pub forme: Option<String>,
    pub base_forme: Option<String>,
    #[serde(default)]
    pub types: Vec<String>,
    #[serde(default)]
    pub base_stats: BaseStats,
    /// Slot ("0", "1", "H", "S") to ability name, in file order.
    #[serde(default)]
    pub abilities: IndexMap<String, String>,
    pub heightm: Option<f64>,
    pub weightkg: Option<f64>,
    pub gender: Option<String>,
    pub gender_ratio: Option<GenderRatio>,
    #[serde(default)]
    pub egg_groups: Vec<String>,
    pub prevo: Option<String>,
    #[serde(default)]
    pub evos: Vec<String>,
    pub evo_type: Option<String>,
    pub evo_condition: Option<String>,
    pub evo_level: Option<u8>,
    pub evo_item: Option<String>,
    pub evo_move: Option<String>,
    #[serde(default)]
    pub other_formes: Vec<String>,
    #[serde(default)]
    pub cosmetic_formes: Vec<String>,
    #[serde(default)]
    pub forme_order: Vec<String>,
    pub battle_only: Option<OneOrMany>,
    pub changes_from: Option<OneOrMany>,
    pub required_ability: Option<String>,
    pub required_item: Option<String>,
    #[serde(default)]
    pub required_items: Vec<String>,
    pub required_move: Option<String>,
    pub can_gigantamax: Option<String>,
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub cannot_dynamax: bool,
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub gmax_unreleased: bool,
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub can_hatch: bool,
    // "Past" in some dumps, a plain flag in others
    #[serde(default, deserialize_with = "deserialize_truthy")]
    pub unreleased_hidden: bool,
    pub is_nonstandard: Option<String>,
    pub gen: Option<u8>,
}

/// Move accuracy, `true` for moves that never miss.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum Accuracy {
    AlwaysHits(bool),
    Percent(u8),
}

impl Default for Accuracy {
    fn default() -> Self {
        Accuracy::AlwaysHits(true)
    }
}

impl Accuracy {
    pub fn percent(&self) -> Option<u8> {
        match self {
            Accuracy::Percent(value) => Some(*value),
            Accuracy::AlwaysHits(_) => None,
        }
    }
}

/// `isMax` is `true` for generic max moves and the species name for G-Max moves.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum IsMax {
    Flag(bool),
    Species(String),
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ZMoveData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_power: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boost: Option<IndexMap<String, i8>>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MaxMoveData {
    pub base_power: u16,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MoveData {
    pub num: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub move_type: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub base_power: u16,
    #[serde(default)]
    pub accuracy: Accuracy,
    #[serde(default)]
    pub pp: u8,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub target: String,
    #[serde(default, deserialize_with = "deserialize_z_crystal")]
    pub is_z: Option<String>,
    pub z_move: Option<ZMoveData>,
    pub is_max: Option<IsMax>,
    pub max_move: Option<MaxMoveData>,
    pub desc: Option<String>,
    pub short_desc: Option<String>,
    pub is_nonstandard: Option<String>,
    pub gen: Option<u8>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct AbilityData {
    pub num: i32,
    pub name: String,
    pub desc: Option<String>,
    pub short_desc: Option<String>,
    pub is_nonstandard: Option<String>,
    pub gen: Option<u8>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    pub num: i32,
    pub name: String,
    pub desc: Option<String>,
    pub short_desc: Option<String>,
    pub is_nonstandard: Option<String>,
    pub gen: Option<u8>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct NatureData {
    pub name: String,
    pub plus: Option<String>,
    pub minus: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TypeChartEntry {
    pub name: Option<String>,
    /// Attacking type (or status) to damage code: 0 normal, 1 weak, 2 resist, 3 immune.
    #[serde(default)]
    pub damage_taken: IndexMap<String, u8>,
    pub is_nonstandard: Option<String>,
}

/// Raw learnset: move id to Showdown move sources such as `8L1` or `7M`.
pub type RawLearnset = IndexMap<String, Vec<String>>;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct LearnsetEntry {
    #[serde(default)]
    pub learnset: RawLearnset,
}

/// `isZ` holds the Z-crystal id; anything else is treated as absent.
fn deserialize_z_crystal<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(crystal)) if !crystal.is_empty() => Some(crystal),
        _ => None,
    })
}
