//! Hand-maintained extra data that augments the Showdown dumps.
//!
//! Every domain is a separate file under the data directory and is read at
//! most once per [`ExtraData`] instance. Missing files yield empty tables;
//! unreadable or malformed files are fatal.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use showdown_data::RawLearnset;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::attributes::Region;
use crate::error::{Error, Result};

// ============================================================================
// Species overrides
// ============================================================================

/// Manually curated fields for one species. Looked up by upstream id for
/// `slug` and by slug for everything else.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SpeciesOverride {
    pub slug: Option<String>,
    pub name: Option<String>,
    pub sub_name: Option<String>,
    #[serde(default)]
    pub hide_sub_name: bool,
    pub cosmetic_sub_name: Option<String>,
    /// `Some(None)` when the file sets `"region": null`.
    #[serde(default, deserialize_with = "explicit_null")]
    pub region: Option<Option<Region>>,
    pub formes: Option<Vec<String>>,
    /// Slug of the species whose learnset this one inherits.
    pub merge_learnset_from: Option<String>,
    #[serde(default)]
    pub keep_learnset: bool,
    #[serde(default)]
    pub is_legendary: bool,
    #[serde(default)]
    pub is_mythical: bool,
    pub flavor_text: Option<String>,
}

fn explicit_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct SpeciesOverrides(HashMap<String, SpeciesOverride>);

impl SpeciesOverrides {
    pub fn get(&self, key: &str) -> Option<&SpeciesOverride> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: SpeciesOverride) {
        self.0.insert(key.into(), value);
    }

    fn validate(&self) -> Result<()> {
        for (key, entry) in &self.0 {
            let fields = [
                ("slug", entry.slug.as_deref()),
                ("mergeLearnsetFrom", entry.merge_learnset_from.as_deref()),
            ];
            for (field, value) in fields {
                if value.is_some_and(|v| v.trim().is_empty()) {
                    return Err(Error::InvalidOverride {
                        key: key.clone(),
                        reason: format!("`{}` must not be empty", field),
                    });
                }
            }
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CosmeticFormeExtra {
    pub sub_name: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct PokemonExtra {
    #[serde(default, rename = "override")]
    pub overrides: SpeciesOverrides,
    #[serde(default)]
    pub cosmetic_formes: HashMap<String, CosmeticFormeExtra>,
}

// ============================================================================
// Move / ability / type extras
// ============================================================================

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoveOverride {
    pub name: Option<String>,
    pub flavor_text: Option<String>,
    /// Marks curated signature max moves Showdown doesn't flag.
    #[serde(default)]
    pub is_max: bool,
    /// Species slugs a signature move belongs to.
    #[serde(default)]
    pub exclusive_pokemon: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AbilityOverride {
    pub name: Option<String>,
    pub short_desc: Option<String>,
    pub flavor_text: Option<String>,
    /// Replaces the derived list of species with this ability.
    pub pokemon: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct TypeColor {
    pub color: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CategoryExtra {
    pub name: Option<String>,
    pub color: Option<String>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct TypeExtra {
    #[serde(default)]
    pub types: HashMap<String, TypeColor>,
    /// Move categories in display order.
    #[serde(default)]
    pub categories: IndexMap<String, CategoryExtra>,
}

// ============================================================================
// Games and pokedexes
// ============================================================================

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Game {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A group of games released together with the pokedexes they use.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct GameSet {
    pub gen: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub games: Vec<Game>,
    #[serde(default)]
    pub pokedex: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PokedexEntry {
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num: Option<u32>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PokedexData {
    pub name: Option<String>,
    #[serde(default)]
    pub data: Vec<PokedexEntry>,
}

/// Manually defined learnsets keyed by species slug, used where the dumps
/// have none (Legends: Arceus species).
pub type ManualLearnsets = HashMap<String, RawLearnset>;

// ============================================================================
// Loader
// ============================================================================

/// Lazily loaded, cached view of the data directory.
#[derive(Debug)]
pub struct ExtraData {
    data_dir: PathBuf,
    pokemon: OnceCell<PokemonExtra>,
    learnsets: OnceCell<ManualLearnsets>,
    moves: OnceCell<HashMap<String, MoveOverride>>,
    abilities: OnceCell<HashMap<String, AbilityOverride>>,
    types: OnceCell<TypeExtra>,
    games: OnceCell<Vec<GameSet>>,
    pokedex: OnceCell<BTreeMap<String, PokedexData>>,
}

impl ExtraData {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        ExtraData {
            data_dir: data_dir.into(),
            pokemon: OnceCell::new(),
            learnsets: OnceCell::new(),
            moves: OnceCell::new(),
            abilities: OnceCell::new(),
            types: OnceCell::new(),
            games: OnceCell::new(),
            pokedex: OnceCell::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn pokemon(&self) -> Result<&PokemonExtra> {
        self.pokemon.get_or_try_init(|| {
            let extra: PokemonExtra = self.read_optional("pokemon.json")?;
            extra.overrides.validate()?;
            Ok(extra)
        })
    }

    pub fn learnsets(&self) -> Result<&ManualLearnsets> {
        self.learnsets
            .get_or_try_init(|| self.read_optional("learnsets.json"))
    }

    pub fn moves(&self) -> Result<&HashMap<String, MoveOverride>> {
        self.moves.get_or_try_init(|| self.read_optional("moves.json"))
    }

    pub fn abilities(&self) -> Result<&HashMap<String, AbilityOverride>> {
        self.abilities
            .get_or_try_init(|| self.read_optional("abilities.json"))
    }

    pub fn types(&self) -> Result<&TypeExtra> {
        self.types.get_or_try_init(|| self.read_optional("types.json"))
    }

    pub fn games(&self) -> Result<&[GameSet]> {
        self.games
            .get_or_try_init(|| self.read_optional("games.json"))
            .map(|games| games.as_slice())
    }

    /// Every `pokedex/*.json` file, keyed by file stem.
    pub fn pokedex(&self) -> Result<&BTreeMap<String, PokedexData>> {
        self.pokedex.get_or_try_init(|| {
            let dir = self.data_dir.join("pokedex");
            let mut dexes = BTreeMap::new();
            if !dir.exists() {
                debug!(dir = %dir.display(), "no pokedex data");
                return Ok(dexes);
            }

            info!("loading pokedex data...");
            for path in json_files(&dir)? {
                let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                dexes.insert(stem.to_string(), read_json(&path)?);
            }
            Ok(dexes)
        })
    }

    fn read_optional<T: DeserializeOwned + Default>(&self, file: &str) -> Result<T> {
        let path = self.data_dir.join(file);
        if !path.exists() {
            debug!(path = %path.display(), "extra data missing, using defaults");
            return Ok(T::default());
        }
        info!("loading {}...", file);
        read_json(&path)
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// JSON files below `dir`, sorted by path.
pub(crate) fn json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| Error::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}
