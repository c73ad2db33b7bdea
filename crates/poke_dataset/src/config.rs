//! Export run configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use showdown_data::{MAX_GENERATION, MIN_GENERATION};

use crate::error::{Error, Result};

/// Alternate dump consulted for learnsets of one generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModSource {
    pub gen: u8,
    /// Directory name under the Showdown data directory, e.g. `gen8bdsp`.
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Hand-maintained extra data (`pokemon.json`, `games.json`, `pokedex/`, ...).
    pub data_dir: PathBuf,
    /// Showdown dumps, one `gen<N>` directory per generation.
    pub showdown_dir: PathBuf,
    /// Emptied at the start of every run.
    pub out_dir: PathBuf,
    pub generations: Vec<u8>,
    pub mods: Vec<ModSource>,
    pub pretty_print: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            data_dir: PathBuf::from("data"),
            showdown_dir: PathBuf::from("data/showdown"),
            out_dir: PathBuf::from("generated"),
            generations: (MIN_GENERATION..=MAX_GENERATION).collect(),
            mods: vec![ModSource {
                gen: 8,
                name: "gen8bdsp".to_string(),
            }],
            pretty_print: true,
        }
    }
}

impl ExportConfig {
    pub fn generation_dir(&self, gen: u8) -> PathBuf {
        self.showdown_dir.join(format!("gen{}", gen))
    }

    pub fn mod_for(&self, gen: u8) -> Option<&ModSource> {
        self.mods.iter().find(|m| m.gen == gen)
    }

    pub fn mod_dir(&self, source: &ModSource) -> PathBuf {
        self.showdown_dir.join(&source.name)
    }

    /// Sort and de-duplicate generations; reject anything outside 1-9.
    pub fn normalize(&mut self) -> Result<()> {
        if let Some(&bad) = self
            .generations
            .iter()
            .chain(self.mods.iter().map(|m| &m.gen))
            .find(|g| !(MIN_GENERATION..=MAX_GENERATION).contains(*g))
        {
            return Err(Error::InvalidGeneration(bad));
        }
        self.generations.sort_unstable();
        self.generations.dedup();
        Ok(())
    }
}
