//! Read-only access to Showdown data dumps.
//!
//! Each generation lives in its own directory of JSON dumps
//! (`pokedex.json`, `moves.json`, `learnsets.json`, `typechart.json` and,
//! where the generation has them, `abilities.json`, `items.json`,
//! `natures.json`). [`Generation`] loads one directory, derives the fields
//! the simulator computes at runtime and applies the exists filter;
//! consumers query it through the [`GenerationData`] trait.

pub mod abilities;
pub mod error;
pub mod exists;
pub mod generation;
pub mod helpers;
pub mod items;
pub mod models;
pub mod moves;
pub mod natures;
pub mod source;
pub mod species;
pub mod types;

pub use abilities::Ability;
pub use error::{DexError, Result};
pub use generation::{DexTables, Generation, ModLearnsets, MAX_GENERATION, MIN_GENERATION};
pub use helpers::to_id;
pub use items::Item;
pub use models::{Accuracy, BaseStats, GenderRatio, IsMax, RawLearnset};
pub use moves::Move;
pub use natures::Nature;
pub use source::{GenerationData, LearnsetSource};
pub use species::Species;
pub use types::TypeInfo;
