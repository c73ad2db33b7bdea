//! Query interface over one generation of upstream data.

use crate::abilities::Ability;
use crate::items::Item;
use crate::models::RawLearnset;
use crate::moves::Move;
use crate::natures::Nature;
use crate::species::Species;
use crate::types::TypeInfo;

/// Anything that can answer "what does this species learn".
///
/// Implemented by full generations and by mod dumps that only ship learnsets.
pub trait LearnsetSource {
    /// Raw learnset keyed by species id.
    fn learnset(&self, species_id: &str) -> Option<&RawLearnset>;
}

/// Read-only view of a generation's species, moves, abilities, items,
/// natures and types. Lookups accept display names or ids.
pub trait GenerationData: LearnsetSource {
    fn num(&self) -> u8;

    /// Species that exist in this generation, in dump order.
    fn species(&self) -> &[Species];
    fn get_species(&self, name: &str) -> Option<&Species>;

    fn moves(&self) -> &[Move];
    fn get_move(&self, name: &str) -> Option<&Move>;

    fn abilities(&self) -> &[Ability];
    fn get_ability(&self, name: &str) -> Option<&Ability>;

    fn items(&self) -> &[Item];
    fn get_item(&self, name: &str) -> Option<&Item>;

    fn natures(&self) -> &[Nature];

    /// Types that exist in this generation, `???` excluded.
    fn types(&self) -> &[TypeInfo];

    /// Damage multiplier of an `attacker` type move against a `defender` type.
    fn total_effectiveness(&self, attacker: &str, defender: &str) -> f64;
}
