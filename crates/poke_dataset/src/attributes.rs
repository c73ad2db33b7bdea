//! Species attributes derived from slugs, base species and overrides.

use std::fmt;

use bitflags::bitflags;
use phf::phf_map;
use serde::{Deserialize, Serialize};
use showdown_data::{GenerationData, Move, Species};
use tracing::warn;

use crate::extra_data::{CosmeticFormeExtra, SpeciesOverrides};
use crate::slug::{base_species, SlugResolver};

/// Sort index of Gigantamax formes, which are missing from `formeOrder`.
pub const GMAX_FORME_INDEX: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Alola,
    Galar,
    Hisui,
    Paldea,
}

impl Region {
    pub fn adjective(self) -> &'static str {
        match self {
            Region::Alola => "Alolan",
            Region::Galar => "Galarian",
            Region::Hisui => "Hisuian",
            Region::Paldea => "Paldean",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Region::Alola => "Alola",
            Region::Galar => "Galar",
            Region::Hisui => "Hisui",
            Region::Paldea => "Paldea",
        };
        f.write_str(name)
    }
}

static REGION_FORMES: phf::Map<&'static str, Region> = phf_map! {
    "Alola" => Region::Alola,
    "Alola-Totem" => Region::Alola,
    "Galar" => Region::Galar,
    "Galar-Zen" => Region::Galar,
    "Hisui" => Region::Hisui,
    "Paldea" => Region::Paldea,
};

bitflags! {
    /// Battle-state and special forme markers of a species.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct FormeFlags: u8 {
        const MEGA        = 1 << 0;
        const PRIMAL      = 1 << 1;
        const GMAX        = 1 << 2;
        const BATTLE_ONLY = 1 << 3;
        const TOTEM       = 1 << 4;
    }
}

impl FormeFlags {
    pub fn of(species: &Species, gen: u8) -> Self {
        let mut flags = FormeFlags::empty();
        flags.set(FormeFlags::MEGA, species.is_mega);
        flags.set(FormeFlags::PRIMAL, species.is_primal);
        flags.set(
            FormeFlags::GMAX,
            gen == 8 && species.is_nonstandard.as_deref() == Some("Gigantamax"),
        );
        // Gigantamax formes count as battle-only even though Showdown
        // doesn't mark them
        flags.set(
            FormeFlags::BATTLE_ONLY,
            species.is_battle_only() || flags.contains(FormeFlags::GMAX),
        );
        // marowak-alola-totem, mimikyu-busted-totem, ...
        flags.set(FormeFlags::TOTEM, species.forme.ends_with("Totem"));
        flags
    }
}

// ============================================================================
// Pure derivations
// ============================================================================

pub fn region(species: &Species, slug: &str, overrides: &SpeciesOverrides) -> Option<Region> {
    if let Some(region) = overrides.get(slug).and_then(|o| o.region) {
        return region;
    }
    REGION_FORMES.get(species.forme.as_str()).copied()
}

/// Display name. Prefixes are applied in a fixed order: region adjective,
/// mega forme, primal forme, then "Gigantamax".
pub fn display_name(
    species: &Species,
    base: Option<&Species>,
    slug: &str,
    flags: FormeFlags,
    region: Option<Region>,
    overrides: &SpeciesOverrides,
) -> String {
    if let Some(name) = overrides.get(slug).and_then(|o| o.name.as_ref()) {
        return name.clone();
    }
    let Some(base) = base else {
        return species.name.clone();
    };

    let prefixes = [
        region.is_some(),
        flags.contains(FormeFlags::MEGA),
        flags.contains(FormeFlags::PRIMAL),
        flags.contains(FormeFlags::GMAX),
    ];
    if prefixes.iter().filter(|&&applies| applies).count() > 1 {
        warn!(slug, "several name prefixes apply, verify the display name");
    }

    let mut name = base.name.clone();
    if let Some(region) = region {
        name = format!("{} {}", region.adjective(), name);
    }
    if flags.contains(FormeFlags::MEGA) {
        name = format!("{} {}", species.forme, name);
    }
    if flags.contains(FormeFlags::PRIMAL) {
        name = format!("{} {}", species.forme, name);
    }
    if flags.contains(FormeFlags::GMAX) {
        name = format!("Gigantamax {}", name);
    }
    name
}

/// Sub-name shown under the display name, e.g. "Blade" for Aegislash-Blade.
pub fn sub_name(
    species: &Species,
    slug: &str,
    flags: FormeFlags,
    region: Option<Region>,
    overrides: &SpeciesOverrides,
) -> Option<String> {
    let entry = overrides.get(slug);
    if let Some(sub_name) = entry.and_then(|o| o.sub_name.as_ref()) {
        return Some(sub_name.clone());
    }
    if entry.is_some_and(|o| o.hide_sub_name) {
        return None;
    }

    let in_name = FormeFlags::MEGA | FormeFlags::PRIMAL | FormeFlags::GMAX;
    if species.forme.is_empty() || region.is_some() || flags.intersects(in_name) {
        return None;
    }
    Some(species.forme.clone())
}

pub fn cosmetic_sub_name(species: &Species, slug: &str, overrides: &SpeciesOverrides) -> Option<String> {
    if let Some(name) = overrides.get(slug).and_then(|o| o.cosmetic_sub_name.as_ref()) {
        return Some(name.clone());
    }
    if species.cosmetic_formes.is_empty() || species.base_forme.is_empty() {
        return None;
    }
    Some(species.base_forme.clone())
}

/// Sort position among the formes of the same base species.
pub fn forme_index(species: &Species, base: Option<&Species>, flags: FormeFlags) -> usize {
    let Some(base) = base.filter(|b| !b.forme_order.is_empty()) else {
        return 0;
    };
    if flags.contains(FormeFlags::GMAX) {
        return GMAX_FORME_INDEX;
    }
    base.forme_order
        .iter()
        .position(|name| *name == species.name)
        .unwrap_or(base.forme_order.len())
}

/// Legendary / mythical flags, inherited from the base species slug.
pub fn classification(
    slug: &str,
    base_slug: Option<&str>,
    overrides: &SpeciesOverrides,
) -> (bool, bool) {
    let lookup = |pick: fn(&crate::extra_data::SpeciesOverride) -> bool| {
        overrides.get(slug).is_some_and(pick)
            || base_slug.is_some_and(|base| overrides.get(base).is_some_and(pick))
    };
    (lookup(|o| o.is_legendary), lookup(|o| o.is_mythical))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CosmeticForme {
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_name: Option<String>,
}

// ============================================================================
// Deriver
// ============================================================================

/// Everything the pokemon export needs beyond the raw species record.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeciesAttributes {
    pub slug: String,
    pub base_slug: Option<String>,
    pub flags: FormeFlags,
    pub region: Option<Region>,
    pub name: String,
    pub sub_name: Option<String>,
    pub cosmetic_sub_name: Option<String>,
    pub cosmetic_formes: Vec<CosmeticForme>,
    pub formes: Option<Vec<String>>,
    pub forme_index: usize,
    pub can_gmax: bool,
    pub is_legendary: bool,
    pub is_mythical: bool,
    pub gmax_move: Option<String>,
}

pub struct SpeciesAttributeDeriver<'a> {
    gen: &'a dyn GenerationData,
    resolver: SlugResolver<'a>,
    overrides: &'a SpeciesOverrides,
    cosmetic_formes: &'a std::collections::HashMap<String, CosmeticFormeExtra>,
}

impl<'a> SpeciesAttributeDeriver<'a> {
    pub fn new(
        gen: &'a dyn GenerationData,
        overrides: &'a SpeciesOverrides,
        cosmetic_formes: &'a std::collections::HashMap<String, CosmeticFormeExtra>,
    ) -> Self {
        SpeciesAttributeDeriver {
            gen,
            resolver: SlugResolver::new(overrides),
            overrides,
            cosmetic_formes,
        }
    }

    pub fn derive(&self, species: &Species) -> SpeciesAttributes {
        let gen = self.gen.num();
        let base = base_species(self.gen, species);
        let slug = self.resolver.resolve(species, base);
        let base_slug = base.map(|b| self.resolver.resolve(b, None));
        let flags = FormeFlags::of(species, gen);
        let can_gmax = gen == 8 && species.can_gigantamax.is_some();
        let region = region(species, &slug, self.overrides);
        let (is_legendary, is_mythical) =
            classification(&slug, base_slug.as_deref(), self.overrides);

        SpeciesAttributes {
            name: display_name(species, base, &slug, flags, region, self.overrides),
            sub_name: sub_name(species, &slug, flags, region, self.overrides),
            cosmetic_sub_name: cosmetic_sub_name(species, &slug, self.overrides),
            cosmetic_formes: self.cosmetic_formes(species),
            formes: self.formes(species, base, &slug, can_gmax),
            forme_index: forme_index(species, base, flags),
            gmax_move: (gen == 8).then(|| self.gmax_move(species, base)).flatten(),
            slug,
            base_slug,
            flags,
            region,
            can_gmax,
            is_legendary,
            is_mythical,
        }
    }

    /// Slugs of the formes with their own entry, Gigantamax appended.
    fn formes(
        &self,
        species: &Species,
        base: Option<&Species>,
        slug: &str,
        can_gmax: bool,
    ) -> Option<Vec<String>> {
        if let Some(formes) = self
            .overrides
            .get(slug)
            .and_then(|o| o.formes.as_ref())
            .filter(|f| !f.is_empty())
        {
            // toxtricity and urshifu have two gmax formes
            return Some(formes.clone());
        }

        let mut formes = self
            .resolver
            .resolve_names(self.gen, &species.other_formes)
            .unwrap_or_default();
        if can_gmax && base.is_none() {
            formes.push(format!("{}-gmax", slug));
        }
        (!formes.is_empty()).then_some(formes)
    }

    fn cosmetic_formes(&self, species: &Species) -> Vec<CosmeticForme> {
        let mut formes: Vec<(usize, CosmeticForme)> = species
            .cosmetic_formes
            .iter()
            .filter_map(|name| {
                let slug = self.resolver.resolve_name(self.gen, name)?;
                let position = species
                    .forme_order
                    .iter()
                    .position(|n| n == name)
                    .unwrap_or(usize::MAX);
                let sub_name = self
                    .cosmetic_formes
                    .get(&slug)
                    .and_then(|c| c.sub_name.clone())
                    .filter(|s| !s.is_empty());
                Some((position, CosmeticForme { slug, sub_name }))
            })
            .collect();
        formes.sort_by_key(|(position, _)| *position);
        formes.into_iter().map(|(_, forme)| forme).collect()
    }

    /// The G-Max move of a species, taken from the base species for the
    /// Gigantamax forme itself.
    fn gmax_move(&self, species: &Species, base: Option<&Species>) -> Option<String> {
        let move_id = |s: &Species| {
            s.can_gigantamax
                .as_deref()
                .and_then(|name| self.gen.get_move(name))
                .map(|m| m.id.clone())
        };
        move_id(species).or_else(|| base.and_then(move_id))
    }

    /// Species slug a signature max move is tied to via its `isMax` field.
    pub fn max_move_owner(&self, mv: &Move) -> Option<String> {
        self.resolver.resolve_name(self.gen, mv.gmax_species()?)
    }
}
