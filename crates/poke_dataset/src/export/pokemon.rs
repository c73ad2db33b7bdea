//! Species index and detail documents.

use indexmap::IndexMap;
use serde::Serialize;
use showdown_data::{BaseStats, GenderRatio, GenerationData, Species};
use tracing::info;

use super::{name_to_slug, GenerationContext, SpeciesRefs};
use crate::attributes::{
    CosmeticForme, FormeFlags, Region, SpeciesAttributeDeriver, SpeciesAttributes,
};
use crate::error::Result;
use crate::extra_data::SpeciesOverrides;
use crate::learnset::{Learnset, LearnsetMerger};
use crate::slug::{base_species, SlugResolver};
use crate::species_index::SpeciesIndex;

fn flag(value: bool) -> Option<bool> {
    value.then_some(true)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PokemonDetail {
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_name: Option<String>,
    pub num: i32,
    pub types: Vec<String>,
    pub gen: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abilities: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_ability_unreleased: Option<bool>,
    pub base_stats: BaseStats,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prevo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evo_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evo_condition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evo_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evo_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evo_move: Option<String>,

    /// Only set on formes whose base species is missing from the generation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_forme: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_species: Option<String>,
    /// Forme this one changes from, when it differs from the base species.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_form: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forme_trigger_ability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forme_trigger_item: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forme_trigger_items: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forme_trigger_move: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_battle_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mega: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_primal: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_totem: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_gmax: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cosmetic_sub_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cosmetic_formes: Vec<CosmeticForme>,
    #[serde(skip)]
    pub forme_index: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender_ratio: Option<GenderRatio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub egg_groups: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_hatch: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_unobtainable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_legendary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_mythical: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cannot_dynamax: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_gmax: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gmax_unreleased: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gmax_move: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub learnset: Option<Learnset>,
}

/// Entry of `pokemon.json`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PokemonIndexEntry<'a> {
    pub slug: &'a str,
    pub name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_name: Option<&'a str>,
    pub num: i32,
    pub types: &'a [String],
    pub gen: u8,
    pub base_stats: BaseStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_battle_only: Option<bool>,
}

impl<'a> From<&'a PokemonDetail> for PokemonIndexEntry<'a> {
    fn from(detail: &'a PokemonDetail) -> Self {
        PokemonIndexEntry {
            slug: &detail.slug,
            name: &detail.name,
            sub_name: detail.sub_name.as_deref(),
            num: detail.num,
            types: &detail.types,
            gen: detail.gen,
            base_stats: detail.base_stats,
            is_battle_only: detail.is_battle_only,
        }
    }
}

/// Builds detail documents for the species of one generation.
pub struct PokemonBuilder<'a> {
    gen: &'a dyn GenerationData,
    resolver: SlugResolver<'a>,
    overrides: &'a SpeciesOverrides,
    deriver: SpeciesAttributeDeriver<'a>,
    merger: LearnsetMerger<'a>,
}

impl<'a> PokemonBuilder<'a> {
    pub fn new(
        ctx: &GenerationContext<'a>,
        index: &'a SpeciesIndex,
    ) -> Result<Self> {
        let extra = ctx.extra.pokemon()?;
        let manual = ctx.extra.learnsets()?;
        Ok(PokemonBuilder {
            gen: ctx.gen,
            resolver: SlugResolver::new(&extra.overrides),
            overrides: &extra.overrides,
            deriver: SpeciesAttributeDeriver::new(ctx.gen, &extra.overrides, &extra.cosmetic_formes),
            merger: LearnsetMerger::new(ctx.gen, ctx.alternate, index, &extra.overrides, manual),
        })
    }

    /// Detail document of `species`, `None` for skipped (totem) formes.
    pub fn build(&self, species: &Species) -> Option<PokemonDetail> {
        let attrs = self.deriver.derive(species);
        if attrs.flags.contains(FormeFlags::TOTEM) {
            return None;
        }
        Some(self.detail(species, attrs))
    }

    fn detail(&self, species: &Species, attrs: SpeciesAttributes) -> PokemonDetail {
        let gen = self.gen.num();
        let has_eggs = gen >= 2;
        let has_abilities = gen >= 3;
        let has_dynamax = gen == 8;

        let base = base_species(self.gen, species);
        let entry = self.overrides.get(&attrs.slug);
        let battle_only = attrs.flags.contains(FormeFlags::BATTLE_ONLY);

        // battle-only formes share the learnset of the forme they change
        // from, unless the override keeps it (zamazenta-crowned)
        let learnset = (!battle_only || entry.is_some_and(|o| o.keep_learnset))
            .then(|| self.merger.merged_learnset(species))
            .filter(|learnset| !learnset.is_empty());

        let base_form = match (base, species.changes_from.as_deref()) {
            (Some(base), Some(from)) if base.name == from => None,
            (_, Some(from)) => self.resolver.resolve_name(self.gen, from),
            _ => None,
        };

        PokemonDetail {
            name: attrs.name,
            sub_name: attrs.sub_name,
            num: species.num,
            types: species.types.iter().map(|t| name_to_slug(t)).collect(),
            gen: species.gen,
            abilities: has_abilities.then(|| self.ability_slugs(species)).flatten(),
            hidden_ability_unreleased: has_abilities.then(|| flag(species.unreleased_hidden)).flatten(),
            base_stats: species.base_stats,

            prevo: species
                .prevo
                .as_deref()
                .and_then(|prevo| self.resolver.resolve_name(self.gen, prevo)),
            evos: self.resolver.resolve_names(self.gen, &species.evos),
            evo_type: species.evo_type.clone(),
            evo_condition: species.evo_condition.clone(),
            evo_level: species.evo_level,
            evo_item: species.evo_item.clone(),
            evo_move: species.evo_move.clone(),

            is_forme: if attrs.base_slug.is_some() {
                None
            } else {
                flag(!species.forme.is_empty())
            },
            base_species: attrs.base_slug,
            base_form,
            forme_trigger_ability: species
                .required_ability
                .as_deref()
                .and_then(|name| self.gen.get_ability(name))
                .map(|ability| ability.id.clone()),
            forme_trigger_item: species
                .required_item
                .as_deref()
                .and_then(|name| self.gen.get_item(name))
                .map(|item| item.id.clone()),
            forme_trigger_items: (species.required_items.len() > 1).then(|| {
                species
                    .required_items
                    .iter()
                    .filter_map(|name| self.gen.get_item(name))
                    .map(|item| item.id.clone())
                    .collect()
            }),
            forme_trigger_move: species
                .required_move
                .as_deref()
                .and_then(|name| self.gen.get_move(name))
                .map(|mv| mv.id.clone()),

            region: attrs.region,
            is_battle_only: flag(battle_only),
            is_mega: flag(species.is_mega),
            is_primal: flag(species.is_primal),
            is_totem: flag(attrs.flags.contains(FormeFlags::TOTEM)),
            is_gmax: flag(attrs.flags.contains(FormeFlags::GMAX)),
            formes: attrs.formes,
            cosmetic_sub_name: attrs.cosmetic_sub_name,
            cosmetic_formes: attrs.cosmetic_formes,
            forme_index: attrs.forme_index,

            weight: species.weightkg,
            height: species.heightm,
            gender: species.gender.clone(),
            gender_ratio: (has_eggs && species.gender.is_none()).then_some(species.gender_ratio),
            egg_groups: has_eggs.then(|| species.egg_groups.clone()),
            can_hatch: has_eggs.then(|| flag(species.can_hatch)).flatten(),

            is_unobtainable: flag(species.is_nonstandard.as_deref() == Some("Unobtainable")),
            is_legendary: flag(attrs.is_legendary),
            is_mythical: flag(attrs.is_mythical),
            cannot_dynamax: has_dynamax.then(|| flag(species.cannot_dynamax)).flatten(),
            can_gmax: flag(attrs.can_gmax),
            gmax_unreleased: has_dynamax.then(|| flag(species.gmax_unreleased)).flatten(),
            gmax_move: attrs.gmax_move,
            flavor_text: entry.and_then(|o| o.flavor_text.clone()),

            learnset,
            slug: attrs.slug,
        }
    }

    /// Ability slot ("0", "1", "H", "S") to ability id.
    fn ability_slugs(&self, species: &Species) -> Option<IndexMap<String, String>> {
        let abilities: IndexMap<String, String> = species
            .abilities
            .iter()
            .filter_map(|(slot, name)| {
                let ability = self.gen.get_ability(name)?;
                Some((slot.clone(), ability.id.clone()))
            })
            .collect();
        (!abilities.is_empty()).then_some(abilities)
    }
}

/// Record which moves, abilities and G-Max moves `detail` has.
fn collect_refs(gen: &dyn GenerationData, species: &Species, detail: &PokemonDetail, refs: &mut SpeciesRefs) {
    refs.slugs.insert(detail.slug.clone());

    if let Some(learnset) = &detail.learnset {
        for move_slug in learnset.keys() {
            refs.moves.add(move_slug, &detail.slug);
        }
    }
    for name in species.abilities.values() {
        if let Some(ability) = gen.get_ability(name) {
            refs.abilities.add(&ability.id, &detail.slug);
        }
    }
    if let Some(gmax_move) = &detail.gmax_move {
        refs.gmax_moves.add(gmax_move, &detail.slug);
    }
}

/// Export `pokemon.json` and `pokemon/<slug>.json`. Returns the number of
/// species written and the references the other exporters need.
pub fn export(ctx: &GenerationContext) -> Result<(usize, SpeciesRefs)> {
    info!("- pokemon");

    let extra = ctx.extra.pokemon()?;
    let resolver = SlugResolver::new(&extra.overrides);
    let index = SpeciesIndex::build(ctx.gen, &resolver)?;
    let builder = PokemonBuilder::new(ctx, &index)?;

    let mut refs = SpeciesRefs::default();
    let mut result = Vec::new();
    for species in ctx.gen.species() {
        let Some(detail) = builder.build(species) else {
            continue;
        };
        collect_refs(ctx.gen, species, &detail, &mut refs);
        result.push(detail);
    }

    result.sort_by(|a, b| {
        (a.num, a.forme_index, &a.slug).cmp(&(b.num, b.forme_index, &b.slug))
    });

    if !result.is_empty() {
        info!("writing {} pokemon...", result.len());
        let index: Vec<PokemonIndexEntry> = result.iter().map(PokemonIndexEntry::from).collect();
        ctx.writer.write("pokemon.json", &index)?;

        info!("writing {} pokemon details...", result.len());
        for detail in &result {
            ctx.writer.write(format!("pokemon/{}.json", detail.slug), detail)?;
        }
    }

    Ok((result.len(), refs))
}
