//! `moves.json`.

use std::collections::BTreeSet;

use serde::Serialize;
use showdown_data::models::{MaxMoveData, ZMoveData};
use showdown_data::Move;
use tracing::{info, warn};

use super::{name_to_slug, GenerationContext, SpeciesRefs};
use crate::attributes::SpeciesAttributeDeriver;
use crate::error::Result;
use crate::extra_data::MoveOverride;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub slug: String,
    pub name: String,
    pub gen: u8,
    #[serde(rename = "type")]
    pub move_type: String,
    pub category: String,
    pub base_power: u16,
    /// Omitted for moves that never miss.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<u8>,
    pub pp: u8,
    pub target: String,
    pub priority: i8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_z: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_move: Option<ZMoveData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_max: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_move: Option<MaxMoveData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_pokemon: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pokemon: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor_text: Option<String>,
}

/// Species a signature move belongs to: the `isMax` species and the
/// species using it as G-Max move (gen 8 only), plus any curated additions.
/// Curated slugs without species data are dropped.
fn exclusive_pokemon(
    mv: &Move,
    deriver: &SpeciesAttributeDeriver,
    refs: &SpeciesRefs,
    extra: Option<&MoveOverride>,
    has_max_moves: bool,
) -> Option<Vec<String>> {
    let mut slugs = BTreeSet::new();

    if has_max_moves {
        if let Some(species) = mv.gmax_species() {
            match deriver.max_move_owner(mv) {
                Some(slug) => {
                    slugs.insert(slug);
                }
                None => warn!(move_id = %mv.id, species, "exclusive species not found"),
            }
        }
        if let Some(users) = refs.gmax_moves.get(&mv.id) {
            slugs.extend(users.iter().cloned());
        }
    }
    if let Some(extra) = extra {
        for slug in &extra.exclusive_pokemon {
            if !refs.slugs.contains(slug) {
                warn!(move_id = %mv.id, species = %slug, "exclusive species not found");
                continue;
            }
            slugs.insert(slug.clone());
        }
    }

    (!slugs.is_empty()).then(|| slugs.into_iter().collect())
}

pub fn export(ctx: &GenerationContext, refs: &SpeciesRefs) -> Result<usize> {
    info!("- moves");

    let pokemon = ctx.extra.pokemon()?;
    let overrides = ctx.extra.moves()?;
    let deriver = SpeciesAttributeDeriver::new(ctx.gen, &pokemon.overrides, &pokemon.cosmetic_formes);

    let has_z_moves = ctx.num() == 7;
    let has_max_moves = ctx.num() == 8;

    let mut result: Vec<MoveRecord> = ctx
        .gen
        .moves()
        .iter()
        .map(|mv| {
            let extra = overrides.get(&mv.id);
            MoveRecord {
                slug: mv.id.clone(),
                name: extra
                    .and_then(|o| o.name.clone())
                    .unwrap_or_else(|| mv.name.clone()),
                gen: mv.gen,
                move_type: name_to_slug(&mv.move_type),
                category: name_to_slug(&mv.category),
                base_power: mv.base_power,
                accuracy: mv.accuracy.percent(),
                pp: mv.pp,
                target: mv.target.clone(),
                priority: mv.priority,
                is_z: mv.is_z.clone().filter(|_| has_z_moves),
                z_move: mv.z_move.clone().filter(|_| has_z_moves),
                is_max: (has_max_moves && (mv.is_max.is_some() || extra.is_some_and(|o| o.is_max)))
                    .then_some(true),
                max_move: mv.max_move.filter(|_| has_max_moves),
                exclusive_pokemon: exclusive_pokemon(mv, &deriver, refs, extra, has_max_moves),
                pokemon: refs.moves.species(&mv.id),
                desc: mv.desc.clone(),
                short_desc: mv.short_desc.clone(),
                flavor_text: extra.and_then(|o| o.flavor_text.clone()),
            }
        })
        .collect();

    result.sort_by(|a, b| a.slug.cmp(&b.slug));

    if !result.is_empty() {
        info!("writing {} moves...", result.len());
        ctx.writer.write("moves.json", &result)?;
    }

    Ok(result.len())
}
