//! `abilities.json`.

use serde::Serialize;
use tracing::info;

use super::{GenerationContext, SpeciesRefs};
use crate::error::Result;
use crate::merge::MergeData;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AbilityRecord {
    pub slug: String,
    pub name: String,
    pub gen: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pokemon: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flavor_text: Option<String>,
}

pub fn export(ctx: &GenerationContext, refs: &SpeciesRefs, merge: &mut MergeData) -> Result<usize> {
    info!("- abilities");

    let overrides = ctx.extra.abilities()?;

    let mut result: Vec<AbilityRecord> = ctx
        .gen
        .abilities()
        .iter()
        .map(|ability| {
            let extra = overrides.get(&ability.id);
            // a curated species list replaces the derived one
            let pokemon = match extra.and_then(|o| o.pokemon.as_ref()) {
                Some(list) => {
                    let mut list = list.clone();
                    list.sort();
                    list.dedup();
                    Some(list)
                }
                None => refs.abilities.species(&ability.id),
            };

            AbilityRecord {
                slug: ability.id.clone(),
                name: extra
                    .and_then(|o| o.name.clone())
                    .unwrap_or_else(|| ability.name.clone()),
                gen: ability.gen,
                pokemon,
                desc: ability.desc.clone(),
                short_desc: extra
                    .and_then(|o| o.short_desc.clone())
                    .or_else(|| ability.short_desc.clone()),
                flavor_text: extra.and_then(|o| o.flavor_text.clone()),
            }
        })
        .collect();

    result.sort_by(|a, b| a.slug.cmp(&b.slug));

    for record in &result {
        merge.add_ability(&record.slug, ctx.num(), record.clone());
    }

    if !result.is_empty() {
        info!("writing {} abilities...", result.len());
        ctx.writer.write("abilities.json", &result)?;
    }

    Ok(result.len())
}
