//! `pokedex/<dex>.json` for the pokedexes used by a generation's games.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{info, warn};

use super::{GenerationContext, SpeciesRefs};
use crate::error::Result;
use crate::extra_data::{PokedexData, PokedexEntry};
use crate::merge::MergeData;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PokedexRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub data: Vec<PokedexEntry>,
}

impl From<&PokedexData> for PokedexRecord {
    fn from(dex: &PokedexData) -> Self {
        PokedexRecord {
            name: dex.name.clone(),
            data: dex.data.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PokedexDocument {
    pub slug: String,
    pub games: BTreeSet<String>,
    #[serde(flatten)]
    pub record: PokedexRecord,
}

pub fn export(ctx: &GenerationContext, refs: &SpeciesRefs, merge: &mut MergeData) -> Result<usize> {
    info!("- pokedex");

    let games = ctx.extra.games()?;
    let dexes = ctx.extra.pokedex()?;

    let mut result: BTreeMap<&str, PokedexDocument> = BTreeMap::new();
    for set in games.iter().filter(|set| set.gen == ctx.num()) {
        let set_games: BTreeSet<String> = set.games.iter().map(|g| g.slug.clone()).collect();

        for dex_slug in &set.pokedex {
            let Some(dex) = dexes.get(dex_slug) else {
                warn!(pokedex = %dex_slug, "pokedex has no data");
                continue;
            };
            let mut record = PokedexRecord::from(dex);
            record.data.retain(|entry| {
                let known = refs.slugs.contains(&entry.slug);
                if !known {
                    warn!(
                        pokedex = %dex_slug,
                        species = %entry.slug,
                        "pokedex references species without data"
                    );
                }
                known
            });

            merge.add_pokedex(dex_slug, &set_games, &record);
            result
                .entry(dex_slug.as_str())
                .and_modify(|doc| doc.games.extend(set_games.iter().cloned()))
                .or_insert_with(|| PokedexDocument {
                    slug: dex_slug.clone(),
                    games: set_games.clone(),
                    record,
                });
        }
    }

    if !result.is_empty() {
        info!("writing {} pokedexes...", result.len());
        for (dex_slug, document) in &result {
            ctx.writer.write(format!("pokedex/{}.json", dex_slug), document)?;
        }
    }

    Ok(result.len())
}
