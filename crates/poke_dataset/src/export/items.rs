//! `items.json`.

use serde::Serialize;
use tracing::info;

use super::GenerationContext;
use crate::error::Result;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemRecord {
    pub slug: String,
    pub name: String,
    pub gen: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_desc: Option<String>,
}

pub fn export(ctx: &GenerationContext) -> Result<usize> {
    info!("- items");

    let mut result: Vec<ItemRecord> = ctx
        .gen
        .items()
        .iter()
        .map(|item| ItemRecord {
            slug: item.id.clone(),
            name: item.name.clone(),
            gen: item.gen,
            desc: item.desc.clone(),
            short_desc: item.short_desc.clone().filter(|s| !s.is_empty()),
        })
        .collect();

    result.sort_by(|a, b| a.slug.cmp(&b.slug));

    if !result.is_empty() {
        info!("writing {} items...", result.len());
        ctx.writer.write("items.json", &result)?;
    }

    Ok(result.len())
}
