//! `natures.json`.

use serde::Serialize;
use tracing::info;

use super::GenerationContext;
use crate::error::Result;
use crate::merge::MergeData;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NatureRecord {
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plus: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minus: Option<String>,
}

pub fn export(ctx: &GenerationContext, merge: &mut MergeData) -> Result<usize> {
    info!("- natures");

    let mut result: Vec<NatureRecord> = ctx
        .gen
        .natures()
        .iter()
        .map(|nature| NatureRecord {
            slug: nature.id.clone(),
            name: nature.name.clone(),
            plus: nature.plus.clone(),
            minus: nature.minus.clone(),
        })
        .collect();

    result.sort_by(|a, b| a.slug.cmp(&b.slug));
    merge.set_natures(&result);

    if !result.is_empty() {
        info!("writing {} natures...", result.len());
        ctx.writer.write("natures.json", &result)?;
    }

    Ok(result.len())
}
