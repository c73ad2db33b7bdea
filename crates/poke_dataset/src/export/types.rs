//! `types.json`: type matchups and move categories.

use indexmap::IndexMap;
use serde::Serialize;
use showdown_data::{GenerationData, TypeInfo};
use tracing::info;

use super::{name_to_slug, GenerationContext};
use crate::error::Result;
use crate::extra_data::{CategoryExtra, TypeColor};
use crate::merge::MergeData;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TypeRecord {
    pub slug: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Multiplier when hit by each type, ordered by (value, type).
    pub damage_taken: IndexMap<String, f64>,
    /// Multiplier when hitting each type, ordered by (value, type).
    pub damage_done: IndexMap<String, f64>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryRecord {
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TypesDocument {
    pub types: Vec<TypeRecord>,
    pub categories: Vec<CategoryRecord>,
}

fn ordered(mut values: Vec<(String, f64)>) -> IndexMap<String, f64> {
    values.sort_by(|(a_type, a), (b_type, b)| a.total_cmp(b).then_with(|| a_type.cmp(b_type)));
    values.into_iter().collect()
}

fn type_record(gen: &dyn GenerationData, ty: &TypeInfo, color: Option<&TypeColor>) -> TypeRecord {
    let mut taken = Vec::new();
    let mut done = Vec::new();
    for other in gen.types() {
        let other_slug = name_to_slug(&other.name);
        taken.push((other_slug.clone(), gen.total_effectiveness(&other.name, &ty.name)));
        done.push((other_slug, gen.total_effectiveness(&ty.name, &other.name)));
    }

    TypeRecord {
        slug: name_to_slug(&ty.name),
        name: ty.name.clone(),
        color: color.and_then(|c| c.color.clone()),
        damage_taken: ordered(taken),
        damage_done: ordered(done),
    }
}

pub fn types_document(
    gen: &dyn GenerationData,
    colors: &std::collections::HashMap<String, TypeColor>,
    categories: &IndexMap<String, CategoryExtra>,
) -> TypesDocument {
    let mut types: Vec<TypeRecord> = gen
        .types()
        .iter()
        .filter(|ty| !ty.is_unknown())
        .map(|ty| type_record(gen, ty, colors.get(&name_to_slug(&ty.name))))
        .collect();
    types.sort_by(|a, b| a.slug.cmp(&b.slug));

    let categories = categories
        .iter()
        .map(|(slug, category)| CategoryRecord {
            slug: slug.clone(),
            name: category.name.clone(),
            color: category.color.clone(),
        })
        .collect();

    TypesDocument { types, categories }
}

pub fn export(ctx: &GenerationContext, merge: &mut MergeData) -> Result<usize> {
    info!("- types");

    let extra = ctx.extra.types()?;
    let document = types_document(ctx.gen, &extra.types, &extra.categories);
    merge.add_type_data(ctx.num(), &document.types, &document.categories);

    if !document.types.is_empty() || !document.categories.is_empty() {
        info!(
            "writing {} types and {} categories...",
            document.types.len(),
            document.categories.len()
        );
        ctx.writer.write("types.json", &document)?;
    }

    Ok(document.types.len())
}
