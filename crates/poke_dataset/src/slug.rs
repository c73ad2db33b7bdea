//! Stable species slugs.
//!
//! A slug is a pure function of the species name, its base species name (for
//! formes) and the override table: `Aegislash-Blade` -> `aegislash-blade`
//! instead of Showdown's `aegislashblade`.

use showdown_data::{GenerationData, Species};

use crate::extra_data::SpeciesOverrides;

fn keep_alphanumeric(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

fn keep_alphanumeric_and_hyphen(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

/// Base species entry of a forme, when the generation has one.
pub fn base_species<'g>(gen: &'g dyn GenerationData, species: &Species) -> Option<&'g Species> {
    if species.is_forme() {
        gen.get_species(&species.base_species)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SlugResolver<'a> {
    overrides: &'a SpeciesOverrides,
}

impl<'a> SlugResolver<'a> {
    pub fn new(overrides: &'a SpeciesOverrides) -> Self {
        SlugResolver { overrides }
    }

    /// Slug for `species`. `base` is its base species when the forme has one
    /// in the current generation; without it the forme's own name is used.
    pub fn resolve(&self, species: &Species, base: Option<&Species>) -> String {
        if let Some(slug) = self.overrides.get(&species.id).and_then(|o| o.slug.as_ref()) {
            return slug.clone();
        }

        match base {
            Some(base) => format!(
                "{}-{}",
                keep_alphanumeric(&base.name),
                keep_alphanumeric_and_hyphen(&species.forme)
            )
            .to_ascii_lowercase(),
            None => keep_alphanumeric(&species.name).to_ascii_lowercase(),
        }
    }

    /// Slug for a species referenced by name (prevo, evos, formes, ...).
    /// `None` when the name does not exist in `gen`.
    pub fn resolve_name(&self, gen: &dyn GenerationData, name: &str) -> Option<String> {
        let species = gen.get_species(name)?;
        Some(self.resolve(species, base_species(gen, species)))
    }

    pub fn resolve_names(&self, gen: &dyn GenerationData, names: &[String]) -> Option<Vec<String>> {
        let slugs: Vec<String> = names
            .iter()
            .filter_map(|name| self.resolve_name(gen, name))
            .collect();
        (!slugs.is_empty()).then_some(slugs)
    }
}
