//! Per-generation lookup from upstream species identifiers to slugs.

use std::collections::HashMap;

use showdown_data::GenerationData;
use tracing::debug;

use crate::error::{Error, Result};
use crate::slug::{base_species, SlugResolver};

/// Maps upstream display names and ids to slugs. Built fresh for every
/// generation since ids and names are reused across generations.
#[derive(Debug, Clone, Default)]
pub struct SpeciesIndex {
    by_name: HashMap<String, String>,
    by_id: HashMap<String, String>,
    id_by_slug: HashMap<String, String>,
}

impl SpeciesIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a slug for every species of `gen`.
    pub fn build(gen: &dyn GenerationData, resolver: &SlugResolver) -> Result<Self> {
        let mut index = SpeciesIndex::new();
        for species in gen.species() {
            let slug = resolver.resolve(species, base_species(gen, species));
            index.add(&species.name, &species.id, &slug)?;
        }
        debug!(gen = gen.num(), species = index.len(), "species index built");
        Ok(index)
    }

    /// Register a species. Fails when `slug` already belongs to another id.
    pub fn add(&mut self, name: &str, id: &str, slug: &str) -> Result<()> {
        if let Some(existing) = self.id_by_slug.get(slug) {
            if existing != id {
                return Err(Error::DuplicateSlug {
                    slug: slug.to_string(),
                    existing: existing.clone(),
                    incoming: id.to_string(),
                });
            }
        }
        self.by_name.insert(name.to_string(), slug.to_string());
        self.by_id.insert(id.to_string(), slug.to_string());
        self.id_by_slug.insert(slug.to_string(), id.to_string());
        Ok(())
    }

    pub fn get_slug_by_name(&self, name: &str) -> Option<&str> {
        self.by_name.get(name).map(|s| s.as_str())
    }

    pub fn get_slug_by_id(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(|s| s.as_str())
    }

    pub fn get_id_by_slug(&self, slug: &str) -> Option<&str> {
        self.id_by_slug.get(slug).map(|s| s.as_str())
    }

    pub fn contains_slug(&self, slug: &str) -> bool {
        self.id_by_slug.contains_key(slug)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_ways() {
        let mut index = SpeciesIndex::new();
        index.add("Aegislash-Blade", "aegislashblade", "aegislash-blade").unwrap();

        assert_eq!(index.get_slug_by_name("Aegislash-Blade"), Some("aegislash-blade"));
        assert_eq!(index.get_slug_by_id("aegislashblade"), Some("aegislash-blade"));
        assert_eq!(index.get_id_by_slug("aegislash-blade"), Some("aegislashblade"));
        assert_eq!(index.get_slug_by_name("Aegislash"), None);
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let mut index = SpeciesIndex::new();
        index.add("Pikachu", "pikachu", "pikachu").unwrap();
        // re-adding the same species is harmless
        index.add("Pikachu", "pikachu", "pikachu").unwrap();

        let err = index.add("Pika-Chu", "pikachu2", "pikachu").unwrap_err();
        assert!(matches!(err, Error::DuplicateSlug { .. }));
    }
}
