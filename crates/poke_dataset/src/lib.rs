//! poke_dataset - Versioned Pokemon dataset builder
//!
//! Reads one Showdown dump per generation plus hand-maintained extra data
//! and writes normalized JSON documents: one directory per generation and a
//! merged cross-generation view.

/// Species attributes (names, regions, formes, flags)
pub mod attributes;
/// Run configuration
pub mod config;
pub mod error;
/// Per-generation category exporters
pub mod export;
/// Hand-maintained extra data loader
pub mod extra_data;
/// Learnset normalization and merging
pub mod learnset;
/// Cross-generation accumulator
pub mod merge;
pub mod output;
/// Species slugs
pub mod slug;
pub mod species_index;

pub use attributes::{FormeFlags, Region, SpeciesAttributeDeriver, SpeciesAttributes};
pub use config::{ExportConfig, ModSource};
pub use error::{Error, Result};
pub use export::{GenerationContext, GenerationSummary};
pub use extra_data::ExtraData;
pub use learnset::{Learnset, LearnsetMerger, MoveSource};
pub use merge::MergeData;
pub use output::JsonWriter;
pub use slug::SlugResolver;
pub use species_index::SpeciesIndex;

use showdown_data::{Generation, GenerationData, LearnsetSource, ModLearnsets};
use tracing::{info, warn};

/// Outcome of a full export run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub generations: Vec<GenerationSummary>,
}

fn load_mod(config: &ExportConfig, gen: u8) -> Result<Option<ModLearnsets>> {
    let Some(source) = config.mod_for(gen) else {
        return Ok(None);
    };
    let dir = config.mod_dir(source);
    if !dir.join("learnsets.json").exists() {
        warn!(name = %source.name, dir = %dir.display(), "mod learnsets missing, skipping");
        return Ok(None);
    }
    Ok(Some(ModLearnsets::load(&dir, &source.name)?))
}

/// Export every configured generation in ascending order, then the merged
/// view. The output directory is emptied first.
pub fn export_all(config: &ExportConfig) -> Result<ExportSummary> {
    let mut config = config.clone();
    config.normalize()?;

    output::empty_dir(&config.out_dir)?;
    let writer = JsonWriter::new(&config.out_dir, config.pretty_print);
    let extra = ExtraData::new(&config.data_dir);
    let mut merge = MergeData::new();
    let mut summary = ExportSummary::default();

    for &num in &config.generations {
        let gen = Generation::load(&config.generation_dir(num), num)?;
        let mod_learnsets = load_mod(&config, num)?;
        let alternate = mod_learnsets.as_ref().map(|m| m as &dyn LearnsetSource);

        let ctx = GenerationContext::new(&gen, alternate, &extra, &writer);
        summary
            .generations
            .push(export::export_generation(&ctx, &mut merge)?);
    }

    merge.export(&writer)?;
    info!("done");
    Ok(summary)
}

/// Merged learnset of one species with the chain it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct LearnsetReport {
    pub slug: String,
    /// Slugs of the chain links, the species itself first.
    pub chain: Vec<String>,
    pub learnset: Learnset,
}

/// Build the merged learnset of `species` (display name or id) in `gen`
/// without writing anything.
pub fn inspect_learnset(config: &ExportConfig, num: u8, species: &str) -> Result<LearnsetReport> {
    let gen = Generation::load(&config.generation_dir(num), num)?;
    let mod_learnsets = load_mod(config, num)?;
    let extra = ExtraData::new(&config.data_dir);
    let pokemon = extra.pokemon()?;
    let manual = extra.learnsets()?;

    let resolver = SlugResolver::new(&pokemon.overrides);
    let index = SpeciesIndex::build(&gen, &resolver)?;
    let target = gen
        .get_species(species)
        .ok_or_else(|| Error::UnknownSpecies {
            name: species.to_string(),
            gen: num,
        })?;

    let merger = LearnsetMerger::new(
        &gen,
        mod_learnsets.as_ref().map(|m| m as &dyn LearnsetSource),
        &index,
        &pokemon.overrides,
        manual,
    );
    let slug_of = |s: &showdown_data::Species| {
        index
            .get_slug_by_id(&s.id)
            .map(str::to_string)
            .unwrap_or_else(|| resolver.resolve(s, slug::base_species(&gen, s)))
    };

    Ok(LearnsetReport {
        slug: slug_of(target),
        chain: merger.ancestor_chain(target).into_iter().map(slug_of).collect(),
        learnset: merger.merged_learnset(target),
    })
}
