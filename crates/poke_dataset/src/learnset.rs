//! Learnset normalization and merging.
//!
//! Showdown encodes how a move is learned as `<gen><method>[<value>]`:
//!
//! - `M` machine (TM/HM/TR)
//! - `T` tutor
//! - `E` egg move
//! - `R` restricted, additional conditions may apply
//! - `L<level>` level-up
//! - `S<event>` special event
//! - `V` virtual console transfer, `D` dream world (never exported)
//!
//! A merged learnset keeps the sources of the current generation only, in
//! the short form `L:15`, `M`, `S`, tagged `@<slug>` when inherited from an
//! earlier stage.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use showdown_data::{GenerationData, LearnsetSource, RawLearnset, Species};
use tracing::{debug, warn};

use crate::extra_data::{ManualLearnsets, SpeciesOverrides};
use crate::species_index::SpeciesIndex;

/// Longest ancestor chain followed for one species.
pub const MAX_LEARNSET_CHAIN: usize = 8;

/// How many `changesFrom` / `baseSpecies` hops an empty learnset may take.
pub const MAX_FALLBACK_DEPTH: usize = 3;

/// Forme qualifiers that do not inherit from their previous evolution.
const TERMINAL_REGIONAL_FORMES: &[&str] = &["Hisui"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LearnMethod {
    LevelUp,
    Machine,
    Tutor,
    Egg,
    Event,
    Restricted,
    VirtualConsole,
    DreamWorld,
}

impl LearnMethod {
    pub fn code(self) -> char {
        match self {
            LearnMethod::LevelUp => 'L',
            LearnMethod::Machine => 'M',
            LearnMethod::Tutor => 'T',
            LearnMethod::Egg => 'E',
            LearnMethod::Event => 'S',
            LearnMethod::Restricted => 'R',
            LearnMethod::VirtualConsole => 'V',
            LearnMethod::DreamWorld => 'D',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Some(match code {
            'L' => LearnMethod::LevelUp,
            'M' => LearnMethod::Machine,
            'T' => LearnMethod::Tutor,
            'E' => LearnMethod::Egg,
            'S' => LearnMethod::Event,
            'R' => LearnMethod::Restricted,
            'V' => LearnMethod::VirtualConsole,
            'D' => LearnMethod::DreamWorld,
            _ => return None,
        })
    }

    /// Transfer-only methods that never make it into a learnset.
    pub fn is_transfer_only(self) -> bool {
        matches!(self, LearnMethod::VirtualConsole | LearnMethod::DreamWorld)
    }
}

/// A normalized move source, written as `kind[:value][@origin]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MoveSource {
    pub method: LearnMethod,
    /// Level for level-up moves.
    pub value: Option<String>,
    /// Slug of the ancestor this source was inherited from.
    pub origin: Option<String>,
}

impl MoveSource {
    pub fn new(method: LearnMethod) -> Self {
        MoveSource {
            method,
            value: None,
            origin: None,
        }
    }

    pub fn level(level: u8) -> Self {
        MoveSource {
            method: LearnMethod::LevelUp,
            value: Some(level.to_string()),
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: Option<String>) -> Self {
        self.origin = origin;
        self
    }

    /// Parse a raw Showdown source for generation `gen`. `None` for sources
    /// of other generations and for unknown codes.
    pub fn from_raw(raw: &str, gen: u8) -> Option<Self> {
        let rest = raw.strip_prefix(char::from_digit(gen as u32, 10)?)?;
        let mut chars = rest.chars();
        let method = LearnMethod::from_code(chars.next()?)?;
        let value = chars.as_str();

        Some(MoveSource {
            method,
            // event numbers are dropped, every event collapses to `S`
            value: (method != LearnMethod::Event && !value.is_empty()).then(|| value.to_string()),
            origin: None,
        })
    }
}

impl fmt::Display for MoveSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.method.code())?;
        if let Some(value) = &self.value {
            write!(f, ":{}", value)?;
        }
        if let Some(origin) = &self.origin {
            write!(f, "@{}", origin)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseMoveSourceError(String);

impl fmt::Display for ParseMoveSourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid move source `{}`", self.0)
    }
}

impl std::error::Error for ParseMoveSourceError {}

impl FromStr for MoveSource {
    type Err = ParseMoveSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseMoveSourceError(s.to_string());
        let (body, origin) = match s.split_once('@') {
            Some((body, origin)) if !origin.is_empty() => (body, Some(origin.to_string())),
            Some(_) => return Err(err()),
            None => (s, None),
        };
        let (code, value) = match body.split_once(':') {
            Some((code, value)) if !value.is_empty() => (code, Some(value.to_string())),
            Some(_) => return Err(err()),
            None => (body, None),
        };
        let mut chars = code.chars();
        let method = match (chars.next(), chars.next()) {
            (Some(c), None) => LearnMethod::from_code(c).ok_or_else(err)?,
            _ => return Err(err()),
        };
        Ok(MoveSource {
            method,
            value,
            origin,
        })
    }
}

impl Serialize for MoveSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MoveSource {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Move slug to its sources, sorted by move slug.
pub type Learnset = BTreeMap<String, Vec<MoveSource>>;

/// True when `sources` already holds an entry learned by `method`.
pub fn has_method(sources: &[MoveSource], method: LearnMethod) -> bool {
    sources.iter().any(|source| source.method == method)
}

/// Keep the sources of generation `gen` in normalized form. Returns `None`
/// when nothing is learnable in that generation.
pub fn prepare_learnset(raw: &RawLearnset, gen: u8) -> Option<Learnset> {
    let mut prepared = Learnset::new();
    for (move_id, raw_sources) in raw {
        let mut sources: Vec<MoveSource> = Vec::new();
        for source in raw_sources.iter().filter_map(|s| MoveSource::from_raw(s, gen)) {
            if !source.method.is_transfer_only() && !sources.contains(&source) {
                sources.push(source);
            }
        }
        if !sources.is_empty() {
            prepared.insert(move_id.clone(), sources);
        }
    }
    (!prepared.is_empty()).then_some(prepared)
}

/// Builds the canonical learnset of a species for one generation by walking
/// its ancestors across the primary dump, manual learnsets and an optional
/// mod dump.
pub struct LearnsetMerger<'a> {
    gen: &'a dyn GenerationData,
    alternate: Option<&'a dyn LearnsetSource>,
    index: &'a SpeciesIndex,
    overrides: &'a SpeciesOverrides,
    manual: &'a ManualLearnsets,
}

impl<'a> LearnsetMerger<'a> {
    pub fn new(
        gen: &'a dyn GenerationData,
        alternate: Option<&'a dyn LearnsetSource>,
        index: &'a SpeciesIndex,
        overrides: &'a SpeciesOverrides,
        manual: &'a ManualLearnsets,
    ) -> Self {
        LearnsetMerger {
            gen,
            alternate,
            index,
            overrides,
            manual,
        }
    }

    /// Merged learnset of `species`. Empty only when neither the species
    /// nor any of its fallbacks learns anything in this generation.
    pub fn merged_learnset(&self, species: &Species) -> Learnset {
        let mut tried = HashSet::new();
        self.merge_with_fallback(species, 0, &mut tried)
    }

    fn merge_with_fallback(
        &self,
        species: &Species,
        depth: usize,
        tried: &mut HashSet<String>,
    ) -> Learnset {
        tried.insert(species.id.clone());

        let merged = self.merge_chain(species);
        if !merged.is_empty() {
            return merged;
        }
        if depth >= MAX_FALLBACK_DEPTH {
            warn!(species = %species.name, "learnset fallback depth exhausted");
            return merged;
        }

        // forms without data of their own inherit from the form they change
        // from (darmanitan-galar-zen) or their base species (pumpkaboo-large)
        let fallbacks = [
            species.changes_from.as_deref(),
            Some(species.base_species.as_str()),
        ];
        for name in fallbacks.into_iter().flatten() {
            if name == species.name {
                continue;
            }
            let Some(next) = self.gen.get_species(name) else {
                debug!(species = %species.name, fallback = name, "fallback species missing");
                continue;
            };
            if tried.contains(&next.id) {
                continue;
            }
            let learnset = self.merge_with_fallback(next, depth + 1, tried);
            if !learnset.is_empty() {
                return learnset;
            }
        }

        merged
    }

    /// `species` followed by the species it inherits moves from, closest first.
    pub fn ancestor_chain<'s>(&'s self, species: &'s Species) -> Vec<&'s Species> {
        let mut chain = vec![species];
        let mut seen: HashSet<&str> = HashSet::from([species.id.as_str()]);
        let mut current = species;

        while let Some(next) = self.next_link(current) {
            if !seen.insert(next.id.as_str()) {
                warn!(species = %species.name, repeated = %next.name, "learnset chain loops");
                break;
            }
            if chain.len() == MAX_LEARNSET_CHAIN {
                warn!(species = %species.name, "learnset chain truncated");
                break;
            }
            chain.push(next);
            current = next;
        }
        chain
    }

    fn next_link(&self, current: &Species) -> Option<&'a Species> {
        if let Some(target) = self.merge_target(&current.name) {
            return self.lookup_slug(target);
        }
        if TERMINAL_REGIONAL_FORMES.contains(&current.forme.as_str()) {
            return None;
        }
        self.gen.get_species(current.prevo.as_deref()?)
    }

    /// Override `mergeLearnsetFrom` for the species with this display name.
    fn merge_target(&self, name: &str) -> Option<&'a str> {
        let slug = self.index.get_slug_by_name(name)?;
        self.overrides.get(slug)?.merge_learnset_from.as_deref()
    }

    fn lookup_slug(&self, slug: &str) -> Option<&'a Species> {
        match self.index.get_id_by_slug(slug) {
            Some(id) => self.gen.get_species(id),
            None => self.gen.get_species(slug),
        }
    }

    /// Prepared learnset of one chain link: manual data first, then the
    /// primary dump, then the mod dump.
    fn link_learnset(&self, link: &Species) -> Option<Learnset> {
        let gen = self.gen.num();
        let manual = self
            .index
            .get_slug_by_name(&link.name)
            .and_then(|slug| self.manual.get(slug));

        let prepared = manual
            .or_else(|| self.gen.learnset(&link.id))
            .and_then(|raw| prepare_learnset(raw, gen));
        if prepared.is_some() {
            return prepared;
        }

        let alternate = self.alternate?;
        let prepared = alternate
            .learnset(&link.id)
            .and_then(|raw| prepare_learnset(raw, gen));
        if prepared.is_some() {
            debug!(species = %link.name, "using mod learnset");
        }
        prepared
    }

    fn merge_chain(&self, species: &Species) -> Learnset {
        let canonical = self
            .index
            .get_slug_by_id(&species.id)
            .and_then(|slug| self.overrides.get(slug))
            .and_then(|o| o.merge_learnset_from.as_deref());

        let mut merged = Learnset::new();
        for link in self.ancestor_chain(species) {
            let Some(learnset) = self.link_learnset(link) else {
                continue;
            };

            let origin = match self.index.get_slug_by_id(&link.id) {
                Some(slug) if link.id != species.id && Some(slug) != canonical => {
                    Some(slug.to_string())
                }
                _ => None,
            };

            for (move_slug, sources) in learnset {
                let entry = merged.entry(move_slug).or_default();
                for source in sources {
                    if !has_method(entry, source.method) {
                        entry.push(source.with_origin(origin.clone()));
                    }
                }
            }
        }

        // concrete methods beat event-only evidence
        for sources in merged.values_mut() {
            if sources.len() > 1 {
                sources.retain(|s| s.method != LearnMethod::Event);
            }
        }

        merged
    }
}
