mod common;

use std::collections::HashMap;

use common::{generation, mod_learnsets, overrides, species, species_with};
use poke_dataset::extra_data::{ManualLearnsets, SpeciesOverrides};
use poke_dataset::learnset::{has_method, LearnMethod};
use poke_dataset::{Learnset, LearnsetMerger, SlugResolver, SpeciesIndex};
use serde_json::{json, Value};
use showdown_data::{Generation, GenerationData, LearnsetSource};

fn merged(
    gen: &Generation,
    alternate: Option<&dyn LearnsetSource>,
    overrides: &SpeciesOverrides,
    manual: &ManualLearnsets,
    name: &str,
) -> Learnset {
    let index = SpeciesIndex::build(gen, &SlugResolver::new(overrides)).unwrap();
    let merger = LearnsetMerger::new(gen, alternate, &index, overrides, manual);
    merger.merged_learnset(gen.get_species(name).unwrap())
}

fn simple(gen: &Generation, name: &str) -> Learnset {
    merged(gen, None, &SpeciesOverrides::default(), &HashMap::new(), name)
}

fn sources(learnset: &Learnset, move_id: &str) -> Vec<String> {
    learnset
        .get(move_id)
        .map(|sources| sources.iter().map(|s| s.to_string()).collect())
        .unwrap_or_default()
}

fn pichu_line() -> (Value, Value) {
    let pokedex = json!({
        "pichu": species_with(172, "Pichu", json!({"evos": ["Pikachu"]})),
        "pikachu": species_with(25, "Pikachu", json!({"prevo": "Pichu", "evos": ["Raichu"]})),
        "raichu": species_with(26, "Raichu", json!({"prevo": "Pikachu"})),
        "raichualola": species_with(26, "Raichu-Alola", json!({
            "baseSpecies": "Raichu", "forme": "Alola", "prevo": "Pikachu"
        })),
    });
    let learnsets = json!({
        "pichu": {
            "thundershock": ["8L1", "8S0"],
            "charm": ["8E"],
            "volttackle": ["8S1"]
        },
        "pikachu": {
            "thundershock": ["8L1", "7L1"],
            "thunderbolt": ["8M"],
            "surf": ["7V"]
        },
        "raichu": {
            "thunderbolt": ["8M"],
            "thunderpunch": ["8L1"]
        },
        "raichualola": {
            "psychic": ["8M"]
        }
    });
    (pokedex, learnsets)
}

#[test]
fn test_chain_tags_ancestor_sources() {
    let (pokedex, learnsets) = pichu_line();
    let gen = generation(8, pokedex, learnsets);
    let learnset = simple(&gen, "Raichu");

    assert_eq!(sources(&learnset, "thunderbolt"), vec!["M"]);
    assert_eq!(sources(&learnset, "thunderpunch"), vec!["L:1"]);
    assert_eq!(sources(&learnset, "thundershock"), vec!["L:1@pikachu"]);
    assert_eq!(sources(&learnset, "charm"), vec!["E@pichu"]);
    // only evidence left, so the event source stays
    assert_eq!(sources(&learnset, "volttackle"), vec!["S@pichu"]);
    // transfer-only and other generations never make it in
    assert!(!learnset.contains_key("surf"));
}

#[test]
fn test_learnset_is_sorted_by_move() {
    let (pokedex, learnsets) = pichu_line();
    let gen = generation(8, pokedex, learnsets);
    let learnset = simple(&gen, "Raichu");
    let keys: Vec<&String> = learnset.keys().collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
}

#[test]
fn test_event_dropped_when_concrete_source_exists() {
    let pokedex = json!({ "pichu": species(172, "Pichu") });
    let learnsets = json!({ "pichu": { "thundershock": ["8S0", "8L1", "8S3"] } });
    let gen = generation(8, pokedex, learnsets);

    assert_eq!(sources(&simple(&gen, "Pichu"), "thundershock"), vec!["L:1"]);
}

#[test]
fn test_one_source_per_method() {
    let pokedex = json!({
        "bulbasaur": species(1, "Bulbasaur"),
        "ivysaur": species_with(2, "Ivysaur", json!({"prevo": "Bulbasaur"})),
    });
    let learnsets = json!({
        "bulbasaur": { "tackle": ["8L1", "8E", "8M"], "growl": ["8L3"] },
        "ivysaur": { "tackle": ["8L1", "8L5", "8M"] }
    });
    let gen = generation(8, pokedex, learnsets);
    let learnset = simple(&gen, "Ivysaur");

    assert_eq!(sources(&learnset, "tackle"), vec!["L:1", "M", "E@bulbasaur"]);
    assert_eq!(sources(&learnset, "growl"), vec!["L:3@bulbasaur"]);
    for sources in learnset.values() {
        for method in [
            LearnMethod::LevelUp,
            LearnMethod::Machine,
            LearnMethod::Tutor,
            LearnMethod::Egg,
            LearnMethod::Event,
            LearnMethod::Restricted,
        ] {
            assert!(sources.iter().filter(|s| s.method == method).count() <= 1);
        }
    }
}

#[test]
fn test_mod_learnset_used_when_primary_is_empty() {
    let pokedex = json!({
        "bidoof": species(399, "Bidoof"),
        "bibarel": species_with(400, "Bibarel", json!({"prevo": "Bidoof"})),
    });
    // bibarel only has sources of an older generation
    let learnsets = json!({ "bibarel": { "watergun": ["7L1"] } });
    let gen = generation(8, pokedex, learnsets);
    let bdsp = mod_learnsets(
        "gen8bdsp",
        json!({
            "bidoof": { "tackle": ["8L1"] },
            "bibarel": { "watergun": ["8L1"] }
        }),
    );

    let overrides = SpeciesOverrides::default();
    let manual = HashMap::new();
    let bidoof = merged(&gen, Some(&bdsp), &overrides, &manual, "Bidoof");
    assert_eq!(sources(&bidoof, "tackle"), vec!["L:1"]);

    let bibarel = merged(&gen, Some(&bdsp), &overrides, &manual, "Bibarel");
    assert_eq!(sources(&bibarel, "watergun"), vec!["L:1"]);
    assert_eq!(sources(&bibarel, "tackle"), vec!["L:1@bidoof"]);

    // without the mod there is nothing
    assert!(simple(&gen, "Bidoof").is_empty());
}

#[test]
fn test_manual_learnset_wins_over_dump() {
    let pokedex = json!({ "wyrdeer": species(899, "Wyrdeer") });
    let learnsets = json!({ "wyrdeer": { "tackle": ["8L1"] } });
    let gen = generation(8, pokedex, learnsets);
    let manual: ManualLearnsets = serde_json::from_value(json!({
        "wyrdeer": { "psyshieldbash": ["8L1"] }
    }))
    .unwrap();

    let learnset = merged(&gen, None, &SpeciesOverrides::default(), &manual, "Wyrdeer");
    assert_eq!(sources(&learnset, "psyshieldbash"), vec!["L:1"]);
    assert!(!learnset.contains_key("tackle"));
}

#[test]
fn test_merge_target_is_not_tagged() {
    let (pokedex, learnsets) = pichu_line();
    let gen = generation(8, pokedex, learnsets);
    let overrides = overrides(json!({ "raichu-alola": { "mergeLearnsetFrom": "raichu" } }));
    let learnset = merged(&gen, None, &overrides, &HashMap::new(), "Raichu-Alola");

    assert_eq!(sources(&learnset, "psychic"), vec!["M"]);
    assert_eq!(sources(&learnset, "thunderpunch"), vec!["L:1"]);
    assert_eq!(sources(&learnset, "thundershock"), vec!["L:1@pikachu"]);
}

#[test]
fn test_hisuian_formes_do_not_inherit() {
    let pokedex = json!({
        "growlithe": species(58, "Growlithe"),
        "growlithehisui": species_with(58, "Growlithe-Hisui", json!({
            "baseSpecies": "Growlithe", "forme": "Hisui"
        })),
        "arcaninehisui": species_with(59, "Arcanine-Hisui", json!({
            "baseSpecies": "Arcanine", "forme": "Hisui", "prevo": "Growlithe-Hisui"
        })),
    });
    let learnsets = json!({
        "growlithehisui": { "bite": ["8L1"] },
        "arcaninehisui": { "flareblitz": ["8L1"] }
    });
    let gen = generation(8, pokedex, learnsets);
    let learnset = simple(&gen, "Arcanine-Hisui");

    assert_eq!(sources(&learnset, "flareblitz"), vec!["L:1"]);
    assert!(!learnset.contains_key("bite"));
}

#[test]
fn test_empty_forme_falls_back_to_changes_from() {
    let pokedex = json!({
        "darmanitan": species_with(555, "Darmanitan", json!({"otherFormes": ["Darmanitan-Galar"]})),
        "darmanitangalar": species_with(555, "Darmanitan-Galar", json!({
            "baseSpecies": "Darmanitan", "forme": "Galar"
        })),
        "darmanitangalarzen": species_with(555, "Darmanitan-Galar-Zen", json!({
            "baseSpecies": "Darmanitan", "forme": "Galar-Zen", "battleOnly": "Darmanitan-Galar"
        })),
    });
    let learnsets = json!({
        "darmanitan": { "flareblitz": ["8L1"] },
        "darmanitangalar": { "iciclecrash": ["8L1"] }
    });
    let gen = generation(8, pokedex, learnsets);
    let learnset = simple(&gen, "Darmanitan-Galar-Zen");

    assert_eq!(sources(&learnset, "iciclecrash"), vec!["L:1"]);
    assert!(!learnset.contains_key("flareblitz"));
}

#[test]
fn test_empty_forme_falls_back_to_base_species() {
    let pokedex = json!({
        "pumpkaboo": species(710, "Pumpkaboo"),
        "pumpkaboolarge": species_with(710, "Pumpkaboo-Large", json!({
            "baseSpecies": "Pumpkaboo", "forme": "Large"
        })),
    });
    let learnsets = json!({ "pumpkaboo": { "astonish": ["8L1"] } });
    let gen = generation(8, pokedex, learnsets);

    assert_eq!(sources(&simple(&gen, "Pumpkaboo-Large"), "astonish"), vec!["L:1"]);
}

#[test]
fn test_cyclic_merge_overrides_terminate() {
    let pokedex = json!({
        "alpha": species(10, "Alpha"),
        "beta": species(11, "Beta"),
    });
    let learnsets = json!({ "beta": { "tackle": ["8L1"] } });
    let gen = generation(8, pokedex, learnsets);
    let overrides = overrides(json!({
        "alpha": { "mergeLearnsetFrom": "beta" },
        "beta": { "mergeLearnsetFrom": "alpha" }
    }));

    let learnset = merged(&gen, None, &overrides, &HashMap::new(), "Alpha");
    assert_eq!(sources(&learnset, "tackle"), vec!["L:1"]);

    let learnset = merged(&gen, None, &overrides, &HashMap::new(), "Beta");
    assert_eq!(sources(&learnset, "tackle"), vec!["L:1"]);
}

#[test]
fn test_cyclic_fallbacks_terminate() {
    let pokedex = json!({
        "castform": species(351, "Castform"),
        "castformsunny": species_with(351, "Castform-Sunny", json!({
            "baseSpecies": "Castform", "forme": "Sunny", "changesFrom": "Castform-Rainy"
        })),
        "castformrainy": species_with(351, "Castform-Rainy", json!({
            "baseSpecies": "Castform", "forme": "Rainy", "changesFrom": "Castform-Sunny"
        })),
    });
    let gen = generation(8, pokedex, json!({}));

    assert!(simple(&gen, "Castform-Sunny").is_empty());
    assert!(simple(&gen, "Castform-Rainy").is_empty());
}

#[test]
fn test_self_referential_prevo_terminates() {
    let pokedex = json!({
        "ditto": species_with(132, "Ditto", json!({"prevo": "Ditto"})),
    });
    let learnsets = json!({ "ditto": { "transform": ["8L1"] } });
    let gen = generation(8, pokedex, learnsets);

    assert_eq!(sources(&simple(&gen, "Ditto"), "transform"), vec!["L:1"]);
}

#[test]
fn test_ancestor_chain_order() {
    let (pokedex, learnsets) = pichu_line();
    let gen = generation(8, pokedex, learnsets);
    let overrides = SpeciesOverrides::default();
    let index = SpeciesIndex::build(&gen, &SlugResolver::new(&overrides)).unwrap();
    let manual = HashMap::new();
    let merger = LearnsetMerger::new(&gen, None, &index, &overrides, &manual);

    let raichu = gen.get_species("Raichu").unwrap();
    let chain: Vec<&str> = merger
        .ancestor_chain(raichu)
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(chain, vec!["Raichu", "Pikachu", "Pichu"]);
}

#[test]
fn test_has_method_helper() {
    let (pokedex, learnsets) = pichu_line();
    let gen = generation(8, pokedex, learnsets);
    let learnset = simple(&gen, "Pichu");
    let thundershock = &learnset["thundershock"];
    assert!(has_method(thundershock, LearnMethod::LevelUp));
    assert!(!has_method(thundershock, LearnMethod::Event));
}
