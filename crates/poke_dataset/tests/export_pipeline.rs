mod common;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use common::{fixture_config, read_output};
use poke_dataset::{export_all, inspect_learnset, Error};
use serde_json::{json, Value};
use tempfile::TempDir;
use walkdir::WalkDir;

fn export() -> TempDir {
    let out = TempDir::new().unwrap();
    export_all(&fixture_config(out.path())).unwrap();
    out
}

fn find<'a>(records: &'a Value, slug: &str) -> &'a Value {
    records
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["slug"] == slug)
        .unwrap_or_else(|| panic!("{} missing", slug))
}

fn slugs(records: &Value) -> Vec<&str> {
    records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["slug"].as_str().unwrap())
        .collect()
}

#[test]
fn test_exports_every_generation_and_merged_view() {
    let out = export();
    let summary = export_all(&fixture_config(out.path())).unwrap();
    let gens: Vec<u8> = summary.generations.iter().map(|g| g.gen).collect();
    assert_eq!(gens, vec![1, 8]);

    for file in ["gen1/pokemon.json", "gen8/pokemon.json", "gen8/moves.json", "merged/types.json"] {
        assert!(out.path().join(file).is_file(), "{} missing", file);
    }
}

#[test]
fn test_species_filtered_by_generation() {
    let out = export();
    let gen1 = read_output(out.path(), "gen1/pokemon.json");
    assert_eq!(slugs(&gen1), vec!["bulbasaur", "pikachu", "raichu"]);

    let gen8 = read_output(out.path(), "gen8/pokemon.json");
    let gen8 = slugs(&gen8);
    assert!(gen8.contains(&"bidoof"));
    assert!(gen8.contains(&"charizard-gmax"));
    assert!(!gen8.contains(&"syclant"));
}

#[test]
fn test_species_index_order() {
    let out = export();
    let gen8 = read_output(out.path(), "gen8/pokemon.json");
    let nums: Vec<i64> = gen8
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["num"].as_i64().unwrap())
        .collect();
    let mut sorted = nums.clone();
    sorted.sort();
    assert_eq!(nums, sorted);

    let order = slugs(&gen8);
    let position = |slug| order.iter().position(|s| *s == slug).unwrap();
    assert!(position("charizard") < position("charizard-gmax"));
    assert!(position("raichu") < position("raichu-alola"));
    assert!(position("aegislash") < position("aegislash-blade"));
}

#[test]
fn test_slugs_are_unique() {
    let out = export();
    for file in ["gen1/pokemon.json", "gen8/pokemon.json"] {
        let index = read_output(out.path(), file);
        let all = slugs(&index);
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len(), "duplicate slug in {}", file);
    }
}

#[test]
fn test_gen1_learnset_follows_prevo() {
    let out = export();
    let raichu = read_output(out.path(), "gen1/pokemon/raichu.json");
    assert_eq!(raichu["prevo"], "pikachu");
    assert_eq!(
        raichu["learnset"],
        json!({
            "swift": ["M"],
            "thunderbolt": ["M"],
            "thundershock": ["L:1@pikachu"]
        })
    );
    // no abilities or egg data before their generations
    assert!(raichu.get("abilities").is_none());
    assert!(raichu.get("eggGroups").is_none());

    let bulbasaur = read_output(out.path(), "gen1/pokemon/bulbasaur.json");
    assert!(bulbasaur["learnset"].get("swift").is_none());
}

#[test]
fn test_battle_only_forme() {
    let out = export();
    let blade = read_output(out.path(), "gen8/pokemon/aegislash-blade.json");
    assert_eq!(blade["baseSpecies"], "aegislash");
    assert_eq!(blade["isBattleOnly"], true);
    assert_eq!(blade["formeTriggerAbility"], "stancechange");
    assert!(blade.get("learnset").is_none());
    assert!(blade.get("baseForm").is_none());
    assert!(blade.get("isForme").is_none());

    let aegislash = read_output(out.path(), "gen8/pokemon/aegislash.json");
    assert_eq!(aegislash["formes"], json!(["aegislash-blade"]));
}

#[test]
fn test_mod_learnset_fills_missing_species() {
    let out = export();
    let bidoof = read_output(out.path(), "gen8/pokemon/bidoof.json");
    assert_eq!(bidoof["learnset"], json!({ "tackle": ["L:1"] }));

    // the mod never overrides species that have data of their own
    let pikachu = read_output(out.path(), "gen8/pokemon/pikachu.json");
    assert_eq!(pikachu["learnset"]["thunderbolt"], json!(["M"]));
}

#[test]
fn test_merged_learnset_override() {
    let out = export();
    let alola = read_output(out.path(), "gen8/pokemon/raichu-alola.json");
    assert_eq!(alola["region"], "Alola");
    assert_eq!(
        alola["learnset"],
        json!({
            "charm": ["L:1@pikachu", "E@pichu"],
            "psychic": ["M"],
            "tackle": ["E@pichu"],
            "thunderbolt": ["M"],
            "thundershock": ["L:1"]
        })
    );
}

#[test]
fn test_species_detail_fields() {
    let out = export();
    let charizard = read_output(out.path(), "gen8/pokemon/charizard.json");
    assert_eq!(charizard["types"], json!(["fire", "flying"]));
    assert_eq!(charizard["abilities"], json!({"0": "blaze", "H": "solarpower"}));
    assert_eq!(charizard["canGmax"], true);
    assert_eq!(charizard["gmaxMove"], "gmaxwildfire");
    assert_eq!(charizard["genderRatio"], json!({"M": 0.5, "F": 0.5}));

    let bronzor = read_output(out.path(), "gen8/pokemon/bronzor.json");
    assert_eq!(bronzor["gender"], "N");
    assert!(bronzor.get("genderRatio").is_none());

    let eternatus = read_output(out.path(), "gen8/pokemon/eternatus.json");
    assert_eq!(eternatus["isLegendary"], true);
    assert_eq!(eternatus["flavorText"], "The core on its chest absorbs energy.");

    let raichu = read_output(out.path(), "gen8/pokemon/raichu.json");
    assert_eq!(raichu["evoItem"], "Thunder Stone");
    assert_eq!(raichu["formes"], json!(["raichu-alola"]));
}

#[test]
fn test_ability_users() {
    let out = export();
    let abilities = read_output(out.path(), "gen8/abilities.json");
    let levitate = find(&abilities, "levitate");
    assert_eq!(levitate["pokemon"], json!(["bronzor", "gastly", "haunter"]));
    assert_eq!(find(&abilities, "stancechange")["flavorText"], "Changes form depending on how it battles.");

    let all = slugs(&abilities);
    assert!(!all.contains(&"noability"));
    assert!(!all.contains(&"mountaineer"));
}

#[test]
fn test_max_moves() {
    let out = export();
    let moves = read_output(out.path(), "gen8/moves.json");

    let wildfire = find(&moves, "gmaxwildfire");
    assert_eq!(wildfire["isMax"], true);
    assert_eq!(wildfire["exclusivePokemon"], json!(["charizard", "charizard-gmax"]));

    assert_eq!(find(&moves, "maxflare")["isMax"], true);
    assert_eq!(find(&moves, "eternabeam")["exclusivePokemon"], json!(["eternatus"]));
    // unknown species in the curated list are dropped
    assert_eq!(find(&moves, "dynamaxcannon")["exclusivePokemon"], json!(["eternatus"]));

    let tackle = find(&moves, "tackle");
    assert_eq!(tackle["maxMove"], json!({"basePower": 90}));
    assert!(tackle.get("isMax").is_none());
    assert!(find(&moves, "kingsshield").get("accuracy").is_none());
}

#[test]
fn test_move_users() {
    let out = export();
    let moves = read_output(out.path(), "gen1/moves.json");
    assert_eq!(find(&moves, "thunderbolt")["pokemon"], json!(["pikachu", "raichu"]));
    assert!(find(&moves, "thunderbolt").get("maxMove").is_none());
}

#[test]
fn test_curated_exclusive_species_must_exist() {
    let out = export();
    for file in ["gen1/moves.json", "gen8/moves.json"] {
        let moves = read_output(out.path(), file);
        assert!(
            find(&moves, "tackle").get("exclusivePokemon").is_none(),
            "unknown exclusive species kept in {}",
            file
        );
    }

    let gen1 = read_output(out.path(), "gen1/moves.json");
    assert_eq!(find(&gen1, "swift")["exclusivePokemon"], json!(["raichu"]));
}

#[test]
fn test_types_document() {
    let out = export();
    let types = read_output(out.path(), "gen8/types.json");
    let ghost = find(&types["types"], "ghost");
    assert_eq!(ghost["color"], "#705898");
    assert_eq!(ghost["damageTaken"]["normal"], 0.0);
    assert_eq!(ghost["damageTaken"]["ghost"], 2.0);
    assert_eq!(ghost["damageDone"]["normal"], 0.0);

    // ordered by multiplier, then type
    let taken: Vec<f64> = ghost["damageTaken"]
        .as_object()
        .unwrap()
        .values()
        .map(|v| v.as_f64().unwrap())
        .collect();
    assert!(taken.windows(2).all(|w| w[0] <= w[1]));

    assert_eq!(slugs(&types["categories"]), vec!["physical", "special", "status"]);
}

#[test]
fn test_pokedex_and_games() {
    let out = export();
    let games = read_output(out.path(), "gen1/games.json");
    assert_eq!(games.as_array().unwrap().len(), 2);

    let kanto = read_output(out.path(), "gen1/pokedex/kanto.json");
    assert_eq!(kanto["games"], json!(["blue", "red", "yellow"]));
    assert_eq!(kanto["name"], "Kanto");
    // ivysaur has no gen 1 data in the fixture dump
    assert_eq!(slugs(&kanto["data"]), vec!["bulbasaur", "pikachu", "raichu"]);

    // galar has no pokedex data and is skipped
    assert!(!out.path().join("gen8/pokedex/galar.json").exists());
    assert!(!out.path().join("gen1/natures.json").exists());
}

#[test]
fn test_machines_copied() {
    let out = export();
    let machines = read_output(out.path(), "gen8/machines/swsh/tm.json");
    assert_eq!(machines, json!([
        {"num": 24, "move": "thunderbolt"},
        {"num": 29, "move": "psychic"}
    ]));

    // stray.json sits directly under machines/gen8 with no game directory
    assert!(!out.path().join("gen8/machines/gen8/stray.json").exists());
    assert!(!out.path().join("gen8/machines/stray.json").exists());
}

#[test]
fn test_merged_documents() {
    let out = export();

    let types = read_output(out.path(), "merged/types.json");
    let gens: Vec<&Value> = types["typeSets"].as_array().unwrap().iter().map(|s| &s["gens"]).collect();
    assert_eq!(gens, vec![&json!([1]), &json!([6, 7, 8, 9])]);

    let natures = read_output(out.path(), "merged/natures.json");
    assert_eq!(slugs(&natures), vec!["adamant", "hardy", "modest"]);

    let abilities = read_output(out.path(), "merged/abilities.json");
    let levitate = find(&abilities, "levitate");
    assert_eq!(levitate["gens"]["8"]["pokemon"], json!(["bronzor", "gastly", "haunter"]));

    let games = read_output(out.path(), "merged/games.json");
    assert_eq!(games.as_array().unwrap().len(), 3);

    let kanto = read_output(out.path(), "merged/pokedex/kanto.json");
    assert_eq!(kanto["games"], json!(["blue", "red", "yellow"]));
}

fn snapshot(root: &Path) -> Vec<(String, Vec<u8>)> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let relative = entry.path().strip_prefix(root).unwrap().display().to_string();
            (relative, fs::read(entry.path()).unwrap())
        })
        .collect()
}

#[test]
fn test_export_is_deterministic() {
    let first = export();
    let second = export();
    let a = snapshot(first.path());
    let b = snapshot(second.path());
    assert!(!a.is_empty());
    assert_eq!(a.len(), b.len());
    for ((path_a, bytes_a), (path_b, bytes_b)) in a.iter().zip(&b) {
        assert_eq!(path_a, path_b);
        assert!(bytes_a == bytes_b, "{} differs between runs", path_a);
    }
}

#[test]
fn test_output_directory_is_emptied() {
    let out = export();
    fs::write(out.path().join("stale.json"), "{}").unwrap();
    export_all(&fixture_config(out.path())).unwrap();
    assert!(!out.path().join("stale.json").exists());
}

#[test]
fn test_compact_output() {
    let out = TempDir::new().unwrap();
    let mut config = fixture_config(out.path());
    config.pretty_print = false;
    config.generations = vec![1];
    export_all(&config).unwrap();

    let raw = fs::read_to_string(out.path().join("gen1/pokemon.json")).unwrap();
    assert_eq!(raw.lines().count(), 1);
    assert!(!out.path().join("gen8").exists());
}

#[test]
fn test_missing_generation_dump_fails() {
    let out = TempDir::new().unwrap();
    let mut config = fixture_config(out.path());
    config.generations = vec![3];
    assert!(export_all(&config).is_err());
}

#[test]
fn test_inspect_learnset() {
    let out = TempDir::new().unwrap();
    let config = fixture_config(out.path());

    let report = inspect_learnset(&config, 8, "Raichu").unwrap();
    assert_eq!(report.slug, "raichu");
    assert_eq!(report.chain, vec!["raichu", "pikachu", "pichu"]);
    assert!(report.learnset.contains_key("charm"));

    assert!(matches!(
        inspect_learnset(&config, 8, "Missingno"),
        Err(Error::UnknownSpecies { .. })
    ));
}
