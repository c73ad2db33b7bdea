//! Which entries of a dump exist in a given generation.
//!
//! Mirrors the simulator's default filter (nothing nonstandard, nothing from
//! a later generation) with a few deliberate exceptions so the dataset also
//! covers unobtainable formes, Let's Go species, Gigantamax formes and the
//! Legends: Arceus / BDSP species that generation 8 dumps mark as
//! `Future` or `Past`.

use phf::phf_set;

static EXCLUDED_SPECIES: phf::Set<&'static str> = phf_set! {
    "missingno",
    "pokestarblackbelt",
    "pokestarblackdoor",
    "pokestarbrycenman",
    "pokestarf00",
    "pokestarf002",
    "pokestargiant",
    "pokestarhumanoid",
    "pokestarmonster",
    "pokestarmt",
    "pokestarmt2",
    "pokestarsmeargle",
    "pokestarspirit",
    "pokestartransport",
    "pokestarufo",
    "pokestarufo2",
    "pokestarufopropu2",
    "pokestarwhitedoor",
};

/// Legends: Arceus species marked `Future` in generation 8.
static GEN8_FUTURE_SPECIES: phf::Set<&'static str> = phf_set! {
    "growlithehisui",
    "arcaninehisui",
    "voltorbhisui",
    "electrodehisui",
    "typhlosionhisui",
    "qwilfishhisui",
    "sneaselhisui",
    "dialgaorigin",
    "palkiaorigin",
    "samurotthisui",
    "lilliganthisui",
    "basculinwhitestriped",
    "zoruahisui",
    "zoroarkhisui",
    "braviaryhisui",
    "sliggoohisui",
    "goodrahisui",
    "avalugghisui",
    "decidueyehisui",
    "wyrdeer",
    "kleavor",
    "ursaluna",
    "basculegion",
    "basculegionf",
    "sneasler",
    "overqwil",
    "enamorus",
    "enamorustherian",
};

/// Returning BDSP / Legends: Arceus species marked `Past` in generation 8.
static GEN8_PAST_SPECIES: phf::Set<&'static str> = phf_set! {
    "cyndaquil", "oshawott", "dewott", "bidoof", "bibarel", "starly", "staravia",
    "staraptor", "wurmple", "silcoon", "beautifly", "cascoon", "dustox", "kricketot",
    "kricketune", "buizel", "floatzel", "burmy", "burmysandy", "burmytrash", "wormadam",
    "wormadamsandy", "wormadamtrash", "mothim", "geodude", "graveler", "golem",
    "stantler", "paras", "parasect", "aipom", "ambipom", "carnivine", "yanma", "yanmega",
    "pachirisu", "teddiursa", "ursaring", "turtwig", "grotle", "torterra", "murkrow",
    "honchkrow", "unown", "unownb", "unownc", "unownd", "unowne", "unownf", "unowng",
    "unownh", "unowni", "unownj", "unownk", "unownl", "unownm", "unownn", "unowno",
    "unownp", "unownq", "unownr", "unowns", "unownt", "unownu", "unownv", "unownw",
    "unownx", "unowny", "unownz", "unownexclamation", "unownquestion", "glameow",
    "purugly", "chatot", "piplup", "prinplup", "empoleon", "finneon", "lumineon",
    "gligar", "gliscor", "nosepass", "probopass", "chingling", "chimecho", "misdreavus",
    "mismagius", "cranidos", "rampardos", "shieldon", "bastiodon", "arceus", "phione",
    "manaphy", "shaymin", "darkrai", "meditite", "medicham", "girafarig",
};

pub fn species_exists(id: &str, species_gen: u8, nonstandard: Option<&str>, gen: u8) -> bool {
    if species_gen > gen {
        return false;
    }
    match nonstandard {
        None => true,
        Some("Unobtainable") => !EXCLUDED_SPECIES.contains(id),
        Some("LGPE") => gen == 7,
        Some("Gigantamax") => gen == 8,
        Some("Future") => gen == 8 && GEN8_FUTURE_SPECIES.contains(id),
        Some("Past") => gen == 8 && GEN8_PAST_SPECIES.contains(id),
        Some(_) => false,
    }
}

pub fn move_exists(move_gen: u8, nonstandard: Option<&str>, gen: u8) -> bool {
    if move_gen > gen {
        return false;
    }
    match nonstandard {
        None => true,
        Some("Gigantamax") => gen == 8,
        Some(_) => false,
    }
}

pub fn ability_exists(id: &str, ability_gen: u8, nonstandard: Option<&str>, gen: u8) -> bool {
    id != "noability" && ability_gen <= gen && nonstandard.is_none()
}

pub fn item_exists(item_gen: u8, nonstandard: Option<&str>, gen: u8) -> bool {
    item_gen <= gen && nonstandard.is_none()
}
