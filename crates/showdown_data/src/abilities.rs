//! Ability records.

use crate::helpers::{infer_ability_gen, to_id};
use crate::models::AbilityData;

#[derive(Debug, Clone)]
pub struct Ability {
    pub id: String,
    pub name: String,
    pub num: i32,
    pub gen: u8,
    pub desc: Option<String>,
    pub short_desc: Option<String>,
    pub is_nonstandard: Option<String>,
}

impl Ability {
    pub fn from_data(id: &str, data: AbilityData) -> Self {
        Ability {
            id: if id.is_empty() { to_id(&data.name) } else { id.to_string() },
            gen: data.gen.unwrap_or_else(|| infer_ability_gen(data.num)),
            name: data.name,
            num: data.num,
            desc: data.desc,
            short_desc: data.short_desc,
            is_nonstandard: data.is_nonstandard,
        }
    }
}
