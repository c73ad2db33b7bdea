//! Item records.

use crate::helpers::{infer_item_gen, to_id};
use crate::models::ItemData;

#[derive(Debug, Clone)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub num: i32,
    pub gen: u8,
    pub desc: Option<String>,
    pub short_desc: Option<String>,
    pub is_nonstandard: Option<String>,
}

impl Item {
    pub fn from_data(id: &str, data: ItemData) -> Self {
        Item {
            id: if id.is_empty() { to_id(&data.name) } else { id.to_string() },
            gen: data.gen.unwrap_or_else(|| infer_item_gen(data.num)),
            name: data.name,
            num: data.num,
            desc: data.desc,
            short_desc: data.short_desc,
            is_nonstandard: data.is_nonstandard,
        }
    }
}
