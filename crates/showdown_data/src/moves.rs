//! Move records.

use crate::helpers::{infer_move_gen, to_id};
use crate::models::{Accuracy, IsMax, MaxMoveData, MoveData, ZMoveData};

#[derive(Debug, Clone)]
pub struct Move {
    pub id: String,
    pub name: String,
    pub num: i32,
    pub gen: u8,
    pub move_type: String,
    pub category: String,
    pub base_power: u16,
    pub accuracy: Accuracy,
    pub pp: u8,
    pub target: String,
    pub priority: i8,
    pub is_z: Option<String>,
    pub z_move: Option<ZMoveData>,
    pub is_max: Option<IsMax>,
    pub max_move: Option<MaxMoveData>,
    pub desc: Option<String>,
    pub short_desc: Option<String>,
    pub is_nonstandard: Option<String>,
}

impl Move {
    pub fn from_data(id: &str, data: MoveData) -> Self {
        Move {
            id: if id.is_empty() { to_id(&data.name) } else { id.to_string() },
            gen: data.gen.unwrap_or_else(|| infer_move_gen(data.num)),
            name: data.name,
            num: data.num,
            move_type: data.move_type,
            category: data.category,
            base_power: data.base_power,
            accuracy: data.accuracy,
            pp: data.pp,
            target: data.target,
            priority: data.priority,
            is_z: data.is_z,
            z_move: data.z_move,
            is_max: data.is_max.filter(|max| *max != IsMax::Flag(false)),
            max_move: data.max_move,
            desc: data.desc,
            short_desc: data.short_desc,
            is_nonstandard: data.is_nonstandard,
        }
    }

    /// Species name a G-Max move is tied to.
    pub fn gmax_species(&self) -> Option<&str> {
        match &self.is_max {
            Some(IsMax::Species(species)) => Some(species.as_str()),
            _ => None,
        }
    }
}
