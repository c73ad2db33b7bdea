//! Type chart records and effectiveness lookup.

use indexmap::IndexMap;

use crate::helpers::{to_id, type_display_name};
use crate::models::TypeChartEntry;

/// Name of the typeless placeholder type, never exported.
pub const UNKNOWN_TYPE: &str = "???";

#[derive(Debug, Clone)]
pub struct TypeInfo {
    pub id: String,
    pub name: String,
    /// Attacking type name (or status) to Showdown damage code.
    pub damage_taken: IndexMap<String, u8>,
    pub is_nonstandard: Option<String>,
}

impl TypeInfo {
    pub fn from_data(key: &str, data: TypeChartEntry) -> Self {
        let name = data.name.unwrap_or_else(|| type_display_name(key));
        TypeInfo {
            id: to_id(&name),
            name,
            damage_taken: data.damage_taken,
            is_nonstandard: data.is_nonstandard,
        }
    }

    /// Damage multiplier when `attacker` hits this type.
    pub fn multiplier_from(&self, attacker: &str) -> f64 {
        match self.damage_taken.get(attacker) {
            Some(1) => 2.0,
            Some(2) => 0.5,
            Some(3) => 0.0,
            _ => 1.0,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.name == UNKNOWN_TYPE
    }
}
