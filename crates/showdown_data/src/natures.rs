//! Nature records.

use crate::helpers::to_id;
use crate::models::NatureData;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nature {
    pub id: String,
    pub name: String,
    /// Boosted stat, `None` for neutral natures.
    pub plus: Option<String>,
    pub minus: Option<String>,
}

impl Nature {
    pub fn from_data(id: &str, data: NatureData) -> Self {
        Nature {
            id: if id.is_empty() { to_id(&data.name) } else { id.to_string() },
            name: data.name,
            plus: data.plus,
            minus: data.minus,
        }
    }
}
