//! Optional TOML configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use poke_dataset::ExportConfig;

/// Load an export configuration; keys missing from the file keep their
/// defaults.
pub fn load(path: &Path) -> Result<ExportConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
