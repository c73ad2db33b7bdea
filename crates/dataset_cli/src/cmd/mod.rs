pub mod export;
pub mod learnset;

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use poke_dataset::ExportConfig;

use crate::config;

/// Directory and output options shared by every command. Flags win over the
/// config file, which wins over the defaults.
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// TOML configuration file
    #[arg(short, long, env = "POKE_DATASET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Hand-maintained extra data directory
    #[arg(long, env = "POKE_DATASET_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Directory holding one Showdown dump per generation
    #[arg(long, env = "POKE_DATASET_SHOWDOWN_DIR")]
    pub showdown_dir: Option<PathBuf>,

    /// Output directory (emptied before exporting)
    #[arg(short, long, env = "POKE_DATASET_OUT_DIR")]
    pub out_dir: Option<PathBuf>,
}

impl ConfigArgs {
    pub fn resolve(&self) -> Result<ExportConfig> {
        let mut config = match &self.config {
            Some(path) => config::load(path)?,
            None => ExportConfig::default(),
        };

        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(dir) = &self.showdown_dir {
            config.showdown_dir = dir.clone();
        }
        if let Some(dir) = &self.out_dir {
            config.out_dir = dir.clone();
        }
        Ok(config)
    }
}
