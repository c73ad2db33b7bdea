use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use super::ConfigArgs;

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Generations to export (repeatable, defaults to all)
    #[arg(short, long = "gen")]
    pub generations: Vec<u8>,

    /// Write compact JSON
    #[arg(long, env = "POKE_DATASET_COMPACT")]
    pub compact: bool,
}

pub fn execute(args: ExportArgs) -> Result<()> {
    let mut config = args.config.resolve()?;
    if !args.generations.is_empty() {
        config.generations = args.generations;
    }
    if args.compact {
        config.pretty_print = false;
    }

    let summary = poke_dataset::export_all(&config)
        .with_context(|| format!("Export to {} failed", config.out_dir.display()))?;

    for gen in &summary.generations {
        info!(
            gen = gen.gen,
            pokemon = gen.pokemon,
            moves = gen.moves,
            abilities = gen.abilities,
            items = gen.items,
            "generation exported"
        );
    }
    Ok(())
}
