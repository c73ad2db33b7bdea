use anyhow::{Context, Result};
use clap::Args;

use super::ConfigArgs;

#[derive(Args, Debug)]
pub struct LearnsetArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Generation to read
    #[arg(short, long = "gen")]
    pub generation: u8,

    /// Species display name or Showdown id
    pub species: String,

    /// Also print the chain the learnset was merged from
    #[arg(long)]
    pub chain: bool,
}

pub fn execute(args: LearnsetArgs) -> Result<()> {
    let config = args.config.resolve()?;
    let report = poke_dataset::inspect_learnset(&config, args.generation, &args.species)
        .with_context(|| format!("Failed to build learnset of {}", args.species))?;

    if args.chain {
        println!("{}", report.chain.join(" <- "));
    }
    let json = serde_json::to_string_pretty(&report.learnset).context("Failed to serialize learnset")?;
    println!("{}", json);
    Ok(())
}
