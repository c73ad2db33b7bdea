//! Command line entry point of the dataset builder.
//!
//! Usage:
//!   poke_dataset export
//!   poke_dataset export --config dataset.toml --gen 8 --gen 9
//!   poke_dataset learnset --gen 8 pikachu

mod cmd;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cmd::{export, learnset};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "poke_dataset")]
#[command(about = "Build the versioned Pokemon JSON dataset", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export every configured generation and the merged view
    Export(export::ExportArgs),

    /// Print the merged learnset of one species
    Learnset(learnset::LearnsetArgs),
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "poke_dataset=info,showdown_data=info,dataset_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Export(args) => export::execute(args),
        Commands::Learnset(args) => learnset::execute(args),
    }
}
