//! `games.json`: the game sets released in a generation.

use tracing::info;

use super::GenerationContext;
use crate::error::Result;
use crate::merge::MergeData;

pub fn export(ctx: &GenerationContext, merge: &mut MergeData) -> Result<usize> {
    info!("- games");

    let games = ctx.extra.games()?;
    merge.set_games(games);

    let result: Vec<_> = games.iter().filter(|set| set.gen == ctx.num()).collect();
    if !result.is_empty() {
        info!("writing {} games...", result.len());
        ctx.writer.write("games.json", &result)?;
    }

    Ok(result.len())
}
