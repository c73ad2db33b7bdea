//! TM/HM/TR lists, copied from `<data_dir>/machines/gen<N>/<dir>/<file>.json`.

use indexmap::IndexMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::GenerationContext;
use crate::error::Result;
use crate::extra_data::{json_files, read_json};

type MachineList = Vec<IndexMap<String, Value>>;

pub fn export(ctx: &GenerationContext) -> Result<usize> {
    let source = ctx
        .extra
        .data_dir()
        .join("machines")
        .join(format!("gen{}", ctx.num()));
    if !source.exists() {
        debug!(dir = %source.display(), "no machine data");
        return Ok(0);
    }

    info!("- machines");

    let mut written = 0;
    for path in json_files(&source)? {
        // lists live one level down, in a directory named after the game
        let game = path
            .parent()
            .filter(|parent| *parent != source.as_path())
            .and_then(|parent| parent.file_name())
            .and_then(|name| name.to_str());
        let Some(game) = game else {
            warn!(path = %path.display(), "machine list outside a game directory, skipping");
            continue;
        };
        let Some(file) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        let machines: MachineList = read_json(&path)?;
        info!("writing {} {}s...", machines.len(), file);
        ctx.writer
            .write(format!("machines/{}/{}.json", game, file), &machines)?;
        written += 1;
    }

    Ok(written)
}
