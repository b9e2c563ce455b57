use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use mjr_core::MoodJournal;

pub fn stats_mode(cli: &Cli, renderer: &Renderer, journal: &MoodJournal) -> Result<CliModeResult> {
    let Some(window) = cli.stats else {
        return Ok(CliModeResult::NothingToDo);
    };
    let stats = journal.statistics(window);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        renderer.print_statistics(&stats);
    }
    Ok(CliModeResult::Finish)
}
