use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use mjr_core::MoodJournal;

pub fn delete_mode(cli: &Cli, renderer: &Renderer, journal: &mut MoodJournal) -> Result<CliModeResult> {
    let Some(date) = &cli.delete else {
        return Ok(CliModeResult::NothingToDo);
    };
    match journal.delete(date)? {
        0 => renderer.print_info(&format!("No entries found for {date}.")),
        1 => renderer.print_info("Deleted 1 entry."),
        n => renderer.print_info(&format!("Deleted {n} entries.")),
    }
    Ok(CliModeResult::Finish)
}
