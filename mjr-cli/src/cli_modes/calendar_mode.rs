use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use mjr_core::MoodJournal;

pub fn calendar_mode(cli: &Cli, renderer: &Renderer, journal: &MoodJournal) -> Result<CliModeResult> {
    let Some(month) = &cli.calendar else {
        return Ok(CliModeResult::NothingToDo);
    };
    let calendar = journal.calendar(month.as_deref())?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&calendar)?);
    } else {
        renderer.print_calendar(&calendar);
    }
    Ok(CliModeResult::Finish)
}
