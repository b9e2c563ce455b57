use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use mjr_core::{MoodJournal, export::default_export_file_name};
use std::path::PathBuf;

pub fn export_mode(cli: &Cli, renderer: &Renderer, journal: &MoodJournal) -> Result<CliModeResult> {
    let Some(target) = &cli.export else {
        return Ok(CliModeResult::NothingToDo);
    };
    let path = target
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_export_file_name(journal.config.reference_date)));

    if journal.export_csv(&path)? {
        renderer.print_info(&format!(
            "Exported {} entries to {}",
            journal.entries().len(),
            path.display()
        ));
    } else {
        renderer.print_info("No entries to export.");
    }
    Ok(CliModeResult::Finish)
}
