use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use mjr_core::{MoodJournal, QueryError, QueryResult, ReadEntriesOptions, TimeWindow};

/// Lists entries. Without any filter, shows the current week.
pub fn read_mode(cli: &Cli, renderer: &Renderer, journal: &MoodJournal) -> Result<CliModeResult> {
    let mut start_date: Option<&str> = None;
    let mut end_date: Option<&str> = None;

    if let Some(on) = &cli.on {
        start_date = Some(on);
    }
    if let Some(from) = &cli.from {
        start_date = Some(from);
        end_date = Some(cli.to.as_deref().unwrap_or("today"));
    }

    let has_filter = start_date.is_some()
        || cli.window.is_some()
        || cli.filter_mood.is_some()
        || cli.search.is_some();
    let window = match cli.window {
        Some(window) => Some(window),
        None if !has_filter => Some(TimeWindow::Week),
        None => None,
    };

    let options = ReadEntriesOptions {
        start_date,
        end_date,
        mood: cli.filter_mood.as_deref(),
        search: cli.search.as_deref(),
        window,
    };
    let result = journal.read_entries(&options);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result.entries)?);
        print_errors(renderer, &result.errors);
    } else {
        print_entries(renderer, &result, cli.search.as_deref());
    }
    Ok(CliModeResult::Finish)
}

fn print_entries(renderer: &Renderer, result: &QueryResult, search: Option<&str>) {
    if result.entries.is_empty() {
        renderer.print_info("No entries found.");
    } else {
        renderer.print_info(&format!("{} entries found.", result.entries.len()));
        renderer.print_entries(&result.entries, search);
    }
    print_errors(renderer, &result.errors);
}

fn print_errors(renderer: &Renderer, errors: &[QueryError]) {
    for error in errors {
        match error {
            QueryError::InvalidDate { input, error } => {
                renderer.print_warning(&format!("Could not process '{input}': {error}"));
            }
            QueryError::InvalidMood { input } => {
                renderer.print_warning(&format!(
                    "Unknown mood '{input}'. Try happy, sad, angry, tired or excited."
                ));
            }
        }
    }
}
