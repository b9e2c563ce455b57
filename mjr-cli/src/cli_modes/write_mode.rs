use super::{
    CliModeResult,
    editor_utils::{create_editor_buffer, resolve_editor},
    weather_mode::current_weather,
};
use crate::{Cli, render::Renderer};
use anyhow::Result;
use mjr_core::{
    MoodJournal, NewEntry, WeatherSnapshot, store::AddOutcome, weather::WeatherState,
};

pub fn write_mode(cli: &Cli, renderer: &Renderer, journal: &mut MoodJournal) -> Result<CliModeResult> {
    let Some(mood) = cli.mood else {
        if !cli.text.is_empty() || cli.no_weather {
            anyhow::bail!("a mood is required to record an entry, e.g. `--mood happy`");
        }
        return Ok(CliModeResult::NothingToDo);
    };

    let note = if cli.text.is_empty() {
        let editor = resolve_editor(&journal.config.editor);
        match note_from_buffer(&create_editor_buffer(&editor)?) {
            Some(note) => note,
            None => {
                renderer.print_info("Nothing to save, the editor came back empty.");
                return Ok(CliModeResult::Finish);
            }
        }
    } else {
        cli.text.join(" ")
    };

    let weather = if cli.no_weather {
        None
    } else {
        weather_for_entry(renderer, journal)
    };

    let recorded = journal.record(NewEntry {
        mood,
        note,
        weather,
        date: None,
    })?;
    match recorded.outcome {
        AddOutcome::Inserted => {
            renderer.print_info(&format!("Added new entry to {}", journal.location()))
        }
        AddOutcome::Replaced(_) => renderer.print_info("Replaced today's entry."),
    }
    renderer.print_entry_line(&recorded.entry);
    Ok(CliModeResult::Finish)
}

/// An editor buffer with only whitespace means the user backed out.
fn note_from_buffer(buffer: &str) -> Option<String> {
    let note = buffer.trim();
    (!note.is_empty()).then(|| note.to_string())
}

/// Weather never blocks saving: any failure is reported and the entry is
/// stored without it.
fn weather_for_entry(renderer: &Renderer, journal: &MoodJournal) -> Option<WeatherSnapshot> {
    if journal.config.weather.api_key.is_none() {
        tracing::debug!("no weather API key configured, skipping weather");
        return None;
    }
    match current_weather(journal) {
        Ok(WeatherState::Ready(report)) => Some(report.snapshot()),
        Ok(WeatherState::Failed(message)) => {
            renderer.print_warning(&format!("Saving without weather: {message}"));
            None
        }
        Ok(WeatherState::Cancelled) => {
            renderer.print_warning("Weather lookup cancelled, saving without it.");
            None
        }
        Err(e) => {
            renderer.print_warning(&format!("Saving without weather: {e:#}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_saves_nothing() {
        assert_eq!(note_from_buffer(""), None);
        assert_eq!(note_from_buffer("  \n\t\n"), None);
    }

    #[test]
    fn buffer_is_trimmed() {
        assert_eq!(
            note_from_buffer("\nslept well\nlong walk\n\n").as_deref(),
            Some("slept well\nlong walk")
        );
    }
}
