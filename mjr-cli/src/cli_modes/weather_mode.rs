use super::CliModeResult;
use crate::{Cli, render::Renderer};
use anyhow::Result;
use mjr_core::{MoodJournal, weather::WeatherState};
use tokio_util::sync::CancellationToken;

pub fn weather_mode(cli: &Cli, renderer: &Renderer, journal: &MoodJournal) -> Result<CliModeResult> {
    if !cli.weather {
        return Ok(CliModeResult::NothingToDo);
    }
    match current_weather(journal)? {
        WeatherState::Ready(report) => renderer.print_weather(&report),
        WeatherState::Failed(message) => anyhow::bail!(message),
        WeatherState::Cancelled => renderer.print_info("Weather lookup cancelled."),
    }
    Ok(CliModeResult::Finish)
}

/// Runs the configured weather lookup to completion. Ctrl-C cancels it.
pub(super) fn current_weather(journal: &MoodJournal) -> Result<WeatherState> {
    let service = journal.weather_service()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let cancel = CancellationToken::new();

    let state = runtime.block_on(async {
        let interrupt = cancel.clone();
        let watcher = tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                interrupt.cancel();
            }
        });
        let state = service.current(&cancel).await;
        watcher.abort();
        state
    });
    Ok(state)
}
