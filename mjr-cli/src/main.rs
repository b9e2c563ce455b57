mod cli;
mod cli_modes;
mod render;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use cli_modes::{
    CliModeResult, calendar_mode, delete_mode, export_mode, read_mode, stats_mode, weather_mode,
    write_mode,
};
use mjr_core::MoodJournal;
use render::{RenderOptions, Renderer, Style, use_color};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_tracing();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("mjr: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr, filtered by `MJR_LOG` (e.g. `MJR_LOG=debug`).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("MJR_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut journal = MoodJournal::new()?;

    let renderer = Renderer::new(Some(RenderOptions {
        date_format: journal.config.date_format.to_string(),
        use_color: use_color(cli.color),
        short_mode: cli.style == Style::Short,
    }));

    if cli.path {
        renderer.print_info(&journal.location());
        return Ok(());
    }

    report_load_problems(&renderer, &journal);

    if let CliModeResult::Finish = delete_mode(&cli, &renderer, &mut journal)? {
        return Ok(());
    };

    if let CliModeResult::Finish = export_mode(&cli, &renderer, &journal)? {
        return Ok(());
    };

    if let CliModeResult::Finish = stats_mode(&cli, &renderer, &journal)? {
        return Ok(());
    };

    if let CliModeResult::Finish = calendar_mode(&cli, &renderer, &journal)? {
        return Ok(());
    };

    if let CliModeResult::Finish = weather_mode(&cli, &renderer, &journal)? {
        return Ok(());
    };

    if let CliModeResult::Finish = write_mode(&cli, &renderer, &mut journal)? {
        return Ok(());
    };

    read_mode(&cli, &renderer, &journal)?;
    Ok(())
}

fn report_load_problems(renderer: &Renderer, journal: &MoodJournal) {
    let report = journal.load_report();
    if let Some(failure) = &report.failure {
        renderer.print_warning(&format!(
            "Stored entries could not be read, starting empty ({failure})."
        ));
    }
    if !report.quarantined.is_empty() {
        renderer.print_warning(&format!(
            "{} stored entries could not be understood and were set aside in {}.",
            report.quarantined.len(),
            journal.location()
        ));
    }
    if report.migrated > 0 {
        tracing::info!(migrated = report.migrated, "upgraded stored entries");
    }
}
