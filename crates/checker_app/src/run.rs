use std::path::{Path, PathBuf};
use std::sync::mpsc;

use checker_core::{
    read_playlist, render_clean_playlist, render_report, InputError, Report, ReportError, Summary,
};
use checker_engine::{write_atomically, ChannelProgressSink, CheckEngine, EngineError, PersistError};
use checker_logging::{checker_info, checker_warn};
use chrono::{DateTime, Local};
use thiserror::Error;

use crate::config::CheckerConfig;
use crate::progress::ProgressPrinter;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(anyhow::Error),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("no channel entries found in {0:?}")]
    NoEntries(PathBuf),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("inconsistent results: {0}")]
    Report(#[from] ReportError),
    #[error("failed to write {path:?}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: PersistError,
    },
}

impl AppError {
    /// Process exit status. Unreachable channels are a normal result and
    /// never reach here.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Input(_) => 2,
            AppError::NoEntries(_) => 3,
            AppError::Engine(EngineError::Cancelled { .. }) => 130,
            AppError::Config(_)
            | AppError::Engine(_)
            | AppError::Report(_)
            | AppError::Output { .. } => 1,
        }
    }
}

/// Parse, probe, report. Output files are only written once every entry
/// has an outcome.
pub fn run(config: &CheckerConfig) -> Result<Summary, AppError> {
    let entries = read_playlist(&config.input_path)?;
    if entries.is_empty() {
        return Err(AppError::NoEntries(config.input_path.clone()));
    }
    println!(
        "Found {} channels in {}",
        entries.len(),
        config.input_path.display()
    );

    let expected = entries.len();
    let engine = CheckEngine::new(config.probe_settings(), config.max_workers)?;
    let (event_tx, event_rx) = mpsc::channel();
    let printer = ProgressPrinter::spawn(event_rx);
    let result = {
        let sink = ChannelProgressSink::new(event_tx);
        engine.run(entries, &sink)
    };
    printer.join();

    let report = Report::build(expected, result?)?;
    write_outputs(config, &report, Local::now())?;
    Ok(report.summary())
}

fn write_outputs(
    config: &CheckerConfig,
    report: &Report,
    now: DateTime<Local>,
) -> Result<(), AppError> {
    let text = render_report(report, &now.format("%Y-%m-%d %H:%M:%S").to_string());
    println!("\n{text}");

    let stamp = now.format("%Y%m%d_%H%M%S").to_string();
    let report_path = config.report_path(&stamp);
    save(&report_path, &text)?;
    println!("Report saved to {}", report_path.display());

    if report.reachable().is_empty() {
        checker_warn!("no reachable channels, skipping cleaned playlist");
        println!("No reachable channels; cleaned playlist not written.");
        return Ok(());
    }
    let clean_path = config.clean_path(&stamp);
    save(&clean_path, &render_clean_playlist(report))?;
    println!("Cleaned playlist saved to {}", clean_path.display());
    Ok(())
}

fn save(path: &Path, content: &str) -> Result<(), AppError> {
    write_atomically(path, content).map_err(|source| AppError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    checker_info!("wrote {:?}", path);
    Ok(())
}
