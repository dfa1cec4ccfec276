//! ModeMatrix - row-wise mode calculator with a TUI and a CLI

mod cli;
mod config;
#[cfg(feature = "tui")]
mod tui;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

use cli::{Cli, Command};
use modematrix_core::{Document, FileStore, Session};

fn init_logging(interactive: bool) {
    // The TUI owns the terminal, so stay quiet there unless RUST_LOG asks otherwise.
    let default_filter = if interactive { "off" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let (config, warnings) = config::load_config(cli.config.as_deref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }

    let data_dir = config.data_dir(cli.data_dir.as_deref());
    let export_dir = config.export_dir(None);
    log::debug!("Using data dir {}", data_dir.display());

    let document = Document::new(config.initial_rows, config.initial_columns);
    let mut session = Session::open(FileStore::new(data_dir), document);

    match cli.command {
        Some(Command::Calc {
            file,
            headers,
            export,
            no_save,
        }) => cli::run_calc(
            &mut session,
            file.as_deref(),
            headers,
            export.as_deref(),
            no_save,
        ),
        Some(Command::History { action }) => cli::run_history(&mut session, action, &export_dir),
        Some(Command::Theme { value }) => cli::run_theme(&mut session, value),
        None => run_interactive(session, export_dir),
    }
}

#[cfg(feature = "tui")]
fn run_interactive(session: Session<FileStore>, export_dir: std::path::PathBuf) -> Result<()> {
    let mut app = tui::App::new(session, export_dir);
    tui::run(&mut app)
}

#[cfg(not(feature = "tui"))]
fn run_interactive(_session: Session<FileStore>, _export_dir: std::path::PathBuf) -> Result<()> {
    use clap::CommandFactory;
    Cli::command().print_help()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.command.is_none());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
