//! Command line interface and the non-interactive commands.

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};

use modematrix_core::export::export_batch;
use modematrix_core::{Document, FileStore, HistoryEntry, ModeMatrixError, RowResult, Session, Theme};
use modematrix_engine::engine::{evaluate, format_number, format_values};

#[derive(Parser)]
#[command(name = "modematrix")]
#[command(about = "Row-wise mode calculator with a local calculation history")]
#[command(version)]
pub struct Cli {
    /// Configuration file (default: config.toml in the user config dir)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the history and theme
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute the mode of every row of a CSV grid
    #[command(after_help = "\
Examples:
  modematrix calc scores.csv
  printf '1,1,2\\n3,,3\\n' | modematrix calc
  modematrix calc scores.csv --headers --export ./out")]
    Calc {
        /// CSV file to read (stdin when absent or '-')
        file: Option<PathBuf>,

        /// First line holds column labels
        #[arg(long)]
        headers: bool,

        /// Also write modematrix_<timestamp>.csv into DIR
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,

        /// Do not record the calculation in history
        #[arg(long)]
        no_save: bool,
    },

    /// Inspect, export or clear past calculations
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Print or change the stored theme
    Theme { value: Option<ThemeArg> },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List calculations, most recent first
    List,
    /// Print the rows of a calculation (1 = most recent)
    Show { position: usize },
    /// Write a calculation as modematrix_history_<timestamp>.csv
    Export {
        position: usize,

        /// Output directory (default: configured export dir)
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,
    },
    /// Delete every calculation
    Clear,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
    Toggle,
}

/// Human-facing history positions start at 1; the store is 0-indexed.
fn history_index(session: &Session<FileStore>, position: usize) -> Result<usize> {
    position.checked_sub(1).ok_or_else(|| {
        ModeMatrixError::IndexOutOfRange {
            index: position,
            len: session.history().len(),
        }
        .into()
    })
}

fn read_grid(file: Option<&Path>, headers: bool) -> Result<Document> {
    match file {
        Some(path) if path != Path::new("-") => Document::from_csv_file(path, headers)
            .with_context(|| format!("Failed to load {}", path.display())),
        _ => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(Document::from_csv_str(&input, headers)?)
        }
    }
}

pub fn format_result(result: &RowResult) -> String {
    format!(
        "Row {}: [{}] -> Mode: {}",
        result.row,
        format_values(&result.values),
        format_number(result.mode)
    )
}

fn format_entry_heading(position: usize, total: usize, entry: &HistoryEntry) -> String {
    format!(
        "{}. Calculation {}  {}  ({} row{})",
        position,
        total + 1 - position,
        entry.timestamp.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S"),
        entry.results.len(),
        if entry.results.len() == 1 { "" } else { "s" }
    )
}

pub fn run_calc(
    session: &mut Session<FileStore>,
    file: Option<&Path>,
    headers: bool,
    export: Option<&Path>,
    no_save: bool,
) -> Result<()> {
    session.document = read_grid(file, headers)?;

    let results: Vec<RowResult> = if no_save {
        let batch = evaluate(&session.document.to_grid());
        if batch.is_empty() {
            return Err(ModeMatrixError::NoNumericData.into());
        }
        batch
    } else {
        let outcome = session.calculate().map(|results| results.to_vec());
        match outcome {
            Ok(results) => results,
            Err(err @ ModeMatrixError::HistoryNotSaved(_)) => {
                eprintln!("Warning: {}", err);
                session.current_results().unwrap_or_default().to_vec()
            }
            Err(err) => return Err(err.into()),
        }
    };

    for result in &results {
        println!("{}", format_result(result));
    }

    if let Some(dir) = export {
        let artifact = export_batch(&results, session.document.column_labels(), Utc::now());
        let path = artifact.write_to(dir)?;
        println!("Exported to {}", path.display());
    }
    Ok(())
}

pub fn run_history(
    session: &mut Session<FileStore>,
    action: HistoryAction,
    export_dir: &Path,
) -> Result<()> {
    match action {
        HistoryAction::List => {
            let history = session.history();
            if history.is_empty() {
                println!("No calculations yet.");
            }
            for (idx, entry) in history.iter().enumerate() {
                println!("{}", format_entry_heading(idx + 1, history.len(), entry));
            }
        }
        HistoryAction::Show { position } => {
            let index = history_index(session, position)?;
            let entry = session.entry_at(index)?;
            println!(
                "{}",
                format_entry_heading(position, session.history().len(), entry)
            );
            for result in &entry.results {
                println!("  {}", format_result(result));
            }
        }
        HistoryAction::Export { position, out } => {
            let index = history_index(session, position)?;
            let artifact = session.export_history_entry(index)?;
            let path = artifact.write_to(out.as_deref().unwrap_or(export_dir))?;
            println!("Exported to {}", path.display());
        }
        HistoryAction::Clear => {
            session.clear_history()?;
            println!("History cleared");
        }
    }
    Ok(())
}

pub fn run_theme(session: &mut Session<FileStore>, value: Option<ThemeArg>) -> Result<()> {
    let theme = match value {
        None => session.theme(),
        Some(ThemeArg::Toggle) => session.toggle_theme()?,
        Some(ThemeArg::Light) => {
            session.set_theme(Theme::Light)?;
            Theme::Light
        }
        Some(ThemeArg::Dark) => {
            session.set_theme(Theme::Dark)?;
            Theme::Dark
        }
    };
    println!("{}", theme);
    Ok(())
}
