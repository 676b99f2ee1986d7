//! `thor` binary: argument parsing, logging setup and the terminal session.

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use thor::config::Config;
use thor::editor::Editor;
use thor::terminal::{StdinSource, StdoutTerminal, TerminalGuard};

#[derive(Parser, Debug)]
#[command(name = "thor")]
#[command(about = "The Text EdiTHOR: a small modal terminal editor")]
#[command(version)]
struct Args {
    /// File to edit (created on first save if it does not exist)
    file: Option<PathBuf>,

    /// Configuration file (default: thor.toml in the current or executable directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a trace log to this file
    #[arg(long, value_name = "PATH")]
    log: Option<PathBuf>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let (config, config_path) = Config::discover(args.config.as_deref())?;

    if let Some(log_path) = args.log.as_deref().or(config.log_file.as_deref()) {
        setup_tracing(log_path)?;
    }
    tracing::info!(config = ?config_path, "starting thor");

    let mut stdout = io::stdout();
    let _guard = TerminalGuard::new(&mut stdout)?;

    let mut editor = Editor::new(StdinSource, StdoutTerminal::new(), config)?;
    if let Some(path) = args.file {
        editor.open(path)?;
    }
    let result = editor.run();
    if let Err(e) = &result {
        tracing::error!("fatal: {e:#}");
    }
    result
}

/// Log to a file; the terminal belongs to the editor.
fn setup_tracing(path: &Path) -> Result<()> {
    use tracing_subscriber::EnvFilter;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Opening log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .init();
    Ok(())
}
