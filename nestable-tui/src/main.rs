mod app;
mod grid;
mod paths;
mod sample;
mod terminal;

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use nestable::prelude::*;
use simplelog::{Config, LevelFilter, WriteLogger};
use thiserror::Error;

use crate::app::App;
use crate::terminal::Terminal;

#[derive(Parser)]
#[command(name = "nestable-tui")]
#[command(about = "Browse, select and rearrange a tree table in the terminal")]
struct Cli {
    /// JSON file holding the tree, an array of nodes
    #[arg(long)]
    tree: Option<PathBuf>,

    /// JSON file holding the table configuration
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Error)]
enum HostError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Table(#[from] TableError),

    #[error("invalid tree: {0}")]
    Tree(#[from] serde_json::Error),
}

/// Open the log file, creating its directory first.
fn open_log(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    File::create(path)
}

fn init_logging() {
    let Some(path) = paths::log_file() else { return };
    let file = match open_log(&path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to create log file {}: {e}", path.display());
            return;
        }
    };
    if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
        eprintln!("Failed to initialize logging: {e}");
    }
}

fn load(cli: &Cli) -> Result<(TableConfig, Vec<Node>), HostError> {
    let mut config = match &cli.config {
        Some(path) => TableConfig::from_json(&fs::read_to_string(path)?)?,
        None => sample::config(),
    };
    if config.columns.is_empty() {
        config.columns = sample::columns();
    }

    let nodes: Vec<Node> = match &cli.tree {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => sample::tree(),
    };
    validate_unique_ids(&nodes)?;

    log::info!(
        "loaded {} nodes and {} columns",
        count_nodes(&nodes),
        config.columns.len()
    );
    Ok((config, nodes))
}

fn run(cli: &Cli) -> Result<(), HostError> {
    let (config, nodes) = load(cli)?;
    let mut app = App::new(config, nodes);
    let mut terminal = Terminal::new()?;
    app.run(&mut terminal)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    paths::rotate_logs();
    init_logging();

    if let Err(e) = run(&cli) {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
