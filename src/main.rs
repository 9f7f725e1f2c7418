//! Bento grid - CLI entry point
//!
//! Runs the layout engine over JSON layouts: resolve overlaps, find a spot
//! for a new widget, or check a layout for conflicts.

use bento_grid::config::{default, xdg, Config, ConfigError, ConfigLoader};
use bento_grid::grid::{first_fit, overlapping_pairs, resolve, GridItem, MAX_COLUMNS};
use bento_grid::logging;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Bento grid layout engine
#[derive(Parser)]
#[command(name = "bento")]
#[command(version, about = "Bento grid layout engine")]
struct Cli {
    /// Configuration file (defaults to the XDG location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands for the bento CLI
#[derive(Subcommand)]
enum Commands {
    /// Resolve overlaps in a layout and print the result as JSON
    Resolve {
        /// JSON array of grid items, or `-` for stdin
        file: PathBuf,
        /// Grid width, overriding the configuration
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_COLUMNS)))]
        columns: Option<u32>,
    },

    /// Print the first free origin for a new item
    Place {
        /// Item width in columns
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        width: u32,
        /// Item height in rows
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        height: u32,
        /// JSON array of grid items, or `-` for stdin
        file: PathBuf,
        /// Grid width, overriding the configuration
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_COLUMNS)))]
        columns: Option<u32>,
    },

    /// Report overlapping items; exits non-zero if any
    Check {
        /// JSON array of grid items, or `-` for stdin
        file: PathBuf,
        /// Grid width, overriding the configuration
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_COLUMNS)))]
        columns: Option<u32>,
    },

    /// Manage configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Actions for the `config` subcommand.
#[derive(Subcommand)]
enum ConfigAction {
    /// Create default configuration file
    Init {
        /// Overwrite existing configuration (creates backup)
        #[arg(long)]
        force: bool,
    },
    /// Show configuration file path
    Path,
    /// Validate configuration file
    Validate,
}

/// Errors reading a layout file.
#[derive(Debug, thiserror::Error)]
enum InputError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid layout in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Reads a JSON array of grid items from `path`, or stdin for `-`.
fn read_items(path: &Path) -> Result<Vec<GridItem>, InputError> {
    let name = path.display().to_string();
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| InputError::Read {
                path: name.clone(),
                source,
            })?;
        buf
    } else {
        std::fs::read_to_string(path).map_err(|source| InputError::Read {
            path: name.clone(),
            source,
        })?
    };
    serde_json::from_str(&text).map_err(|source| InputError::Parse { path: name, source })
}

/// Loads configuration and installs logging for the layout commands.
fn init_layout_command(path: Option<&Path>) -> Result<Config, ExitCode> {
    let config = ConfigLoader::load(path).map_err(|e| {
        eprintln!("Config error: {e}");
        ExitCode::FAILURE
    })?;
    logging::init(config.log.level);
    Ok(config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Resolve { file, columns } => match init_layout_command(config_path) {
            Ok(config) => run_resolve_command(&file, columns.unwrap_or(config.grid.columns)),
            Err(code) => code,
        },
        Commands::Place {
            width,
            height,
            file,
            columns,
        } => match init_layout_command(config_path) {
            Ok(config) => {
                let columns = columns.unwrap_or(config.grid.columns);
                run_place_command(&file, width, height, columns, config.grid.scan_rows)
            }
            Err(code) => code,
        },
        Commands::Check { file, columns } => match init_layout_command(config_path) {
            Ok(config) => run_check_command(&file, columns.unwrap_or(config.grid.columns)),
            Err(code) => code,
        },
        Commands::Config { action } => run_config_command(action, config_path),
    }
}

fn run_resolve_command(file: &Path, columns: u32) -> ExitCode {
    let items = match read_items(file) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    // Locked items stay where they are, even past the right edge.
    let fitted: Vec<GridItem> = items
        .into_iter()
        .map(|mut item| {
            if !item.locked {
                item.position = item.position.fit_columns(columns);
            }
            item
        })
        .collect();
    let resolved = resolve(&fitted, columns);
    match serde_json::to_string_pretty(&resolved) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: failed to serialize layout: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_place_command(file: &Path, width: u32, height: u32, columns: u32, scan_rows: u32) -> ExitCode {
    let items = match read_items(file) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    let width = width.min(columns);
    let (x, y) = first_fit(&items, width, height, columns, scan_rows);
    println!("{}", serde_json::json!({ "x": x, "y": y, "w": width, "h": height }));
    ExitCode::SUCCESS
}

fn run_check_command(file: &Path, columns: u32) -> ExitCode {
    let items = match read_items(file) {
        Ok(items) => items,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut problems = 0;
    for item in items.iter().filter(|item| item.position.right() > columns) {
        println!("{} extends past column {columns}", item.id);
        problems += 1;
    }
    for (a, b) in overlapping_pairs(&items) {
        println!("{a} overlaps {b}");
        problems += 1;
    }

    if problems == 0 {
        println!("No overlaps in {} items", items.len());
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn run_config_command(action: ConfigAction, path: Option<&Path>) -> ExitCode {
    let result: Result<(), ConfigError> = match action {
        ConfigAction::Init { force } => {
            let created = match path {
                Some(path) => default::create_config_at(path, force).map(|()| path.to_path_buf()),
                None => default::create_default_config(force),
            };
            created.map(|path| println!("Created configuration at {}", path.display()))
        }
        ConfigAction::Path => {
            let path = path.map(Path::to_path_buf).unwrap_or_else(xdg::config_path);
            println!("{}", path.display());
            Ok(())
        }
        ConfigAction::Validate => ConfigLoader::load(path).map(|config| {
            println!("Configuration is valid");
            println!("{config:#?}");
        }),
    };
    if let Err(e) = result {
        eprintln!("Config error: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
