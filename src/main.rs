//! primdb - in-memory tabular database shell
//!
//! # Usage
//!
//! ```bash
//! # Interactive mode
//! primdb
//!
//! # Execute one command
//! primdb -c "list_tables"
//!
//! # Execute a script, one command per line, without confirmations
//! primdb --yes --file setup.pdb
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rustyline::DefaultEditor;

use primdb::{Database, Shell, ShellConfig, ShellError};

/// In-memory tabular database with an interactive shell
#[derive(Parser, Debug)]
#[command(name = "primdb", version)]
#[command(about = "In-memory tabular database shell", long_about = None)]
struct Cli {
    /// Execute a single command and exit
    #[arg(short = 'c', long = "command")]
    command: Option<String>,

    /// Execute commands from file, one per line, and exit
    #[arg(short = 'f', long = "file")]
    file: Option<PathBuf>,

    /// Answer "y" to every confirmation prompt
    #[arg(short = 'y', long = "yes")]
    yes: bool,

    /// Do not print execution times
    #[arg(long = "no-timing")]
    no_timing: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    no_color: bool,

    /// Configuration file (TOML)
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn main() -> Result<ExitCode, ShellError> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = match &cli.config {
        Some(path) => ShellConfig::load(path)?,
        None => ShellConfig::default(),
    };
    if cli.yes {
        config.confirm = false;
    }
    if cli.no_timing {
        config.timing = false;
    }
    if cli.no_color {
        config.color = false;
    }
    if !config.color {
        colored::control::set_override(false);
    }

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.history_size)?
        .build();
    let editor = DefaultEditor::with_config(editor_config)?;

    let mut shell = Shell::new(Database::new(), editor, std::io::stdout(), config);

    let failed = match (cli.file, cli.command) {
        (Some(file), None) => {
            let script = std::fs::read_to_string(&file).map_err(|e| {
                ShellError::Configuration(format!("failed to read {}: {}", file.display(), e))
            })?;
            shell.run_lines(script.lines())?
        }
        (None, Some(command)) => shell.run_lines([command.as_str()])?,
        (None, None) => {
            shell.run()?;
            0
        }
        (Some(_), Some(_)) => {
            return Err(ShellError::Configuration(
                "cannot specify both --file and --command".into(),
            ));
        }
    };

    if failed > 0 {
        log::debug!("{failed} command(s) failed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
