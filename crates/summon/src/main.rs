//! Binary entrypoint for summon: global hotkeys that focus an application's
//! window, or launch it when none is open.
use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use config::resolve_config_path;
use logging as logshared;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*};

/// Start-on-login registry entry.
mod autostart;
/// `check` and `resolve` subcommands.
mod check;
mod error;
/// Single-instance guard.
mod instance;
mod notices;
/// The hotkey dispatcher itself.
mod run;

use error::{Error, Result};

#[derive(Parser, Debug)]
#[command(name = "summon", about = "Show-or-launch global hotkeys", version)]
/// Command-line interface for the `summon` binary.
struct Cli {
    /// Optional subcommand; without one summon runs the dispatcher.
    #[command(subcommand)]
    command: Option<Command>,

    /// Logging controls
    #[command(flatten)]
    log: logshared::LogArgs,

    /// Optional path to the config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Load and validate the configuration then exit.
    Check {
        /// Path to configuration file to check (defaults to config.json next to the executable)
        path: Option<PathBuf>,

        /// Dump the parsed configuration as JSON to stdout
        #[arg(long)]
        dump: bool,
    },
    /// Resolve one launch expression and print what would be started.
    Resolve {
        /// Expression such as `finduwp:Calculator` or `path:notepad.exe`
        expr: String,
    },
    /// Manage the start-on-login entry.
    Autostart {
        #[command(subcommand)]
        action: AutostartAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum AutostartAction {
    /// Start summon when the user logs in.
    On,
    /// Remove the start-on-login entry.
    Off,
    /// Show whether summon starts on login.
    Status,
}

fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    match resolve_config_path(explicit) {
        Ok(p) => Some(p),
        Err(e) => {
            eprintln!("{}", e.pretty());
            None
        }
    }
}

fn autostart(action: AutostartAction) -> Result<()> {
    match action {
        AutostartAction::On => autostart::enable(),
        AutostartAction::Off => autostart::disable(),
        AutostartAction::Status => {
            match autostart::status()? {
                autostart::Status::Enabled => println!("enabled"),
                autostart::Status::Disabled => println!("disabled"),
                autostart::Status::Other(cmd) => println!("enabled for another binary: {cmd}"),
            }
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter = logshared::env_filter_from_spec(&cli.log.spec());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().without_time())
        .try_init()
        .ok();

    match cli.command {
        Some(Command::Check { path, dump }) => {
            let explicit = path.as_deref().or(cli.config.as_deref());
            match config_path(explicit) {
                Some(p) => check::check(&p, dump),
                None => ExitCode::FAILURE,
            }
        }
        Some(Command::Resolve { expr }) => check::resolve(&expr),
        Some(Command::Autostart { action }) => match autostart(action) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        },
        None => {
            let Some(path) = config_path(cli.config.as_deref()) else {
                return ExitCode::FAILURE;
            };
            match run::run(&path) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!(error = %e, "summon_failed");
                    eprintln!("{e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
