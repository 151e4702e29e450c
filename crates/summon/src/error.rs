use std::io;

use thiserror::Error;

/// Errors that end the `summon` process.
#[derive(Debug, Error)]
pub enum Error {
    /// Another instance holds the single-instance mutex.
    #[error("summon is already running")]
    AlreadyRunning,

    /// Configuration could not be loaded.
    #[error("{}", .0.pretty())]
    Config(#[from] config::Error),

    /// The hotkey window or message pump failed.
    #[error(transparent)]
    Hotkey(#[from] win_hotkey::Error),

    /// Runtime or filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Reading or writing the autostart entry failed.
    #[error("autostart: {0}")]
    Autostart(String),

    /// The operation needs Windows.
    #[error("{0} is only supported on Windows")]
    Unsupported(&'static str),
}

/// Result alias for the binary.
pub type Result<T> = std::result::Result<T, Error>;
