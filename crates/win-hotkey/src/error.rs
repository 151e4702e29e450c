//! Error types and result alias for the win-hotkey crate.
use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type used throughout this crate.
pub type Result<T> = StdResult<T, Error>;

/// Error variants produced by this crate.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The OS refused to bind a hotkey, usually because another process owns it.
    #[error("could not bind hotkey {chord} (id {id}): {message}")]
    Bind {
        /// Registration id.
        id: u32,
        /// Canonical chord text.
        chord: String,
        /// OS error text.
        message: String,
    },
    /// Releasing a binding failed.
    #[error("could not release hotkey id {id}: {message}")]
    Unbind {
        /// Registration id.
        id: u32,
        /// OS error text.
        message: String,
    },
    /// Underlying OS call failed outside bind/unbind.
    #[error("OS error: {0}")]
    Os(String),
    /// Global hotkeys are only available on Windows.
    #[error("global hotkeys are not supported on this platform")]
    Unsupported,
}
