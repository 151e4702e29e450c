use std::result::Result as StdResult;

use thiserror::Error;
use win_keycode::ParseError;

/// Convenient result type for the engine crate.
pub type Result<T> = StdResult<T, Error>;

/// Unified error type for the summon engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The notice channel has been closed by the receiver.
    #[error("notice channel closed")]
    ChannelClosed,

    /// The notice channel is full.
    #[error("notice channel full")]
    ChannelFull,

    /// A blocking task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Join(String),
}

/// Why a single hotkey could not be registered.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The hotkey text does not parse.
    #[error("invalid hotkey '{hotkey}' (id {id}): {source}")]
    Parse {
        /// Registration id.
        id: u32,
        /// Hotkey text as configured.
        hotkey: String,
        /// Parser error.
        #[source]
        source: ParseError,
    },

    /// The OS refused the binding, usually because another application owns it.
    #[error("failed to register hotkey '{hotkey}' (id {id}), it may be in use by another application: {source}")]
    Bind {
        /// Registration id.
        id: u32,
        /// Hotkey text as configured.
        hotkey: String,
        /// OS error.
        #[source]
        source: win_hotkey::Error,
    },
}

impl RegisterError {
    /// Registration id the error refers to.
    pub fn id(&self) -> u32 {
        match self {
            Self::Parse { id, .. } | Self::Bind { id, .. } => *id,
        }
    }

    /// Hotkey text the error refers to.
    pub fn hotkey(&self) -> &str {
        match self {
            Self::Parse { hotkey, .. } | Self::Bind { hotkey, .. } => hotkey,
        }
    }
}
