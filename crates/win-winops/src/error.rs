use thiserror::Error;

use crate::WindowHandle;

/// Errors that can occur during window operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The handle no longer refers to a live window.
    #[error("window {0} no longer exists")]
    NotFound(WindowHandle),

    /// Bringing a window to the foreground failed.
    #[error("could not activate window {handle}: {message}")]
    Activation {
        /// Target window.
        handle: WindowHandle,
        /// OS error text.
        message: String,
    },

    /// Window operations are only available on Windows.
    #[error("window operations are not supported on this platform")]
    Unsupported,
}

/// Convenient result alias for window operations.
pub type Result<T> = std::result::Result<T, Error>;
