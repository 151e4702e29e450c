//! summon configuration.
//!
//! A JSON file listing shortcuts, each mapping a hotkey to a process name and
//! a launch expression:
//!
//! ```json
//! {
//!   "shortcuts": [
//!     { "hotkey": "Alt+F9", "processName": "Code",
//!       "launchPath": "C:\\Program Files\\Microsoft VS Code\\Code.exe" }
//!   ],
//!   "reloadHotkey": "Ctrl+Alt+R"
//! }
//! ```
//!
//! Only `shortcuts` is required and it must not be empty.

use std::{
    env,
    path::{Path, PathBuf},
};

mod defaults;
mod error;
mod loader;
mod types;

pub use error::{Error, excerpt_at};
pub use loader::{load_from_path, parse_str, write_default};
pub use types::{Config, Shortcut};

/// Determine the default config path: `config.json` next to the executable.
pub fn default_config_path() -> Result<PathBuf, Error> {
    let exe = env::current_exe().map_err(|e| Error::Read {
        path: None,
        message: format!("cannot locate the running executable: {e}"),
    })?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(defaults::CONFIG_FILE_NAME))
}

/// Resolve the effective config path: `explicit` when provided, else
/// [`default_config_path`].
pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, Error> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => default_config_path(),
    }
}
