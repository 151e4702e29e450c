//! Core configuration data types used in the config crate.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use win_keycode::KeyTokens;

use crate::defaults::{DEFAULT_LOOKUP_TIMEOUT_SECS, sample_shortcuts};

/// One hotkey → application mapping.
///
/// Field names are camelCase; the PascalCase spellings are accepted too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortcut {
    /// Hotkey text, e.g. `"Ctrl+Alt+T"`.
    #[serde(alias = "Hotkey")]
    pub hotkey: String,
    /// Image name of the process to look for, `.exe` optional.
    #[serde(alias = "ProcessName")]
    pub process_name: String,
    /// Launch expression used when no window exists.
    #[serde(alias = "LaunchPath")]
    pub launch_path: String,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// The whole configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Shortcuts in registration order; a shortcut's index is its hotkey id.
    #[serde(default, alias = "Shortcuts")]
    pub shortcuts: Vec<Shortcut>,
    /// Hotkey that re-reads the configuration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reload_hotkey: Option<String>,
    /// Bound on one package lookup, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_timeout_secs: Option<u64>,
    /// Reject hotkeys naming more than one key instead of keeping the last.
    #[serde(default, skip_serializing_if = "is_false")]
    pub strict_hotkeys: bool,
}

impl Config {
    /// The configuration written on first run.
    pub fn sample() -> Self {
        Self {
            shortcuts: sample_shortcuts(),
            ..Self::default()
        }
    }

    /// Package lookup timeout, defaulting to ten seconds.
    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_secs(
            self.lookup_timeout_secs
                .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_SECS),
        )
    }

    /// Key-token policy for hotkey parsing.
    pub fn key_tokens(&self) -> KeyTokens {
        if self.strict_hotkeys {
            KeyTokens::Single
        } else {
            KeyTokens::LastWins
        }
    }
}
