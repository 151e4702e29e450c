use tracing::info;

use crate::{LaunchError, Resolved};

/// Starts a resolved target as a new, detached process.
pub trait Launcher: Send + Sync {
    /// Launch `target` with shell-execute semantics.
    fn launch(&self, target: &Resolved) -> Result<(), LaunchError>;
}

/// Launches through the OS default handler via the `open` crate
/// (`ShellExecuteW` on Windows).
#[derive(Debug, Default, Clone, Copy)]
pub struct OpenLauncher;

impl Launcher for OpenLauncher {
    fn launch(&self, target: &Resolved) -> Result<(), LaunchError> {
        let res = match target {
            Resolved::Path(p) => open::that_detached(p),
            Resolved::Uri(u) => open::that_detached(u),
        };
        res.map_err(|source| LaunchError::Io {
            target: target.to_string(),
            source,
        })?;
        info!(target = %target, "launched");
        Ok(())
    }
}
