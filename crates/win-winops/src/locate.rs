use tracing::{debug, trace};

use crate::{WindowHandle, WinOps};

/// Find the main window of a running process named `process_name`.
///
/// Takes one snapshot of the matching processes and prefers, in order:
/// the first process whose main window is visible, then the first process
/// with any main window. Returns `None` when no process qualifies.
pub fn locate_window<O: WinOps + ?Sized>(ops: &O, process_name: &str) -> Option<WindowHandle> {
    let procs = ops.processes_named(process_name);
    trace!(process = process_name, count = procs.len(), "locate_window_snapshot");

    let found = procs
        .iter()
        .find(|p| p.visible && p.main_window.is_some())
        .or_else(|| procs.iter().find(|p| p.main_window.is_some()))
        .and_then(|p| p.main_window);
    debug!(process = process_name, window = ?found, "locate_window");
    found
}
