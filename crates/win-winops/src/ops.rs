use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use parking_lot::Mutex;
use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};
use tracing::debug;

use crate::{
    Error, ProcessWindow, Result as WinResult, Reveal, WindowHandle, image_name_matches,
};

/// Trait abstraction over process and window operations to improve testability.
pub trait WinOps: Send + Sync {
    /// All live processes whose image name matches `name`, ordered by pid.
    fn processes_named(&self, name: &str) -> Vec<ProcessWindow>;
    /// Show `handle` if hidden, restore it if minimized, and force it to the
    /// foreground.
    fn force_activate(&self, handle: WindowHandle) -> WinResult<()>;
}

/// Production implementation backed by `sysinfo` and the Win32 window APIs.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealWinOps;

impl WinOps for RealWinOps {
    fn processes_named(&self, name: &str) -> Vec<ProcessWindow> {
        let mut sys = System::new_with_specifics(
            RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()),
        );
        sys.refresh_processes(ProcessesToUpdate::All, true);

        let mut pids: Vec<u32> = sys
            .processes()
            .values()
            .filter(|p| image_name_matches(&p.name().to_string_lossy(), name))
            .map(|p| p.pid().as_u32())
            .collect();
        pids.sort_unstable();
        if pids.is_empty() {
            return Vec::new();
        }

        let windows = main_windows();
        let out: Vec<ProcessWindow> = pids
            .into_iter()
            .map(|pid| match windows.get(&pid) {
                Some(&(handle, visible)) => ProcessWindow {
                    pid,
                    main_window: Some(handle),
                    visible,
                },
                None => ProcessWindow {
                    pid,
                    main_window: None,
                    visible: false,
                },
            })
            .collect();
        debug!(process = name, matches = out.len(), "processes_named");
        out
    }

    fn force_activate(&self, handle: WindowHandle) -> WinResult<()> {
        #[cfg(windows)]
        {
            crate::sys::force_activate(handle)
        }
        #[cfg(not(windows))]
        {
            let _ = handle;
            Err(Error::Unsupported)
        }
    }
}

#[cfg(windows)]
fn main_windows() -> std::collections::HashMap<u32, (WindowHandle, bool)> {
    crate::sys::main_windows()
}

#[cfg(not(windows))]
fn main_windows() -> std::collections::HashMap<u32, (WindowHandle, bool)> {
    std::collections::HashMap::new()
}

/// Mock implementation of [`WinOps`] for tests.
///
/// Holds a settable process table keyed by image name, records every call
/// and every activated handle, and can be told to fail activation. A
/// successful activation of a hidden window marks it visible.
#[derive(Clone, Default)]
pub struct MockWinOps {
    calls: Arc<Mutex<Vec<String>>>,
    processes: Arc<Mutex<Vec<(String, ProcessWindow)>>>,
    activated: Arc<Mutex<Vec<WindowHandle>>>,
    revealed: Arc<Mutex<Vec<(WindowHandle, Reveal)>>>,
    fail_activate: Arc<AtomicBool>,
}

impl MockWinOps {
    /// Create an empty mock: no processes, activation succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the process table with `(image name, process)` pairs.
    pub fn set_processes(&self, procs: Vec<(String, ProcessWindow)>) {
        *self.processes.lock() = procs;
    }

    /// Add one process with a visible main window.
    pub fn add_window(&self, image: &str, pid: u32, handle: WindowHandle) {
        self.processes.lock().push((
            image.to_string(),
            ProcessWindow {
                pid,
                main_window: Some(handle),
                visible: true,
            },
        ));
    }

    /// Make `force_activate` fail from now on.
    pub fn set_fail_activate(&self, v: bool) {
        self.fail_activate.store(v, Ordering::SeqCst);
    }

    /// Names of the calls made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    /// Whether `name` was called at least once.
    pub fn calls_contains(&self, name: &str) -> bool {
        self.calls.lock().iter().any(|c| c == name)
    }

    /// Handles passed to `force_activate`, in order.
    pub fn activated(&self) -> Vec<WindowHandle> {
        self.activated.lock().clone()
    }

    /// Windows that had to be shown or restored before activation.
    pub fn revealed(&self) -> Vec<(WindowHandle, Reveal)> {
        self.revealed.lock().clone()
    }

    fn note(&self, name: &str) {
        self.calls.lock().push(name.to_string());
    }
}

impl WinOps for MockWinOps {
    fn processes_named(&self, name: &str) -> Vec<ProcessWindow> {
        self.note("processes_named");
        let mut out: Vec<ProcessWindow> = self
            .processes
            .lock()
            .iter()
            .filter(|(image, _)| image_name_matches(image, name))
            .map(|(_, p)| *p)
            .collect();
        out.sort_by_key(|p| p.pid);
        out
    }

    fn force_activate(&self, handle: WindowHandle) -> WinResult<()> {
        self.note("force_activate");
        if self.fail_activate.load(Ordering::SeqCst) {
            return Err(Error::Activation {
                handle,
                message: "mock failure".into(),
            });
        }
        for (_, p) in self.processes.lock().iter_mut() {
            if p.main_window == Some(handle) && !p.visible {
                p.visible = true;
                self.revealed.lock().push((handle, Reveal::Show));
            }
        }
        self.activated.lock().push(handle);
        Ok(())
    }
}
