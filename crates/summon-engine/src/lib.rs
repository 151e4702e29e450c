//! summon engine
//!
//! The engine turns a fired hotkey id into "show or launch":
//! - [`Registry`] binds configured chords at the OS level and publishes the
//!   id → [`Target`] table;
//! - [`Engine`] looks the id up, activates an existing window of the target
//!   process or resolves and launches its launch expression;
//! - [`NotificationDispatcher`] carries user-facing notices out.
//!
//! The registry lives on the hotkey window's thread. The engine only holds a
//! [`TableHandle`] and runs on tokio; window and launch calls go through
//! `spawn_blocking`.
use std::{collections::HashSet, sync::Arc};

use launch::{Launcher, OpenLauncher, ResolveError, Resolver};
use parking_lot::Mutex;
use tokio::{sync::mpsc::UnboundedReceiver, task};
use tracing::{debug, info, trace, warn};
use win_winops::{RealWinOps, WinOps, locate_window};

mod deps;
mod error;
mod notification;
mod registry;

pub use deps::{HotkeyApi, MockHotkeyApi, RealHotkeyApi};
pub use error::{Error, RegisterError, Result};
pub use notification::{Notice, NoticeKind, NotificationDispatcher};
pub use registry::{LoadReport, Registry, Table, TableHandle, Target};

/// Hotkey id reserved for the reload chord: the top of the `0..=0xBFFF`
/// range Win32 allows applications. Shortcut ids stay below it.
pub const RELOAD_ID: u32 = 0xBFFF;

/// Title used on every notice.
pub const APP_NAME: &str = "summon";

/// What a single dispatch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An existing window was brought to the foreground.
    Activated,
    /// No window existed; the target was launched.
    Launched,
    /// Unknown id, or a dispatch for the same id was still running.
    Ignored,
    /// Activation, resolution or launch failed; a notice was sent.
    Failed,
}

/// Removes its id from the in-flight set when dropped.
struct InFlight {
    set: Arc<Mutex<HashSet<u32>>>,
    id: u32,
}

impl InFlight {
    fn acquire(set: &Arc<Mutex<HashSet<u32>>>, id: u32) -> Option<Self> {
        set.lock().insert(id).then(|| Self {
            set: set.clone(),
            id,
        })
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.set.lock().remove(&self.id);
    }
}

async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Join(e.to_string()))
}

/// Show-or-launch dispatcher.
///
/// Construct via [`Engine::new`] (or [`Engine::new_with_ops`] to inject
/// collaborators), then feed hotkey ids to [`Engine::dispatch`] or hand the
/// id channel to [`Engine::run`].
#[derive(Clone)]
pub struct Engine {
    table: TableHandle,
    winops: Arc<dyn WinOps>,
    resolver: Resolver,
    launcher: Arc<dyn Launcher>,
    notifier: NotificationDispatcher,
    in_flight: Arc<Mutex<HashSet<u32>>>,
}

impl Engine {
    /// Engine over the real window operations and the OS launcher.
    pub fn new(table: TableHandle, resolver: Resolver, notifier: NotificationDispatcher) -> Self {
        Self::new_with_ops(
            table,
            Arc::new(RealWinOps),
            resolver,
            Arc::new(OpenLauncher),
            notifier,
        )
    }

    /// Engine with explicit collaborators.
    pub fn new_with_ops(
        table: TableHandle,
        winops: Arc<dyn WinOps>,
        resolver: Resolver,
        launcher: Arc<dyn Launcher>,
        notifier: NotificationDispatcher,
    ) -> Self {
        Self {
            table,
            winops,
            resolver,
            launcher,
            notifier,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// The resolver, shared with whoever clears its cache on reload.
    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    fn notify_warn(&self, title: &str, text: String) {
        if let Err(e) = self.notifier.send_warn(title, text) {
            debug!(error = %e, "notice_dropped");
        }
    }

    fn notify_error(&self, title: &str, text: String) {
        if let Err(e) = self.notifier.send_error(title, text) {
            debug!(error = %e, "notice_dropped");
        }
    }

    /// Handle one firing of hotkey `id`.
    pub async fn dispatch(&self, id: u32) -> Outcome {
        let table = self.table.snapshot();
        let Some(target) = table.get(id).cloned() else {
            debug!(id, "dispatch_unknown_id");
            return Outcome::Ignored;
        };
        let Some(_guard) = InFlight::acquire(&self.in_flight, id) else {
            debug!(id, hotkey = %target.hotkey, "dispatch_in_flight");
            return Outcome::Ignored;
        };
        info!(id, hotkey = %target.hotkey, process = %target.process_name, "dispatch");

        let ops = self.winops.clone();
        let name = target.process_name.clone();
        let found = match blocking(move || locate_window(ops.as_ref(), &name)).await {
            Ok(found) => found,
            Err(e) => {
                self.notify_error(APP_NAME, format!("Window lookup failed:\n{e}"));
                return Outcome::Failed;
            }
        };

        if let Some(handle) = found {
            let ops = self.winops.clone();
            return match blocking(move || ops.force_activate(handle)).await {
                Ok(Ok(())) => {
                    debug!(id, window = %handle, "dispatch_activated");
                    Outcome::Activated
                }
                Ok(Err(e)) => {
                    warn!(id, error = %e, "activation_failed");
                    self.notify_warn(
                        APP_NAME,
                        format!("Could not activate {}:\n{e}", target.process_name),
                    );
                    Outcome::Failed
                }
                Err(e) => {
                    self.notify_error(APP_NAME, format!("Activation failed:\n{e}"));
                    Outcome::Failed
                }
            };
        }

        trace!(id, expr = %target.launch_expr, "no_window_resolving");
        let resolved = match self.resolver.resolve(&target.launch_expr).await {
            Ok(r) => r,
            Err(e) => {
                warn!(id, error = %e, "resolve_failed");
                self.report_resolve_error(&e);
                return Outcome::Failed;
            }
        };

        let launcher = self.launcher.clone();
        let what = resolved.clone();
        match blocking(move || launcher.launch(&what)).await {
            Ok(Ok(())) => {
                info!(id, target = %resolved, "dispatch_launched");
                Outcome::Launched
            }
            Ok(Err(e)) => {
                warn!(id, error = %e, "launch_failed");
                self.notify_error(APP_NAME, format!("Failed to launch application:\n{e}"));
                Outcome::Failed
            }
            Err(e) => {
                self.notify_error(APP_NAME, format!("Failed to launch application:\n{e}"));
                Outcome::Failed
            }
        }
    }

    fn report_resolve_error(&self, e: &ResolveError) {
        match e {
            ResolveError::PackageNotFound { term, reason } => {
                let mut text = format!(
                    "Could not find UWP app matching: {term}\n\n\
                     Make sure the app is installed from the Microsoft Store."
                );
                if let Some(reason) = reason {
                    text.push_str(&format!("\n\n({reason})"));
                }
                self.notify_warn(&format!("{APP_NAME} - UWP App Not Found"), text);
            }
            ResolveError::NotOnPath { name } => self.notify_warn(
                &format!("{APP_NAME} - App Not Found in PATH"),
                format!(
                    "Could not find '{name}' in PATH environment variable.\n\n\
                     Make sure the application is installed and in your PATH."
                ),
            ),
            ResolveError::MissingPath { path } => self.notify_error(
                APP_NAME,
                format!("Application not found:\n{}", path.display()),
            ),
            ResolveError::EmptyExpression { .. } => self.notify_error(APP_NAME, e.to_string()),
        }
    }

    /// Dispatch every id received on `rx`, one task per firing, until the
    /// channel closes.
    pub async fn run(self, mut rx: UnboundedReceiver<u32>) {
        debug!("engine_run_start");
        while let Some(id) = rx.recv().await {
            let engine = self.clone();
            tokio::spawn(async move {
                let outcome = engine.dispatch(id).await;
                trace!(id, ?outcome, "dispatch_done");
            });
        }
        debug!("engine_run_exit");
    }
}
