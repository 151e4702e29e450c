//! The long-running dispatcher: hotkey window and pump on the main thread,
//! engine and notices on a tokio runtime.

use std::{path::Path, rc::Rc, time::Duration};

use config::Config;
use launch::Resolver;
use summon_engine::{
    APP_NAME, Engine, NotificationDispatcher, RELOAD_ID, RealHotkeyApi, Registry, Target,
};
use tokio::{runtime, sync::mpsc};
use tracing::{debug, error, info, warn};

use crate::{Result, instance, notices};

/// Notices queued before the presenter falls behind.
const NOTICE_QUEUE: usize = 64;

/// Bind every shortcut in `cfg`, plus the reload chord when configured.
fn apply(registry: &mut Registry, cfg: &Config, notifier: &NotificationDispatcher) {
    registry.set_policy(cfg.key_tokens());
    let report = registry.load(cfg.shortcuts.iter().map(Target::from));
    for failure in &report.failures {
        if let Err(e) = notifier.send_warn(APP_NAME, failure.to_string()) {
            debug!(error = %e, "notice_dropped");
        }
    }
    if let Some(hotkey) = &cfg.reload_hotkey {
        match registry.register_control(RELOAD_ID, hotkey) {
            Ok(chord) => debug!(chord = %chord, "reload_hotkey_bound"),
            Err(e) => {
                if let Err(e) = notifier.send_warn(APP_NAME, e.to_string()) {
                    debug!(error = %e, "notice_dropped");
                }
            }
        }
    }
    info!(
        bound = report.bound.len(),
        failed = report.failures.len(),
        "shortcuts_active"
    );
}

/// Re-read the config and rebind. A config that fails to load keeps the
/// current bindings.
fn reload(
    path: &Path,
    registry: &mut Registry,
    resolver: &Resolver,
    notifier: &NotificationDispatcher,
) {
    info!(path = %path.display(), "config_reload");
    match config::load_from_path(path) {
        Ok(cfg) => {
            apply(registry, &cfg, notifier);
            resolver.cache().clear();
            if let Err(e) = notifier.send_info(
                APP_NAME,
                format!("Reloaded {} shortcuts", registry.snapshot().len()),
            ) {
                debug!(error = %e, "notice_dropped");
            }
        }
        Err(e) => {
            warn!(error = %e, "config_reload_failed");
            if let Err(e) = notifier.send_error(&format!("{APP_NAME} - Config Error"), e.pretty())
            {
                debug!(error = %e, "notice_dropped");
            }
        }
    }
}

/// Run until Ctrl+C. Every binding is released before returning.
pub fn run(config_path: &Path) -> Result<()> {
    let _instance = instance::acquire()?;

    let cfg = match config::load_from_path(config_path) {
        Ok(cfg) => cfg,
        Err(e @ config::Error::CreatedDefault { .. }) => {
            println!("{}", e.pretty());
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let rt = runtime::Builder::new_multi_thread().enable_all().build()?;
    let (notice_tx, notice_rx) = mpsc::channel(NOTICE_QUEUE);
    let notifier = NotificationDispatcher::new(notice_tx);
    rt.spawn(notices::present(notice_rx));

    let manager = Rc::new(win_hotkey::Manager::new()?);
    let mut registry = Registry::new(
        Box::new(RealHotkeyApi::new(manager.clone())),
        cfg.key_tokens(),
    );
    let resolver = Resolver::default().with_timeout(cfg.lookup_timeout());
    let engine = Engine::new(registry.handle(), resolver.clone(), notifier.clone());

    let (id_tx, id_rx) = mpsc::unbounded_channel();
    rt.spawn(engine.run(id_rx));

    let quit = manager.quit_handle();
    rt.spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("ctrl_c");
                if let Err(e) = quit.quit() {
                    error!(error = %e, "quit_failed");
                }
            }
            Err(e) => warn!(error = %e, "ctrl_c_handler_failed"),
        }
    });

    apply(&mut registry, &cfg, &notifier);
    if let Err(e) = notifier.send_info(APP_NAME, "Running in the background.".to_string()) {
        debug!(error = %e, "notice_dropped");
    }

    let pumped = manager.run(|id| {
        if id == RELOAD_ID {
            reload(config_path, &mut registry, &resolver, &notifier);
        } else if id_tx.send(id).is_err() {
            warn!(id, "engine_gone");
        }
    });

    registry.unregister_all();
    drop(id_tx);
    rt.shutdown_timeout(Duration::from_secs(2));
    info!("summon_exit");
    pumped.map_err(Into::into)
}
