use std::{fs, path::PathBuf, sync::Arc, time::Duration};

use async_trait::async_trait;
use launch::{
    LookupError, PackageLookup, Resolved, Resolver, Vars,
    mock::{RecordingLauncher, StaticLookup},
};
use summon_engine::{
    Engine, MockHotkeyApi, Notice, NoticeKind, NotificationDispatcher, Outcome, RELOAD_ID, Registry,
    Target,
};
use tempfile::TempDir;
use tokio::sync::{Notify, mpsc};
use win_keycode::KeyTokens;
use win_winops::{MockWinOps, ProcessWindow, Reveal, WindowHandle};

struct Harness {
    registry: Registry,
    engine: Engine,
    winops: Arc<MockWinOps>,
    launcher: Arc<RecordingLauncher>,
    lookup: StaticLookup,
    notices: mpsc::Receiver<Notice>,
}

fn harness() -> Harness {
    let lookup = StaticLookup::new();
    harness_with(Arc::new(lookup.clone()), lookup)
}

fn harness_with(package_lookup: Arc<dyn PackageLookup>, lookup: StaticLookup) -> Harness {
    let api = MockHotkeyApi::new();
    let registry = Registry::new(Box::new(api), KeyTokens::LastWins);
    let winops = Arc::new(MockWinOps::new());
    let launcher = Arc::new(RecordingLauncher::new());
    let resolver = Resolver::new(package_lookup).with_vars(Vars::default());
    let (tx, notices) = mpsc::channel(16);
    let engine = Engine::new_with_ops(
        registry.handle(),
        winops.clone(),
        resolver,
        launcher.clone(),
        NotificationDispatcher::new(tx),
    );
    Harness {
        registry,
        engine,
        winops,
        launcher,
        lookup,
        notices,
    }
}

fn target(hotkey: &str, process: &str, expr: &str) -> Target {
    Target {
        hotkey: hotkey.into(),
        process_name: process.into(),
        launch_expr: expr.into(),
    }
}

fn app_in(dir: &TempDir, name: &str) -> PathBuf {
    let p = dir.path().join(name);
    fs::write(&p, b"").expect("write");
    p
}

#[tokio::test]
async fn visible_window_is_activated_without_launching() {
    let mut h = harness();
    h.registry
        .load(vec![target("Alt+F9", "Code", "finduwp:Code")]);
    h.winops.add_window("Code.exe", 100, WindowHandle(0xabc));

    assert_eq!(h.engine.dispatch(0).await, Outcome::Activated);
    assert_eq!(h.winops.activated(), vec![WindowHandle(0xabc)]);
    assert!(h.launcher.launched().is_empty());
    assert_eq!(h.lookup.queries(), 0);
    assert!(h.notices.try_recv().is_err());
}

#[tokio::test]
async fn missing_window_launches_literal_path_once() {
    let dir = TempDir::new().expect("tmp");
    let app = app_in(&dir, "app.exe");
    let mut h = harness();
    h.registry.load(vec![target(
        "Ctrl+Alt+T",
        "app",
        &app.to_string_lossy(),
    )]);

    assert_eq!(h.engine.dispatch(0).await, Outcome::Launched);
    assert_eq!(h.launcher.launched(), vec![Resolved::Path(app)]);
    assert!(h.winops.activated().is_empty());
}

#[tokio::test]
async fn window_hidden_to_tray_is_shown_again() {
    let mut h = harness();
    h.registry
        .load(vec![target("Alt+F12", "Discord", "finduwp:Discord")]);
    h.winops.set_processes(vec![(
        "Discord.exe".into(),
        ProcessWindow {
            pid: 40,
            main_window: Some(WindowHandle(0x99)),
            visible: false,
        },
    )]);

    assert_eq!(h.engine.dispatch(0).await, Outcome::Activated);
    assert_eq!(h.winops.revealed(), vec![(WindowHandle(0x99), Reveal::Show)]);
    assert_eq!(h.winops.activated(), vec![WindowHandle(0x99)]);
    assert!(h.launcher.launched().is_empty());
    assert_eq!(h.lookup.queries(), 0);

    assert_eq!(h.engine.dispatch(0).await, Outcome::Activated);
    assert_eq!(h.winops.revealed().len(), 1);
}

#[tokio::test]
async fn unknown_ids_are_ignored() {
    let mut h = harness();
    h.registry.load(vec![target("Alt+F9", "Code", "ms-settings:")]);
    assert_eq!(h.engine.dispatch(7).await, Outcome::Ignored);
    assert_eq!(h.engine.dispatch(RELOAD_ID).await, Outcome::Ignored);
    assert!(h.winops.calls().is_empty());
}

#[tokio::test]
async fn resolution_failure_sends_a_warning() {
    let mut h = harness();
    h.registry
        .load(vec![target("Alt+F11", "AppleMusic", "finduwp:AppleMusic")]);

    assert_eq!(h.engine.dispatch(0).await, Outcome::Failed);
    let notice = h.notices.try_recv().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Warn);
    assert!(notice.text.contains("Could not find UWP app matching: AppleMusic"));
    assert!(h.launcher.launched().is_empty());
}

#[tokio::test]
async fn missing_literal_path_is_an_error_notice() {
    let dir = TempDir::new().expect("tmp");
    let gone = dir.path().join("gone.exe");
    let mut h = harness();
    h.registry
        .load(vec![target("Alt+G", "gone", &gone.to_string_lossy())]);

    assert_eq!(h.engine.dispatch(0).await, Outcome::Failed);
    let notice = h.notices.try_recv().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.text.starts_with("Application not found:"));
}

#[tokio::test]
async fn activation_failure_does_not_launch() {
    let mut h = harness();
    h.registry.load(vec![target("Alt+F9", "Code", "ms-settings:")]);
    h.winops.add_window("Code.exe", 1, WindowHandle(0x10));
    h.winops.set_fail_activate(true);

    assert_eq!(h.engine.dispatch(0).await, Outcome::Failed);
    assert!(h.launcher.launched().is_empty());
    assert_eq!(h.notices.try_recv().map(|n| n.kind).ok(), Some(NoticeKind::Warn));
}

#[tokio::test]
async fn launch_failure_sends_an_error() {
    let mut h = harness();
    h.registry
        .load(vec![target("Win+S", "SystemSettings", "ms-settings:")]);
    h.launcher.set_fail(true);

    assert_eq!(h.engine.dispatch(0).await, Outcome::Failed);
    let notice = h.notices.try_recv().expect("notice");
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.text.contains("ms-settings:"));
}

#[tokio::test]
async fn package_lookup_is_cached_across_dispatches() {
    let dir = TempDir::new().expect("tmp");
    let exe = app_in(&dir, "Terminal.exe");
    let mut h = harness();
    h.lookup
        .add_package("Microsoft.WindowsTerminal", exe.clone());
    h.registry
        .load(vec![target("Ctrl+Alt+T", "WindowsTerminal", "finduwp:WindowsTerminal")]);

    assert_eq!(h.engine.dispatch(0).await, Outcome::Launched);
    assert_eq!(h.engine.dispatch(0).await, Outcome::Launched);
    assert_eq!(h.lookup.queries(), 1);
    assert_eq!(h.launcher.launched(), vec![Resolved::Path(exe.clone()), Resolved::Path(exe)]);
}

#[tokio::test]
async fn reload_swaps_the_table_seen_by_dispatch() {
    let dir = TempDir::new().expect("tmp");
    let first = app_in(&dir, "first.exe");
    let second = app_in(&dir, "second.exe");
    let mut h = harness();
    h.registry
        .load(vec![target("Alt+1", "first", &first.to_string_lossy())]);
    assert_eq!(h.engine.dispatch(0).await, Outcome::Launched);

    h.registry
        .load(vec![target("Alt+2", "second", &second.to_string_lossy())]);
    assert_eq!(h.engine.dispatch(0).await, Outcome::Launched);
    assert_eq!(
        h.launcher.launched(),
        vec![Resolved::Path(first), Resolved::Path(second)]
    );
}

#[tokio::test]
async fn run_consumes_the_id_channel() {
    let mut h = harness();
    h.registry.load(vec![target("Alt+F9", "Code", "ms-settings:")]);
    h.winops.add_window("Code.exe", 1, WindowHandle(0x10));

    let (tx, rx) = mpsc::unbounded_channel();
    let runner = tokio::spawn(h.engine.clone().run(rx));
    tx.send(0).expect("send");
    drop(tx);
    runner.await.expect("join");

    for _ in 0..100 {
        if !h.winops.activated().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(h.winops.activated(), vec![WindowHandle(0x10)]);
}

/// Blocks inside the package query until released.
struct GatedLookup {
    entered: Arc<Notify>,
    gate: Arc<Notify>,
    path: PathBuf,
}

#[async_trait]
impl PackageLookup for GatedLookup {
    async fn find(&self, _term: &str, _limit: Duration) -> Result<Option<PathBuf>, LookupError> {
        self.entered.notify_one();
        self.gate.notified().await;
        Ok(Some(self.path.clone()))
    }
}

#[tokio::test]
async fn second_firing_while_in_flight_is_ignored() {
    let dir = TempDir::new().expect("tmp");
    let exe = app_in(&dir, "Slow.exe");
    let entered = Arc::new(Notify::new());
    let gate = Arc::new(Notify::new());
    let gated = GatedLookup {
        entered: entered.clone(),
        gate: gate.clone(),
        path: exe.clone(),
    };
    let mut h = harness_with(Arc::new(gated), StaticLookup::new());
    h.registry.load(vec![
        target("Alt+S", "Slow", "finduwp:Slow"),
        target("Alt+M", "Settings", "ms-settings:"),
    ]);

    let first = tokio::spawn({
        let engine = h.engine.clone();
        async move { engine.dispatch(0).await }
    });
    entered.notified().await;

    assert_eq!(h.engine.dispatch(0).await, Outcome::Ignored);
    assert_eq!(h.engine.dispatch(1).await, Outcome::Launched);

    gate.notify_one();
    assert_eq!(first.await.expect("join"), Outcome::Launched);
    assert_eq!(h.engine.dispatch(0).await, Outcome::Launched);
}
