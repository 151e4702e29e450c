//! Presents engine notices to the user.
//!
//! Every notice is already logged by the dispatcher. Warnings and errors are
//! additionally shown in a message box on Windows, each on its own blocking
//! task so one open box does not hold back the next.

use summon_engine::{Notice, NoticeKind};
use tokio::{sync::mpsc::Receiver, task};
use tracing::debug;

/// Consume notices until every sender is gone.
pub async fn present(mut rx: Receiver<Notice>) {
    while let Some(notice) = rx.recv().await {
        if notice.kind == NoticeKind::Info {
            continue;
        }
        task::spawn_blocking(move || show(&notice));
    }
    debug!("notice_presenter_exit");
}

#[cfg(windows)]
fn show(notice: &Notice) {
    use windows::{
        Win32::{
            Foundation::HWND,
            UI::WindowsAndMessaging::{
                MB_ICONERROR, MB_ICONINFORMATION, MB_ICONWARNING, MB_OK, MB_SETFOREGROUND,
                MessageBoxW,
            },
        },
        core::HSTRING,
    };

    let icon = match notice.kind {
        NoticeKind::Info => MB_ICONINFORMATION,
        NoticeKind::Warn => MB_ICONWARNING,
        NoticeKind::Error => MB_ICONERROR,
    };
    unsafe {
        MessageBoxW(
            HWND::default(),
            &HSTRING::from(notice.text.as_str()),
            &HSTRING::from(notice.title.as_str()),
            MB_OK | MB_SETFOREGROUND | icon,
        );
    }
}

#[cfg(not(windows))]
fn show(notice: &Notice) {
    eprintln!("{}: {}", notice.title, notice.text);
}
