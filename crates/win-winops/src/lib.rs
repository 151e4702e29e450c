//! win-winops: process and window operations for summon.
//!
//! Answers two questions for the dispatcher: "does a process with this image
//! name already have a main window?" ([`locate_window`]) and "bring that
//! window to the front" ([`WinOps::force_activate`]). Both go through the
//! [`WinOps`] trait so the engine can be exercised against [`MockWinOps`].
//!
//! Window handles are looked up fresh on every call and never cached.

use std::fmt;

mod error;
mod locate;
pub mod ops;
#[cfg(windows)]
mod sys;

pub use error::{Error, Result};
pub use locate::locate_window;
pub use ops::{MockWinOps, RealWinOps, WinOps};

/// Opaque wrapper around a raw `HWND` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowHandle(pub isize);

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// One running process as seen by the locator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessWindow {
    /// Process id.
    pub pid: u32,
    /// The process's main window, if it has one.
    pub main_window: Option<WindowHandle>,
    /// Whether `main_window` is currently visible.
    pub visible: bool,
}

/// What has to happen to a window before it can be raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reveal {
    /// Already on screen.
    Nothing,
    /// Minimized: restore it (`SW_RESTORE`), which also shows a hidden window.
    Restore,
    /// Hidden, e.g. closed to the tray: show it (`SW_SHOW`).
    Show,
}

impl Reveal {
    /// The step needed for a window with the given state.
    pub fn for_window(visible: bool, iconic: bool) -> Self {
        if iconic {
            Self::Restore
        } else if !visible {
            Self::Show
        } else {
            Self::Nothing
        }
    }
}

/// Case-insensitive image-name comparison where a trailing `.exe` is optional
/// on either side: `Code`, `code.exe` and `CODE.EXE` all name the same image.
pub fn image_name_matches(image: &str, wanted: &str) -> bool {
    fn stem(s: &str) -> String {
        let lower = s.trim().to_lowercase();
        match lower.strip_suffix(".exe") {
            Some(stem) => stem.to_string(),
            None => lower,
        }
    }
    let wanted = stem(wanted);
    !wanted.is_empty() && stem(image) == wanted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_names() {
        assert!(image_name_matches("Code.exe", "Code"));
        assert!(image_name_matches("code", "CODE.EXE"));
        assert!(image_name_matches("WindowsTerminal.exe", "windowsterminal.exe"));
        assert!(!image_name_matches("Code.exe", "Cod"));
        assert!(!image_name_matches("chrome.exe", "Code"));
        assert!(!image_name_matches(".exe", ""));
    }

    #[test]
    fn hidden_windows_are_shown_before_raising() {
        assert_eq!(Reveal::for_window(true, false), Reveal::Nothing);
        assert_eq!(Reveal::for_window(false, false), Reveal::Show);
        assert_eq!(Reveal::for_window(true, true), Reveal::Restore);
        assert_eq!(Reveal::for_window(false, true), Reveal::Restore);
    }

    #[test]
    fn handle_display_is_hex() {
        assert_eq!(WindowHandle(0x1a2b).to_string(), "0x1a2b");
    }
}
