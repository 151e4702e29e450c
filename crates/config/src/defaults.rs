// Defaults and the first-run sample configuration

use crate::Shortcut;

/// File name looked up next to the executable.
pub(crate) const CONFIG_FILE_NAME: &str = "config.json";

pub(crate) const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 10;

fn shortcut(hotkey: &str, process_name: &str, launch_path: &str) -> Shortcut {
    Shortcut {
        hotkey: hotkey.to_string(),
        process_name: process_name.to_string(),
        launch_path: launch_path.to_string(),
    }
}

/// Entries of the configuration written on first run.
pub(crate) fn sample_shortcuts() -> Vec<Shortcut> {
    vec![
        shortcut(
            "Alt+F9",
            "Code",
            r"C:\Program Files\Microsoft VS Code\Code.exe",
        ),
        shortcut(
            "Alt+F10",
            "chrome",
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
        ),
        shortcut("Alt+F11", "AppleMusic", "finduwp:AppleMusic"),
        shortcut("Ctrl+Alt+T", "WindowsTerminal", "finduwp:WindowsTerminal"),
    ]
}
