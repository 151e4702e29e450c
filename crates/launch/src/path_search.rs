use std::path::{Path, PathBuf};

use tracing::trace;

#[cfg(windows)]
const SEPARATOR: char = ';';
#[cfg(not(windows))]
const SEPARATOR: char = ':';

/// `name` with `.exe` appended unless it already ends in `.exe` (any case).
pub fn exe_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    if lower.ends_with(".exe") {
        name.to_string()
    } else {
        format!("{name}.exe")
    }
}

/// Search the directories of a `PATH` value in order for the file `file`.
///
/// Entries are trimmed and blank entries skipped. Returns the first
/// candidate that is an existing file.
pub fn find_on_path(file: &str, path_var: &str) -> Option<PathBuf> {
    path_var
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|dir| !dir.is_empty())
        .map(|dir| Path::new(dir).join(file))
        .find(|candidate| {
            let hit = candidate.is_file();
            trace!(candidate = %candidate.display(), hit, "path_probe");
            hit
        })
}
