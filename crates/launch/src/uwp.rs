//! Installed-package ("UWP") lookup and its result cache.
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::{process::Command, time::timeout};
use tracing::{debug, trace};

use crate::LookupError;

/// Default bound on a single package query.
pub const DEFAULT_LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// Finds the entry executable of an installed package by name fragment.
#[async_trait]
pub trait PackageLookup: Send + Sync {
    /// Return the executable of the first non-framework package whose name
    /// contains `term`, `Ok(None)` when nothing matches.
    async fn find(&self, term: &str, limit: Duration) -> Result<Option<PathBuf>, LookupError>;
}

/// Quote `s` as a PowerShell single-quoted string literal.
fn ps_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// The PowerShell script that resolves `term` to a package executable.
pub fn lookup_script(term: &str) -> String {
    let pattern = ps_quote(&format!("*{term}*"));
    format!(
        "Get-AppxPackage | Where-Object {{ $_.Name -like {pattern} -and $_.IsFramework -eq $false }} \
         | Select-Object -First 1 | ForEach-Object {{ \
         $m = Join-Path $_.InstallLocation 'AppxManifest.xml'; \
         if (Test-Path $m) {{ \
         [xml]$x = Get-Content $m; \
         $exe = @($x.Package.Applications.Application)[0].Executable; \
         if ($exe) {{ Write-Output (Join-Path $_.InstallLocation $exe) }} }} }}"
    )
}

/// Queries `Get-AppxPackage` through `powershell.exe`.
#[derive(Debug, Clone)]
pub struct PowerShellLookup {
    program: String,
}

impl Default for PowerShellLookup {
    fn default() -> Self {
        Self {
            program: "powershell.exe".to_string(),
        }
    }
}

impl PowerShellLookup {
    /// Use a different PowerShell executable (e.g. `pwsh.exe`).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl PackageLookup for PowerShellLookup {
    async fn find(&self, term: &str, limit: Duration) -> Result<Option<PathBuf>, LookupError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(["-NoProfile", "-NonInteractive", "-Command"])
            .arg(lookup_script(term))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(windows)]
        {
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            cmd.creation_flags(CREATE_NO_WINDOW);
        }

        trace!(program = %self.program, term, "package_query_start");
        let child = cmd.spawn().map_err(|source| LookupError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        let output = timeout(limit, child.wait_with_output())
            .await
            .map_err(|_| LookupError::Timeout(limit))?
            .map_err(|source| LookupError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(LookupError::Exit {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        let found = stdout
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(PathBuf::from);
        debug!(term, found = ?found, "package_query_done");
        Ok(found)
    }
}

/// Successful lookups keyed by lowercased search term.
#[derive(Debug, Default)]
pub struct UwpCache {
    entries: Mutex<HashMap<String, PathBuf>>,
}

impl UwpCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(term: &str) -> String {
        term.to_lowercase()
    }

    /// Cached executable for `term`.
    pub fn get(&self, term: &str) -> Option<PathBuf> {
        self.entries.lock().get(&Self::key(term)).cloned()
    }

    /// Remember `path` for `term`.
    pub fn insert(&self, term: &str, path: &Path) {
        self.entries
            .lock()
            .insert(Self::key(term), path.to_path_buf());
    }

    /// Forget every entry.
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of cached terms.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_quotes_the_term() {
        let s = lookup_script("Apple");
        assert!(s.contains("-like '*Apple*'"));
        assert!(s.contains("$_.IsFramework -eq $false"));
        let s = lookup_script("it's");
        assert!(s.contains("-like '*it''s*'"));
    }

    #[test]
    fn cache_keys_are_case_insensitive() {
        let cache = UwpCache::new();
        cache.insert("AppleMusic", Path::new(r"C:\apps\AppleMusic.exe"));
        assert_eq!(
            cache.get("applemusic"),
            Some(PathBuf::from(r"C:\apps\AppleMusic.exe"))
        );
        assert_eq!(cache.len(), 1);
        cache.insert("APPLEMUSIC", Path::new(r"C:\other.exe"));
        assert_eq!(cache.len(), 1);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let lookup = PowerShellLookup::with_program("summon-no-such-shell-9d2e");
        let err = lookup
            .find("x", Duration::from_secs(5))
            .await
            .expect_err("should fail");
        assert!(matches!(err, LookupError::Spawn { .. }));
    }
}
