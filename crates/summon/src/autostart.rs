//! Start-on-login entry under `HKCU\...\CurrentVersion\Run`.

use std::{env, path::PathBuf};

use tracing::info;

use crate::Result;

/// Registry value name.
const VALUE_NAME: &str = "summon";

/// Value stored for `exe`: its quoted path.
pub fn command_for(exe: &std::path::Path) -> String {
    format!("\"{}\"", exe.display())
}

fn current_exe() -> Result<PathBuf> {
    Ok(env::current_exe()?)
}

/// What the Run key currently says about us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// No entry.
    Disabled,
    /// Entry pointing at this executable.
    Enabled,
    /// Entry pointing somewhere else, e.g. an older install.
    Other(String),
}

/// Register the running executable to start on login.
pub fn enable() -> Result<()> {
    let cmd = command_for(&current_exe()?);
    sys::set(VALUE_NAME, &cmd)?;
    info!(command = %cmd, "autostart_enabled");
    Ok(())
}

/// Remove the start-on-login entry. Succeeds when none exists.
pub fn disable() -> Result<()> {
    sys::delete(VALUE_NAME)?;
    info!("autostart_disabled");
    Ok(())
}

/// Inspect the start-on-login entry.
pub fn status() -> Result<Status> {
    let expected = command_for(&current_exe()?);
    Ok(match sys::get(VALUE_NAME)? {
        None => Status::Disabled,
        Some(v) if v.eq_ignore_ascii_case(&expected) => Status::Enabled,
        Some(v) => Status::Other(v),
    })
}

#[cfg(windows)]
mod sys {
    use windows::{
        Win32::{
            Foundation::{ERROR_FILE_NOT_FOUND, WIN32_ERROR},
            System::Registry::{
                HKEY, HKEY_CURRENT_USER, KEY_QUERY_VALUE, KEY_SET_VALUE, REG_SAM_FLAGS, REG_SZ,
                RegCloseKey, RegDeleteValueW, RegOpenKeyExW, RegQueryValueExW, RegSetValueExW,
            },
        },
        core::{HSTRING, w},
    };

    use crate::{Error, Result};

    /// Open handle to the Run key, closed on drop.
    struct RunKey(HKEY);

    impl RunKey {
        fn open(access: REG_SAM_FLAGS) -> Result<Self> {
            let mut key = HKEY::default();
            check(unsafe {
                RegOpenKeyExW(
                    HKEY_CURRENT_USER,
                    w!("Software\\Microsoft\\Windows\\CurrentVersion\\Run"),
                    0,
                    access,
                    &mut key,
                )
            })?;
            Ok(Self(key))
        }
    }

    impl Drop for RunKey {
        fn drop(&mut self) {
            let _ = unsafe { RegCloseKey(self.0) };
        }
    }

    fn check(code: WIN32_ERROR) -> Result<()> {
        code.ok().map_err(|e| Error::Autostart(e.message()))
    }

    pub(super) fn set(name: &str, value: &str) -> Result<()> {
        let key = RunKey::open(KEY_SET_VALUE)?;
        let bytes: Vec<u8> = value
            .encode_utf16()
            .chain(std::iter::once(0))
            .flat_map(u16::to_le_bytes)
            .collect();
        check(unsafe { RegSetValueExW(key.0, &HSTRING::from(name), 0, REG_SZ, Some(&bytes)) })
    }

    pub(super) fn delete(name: &str) -> Result<()> {
        let key = RunKey::open(KEY_SET_VALUE)?;
        match unsafe { RegDeleteValueW(key.0, &HSTRING::from(name)) } {
            ERROR_FILE_NOT_FOUND => Ok(()),
            code => check(code),
        }
    }

    pub(super) fn get(name: &str) -> Result<Option<String>> {
        let key = RunKey::open(KEY_QUERY_VALUE)?;
        let name = HSTRING::from(name);
        let mut size = 0u32;
        match unsafe { RegQueryValueExW(key.0, &name, None, None, None, Some(&raw mut size)) } {
            ERROR_FILE_NOT_FOUND => return Ok(None),
            code => check(code)?,
        }
        let mut buf = vec![0u8; size as usize];
        check(unsafe {
            RegQueryValueExW(
                key.0,
                &name,
                None,
                None,
                Some(buf.as_mut_ptr()),
                Some(&raw mut size),
            )
        })?;
        buf.truncate(size as usize);
        let wide: Vec<u16> = buf
            .chunks_exact(2)
            .map(|c| u16::from_le_bytes([c[0], c[1]]))
            .take_while(|&c| c != 0)
            .collect();
        Ok(Some(String::from_utf16_lossy(&wide)))
    }
}

#[cfg(not(windows))]
mod sys {
    use crate::{Error, Result};

    pub(super) fn set(_name: &str, _value: &str) -> Result<()> {
        Err(Error::Unsupported("autostart"))
    }

    pub(super) fn delete(_name: &str) -> Result<()> {
        Err(Error::Unsupported("autostart"))
    }

    pub(super) fn get(_name: &str) -> Result<Option<String>> {
        Err(Error::Unsupported("autostart"))
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[test]
    fn command_is_quoted() {
        assert_eq!(
            command_for(Path::new(r"C:\Program Files\summon\summon.exe")),
            r#""C:\Program Files\summon\summon.exe""#
        );
    }
}
