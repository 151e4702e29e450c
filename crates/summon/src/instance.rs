//! Single-instance guard backed by a named mutex.

use crate::{Error, Result};

/// Held for the lifetime of the running dispatcher.
pub struct InstanceGuard {
    #[cfg(windows)]
    handle: windows::Win32::Foundation::HANDLE,
}

/// Claim the `summon_SingleInstance` mutex, or fail with
/// [`Error::AlreadyRunning`] when another process holds it.
#[cfg(windows)]
pub fn acquire() -> Result<InstanceGuard> {
    use windows::{
        Win32::{
            Foundation::{CloseHandle, ERROR_ALREADY_EXISTS, GetLastError},
            System::Threading::CreateMutexW,
        },
        core::w,
    };

    let handle = unsafe { CreateMutexW(None, true, w!("summon_SingleInstance")) }
        .map_err(|e| Error::Io(std::io::Error::other(e.message())))?;
    if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
        let _ = unsafe { CloseHandle(handle) };
        return Err(Error::AlreadyRunning);
    }
    Ok(InstanceGuard { handle })
}

#[cfg(not(windows))]
pub fn acquire() -> Result<InstanceGuard> {
    Err(Error::Unsupported("the hotkey dispatcher"))
}

#[cfg(windows)]
impl Drop for InstanceGuard {
    fn drop(&mut self) {
        use windows::Win32::{Foundation::CloseHandle, System::Threading::ReleaseMutex};
        unsafe {
            let _ = ReleaseMutex(self.handle);
            let _ = CloseHandle(self.handle);
        }
    }
}
