//! Win32 calls behind `RealWinOps`.

use std::{
    collections::{HashMap, hash_map::Entry},
    ffi::c_void,
};

use tracing::{debug, warn};
use windows::Win32::{
    Foundation::{BOOL, HWND, LPARAM},
    System::Threading::{AttachThreadInput, GetCurrentThreadId},
    UI::WindowsAndMessaging::{
        BringWindowToTop, EnumWindows, GW_OWNER, GetForegroundWindow, GetWindow,
        GetWindowTextLengthW, GetWindowThreadProcessId, IsIconic, IsWindow, IsWindowVisible,
        SW_RESTORE, SW_SHOW, SetForegroundWindow, ShowWindow,
    },
};

use crate::{Error, Result, Reveal, WindowHandle};

fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle.0 as *mut c_void)
}

/// Main window per pid: the first unowned top-level window, preferring a
/// visible one. Hidden windows only count when they carry a title.
pub(crate) fn main_windows() -> HashMap<u32, (WindowHandle, bool)> {
    unsafe extern "system" fn enum_cb(hwnd: HWND, lparam: LPARAM) -> BOOL {
        let found = unsafe { &mut *(lparam.0 as *mut HashMap<u32, (WindowHandle, bool)>) };
        unsafe {
            if !GetWindow(hwnd, GW_OWNER).unwrap_or_default().0.is_null() {
                return BOOL(1);
            }
            let visible = IsWindowVisible(hwnd).as_bool();
            if !visible && GetWindowTextLengthW(hwnd) == 0 {
                return BOOL(1);
            }
            let mut pid = 0u32;
            GetWindowThreadProcessId(hwnd, Some(&raw mut pid));
            if pid == 0 {
                return BOOL(1);
            }
            let cand = (WindowHandle(hwnd.0 as isize), visible);
            match found.entry(pid) {
                Entry::Vacant(e) => {
                    e.insert(cand);
                }
                Entry::Occupied(mut e) => {
                    if visible && !e.get().1 {
                        e.insert(cand);
                    }
                }
            }
        }
        BOOL(1)
    }

    let mut found: HashMap<u32, (WindowHandle, bool)> = HashMap::new();
    unsafe {
        let ptr = &mut found as *mut HashMap<u32, (WindowHandle, bool)>;
        if let Err(e) = EnumWindows(Some(enum_cb), LPARAM(ptr as isize)) {
            warn!(error = %e, "enum_windows_failed");
        }
    }
    found
}

/// Show or restore `handle` as needed and raise it, attaching to the foreground thread's input
/// queue when it belongs to another thread so the foreground lock allows it.
pub(crate) fn force_activate(handle: WindowHandle) -> Result<()> {
    let target = hwnd(handle);
    unsafe {
        if !IsWindow(target).as_bool() {
            return Err(Error::NotFound(handle));
        }
        let visible = IsWindowVisible(target).as_bool();
        let show = match Reveal::for_window(visible, IsIconic(target).as_bool()) {
            Reveal::Nothing => None,
            Reveal::Restore => Some(SW_RESTORE),
            Reveal::Show => Some(SW_SHOW),
        };
        if let Some(cmd) = show {
            let _ = ShowWindow(target, cmd);
            debug!(window = %handle, visible, "window_revealed");
        }

        let ours = GetCurrentThreadId();
        let fg_thread = GetWindowThreadProcessId(GetForegroundWindow(), None);
        if fg_thread != 0 && fg_thread != ours {
            let attached = AttachThreadInput(ours, fg_thread, true).as_bool();
            let res = raise(handle, target);
            if attached {
                let _ = AttachThreadInput(ours, fg_thread, false);
            }
            res
        } else {
            raise(handle, target)
        }
    }
}

unsafe fn raise(handle: WindowHandle, target: HWND) -> Result<()> {
    unsafe {
        BringWindowToTop(target).map_err(|e| Error::Activation {
            handle,
            message: e.message(),
        })?;
        if !SetForegroundWindow(target).as_bool() {
            warn!(window = %handle, "set_foreground_refused");
        }
    }
    debug!(window = %handle, "window_activated");
    Ok(())
}
