//! Win32 plumbing for the hotkey sink window.
//!
//! The sink is a message-only window (`HWND_MESSAGE` parent): it never shows
//! up on screen or in the taskbar and exists only so `RegisterHotKey` has a
//! target. `WM_HOTKEY` is posted to the window's thread queue, so the pump
//! picks it out of `GetMessageW` directly instead of routing it through the
//! window procedure.

#[cfg(windows)]
pub(crate) use imp::{QuitHandle, Sink};
#[cfg(not(windows))]
pub(crate) use unsupported::{QuitHandle, Sink};

#[cfg(windows)]
mod imp {
    use std::ptr;

    use tracing::{trace, warn};
    use windows::{
        Win32::{
            Foundation::{HWND, LPARAM, LRESULT, WPARAM},
            System::{LibraryLoader::GetModuleHandleW, Threading::GetCurrentThreadId},
            UI::{
                Input::KeyboardAndMouse::{HOT_KEY_MODIFIERS, RegisterHotKey, UnregisterHotKey},
                WindowsAndMessaging::{
                    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, GetMessageW,
                    HMENU, HWND_MESSAGE, MSG, PostThreadMessageW, RegisterClassW,
                    TranslateMessage, WINDOW_EX_STYLE, WINDOW_STYLE, WM_HOTKEY, WM_QUIT, WNDCLASSW,
                },
            },
        },
        core::{PCWSTR, w},
    };

    use crate::{Error, Result};

    const CLASS_NAME: PCWSTR = w!("SummonHotkeySink");

    unsafe extern "system" fn wndproc(
        hwnd: HWND,
        msg: u32,
        wparam: WPARAM,
        lparam: LPARAM,
    ) -> LRESULT {
        unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
    }

    pub(crate) struct Sink {
        hwnd: HWND,
        thread_id: u32,
    }

    impl Sink {
        pub(crate) fn new() -> Result<Self> {
            unsafe {
                let hinstance = GetModuleHandleW(None).map_err(|e| Error::Os(e.to_string()))?;
                let wc = WNDCLASSW {
                    lpfnWndProc: Some(wndproc),
                    hInstance: hinstance.into(),
                    lpszClassName: CLASS_NAME,
                    ..Default::default()
                };
                // Fails with "class already exists" after a previous Sink; harmless.
                let _ = RegisterClassW(&wc);
                let hwnd = CreateWindowExW(
                    WINDOW_EX_STYLE::default(),
                    CLASS_NAME,
                    PCWSTR::null(),
                    WINDOW_STYLE::default(),
                    0,
                    0,
                    0,
                    0,
                    HWND_MESSAGE,
                    HMENU::default(),
                    hinstance,
                    None,
                )
                .map_err(|e| Error::Os(format!("CreateWindowExW: {e}")))?;
                Ok(Self {
                    hwnd,
                    thread_id: GetCurrentThreadId(),
                })
            }
        }

        pub(crate) fn bind(&self, id: u32, mods: u32, vk: u32) -> std::result::Result<(), String> {
            let id = i32::try_from(id).map_err(|_| format!("id {id} out of range"))?;
            unsafe { RegisterHotKey(self.hwnd, id, HOT_KEY_MODIFIERS(mods), vk) }
                .map_err(|e| e.message())
        }

        pub(crate) fn unbind(&self, id: u32) -> std::result::Result<(), String> {
            let id = i32::try_from(id).map_err(|_| format!("id {id} out of range"))?;
            unsafe { UnregisterHotKey(self.hwnd, id) }.map_err(|e| e.message())
        }

        pub(crate) fn run<F: FnMut(u32)>(&self, mut on_hotkey: F) -> Result<()> {
            let mut msg = MSG::default();
            loop {
                let r = unsafe { GetMessageW(&mut msg, HWND(ptr::null_mut()), 0, 0) };
                match r.0 {
                    0 => return Ok(()),
                    -1 => {
                        return Err(Error::Os(format!(
                            "GetMessageW: {}",
                            windows::core::Error::from_win32().message()
                        )));
                    }
                    _ => {}
                }
                if msg.message == WM_HOTKEY {
                    // wParam carries the registration id.
                    let Ok(id) = u32::try_from(msg.wParam.0) else {
                        warn!(wparam = msg.wParam.0, "hotkey_id_out_of_range");
                        continue;
                    };
                    trace!(id, "wm_hotkey");
                    on_hotkey(id);
                    continue;
                }
                unsafe {
                    let _ = TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
            }
        }

        pub(crate) fn quit_handle(&self) -> QuitHandle {
            QuitHandle {
                thread_id: self.thread_id,
            }
        }
    }

    impl Drop for Sink {
        fn drop(&mut self) {
            if let Err(e) = unsafe { DestroyWindow(self.hwnd) } {
                warn!(error = %e, "destroy_sink_window_failed");
            }
        }
    }

    #[derive(Clone, Debug)]
    pub(crate) struct QuitHandle {
        thread_id: u32,
    }

    impl QuitHandle {
        pub(crate) fn quit(&self) -> Result<()> {
            unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) }
                .map_err(|e| Error::Os(format!("PostThreadMessageW: {e}")))
        }
    }
}

#[cfg(not(windows))]
mod unsupported {
    use crate::{Error, Result};

    pub(crate) struct Sink;

    impl Sink {
        pub(crate) fn new() -> Result<Self> {
            Err(Error::Unsupported)
        }

        pub(crate) fn bind(&self, _id: u32, _mods: u32, _vk: u32) -> std::result::Result<(), String> {
            Err(Error::Unsupported.to_string())
        }

        pub(crate) fn unbind(&self, _id: u32) -> std::result::Result<(), String> {
            Err(Error::Unsupported.to_string())
        }

        pub(crate) fn run<F: FnMut(u32)>(&self, _on_hotkey: F) -> Result<()> {
            Err(Error::Unsupported)
        }

        pub(crate) fn quit_handle(&self) -> QuitHandle {
            QuitHandle
        }
    }

    #[derive(Clone, Debug)]
    pub(crate) struct QuitHandle;

    impl QuitHandle {
        pub(crate) fn quit(&self) -> Result<()> {
            Err(Error::Unsupported)
        }
    }
}
