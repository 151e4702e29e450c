//! Windows-only global hotkey manager.
//!
//! A [`Manager`] owns a message-only window on the thread that creates it.
//! Hotkeys are bound to that window with `RegisterHotKey`, always with
//! `MOD_NOREPEAT` so holding a chord down fires once. [`Manager::run`] pumps
//! the thread's message queue and hands each `WM_HOTKEY` id to a callback
//! until [`QuitHandle::quit`] is called from any thread.
//!
//! Win32 ties hotkeys to the window's thread, so `bind`, `unbind` and `run`
//! must all happen on the thread that called [`Manager::new`]. The type is
//! deliberately not `Send`.
mod error;
mod sys;

use tracing::{debug, trace};
use win_keycode::Chord;

pub use error::{Error, Result};

/// `MOD_NOREPEAT`: suppress auto-repeat `WM_HOTKEY` while a chord is held.
pub const MOD_NOREPEAT: u32 = 0x4000;

/// Modifier bits passed to the OS for a chord, including [`MOD_NOREPEAT`].
pub fn bind_modifiers(chord: &Chord) -> u32 {
    chord.modifiers.bits() | MOD_NOREPEAT
}

/// Owner of the hotkey sink window and its bindings.
pub struct Manager {
    sink: sys::Sink,
}

impl Manager {
    /// Create the message-only window on the current thread.
    pub fn new() -> Result<Self> {
        let sink = sys::Sink::new()?;
        debug!("hotkey_sink_created");
        Ok(Self { sink })
    }

    /// Bind `chord` under registration `id`.
    pub fn bind(&self, id: u32, chord: &Chord) -> Result<()> {
        let mods = bind_modifiers(chord);
        let vk = u32::from(chord.key.code());
        trace!(id, mods, vk, "register_hotkey");
        self.sink.bind(id, mods, vk).map_err(|message| Error::Bind {
            id,
            chord: chord.to_string(),
            message,
        })
    }

    /// Release the binding for `id`.
    pub fn unbind(&self, id: u32) -> Result<()> {
        trace!(id, "unregister_hotkey");
        self.sink
            .unbind(id)
            .map_err(|message| Error::Unbind { id, message })
    }

    /// Pump messages until a quit is requested, calling `on_hotkey` with the
    /// registration id of every hotkey press.
    pub fn run<F: FnMut(u32)>(&self, on_hotkey: F) -> Result<()> {
        debug!("hotkey_pump_start");
        let res = self.sink.run(on_hotkey);
        debug!("hotkey_pump_exit");
        res
    }

    /// A thread-safe handle that stops [`Manager::run`].
    pub fn quit_handle(&self) -> QuitHandle {
        QuitHandle {
            inner: self.sink.quit_handle(),
        }
    }
}

/// Stops a running hotkey pump from another thread.
#[derive(Clone, Debug)]
pub struct QuitHandle {
    inner: sys::QuitHandle,
}

impl QuitHandle {
    /// Ask the pump to return. Safe to call more than once.
    pub fn quit(&self) -> Result<()> {
        self.inner.quit()
    }
}

#[cfg(test)]
mod tests {
    use win_keycode::Modifiers;

    use super::*;

    #[test]
    fn norepeat_is_always_set() {
        let c = Chord::parse("Ctrl+Alt+T").expect("parse");
        let mods = bind_modifiers(&c);
        assert_eq!(mods & MOD_NOREPEAT, MOD_NOREPEAT);
        assert_eq!(mods & !MOD_NOREPEAT, (Modifiers::CONTROL | Modifiers::ALT).bits());
    }

    #[test]
    fn error_messages_name_the_chord() {
        let e = Error::Bind {
            id: 3,
            chord: "alt+f9".into(),
            message: "Hot key is already registered.".into(),
        };
        let text = e.to_string();
        assert!(text.contains("alt+f9"));
        assert!(text.contains("id 3"));
    }
}
