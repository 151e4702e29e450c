use std::{
    collections::{BTreeSet, HashSet},
    rc::Rc,
    sync::Arc,
};

use parking_lot::Mutex;
use win_keycode::Chord;

// ---- Hotkey API abstraction ----

/// Minimal hotkey API used by the [`Registry`](crate::Registry).
///
/// Implementations need not be `Send`: Win32 binds hotkeys to the thread
/// that owns the sink window, so the registry stays on that thread.
pub trait HotkeyApi {
    /// Bind `chord` under `id`.
    fn bind(&self, id: u32, chord: &Chord) -> win_hotkey::Result<()>;
    /// Release `id`.
    fn unbind(&self, id: u32) -> win_hotkey::Result<()>;
}

/// [`HotkeyApi`] over a real [`win_hotkey::Manager`].
pub struct RealHotkeyApi {
    inner: Rc<win_hotkey::Manager>,
}

impl RealHotkeyApi {
    /// Wrap a manager shared with the message pump.
    pub fn new(inner: Rc<win_hotkey::Manager>) -> Self {
        Self { inner }
    }
}

impl HotkeyApi for RealHotkeyApi {
    fn bind(&self, id: u32, chord: &Chord) -> win_hotkey::Result<()> {
        self.inner.bind(id, chord)
    }
    fn unbind(&self, id: u32) -> win_hotkey::Result<()> {
        self.inner.unbind(id)
    }
}

/// Mock hotkey API for tests: tracks bound ids and can refuse chosen ids.
#[derive(Clone, Default)]
pub struct MockHotkeyApi {
    bound: Arc<Mutex<BTreeSet<u32>>>,
    calls: Arc<Mutex<Vec<String>>>,
    refuse: Arc<Mutex<HashSet<u32>>>,
}

impl MockHotkeyApi {
    /// Mock that accepts every binding.
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse future binds of `id`, as if another application owned the chord.
    pub fn refuse(&self, id: u32) {
        self.refuse.lock().insert(id);
    }

    /// Ids currently bound.
    pub fn bound(&self) -> Vec<u32> {
        self.bound.lock().iter().copied().collect()
    }

    /// Call log, e.g. `bind 0 alt+f9`, `unbind 0`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl HotkeyApi for MockHotkeyApi {
    fn bind(&self, id: u32, chord: &Chord) -> win_hotkey::Result<()> {
        self.calls.lock().push(format!("bind {id} {chord}"));
        if self.refuse.lock().contains(&id) {
            return Err(win_hotkey::Error::Bind {
                id,
                chord: chord.to_string(),
                message: "Hot key is already registered.".into(),
            });
        }
        self.bound.lock().insert(id);
        Ok(())
    }

    fn unbind(&self, id: u32) -> win_hotkey::Result<()> {
        self.calls.lock().push(format!("unbind {id}"));
        if self.bound.lock().remove(&id) {
            Ok(())
        } else {
            Err(win_hotkey::Error::Unbind {
                id,
                message: "Hot key is not registered.".into(),
            })
        }
    }
}
