use std::{
    collections::{BTreeSet, HashMap},
    sync::Arc,
};

use parking_lot::RwLock;
use tracing::{debug, info, warn};
use win_keycode::{Chord, KeyTokens};

use crate::{HotkeyApi, RELOAD_ID, RegisterError};

/// What a hotkey summons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Hotkey text as configured, kept for messages.
    pub hotkey: String,
    /// Image name of the application's process, `.exe` optional.
    pub process_name: String,
    /// Launch expression used when no window exists.
    pub launch_expr: String,
}

impl From<&config::Shortcut> for Target {
    fn from(s: &config::Shortcut) -> Self {
        Self {
            hotkey: s.hotkey.clone(),
            process_name: s.process_name.clone(),
            launch_expr: s.launch_path.clone(),
        }
    }
}

/// Immutable id → target table. Replaced wholesale on reload.
#[derive(Debug, Default, Clone)]
pub struct Table {
    entries: HashMap<u32, Target>,
}

impl Table {
    /// Target registered under `id`.
    pub fn get(&self, id: u32) -> Option<&Target> {
        self.entries.get(&id)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Target)> {
        let mut ids: Vec<u32> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids.into_iter()
            .filter_map(|id| self.entries.get(&id).map(|t| (id, t)))
    }
}

/// Thread-safe handle to the current [`Table`], shared with dispatchers.
#[derive(Debug, Clone, Default)]
pub struct TableHandle {
    current: Arc<RwLock<Arc<Table>>>,
}

impl TableHandle {
    /// The table as of now. Later reloads do not affect the returned snapshot.
    pub fn snapshot(&self) -> Arc<Table> {
        self.current.read().clone()
    }

    fn replace(&self, table: Table) {
        *self.current.write() = Arc::new(table);
    }
}

/// Outcome of [`Registry::load`].
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Ids bound successfully, in order.
    pub bound: Vec<u32>,
    /// One entry per shortcut that could not be bound.
    pub failures: Vec<RegisterError>,
}

impl LoadReport {
    /// True when every shortcut was bound.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Owns the OS bindings and publishes the id → target table.
///
/// Lives on the thread that owns the hotkey window. Dropping it releases
/// every binding.
pub struct Registry {
    api: Box<dyn HotkeyApi>,
    table: TableHandle,
    bound: BTreeSet<u32>,
    policy: KeyTokens,
}

impl Registry {
    /// Empty registry over `api`, parsing hotkeys with `policy`.
    pub fn new(api: Box<dyn HotkeyApi>, policy: KeyTokens) -> Self {
        Self {
            api,
            table: TableHandle::default(),
            bound: BTreeSet::new(),
            policy,
        }
    }

    /// Change the key-token policy used by later registrations.
    pub fn set_policy(&mut self, policy: KeyTokens) {
        self.policy = policy;
    }

    /// Handle for readers of the table.
    pub fn handle(&self) -> TableHandle {
        self.table.clone()
    }

    /// Current table snapshot.
    pub fn snapshot(&self) -> Arc<Table> {
        self.table.snapshot()
    }

    /// Ids currently bound at the OS level, ascending.
    pub fn bound_ids(&self) -> Vec<u32> {
        self.bound.iter().copied().collect()
    }

    fn bind(&mut self, id: u32, hotkey: &str) -> Result<Chord, RegisterError> {
        let chord = Chord::parse_with(hotkey, self.policy).map_err(|source| {
            RegisterError::Parse {
                id,
                hotkey: hotkey.to_string(),
                source,
            }
        })?;
        self.api
            .bind(id, &chord)
            .map_err(|source| RegisterError::Bind {
                id,
                hotkey: hotkey.to_string(),
                source,
            })?;
        self.bound.insert(id);
        debug!(id, hotkey, chord = %chord, "hotkey_bound");
        Ok(chord)
    }

    /// Parse and bind `target.hotkey` under `id`, then publish the target.
    pub fn register(&mut self, id: u32, target: Target) -> Result<(), RegisterError> {
        if self.bound.contains(&id) {
            self.release(id);
        }
        self.bind(id, &target.hotkey)?;
        let mut table = (*self.table.snapshot()).clone();
        table.entries.insert(id, target);
        self.table.replace(table);
        Ok(())
    }

    /// Bind a hotkey that has no table entry, such as the reload chord.
    /// The binding is still released by [`Registry::unregister_all`].
    pub fn register_control(&mut self, id: u32, hotkey: &str) -> Result<Chord, RegisterError> {
        if self.bound.contains(&id) {
            self.release(id);
        }
        self.bind(id, hotkey)
    }

    /// Replace every binding with `targets`, using each target's position as
    /// its id. Failures are collected per entry; the new table is published
    /// in one step once all entries have been tried, so readers see either
    /// the previous table or the new one.
    pub fn load<I>(&mut self, targets: I) -> LoadReport
    where
        I: IntoIterator<Item = Target>,
    {
        self.release_all();

        let mut table = Table::default();
        let mut report = LoadReport::default();
        for (idx, target) in targets.into_iter().enumerate() {
            let id = match u32::try_from(idx) {
                Ok(id) if id < RELOAD_ID => id,
                _ => {
                    warn!(idx, limit = RELOAD_ID, "too_many_shortcuts");
                    break;
                }
            };
            match self.bind(id, &target.hotkey) {
                Ok(_) => {
                    table.entries.insert(id, target);
                    report.bound.push(id);
                }
                Err(e) => {
                    warn!(id, error = %e, "hotkey_register_failed");
                    report.failures.push(e);
                }
            }
        }
        self.table.replace(table);
        info!(
            bound = report.bound.len(),
            failed = report.failures.len(),
            "registry_loaded"
        );
        report
    }

    fn release(&mut self, id: u32) {
        if let Err(e) = self.api.unbind(id) {
            warn!(id, error = %e, "hotkey_unbind_failed");
        }
        self.bound.remove(&id);
    }

    fn release_all(&mut self) {
        let ids: Vec<u32> = self.bound.iter().copied().collect();
        for id in ids {
            self.release(id);
        }
    }

    /// Release every OS binding and clear the table. Unbind errors are logged.
    pub fn unregister_all(&mut self) {
        self.release_all();
        self.table.replace(Table::default());
        debug!("registry_cleared");
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        if !self.bound.is_empty() {
            self.unregister_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;
    use crate::MockHotkeyApi;

    fn target(hotkey: &str, process: &str) -> Target {
        Target {
            hotkey: hotkey.into(),
            process_name: process.into(),
            launch_expr: format!("path:{process}"),
        }
    }

    #[test]
    fn register_publishes_after_bind() {
        let api = MockHotkeyApi::new();
        let mut reg = Registry::new(Box::new(api.clone()), KeyTokens::LastWins);
        reg.register(4, target("Alt+F9", "Code")).expect("register");
        assert_eq!(api.bound(), vec![4]);
        assert_eq!(reg.bound_ids(), vec![4]);
        assert_eq!(
            reg.snapshot().get(4).map(|t| t.process_name.as_str()),
            Some("Code")
        );
        assert_eq!(api.calls(), vec!["bind 4 alt+f9"]);
    }

    #[test]
    fn parse_failure_never_reaches_the_os() {
        let api = MockHotkeyApi::new();
        let mut reg = Registry::new(Box::new(api.clone()), KeyTokens::LastWins);
        let err = reg.register(0, target("F9", "Code")).expect_err("fails");
        assert!(matches!(err, RegisterError::Parse { id: 0, .. }));
        assert!(api.calls().is_empty());
        assert!(reg.snapshot().is_empty());
    }

    #[test]
    fn strict_policy_rejects_two_keys() {
        let api = MockHotkeyApi::new();
        let mut reg = Registry::new(Box::new(api.clone()), KeyTokens::Single);
        assert!(reg.register(0, target("Ctrl+Q+T", "x")).is_err());
        reg.set_policy(KeyTokens::LastWins);
        reg.register(0, target("Ctrl+Q+T", "x")).expect("register");
        assert_eq!(api.calls(), vec!["bind 0 ctrl+t"]);
    }

    #[test]
    fn reregistering_an_id_releases_it_first() {
        let api = MockHotkeyApi::new();
        let mut reg = Registry::new(Box::new(api.clone()), KeyTokens::LastWins);
        reg.register(1, target("Alt+A", "a")).expect("register");
        reg.register(1, target("Alt+B", "b")).expect("register");
        assert_eq!(api.calls(), vec!["bind 1 alt+a", "unbind 1", "bind 1 alt+b"]);
        assert_eq!(reg.snapshot().len(), 1);
    }

    #[test]
    fn drop_releases_bindings() {
        let api = MockHotkeyApi::new();
        {
            let mut reg = Registry::new(Box::new(api.clone()), KeyTokens::LastWins);
            reg.load(vec![target("Alt+F9", "Code"), target("Alt+F10", "chrome")]);
            reg.register_control(RELOAD_ID, "Ctrl+Alt+R")
                .expect("control");
            assert_eq!(api.bound().len(), 3);
        }
        assert!(api.bound().is_empty());
    }

    /// Records the table size readers observe while each bind happens.
    struct Observer {
        handle: Rc<RefCell<Option<TableHandle>>>,
        seen: Rc<RefCell<Vec<usize>>>,
    }

    impl HotkeyApi for Observer {
        fn bind(&self, _id: u32, _chord: &Chord) -> win_hotkey::Result<()> {
            if let Some(h) = self.handle.borrow().as_ref() {
                self.seen.borrow_mut().push(h.snapshot().len());
            }
            Ok(())
        }

        fn unbind(&self, _id: u32) -> win_hotkey::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn reload_keeps_the_old_table_until_the_swap() {
        let handle = Rc::new(RefCell::new(None));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let api = Observer {
            handle: handle.clone(),
            seen: seen.clone(),
        };
        let mut reg = Registry::new(Box::new(api), KeyTokens::LastWins);
        *handle.borrow_mut() = Some(reg.handle());

        reg.load(vec![target("Alt+1", "a"), target("Alt+2", "b")]);
        reg.load(vec![
            target("Alt+1", "a"),
            target("Alt+2", "b"),
            target("Alt+3", "c"),
        ]);

        assert_eq!(*seen.borrow(), vec![0, 0, 2, 2, 2]);
        assert_eq!(reg.snapshot().len(), 3);
    }

    #[test]
    fn table_iterates_in_id_order() {
        let api = MockHotkeyApi::new();
        let mut reg = Registry::new(Box::new(api), KeyTokens::LastWins);
        reg.load(vec![
            target("Alt+1", "a"),
            target("Alt+2", "b"),
            target("Alt+3", "c"),
        ]);
        let ids: Vec<u32> = reg.snapshot().iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }
}
