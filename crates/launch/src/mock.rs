//! In-memory collaborators for tests.
use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::{LaunchError, Launcher, LookupError, PackageLookup, Resolved};

/// A [`PackageLookup`] answering from a fixed table and counting queries.
#[derive(Clone, Default)]
pub struct StaticLookup {
    table: Arc<Mutex<HashMap<String, PathBuf>>>,
    queries: Arc<AtomicUsize>,
    fail: Arc<AtomicBool>,
}

impl StaticLookup {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` for any term contained in `package` (case-insensitive).
    pub fn with_package(self, package: &str, path: impl Into<PathBuf>) -> Self {
        self.add_package(package, path);
        self
    }

    /// Like [`StaticLookup::with_package`], through a shared handle.
    pub fn add_package(&self, package: &str, path: impl Into<PathBuf>) {
        self.table.lock().insert(package.to_lowercase(), path.into());
    }

    /// Make every query fail with a timeout.
    pub fn set_fail(&self, v: bool) {
        self.fail.store(v, Ordering::SeqCst);
    }

    /// Number of queries served.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PackageLookup for StaticLookup {
    async fn find(&self, term: &str, limit: Duration) -> Result<Option<PathBuf>, LookupError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(LookupError::Timeout(limit));
        }
        let term = term.to_lowercase();
        let table = self.table.lock();
        let mut names: Vec<&String> = table.keys().filter(|k| k.contains(&term)).collect();
        names.sort();
        Ok(names.first().and_then(|k| table.get(*k)).cloned())
    }
}

/// A [`Launcher`] that records targets instead of starting them.
#[derive(Clone, Default)]
pub struct RecordingLauncher {
    launched: Arc<Mutex<Vec<Resolved>>>,
    fail: Arc<AtomicBool>,
}

impl RecordingLauncher {
    /// Launcher that succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every launch fail.
    pub fn set_fail(&self, v: bool) {
        self.fail.store(v, Ordering::SeqCst);
    }

    /// Targets launched so far.
    pub fn launched(&self) -> Vec<Resolved> {
        self.launched.lock().clone()
    }
}

impl Launcher for RecordingLauncher {
    fn launch(&self, target: &Resolved) -> Result<(), LaunchError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LaunchError::Io {
                target: target.to_string(),
                source: std::io::Error::other("mock launch failure"),
            });
        }
        self.launched.lock().push(target.clone());
        Ok(())
    }
}
