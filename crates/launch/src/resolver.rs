use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use tracing::{debug, warn};

use crate::{
    DEFAULT_LOOKUP_TIMEOUT, LaunchTarget, PackageLookup, PowerShellLookup, ResolveError, UwpCache,
    Vars, exe_name, expand_env, find_on_path,
};

/// A concrete launch target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// An existing file.
    Path(PathBuf),
    /// A protocol URI for the shell.
    Uri(String),
}

impl fmt::Display for Resolved {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(p) => write!(f, "{}", p.display()),
            Self::Uri(u) => f.write_str(u),
        }
    }
}

/// Turns launch expressions into [`Resolved`] targets.
///
/// Cheap to clone; clones share the package lookup and the [`UwpCache`].
#[derive(Clone)]
pub struct Resolver {
    lookup: Arc<dyn PackageLookup>,
    cache: Arc<UwpCache>,
    timeout: Duration,
    vars: Vars,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(Arc::new(PowerShellLookup::default()))
    }
}

impl Resolver {
    /// Resolver over `lookup` with an empty cache, the default timeout and
    /// the process environment.
    pub fn new(lookup: Arc<dyn PackageLookup>) -> Self {
        Self {
            lookup,
            cache: Arc::new(UwpCache::new()),
            timeout: DEFAULT_LOOKUP_TIMEOUT,
            vars: Vars::Process,
        }
    }

    /// Bound each package query by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `%VAR%` values and `PATH` from `vars`.
    pub fn with_vars(mut self, vars: Vars) -> Self {
        self.vars = vars;
        self
    }

    /// Share an existing cache.
    pub fn with_cache(mut self, cache: Arc<UwpCache>) -> Self {
        self.cache = cache;
        self
    }

    /// The package lookup cache.
    pub fn cache(&self) -> &Arc<UwpCache> {
        &self.cache
    }

    /// Expand environment references in `expr` and classify the result.
    pub fn classify(&self, expr: &str) -> Result<LaunchTarget, ResolveError> {
        LaunchTarget::classify(&expand_env(expr, &self.vars))
    }

    /// Resolve `expr` to an existing file or a protocol URI.
    pub async fn resolve(&self, expr: &str) -> Result<Resolved, ResolveError> {
        let target = self.classify(expr)?;
        debug!(expr, target = %target, "resolve");
        match target {
            LaunchTarget::FindUwp(term) => {
                let path = self.find_package(&term).await?;
                existing(path)
            }
            LaunchTarget::PathSearch(name) => {
                let file = exe_name(&name);
                let path_var = self.vars.get("PATH").unwrap_or_default();
                find_on_path(&file, &path_var)
                    .map(Resolved::Path)
                    .ok_or(ResolveError::NotOnPath { name: file })
            }
            LaunchTarget::Protocol(uri) => Ok(Resolved::Uri(uri)),
            LaunchTarget::Literal(path) => existing(path),
        }
    }

    async fn find_package(&self, term: &str) -> Result<PathBuf, ResolveError> {
        if let Some(hit) = self.cache.get(term) {
            debug!(term, path = %hit.display(), "package_cache_hit");
            return Ok(hit);
        }
        match self.lookup.find(term, self.timeout).await {
            Ok(Some(path)) => {
                self.cache.insert(term, &path);
                Ok(path)
            }
            Ok(None) => Err(ResolveError::PackageNotFound {
                term: term.to_string(),
                reason: None,
            }),
            Err(e) => {
                warn!(term, error = %e, "package_lookup_failed");
                Err(ResolveError::PackageNotFound {
                    term: term.to_string(),
                    reason: Some(e.to_string()),
                })
            }
        }
    }
}

fn existing(path: PathBuf) -> Result<Resolved, ResolveError> {
    if Path::new(&path).is_file() {
        Ok(Resolved::Path(path))
    } else {
        Err(ResolveError::MissingPath { path })
    }
}
