//! Launch expressions for summon.
//!
//! A launch expression is what a shortcut runs when its application has no
//! window yet. After `%VAR%` expansion it takes one of four forms:
//!
//! - `finduwp:<term>`: the entry executable of the first installed,
//!   non-framework package whose name contains `term`;
//! - `path:<name>`: `name` (with `.exe` added) searched in `PATH`;
//! - `ms-...`: a protocol URI handed to the shell unchanged;
//! - anything else: a literal file path, which must exist.
//!
//! [`Resolver`] turns an expression into a [`Resolved`] target and a
//! [`Launcher`] starts it.

mod error;
mod expand;
mod launcher;
pub mod mock;
mod path_search;
mod resolver;
mod target;
mod uwp;

pub use error::{LaunchError, LookupError, ResolveError};
pub use expand::{Vars, expand_env};
pub use launcher::{Launcher, OpenLauncher};
pub use path_search::{exe_name, find_on_path};
pub use resolver::{Resolved, Resolver};
pub use target::LaunchTarget;
pub use uwp::{DEFAULT_LOOKUP_TIMEOUT, PackageLookup, PowerShellLookup, UwpCache, lookup_script};
