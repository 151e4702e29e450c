//! Error types for resolution, package lookup and launch.
use std::{io, path::PathBuf, time::Duration};

use thiserror::Error;

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(" ({r})"))
        .unwrap_or_default()
}

/// Why a launch expression could not be turned into a concrete target.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The expression, or the payload after its scheme prefix, is blank.
    #[error("launch expression {expr:?} is empty")]
    EmptyExpression {
        /// The expression as written.
        expr: String,
    },

    /// No installed package matched a `finduwp:` term.
    #[error("could not find UWP app matching: {term}{}", reason_suffix(.reason))]
    PackageNotFound {
        /// The search term.
        term: String,
        /// Lookup fault, when the query itself failed rather than matching nothing.
        reason: Option<String>,
    },

    /// A `path:` name was not found in any `PATH` directory.
    #[error("could not find '{name}' in PATH")]
    NotOnPath {
        /// The executable name searched for, `.exe` appended.
        name: String,
    },

    /// A literal path (or a resolved package executable) does not exist.
    #[error("application not found: {}", .path.display())]
    MissingPath {
        /// The path that was checked.
        path: PathBuf,
    },
}

/// Failure of the external package query.
#[derive(Error, Debug)]
pub enum LookupError {
    /// The query process could not be started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The query exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    Exit {
        /// Program name.
        program: String,
        /// Exit status text.
        status: String,
        /// Trimmed standard error output.
        stderr: String,
    },
    /// The query did not finish in time and was killed.
    #[error("package query timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure to start a resolved target.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// The OS launch mechanism reported an error.
    #[error("failed to launch {target}: {source}")]
    Io {
        /// Path or URI that was launched.
        target: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
