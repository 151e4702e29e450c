//! Error types for configuration loading and validation.

use std::{
    cmp::{max, min},
    fmt::Write as _,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// Mistakes that commonly break a hand-edited JSON config.
const JSON_HINTS: &[&str] = &[
    "Missing comma between entries",
    "Unclosed brackets or quotes",
    "Extra comma after last entry",
    "Single backslash in a path (use \\\\ instead)",
];

#[derive(Debug, Error, Clone)]
/// Errors produced while loading, parsing, or validating a configuration.
pub enum Error {
    #[error("{message}")]
    /// I/O or filesystem read error.
    Read {
        /// Optional path associated with the read error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
    #[error("could not write {}: {message}", .path.display())]
    /// Writing the default configuration failed.
    Write {
        /// Destination path.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
    },
    #[error("created default config at {}", .path.display())]
    /// No configuration existed; a default one was written and should be edited.
    CreatedDefault {
        /// Where the default was written.
        path: PathBuf,
    },
    #[error("{message}")]
    /// JSON syntax or shape error with a concrete line/column location and excerpt.
    Parse {
        /// Optional path associated with the parse error.
        path: Option<PathBuf>,
        /// 1-based line number.
        line: usize,
        /// 1-based column number.
        col: usize,
        /// Human-readable error message.
        message: String,
        /// Rendered excerpt including a caret at the error location.
        excerpt: String,
    },
    #[error("{message}")]
    /// The JSON is well-formed but not a usable configuration.
    Validation {
        /// Optional path associated with the validation error.
        path: Option<PathBuf>,
        /// Human-readable error message.
        message: String,
    },
}

impl Error {
    /// Render a human-friendly error message including location and an excerpt when available.
    pub fn pretty(&self) -> String {
        match self {
            Self::Read { path, message } => match path {
                Some(p) => format!("Read error at {}: {}", p.display(), message),
                None => format!("Read error: {}", message),
            },
            Self::Write { path, message } => {
                format!("Could not write {}: {}", path.display(), message)
            }
            Self::CreatedDefault { path } => format!(
                "Created default config at:\n{}\n\nPlease edit it and restart.",
                path.display()
            ),
            Self::Parse {
                path,
                line,
                col,
                message,
                excerpt,
            } => {
                let mut out = match path {
                    Some(p) => format!(
                        "Invalid JSON in config file at {}:{}:{}\n{}\n{}",
                        p.display(),
                        line,
                        col,
                        message,
                        excerpt
                    ),
                    None => format!(
                        "Invalid JSON in config at line {}, column {}\n{}\n{}",
                        line, col, message, excerpt
                    ),
                };
                out.push_str("\nCommon issues:\n");
                for hint in JSON_HINTS {
                    let _ignored = writeln!(out, "  - {hint}");
                }
                out
            }
            Self::Validation { path, message } => match path {
                Some(p) => format!("Config validation error at {}\n{}", p.display(), message),
                None => format!("Config validation error\n{}", message),
            },
        }
    }

    /// Access the optional path attached to this error.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Read { path, .. } | Self::Parse { path, .. } | Self::Validation { path, .. } => {
                path.as_deref()
            }
            Self::Write { path, .. } | Self::CreatedDefault { path } => Some(path),
        }
    }
}

/// Build a small 2–3 line excerpt with a caret at `(line_no, col_no)`.
pub fn excerpt_at(source: &str, line_no: usize, col_no: usize) -> String {
    let lines: Vec<&str> = source.lines().collect();
    let total = lines.len();
    let start = max(1usize, line_no.saturating_sub(2));
    let end = min(total, line_no + 1);

    let mut out = String::new();
    for n in start..=end {
        let text = lines.get(n - 1).copied().unwrap_or("");
        let _ignored = writeln!(out, " {:>4} | {}", n, text);
        if n == line_no {
            let prefix = format!(" {:>4} | ", n);
            let _ignored = writeln!(
                out,
                "{}{}^",
                " ".repeat(prefix.len()),
                " ".repeat(col_no.saturating_sub(1))
            );
        }
    }
    out
}
