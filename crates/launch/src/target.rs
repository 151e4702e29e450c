use std::{fmt, path::PathBuf};

use crate::ResolveError;

const FIND_UWP: &str = "finduwp:";
const PATH_SEARCH: &str = "path:";
const PROTOCOL: &str = "ms-";

/// A launch expression, classified by scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    /// `finduwp:<term>`: first installed non-framework package whose name contains `term`.
    FindUwp(String),
    /// `path:<name>`: executable searched in the `PATH` directories.
    PathSearch(String),
    /// `ms-*` protocol URI, handed to the shell as-is.
    Protocol(String),
    /// Anything else: a file path that must exist.
    Literal(PathBuf),
}

fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

impl LaunchTarget {
    /// Classify an (already expanded) launch expression without touching the
    /// filesystem. Scheme prefixes are case-insensitive and payloads trimmed.
    pub fn classify(expr: &str) -> Result<Self, ResolveError> {
        let trimmed = expr.trim();
        let empty = || ResolveError::EmptyExpression {
            expr: expr.to_string(),
        };
        if trimmed.is_empty() {
            return Err(empty());
        }
        if let Some(term) = strip_prefix_ci(trimmed, FIND_UWP) {
            let term = term.trim();
            if term.is_empty() {
                return Err(empty());
            }
            return Ok(Self::FindUwp(term.to_string()));
        }
        if let Some(name) = strip_prefix_ci(trimmed, PATH_SEARCH) {
            let name = name.trim();
            if name.is_empty() {
                return Err(empty());
            }
            return Ok(Self::PathSearch(name.to_string()));
        }
        if strip_prefix_ci(trimmed, PROTOCOL).is_some() {
            return Ok(Self::Protocol(trimmed.to_string()));
        }
        Ok(Self::Literal(PathBuf::from(trimmed)))
    }

    /// Short scheme label.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::FindUwp(_) => "finduwp",
            Self::PathSearch(_) => "path",
            Self::Protocol(_) => "protocol",
            Self::Literal(_) => "literal",
        }
    }
}

impl fmt::Display for LaunchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FindUwp(term) => write!(f, "UWP package matching '{term}'"),
            Self::PathSearch(name) => write!(f, "'{name}' on PATH"),
            Self::Protocol(uri) => write!(f, "protocol {uri}"),
            Self::Literal(path) => write!(f, "{}", path.display()),
        }
    }
}
