//! `%VAR%` environment expansion.
use std::{collections::HashMap, sync::Arc};

/// Where environment variables come from during resolution.
#[derive(Debug, Clone, Default)]
pub enum Vars {
    /// The live process environment.
    #[default]
    Process,
    /// A fixed table; names compare case-insensitively, as on Windows.
    Fixed(Arc<HashMap<String, String>>),
}

impl Vars {
    /// Build a fixed table from name/value pairs.
    pub fn fixed<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Fixed(Arc::new(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<String> {
        match self {
            Self::Process => std::env::var(name).ok(),
            Self::Fixed(map) => map
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(name))
                .map(|(_, v)| v.clone()),
        }
    }
}

/// Expand `%NAME%` references in `s`.
///
/// Unknown names and unpaired `%` are copied through unchanged, and a `%`
/// that closed an unknown name may open the next reference. `$VAR` forms
/// are not expanded.
pub fn expand_env(s: &str, vars: &Vars) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(len) = after.find('%') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..len];
        match (!name.is_empty()).then(|| vars.get(name)).flatten() {
            Some(value) => {
                out.push_str(&value);
                rest = &after[len + 1..];
            }
            None => {
                out.push('%');
                out.push_str(name);
                rest = &after[len..];
            }
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars() -> Vars {
        Vars::fixed([
            ("LOCALAPPDATA", r"C:\Users\me\AppData\Local"),
            ("ProgramFiles", r"C:\Program Files"),
        ])
    }

    #[test]
    fn expands_known_names() {
        assert_eq!(
            expand_env(r"%LOCALAPPDATA%\Programs\app.exe", &vars()),
            r"C:\Users\me\AppData\Local\Programs\app.exe"
        );
        assert_eq!(
            expand_env(r"%programfiles%\x\%PROGRAMFILES%", &vars()),
            r"C:\Program Files\x\C:\Program Files"
        );
    }

    #[test]
    fn unknown_names_are_verbatim() {
        assert_eq!(expand_env("%NOPE%\\a", &vars()), "%NOPE%\\a");
        assert_eq!(expand_env("100%", &vars()), "100%");
        assert_eq!(expand_env("%%", &vars()), "%%");
    }

    #[test]
    fn closing_percent_can_open_next_name() {
        assert_eq!(
            expand_env("%NOPE%ProgramFiles%", &vars()),
            "%NOPEC:\\Program Files"
        );
    }

    #[test]
    fn dollar_forms_untouched() {
        assert_eq!(expand_env("$HOME/${HOME}", &vars()), "$HOME/${HOME}");
        assert_eq!(expand_env("plain", &vars()), "plain");
    }
}
