use thiserror::Error;

/// Reasons a hotkey string fails to parse.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A `+`-separated segment was empty (e.g. a trailing `+`).
    #[error("empty key segment in '{spec}'")]
    EmptySegment {
        /// The full hotkey text.
        spec: String,
    },
    /// The hotkey names a key but no Ctrl/Alt/Shift/Win modifier.
    #[error("hotkey '{spec}' has no modifier (use Ctrl, Alt, Shift or Win)")]
    NoModifier {
        /// The full hotkey text.
        spec: String,
    },
    /// The hotkey lists only modifiers.
    #[error("hotkey '{spec}' has no key")]
    NoKey {
        /// The full hotkey text.
        spec: String,
    },
    /// A segment is neither a modifier nor a recognized key.
    #[error("unknown key '{token}' in hotkey '{spec}'")]
    UnknownKey {
        /// The full hotkey text.
        spec: String,
        /// The offending segment, as written.
        token: String,
    },
    /// More than one non-modifier segment under [`crate::KeyTokens::Single`].
    #[error("hotkey '{spec}' names more than one key ('{first}' and '{second}')")]
    MultipleKeys {
        /// The full hotkey text.
        spec: String,
        /// First key segment seen.
        first: String,
        /// Second key segment seen.
        second: String,
    },
}
