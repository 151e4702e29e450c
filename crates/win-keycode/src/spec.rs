use crate::Key;

// Canonical spec string for every named (non letter/digit/function) key.
// Used in both directions: parsing accepts these, `to_spec` emits them.
// Strings are upper case because tokens are upper-cased before matching.
macro_rules! key_spec_map {
    ($m:ident, $arg:tt) => {
        $m! { $arg,
            Space => "SPACE",
            Return => "ENTER",
            Tab => "TAB",
            Escape => "ESC",
            Backspace => "BACKSPACE",
            Delete => "DEL",
            Insert => "INS",
            Home => "HOME",
            End => "END",
            PageUp => "PGUP",
            PageDown => "PGDN",
            Up => "UP",
            Down => "DOWN",
            Left => "LEFT",
            Right => "RIGHT",
            PrintScreen => "PRTSC",
            ScrollLock => "SCROLLLOCK",
            Pause => "PAUSE",
            NumLock => "NUMLOCK",
            CapsLock => "CAPSLOCK",

            Numpad0 => "NUMPAD0",
            Numpad1 => "NUMPAD1",
            Numpad2 => "NUMPAD2",
            Numpad3 => "NUMPAD3",
            Numpad4 => "NUMPAD4",
            Numpad5 => "NUMPAD5",
            Numpad6 => "NUMPAD6",
            Numpad7 => "NUMPAD7",
            Numpad8 => "NUMPAD8",
            Numpad9 => "NUMPAD9",
            Multiply => "MULTIPLY",
            Add => "ADD",
            Subtract => "SUBTRACT",
            Decimal => "DECIMAL",
            Divide => "DIVIDE",

            Semicolon => ";",
            Equals => "=",
            Comma => ",",
            Minus => "-",
            Period => ".",
            Slash => "/",
            Backtick => "`",
            OpenBracket => "[",
            Backslash => "\\",
            CloseBracket => "]",
            Quote => "'",
        }
    };
}

// Aliases that only apply to parsing specs (not emitted by to_spec).
macro_rules! key_spec_aliases {
    ($m:ident, $arg:expr) => {
        $m! { $arg,
            Return => "RETURN",
            Escape => "ESCAPE",
            Delete => "DELETE",
            Insert => "INSERT",
            PageUp => "PAGEUP",
            PageDown => "PAGEDOWN",
            PrintScreen => "PRINTSCREEN",

            // spelled-out punctuation
            Semicolon => "SEMICOLON",
            Equals => "EQUALS",
            Comma => "COMMA",
            Minus => "MINUS",
            Period => "PERIOD",
            Slash => "SLASH",
            Backtick => "BACKTICK",
            Backtick => "TILDE",
            OpenBracket => "OPENBRACKET",
            Backslash => "BACKSLASH",
            CloseBracket => "CLOSEBRACKET",
            Quote => "QUOTE",
        }
    };
}

macro_rules! to_spec_match {
    ( $key:expr, $( $k:ident => $s:expr, )* ) => {
        match $key {
            $( Key::$k => $s, )*
            _ => $key.name(),
        }
    }
}

macro_rules! from_spec_match {
    ( $s:expr, $( $k:ident => $v:expr, )* ) => {{
        match $s {
            $( $v => Some(Key::$k), )*
            _ => None,
        }
    }}
}

/// Parses a single key token into a `Key`.
///
/// Resolution order, on the upper-cased token:
/// 1. a single ASCII letter or digit maps to its character code;
/// 2. `F<n>` with `n` in `1..=24` maps to the function key;
/// 3. the named-key table (canonical names, then aliases).
pub fn from_spec(s: &str) -> Option<Key> {
    let upper = s.to_ascii_uppercase();
    if let [c] = upper.as_bytes()
        && c.is_ascii_alphanumeric()
    {
        return Key::from_code(u16::from(*c));
    }
    if let Some(n) = upper.strip_prefix('F').and_then(|d| d.parse::<u32>().ok()) {
        // Out-of-range numbers (F0, F25) fall through to the table and fail there.
        if let Some(k) = Key::function(n) {
            return Some(k);
        }
    }
    let token = upper.as_str();
    if let some @ Some(_) = key_spec_map!(from_spec_match, token) {
        return some;
    }
    key_spec_aliases!(from_spec_match, token)
}

/// Returns the canonical spec string for a `Key`, always lower case.
pub fn to_spec(key: Key) -> String {
    let code = key.code();
    // Numpad and function codes overlap lower-case ASCII, so only A-Z and 0-9 qualify.
    if let Ok(b) = u8::try_from(code)
        && (b.is_ascii_uppercase() || b.is_ascii_digit())
    {
        return char::from(b).to_ascii_lowercase().to_string();
    }
    if (Key::F1.code()..=Key::F24.code()).contains(&code) {
        return format!("f{}", code - Key::F1.code() + 1);
    }
    key_spec_map!(to_spec_match, key).to_ascii_lowercase()
}

impl Key {
    /// Parses a key token (see [`from_spec`] for the accepted forms).
    pub fn from_spec(s: &str) -> Option<Self> {
        from_spec(s)
    }

    /// Returns the canonical key token for this `Key`.
    pub fn to_spec(self) -> String {
        to_spec(self)
    }
}
