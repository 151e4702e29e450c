use serde::{Deserialize, Serialize};

// Generates the `Key` enum with its VK value table, name lookup and the
// reverse code lookup from a single list.
macro_rules! define_keys {
    ( $( $name:ident = $code:literal, )* ) => {
        /// Win32 virtual-key codes usable as the base key of a hotkey.
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(u16)]
        #[allow(missing_docs)]
        pub enum Key {
            $( $name = $code, )*
        }

        impl Key {
            /// Every key, in declaration order.
            pub const ALL: &'static [Self] = &[ $( Self::$name, )* ];

            /// Returns the virtual-key code.
            pub fn code(self) -> u16 {
                self as u16
            }

            /// Maps a virtual-key code back to a `Key`.
            pub fn from_code(code: u16) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$name), )*
                    _ => None,
                }
            }

            /// Returns the enum variant name.
            pub fn name(self) -> &'static str {
                match self {
                    $( Self::$name => stringify!($name), )*
                }
            }
        }
    };
}

define_keys! {
    Backspace = 0x08,
    Tab = 0x09,
    Return = 0x0D,
    Pause = 0x13,
    CapsLock = 0x14,
    Escape = 0x1B,
    Space = 0x20,
    PageUp = 0x21,
    PageDown = 0x22,
    End = 0x23,
    Home = 0x24,
    Left = 0x25,
    Up = 0x26,
    Right = 0x27,
    Down = 0x28,
    PrintScreen = 0x2C,
    Insert = 0x2D,
    Delete = 0x2E,

    Digit0 = 0x30,
    Digit1 = 0x31,
    Digit2 = 0x32,
    Digit3 = 0x33,
    Digit4 = 0x34,
    Digit5 = 0x35,
    Digit6 = 0x36,
    Digit7 = 0x37,
    Digit8 = 0x38,
    Digit9 = 0x39,

    A = 0x41,
    B = 0x42,
    C = 0x43,
    D = 0x44,
    E = 0x45,
    F = 0x46,
    G = 0x47,
    H = 0x48,
    I = 0x49,
    J = 0x4A,
    K = 0x4B,
    L = 0x4C,
    M = 0x4D,
    N = 0x4E,
    O = 0x4F,
    P = 0x50,
    Q = 0x51,
    R = 0x52,
    S = 0x53,
    T = 0x54,
    U = 0x55,
    V = 0x56,
    W = 0x57,
    X = 0x58,
    Y = 0x59,
    Z = 0x5A,

    Numpad0 = 0x60,
    Numpad1 = 0x61,
    Numpad2 = 0x62,
    Numpad3 = 0x63,
    Numpad4 = 0x64,
    Numpad5 = 0x65,
    Numpad6 = 0x66,
    Numpad7 = 0x67,
    Numpad8 = 0x68,
    Numpad9 = 0x69,
    Multiply = 0x6A,
    Add = 0x6B,
    Subtract = 0x6D,
    Decimal = 0x6E,
    Divide = 0x6F,

    F1 = 0x70,
    F2 = 0x71,
    F3 = 0x72,
    F4 = 0x73,
    F5 = 0x74,
    F6 = 0x75,
    F7 = 0x76,
    F8 = 0x77,
    F9 = 0x78,
    F10 = 0x79,
    F11 = 0x7A,
    F12 = 0x7B,
    F13 = 0x7C,
    F14 = 0x7D,
    F15 = 0x7E,
    F16 = 0x7F,
    F17 = 0x80,
    F18 = 0x81,
    F19 = 0x82,
    F20 = 0x83,
    F21 = 0x84,
    F22 = 0x85,
    F23 = 0x86,
    F24 = 0x87,

    NumLock = 0x90,
    ScrollLock = 0x91,

    Semicolon = 0xBA,
    Equals = 0xBB,
    Comma = 0xBC,
    Minus = 0xBD,
    Period = 0xBE,
    Slash = 0xBF,
    Backtick = 0xC0,
    OpenBracket = 0xDB,
    Backslash = 0xDC,
    CloseBracket = 0xDD,
    Quote = 0xDE,
}

impl Key {
    /// Function key `F<n>` for `n` in `1..=24`.
    pub fn function(n: u32) -> Option<Self> {
        if !(1..=24).contains(&n) {
            return None;
        }
        let code = u16::try_from(n - 1).ok()? + Self::F1.code();
        Self::from_code(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip() {
        for &k in Key::ALL {
            assert_eq!(Key::from_code(k.code()), Some(k), "{}", k.name());
        }
    }

    #[test]
    fn letters_and_digits_are_ascii() {
        assert_eq!(Key::A.code(), u16::from(b'A'));
        assert_eq!(Key::Z.code(), u16::from(b'Z'));
        assert_eq!(Key::Digit0.code(), u16::from(b'0'));
        assert_eq!(Key::Digit9.code(), u16::from(b'9'));
    }

    #[test]
    fn function_keys() {
        assert_eq!(Key::function(1), Some(Key::F1));
        assert_eq!(Key::function(9), Some(Key::F9));
        assert_eq!(Key::function(24), Some(Key::F24));
        assert_eq!(Key::function(0), None);
        assert_eq!(Key::function(25), None);
    }
}
