use bitflags::bitflags;

/// Modifier keys accepted in a hotkey.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Modifier {
    /// Alt (`MOD_ALT`).
    Alt,
    /// Ctrl (`MOD_CONTROL`).
    Control,
    /// Shift (`MOD_SHIFT`).
    Shift,
    /// The Windows/meta key (`MOD_WIN`).
    Win,
}

bitflags! {
    /// A set of modifiers, using the Win32 `MOD_*` bit values so the raw
    /// bits can be handed straight to `RegisterHotKey`.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Modifiers: u32 {
        /// `MOD_ALT`
        const ALT = 0x0001;
        /// `MOD_CONTROL`
        const CONTROL = 0x0002;
        /// `MOD_SHIFT`
        const SHIFT = 0x0004;
        /// `MOD_WIN`
        const WIN = 0x0008;
    }
}

impl From<Modifier> for Modifiers {
    fn from(m: Modifier) -> Self {
        match m {
            Modifier::Alt => Self::ALT,
            Modifier::Control => Self::CONTROL,
            Modifier::Shift => Self::SHIFT,
            Modifier::Win => Self::WIN,
        }
    }
}

impl Modifier {
    /// Canonical order used when rendering a chord: Ctrl, Alt, Shift, Win.
    pub const ORDER: [Self; 4] = [Self::Control, Self::Alt, Self::Shift, Self::Win];

    /// Parses a modifier keyword, case-insensitively.
    ///
    /// Accepts `ctrl`/`control`, `alt`, `shift` and `win`/`windows`.
    pub fn from_spec(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => Some(Self::Control),
            "alt" => Some(Self::Alt),
            "shift" => Some(Self::Shift),
            "win" | "windows" => Some(Self::Win),
            _ => None,
        }
    }

    /// Returns the canonical lower-case keyword for this modifier.
    pub fn to_spec(self) -> &'static str {
        match self {
            Self::Control => "ctrl",
            Self::Alt => "alt",
            Self::Shift => "shift",
            Self::Win => "win",
        }
    }
}

impl Modifiers {
    /// Iterates the contained modifiers in canonical order.
    pub fn modifiers(self) -> impl Iterator<Item = Modifier> {
        Modifier::ORDER
            .into_iter()
            .filter(move |m| self.contains(Self::from(*m)))
    }
}
