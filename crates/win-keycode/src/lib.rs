//! win-keycode: Virtual-key codes and hotkey specs for Windows.
//!
//! - `Key`: Enum of the Win32 virtual-key codes a hotkey may use as its base
//!   key. The enum is `repr(u16)` and carries the exact `VK_*` values.
//! - `Modifier` / `Modifiers`: modifier keys and the `MOD_*` bit-set passed to
//!   `RegisterHotKey`.
//! - `Chord`: a parsed hotkey (modifier set plus one key), built from strings
//!   such as `"Ctrl+Alt+T"`.

mod key;
pub use key::Key;

mod spec;

mod modifiers;
pub use modifiers::{Modifier, Modifiers};

mod chord;
pub use chord::{Chord, KeyTokens};

mod error;
pub use error::ParseError;
