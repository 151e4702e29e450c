use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Key, Modifier, Modifiers, ParseError};

/// How to treat a hotkey string that names more than one non-modifier key.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum KeyTokens {
    /// Keep the last key token seen ("Ctrl+Q+T" binds Ctrl+T).
    #[default]
    LastWins,
    /// Reject the hotkey with [`ParseError::MultipleKeys`].
    Single,
}

/// A hotkey chord: a non-empty set of modifiers plus a single key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Chord {
    /// Modifier keys held down for this chord.
    pub modifiers: Modifiers,
    /// The non-modifier key for this chord.
    pub key: Key,
}

impl Chord {
    /// Parses a hotkey such as `"Ctrl+Alt+T"` with the default
    /// [`KeyTokens::LastWins`] policy.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        Self::parse_with(s, KeyTokens::default())
    }

    /// Parses a hotkey string.
    ///
    /// - Segments are separated by `+` and trimmed; matching is case-insensitive.
    /// - Modifier keywords (`ctrl`, `control`, `alt`, `shift`, `win`, `windows`)
    ///   may repeat and appear in any order.
    /// - Every other segment is a key token, resolved by [`Key::from_spec`]. An
    ///   unrecognized token fails the whole hotkey.
    /// - At least one modifier and one key are required.
    pub fn parse_with(s: &str, policy: KeyTokens) -> Result<Self, ParseError> {
        let mut modifiers = Modifiers::empty();
        let mut key: Option<(Key, &str)> = None;

        for seg in s.split('+').map(str::trim) {
            if seg.is_empty() {
                return Err(ParseError::EmptySegment { spec: s.to_string() });
            }
            if let Some(m) = Modifier::from_spec(seg) {
                modifiers |= Modifiers::from(m);
                continue;
            }
            let Some(k) = Key::from_spec(seg) else {
                return Err(ParseError::UnknownKey {
                    spec: s.to_string(),
                    token: seg.to_string(),
                });
            };
            if let (KeyTokens::Single, Some((_, first))) = (policy, key) {
                return Err(ParseError::MultipleKeys {
                    spec: s.to_string(),
                    first: first.to_string(),
                    second: seg.to_string(),
                });
            }
            key = Some((k, seg));
        }

        let Some((key, _)) = key else {
            return Err(ParseError::NoKey { spec: s.to_string() });
        };
        if modifiers.is_empty() {
            return Err(ParseError::NoModifier { spec: s.to_string() });
        }
        Ok(Self { modifiers, key })
    }

    /// Returns the canonical string form: modifiers in Ctrl, Alt, Shift, Win
    /// order followed by the key's canonical spec, joined with `+`.
    pub fn to_string_canonical(&self) -> String {
        let mut out: Vec<String> = self
            .modifiers
            .modifiers()
            .map(|m| m.to_spec().to_string())
            .collect();
        out.push(self.key.to_spec());
        out.join("+")
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_canonical())
    }
}

impl TryFrom<String> for Chord {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Chord> for String {
    fn from(c: Chord) -> Self {
        c.to_string_canonical()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parse_basic_chord() {
        let c = Chord::parse("Ctrl+Alt+T").expect("parse");
        assert_eq!(c.modifiers, Modifiers::CONTROL | Modifiers::ALT);
        assert_eq!(c.key, Key::T);
        assert_eq!(c.to_string(), "ctrl+alt+t");
    }

    #[test]
    fn whitespace_and_case() {
        let c = Chord::parse("  shift +  home ").expect("parse");
        assert_eq!(c.modifiers, Modifiers::SHIFT);
        assert_eq!(c.key, Key::Home);
        assert_eq!(Chord::parse("ALT+f9"), Chord::parse("alt+F9"));
    }

    #[test]
    fn modifier_order_is_irrelevant() {
        assert_eq!(Chord::parse("Alt+Ctrl+T"), Chord::parse("Ctrl+Alt+T"));
        assert_eq!(
            Chord::parse("Win+Shift+Ctrl+1"),
            Chord::parse("ctrl+shift+windows+1")
        );
    }

    #[test]
    fn duplicate_modifiers_are_idempotent() {
        assert_eq!(Chord::parse("Ctrl+Control+ctrl+K"), Chord::parse("Ctrl+K"));
    }

    #[test]
    fn missing_modifier() {
        assert!(matches!(
            Chord::parse("F9"),
            Err(ParseError::NoModifier { .. })
        ));
    }

    #[test]
    fn missing_key() {
        assert!(matches!(
            Chord::parse("Ctrl+Alt"),
            Err(ParseError::NoKey { .. })
        ));
        assert!(matches!(
            Chord::parse("Ctrl+"),
            Err(ParseError::EmptySegment { .. })
        ));
        assert!(Chord::parse("").is_err());
    }

    #[test]
    fn unknown_key() {
        let err = Chord::parse("Ctrl+Hyper").expect_err("should fail");
        assert_eq!(
            err,
            ParseError::UnknownKey {
                spec: "Ctrl+Hyper".into(),
                token: "Hyper".into()
            }
        );
        assert!(Chord::parse("Ctrl+Alt+TT").is_err());
    }

    #[test]
    fn last_key_token_wins_by_default() {
        let c = Chord::parse("Ctrl+Q+T").expect("parse");
        assert_eq!(c.key, Key::T);
        assert_eq!(c.modifiers, Modifiers::CONTROL);
    }

    #[test]
    fn single_key_policy_rejects_extra_keys() {
        let err = Chord::parse_with("Ctrl+Q+T", KeyTokens::Single).expect_err("should fail");
        assert_eq!(
            err,
            ParseError::MultipleKeys {
                spec: "Ctrl+Q+T".into(),
                first: "Q".into(),
                second: "T".into()
            }
        );
        assert!(Chord::parse_with("Ctrl+T", KeyTokens::Single).is_ok());
    }

    #[test]
    fn punctuation_keys() {
        let c = Chord::parse("Ctrl+,").expect("parse");
        assert_eq!(c.key, Key::Comma);
        assert_eq!(c.to_string(), "ctrl+,");
        assert_eq!(Chord::parse("Win+backtick"), Chord::parse("Win+`"));
    }

    #[test]
    fn string_conversions_use_canonical_form() {
        let c = Chord::parse("Alt+Shift+PageUp").expect("parse");
        let s = String::from(c);
        assert_eq!(s, "alt+shift+pgup");
        assert_eq!(Chord::try_from(s).expect("reparse"), c);
    }

    fn modifier_words() -> impl Strategy<Value = Vec<&'static str>> {
        prop::sample::subsequence(vec!["Ctrl", "Alt", "Shift", "Win"], 1..=4).prop_shuffle()
    }

    fn key_words() -> impl Strategy<Value = &'static str> {
        prop::sample::select(vec![
            "A", "z", "5", "F1", "f12", "F24", "Space", "esc", "PgDn", "Numpad4", ";", "quote",
        ])
    }

    proptest! {
        #[test]
        fn canonical_form_reparses(mods in modifier_words(), key in key_words()) {
            let mut parts = mods.clone();
            parts.push(key);
            let c = Chord::parse(&parts.join("+")).expect("parse");
            let again = Chord::parse(&c.to_string()).expect("reparse");
            prop_assert_eq!(c, again);
        }

        #[test]
        fn modifier_permutations_agree(mods in modifier_words(), key in key_words()) {
            let mut forward = mods.clone();
            forward.push(key);
            let mut reversed: Vec<&str> = mods.iter().rev().copied().collect();
            reversed.push(key);
            prop_assert_eq!(
                Chord::parse(&forward.join("+")),
                Chord::parse(&reversed.join("+"))
            );
        }
    }
}
