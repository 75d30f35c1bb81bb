use std::fmt;
use std::str::FromStr;

/// Keyboard key identifier.
///
/// The runtime maps physical key codes into these variants where possible.
/// Keys without a variant arrive as `Key::Unknown` carrying the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    Shift,
    Control,
    Alt,
    Meta,

    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    /// Platform-dependent key not yet represented here.
    Unknown(u32),
}

/// Canonical names, used for configuration files and display.
const NAMES: &[(Key, &str)] = &[
    (Key::Escape, "Escape"),
    (Key::Enter, "Enter"),
    (Key::Tab, "Tab"),
    (Key::Backspace, "Backspace"),
    (Key::Space, "Space"),
    (Key::ArrowUp, "Up"),
    (Key::ArrowDown, "Down"),
    (Key::ArrowLeft, "Left"),
    (Key::ArrowRight, "Right"),
    (Key::Shift, "Shift"),
    (Key::Control, "Control"),
    (Key::Alt, "Alt"),
    (Key::Meta, "Meta"),
    (Key::A, "A"), (Key::B, "B"), (Key::C, "C"), (Key::D, "D"), (Key::E, "E"),
    (Key::F, "F"), (Key::G, "G"), (Key::H, "H"), (Key::I, "I"), (Key::J, "J"),
    (Key::K, "K"), (Key::L, "L"), (Key::M, "M"), (Key::N, "N"), (Key::O, "O"),
    (Key::P, "P"), (Key::Q, "Q"), (Key::R, "R"), (Key::S, "S"), (Key::T, "T"),
    (Key::U, "U"), (Key::V, "V"), (Key::W, "W"), (Key::X, "X"), (Key::Y, "Y"),
    (Key::Z, "Z"),
    (Key::Digit0, "0"), (Key::Digit1, "1"), (Key::Digit2, "2"), (Key::Digit3, "3"),
    (Key::Digit4, "4"), (Key::Digit5, "5"), (Key::Digit6, "6"), (Key::Digit7, "7"),
    (Key::Digit8, "8"), (Key::Digit9, "9"),
    (Key::F1, "F1"), (Key::F2, "F2"), (Key::F3, "F3"), (Key::F4, "F4"),
    (Key::F5, "F5"), (Key::F6, "F6"), (Key::F7, "F7"), (Key::F8, "F8"),
    (Key::F9, "F9"), (Key::F10, "F10"), (Key::F11, "F11"), (Key::F12, "F12"),
];

/// Accepted alternative spellings.
const ALIASES: &[(Key, &str)] = &[
    (Key::ArrowUp, "ArrowUp"),
    (Key::ArrowDown, "ArrowDown"),
    (Key::ArrowLeft, "ArrowLeft"),
    (Key::ArrowRight, "ArrowRight"),
    (Key::Escape, "Esc"),
    (Key::Enter, "Return"),
    (Key::Control, "Ctrl"),
    (Key::Meta, "Super"),
];

impl Key {
    /// Canonical configuration name, or `None` for `Key::Unknown`.
    pub fn name(self) -> Option<&'static str> {
        NAMES.iter().find(|(k, _)| *k == self).map(|(_, n)| *n)
    }
}

/// Returned when a key name does not match any known key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name `{0}`")]
pub struct KeyParseError(pub String);

impl FromStr for Key {
    type Err = KeyParseError;

    /// Parses a key name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        NAMES
            .iter()
            .chain(ALIASES)
            .find(|(_, name)| name.eq_ignore_ascii_case(s))
            .map(|(k, _)| *k)
            .ok_or_else(|| KeyParseError(s.to_string()))
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{:?}", self),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Platform-agnostic input events emitted by the runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key {
        key: Key,
        state: KeyState,
        /// True when event is a key-repeat.
        repeat: bool,
    },

    /// Window focus change.
    Focused(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        assert_eq!("Up".parse::<Key>(), Ok(Key::ArrowUp));
        assert_eq!("W".parse::<Key>(), Ok(Key::W));
        assert_eq!("7".parse::<Key>(), Ok(Key::Digit7));
        assert_eq!("F12".parse::<Key>(), Ok(Key::F12));
    }

    #[test]
    fn parse_ignores_case_and_whitespace() {
        assert_eq!(" left ".parse::<Key>(), Ok(Key::ArrowLeft));
        assert_eq!("a".parse::<Key>(), Ok(Key::A));
        assert_eq!("arrowright".parse::<Key>(), Ok(Key::ArrowRight));
    }

    #[test]
    fn parse_rejects_unknown_names() {
        assert_eq!("Jump".parse::<Key>(), Err(KeyParseError("Jump".into())));
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn display_matches_parse() {
        for (key, _) in NAMES {
            assert_eq!(key.to_string().parse::<Key>(), Ok(*key));
        }
    }

    #[test]
    fn unknown_has_no_name() {
        assert_eq!(Key::Unknown(99).name(), None);
        assert_eq!(Key::Unknown(99).to_string(), "Unknown(99)");
    }
}
