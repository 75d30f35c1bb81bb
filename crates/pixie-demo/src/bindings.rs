use std::fmt;

use pixie_engine::coords::Vec2;
use pixie_engine::input::Key;
use serde::{Deserialize, Deserializer};

/// Logical movement direction.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit step in screen space (+Y down).
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }
}

/// Mapping from the four directions to input keys.
///
/// Deserializes from key names, e.g. `up = "W"` or `left = "Left"`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct KeyBindings {
    #[serde(deserialize_with = "key_by_name")]
    pub up: Key,
    #[serde(deserialize_with = "key_by_name")]
    pub down: Key,
    #[serde(deserialize_with = "key_by_name")]
    pub left: Key,
    #[serde(deserialize_with = "key_by_name")]
    pub right: Key,
}

impl KeyBindings {
    pub const fn arrows() -> Self {
        Self {
            up: Key::ArrowUp,
            down: Key::ArrowDown,
            left: Key::ArrowLeft,
            right: Key::ArrowRight,
        }
    }

    pub const fn wasd() -> Self {
        Self {
            up: Key::W,
            down: Key::S,
            left: Key::A,
            right: Key::D,
        }
    }

    pub fn key(&self, dir: Direction) -> Key {
        match dir {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// First key bound to more than one direction, if any.
    pub fn duplicate(&self) -> Option<Key> {
        let keys = Direction::ALL.map(|d| self.key(d));
        keys.iter()
            .enumerate()
            .find(|(i, k)| keys[i + 1..].contains(*k))
            .map(|(_, k)| *k)
    }

    /// Sum of the unit steps of every direction whose key is held.
    pub fn direction(&self, key_down: impl Fn(Key) -> bool) -> Vec2 {
        let mut dir = Vec2::ZERO;
        for d in Direction::ALL {
            if key_down(self.key(d)) {
                dir += d.unit();
            }
        }
        dir
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::arrows()
    }
}

impl fmt::Display for KeyBindings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "up={} down={} left={} right={}",
            self.up, self.down, self.left, self.right
        )
    }
}

fn key_by_name<'de, D>(deserializer: D) -> Result<Key, D::Error>
where
    D: Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_differ_only_in_keys() {
        assert_eq!(KeyBindings::arrows().key(Direction::Up), Key::ArrowUp);
        assert_eq!(KeyBindings::wasd().key(Direction::Up), Key::W);
        assert_eq!(KeyBindings::wasd().key(Direction::Right), Key::D);
    }

    #[test]
    fn opposite_keys_cancel() {
        let b = KeyBindings::wasd();
        let dir = b.direction(|k| k == Key::A || k == Key::D);
        assert_eq!(dir, Vec2::ZERO);
    }

    #[test]
    fn diagonal_is_not_normalized() {
        let b = KeyBindings::arrows();
        let dir = b.direction(|k| k == Key::ArrowUp || k == Key::ArrowRight);
        assert_eq!(dir, Vec2::new(1.0, -1.0));
    }

    #[test]
    fn detects_duplicate_keys() {
        assert_eq!(KeyBindings::arrows().duplicate(), None);
        let b = KeyBindings { left: Key::W, ..KeyBindings::wasd() };
        assert_eq!(b.duplicate(), Some(Key::W));
    }

    #[test]
    fn display_lists_all_directions() {
        assert_eq!(KeyBindings::wasd().to_string(), "up=W down=S left=A right=D");
    }
}
