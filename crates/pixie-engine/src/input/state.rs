use std::collections::HashSet;

use super::types::{InputEvent, Key, KeyState};

/// Current input state for the window.
///
/// Holds "is down" information for polling. Apps query it once per frame
/// through [`key_down`](Self::key_down) rather than reacting to events.
#[derive(Debug, Default)]
pub struct InputState {
    /// Whether the window is focused.
    pub focused: bool,

    /// Set of currently held keys.
    pub keys_down: HashSet<Key>,
}

impl InputState {
    /// Applies a platform-agnostic input event to the current state.
    pub fn apply_event(&mut self, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Releases are not delivered to an unfocused window.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(key) {
                        log::trace!("key down: {key}");
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(&key) {
                        log::trace!("key up: {key}");
                    }
                }
            },
        }
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn press_and_release() {
        let mut s = InputState::default();
        s.apply_event(key(Key::W, KeyState::Pressed));
        assert!(s.key_down(Key::W));
        s.apply_event(key(Key::W, KeyState::Released));
        assert!(!s.key_down(Key::W));
    }

    #[test]
    fn repeat_keeps_key_down() {
        let mut s = InputState::default();
        s.apply_event(key(Key::ArrowUp, KeyState::Pressed));
        s.apply_event(InputEvent::Key { key: Key::ArrowUp, state: KeyState::Pressed, repeat: true });
        assert!(s.key_down(Key::ArrowUp));
        assert_eq!(s.keys_down.len(), 1);
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut s = InputState::default();
        s.apply_event(key(Key::A, KeyState::Released));
        assert!(s.keys_down.is_empty());
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut s = InputState::default();
        s.apply_event(InputEvent::Focused(true));
        s.apply_event(key(Key::D, KeyState::Pressed));
        s.apply_event(key(Key::S, KeyState::Pressed));
        s.apply_event(InputEvent::Focused(false));
        assert!(!s.focused);
        assert!(s.keys_down.is_empty());
    }
}
