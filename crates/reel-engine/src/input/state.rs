use std::collections::HashSet;

use super::types::Key;

/// Per-frame input deltas.
///
/// [`InputState`] answers "is it down"; `InputFrame` answers "did it go down
/// (or up) this frame". The runtime clears the frame after each
/// `on_frame` call.
#[derive(Debug, Default)]
pub struct InputFrame {
    /// Keys pressed this frame (repeat events excluded).
    pub pressed: HashSet<Key>,

    /// Keys released this frame.
    pub released: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.pressed.clear();
        self.released.clear();
    }
}

/// Current keyboard state for the window.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<Key>,
}

impl InputState {
    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn keys_down(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys_down.iter().copied()
    }

    /// Applies a key transition, recording the edge into `frame`.
    ///
    /// OS key-repeat shows up as repeated "down" transitions; those must not
    /// count as new presses.
    pub fn apply_key(&mut self, frame: &mut InputFrame, key: Key, down: bool, repeat: bool) {
        if down {
            let newly = self.keys_down.insert(key);
            if newly && !repeat {
                frame.pressed.insert(key);
            }
        } else {
            self.keys_down.remove(&key);
            frame.released.insert(key);
        }
    }

    /// Clears held state, e.g. on focus loss. Avoids stuck keys when focus
    /// changes mid-press.
    pub fn clear_down(&mut self) {
        self.keys_down.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_records_edge_and_held_state() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_key(&mut frame, Key::Space, true, false);
        assert!(state.is_down(Key::Space));
        assert!(frame.pressed.contains(&Key::Space));
    }

    #[test]
    fn repeat_is_not_a_new_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_key(&mut frame, Key::R, true, false);
        frame.clear();
        state.apply_key(&mut frame, Key::R, true, true);

        assert!(state.is_down(Key::R));
        assert!(frame.pressed.is_empty());
    }

    #[test]
    fn release_clears_held_state() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_key(&mut frame, Key::ArrowLeft, true, false);
        state.apply_key(&mut frame, Key::ArrowLeft, false, false);

        assert!(!state.is_down(Key::ArrowLeft));
        assert!(frame.released.contains(&Key::ArrowLeft));
    }
}
