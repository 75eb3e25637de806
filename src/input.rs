//! Input surface written by the host's event handlers
//!
//! Handlers fire at any time; the simulation reads the state once at the top
//! of each step. Every field is a single scalar, so last-write-wins is the
//! only synchronization needed.

use crate::sim::StepInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Start,
    MuteMusic,
    VolumeUp,
    VolumeDown,
}

/// Key-hold flags and the most recent pointer position
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pointer_x: Option<f32>,
}

impl InputState {
    pub fn key_down(&mut self, key: Key) {
        match key {
            Key::Left => self.left = true,
            Key::Right => self.right = true,
            _ => {}
        }
    }

    pub fn key_up(&mut self, key: Key) {
        match key {
            Key::Left => self.left = false,
            Key::Right => self.right = false,
            _ => {}
        }
    }

    /// Record a pointer/touch position. Positions outside the open interval
    /// (0, field_width) come from stray events and are dropped outright
    /// rather than clamped, so the paddle cannot teleport to an edge.
    pub fn pointer_moved(&mut self, x: f32, field_width: f32) {
        if x > 0.0 && x < field_width {
            self.pointer_x = Some(x);
        }
    }

    /// Snapshot for one simulation step; consumes the pending pointer event
    pub fn take_step(&mut self) -> StepInput {
        StepInput {
            left: self.left,
            right: self.right,
            pointer_x: self.pointer_x.take(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hold_flags_persist_across_steps() {
        let mut input = InputState::default();
        input.key_down(Key::Right);
        assert!(input.take_step().right);
        assert!(input.take_step().right);
        input.key_up(Key::Right);
        assert!(!input.take_step().right);
    }

    #[test]
    fn test_pointer_consumed_by_one_step() {
        let mut input = InputState::default();
        input.pointer_moved(123.0, 800.0);
        assert_eq!(input.take_step().pointer_x, Some(123.0));
        assert_eq!(input.take_step().pointer_x, None);
    }

    #[test]
    fn test_out_of_field_pointer_is_ignored() {
        let mut input = InputState::default();
        input.pointer_moved(-5.0, 800.0);
        input.pointer_moved(800.0, 800.0);
        input.pointer_moved(0.0, 800.0);
        assert_eq!(input.take_step().pointer_x, None);
    }

    #[test]
    fn test_stray_pointer_does_not_clobber_valid_one() {
        let mut input = InputState::default();
        input.pointer_moved(400.0, 800.0);
        input.pointer_moved(900.0, 800.0);
        assert_eq!(input.take_step().pointer_x, Some(400.0));
    }
}
