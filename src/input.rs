//! Device-independent control intents.
//!
//! Key events arrive asynchronously (a reader thread feeds them through a
//! channel), but the simulation only ever sees an `Intents` value copied
//! out once per frame, so it never observes a half-applied update.
//!
//! Terminals come in two flavours:
//! * **Keyboard-enhancement capable** (kitty protocol): proper
//!   `Press` / `Repeat` / `Release` events, keys are dropped on release.
//! * **Classic terminals**: only `Press` events (OS key-repeat shows up as
//!   repeated presses).  Keys expire after `HOLD_WINDOW` frames of silence,
//!   which is shorter than the OS repeat interval.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEventKind};

/// Frames a key stays "held" after its last press/repeat event.
pub const HOLD_WINDOW: u64 = 4;

/// Snapshot handed to one simulation step.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Intents {
    pub move_left: bool,
    pub move_right: bool,
    /// Absolute horizontal pointer position in logical pixels.  When set it
    /// overrides the held directions for this frame only.
    pub pointer_x: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

fn direction(code: &KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Direction::Right),
        _ => None,
    }
}

/// Collects raw key and pointer events between frames.
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held key → the frame it was last seen (press or repeat).
    last_seen: HashMap<KeyCode, u64>,
    pointer_x: Option<f32>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(&mut self, code: KeyCode, kind: KeyEventKind, frame: u64) {
        match kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.last_seen.insert(code, frame);
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&code);
            }
        }
    }

    /// Record a pointer position; consumed by the next `snapshot`.
    pub fn pointer(&mut self, x: f32) {
        self.pointer_x = Some(x);
    }

    fn held(&self, dir: Direction, frame: u64) -> bool {
        self.last_seen.iter().any(|(code, &last)| {
            direction(code) == Some(dir) && frame.saturating_sub(last) <= HOLD_WINDOW
        })
    }

    /// Build this frame's intents.  The pointer is one-shot.
    pub fn snapshot(&mut self, frame: u64) -> Intents {
        Intents {
            move_left: self.held(Direction::Left, frame),
            move_right: self.held(Direction::Right, frame),
            pointer_x: self.pointer_x.take(),
        }
    }

    /// Forget everything, e.g. when a new session starts.
    pub fn clear(&mut self) {
        self.last_seen.clear();
        self.pointer_x = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_holds_until_window_expires() {
        let mut t = KeyTracker::new();
        t.key(KeyCode::Left, KeyEventKind::Press, 10);
        assert!(t.snapshot(10).move_left);
        assert!(t.snapshot(10 + HOLD_WINDOW).move_left);
        assert!(!t.snapshot(11 + HOLD_WINDOW).move_left);
    }

    #[test]
    fn release_drops_the_key_immediately() {
        let mut t = KeyTracker::new();
        t.key(KeyCode::Char('d'), KeyEventKind::Press, 1);
        t.key(KeyCode::Char('d'), KeyEventKind::Release, 2);
        assert!(!t.snapshot(2).move_right);
    }

    #[test]
    fn both_directions_can_be_held() {
        let mut t = KeyTracker::new();
        t.key(KeyCode::Char('A'), KeyEventKind::Press, 3);
        t.key(KeyCode::Right, KeyEventKind::Repeat, 3);
        let i = t.snapshot(3);
        assert!(i.move_left && i.move_right);
    }

    #[test]
    fn pointer_applies_to_one_snapshot_only() {
        let mut t = KeyTracker::new();
        t.pointer(42.0);
        assert_eq!(t.snapshot(0).pointer_x, Some(42.0));
        assert_eq!(t.snapshot(1).pointer_x, None);
    }

    #[test]
    fn unrelated_keys_are_ignored() {
        let mut t = KeyTracker::new();
        t.key(KeyCode::Char(' '), KeyEventKind::Press, 0);
        assert_eq!(t.snapshot(0), Intents::default());
    }
}
