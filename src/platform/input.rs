//! Held-key state for the fixed key bindings

use crate::sim::TickInput;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Smoke,
    Restart,
    /// Toggle the elevation grid overlay
    ToggleGrid,
    /// Step through quality presets
    CycleQuality,
}

const KEY_COUNT: usize = 8;

impl Key {
    /// Map a DOM `KeyboardEvent.code` to a game key
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "Space" => Some(Key::Smoke),
            "KeyR" => Some(Key::Restart),
            "KeyG" => Some(Key::ToggleGrid),
            "KeyQ" => Some(Key::CycleQuality),
            _ => None,
        }
    }

    const fn index(self) -> usize {
        match self {
            Key::Up => 0,
            Key::Down => 1,
            Key::Left => 2,
            Key::Right => 3,
            Key::Smoke => 4,
            Key::Restart => 5,
            Key::ToggleGrid => 6,
            Key::CycleQuality => 7,
        }
    }
}

/// Which keys are currently down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    down: [bool; KEY_COUNT],
}

impl HeldKeys {
    /// Mark `key` held. Returns true on the initial press, false on auto-repeat.
    pub fn press(&mut self, key: Key) -> bool {
        let was_down = self.down[key.index()];
        self.down[key.index()] = true;
        !was_down
    }

    pub fn release(&mut self, key: Key) {
        self.down[key.index()] = false;
    }

    pub fn release_all(&mut self) {
        self.down = [false; KEY_COUNT];
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.down[key.index()]
    }

    /// Snapshot for one simulation tick
    pub fn tick_input(&self) -> TickInput {
        TickInput {
            up: self.is_down(Key::Up),
            down: self.is_down(Key::Down),
            left: self.is_down(Key::Left),
            right: self.is_down(Key::Right),
            smoke: self.is_down(Key::Smoke),
        }
    }
}
