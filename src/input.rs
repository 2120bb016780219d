//! Logical keys and per-frame edge detection.
//!
//! The front end reports which logical keys are down each frame; the core
//! only ever sees `InputState`, which can also answer "pressed this frame"
//! and "released this frame".

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    /// Vertical directions. Only the map screen reads them; in a level the
    /// up direction also jumps.
    Up,
    Down,
    Jump,
    Run,
    /// Fire (Fire tier).
    Action,
    Confirm,
    Quit,
}

impl Key {
    fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of keys held down during one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct InputSnapshot(u16);

impl InputSnapshot {
    pub fn with(mut self, key: Key) -> Self {
        self.insert(key);
        self
    }

    pub fn insert(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn contains(&self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Key> for InputSnapshot {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        iter.into_iter().fold(Self::default(), Self::with)
    }
}

/// Current and previous snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct InputState {
    current: InputSnapshot,
    previous: InputSnapshot,
}

impl InputState {
    /// Start a new frame with `snapshot` as the held set.
    pub fn advance(&mut self, snapshot: InputSnapshot) {
        self.previous = self.current;
        self.current = snapshot;
    }

    pub fn held(&self, key: Key) -> bool {
        self.current.contains(key)
    }

    pub fn pressed(&self, key: Key) -> bool {
        self.current.contains(key) && !self.previous.contains(key)
    }

    pub fn released(&self, key: Key) -> bool {
        !self.current.contains(key) && self.previous.contains(key)
    }

    /// Horizontal intent: -1, 0 or 1. Both directions held cancel out.
    pub fn axis(&self) -> f32 {
        let mut dir = 0.0;
        if self.held(Key::Left) {
            dir -= 1.0;
        }
        if self.held(Key::Right) {
            dir += 1.0;
        }
        dir
    }

    /// Vertical intent: -1 up, 1 down, 0 when neither or both are held.
    pub fn vertical(&self) -> f32 {
        let mut dir = 0.0;
        if self.held(Key::Up) {
            dir -= 1.0;
        }
        if self.held(Key::Down) {
            dir += 1.0;
        }
        dir
    }
}
