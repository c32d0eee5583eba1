//! Per-tick input snapshot and rising-edge tracking

use serde::{Deserialize, Serialize};

/// Named controls the simulation reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Left,
    Right,
    Fire,
    Start,
    Pause,
    Resume,
    Mute,
}

impl Control {
    pub const ALL: [Control; 7] = [
        Control::Left,
        Control::Right,
        Control::Fire,
        Control::Start,
        Control::Pause,
        Control::Resume,
        Control::Mute,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Which controls are held this tick, sampled once by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    /// Move left (left arrow / A)
    pub left: bool,
    /// Move right (right arrow / D)
    pub right: bool,
    /// Fire (up / space / W)
    pub fire: bool,
    /// Start a game (X)
    pub start: bool,
    /// Pause (P)
    pub pause: bool,
    /// Resume from pause (R)
    pub resume: bool,
    /// Toggle sound (M)
    pub mute: bool,
}

impl TickInput {
    /// Snapshot with a single control held
    pub fn holding(control: Control) -> Self {
        let mut input = Self::default();
        input.set(control, true);
        input
    }

    pub fn is_held(&self, control: Control) -> bool {
        match control {
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Fire => self.fire,
            Control::Start => self.start,
            Control::Pause => self.pause,
            Control::Resume => self.resume,
            Control::Mute => self.mute,
        }
    }

    pub fn set(&mut self, control: Control, held: bool) {
        let slot = match control {
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
            Control::Fire => &mut self.fire,
            Control::Start => &mut self.start,
            Control::Pause => &mut self.pause,
            Control::Resume => &mut self.resume,
            Control::Mute => &mut self.mute,
        };
        *slot = held;
    }
}

/// Controls that went from released to held this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pressed(u8);

impl Pressed {
    pub fn contains(&self, control: Control) -> bool {
        self.0 & control.bit() != 0
    }
}

/// Remembers last tick's snapshot to turn "held" into "pressed once"
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTracker {
    previous: TickInput,
}

impl EdgeTracker {
    /// Compare against the previous snapshot and remember this one
    pub fn sample(&mut self, input: &TickInput) -> Pressed {
        let mut pressed = 0u8;
        for control in Control::ALL {
            if input.is_held(control) && !self.previous.is_held(control) {
                pressed |= control.bit();
            }
        }
        self.previous = *input;
        Pressed(pressed)
    }
}
