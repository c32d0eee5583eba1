//! Alien Invaders - a fixed-formation shooter simulation
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (formation, bolts, collisions, lifecycle)
//! - `renderer`: Render surface abstraction and vertex batching
//! - `audio`: Sound cue abstraction
//! - `settings`: Immutable gameplay tunables

pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use audio::{AudioManager, AudioSink, NullAudio, SoundEffect};
pub use settings::{Settings, SettingsError};

/// Default gameplay constants (overridable through [`Settings`])
pub mod consts {
    /// Play field dimensions (y grows upward, 0 is the bottom edge)
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 700.0;

    /// Ship geometry and movement (pixels per tick)
    pub const SHIP_WIDTH: f32 = 44.0;
    pub const SHIP_HEIGHT: f32 = 44.0;
    pub const SHIP_BOTTOM: f32 = 32.0;
    pub const SHIP_MOVEMENT: f32 = 5.0;
    pub const SHIP_LIVES: u8 = 3;

    /// Aliens below this line end the game
    pub const DEFENSE_LINE: f32 = 100.0;

    /// Alien geometry
    pub const ALIEN_WIDTH: f32 = 33.0;
    pub const ALIEN_HEIGHT: f32 = 33.0;
    pub const ALIEN_H_SEP: f32 = 16.0;
    pub const ALIEN_V_SEP: f32 = 16.0;
    /// Gap between the top of the screen and the first row
    pub const ALIEN_CEILING: f32 = 100.0;
    pub const ALIEN_ROWS: usize = 5;
    pub const ALIENS_IN_ROW: usize = 12;

    /// Horizontal distance covered by one step
    pub const ALIEN_H_WALK: f32 = 8.0;
    /// Drop applied on every direction reversal
    pub const ALIEN_V_WALK: f32 = 16.0;
    /// Seconds between formation steps on the first wave
    pub const ALIEN_SPEED: f32 = 1.0;
    /// Step interval divisor applied after each cleared wave
    pub const ALIEN_SPEED_UP: f32 = 1.25;

    /// Bolt geometry and speed (pixels per tick)
    pub const BOLT_WIDTH: f32 = 4.0;
    pub const BOLT_HEIGHT: f32 = 16.0;
    pub const BOLT_SPEED: f32 = 10.0;
    /// Aliens fire once every 1..=BOLT_RATE steps
    pub const BOLT_RATE: u32 = 5;

    /// Seconds the wave-complete message stays up
    pub const COMPLETE_MESSAGE_SECS: f32 = 3.0;
}

/// Clamp an externally supplied frame delta to a usable value.
///
/// Negative and NaN deltas become zero so they never reach position math.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt > 0.0 && dt.is_finite() { dt } else { 0.0 }
}
