//! Gameplay settings
//!
//! One immutable value handed to every simulation component at construction.
//! Missing JSON fields fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game settings/tunables
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Play field ===
    pub game_width: f32,
    pub game_height: f32,
    pub defense_line: f32,

    // === Ship ===
    pub ship_width: f32,
    pub ship_height: f32,
    /// Distance from the bottom edge to the ship's lower edge
    pub ship_bottom: f32,
    /// Horizontal movement per tick while a direction is held
    pub ship_movement: f32,
    pub ship_lives: u8,

    // === Formation ===
    pub alien_rows: usize,
    pub aliens_in_row: usize,
    pub alien_width: f32,
    pub alien_height: f32,
    pub alien_h_sep: f32,
    pub alien_v_sep: f32,
    pub alien_ceiling: f32,
    pub alien_h_walk: f32,
    pub alien_v_walk: f32,
    /// Seconds between steps on the first wave
    pub alien_speed: f32,
    /// Divisor applied to the step interval after each cleared wave
    pub alien_speed_up: f32,

    // === Bolts ===
    pub bolt_width: f32,
    pub bolt_height: f32,
    /// Pixels per tick
    pub bolt_speed: f32,
    /// Upper bound of the randomized steps-between-shots threshold
    pub bolt_rate: u32,

    // === Messages ===
    pub complete_message_secs: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_width: GAME_WIDTH,
            game_height: GAME_HEIGHT,
            defense_line: DEFENSE_LINE,

            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            ship_bottom: SHIP_BOTTOM,
            ship_movement: SHIP_MOVEMENT,
            ship_lives: SHIP_LIVES,

            alien_rows: ALIEN_ROWS,
            aliens_in_row: ALIENS_IN_ROW,
            alien_width: ALIEN_WIDTH,
            alien_height: ALIEN_HEIGHT,
            alien_h_sep: ALIEN_H_SEP,
            alien_v_sep: ALIEN_V_SEP,
            alien_ceiling: ALIEN_CEILING,
            alien_h_walk: ALIEN_H_WALK,
            alien_v_walk: ALIEN_V_WALK,
            alien_speed: ALIEN_SPEED,
            alien_speed_up: ALIEN_SPEED_UP,

            bolt_width: BOLT_WIDTH,
            bolt_height: BOLT_HEIGHT,
            bolt_speed: BOLT_SPEED,
            bolt_rate: BOLT_RATE,

            complete_message_secs: COMPLETE_MESSAGE_SECS,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: &'static str) -> SettingsError {
            SettingsError::Invalid { field, reason }
        }

        if self.alien_rows == 0 {
            return Err(invalid("alien_rows", "must be at least 1"));
        }
        if self.aliens_in_row == 0 {
            return Err(invalid("aliens_in_row", "must be at least 1"));
        }
        if self.bolt_rate == 0 {
            return Err(invalid("bolt_rate", "must be at least 1"));
        }
        if self.ship_lives == 0 {
            return Err(invalid("ship_lives", "must be at least 1"));
        }
        if !(self.alien_speed > 0.0) {
            return Err(invalid("alien_speed", "must be positive"));
        }
        if !(self.alien_speed_up >= 1.0) {
            return Err(invalid("alien_speed_up", "must be at least 1.0"));
        }
        if !(self.game_width > self.ship_width) {
            return Err(invalid("game_width", "must exceed ship_width"));
        }
        if !(self.bolt_speed > 0.0) {
            return Err(invalid("bolt_speed", "must be positive"));
        }
        Ok(())
    }

    /// Half-width margin the formation may not cross
    #[inline]
    pub fn formation_margin(&self) -> f32 {
        self.alien_h_sep + self.alien_width / 2.0
    }

    /// Where a freshly spawned ship sits
    #[inline]
    pub fn ship_spawn(&self) -> glam::Vec2 {
        glam::Vec2::new(
            self.game_width / 2.0,
            self.ship_bottom + self.ship_height / 2.0,
        )
    }
}
