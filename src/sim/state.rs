//! Entity model and shared simulation types
//!
//! Passive data only; behaviour lives in the component modules.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Visual category of an alien, derived from its grid row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlienTier {
    /// Front rows
    Grunt,
    Soldier,
    /// Top row
    Elite,
}

impl AlienTier {
    /// Tier for a grid row (row 0 is the top of the formation)
    ///
    /// Grids taller than five rows repeat the pattern.
    pub fn for_row(row: usize) -> Self {
        match row % 5 {
            0 => AlienTier::Elite,
            1 | 2 => AlienTier::Soldier,
            _ => AlienTier::Grunt,
        }
    }
}

/// Axis-aligned box used for overlap tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// True when the boxes share any area (touching edges do not count)
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }
}

/// A member of the formation grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Alien {
    pub pos: Vec2,
    pub tier: AlienTier,
    /// Cleared when destroyed; the slot stays so row/column addressing holds
    pub alive: bool,
}

impl Alien {
    pub fn new(pos: Vec2, tier: AlienTier) -> Self {
        Self {
            pos,
            tier,
            alive: true,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }
}

/// Who fired a bolt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoltOwner {
    Player,
    Alien,
}

/// A projectile moving along the vertical axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bolt {
    pub pos: Vec2,
    /// Signed pixels per tick; positive is upward
    pub velocity: f32,
    pub owner: BoltOwner,
}

impl Bolt {
    /// Upward bolt fired by the ship
    pub fn player(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            velocity: speed.abs(),
            owner: BoltOwner::Player,
        }
    }

    /// Downward bolt fired by an alien
    pub fn alien(pos: Vec2, speed: f32) -> Self {
        Self {
            pos,
            velocity: -speed.abs(),
            owner: BoltOwner::Alien,
        }
    }

    #[inline]
    pub fn is_player(&self) -> bool {
        self.owner == BoltOwner::Player
    }
}

/// Horizontal marching direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Sign applied to the horizontal walk
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Left => -1.0,
            Direction::Right => 1.0,
        }
    }

    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Player fired a bolt
    PlayerFired,
    /// Alien at (row, col) fired a bolt
    AlienFired { row: usize, col: usize },
    /// Alien at (row, col) was destroyed
    AlienDestroyed { row: usize, col: usize },
    /// An alien bolt hit the ship
    ShipDestroyed,
    /// An alien crossed the defense line
    DefenseBreached,
}
