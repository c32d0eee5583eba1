//! Frame-driven simulation module
//!
//! All gameplay logic lives here. Single-threaded and synchronous:
//! - One `update` per host frame, no timers of its own
//! - Randomness only through an injected source
//! - No rendering or platform dependencies beyond the surface/audio traits

pub mod collision;
pub mod fire;
pub mod formation;
pub mod input;
pub mod lifecycle;
pub mod ship;
pub mod state;
pub mod wave;

pub use fire::{FireScheduler, RandomSource, Shot};
pub use formation::{Formation, StepKind};
pub use input::{Control, EdgeTracker, Pressed, TickInput};
pub use lifecycle::{Game, GamePhase, PhaseEvent, transition};
pub use state::{Alien, AlienTier, Bolt, BoltOwner, Direction, GameEvent, Rect, Ship};
pub use wave::Wave;
