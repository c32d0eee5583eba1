//! Render surface abstraction
//!
//! The simulation describes what is on screen; a [`RenderSurface`] decides how
//! it gets there. [`ShapeBatch`] is the built-in surface that turns draw calls
//! into a flat vertex list ready for upload.

pub mod shapes;
pub mod vertex;

use glam::Vec2;

use crate::sim::{AlienTier, BoltOwner};

pub use shapes::ShapeBatch;
pub use vertex::Vertex;

/// Visual category of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Ship,
    Alien(AlienTier),
    Bolt(BoltOwner),
}

impl Sprite {
    /// Image the host is expected to map this sprite to
    pub fn asset(&self) -> &'static str {
        match self {
            Sprite::Ship => "ship.png",
            Sprite::Alien(AlienTier::Grunt) => "alien1.png",
            Sprite::Alien(AlienTier::Soldier) => "alien2.png",
            Sprite::Alien(AlienTier::Elite) => "alien3.png",
            Sprite::Bolt(_) => "bolt",
        }
    }
}

/// Opaque displayable text; build a new one whenever the message changes
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub pos: Vec2,
    pub font_size: f32,
    pub font_name: &'static str,
}

impl Label {
    pub const FONT: &'static str = "arcade.ttf";

    pub fn new(text: impl Into<String>, pos: Vec2, font_size: f32) -> Self {
        Self {
            text: text.into(),
            pos,
            font_size,
            font_name: Self::FONT,
        }
    }
}

/// Anything that accepts draw calls for a frame
pub trait RenderSurface {
    /// Draw a sprite centered on `center`
    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, size: Vec2);
    /// Draw a straight line
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: [f32; 4]);
    /// Draw a text label
    fn draw_label(&mut self, label: &Label);
}
