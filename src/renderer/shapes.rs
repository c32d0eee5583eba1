//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::{Vertex, colors};
use super::{Label, RenderSurface, Sprite};
use crate::sim::{AlienTier, BoltOwner};

/// Flat color used for a sprite when no texture is available
fn sprite_color(sprite: Sprite) -> [f32; 4] {
    match sprite {
        Sprite::Ship => colors::SHIP,
        Sprite::Alien(AlienTier::Grunt) => colors::ALIEN_GRUNT,
        Sprite::Alien(AlienTier::Soldier) => colors::ALIEN_SOLDIER,
        Sprite::Alien(AlienTier::Elite) => colors::ALIEN_ELITE,
        Sprite::Bolt(BoltOwner::Player) => colors::PLAYER_BOLT,
        Sprite::Bolt(BoltOwner::Alien) => colors::ALIEN_BOLT,
    }
}

/// Generate vertices for an axis-aligned filled rectangle
pub fn quad(center: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let half = size / 2.0;
    let min = center - half;
    let max = center + half;

    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a thick line segment
pub fn line(from: Vec2, to: Vec2, width: f32, color: [f32; 4]) -> Vec<Vertex> {
    let dir = (to - from).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

    let a1 = from + perp;
    let b1 = from - perp;
    let a2 = to + perp;
    let b2 = to - perp;

    vec![
        Vertex::new(a1.x, a1.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(a2.x, a2.y, color),
        Vertex::new(b1.x, b1.y, color),
        Vertex::new(b2.x, b2.y, color),
    ]
}

/// Surface that accumulates one frame of triangles and labels
#[derive(Debug, Clone, Default)]
pub struct ShapeBatch {
    pub vertices: Vec<Vertex>,
    pub labels: Vec<Label>,
    /// Asset name of each sprite, in draw order
    pub assets: Vec<&'static str>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything recorded for the previous frame
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.labels.clear();
        self.assets.clear();
    }

    /// Number of sprites drawn this frame
    pub fn sprite_count(&self) -> usize {
        self.assets.len()
    }

    /// Vertex data as raw bytes for a GPU upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

impl RenderSurface for ShapeBatch {
    fn draw_sprite(&mut self, sprite: Sprite, center: Vec2, size: Vec2) {
        self.assets.push(sprite.asset());
        self.vertices.extend(quad(center, size, sprite_color(sprite)));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: [f32; 4]) {
        self.vertices.extend(line(from, to, width, color));
    }

    fn draw_label(&mut self, label: &Label) {
        self.labels.push(label.clone());
    }
}
