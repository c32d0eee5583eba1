//! Projectile movement and collision resolution
//!
//! Hits are marked during the scan and swept afterwards, so no collection is
//! mutated while it is being iterated.

use glam::Vec2;

use super::formation::Formation;
use super::state::{Bolt, GameEvent, Rect, Ship};
use crate::Settings;

/// Move every bolt by its velocity (one tick)
pub fn advance(bolts: &mut [Bolt]) {
    for bolt in bolts.iter_mut() {
        bolt.pos.y += bolt.velocity;
    }
}

/// Whether the ship already has a bolt on screen
pub fn player_bolt_in_flight(bolts: &[Bolt]) -> bool {
    bolts.iter().any(Bolt::is_player)
}

/// Whether a bolt is still inside the visible range
#[inline]
pub fn in_bounds(bolt: &Bolt, settings: &Settings) -> bool {
    bolt.pos.y <= settings.game_height && bolt.pos.y >= -settings.bolt_height
}

pub fn bolt_rect(bolt: &Bolt, settings: &Settings) -> Rect {
    Rect::from_center(
        bolt.pos,
        Vec2::new(settings.bolt_width, settings.bolt_height),
    )
}

pub fn ship_rect(ship: &Ship, settings: &Settings) -> Rect {
    Rect::from_center(
        ship.pos,
        Vec2::new(settings.ship_width, settings.ship_height),
    )
}

/// Remove expired bolts and resolve hits against the formation and ship
///
/// Player bolts destroy the first alive alien they overlap and are consumed.
/// An alien bolt touching the ship destroys it and clears every bolt.
pub fn resolve(
    bolts: &mut Vec<Bolt>,
    formation: &mut Formation,
    ship: &mut Option<Ship>,
    settings: &Settings,
) -> Vec<GameEvent> {
    let mut events = Vec::new();

    bolts.retain(|b| in_bounds(b, settings));

    let ship_box = ship.as_ref().map(|s| ship_rect(s, settings));
    let mut spent = vec![false; bolts.len()];
    let mut ship_hit = false;

    for (i, bolt) in bolts.iter().enumerate() {
        let rect = bolt_rect(bolt, settings);
        if bolt.is_player() {
            if let Some((row, col)) = formation.first_hit(&rect) {
                formation.destroy(row, col);
                spent[i] = true;
                events.push(GameEvent::AlienDestroyed { row, col });
                log::debug!("alien ({}, {}) destroyed", row, col);
            }
        } else if ship_box.is_some_and(|s| s.overlaps(&rect)) {
            ship_hit = true;
            break;
        }
    }

    if ship_hit {
        *ship = None;
        bolts.clear();
        events.push(GameEvent::ShipDestroyed);
        log::debug!("ship destroyed");
    } else {
        let mut flags = spent.into_iter();
        bolts.retain(|_| !flags.next().unwrap_or(false));
    }

    events
}
