//! Ship controller
//!
//! Fire rate is capped by travel time: a new player bolt only leaves the ship
//! once the previous one is gone.

use super::collision::player_bolt_in_flight;
use super::input::{Control, TickInput};
use super::state::{Bolt, Ship};
use crate::Settings;

/// Apply this tick's input to the ship; returns a bolt if one was fired
pub fn apply_input(
    ship: &mut Ship,
    input: &TickInput,
    bolts: &[Bolt],
    settings: &Settings,
) -> Option<Bolt> {
    let half = settings.ship_width / 2.0;
    let (min_x, max_x) = (half, settings.game_width - half);

    if input.is_held(Control::Left) {
        ship.pos.x = (ship.pos.x - settings.ship_movement).max(min_x);
    }
    if input.is_held(Control::Right) {
        ship.pos.x = (ship.pos.x + settings.ship_movement).min(max_x);
    }

    if input.is_held(Control::Fire) && !player_bolt_in_flight(bolts) {
        return Some(Bolt::player(ship.pos, settings.bolt_speed));
    }
    None
}
