//! Wave controller
//!
//! One wave owns the formation, the ship and every bolt on screen. Each tick
//! runs, in order: formation step, ship input, alien fire, bolt movement and
//! collisions, defense-line check. Bolts fired this tick move and collide
//! this tick.

use glam::Vec2;

use super::collision;
use super::fire::{FireScheduler, RandomSource};
use super::formation::Formation;
use super::input::TickInput;
use super::ship;
use super::state::{Bolt, GameEvent, Ship};
use crate::audio::{AudioSink, SoundEffect};
use crate::renderer::vertex::colors;
use crate::renderer::{RenderSurface, Sprite};
use crate::{Settings, sanitize_dt};

/// A single wave of aliens
#[derive(Debug)]
pub struct Wave {
    settings: Settings,
    formation: Formation,
    ship: Option<Ship>,
    bolts: Vec<Bolt>,
    lives: u8,
    fire: FireScheduler,
    muted: bool,
}

impl Wave {
    /// Fresh formation and ship; `lives` is capped at `settings.ship_lives`
    pub fn new(
        settings: &Settings,
        step_interval: f32,
        lives: u8,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            settings: *settings,
            formation: Formation::new(settings, step_interval),
            ship: Some(Ship::new(settings.ship_spawn())),
            bolts: Vec::new(),
            lives: lives.min(settings.ship_lives),
            fire: FireScheduler::new(settings.bolt_rate, rng),
            muted: false,
        }
    }

    /// Advance the wave by one tick
    pub fn update(
        &mut self,
        dt: f32,
        input: &TickInput,
        audio: &mut dyn AudioSink,
    ) -> Vec<GameEvent> {
        let dt = sanitize_dt(dt);
        let mut events = Vec::new();

        let stepped = self.formation.step(dt).is_some();

        if let Some(player) = self.ship.as_mut() {
            if let Some(bolt) = ship::apply_input(player, input, &self.bolts, &self.settings) {
                self.bolts.push(bolt);
                events.push(GameEvent::PlayerFired);
            }
        }

        if stepped {
            if let Some(shot) = self.fire.on_step(&self.formation) {
                self.bolts
                    .push(Bolt::alien(shot.origin, self.settings.bolt_speed));
                events.push(GameEvent::AlienFired {
                    row: shot.row,
                    col: shot.col,
                });
            }
        }

        collision::advance(&mut self.bolts);
        events.extend(collision::resolve(
            &mut self.bolts,
            &mut self.formation,
            &mut self.ship,
            &self.settings,
        ));

        if self.defense_breached() && self.lives > 0 {
            log::info!("defense line breached");
            self.lives = 0;
            events.push(GameEvent::DefenseBreached);
        }

        for event in &events {
            self.cue(audio, event);
        }
        events
    }

    /// Any alive alien with its lower edge under the defense line
    fn defense_breached(&self) -> bool {
        self.formation
            .lowest_edge()
            .is_some_and(|edge| edge < self.settings.defense_line)
    }

    fn cue(&self, audio: &mut dyn AudioSink, event: &GameEvent) {
        if self.muted {
            return;
        }
        let effect = match event {
            GameEvent::PlayerFired => SoundEffect::PlayerShot,
            GameEvent::AlienFired { .. } => SoundEffect::AlienShot,
            GameEvent::AlienDestroyed { .. } => SoundEffect::AlienDestroyed,
            GameEvent::ShipDestroyed => SoundEffect::ShipDestroyed,
            GameEvent::DefenseBreached => return,
        };
        audio.play(effect);
    }

    /// Replace a destroyed ship, paying one life
    ///
    /// Returns false (and changes nothing) while the ship is still alive.
    pub fn respawn_ship(&mut self) -> bool {
        if self.ship.is_some() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.ship = Some(Ship::new(self.settings.ship_spawn()));
        log::info!("ship respawned, {} lives left", self.lives);
        true
    }

    pub fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        log::info!("sound {}", if self.muted { "muted" } else { "on" });
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn alien_count(&self) -> usize {
        self.formation.alive_count()
    }

    pub fn ship_alive(&self) -> bool {
        self.ship.is_some()
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    pub fn fire_scheduler(&self) -> &FireScheduler {
        &self.fire
    }

    /// Draw aliens, ship, defense line and bolts
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        let s = &self.settings;
        let alien_size = Vec2::new(s.alien_width, s.alien_height);
        for (_, _, alien) in self.formation.iter_alive() {
            surface.draw_sprite(Sprite::Alien(alien.tier), alien.pos, alien_size);
        }

        if let Some(ship) = &self.ship {
            surface.draw_sprite(
                Sprite::Ship,
                ship.pos,
                Vec2::new(s.ship_width, s.ship_height),
            );
        }

        surface.draw_line(
            Vec2::new(0.0, s.defense_line),
            Vec2::new(s.game_width, s.defense_line),
            1.0,
            colors::DEFENSE_LINE,
        );

        let bolt_size = Vec2::new(s.bolt_width, s.bolt_height);
        for bolt in &self.bolts {
            surface.draw_sprite(Sprite::Bolt(bolt.owner), bolt.pos, bolt_size);
        }
    }

    /// Scripted access for tests in sibling modules
    #[cfg(test)]
    pub(crate) fn parts_mut(&mut self) -> (&mut Formation, &mut Option<Ship>, &mut Vec<Bolt>) {
        (&mut self.formation, &mut self.ship, &mut self.bolts)
    }
}
