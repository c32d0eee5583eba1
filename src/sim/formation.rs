//! Formation manager
//!
//! Owns the alien grid and marches it in lockstep. Boundary checks and the
//! descent always look at every alive alien at once, so rows can never drift
//! out of step with each other.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Alien, AlienTier, Direction, Rect};
use crate::Settings;
use crate::sanitize_dt;

/// What a single formation step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// Every alive alien moved one walk in the current direction
    March,
    /// The formation hit a margin, reversed and dropped
    Descend,
}

/// Rectangular alien grid with shared movement state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Formation {
    /// Row-major, `rows * cols` cells; never resized
    aliens: Vec<Alien>,
    rows: usize,
    cols: usize,
    direction: Direction,
    /// Seconds between steps
    step_interval: f32,
    /// Seconds accumulated since the last step
    elapsed: f32,
    settings: Settings,
}

impl Formation {
    /// Lay out a full grid, top row first
    pub fn new(settings: &Settings, step_interval: f32) -> Self {
        let rows = settings.alien_rows;
        let cols = settings.aliens_in_row;
        let mut aliens = Vec::with_capacity(rows * cols);

        for row in 0..rows {
            let y = settings.game_height
                - settings.alien_ceiling
                - row as f32 * (settings.alien_v_sep + settings.alien_height);
            let tier = AlienTier::for_row(row);
            for col in 0..cols {
                let x = settings.alien_h_sep
                    + (1 + col) as f32 * settings.alien_h_sep
                    + col as f32 * settings.alien_width;
                aliens.push(Alien::new(Vec2::new(x, y), tier));
            }
        }

        Self {
            aliens,
            rows,
            cols,
            direction: Direction::Right,
            step_interval,
            elapsed: 0.0,
            settings: *settings,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn step_interval(&self) -> f32 {
        self.step_interval
    }

    /// Alien slot at (row, col), alive or not
    pub fn get(&self, row: usize, col: usize) -> Option<&Alien> {
        if row < self.rows && col < self.cols {
            self.aliens.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Mutable slot access for tests and scripted setups
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Alien> {
        if row < self.rows && col < self.cols {
            self.aliens.get_mut(row * self.cols + col)
        } else {
            None
        }
    }

    /// Alive aliens with their grid coordinates
    pub fn iter_alive(&self) -> impl Iterator<Item = (usize, usize, &Alien)> + '_ {
        self.aliens
            .iter()
            .enumerate()
            .filter(|(_, a)| a.alive)
            .map(move |(i, a)| (i / self.cols, i % self.cols, a))
    }

    pub fn alive_count(&self) -> usize {
        self.aliens.iter().filter(|a| a.alive).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.aliens.iter().any(|a| a.alive)
    }

    /// Tombstone the alien at (row, col). Returns whether it was alive.
    pub fn destroy(&mut self, row: usize, col: usize) -> bool {
        match self.get_mut(row, col) {
            Some(alien) if alien.alive => {
                alien.alive = false;
                true
            }
            _ => false,
        }
    }

    /// Columns that still hold at least one alive alien, left to right
    pub fn non_empty_columns(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| (0..self.rows).any(|row| self.aliens[row * self.cols + col].alive))
            .collect()
    }

    /// Lowest alive alien of a column (closest to the defense line)
    pub fn lowest_in_column(&self, col: usize) -> Option<(usize, &Alien)> {
        if col >= self.cols {
            return None;
        }
        (0..self.rows)
            .rev()
            .map(|row| (row, &self.aliens[row * self.cols + col]))
            .find(|(_, a)| a.alive)
    }

    /// Bounding box of an alien at `pos`
    pub fn alien_rect(&self, pos: Vec2) -> Rect {
        Rect::from_center(
            pos,
            Vec2::new(self.settings.alien_width, self.settings.alien_height),
        )
    }

    /// First alive alien (row-major) whose box overlaps `rect`
    pub fn first_hit(&self, rect: &Rect) -> Option<(usize, usize)> {
        self.iter_alive()
            .find(|(_, _, a)| self.alien_rect(a.pos).overlaps(rect))
            .map(|(row, col, _)| (row, col))
    }

    /// Lowest lower edge over alive aliens
    pub fn lowest_edge(&self) -> Option<f32> {
        let half = self.settings.alien_height / 2.0;
        self.iter_alive()
            .map(|(_, _, a)| a.pos.y - half)
            .reduce(f32::min)
    }

    /// Accumulate time and take at most one step
    ///
    /// Returns the kind of step taken, if any. An empty formation never steps.
    pub fn step(&mut self, dt: f32) -> Option<StepKind> {
        if self.is_empty() {
            return None;
        }

        self.elapsed += sanitize_dt(dt);
        if self.elapsed <= self.step_interval {
            return None;
        }

        let kind = self.march();
        self.elapsed = 0.0;
        Some(kind)
    }

    /// One discrete step, regardless of accumulated time
    fn march(&mut self) -> StepKind {
        let margin = self.settings.formation_margin();
        let xs = self.aliens.iter().filter(|a| a.alive).map(|a| a.pos.x);

        let breached = match self.direction {
            Direction::Right => xs
                .reduce(f32::max)
                .is_some_and(|max_x| max_x >= self.settings.game_width - margin),
            Direction::Left => xs.reduce(f32::min).is_some_and(|min_x| min_x <= margin),
        };

        if breached {
            self.direction = self.direction.reversed();
            let drop = self.settings.alien_v_walk;
            for alien in self.aliens.iter_mut().filter(|a| a.alive) {
                alien.pos.y -= drop;
            }
            log::debug!("formation reversed to {:?}", self.direction);
            StepKind::Descend
        } else {
            let walk = self.settings.alien_h_walk * self.direction.sign();
            for alien in self.aliens.iter_mut().filter(|a| a.alive) {
                alien.pos.x += walk;
            }
            StepKind::March
        }
    }
}
