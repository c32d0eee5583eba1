//! Game lifecycle state machine
//!
//! Sequences waves across a game: waiting for a start, creating a wave,
//! playing it, pausing after a lost life, and showing the wave result.
//! Transitions are a pure function of (phase, event); [`Game`] decides which
//! event happened this frame and performs the side effects of entering the
//! next phase.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::{Control, EdgeTracker, Pressed, TickInput};
use super::wave::Wave;
use crate::audio::AudioSink;
use crate::renderer::{Label, RenderSurface};
use crate::{Settings, sanitize_dt};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the player to start
    Inactive,
    /// A wave was just created; lasts one frame
    NewWave,
    /// Normal gameplay
    Active,
    /// Simulation frozen, wave still drawn
    Paused,
    /// Wave over, either cleared or lost
    Complete,
}

/// Something that can move the game to another phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Start pressed on the title screen
    Start,
    /// The freshly created wave is on screen
    WaveReady,
    /// The ship was destroyed but lives remain
    ShipLost,
    /// Pause pressed during play
    Pause,
    /// Resume pressed while paused
    Resume,
    /// Every alien destroyed
    WaveCleared,
    /// No lives left
    GameLost,
    /// The wave-complete message has been up long enough
    BreatherElapsed,
    /// Back to the title screen
    Reset,
}

/// Next phase for an event; events that do not apply leave the phase alone
pub fn transition(phase: GamePhase, event: PhaseEvent) -> GamePhase {
    use GamePhase::*;
    use PhaseEvent::*;

    match (phase, event) {
        (_, Reset) => Inactive,
        (Inactive, Start) => NewWave,
        (NewWave, WaveReady) => Active,
        (Active, ShipLost) | (Active, Pause) => Paused,
        (Active, WaveCleared) | (Active, GameLost) => Complete,
        (Paused, Resume) => Active,
        (Complete, BreatherElapsed) => NewWave,
        (phase, _) => phase,
    }
}

/// Top-level driver: one `update` and one `draw` per frame
#[derive(Debug)]
pub struct Game {
    settings: Settings,
    seed: u64,
    phase: GamePhase,
    /// Present in every phase except Inactive
    wave: Option<Wave>,
    /// Carried between waves; shrinks after each cleared wave
    step_interval: f32,
    /// Seconds the wave-complete message has been showing
    complete_timer: f32,
    /// None only while Active
    message: Option<Label>,
    edges: EdgeTracker,
    muted: bool,
    waves_started: u32,
}

impl Game {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut game = Self {
            settings,
            seed,
            phase: GamePhase::Inactive,
            wave: None,
            step_interval: settings.alien_speed,
            complete_timer: 0.0,
            message: None,
            edges: EdgeTracker::default(),
            muted: false,
            waves_started: 0,
        };
        game.enter(GamePhase::Inactive);
        game
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn wave(&self) -> Option<&Wave> {
        self.wave.as_ref()
    }

    /// Step interval the current (or next) wave marches at
    pub fn step_interval(&self) -> f32 {
        self.step_interval
    }

    /// Lives of the current wave; a full set on the title screen
    pub fn lives(&self) -> u8 {
        self.wave
            .as_ref()
            .map_or(self.settings.ship_lives, Wave::lives)
    }

    pub fn message(&self) -> Option<&Label> {
        self.message.as_ref()
    }

    /// Waves created since the game was constructed
    pub fn waves_started(&self) -> u32 {
        self.waves_started
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Advance one frame
    pub fn update(&mut self, dt: f32, input: &TickInput, audio: &mut dyn AudioSink) {
        let dt = sanitize_dt(dt);
        let pressed = self.edges.sample(input);

        if pressed.contains(Control::Mute) {
            self.toggle_mute();
        }

        match self.phase {
            GamePhase::Inactive => {
                if pressed.contains(Control::Start) {
                    self.apply(PhaseEvent::Start);
                }
            }
            GamePhase::NewWave => self.apply(PhaseEvent::WaveReady),
            GamePhase::Active => self.update_active(dt, input, pressed, audio),
            GamePhase::Paused => {
                if pressed.contains(Control::Resume) {
                    self.apply(PhaseEvent::Resume);
                }
            }
            GamePhase::Complete => self.update_complete(dt, pressed),
        }
    }

    /// Draw the wave (if any) and the current message
    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        if let Some(wave) = &self.wave {
            wave.draw(surface);
        }
        if let Some(label) = &self.message {
            surface.draw_label(label);
        }
    }

    fn update_active(
        &mut self,
        dt: f32,
        input: &TickInput,
        pressed: Pressed,
        audio: &mut dyn AudioSink,
    ) {
        let Some(wave) = self.wave.as_mut() else {
            log::warn!("active phase without a wave, resetting");
            self.apply(PhaseEvent::Reset);
            return;
        };

        wave.update(dt, input, audio);

        let mut event = None;
        if !wave.ship_alive() {
            wave.respawn_ship();
            event = Some(PhaseEvent::ShipLost);
        }

        if wave.lives() == 0 {
            event = Some(PhaseEvent::GameLost);
        } else if wave.alien_count() == 0 {
            event = Some(PhaseEvent::WaveCleared);
        } else if event.is_none() && pressed.contains(Control::Pause) {
            event = Some(PhaseEvent::Pause);
        }

        if let Some(event) = event {
            self.apply(event);
        }
    }

    fn update_complete(&mut self, dt: f32, pressed: Pressed) {
        let lost = self.wave.as_ref().is_none_or(|w| w.lives() == 0);
        if lost {
            if pressed.contains(Control::Start) {
                self.apply(PhaseEvent::Reset);
            }
            return;
        }

        self.complete_timer += dt;
        if self.complete_timer >= self.settings.complete_message_secs {
            self.step_interval /= self.settings.alien_speed_up;
            self.complete_timer = 0.0;
            self.apply(PhaseEvent::BreatherElapsed);
        }
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        if let Some(wave) = self.wave.as_mut() {
            wave.toggle_mute();
        }
    }

    fn apply(&mut self, event: PhaseEvent) {
        let next = transition(self.phase, event);
        if next == self.phase {
            return;
        }
        log::info!("{:?} --{:?}--> {:?}", self.phase, event, next);
        self.phase = next;
        self.enter(next);
    }

    /// Side effects of arriving in a phase
    fn enter(&mut self, phase: GamePhase) {
        let center = Vec2::new(self.settings.game_width, self.settings.game_height) / 2.0;

        match phase {
            GamePhase::Inactive => {
                self.wave = None;
                self.step_interval = self.settings.alien_speed;
                self.complete_timer = 0.0;
                self.message = Some(Label::new("Press 'X' to play", center, 50.0));
            }
            GamePhase::NewWave => {
                self.wave = Some(self.spawn_wave());
                self.message = Some(Label::new(
                    format!("Wave {}", self.waves_started),
                    center,
                    50.0,
                ));
            }
            GamePhase::Active => {
                self.message = None;
            }
            GamePhase::Paused => {
                let text = format!("{} lives remaining. Press 'R' to resume", self.lives());
                self.message = Some(Label::new(text, center, 40.0));
            }
            GamePhase::Complete => {
                self.message = Some(if self.lives() == 0 {
                    Label::new("Game over!", center, 60.0)
                } else {
                    Label::new("Wave complete! Prepare for next wave...", center, 35.0)
                });
            }
        }
    }

    fn spawn_wave(&mut self) -> Wave {
        self.waves_started += 1;
        let wave_seed = (self.waves_started as u64)
            .wrapping_mul(2654435761)
            .wrapping_add(self.seed);
        log::info!(
            "wave {} starting: interval {:.3}s, {} lives",
            self.waves_started,
            self.step_interval,
            self.settings.ship_lives
        );

        let mut wave = Wave::new(
            &self.settings,
            self.step_interval,
            self.settings.ship_lives,
            Box::new(Pcg32::seed_from_u64(wave_seed)),
        );
        if self.muted {
            wave.toggle_mute();
        }
        wave
    }

    #[cfg(test)]
    fn wave_mut(&mut self) -> Option<&mut Wave> {
        self.wave.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NullAudio;
    use crate::renderer::ShapeBatch;
    use crate::sim::state::Bolt;

    fn settings() -> Settings {
        Settings {
            alien_rows: 2,
            aliens_in_row: 3,
            ..Default::default()
        }
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn press(game: &mut Game, control: Control) {
        game.update(0.0, &idle(), &mut NullAudio);
        game.update(0.0, &TickInput::holding(control), &mut NullAudio);
    }

    /// Start a game and run until the first wave is active
    fn active_game() -> Game {
        let mut game = Game::new(settings(), 42);
        press(&mut game, Control::Start);
        assert_eq!(game.phase(), GamePhase::NewWave);
        game.update(0.0, &idle(), &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::Active);
        game
    }

    fn clear_wave(game: &mut Game) {
        let wave = game.wave_mut().unwrap();
        let (formation, _, _) = wave.parts_mut();
        for row in 0..formation.rows() {
            for col in 0..formation.cols() {
                formation.destroy(row, col);
            }
        }
    }

    fn shoot_ship(game: &mut Game) {
        let wave = game.wave_mut().unwrap();
        let (_, ship, bolts) = wave.parts_mut();
        let pos = ship.as_ref().unwrap().pos;
        bolts.push(Bolt::alien(pos + Vec2::new(0.0, 10.0), 10.0));
    }

    #[test]
    fn test_transition_table() {
        use GamePhase::*;
        use PhaseEvent::*;

        assert_eq!(transition(Inactive, Start), NewWave);
        assert_eq!(transition(Inactive, Pause), Inactive);
        assert_eq!(transition(NewWave, WaveReady), Active);
        assert_eq!(transition(Active, ShipLost), Paused);
        assert_eq!(transition(Active, Pause), Paused);
        assert_eq!(transition(Active, WaveCleared), Complete);
        assert_eq!(transition(Active, GameLost), Complete);
        assert_eq!(transition(Active, Start), Active);
        assert_eq!(transition(Paused, Resume), Active);
        assert_eq!(transition(Paused, Pause), Paused);
        assert_eq!(transition(Complete, BreatherElapsed), NewWave);
        assert_eq!(transition(Complete, Reset), Inactive);
        assert_eq!(transition(Active, Reset), Inactive);
    }

    #[test]
    fn test_starts_inactive_without_wave() {
        let game = Game::new(settings(), 1);
        assert_eq!(game.phase(), GamePhase::Inactive);
        assert!(game.wave().is_none());
        assert_eq!(game.message().unwrap().text, "Press 'X' to play");
    }

    #[test]
    fn test_start_needs_rising_edge() {
        let mut game = Game::new(settings(), 1);
        let start = TickInput::holding(Control::Start);
        game.update(0.016, &start, &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::NewWave);
        assert!(game.wave().is_some());

        game.update(0.016, &start, &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::Active);
        assert!(game.message().is_none());

        // Holding start does nothing more
        game.update(0.016, &start, &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.waves_started(), 1);
    }

    #[test]
    fn test_ship_loss_pauses_and_respawns() {
        let mut game = active_game();
        shoot_ship(&mut game);

        game.update(0.0, &idle(), &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::Paused);
        let wave = game.wave().unwrap();
        assert_eq!(wave.lives(), 2);
        assert!(wave.ship_alive());
        assert_eq!(wave.ship().unwrap().pos, settings().ship_spawn());
        assert!(wave.bolts().is_empty());
        assert_eq!(
            game.message().unwrap().text,
            "2 lives remaining. Press 'R' to resume"
        );

        press(&mut game, Control::Resume);
        assert_eq!(game.phase(), GamePhase::Active);
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut game = active_game();
        press(&mut game, Control::Pause);
        assert_eq!(game.phase(), GamePhase::Paused);

        let wave = game.wave().unwrap();
        let formation = wave.formation().clone();
        let ship = wave.ship().copied();
        let bolts = wave.bolts().to_vec();

        let all = TickInput {
            left: true,
            fire: true,
            start: true,
            pause: true,
            ..Default::default()
        };
        for i in 0..50 {
            let input = if i % 2 == 0 { all } else { idle() };
            game.update(5.0, &input, &mut NullAudio);
        }

        assert_eq!(game.phase(), GamePhase::Paused);
        let wave = game.wave().unwrap();
        assert_eq!(wave.formation(), &formation);
        assert_eq!(wave.ship().copied(), ship);
        assert_eq!(wave.bolts(), bolts.as_slice());
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut game = active_game();
        for expected in [2u8, 1] {
            shoot_ship(&mut game);
            game.update(0.0, &idle(), &mut NullAudio);
            assert_eq!(game.phase(), GamePhase::Paused);
            assert_eq!(game.lives(), expected);
            press(&mut game, Control::Resume);
        }

        shoot_ship(&mut game);
        game.update(0.0, &idle(), &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::Complete);
        assert_eq!(game.lives(), 0);
        assert_eq!(game.message().unwrap().text, "Game over!");

        // Stays on the game-over screen until start is pressed again
        for _ in 0..10 {
            game.update(10.0, &idle(), &mut NullAudio);
        }
        assert_eq!(game.phase(), GamePhase::Complete);

        press(&mut game, Control::Start);
        assert_eq!(game.phase(), GamePhase::Inactive);
        assert!(game.wave().is_none());
        assert_eq!(game.lives(), settings().ship_lives);
    }

    #[test]
    fn test_cleared_wave_speeds_up_once() {
        let mut game = active_game();
        let initial = game.step_interval();
        clear_wave(&mut game);

        game.update(0.0, &idle(), &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::Complete);
        assert_eq!(
            game.message().unwrap().text,
            "Wave complete! Prepare for next wave..."
        );

        // Message stays up for the configured time
        game.update(1.0, &idle(), &mut NullAudio);
        game.update(1.0, &idle(), &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::Complete);
        assert_eq!(game.step_interval(), initial);

        game.update(1.0, &idle(), &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::NewWave);
        let expected = initial / settings().alien_speed_up;
        assert_eq!(game.step_interval(), expected);
        assert_eq!(game.waves_started(), 2);

        let wave = game.wave().unwrap();
        assert_eq!(wave.alien_count(), 6);
        assert_eq!(wave.formation().step_interval(), expected);

        game.update(1.0, &idle(), &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::Active);
        assert_eq!(game.step_interval(), expected);
    }

    #[test]
    fn test_next_wave_starts_with_full_lives() {
        let mut game = active_game();
        shoot_ship(&mut game);
        game.update(0.0, &idle(), &mut NullAudio);
        assert_eq!(game.lives(), 2);
        press(&mut game, Control::Resume);

        clear_wave(&mut game);
        game.update(0.0, &idle(), &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::Complete);
        assert_eq!(game.lives(), 2);

        game.update(10.0, &idle(), &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::NewWave);
        assert_eq!(game.waves_started(), 2);
        assert_eq!(game.lives(), settings().ship_lives);
        assert!(game.wave().unwrap().ship_alive());
    }

    #[test]
    fn test_loss_resets_difficulty() {
        let mut game = active_game();
        let initial = game.step_interval();

        // Win one wave
        clear_wave(&mut game);
        game.update(0.0, &idle(), &mut NullAudio);
        game.update(10.0, &idle(), &mut NullAudio);
        game.update(0.0, &idle(), &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::Active);
        let faster = game.step_interval();
        assert!(faster < initial);

        // Lose the next one at the defense line
        {
            let wave = game.wave_mut().unwrap();
            let (formation, _, _) = wave.parts_mut();
            formation.get_mut(1, 0).unwrap().pos.y = 0.0;
        }
        game.update(0.0, &idle(), &mut NullAudio);
        assert_eq!(game.phase(), GamePhase::Complete);
        assert_eq!(game.lives(), 0);

        game.update(30.0, &idle(), &mut NullAudio);
        assert_eq!(game.step_interval(), faster);

        press(&mut game, Control::Start);
        assert_eq!(game.phase(), GamePhase::Inactive);
        assert_eq!(game.step_interval(), initial);

        press(&mut game, Control::Start);
        game.update(0.0, &idle(), &mut NullAudio);
        assert_eq!(game.wave().unwrap().formation().step_interval(), initial);
    }

    #[test]
    fn test_mute_carries_across_waves() {
        let mut game = active_game();
        press(&mut game, Control::Mute);
        assert!(game.is_muted());
        assert!(game.wave().unwrap().is_muted());

        clear_wave(&mut game);
        game.update(0.0, &idle(), &mut NullAudio);
        game.update(10.0, &idle(), &mut NullAudio);
        assert!(game.wave().unwrap().is_muted());
    }

    #[test]
    fn test_negative_dt_does_not_advance_message_timer() {
        let mut game = active_game();
        clear_wave(&mut game);
        game.update(0.0, &idle(), &mut NullAudio);
        for _ in 0..100 {
            game.update(-5.0, &idle(), &mut NullAudio);
        }
        assert_eq!(game.phase(), GamePhase::Complete);
    }

    #[test]
    fn test_draw_includes_message() {
        let mut game = Game::new(settings(), 3);
        let mut batch = ShapeBatch::new();
        game.draw(&mut batch);
        assert_eq!(batch.labels.len(), 1);
        assert_eq!(batch.sprite_count(), 0);

        press(&mut game, Control::Start);
        game.update(0.0, &idle(), &mut NullAudio);
        batch.clear();
        game.draw(&mut batch);
        assert!(batch.labels.is_empty());
        // 6 aliens and the ship
        assert_eq!(batch.sprite_count(), 7);
    }
}
