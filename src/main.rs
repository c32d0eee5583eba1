//! Alien Invaders headless driver
//!
//! Runs a scripted session against the simulation and logs what happens.
//! Usage: `alien-invaders [settings.json] [frames]`

use alien_invaders::renderer::ShapeBatch;
use alien_invaders::sim::{Game, GamePhase, TickInput};
use alien_invaders::{AudioManager, Settings};

/// Host frame time (60 Hz)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Frames to run when none are given
const DEFAULT_FRAMES: u32 = 60 * 120;

/// Scripted player: start, sweep back and forth, keep firing, resume after deaths
fn scripted_input(frame: u32, phase: GamePhase) -> TickInput {
    let pulse = frame % 2 == 0;
    match phase {
        GamePhase::Inactive | GamePhase::Complete => TickInput {
            start: pulse,
            ..Default::default()
        },
        GamePhase::Paused => TickInput {
            resume: pulse,
            ..Default::default()
        },
        GamePhase::NewWave | GamePhase::Active => {
            let sweep = (frame / 90) % 2 == 0;
            TickInput {
                left: sweep,
                right: !sweep,
                fire: true,
                ..Default::default()
            }
        }
    }
}

fn load_settings(path: Option<&str>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match Settings::load(path) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("{err}; using default settings");
            Settings::default()
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Alien Invaders (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = load_settings(args.next().as_deref());
    let frames = args
        .next()
        .and_then(|n| n.parse().ok())
        .unwrap_or(DEFAULT_FRAMES);

    let seed = 0x1A1E_5EED;
    let mut game = Game::new(settings, seed);
    let mut audio = AudioManager::new();
    let mut surface = ShapeBatch::new();
    let mut last_phase = game.phase();

    for frame in 0..frames {
        let input = scripted_input(frame, game.phase());
        game.update(FRAME_DT, &input, &mut audio);

        surface.clear();
        game.draw(&mut surface);

        if game.phase() != last_phase {
            last_phase = game.phase();
            let aliens = game.wave().map_or(0, |w| w.alien_count());
            log::info!(
                "frame {frame}: {:?}, {} lives, {} aliens, {} sprites",
                last_phase,
                game.lives(),
                aliens,
                surface.sprite_count()
            );
        }
    }

    println!(
        "Ran {} frames: {} waves started, phase {:?}, {} cues played",
        frames,
        game.waves_started(),
        game.phase(),
        audio.played()
    );
}
