//! Audio cue abstraction
//!
//! The simulation only names the cue it wants; playback belongs to whatever
//! sink the host plugs in. Muting withholds calls, it never touches state.

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fired a bolt
    PlayerShot,
    /// An alien fired a bolt
    AlienShot,
    /// Player bolt destroyed an alien
    AlienDestroyed,
    /// Alien bolt destroyed the ship
    ShipDestroyed,
}

impl SoundEffect {
    /// Asset name the host is expected to map this cue to
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::PlayerShot => "pew1.wav",
            SoundEffect::AlienShot => "pew2.wav",
            SoundEffect::AlienDestroyed | SoundEffect::ShipDestroyed => "blast1.wav",
        }
    }
}

/// Fire-and-forget cue player
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Sink that drops every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Audio manager for hosts without a real backend
///
/// Applies volume and mute, logs cues, and counts what was actually played.
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    played: u64,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Number of cues that passed the volume gate
    pub fn played(&self) -> u64 {
        self.played
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.played += 1;
        log::debug!("cue {:?} ({}) at volume {:.2}", effect, effect.asset(), vol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_manager_plays_nothing() {
        let mut audio = AudioManager::new();
        audio.play(SoundEffect::PlayerShot);
        assert_eq!(audio.played(), 1);

        audio.set_muted(true);
        audio.play(SoundEffect::AlienShot);
        assert_eq!(audio.played(), 1);

        audio.set_muted(false);
        audio.set_master_volume(0.0);
        audio.play(SoundEffect::ShipDestroyed);
        assert_eq!(audio.played(), 1);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut audio = AudioManager::new();
        audio.set_sfx_volume(4.0);
        audio.set_master_volume(-1.0);
        assert_eq!(audio.effective_volume(), 0.0);
        audio.set_master_volume(1.0);
        assert_eq!(audio.effective_volume(), 1.0);
    }
}
