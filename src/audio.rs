//! Sound effect routing
//!
//! Game events map to [`SoundEffect`]s; the [`AudioMixer`] applies volume,
//! mute and throttling, then hands them to whatever [`AudioSink`] the platform
//! provides. Playback is fire-and-forget.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Minimum gap between two pickup sounds
pub const DOT_SOUND_INTERVAL_MS: u64 = 300;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Small pickup or power pellet eaten
    EatDot,
    /// Frightened ghost captured
    EatGhost,
    /// Player caught
    Death,
    /// Ready countdown starts
    LevelStart,
    /// Board cleared
    LevelWin,
    /// Run ended
    GameOver,
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::EatDot => "eat_dot",
            SoundEffect::EatGhost => "eat_ghost",
            SoundEffect::Death => "death",
            SoundEffect::LevelStart => "level_start",
            SoundEffect::LevelWin => "level_win",
            SoundEffect::GameOver => "game_over",
        }
    }
}

/// Sound for a game event, if it has one
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::DotEaten | GameEvent::PowerPelletEaten => Some(SoundEffect::EatDot),
        GameEvent::GhostEaten { .. } => Some(SoundEffect::EatGhost),
        GameEvent::PlayerCaught { .. } => Some(SoundEffect::Death),
        GameEvent::LevelStarted { .. } => Some(SoundEffect::LevelStart),
        GameEvent::LevelWon { .. } | GameEvent::GameComplete { .. } => Some(SoundEffect::LevelWin),
        GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
        GameEvent::PowerExpired => None,
    }
}

/// Platform playback backend
pub trait AudioSink {
    /// Start playing `effect` at `volume` (0.0 - 1.0) and return immediately
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Sink that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {} @ {:.2}", effect.name(), volume);
    }
}

/// Audio manager for the game
pub struct AudioMixer<S: AudioSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    last_dot_ms: Option<u64>,
}

impl<S: AudioSink> AudioMixer<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            last_dot_ms: None,
        }
    }

    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        let mut mixer = Self::new(sink);
        mixer.set_master_volume(settings.master_volume);
        mixer.set_sfx_volume(settings.sfx_volume);
        mixer.set_muted(settings.muted);
        mixer
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

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play the sound for `event`, if any. Returns what was played.
    pub fn notify(&mut self, event: &GameEvent, now_ms: u64) -> Option<SoundEffect> {
        let effect = sound_for(event)?;

        if effect == SoundEffect::EatDot {
            if let Some(last) = self.last_dot_ms {
                if now_ms.saturating_sub(last) < DOT_SOUND_INTERVAL_MS {
                    return None;
                }
            }
            self.last_dot_ms = Some(now_ms);
        }

        let vol = self.effective_volume();
        if vol <= 0.0 {
            return None;
        }
        self.sink.play(effect, vol);
        Some(effect)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::EntityKind;

    #[derive(Default)]
    struct Recorder(Vec<(SoundEffect, f32)>);

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            self.0.push((effect, volume));
        }
    }

    #[test]
    fn test_event_mapping() {
        assert_eq!(sound_for(&GameEvent::DotEaten), Some(SoundEffect::EatDot));
        assert_eq!(
            sound_for(&GameEvent::GhostEaten {
                kind: EntityKind::Chaser,
                points: 200
            }),
            Some(SoundEffect::EatGhost)
        );
        assert_eq!(sound_for(&GameEvent::PlayerCaught { lives_left: 1 }), Some(SoundEffect::Death));
        assert_eq!(sound_for(&GameEvent::GameOver { score: 0 }), Some(SoundEffect::GameOver));
        assert_eq!(sound_for(&GameEvent::PowerExpired), None);
    }

    #[test]
    fn test_dot_sound_is_throttled() {
        let mut mixer = AudioMixer::new(Recorder::default());
        assert!(mixer.notify(&GameEvent::DotEaten, 1_000).is_some());
        assert!(mixer.notify(&GameEvent::DotEaten, 1_100).is_none());
        assert!(mixer.notify(&GameEvent::PowerPelletEaten, 1_299).is_none());
        assert!(mixer.notify(&GameEvent::DotEaten, 1_300).is_some());
        // Other sounds aren't throttled
        assert!(mixer.notify(&GameEvent::PlayerCaught { lives_left: 2 }, 1_301).is_some());
        assert_eq!(mixer.sink().0.len(), 3);
    }

    #[test]
    fn test_muted_plays_nothing() {
        let settings = Settings {
            muted: true,
            ..Default::default()
        };
        let mut mixer = AudioMixer::from_settings(Recorder::default(), &settings);
        assert!(mixer.notify(&GameEvent::LevelWon { level: 1 }, 0).is_none());
        assert!(mixer.sink().0.is_empty());
    }

    #[test]
    fn test_volume_from_settings() {
        let settings = Settings {
            master_volume: 0.5,
            sfx_volume: 0.5,
            ..Default::default()
        };
        let mut mixer = AudioMixer::from_settings(Recorder::default(), &settings);
        mixer.notify(&GameEvent::LevelStarted { level: 1 }, 0);
        let (effect, vol) = mixer.sink().0[0];
        assert_eq!(effect, SoundEffect::LevelStart);
        assert!((vol - 0.25).abs() < f32::EPSILON);
    }
}
