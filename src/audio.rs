//! Audio trigger dispatch
//!
//! The simulation never synthesizes or plays sound itself. It records
//! `GameEvent`s; this module maps them to named triggers and hands them to
//! whatever backend the host plugs in. Backend failures never reach the
//! simulation.

use std::fmt;

use crate::sim::GameEvent;

/// Sound effect triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Player fired
    Shoot,
    /// Enemy or ship destroyed
    Explosion,
    /// Power-up collected
    PowerUp,
    /// Boss entered the arena
    BossAppear,
    /// Boss took a hit
    BossHit,
    /// Boss destroyed
    BossDefeat,
}

impl SoundEffect {
    /// Stable trigger name handed to backends
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Explosion => "explosion",
            SoundEffect::PowerUp => "powerup",
            SoundEffect::BossAppear => "boss_appear",
            SoundEffect::BossHit => "boss_hit",
            SoundEffect::BossDefeat => "boss_defeat",
        }
    }

    /// Default mix level for this trigger
    pub fn base_volume(&self) -> f32 {
        match self {
            SoundEffect::Shoot => 0.3,
            SoundEffect::Explosion => 0.5,
            SoundEffect::PowerUp => 0.7,
            SoundEffect::BossHit => 0.4,
            SoundEffect::BossAppear | SoundEffect::BossDefeat => 0.8,
        }
    }

    /// Trigger for a simulation event, if it makes a sound
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Shoot => Some(SoundEffect::Shoot),
            GameEvent::EnemyDestroyed | GameEvent::PlayerHit | GameEvent::GameOver => {
                Some(SoundEffect::Explosion)
            }
            GameEvent::PowerUpCollected(_) => Some(SoundEffect::PowerUp),
            GameEvent::BossAppear => Some(SoundEffect::BossAppear),
            GameEvent::BossHit => Some(SoundEffect::BossHit),
            GameEvent::BossDefeat => Some(SoundEffect::BossDefeat),
            GameEvent::BossPhaseChanged(_) | GameEvent::ShieldBlocked => None,
        }
    }
}

/// Failure reported by an audio backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioError(pub String);

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "audio backend error: {}", self.0)
    }
}

impl std::error::Error for AudioError {}

/// Host-provided playback backend
pub trait AudioSink {
    /// Start playback of `effect` at `volume` (0.0 - 1.0) without blocking
    fn play(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;
}

/// Audio manager for the game
pub struct AudioManager {
    sink: Option<Box<dyn AudioSink>>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    failures: u32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl AudioManager {
    pub fn new(sink: Box<dyn AudioSink>) -> Self {
        Self {
            sink: Some(sink),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            failures: 0,
        }
    }

    /// Manager with no backend (audio unavailable)
    pub fn silent() -> Self {
        Self {
            sink: None,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            failures: 0,
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

    /// Number of swallowed backend failures
    pub fn failures(&self) -> u32 {
        self.failures
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume() * effect.base_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(sink) = self.sink.as_mut() else { return };

        if let Err(err) = sink.play(effect, vol) {
            self.failures += 1;
            log::warn!("Dropping '{}' trigger: {}", effect.name(), err);
        }
    }

    /// Play the triggers for one tick's events, in order
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}
