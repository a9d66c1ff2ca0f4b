//! Audio cue mapping
//!
//! The simulation only emits cues. This module turns them into procedural
//! tone descriptions and hands those to whatever backend can play them.

use crate::settings::Settings;
use crate::sim::{Cue, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top or bottom wall
    WallHit,
    /// Ball touches a flower or the center target
    FlowerHit,
    /// Ball leaves the arena
    Score,
    /// Round finished
    GameOver,
}

impl From<Cue> for SoundEffect {
    fn from(cue: Cue) -> Self {
        match cue {
            Cue::PaddleHit => SoundEffect::PaddleHit,
            Cue::WallHit => SoundEffect::WallHit,
            Cue::FlowerHit => SoundEffect::FlowerHit,
            Cue::Score => SoundEffect::Score,
        }
    }
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
}

/// One enveloped oscillator note
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    pub waveform: Waveform,
    /// Start frequency (Hz)
    pub freq: f32,
    /// End frequency for a sweep (Hz)
    pub freq_end: f32,
    /// Delay from trigger (s)
    pub delay: f32,
    /// Length of the decay (s)
    pub duration: f32,
    /// Peak gain before volume is applied
    pub gain: f32,
}

impl Tone {
    const fn note(freq: f32, delay: f32, duration: f32, gain: f32) -> Self {
        Self {
            waveform: Waveform::Sine,
            freq,
            freq_end: freq,
            delay,
            duration,
            gain,
        }
    }
}

impl SoundEffect {
    /// Notes that make up this effect
    pub fn tones(&self) -> Vec<Tone> {
        match self {
            // Solid thump
            SoundEffect::PaddleHit => vec![Tone {
                freq_end: 60.0,
                ..Tone::note(150.0, 0.0, 0.1, 0.6)
            }],
            // Higher ping
            SoundEffect::WallHit => vec![Tone::note(400.0, 0.0, 0.08, 0.3)],
            // Rising chime
            SoundEffect::FlowerHit => [600.0, 800.0, 1000.0]
                .iter()
                .enumerate()
                .map(|(i, &freq)| Tone::note(freq, i as f32 * 0.08, 0.15, 0.25))
                .collect(),
            // Descending sweep
            SoundEffect::Score => vec![Tone {
                freq_end: 80.0,
                waveform: Waveform::Triangle,
                ..Tone::note(300.0, 0.0, 0.4, 0.4)
            }],
            SoundEffect::GameOver => [400.0, 350.0, 300.0, 200.0]
                .iter()
                .enumerate()
                .map(|(i, &freq)| Tone::note(freq, i as f32 * 0.2, 0.3, 0.3))
                .collect(),
        }
    }
}

/// Backend that can actually produce sound
pub trait ToneSink {
    /// Play `tone` at the given overall volume (0.0 - 1.0)
    fn play_tone(&mut self, tone: &Tone, volume: f32);
}

/// Sink that only logs what would be played
#[derive(Debug, Default)]
pub struct LogSink;

impl ToneSink for LogSink {
    fn play_tone(&mut self, tone: &Tone, volume: f32) {
        log::debug!(
            "tone {:?} {:.0}Hz->{:.0}Hz +{:.2}s for {:.2}s at {:.2}",
            tone.waveform,
            tone.freq,
            tone.freq_end,
            tone.delay,
            tone.duration,
            tone.gain * volume
        );
    }
}

/// Audio manager for the game
pub struct AudioManager<S: ToneSink> {
    sink: S,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl<S: ToneSink> AudioManager<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Take volumes and mute state from settings
    pub fn from_settings(sink: S, settings: &Settings) -> Self {
        let mut audio = Self::new(sink);
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
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

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        for tone in effect.tones() {
            self.sink.play_tone(&tone, vol);
        }
    }

    /// Play whatever the events of one tick call for
    pub fn handle_events(&mut self, events: &[GameEvent]) {
        for event in events {
            if let Some(cue) = event.cue() {
                self.play(cue.into());
            } else if matches!(event, GameEvent::GameOver { .. }) {
                self.play(SoundEffect::GameOver);
            }
        }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
