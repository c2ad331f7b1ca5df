//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and background music - no external
//! files needed. Every call degrades to silence on failure; the simulation
//! never depends on audio working.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Upward impulse applied
    Flap,
    /// Obstacle cleared
    Score,
    /// Run ended
    GameOver,
}

/// Looping background melody (C major arpeggio up and back), one note per
/// step, scheduled ahead on the audio clock
const MELODY_HZ: [f32; 8] = [261.63, 329.63, 392.0, 523.25, 392.0, 329.63, 293.66, 349.23];
const NOTE_SECS: f64 = 0.25;
/// How far ahead of the audio clock to keep notes queued
const MUSIC_LOOKAHEAD_SECS: f64 = 0.3;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    sfx_volume: f32,
    music_volume: f32,
    muted: bool,
    music_playing: bool,
    next_note_time: f64,
    note_index: usize,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.5,
            muted: false,
            music_playing: false,
            next_note_time: 0.0,
            note_index: 0,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
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

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Toggle background music; returns whether it is now playing
    pub fn toggle_music(&mut self) -> bool {
        self.music_playing = !self.music_playing;
        if self.music_playing {
            self.resume();
            // Restart scheduling from "now"
            self.next_note_time = 0.0;
            self.note_index = 0;
        }
        self.music_playing
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    /// Get effective SFX volume
    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Keep the background melody queued ahead of the audio clock.
    /// Call once per frame; cheap when nothing needs scheduling.
    pub fn schedule_music(&mut self) {
        if !self.music_playing {
            return;
        }
        let vol = if self.muted {
            0.0
        } else {
            self.master_volume * self.music_volume
        };
        let Some(ctx) = &self.ctx else { return };

        let now = ctx.current_time();
        if self.next_note_time < now {
            self.next_note_time = now;
        }

        while self.next_note_time < now + MUSIC_LOOKAHEAD_SECS {
            let freq = MELODY_HZ[self.note_index % MELODY_HZ.len()];
            let t = self.next_note_time;
            if vol > 0.0 {
                if let Some((osc, gain)) = create_osc(ctx, freq, OscillatorType::Triangle) {
                    gain.gain().set_value_at_time(vol * 0.12, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + NOTE_SECS * 0.9)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + NOTE_SECS).ok();
                }
            }
            self.note_index = (self.note_index + 1) % MELODY_HZ.len();
            self.next_note_time += NOTE_SECS;
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Flap => play_flap(ctx, vol),
            SoundEffect::Score => play_score(ctx, vol),
            SoundEffect::GameOver => play_game_over(ctx, vol),
        }
    }
}

// === Sound generators ===

/// Create an oscillator with gain envelope
fn create_osc(
    ctx: &AudioContext,
    freq: f32,
    osc_type: OscillatorType,
) -> Option<(OscillatorNode, GainNode)> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(osc_type);
    osc.frequency().set_value(freq);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    Some((osc, gain))
}

/// Flap - quick rising chirp
fn play_flap(ctx: &AudioContext, vol: f32) {
    let Some((osc, gain)) = create_osc(ctx, 400.0, OscillatorType::Sine) else {
        return;
    };
    let t = ctx.current_time();

    gain.gain().set_value_at_time(vol * 0.3, t).ok();
    gain.gain()
        .exponential_ramp_to_value_at_time(0.01, t + 0.12)
        .ok();
    osc.frequency().set_value_at_time(400.0, t).ok();
    osc.frequency()
        .exponential_ramp_to_value_at_time(800.0, t + 0.08)
        .ok();

    osc.start().ok();
    osc.stop_with_when(t + 0.15).ok();
}

/// Score - happy two-note ding
fn play_score(ctx: &AudioContext, vol: f32) {
    for (i, freq) in [660.0, 880.0].iter().enumerate() {
        let delay = i as f64 * 0.09;
        if let Some((osc, gain)) = create_osc(ctx, *freq, OscillatorType::Sine) {
            let t = ctx.current_time() + delay;
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();
            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.2).ok();
        }
    }
}

/// Game over - sad descending sweep with a thump
fn play_game_over(ctx: &AudioContext, vol: f32) {
    let t = ctx.current_time();

    if let Some((osc, gain)) = create_osc(ctx, 400.0, OscillatorType::Sawtooth) {
        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.5)
            .ok();
        osc.frequency().set_value_at_time(400.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(80.0, t + 0.45)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + 0.55).ok();
    }

    // Bass thump
    if let Some((osc, gain)) = create_osc(ctx, 70.0, OscillatorType::Sine) {
        gain.gain().set_value_at_time(vol * 0.35, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.2)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + 0.25).ok();
    }
}
