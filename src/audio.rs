//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, BiquadFilterType, GainNode, OscillatorNode, OscillatorType};

use crate::sim::FoodKind;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Normal food eaten
    EatNormal,
    /// Gold food eaten
    EatGold,
    /// Snake crashed
    Death,
}

impl From<FoodKind> for SoundEffect {
    fn from(kind: FoodKind) -> Self {
        match kind {
            FoodKind::Normal => SoundEffect::EatNormal,
            FoodKind::Gold => SoundEffect::EatGold,
        }
    }
}

/// Audio manager for the game
///
/// The context is created lazily on the first user gesture, since browsers
/// refuse to start audio before one.
#[derive(Default)]
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
}

impl AudioManager {
    pub fn new(volume: f32) -> Self {
        Self { ctx: None, volume }
    }

    /// Create or resume the context (call from input handlers)
    pub fn ensure(&mut self) {
        if self.ctx.is_none() {
            self.ctx = AudioContext::new().ok();
            if self.ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
        }
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Set effective volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        match effect {
            SoundEffect::EatNormal => self.play_eat_normal(ctx, self.volume),
            SoundEffect::EatGold => self.play_eat_gold(ctx, self.volume),
            SoundEffect::Death => self.play_death(ctx, self.volume),
        };
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
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

    /// Short gain blip: attack to `peak` after `attack` s, decay by `end` s
    fn envelope(gain: &GainNode, t: f64, peak: f32, attack: f64, end: f64) -> Option<()> {
        gain.gain().set_value_at_time(0.0001, t).ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(peak, t + attack)
            .ok()?;
        gain.gain()
            .exponential_ramp_to_value_at_time(0.0001, t + end)
            .ok()?;
        Some(())
    }

    /// Normal food - rising triangle chirp
    fn play_eat_normal(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        let (osc, gain) = self.create_osc(ctx, 650.0, OscillatorType::Triangle)?;
        let t = ctx.current_time();

        osc.frequency().set_value_at_time(650.0, t).ok()?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(900.0, t + 0.06)
            .ok()?;
        Self::envelope(&gain, t, vol * 0.12, 0.01, 0.09)?;

        osc.start().ok()?;
        osc.stop_with_when(t + 0.10).ok()
    }

    /// Gold food - two-note sine chime
    fn play_eat_gold(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        let t = ctx.current_time();

        let (osc1, gain1) = self.create_osc(ctx, 880.0, OscillatorType::Sine)?;
        Self::envelope(&gain1, t, vol * 0.13, 0.01, 0.10)?;
        osc1.start().ok()?;
        osc1.stop_with_when(t + 0.12).ok()?;

        let (osc2, gain2) = self.create_osc(ctx, 1320.0, OscillatorType::Sine)?;
        Self::envelope(&gain2, t + 0.06, vol * 0.11, 0.01, 0.10)?;
        osc2.start_with_when(t + 0.06).ok()?;
        osc2.stop_with_when(t + 0.18).ok()
    }

    /// Death - falling square buzz through a lowpass
    fn play_death(&self, ctx: &AudioContext, vol: f32) -> Option<()> {
        let t = ctx.current_time();
        let osc = ctx.create_oscillator().ok()?;
        let filter = ctx.create_biquad_filter().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Square);
        osc.frequency().set_value_at_time(220.0, t).ok()?;
        osc.frequency()
            .exponential_ramp_to_value_at_time(110.0, t + 0.22)
            .ok()?;

        filter.set_type(BiquadFilterType::Lowpass);
        filter.frequency().set_value_at_time(700.0, t).ok()?;

        Self::envelope(&gain, t, vol * 0.15, 0.02, 0.28)?;

        osc.connect_with_audio_node(&filter).ok()?;
        filter.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        osc.start().ok()?;
        osc.stop_with_when(t + 0.30).ok()
    }
}
