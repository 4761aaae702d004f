//! Sound cues
//!
//! The simulation only names cues; playback lives behind the audio sink. On
//! the web the cues are procedurally generated with the Web Audio API - no
//! asset files needed.

use crate::sim::GameEvent;

/// Sound cue types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Brick destroyed
    BrickHit,
    /// Power-up caught
    PowerUp,
    /// Field cleared, next level
    LevelUp,
    /// Out of lives
    GameOver,
}

impl SoundCue {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::BrickDestroyed { .. } => Some(SoundCue::BrickHit),
            GameEvent::PowerUpCollected(_) => Some(SoundCue::PowerUp),
            GameEvent::LevelUp { .. } | GameEvent::Victory => Some(SoundCue::LevelUp),
            GameEvent::GameOver => Some(SoundCue::GameOver),
            _ => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::SoundCue;

    /// Web Audio synthesizer for the four cues
    pub struct AudioManager {
        ctx: Option<AudioContext>,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // May fail outside a secure context
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Fire and forget; failures are ignored
        pub fn play(&self, cue: SoundCue, vol: f32) {
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Browsers keep the context suspended until a user gesture
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            match cue {
                SoundCue::BrickHit => self.play_brick_hit(ctx, vol),
                SoundCue::PowerUp => self.play_power_up(ctx, vol),
                SoundCue::LevelUp => self.play_level_up(ctx, vol),
                SoundCue::GameOver => self.play_game_over(ctx, vol),
            }
        }

        /// Oscillator routed through its own gain envelope
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

        /// Play a short run of notes, `step` seconds apart
        fn arpeggio(
            &self,
            ctx: &AudioContext,
            vol: f32,
            notes: &[f32],
            step: f64,
            hold: f64,
            osc_type: OscillatorType,
        ) {
            for (i, freq) in notes.iter().enumerate() {
                let Some((osc, gain)) = self.create_osc(ctx, *freq, osc_type) else {
                    continue;
                };
                let t = ctx.current_time() + i as f64 * step;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + hold)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + hold + 0.1).ok();
            }
        }

        /// Brick hit - bright tick with a falling tail
        fn play_brick_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 660.0, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.frequency().set_value_at_time(660.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(330.0, t + 0.08)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Power-up - quick rising chime
        fn play_power_up(&self, ctx: &AudioContext, vol: f32) {
            self.arpeggio(ctx, vol, &[600.0, 800.0, 1000.0], 0.08, 0.15, OscillatorType::Sine);
        }

        /// Level up - fanfare
        fn play_level_up(&self, ctx: &AudioContext, vol: f32) {
            self.arpeggio(
                ctx,
                vol,
                &[400.0, 500.0, 600.0, 800.0],
                0.1,
                0.4,
                OscillatorType::Triangle,
            );
        }

        /// Game over - sad descending
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            self.arpeggio(
                ctx,
                vol,
                &[400.0, 350.0, 300.0, 200.0],
                0.2,
                0.3,
                OscillatorType::Sine,
            );
        }
    }
}
