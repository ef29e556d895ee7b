//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Sounds are chosen from simulation events; the manager itself only exists
//! in browser builds.

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SoundEffect {
    /// Projectile launched
    Fire,
    /// Projectile struck a target
    Hit,
    /// Target sunk
    Kill,
    /// Combo extended; pitch rises with the streak
    ComboStep(u32),
    /// Countdown ran out
    MatchEnd,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn from_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Fired { .. } => Some(SoundEffect::Fire),
            GameEvent::Hit { .. } => Some(SoundEffect::Hit),
            GameEvent::Destroyed { .. } => Some(SoundEffect::Kill),
            GameEvent::ComboStep { combo } => Some(SoundEffect::ComboStep(*combo)),
            GameEvent::MatchEnded { .. } => Some(SoundEffect::MatchEnd),
            GameEvent::Escaped { .. } | GameEvent::SceneChanged { .. } => None,
        }
    }
}

/// Chime frequency for a combo of `combo` (Hz)
pub fn combo_pitch(combo: u32) -> f32 {
    440.0 * (1.0 + combo as f32 * 0.1)
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, combo_pitch};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        sfx_volume: f32,
        muted: bool,
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
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Pick up volume and mute from settings
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.master_volume = settings.master_volume.clamp(0.0, 1.0);
            self.sfx_volume = settings.sfx_volume.clamp(0.0, 1.0);
            self.muted = settings.muted;
        }

        fn effective_volume(&self) -> f32 {
            if self.muted {
                0.0
            } else {
                self.master_volume * self.sfx_volume
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
                SoundEffect::Fire => self.play_fire(ctx, vol),
                SoundEffect::Hit => self.play_hit(ctx, vol),
                SoundEffect::Kill => self.play_explosion(ctx, vol),
                SoundEffect::ComboStep(combo) => self.play_combo(ctx, vol, combo),
                SoundEffect::MatchEnd => self.play_match_end(ctx, vol),
            }
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

        /// Launch - falling chirp
        fn play_fire(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 800.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.1)
                .ok();
            osc.frequency().set_value_at_time(800.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(200.0, t + 0.1)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }

        /// Hit - gritty thud
        fn play_hit(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 300.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(300.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(100.0, t + 0.2)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        /// Explosion - boom!
        fn play_explosion(&self, ctx: &AudioContext, vol: f32) {
            let t = ctx.current_time();

            if let Some((osc, gain)) = self.create_osc(ctx, 100.0, OscillatorType::Sawtooth) {
                gain.gain().set_value_at_time(vol * 0.4, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                    .ok();
                osc.frequency().set_value_at_time(100.0, t).ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(30.0, t + 0.5)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.5).ok();
            }

            // Splash crack on top
            if let Some((osc, gain)) = self.create_osc(ctx, 1000.0, OscillatorType::Square) {
                gain.gain().set_value_at_time(vol * 0.15, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                    .ok();
                osc.frequency()
                    .exponential_ramp_to_value_at_time(100.0, t + 0.12)
                    .ok();
                osc.start().ok();
                osc.stop_with_when(t + 0.15).ok();
            }
        }

        /// Combo - sine chime, higher for longer streaks
        fn play_combo(&self, ctx: &AudioContext, vol: f32, combo: u32) {
            let freq = combo_pitch(combo);
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.2, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        /// Match over - descending tones
        fn play_match_end(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [440.0, 349.0, 262.0].iter().enumerate() {
                let delay = i as f64 * 0.18;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Scene, TargetKind};
    use glam::Vec2;

    #[test]
    fn test_events_map_to_sounds() {
        let hit = GameEvent::Hit {
            kind: TargetKind::Frigate,
            pos: Vec2::ZERO,
        };
        assert_eq!(SoundEffect::from_event(&hit), Some(SoundEffect::Hit));
        assert_eq!(
            SoundEffect::from_event(&GameEvent::ComboStep { combo: 3 }),
            Some(SoundEffect::ComboStep(3))
        );
        assert_eq!(
            SoundEffect::from_event(&GameEvent::SceneChanged {
                scene: Scene::Underwater
            }),
            None
        );
        assert_eq!(
            SoundEffect::from_event(&GameEvent::Escaped {
                kind: TargetKind::Carrier
            }),
            None
        );
    }

    #[test]
    fn test_combo_pitch_rises() {
        assert!((combo_pitch(2) - 528.0).abs() < 1e-3);
        assert!(combo_pitch(5) > combo_pitch(4));
    }
}
