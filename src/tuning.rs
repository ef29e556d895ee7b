//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a page can
//! override them with a JSON block without recompiling. Missing fields fall
//! back to the defaults below.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Errors raised while loading a tuning document
#[derive(Debug)]
pub enum TuningError {
    /// The document is not valid JSON for `Tuning`
    Parse(serde_json::Error),
    /// A value is outside the range the simulation can run with
    Invalid(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "tuning parse error: {e}"),
            TuningError::Invalid(what) => write!(f, "invalid tuning: {what}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Session ===
    /// Match length in seconds
    pub match_duration_secs: u32,
    /// Periodic backfill runs when the countdown is a multiple of this
    pub spawn_every_secs: u32,

    // === Reload ===
    /// Full reload duration (ms)
    pub reload_ms: f64,
    /// Reload progress advances in sub-steps of this size (ms)
    pub reload_step_ms: f64,

    // === Targets ===
    /// Maximum simultaneous live targets
    pub capacity: usize,
    /// Speed a damaged target drops to (px/tick)
    pub hit_speed: f32,
    /// Extra distance past the far edge before a target is pruned
    pub exit_margin: f32,
    /// Delay before replacing a target that escaped (ms)
    pub escape_respawn_ms: f64,
    /// Delay before replacing a destroyed target (ms)
    pub kill_respawn_ms: f64,
    /// Spacing between the two spawns that follow a scene change (ms)
    pub scene_spawn_stagger_ms: f64,

    // === Scoring ===
    /// Max gap between consecutive kills that keeps a streak alive (ms)
    pub combo_window_ms: f64,
    /// Bonus per combo step above the first kill
    pub combo_bonus: u64,

    // === Projectiles ===
    /// Projectile speed (px/tick)
    pub projectile_speed: f32,
    /// Launcher height above the bottom edge
    pub launcher_offset: f32,

    // === Effects ===
    /// Particles per non-lethal hit
    pub hit_particles: usize,
    /// Particles per kill
    pub explosion_particles: usize,
    /// Upper bound on live particles
    pub max_particles: usize,
    /// Explosion radius growth (px/tick)
    pub explosion_growth: f32,
    /// Explosion opacity decay per tick
    pub explosion_fade: f32,
    /// Downward particle acceleration (px/tick²)
    pub particle_gravity: f32,
    /// Particle life decay per tick
    pub particle_decay: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            match_duration_secs: 120,
            spawn_every_secs: 3,

            reload_ms: 1000.0,
            reload_step_ms: 50.0,

            capacity: 5,
            hit_speed: 0.2,
            exit_margin: 100.0,
            escape_respawn_ms: 500.0,
            kill_respawn_ms: 1000.0,
            scene_spawn_stagger_ms: 500.0,

            combo_window_ms: 3000.0,
            combo_bonus: 10,

            projectile_speed: 15.0,
            launcher_offset: 50.0,

            hit_particles: 10,
            explosion_particles: 30,
            max_particles: 256,
            explosion_growth: 2.0,
            explosion_fade: 0.02,
            particle_gravity: 0.1,
            particle_decay: 0.02,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would stall or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        if self.match_duration_secs == 0 {
            return Err(TuningError::Invalid("match_duration_secs must be > 0"));
        }
        if self.spawn_every_secs == 0 {
            return Err(TuningError::Invalid("spawn_every_secs must be > 0"));
        }
        if self.capacity == 0 {
            return Err(TuningError::Invalid("capacity must be > 0"));
        }
        if !(self.reload_step_ms > 0.0 && self.reload_ms >= self.reload_step_ms) {
            return Err(TuningError::Invalid("reload_ms must be >= reload_step_ms > 0"));
        }
        if self.projectile_speed <= 0.0 {
            return Err(TuningError::Invalid("projectile_speed must be > 0"));
        }
        if self.combo_window_ms < 0.0 {
            return Err(TuningError::Invalid("combo_window_ms must be >= 0"));
        }
        if self.explosion_fade <= 0.0 || self.particle_decay <= 0.0 {
            return Err(TuningError::Invalid("effect decay rates must be > 0"));
        }
        Ok(())
    }

    /// Reload progress gained per sub-step (percent)
    pub fn reload_increment(&self) -> f32 {
        (100.0 / self.reload_ms * self.reload_step_ms) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let t = Tuning::default();
        assert!(t.validate().is_ok());
        assert!((t.reload_increment() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let t = Tuning::from_json(r#"{ "capacity": 8, "combo_bonus": 25 }"#).unwrap();
        assert_eq!(t.capacity, 8);
        assert_eq!(t.combo_bonus, 25);
        assert_eq!(t.match_duration_secs, 120);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Tuning::from_json(r#"{ "capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));

        let err = Tuning::from_json(r#"{ "reload_step_ms": 0.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = Tuning::from_json("{ capacity: ").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
        assert!(err.to_string().starts_with("tuning parse error"));
    }
}
