//! Game settings and preferences
//!
//! Player-facing presentation options, kept in LocalStorage. Nothing about a
//! match in progress is ever stored here.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    /// Phones and weak GPUs
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 96,
            QualityPreset::Medium => 256,
            QualityPreset::High => 512,
        }
    }

    /// Particles per hit burst
    pub fn hit_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 5,
            QualityPreset::Medium | QualityPreset::High => 10,
        }
    }

    /// Particles per kill explosion
    pub fn explosion_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 15,
            QualityPreset::Medium | QualityPreset::High => 30,
        }
    }

    /// Segments used for circles
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 16,
            QualityPreset::Medium => 24,
            QualityPreset::High => 40,
        }
    }

    /// Whether to draw the animated wave lines
    pub fn waves_enabled(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,

    // === Visual Effects ===
    /// Projectile trails
    pub trails: bool,
    /// Particle effects (hit sparks, explosion debris)
    pub particles: bool,
    /// Animated wave lines on the surface
    pub waves: bool,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    pub muted: bool,

    // === Accessibility ===
    /// Reduced motion (freezes the wave animation)
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,

            // Visual effects - all on by default
            trails: true,
            particles: true,
            waves: true,

            // Audio
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,

            // Accessibility
            reduced_motion: false,
        }
    }
}

impl Settings {
    /// Create settings from a quality preset (applies preset defaults)
    pub fn from_preset(preset: QualityPreset) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(preset);
        settings
    }

    /// Apply a quality preset (updates quality-dependent settings)
    pub fn apply_preset(&mut self, preset: QualityPreset) {
        self.quality = preset;
        if !preset.waves_enabled() {
            self.waves = false;
        }
    }

    /// Effective wave animation (respects reduced_motion)
    pub fn animate_waves(&self) -> bool {
        self.waves && !self.reduced_motion
    }

    /// Effective particle count cap
    pub fn max_particles(&self) -> usize {
        if !self.particles {
            0
        } else {
            self.quality.max_particles()
        }
    }

    /// Fold the visual budget into the balance table. Particle counts are
    /// cosmetic, so this never changes how a match plays out.
    pub fn apply_to(&self, tuning: &mut Tuning) {
        tuning.max_particles = self.max_particles();
        tuning.hit_particles = tuning.hit_particles.min(self.quality.hit_particles());
        tuning.explosion_particles = tuning
            .explosion_particles
            .min(self.quality.explosion_particles());
    }

    /// LocalStorage key
    const STORAGE_KEY: &'static str = "naval_strike_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_preset_halves_particles() {
        let settings = Settings::from_preset(QualityPreset::Low);
        assert!(!settings.waves);
        let mut tuning = Tuning::default();
        settings.apply_to(&mut tuning);
        assert_eq!(tuning.hit_particles, 5);
        assert_eq!(tuning.explosion_particles, 15);
        assert_eq!(tuning.max_particles, 96);
    }

    #[test]
    fn test_particles_off_zeroes_cap() {
        let settings = Settings {
            particles: false,
            ..Settings::default()
        };
        let mut tuning = Tuning::default();
        settings.apply_to(&mut tuning);
        assert_eq!(tuning.max_particles, 0);
        // Gameplay values untouched
        assert_eq!(tuning.capacity, Tuning::default().capacity);
    }

    #[test]
    fn test_reduced_motion_stops_waves() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        assert!(settings.waves);
        assert!(!settings.animate_waves());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"quality":"High","muted":true}"#).unwrap();
        assert_eq!(settings.quality, QualityPreset::High);
        assert!(settings.muted);
        assert!(settings.trails);
        assert_eq!(QualityPreset::parse("med"), Some(QualityPreset::Medium));
    }
}
