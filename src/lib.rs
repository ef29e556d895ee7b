//! Naval Strike - A timed naval shooting gallery
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, physics, collisions, scoring, session)
//! - `renderer`: WebGPU rendering of the procedural scene
//! - `audio`: Event-driven sound effects
//! - `hud`: Read-only view of the match for the DOM overlay
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod audio;
pub mod hud;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{QualityPreset, Settings};
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one animation frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default playfield when the canvas size is unknown (native demo)
    pub const DEFAULT_FIELD_WIDTH: f32 = 1280.0;
    pub const DEFAULT_FIELD_HEIGHT: f32 = 720.0;

    /// Maximum trail points kept per projectile
    pub const TRAIL_LENGTH: usize = 10;
}

/// An RGBA color in linear 0-1 floats
pub type Rgba = [f32; 4];

/// Build a color from a packed `0xRRGGBB` value
pub const fn hex(rgb: u32, alpha: f32) -> Rgba {
    [
        ((rgb >> 16) & 0xFF) as f32 / 255.0,
        ((rgb >> 8) & 0xFF) as f32 / 255.0,
        (rgb & 0xFF) as f32 / 255.0,
        alpha,
    ]
}

/// Convert HSL (hue in degrees, saturation/lightness 0-1) to RGBA
pub fn hsl(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Rgba {
    let h = hue.rem_euclid(360.0) / 60.0;
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    [r + m, g + m, b + m, alpha]
}

/// Unit direction from `from` toward `to`, or straight up (screen space) when they coincide
#[inline]
pub fn aim_direction(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    if delta.length_squared() < f32::EPSILON {
        Vec2::NEG_Y
    } else {
        delta.normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_unpacks_channels() {
        let c = hex(0xFF8000, 0.5);
        assert!((c[0] - 1.0).abs() < 1e-6);
        assert!((c[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c[2], 0.0);
        assert_eq!(c[3], 0.5);
    }

    #[test]
    fn test_hsl_primaries() {
        let red = hsl(0.0, 1.0, 0.5, 1.0);
        assert!((red[0] - 1.0).abs() < 1e-5 && red[1].abs() < 1e-5 && red[2].abs() < 1e-5);

        let green = hsl(120.0, 1.0, 0.5, 1.0);
        assert!(green[0].abs() < 1e-5 && (green[1] - 1.0).abs() < 1e-5);

        // Orange-ish fire hue used by kill bursts
        let fire = hsl(40.0, 1.0, 0.5, 1.0);
        assert!(fire[0] > fire[1] && fire[1] > fire[2]);
    }

    #[test]
    fn test_aim_direction_degenerate_points_up() {
        let p = Vec2::new(10.0, 10.0);
        assert_eq!(aim_direction(p, p), Vec2::NEG_Y);
        let d = aim_direction(Vec2::ZERO, Vec2::new(3.0, 4.0));
        assert!((d.length() - 1.0).abs() < 1e-6);
    }
}
