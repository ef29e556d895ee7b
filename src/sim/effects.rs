//! Hit and kill feedback: particle bursts and explosion rings

use glam::Vec2;
use rand::Rng;

use super::state::{Explosion, Particle, World};
use crate::tuning::Tuning;
use crate::{Rgba, hsl};

/// Scatter debris in random directions, tinted with the target's color
pub fn hit_burst(world: &mut World, pos: Vec2, color: Rgba, tuning: &Tuning, rng: &mut impl Rng) {
    for _ in 0..tuning.hit_particles {
        let angle = rng.random::<f32>() * std::f32::consts::TAU;
        let speed = rng.random_range(1.0f32..4.0);
        world.push_particle(
            Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                life: 1.0,
                size: rng.random_range(2.0f32..5.0),
                color,
            },
            tuning.max_particles,
        );
    }
}

/// Expanding ring plus an even ring of fire-colored debris
pub fn explosion(world: &mut World, pos: Vec2, size: f32, tuning: &Tuning, rng: &mut impl Rng) {
    world.explosions.push(Explosion {
        pos,
        radius: size,
        opacity: 1.0,
    });

    let count = tuning.explosion_particles;
    for i in 0..count {
        let angle = std::f32::consts::TAU * i as f32 / count as f32;
        let speed = rng.random_range(2.0f32..6.0);
        let hue = rng.random_range(10.0f32..70.0);
        world.push_particle(
            Particle {
                pos,
                vel: Vec2::from_angle(angle) * speed,
                life: 1.0,
                size: rng.random_range(3.0f32..8.0),
                color: hsl(hue, 1.0, 0.5, 1.0),
            },
            tuning.max_particles,
        );
    }
}
