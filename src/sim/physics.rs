//! Per-tick movement and pruning
//!
//! Motion is in pixels per tick; the caller runs this once per fixed step.
//! Entities are moved in place and then compacted with `retain`, so nothing
//! is removed while it is being scanned.

use super::state::{Field, TargetKind, World};
use crate::tuning::Tuning;

/// What happened during one physics step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    /// Targets that crossed the field unharmed and were pruned
    pub escaped: Vec<TargetKind>,
    /// Projectiles that left the field
    pub projectiles_lost: usize,
}

/// Advance every entity one tick
pub fn update(world: &mut World, field: Field, tuning: &Tuning) -> StepReport {
    let mut report = StepReport::default();

    // Projectiles fly straight; anything outside the field is gone before
    // collisions run, so off-screen shots never score.
    for projectile in &mut world.projectiles {
        projectile.advance();
    }
    let before = world.projectiles.len();
    world.projectiles.retain(|p| field.contains(p.pos));
    report.projectiles_lost = before - world.projectiles.len();

    for target in &mut world.targets {
        target.pos.x += target.direction * target.speed;
    }
    let margin = tuning.exit_margin;
    world.targets.retain(|t| {
        let gone = t.pos.x < -t.size - margin || t.pos.x > field.width + t.size + margin;
        if gone {
            report.escaped.push(t.kind);
        }
        !gone
    });

    for explosion in &mut world.explosions {
        explosion.radius += tuning.explosion_growth;
        explosion.opacity -= tuning.explosion_fade;
    }
    world.explosions.retain(|e| e.opacity > 0.0);

    for particle in &mut world.particles {
        particle.pos += particle.vel;
        particle.vel.y += tuning.particle_gravity;
        particle.life -= tuning.particle_decay;
    }
    world.particles.retain(|p| p.life > 0.0);

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Explosion, Particle, Projectile, Target};
    use glam::Vec2;

    fn field() -> Field {
        Field::new(800.0, 600.0)
    }

    #[test]
    fn test_projectile_pruned_when_leaving_field() {
        let tuning = Tuning::default();
        let mut world = World::new();
        world
            .projectiles
            .push(Projectile::aimed(1, Vec2::new(400.0, 5.0), Vec2::new(400.0, 0.0), 15.0));
        world
            .projectiles
            .push(Projectile::aimed(2, Vec2::new(400.0, 300.0), Vec2::new(400.0, 0.0), 15.0));
        let report = update(&mut world, field(), &tuning);
        assert_eq!(report.projectiles_lost, 1);
        assert_eq!(world.projectiles.len(), 1);
        assert_eq!(world.projectiles[0].id, 2);
        assert_eq!(world.projectiles[0].pos, Vec2::new(400.0, 285.0));
    }

    #[test]
    fn test_target_moves_and_escapes_far_edge() {
        let tuning = Tuning::default();
        let mut world = World::new();
        // Destroyer: size 60, speed 6, heading right
        let mut t = Target::new(1, TargetKind::Destroyer, Vec2::new(950.0, 200.0), 1.0);
        world.targets.push(t.clone());
        // 956 is still inside 800 + 60 + 100
        let report = update(&mut world, field(), &tuning);
        assert!(report.escaped.is_empty());
        assert_eq!(world.targets[0].pos.x, 956.0);

        // 962 is past it: gone on the next step
        let report = update(&mut world, field(), &tuning);
        assert_eq!(report.escaped, vec![TargetKind::Destroyer]);
        assert!(world.targets.is_empty());

        // A fresh spawn at the left edge is not pruned
        t.pos.x = -60.0;
        world.targets.push(t);
        assert!(update(&mut world, field(), &tuning).escaped.is_empty());
    }

    #[test]
    fn test_explosions_and_particles_age_out() {
        let tuning = Tuning::default();
        let mut world = World::new();
        world.explosions.push(Explosion {
            pos: Vec2::ZERO,
            radius: 60.0,
            opacity: 1.0,
        });
        world.particles.push(Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            life: 1.0,
            size: 3.0,
            color: [1.0; 4],
        });

        update(&mut world, field(), &tuning);
        assert_eq!(world.explosions[0].radius, 62.0);
        assert!((world.explosions[0].opacity - 0.98).abs() < 1e-6);
        assert_eq!(world.particles[0].pos, Vec2::new(1.0, 0.0));
        assert!((world.particles[0].vel.y - 0.1).abs() < 1e-6);

        for _ in 0..60 {
            update(&mut world, field(), &tuning);
        }
        assert!(world.explosions.is_empty());
        assert!(world.particles.is_empty());
    }
}
