//! Scene assembly: turns a session snapshot into one triangle list
//!
//! Draw order, back to front: background, waves, targets, projectiles,
//! explosions, particles, launcher.

use glam::Vec2;

use super::shapes::{
    arc_band, circle, ellipse, fade, polyline, radial_gradient, rect, triangle, vertical_gradient,
};
use super::vertex::{Vertex, colors};
use crate::Rgba;
use crate::settings::Settings;
use crate::sim::{Explosion, Field, Particle, Projectile, Scene, Session, Target};

const LAUNCHER_BASE_RADIUS: f32 = 25.0;
const LAUNCHER_INNER_RADIUS: f32 = 18.0;
const HEALTH_BAR_HEIGHT: f32 = 5.0;
const WAVE_LINES: usize = 3;
const WAVE_SPACING: f32 = 100.0;
const WAVE_AMPLITUDE: f32 = 10.0;

/// Background gradient stops for a scene
pub fn background_stops(scene: Scene) -> [(f32, Rgba); 3] {
    match scene {
        Scene::Surface => [
            (0.0, colors::SURFACE_TOP),
            (0.5, colors::SURFACE_MID),
            (1.0, colors::SURFACE_BOTTOM),
        ],
        Scene::Underwater => [
            (0.0, colors::UNDERWATER_TOP),
            (0.5, colors::UNDERWATER_MID),
            (1.0, colors::UNDERWATER_BOTTOM),
        ],
    }
}

/// Health bar fill color for the remaining health fraction
pub fn health_color(fraction: f32) -> Rgba {
    if fraction > 0.5 {
        colors::HEALTH_HIGH
    } else if fraction > 0.25 {
        colors::HEALTH_MID
    } else {
        colors::HEALTH_LOW
    }
}

/// Build every vertex for one frame. `time` is wall-clock seconds and only
/// drives the wave animation.
pub fn build_frame(session: &Session, settings: &Settings, time: f64) -> Vec<Vertex> {
    let field = session.field();
    let scene = session.scene();
    let world = session.world();
    let segments = settings.quality.circle_segments();

    let mut out = vertical_gradient(
        Vec2::ZERO,
        Vec2::new(field.width, field.height),
        &background_stops(scene),
    );

    if settings.waves {
        let t = if settings.animate_waves() { time as f32 } else { 0.0 };
        waves(&mut out, field, scene, t);
    }

    for target in &world.targets {
        draw_target(&mut out, target, segments);
    }

    for projectile in &world.projectiles {
        draw_projectile(&mut out, projectile, settings.trails, segments);
    }

    for explosion in &world.explosions {
        draw_explosion(&mut out, explosion, segments);
    }

    if settings.particles {
        for particle in &world.particles {
            draw_particle(&mut out, particle);
        }
    }

    let reload = &session.match_state().reload;
    draw_launcher(
        &mut out,
        session.launcher(),
        reload.is_ready(),
        reload.progress(),
        segments,
    );

    out
}

fn waves(out: &mut Vec<Vertex>, field: Field, scene: Scene, time: f32) {
    let color = match scene {
        Scene::Surface => colors::WAVE_SURFACE,
        Scene::Underwater => colors::WAVE_UNDERWATER,
    };
    for i in 0..WAVE_LINES {
        let base = field.height * 0.3 + i as f32 * WAVE_SPACING;
        let phase = time * 50.0 * (i + 1) as f32;
        let points: Vec<Vec2> = (0..)
            .map(|step| step as f32 * 10.0)
            .take_while(|&x| x <= field.width)
            .map(|x| Vec2::new(x, base + ((x + phase) / 50.0).sin() * WAVE_AMPLITUDE))
            .collect();
        out.extend(polyline(&points, 2.0, color, 1.0));
    }
}

fn draw_target(out: &mut Vec<Vertex>, target: &Target, segments: u32) {
    let size = target.size;
    let pos = target.pos;
    let hull = target.kind.class().color;

    match target.kind.scene() {
        Scene::Surface => {
            out.extend(ellipse(pos, size / 2.0, size / 4.0, hull, segments));
            out.extend(rect(
                Vec2::new(pos.x - size / 4.0, pos.y - size / 3.0),
                Vec2::new(size / 2.0, size / 3.0),
                colors::CABIN,
            ));
            out.extend(rect(
                Vec2::new(pos.x - size / 8.0, pos.y - size / 2.0),
                Vec2::new(size / 12.0, size / 4.0),
                colors::FUNNEL,
            ));
        }
        Scene::Underwater => {
            out.extend(ellipse(pos, size / 2.0, size / 5.0, hull, segments));
            out.extend(rect(
                Vec2::new(pos.x - size / 6.0, pos.y - size / 4.0),
                Vec2::new(size / 3.0, size / 4.0),
                colors::CONNING_TOWER,
            ));
            out.extend(polyline(
                &[
                    Vec2::new(pos.x, pos.y - size / 4.0),
                    Vec2::new(pos.x, pos.y - size / 2.0),
                ],
                2.0,
                colors::PERISCOPE,
                1.0,
            ));
        }
    }

    // Health bar above the hull
    let bar_min = Vec2::new(pos.x - size / 2.0, pos.y - size / 2.0 - 15.0);
    out.extend(rect(bar_min, Vec2::new(size, HEALTH_BAR_HEIGHT), colors::HEALTH_BACK));
    let health = target.health_fraction();
    if health > 0.0 {
        out.extend(rect(
            bar_min,
            Vec2::new(size * health, HEALTH_BAR_HEIGHT),
            health_color(health),
        ));
    }
}

fn draw_projectile(out: &mut Vec<Vertex>, projectile: &Projectile, trails: bool, segments: u32) {
    if trails && projectile.trail.len() > 1 {
        let points: Vec<Vec2> = projectile.trail.iter().copied().collect();
        out.extend(polyline(&points, 3.0, colors::TRAIL, 0.2));
    }

    // Missile drawn in its own frame: nose along +x
    let heading = Vec2::from_angle(projectile.velocity().to_angle());
    let at = |x: f32, y: f32| projectile.pos + heading.rotate(Vec2::new(x, y));

    out.extend(triangle(at(15.0, 0.0), at(-10.0, -5.0), at(-10.0, 5.0), colors::MISSILE_BODY));
    for fin_y in [-7.0, 4.0] {
        let (a, b, c, d) = (
            at(-10.0, fin_y),
            at(-5.0, fin_y),
            at(-5.0, fin_y + 3.0),
            at(-10.0, fin_y + 3.0),
        );
        out.extend(triangle(a, b, d, colors::MISSILE_FIN));
        out.extend(triangle(d, b, c, colors::MISSILE_FIN));
    }
    out.extend(circle(at(15.0, 0.0), 3.0, colors::MISSILE_TIP, segments / 2));
}

fn draw_explosion(out: &mut Vec<Vertex>, explosion: &Explosion, segments: u32) {
    let alpha = explosion.opacity;
    let stops = [
        (0.0, fade(colors::BLAST_CORE, alpha)),
        (0.3, fade(colors::BLAST_INNER, alpha)),
        (0.6, fade(colors::BLAST_OUTER, alpha)),
        (1.0, colors::BLAST_EDGE),
    ];
    out.extend(radial_gradient(explosion.pos, explosion.radius, &stops, segments));
}

fn draw_particle(out: &mut Vec<Vertex>, particle: &Particle) {
    out.extend(circle(particle.pos, particle.size, fade(particle.color, particle.life), 8));
}

fn draw_launcher(out: &mut Vec<Vertex>, at: Vec2, ready: bool, progress: f32, segments: u32) {
    out.extend(circle(at, LAUNCHER_BASE_RADIUS, colors::LAUNCHER_BASE, segments));
    let inner = if ready { colors::READY } else { colors::RELOADING };
    out.extend(circle(at, LAUNCHER_INNER_RADIUS, inner, segments));

    if !ready && progress > 0.0 {
        // Reload sweep from 12 o'clock
        let sweep = std::f32::consts::TAU * (progress / 100.0).clamp(0.0, 1.0);
        out.extend(arc_band(
            at,
            LAUNCHER_INNER_RADIUS + 1.0,
            LAUNCHER_BASE_RADIUS - 1.0,
            -std::f32::consts::FRAC_PI_2,
            sweep,
            colors::RELOAD_RING,
            segments,
        ));
    }
}
