//! Fixed timestep simulation tick
//!
//! Applies one frame's worth of player intents and then advances the session
//! by exactly one step.

use glam::Vec2;

use super::session::Session;
use super::state::{SessionPhase, Target};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Fire toward this point (click/tap position in field pixels)
    pub fire: Option<Vec2>,
    /// Switch between surface and underwater
    pub toggle_scene: bool,
    /// Demo mode - the launcher aims and fires by itself
    pub autopilot: bool,
}

/// Advance the session by one fixed timestep of `dt` seconds
pub fn tick(session: &mut Session, input: &TickInput, dt: f32) {
    if input.toggle_scene {
        session.toggle_scene();
    }

    let mut input = input.clone();
    if input.autopilot && input.fire.is_none() && session.phase() == SessionPhase::Playing {
        input.fire = autopilot_aim(session);
    }

    if let Some(aim) = input.fire {
        session.fire(aim);
    }

    session.advance(f64::from(dt) * 1000.0);
}

/// Pick the easiest target and lead it. None while reloading or when
/// nothing is on screen.
pub fn autopilot_aim(session: &Session) -> Option<Vec2> {
    if !session.match_state().reload.is_ready() {
        return None;
    }
    let field = session.field();
    let origin = session.launcher();
    let speed = session.tuning().projectile_speed.max(f32::EPSILON);

    session
        .world()
        .targets
        .iter()
        .filter(|t| field.contains(t.pos))
        // Damaged targets crawl, then prefer whatever is closest to sinking
        .min_by(|a, b| {
            let left = |t: &Target| t.hits_required - t.hits_taken;
            left(a)
                .cmp(&left(b))
                .then(a.speed.total_cmp(&b.speed))
                .then(a.id.cmp(&b.id))
        })
        .map(|t| lead(origin, t, speed))
}

/// Where `target` will be when a shot from `origin` reaches it
fn lead(origin: Vec2, target: &Target, projectile_speed: f32) -> Vec2 {
    let vel = Vec2::new(target.direction * target.speed, 0.0);
    let mut aim = target.pos;
    for _ in 0..3 {
        let ticks = origin.distance(aim) / projectile_speed;
        aim = target.pos + vel * ticks;
    }
    aim
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::{Field, GameEvent, Scene};
    use crate::tuning::Tuning;

    fn session(seed: u64) -> Session {
        Session::new(Tuning::default(), Field::new(1280.0, 720.0), seed).unwrap()
    }

    #[test]
    fn test_tick_fires_and_toggles() {
        let mut s = session(1);
        s.start();
        s.drain_events();

        let input = TickInput {
            fire: Some(Vec2::new(640.0, 100.0)),
            toggle_scene: true,
            ..Default::default()
        };
        tick(&mut s, &input, SIM_DT);

        assert_eq!(s.scene(), Scene::Underwater);
        assert_eq!(s.match_state().board.shots_fired, 1);
        let events = s.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::Fired { .. })));
        assert!(events.iter().any(|e| matches!(e, GameEvent::SceneChanged { .. })));
        assert!((s.clock_ms() - 1000.0 / 60.0).abs() < 1e-3);
    }

    #[test]
    fn test_lead_hits_moving_target() {
        let origin = Vec2::new(640.0, 670.0);
        let target = Target::new(1, crate::sim::state::TargetKind::Destroyer, Vec2::new(300.0, 200.0), 1.0);
        let aim = lead(origin, &target, 15.0);
        // Ahead of the target in its direction of travel, same row
        assert!(aim.x > target.pos.x);
        assert_eq!(aim.y, target.pos.y);
    }

    #[test]
    fn test_autopilot_scores() {
        let mut s = session(9);
        s.start();
        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        // 40 seconds of play
        for _ in 0..2400 {
            tick(&mut s, &input, SIM_DT);
        }
        let board = &s.match_state().board;
        assert!(board.shots_fired > 10);
        assert!(board.shots_hit > 0);
        assert!(board.total_kills > 0);
    }

    #[test]
    fn test_determinism() {
        let mut a = session(12345);
        let mut b = session(12345);
        a.start();
        b.start();

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for i in 0..1200 {
            let input = TickInput {
                toggle_scene: i == 400,
                ..input.clone()
            };
            tick(&mut a, &input, SIM_DT);
            tick(&mut b, &input, SIM_DT);
        }

        assert_eq!(a.match_state().board, b.match_state().board);
        assert_eq!(a.world().targets.len(), b.world().targets.len());
        assert_eq!(a.world().particles.len(), b.world().particles.len());
        for (x, y) in a.world().targets.iter().zip(&b.world().targets) {
            assert_eq!(x.id, y.id);
            assert_eq!(x.pos, y.pos);
        }
    }
}
