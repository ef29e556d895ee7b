//! Match session: lifecycle, timers and the per-tick pipeline
//!
//! The session owns all mutable match state. Time only moves through
//! [`Session::advance`], which runs the reload gate, scheduled actions, the
//! one-second countdown and then one physics/collision/scoring step, always
//! in that order.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::{Impact, resolve_collisions};
use super::effects;
use super::physics;
use super::schedule::{Action, Schedule};
use super::spawner::spawn_target;
use super::state::{
    Field, FinalStats, GameEvent, MatchState, Projectile, Scene, SessionPhase, World,
};
use crate::tuning::{Tuning, TuningError};

/// Length of one countdown step (ms)
const SECOND_MS: f64 = 1000.0;

/// Salt for the cosmetic RNG stream
const FX_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

pub struct Session {
    tuning: Tuning,
    field: Field,
    phase: SessionPhase,
    world: World,
    stats: MatchState,
    schedule: Schedule,
    /// Gameplay draws (spawns)
    rng: Pcg32,
    /// Particle draws, kept apart so effect quality never shifts spawns
    fx_rng: Pcg32,
    seed: u64,
    /// Simulated time since the current match started (ms)
    clock_ms: f64,
    /// Time banked toward the next countdown step (ms)
    second_accum_ms: f64,
    events: Vec<GameEvent>,
    final_stats: Option<FinalStats>,
}

impl Session {
    /// Fails when the tuning cannot drive a match (zero cadence, zero reload step)
    pub fn new(tuning: Tuning, field: Field, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        let stats = MatchState::new(tuning.match_duration_secs, Scene::default());
        Ok(Self {
            tuning,
            field,
            phase: SessionPhase::NotStarted,
            world: World::new(),
            stats,
            schedule: Schedule::new(),
            rng: Pcg32::seed_from_u64(seed),
            fx_rng: Pcg32::seed_from_u64(seed ^ FX_STREAM),
            seed,
            clock_ms: 0.0,
            second_accum_ms: 0.0,
            events: Vec::new(),
            final_stats: None,
        })
    }

    // === Read access for presentation ===

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn match_state(&self) -> &MatchState {
        &self.stats
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn field(&self) -> Field {
        self.field
    }

    pub fn scene(&self) -> Scene {
        self.stats.scene
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn clock_ms(&self) -> f64 {
        self.clock_ms
    }

    /// Frozen at match end
    pub fn final_stats(&self) -> Option<FinalStats> {
        self.final_stats
    }

    /// Actions still waiting on the simulated clock
    pub fn pending_actions(&self) -> usize {
        self.schedule.len()
    }

    /// Where projectiles leave from
    pub fn launcher(&self) -> Vec2 {
        self.field.launcher(self.tuning.launcher_offset)
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // === Lifecycle ===

    /// Begin the first match. Ignored unless the session has never started.
    pub fn start(&mut self) {
        if self.phase != SessionPhase::NotStarted {
            return;
        }
        self.begin_match();
    }

    /// Throw away the current match and start a fresh one on a new seed
    pub fn restart(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.fx_rng = Pcg32::seed_from_u64(seed ^ FX_STREAM);
        self.world = World::new();
        self.stats = MatchState::new(self.tuning.match_duration_secs, self.stats.scene);
        self.schedule.clear();
        self.clock_ms = 0.0;
        self.second_accum_ms = 0.0;
        self.events.clear();
        self.final_stats = None;
        self.begin_match();
    }

    /// End the match early
    pub fn stop(&mut self) {
        if self.phase == SessionPhase::Playing {
            self.end_match();
        }
    }

    /// Canvas resized
    pub fn resize(&mut self, field: Field) {
        self.field = field;
    }

    fn begin_match(&mut self) {
        self.phase = SessionPhase::Playing;
        log::info!(
            "Match started (seed {}, {}s, scene {:?})",
            self.seed,
            self.stats.timer_secs,
            self.stats.scene
        );
        self.spawn_now();
    }

    fn end_match(&mut self) {
        self.phase = SessionPhase::Ended;
        self.schedule.clear();
        let board = &self.stats.board;
        let stats = FinalStats {
            score: board.score,
            kills: board.total_kills,
            max_combo: board.max_combo,
            accuracy: board.accuracy(),
            shots_fired: board.shots_fired,
            shots_hit: board.shots_hit,
        };
        self.final_stats = Some(stats);
        self.events.push(GameEvent::MatchEnded { stats });
        log::info!(
            "Match over: score {} kills {} max combo {} accuracy {}%",
            stats.score,
            stats.kills,
            stats.max_combo,
            stats.accuracy
        );
    }

    // === Player intents ===

    /// Fire toward `aim`. No-op while reloading or outside a match.
    /// Returns the new projectile's ID.
    pub fn fire(&mut self, aim: Vec2) -> Option<u32> {
        if self.phase != SessionPhase::Playing || !self.stats.reload.is_ready() {
            return None;
        }
        let origin = self.launcher();
        let id = self.world.next_entity_id();
        self.world.projectiles.push(Projectile::aimed(
            id,
            origin,
            aim,
            self.tuning.projectile_speed,
        ));
        self.stats.board.record_shot();
        self.stats.reload.begin();
        self.events.push(GameEvent::Fired { origin, aim });
        Some(id)
    }

    /// Switch between surface and underwater. During a match this clears the
    /// targets and queues two staggered spawns from the new pool.
    pub fn toggle_scene(&mut self) {
        let scene = self.stats.scene.toggled();
        self.stats.scene = scene;
        self.events.push(GameEvent::SceneChanged { scene });

        if self.phase == SessionPhase::Playing {
            self.world.targets.clear();
            let now = self.clock_ms;
            self.schedule.at(now, Action::SpawnTarget);
            self.schedule
                .at(now + self.tuning.scene_spawn_stagger_ms, Action::SpawnTarget);
        }
        log::debug!("Scene switched to {:?}", scene);
    }

    // === Time ===

    /// Advance one fixed step of `dt_ms` simulated milliseconds
    pub fn advance(&mut self, dt_ms: f64) {
        if self.phase != SessionPhase::Playing {
            return;
        }
        self.clock_ms += dt_ms;

        self.stats.reload.advance(dt_ms, &self.tuning);

        for action in self.schedule.drain_due(self.clock_ms) {
            match action {
                Action::SpawnTarget => self.spawn_now(),
            }
        }

        self.second_accum_ms += dt_ms;
        while self.second_accum_ms >= SECOND_MS {
            self.second_accum_ms -= SECOND_MS;
            self.countdown_step();
            if self.phase != SessionPhase::Playing {
                return;
            }
        }

        self.step_world();
        self.stats
            .board
            .expire_combo(self.clock_ms, self.tuning.combo_window_ms);
    }

    fn countdown_step(&mut self) {
        self.stats.timer_secs = self.stats.timer_secs.saturating_sub(1);
        if self.stats.timer_secs == 0 {
            self.end_match();
            return;
        }
        if self.stats.timer_secs % self.tuning.spawn_every_secs == 0 {
            self.spawn_now();
        }
    }

    fn spawn_now(&mut self) {
        spawn_target(
            &mut self.world,
            self.stats.scene,
            self.field,
            self.tuning.capacity,
            &mut self.rng,
        );
    }

    fn step_world(&mut self) {
        let report = physics::update(&mut self.world, self.field, &self.tuning);
        for kind in report.escaped {
            self.events.push(GameEvent::Escaped { kind });
            self.schedule.at(
                self.clock_ms + self.tuning.escape_respawn_ms,
                Action::SpawnTarget,
            );
        }

        for impact in resolve_collisions(&mut self.world, self.tuning.hit_speed) {
            self.stats.board.record_hit();
            let kind = impact.kind();
            let pos = impact.pos();
            self.events.push(GameEvent::Hit { kind, pos });
            effects::hit_burst(
                &mut self.world,
                pos,
                kind.class().color,
                &self.tuning,
                &mut self.fx_rng,
            );

            if let Impact::Destroyed {
                size, score_value, ..
            } = impact
            {
                self.on_kill(impact, size, score_value);
            }
        }
    }

    fn on_kill(&mut self, impact: Impact, size: f32, score_value: u64) {
        let kind = impact.kind();
        let pos = impact.pos();
        let award = self.stats.board.register_kill(
            score_value,
            self.clock_ms,
            self.tuning.combo_window_ms,
            self.tuning.combo_bonus,
        );
        if award.extended {
            self.events.push(GameEvent::ComboStep { combo: award.combo });
        }
        self.events.push(GameEvent::Destroyed {
            kind,
            name: kind.class().name,
            pos,
            size,
            points: award.total(),
        });
        effects::explosion(&mut self.world, pos, size, &self.tuning, &mut self.fx_rng);
        self.schedule
            .at(self.clock_ms + self.tuning.kill_respawn_ms, Action::SpawnTarget);
        log::debug!(
            "Sank {:?} for {} (combo {})",
            kind,
            award.total(),
            award.combo
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Target, TargetKind};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn session() -> Session {
        Session::new(Tuning::default(), Field::new(800.0, 600.0), 42).unwrap()
    }

    fn run_ms(s: &mut Session, ms: f64) {
        let mut elapsed = 0.0;
        while elapsed < ms {
            s.advance(FRAME_MS);
            elapsed += FRAME_MS;
        }
    }

    #[test]
    fn test_start_spawns_one_target() {
        let mut s = session();
        assert_eq!(s.phase(), SessionPhase::NotStarted);
        s.start();
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(s.world().targets.len(), 1);
        // A second start is ignored
        s.start();
        assert_eq!(s.world().targets.len(), 1);
    }

    #[test]
    fn test_nothing_moves_before_start() {
        let mut s = session();
        s.advance(5000.0);
        assert_eq!(s.clock_ms(), 0.0);
        assert!(s.fire(Vec2::new(100.0, 100.0)).is_none());
        assert_eq!(s.match_state().board.shots_fired, 0);
    }

    #[test]
    fn test_fire_while_reloading_is_noop() {
        let mut s = session();
        s.start();
        assert!(s.fire(Vec2::new(400.0, 100.0)).is_some());
        assert_eq!(s.match_state().board.shots_fired, 1);
        assert!(!s.match_state().reload.is_ready());

        let projectiles = s.world().projectiles.len();
        assert!(s.fire(Vec2::new(400.0, 100.0)).is_none());
        assert_eq!(s.world().projectiles.len(), projectiles);
        assert_eq!(s.match_state().board.shots_fired, 1);

        // Ready again after the reload duration
        run_ms(&mut s, 1010.0);
        assert!(s.match_state().reload.is_ready());
        assert!(s.fire(Vec2::new(400.0, 100.0)).is_some());
        assert_eq!(s.match_state().board.shots_fired, 2);
    }

    #[test]
    fn test_projectile_velocity_is_fixed_in_flight() {
        let mut s = session();
        s.start();
        s.world.targets.clear();
        s.schedule.clear();
        s.fire(Vec2::new(100.0, 50.0));
        let v0 = s.world().projectiles[0].velocity();
        assert!((v0.length() - 15.0).abs() < 1e-4);
        for _ in 0..10 {
            s.advance(FRAME_MS);
            if let Some(p) = s.world().projectiles.first() {
                assert_eq!(p.velocity(), v0);
            }
        }
    }

    #[test]
    fn test_double_hit_same_tick_scores_once() {
        let mut s = session();
        s.start();
        s.world.targets.clear();

        // Stationary two-hit target parked on the launcher's line of fire
        let at = Vec2::new(400.0, 300.0);
        let mut target = Target::new(99, TargetKind::Frigate, at, 1.0);
        target.speed = 0.0;
        s.world.targets.push(target);
        // Two shots sitting on the target after this tick's move
        for id in [500, 501] {
            s.world
                .projectiles
                .push(Projectile::aimed(id, at, at + Vec2::Y, 0.0));
        }
        s.drain_events();

        s.advance(FRAME_MS);

        let events = s.drain_events();
        let destroyed: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Destroyed { .. }))
            .collect();
        assert_eq!(destroyed.len(), 1);
        assert!(matches!(
            destroyed[0],
            GameEvent::Destroyed { name: "Frigate", points: 40, .. }
        ));
        assert!(!s.world().targets.iter().any(|t| t.id == 99));
        let board = &s.match_state().board;
        assert_eq!(board.score, 40);
        assert_eq!(board.total_kills, 1);
        assert_eq!(board.shots_hit, 2);
        assert_eq!(board.combo, 1);
        assert_eq!(s.world().explosions.len(), 1);
    }

    #[test]
    fn test_combo_times_out_between_kills() {
        let mut s = session();
        s.start();
        s.world.targets.clear();
        let at = Vec2::new(400.0, 300.0);
        let mut target = Target::new(99, TargetKind::SmallSubmarine, at, 1.0);
        target.speed = 0.0;
        s.world.targets.push(target);
        s.world
            .projectiles
            .push(Projectile::aimed(500, at, at + Vec2::Y, 0.0));

        s.advance(FRAME_MS);
        assert_eq!(s.match_state().board.combo, 1);

        // Still inside the window
        run_ms(&mut s, 2900.0);
        assert_eq!(s.match_state().board.combo, 1);

        // Past it with no further kill
        run_ms(&mut s, 200.0);
        let board = &s.match_state().board;
        assert_eq!(board.combo, 0);
        assert_eq!(board.max_combo, 1);
        assert_eq!(board.total_kills, 1);
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let field = Field::new(800.0, 600.0);
        let no_cadence = Tuning {
            spawn_every_secs: 0,
            ..Tuning::default()
        };
        assert!(matches!(
            Session::new(no_cadence, field, 1),
            Err(TuningError::Invalid(_))
        ));
        let no_reload_step = Tuning {
            reload_step_ms: 0.0,
            ..Tuning::default()
        };
        assert!(matches!(
            Session::new(no_reload_step, field, 1),
            Err(TuningError::Invalid(_))
        ));
    }

    #[test]
    fn test_escape_schedules_respawn_without_score() {
        let mut s = session();
        s.start();
        s.world.targets.clear();
        let mut runner = Target::new(77, TargetKind::Destroyer, Vec2::new(958.0, 200.0), 1.0);
        runner.speed = 6.0;
        s.world.targets.push(runner);
        s.drain_events();

        s.advance(FRAME_MS);

        assert!(s.world().targets.is_empty());
        assert_eq!(s.match_state().board.score, 0);
        assert_eq!(s.pending_actions(), 1);
        assert!(
            s.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::Escaped { kind: TargetKind::Destroyer }))
        );

        run_ms(&mut s, 520.0);
        assert_eq!(s.world().targets.len(), 1);
        assert_eq!(s.pending_actions(), 0);
    }

    #[test]
    fn test_toggle_scene_yields_two_new_targets() {
        let mut s = session();
        s.start();
        assert_eq!(s.world().targets.len(), 1);

        s.toggle_scene();
        assert_eq!(s.scene(), Scene::Underwater);
        assert!(s.world().targets.is_empty());

        s.advance(FRAME_MS);
        assert_eq!(s.world().targets.len(), 1);

        run_ms(&mut s, 600.0);
        assert_eq!(s.world().targets.len(), 2);
        assert!(
            s.world()
                .targets
                .iter()
                .all(|t| t.kind.scene() == Scene::Underwater)
        );
    }

    #[test]
    fn test_toggle_before_start_only_flips_scene() {
        let mut s = session();
        s.toggle_scene();
        assert_eq!(s.scene(), Scene::Underwater);
        assert_eq!(s.pending_actions(), 0);
        s.start();
        assert_eq!(s.world().targets[0].kind.scene(), Scene::Underwater);
    }

    #[test]
    fn test_periodic_backfill_every_three_seconds() {
        let mut s = session();
        s.start();
        // Keep the first target out of the way of the edges
        s.world.targets[0].speed = 0.0;
        s.world.targets[0].pos.x = 400.0;

        // 119, 118: no spawn. 117: spawn.
        run_ms(&mut s, 2900.0);
        assert_eq!(s.match_state().timer_secs, 118);
        assert_eq!(s.world().targets.len(), 1);
        run_ms(&mut s, 200.0);
        assert_eq!(s.match_state().timer_secs, 117);
        assert_eq!(s.world().targets.len(), 2);
    }

    #[test]
    fn test_timer_expiry_freezes_match() {
        let tuning = Tuning {
            match_duration_secs: 2,
            ..Tuning::default()
        };
        let mut s = Session::new(tuning, Field::new(800.0, 600.0), 5).unwrap();
        s.start();
        // Aimed away from the spawn band so it cannot connect
        s.fire(Vec2::new(0.0, 600.0));

        run_ms(&mut s, 2100.0);
        assert_eq!(s.phase(), SessionPhase::Ended);
        assert_eq!(s.match_state().timer_secs, 0);

        let stats = s.final_stats().unwrap();
        assert_eq!(stats.shots_fired, 1);
        assert_eq!(stats.kills, 0);
        assert_eq!(stats.max_combo, 0);
        assert_eq!(stats.accuracy, 0);
        assert!(
            s.drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::MatchEnded { .. }))
        );

        // Frozen: nothing moves, nothing fires
        let positions: Vec<Vec2> = s.world().targets.iter().map(|t| t.pos).collect();
        let clock = s.clock_ms();
        run_ms(&mut s, 5000.0);
        assert_eq!(s.clock_ms(), clock);
        let after: Vec<Vec2> = s.world().targets.iter().map(|t| t.pos).collect();
        assert_eq!(positions, after);
        assert!(s.fire(Vec2::new(10.0, 10.0)).is_none());
        assert_eq!(s.final_stats(), Some(stats));
        assert_eq!(s.pending_actions(), 0);
    }

    #[test]
    fn test_stop_ends_match() {
        let mut s = session();
        s.start();
        s.stop();
        assert_eq!(s.phase(), SessionPhase::Ended);
        assert!(s.final_stats().is_some());
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut s = session();
        s.start();
        s.fire(Vec2::new(400.0, 100.0));
        s.toggle_scene();
        run_ms(&mut s, 200.0);
        assert_eq!(s.pending_actions(), 1);

        s.restart(7);
        assert_eq!(s.phase(), SessionPhase::Playing);
        assert_eq!(s.clock_ms(), 0.0);
        let state = s.match_state();
        assert_eq!(state.board.shots_fired, 0);
        assert_eq!(state.timer_secs, 120);
        assert!(state.reload.is_ready());
        assert!(s.final_stats().is_none());
        assert!(s.world().projectiles.is_empty());
        // Only the opening spawn; the stale scene-change spawn was discarded
        assert_eq!(s.world().targets.len(), 1);
        assert_eq!(s.pending_actions(), 0);
        run_ms(&mut s, 900.0);
        assert_eq!(s.world().targets.len(), 1);
    }

    #[test]
    fn test_same_seed_same_match() {
        let mut a = session();
        let mut b = session();
        a.start();
        b.start();
        for step in 0..600 {
            if step % 70 == 0 {
                let aim = Vec2::new(100.0 + step as f32, 200.0);
                a.fire(aim);
                b.fire(aim);
            }
            a.advance(FRAME_MS);
            b.advance(FRAME_MS);
        }
        assert_eq!(a.world().targets.len(), b.world().targets.len());
        for (x, y) in a.world().targets.iter().zip(&b.world().targets) {
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.pos, y.pos);
        }
        assert_eq!(a.match_state().board, b.match_state().board);
    }

    #[test]
    fn test_effect_budget_does_not_shift_spawns() {
        let lean = Tuning {
            hit_particles: 1,
            explosion_particles: 2,
            ..Tuning::default()
        };
        let mut a = session();
        let mut b = Session::new(lean, Field::new(800.0, 600.0), 42).unwrap();
        a.start();
        b.start();
        for step in 0..1200 {
            if let Some(t) = a.world().targets.first() {
                let aim = t.pos;
                a.fire(aim);
                b.fire(aim);
            }
            if step % 5 == 0 {
                assert_eq!(a.world().targets.len(), b.world().targets.len());
            }
            a.advance(FRAME_MS);
            b.advance(FRAME_MS);
        }
        assert_eq!(a.match_state().board, b.match_state().board);
        for (x, y) in a.world().targets.iter().zip(&b.world().targets) {
            assert_eq!(x.kind, y.kind);
            assert_eq!(x.pos, y.pos);
        }
    }
}
