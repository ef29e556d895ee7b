//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Simulated clock only (never wall time)
//! - Stable iteration order (insertion order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod physics;
pub mod reload;
pub mod schedule;
pub mod scoring;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Impact, point_hits_circle, resolve_collisions};
pub use physics::StepReport;
pub use reload::Reload;
pub use schedule::{Action, Schedule};
pub use scoring::{ComboState, KillAward, ScoreBoard, accuracy};
pub use session::Session;
pub use spawner::spawn_target;
pub use state::{
    Explosion, Field, FinalStats, GameEvent, HitOutcome, MatchState, Particle, Projectile, Scene,
    SessionPhase, Target, TargetClass, TargetKind, World,
};
pub use tick::{TickInput, autopilot_aim, tick};
