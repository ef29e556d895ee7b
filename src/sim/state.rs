//! Entity model and match state
//!
//! Plain data for everything the simulation moves or counts. Behavior that
//! spans several entities lives in the sibling modules.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::TRAIL_LENGTH;
use crate::{Rgba, aim_direction, hex};

use super::reload::Reload;
use super::scoring::ScoreBoard;

/// Which target pool is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Scene {
    /// Ships on the water surface
    #[default]
    Surface,
    /// Submarines below the surface
    Underwater,
}

impl Scene {
    /// The other scene
    pub fn toggled(self) -> Self {
        match self {
            Scene::Surface => Scene::Underwater,
            Scene::Underwater => Scene::Surface,
        }
    }

    /// Target kinds that may spawn in this scene
    pub fn kinds(self) -> &'static [TargetKind; 3] {
        match self {
            Scene::Surface => &[TargetKind::Destroyer, TargetKind::Frigate, TargetKind::Carrier],
            Scene::Underwater => &[
                TargetKind::SmallSubmarine,
                TargetKind::MediumSubmarine,
                TargetKind::LargeSubmarine,
            ],
        }
    }
}

/// Target classes across both scenes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetKind {
    Destroyer,
    Frigate,
    Carrier,
    SmallSubmarine,
    MediumSubmarine,
    LargeSubmarine,
}

/// Static stats for a target class
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetClass {
    /// Cruising speed (px/tick)
    pub speed: f32,
    pub hits_required: u32,
    pub score: u64,
    /// Diameter in pixels
    pub size: f32,
    pub color: Rgba,
    pub name: &'static str,
}

impl TargetKind {
    pub fn class(self) -> TargetClass {
        match self {
            TargetKind::Destroyer => TargetClass {
                speed: 6.0,
                hits_required: 2,
                score: 20,
                size: 60.0,
                color: hex(0x8B4513, 1.0),
                name: "Destroyer",
            },
            TargetKind::Frigate => TargetClass {
                speed: 4.0,
                hits_required: 2,
                score: 40,
                size: 80.0,
                color: hex(0x696969, 1.0),
                name: "Frigate",
            },
            TargetKind::Carrier => TargetClass {
                speed: 2.0,
                hits_required: 3,
                score: 60,
                size: 120.0,
                color: hex(0x2F4F4F, 1.0),
                name: "Carrier",
            },
            TargetKind::SmallSubmarine => TargetClass {
                speed: 6.0,
                hits_required: 1,
                score: 20,
                size: 40.0,
                color: hex(0x4169E1, 1.0),
                name: "Small Submarine",
            },
            TargetKind::MediumSubmarine => TargetClass {
                speed: 4.0,
                hits_required: 2,
                score: 40,
                size: 60.0,
                color: hex(0x1E90FF, 1.0),
                name: "Medium Submarine",
            },
            TargetKind::LargeSubmarine => TargetClass {
                speed: 2.0,
                hits_required: 3,
                score: 60,
                size: 90.0,
                color: hex(0x00008B, 1.0),
                name: "Large Submarine",
            },
        }
    }

    /// Scene this kind belongs to
    pub fn scene(self) -> Scene {
        match self {
            TargetKind::Destroyer | TargetKind::Frigate | TargetKind::Carrier => Scene::Surface,
            _ => Scene::Underwater,
        }
    }
}

/// Result of landing one hit on a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    Damaged,
    Destroyed,
}

/// A hostile unit drifting across the field
#[derive(Debug, Clone)]
pub struct Target {
    pub id: u32,
    pub kind: TargetKind,
    pub pos: Vec2,
    /// +1 moves right, -1 moves left
    pub direction: f32,
    pub speed: f32,
    pub hits_taken: u32,
    pub hits_required: u32,
    pub score_value: u64,
    pub size: f32,
}

impl Target {
    pub fn new(id: u32, kind: TargetKind, pos: Vec2, direction: f32) -> Self {
        let class = kind.class();
        Self {
            id,
            kind,
            pos,
            direction: direction.signum(),
            speed: class.speed,
            hits_taken: 0,
            hits_required: class.hits_required,
            score_value: class.score,
            size: class.size,
        }
    }

    /// Collision radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }

    pub fn is_destroyed(&self) -> bool {
        self.hits_taken >= self.hits_required
    }

    /// Remaining health in 0..=1 (drives the health bar)
    pub fn health_fraction(&self) -> f32 {
        1.0 - self.hits_taken as f32 / self.hits_required.max(1) as f32
    }

    /// Register one hit; never counts past `hits_required`
    pub fn take_hit(&mut self, crawl_speed: f32) -> HitOutcome {
        self.hits_taken = (self.hits_taken + 1).min(self.hits_required);
        if self.is_destroyed() {
            HitOutcome::Destroyed
        } else {
            self.speed = crawl_speed;
            HitOutcome::Damaged
        }
    }
}

/// A player-fired shot on a fixed straight line
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Point the player aimed at
    pub aim: Vec2,
    vel: Vec2,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Projectile {
    /// Launch from `origin` toward `aim` at `speed` px/tick
    pub fn aimed(id: u32, origin: Vec2, aim: Vec2, speed: f32) -> Self {
        Self {
            id,
            pos: origin,
            aim,
            vel: aim_direction(origin, aim) * speed,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Velocity is fixed at launch
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    /// Advance one tick and record the new position in the trail
    pub fn advance(&mut self) {
        self.pos += self.vel;
        self.trail.push_back(self.pos);
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }
}

/// Expanding ring left behind by a destroyed target
#[derive(Debug, Clone)]
pub struct Explosion {
    pub pos: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

/// Debris for hit and kill feedback
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 1 at birth, removed at 0
    pub life: f32,
    pub size: f32,
    pub color: Rgba,
}

/// Visible playfield bounds in pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// True if the point lies inside the visible bounds (edges included)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// Where projectiles are launched from
    pub fn launcher(&self, offset: f32) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height - offset)
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(
            crate::consts::DEFAULT_FIELD_WIDTH,
            crate::consts::DEFAULT_FIELD_HEIGHT,
        )
    }
}

/// All live entities, in insertion order
#[derive(Debug, Clone, Default)]
pub struct World {
    pub targets: Vec<Target>,
    pub projectiles: Vec<Projectile>,
    pub explosions: Vec<Explosion>,
    pub particles: Vec<Particle>,
    next_id: u32,
}

impl World {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    /// Add a particle, evicting the oldest ones beyond `cap`
    pub fn push_particle(&mut self, particle: Particle, cap: usize) {
        if cap == 0 {
            return;
        }
        self.particles.push(particle);
        if self.particles.len() > cap {
            let excess = self.particles.len() - cap;
            self.particles.drain(..excess);
        }
    }
}

/// Match lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Waiting for the first start
    NotStarted,
    /// Clock running
    Playing,
    /// Frozen until restart
    Ended,
}

/// Per-match counters and gates
#[derive(Debug, Clone)]
pub struct MatchState {
    pub board: ScoreBoard,
    /// Seconds left on the countdown
    pub timer_secs: u32,
    pub reload: Reload,
    pub scene: Scene,
}

impl MatchState {
    pub fn new(duration_secs: u32, scene: Scene) -> Self {
        Self {
            board: ScoreBoard::default(),
            timer_secs: duration_secs,
            reload: Reload::default(),
            scene,
        }
    }
}

/// Stats frozen at the end of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalStats {
    pub score: u64,
    pub kills: u32,
    pub max_combo: u32,
    /// Percent, rounded
    pub accuracy: u32,
    pub shots_fired: u32,
    pub shots_hit: u32,
}

/// Notifications for presentation (audio, effects, HUD)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A projectile left the launcher
    Fired { origin: Vec2, aim: Vec2 },
    /// A projectile struck a target
    Hit { kind: TargetKind, pos: Vec2 },
    /// A target was sunk
    Destroyed {
        kind: TargetKind,
        /// Class display name
        name: &'static str,
        pos: Vec2,
        size: f32,
        points: u64,
    },
    /// A kill extended the combo streak
    ComboStep { combo: u32 },
    /// A target crossed the field unharmed
    Escaped { kind: TargetKind },
    /// The active scene changed
    SceneChanged { scene: Scene },
    /// The countdown ran out or the match was stopped
    MatchEnded { stats: FinalStats },
}
