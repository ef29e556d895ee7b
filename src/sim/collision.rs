//! Projectile vs target hit detection and damage
//!
//! Targets are circles of radius `size / 2`. Each projectile hits at most
//! one target per tick, the first in list order that it overlaps, and is
//! consumed by the hit. Consumed projectiles are compacted after the scan.

use glam::Vec2;

use super::state::{HitOutcome, TargetKind, World};

/// One projectile landing on one target
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Impact {
    /// The target survived (and now crawls)
    Damaged {
        target_id: u32,
        kind: TargetKind,
        pos: Vec2,
    },
    /// The target took its final hit and was removed
    Destroyed {
        target_id: u32,
        kind: TargetKind,
        pos: Vec2,
        size: f32,
        score_value: u64,
    },
}

impl Impact {
    pub fn kind(&self) -> TargetKind {
        match *self {
            Impact::Damaged { kind, .. } | Impact::Destroyed { kind, .. } => kind,
        }
    }

    pub fn pos(&self) -> Vec2 {
        match *self {
            Impact::Damaged { pos, .. } | Impact::Destroyed { pos, .. } => pos,
        }
    }
}

/// Circle overlap test: strictly inside the target's radius
#[inline]
pub fn point_hits_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) < radius * radius
}

/// Resolve every projectile against the live targets.
/// Impacts are returned in resolution order.
pub fn resolve_collisions(world: &mut World, crawl_speed: f32) -> Vec<Impact> {
    let mut impacts = Vec::new();
    let mut consumed = vec![false; world.projectiles.len()];

    for (i, projectile) in world.projectiles.iter().enumerate() {
        let Some(j) = world
            .targets
            .iter()
            .position(|t| point_hits_circle(projectile.pos, t.pos, t.radius()))
        else {
            continue;
        };
        consumed[i] = true;

        let target = &mut world.targets[j];
        match target.take_hit(crawl_speed) {
            HitOutcome::Damaged => impacts.push(Impact::Damaged {
                target_id: target.id,
                kind: target.kind,
                pos: target.pos,
            }),
            HitOutcome::Destroyed => {
                let target = world.targets.remove(j);
                impacts.push(Impact::Destroyed {
                    target_id: target.id,
                    kind: target.kind,
                    pos: target.pos,
                    size: target.size,
                    score_value: target.score_value,
                });
            }
        }
    }

    let mut flags = consumed.into_iter();
    world.projectiles.retain(|_| !flags.next().unwrap_or(false));
    impacts
}
