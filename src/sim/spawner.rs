//! Target spawning
//!
//! New targets enter at the left or right edge, inside the upper band of the
//! field, heading across it.

use glam::Vec2;
use rand::Rng;

use super::state::{Field, Scene, Target, World};

/// Top of the spawn band as a fraction of field height
const SPAWN_BAND_TOP: f32 = 0.2;
/// Height of the spawn band as a fraction of field height
const SPAWN_BAND_HEIGHT: f32 = 0.3;

/// Spawn one target for `scene` unless the world is at `capacity`.
/// Returns the new target's ID.
pub fn spawn_target(
    world: &mut World,
    scene: Scene,
    field: Field,
    capacity: usize,
    rng: &mut impl Rng,
) -> Option<u32> {
    if world.targets.len() >= capacity {
        return None;
    }

    let kinds = scene.kinds();
    let kind = kinds[rng.random_range(0..kinds.len())];
    let size = kind.class().size;

    let from_left = rng.random_bool(0.5);
    let (x, direction) = if from_left {
        (-size, 1.0)
    } else {
        (field.width + size, -1.0)
    };
    let y = field.height * SPAWN_BAND_TOP + rng.random::<f32>() * field.height * SPAWN_BAND_HEIGHT;

    let id = world.next_entity_id();
    world.targets.push(Target::new(id, kind, Vec2::new(x, y), direction));
    log::debug!("Spawned {:?} #{} at ({:.0}, {:.0})", kind, id, x, y);
    Some(id)
}
