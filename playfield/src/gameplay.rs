// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Gameplay helpers
//!
//! Store-level operations an input layer binds to keys: spawning batches
//! of bouncing balls, culling entities by name, kicking them with random
//! impulses and flipping gravity. Randomness comes from any [`Rng`]; use
//! [`seeded_rng`] for reproducible runs.

use crate::ecs::{Entity, EntityStore, ObjectShape};
use crate::math::{Rect, Vector2};
use crate::physics::{Material, World};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Upper bound on the number of entities spawning helpers will create
pub const MAX_ENTITIES: usize = 2000;

/// Placeholder replaced by the entity id in spawn name prefixes
pub const ID_PLACEHOLDER: &str = "#";

/// Deterministic generator for gameplay randomness
pub fn seeded_rng(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Spawn up to `count` bouncing balls inside `area`
///
/// Each ball is an ellipse of random diameter in `[1, max_radius]`, random
/// position, random speed in `[0, 10)` on both axes, mass in `[5, 25)` and
/// the super ball material. Every `#` in `prefix` is replaced by the ball id.
/// Spawning stops at [`MAX_ENTITIES`] entities in the store.
///
/// Returns the names of the spawned balls.
pub fn spawn_balls<R: Rng + ?Sized>(
    store: &mut EntityStore,
    rng: &mut R,
    prefix: &str,
    count: usize,
    max_radius: f64,
    area: Rect,
) -> Vec<String> {
    let room = MAX_ENTITIES.saturating_sub(store.len());
    if room < count {
        log::warn!(
            "Entity cap {} reached, spawning {} of {} balls",
            MAX_ENTITIES,
            room,
            count
        );
    }
    let max_radius = max_radius.max(1.0);

    let mut names = Vec::with_capacity(count.min(room));
    for _ in 0..count.min(room) {
        let id = store.allocate_id();
        let name = prefix.replace(ID_PLACEHOLDER, &id.raw().to_string());
        let diameter = rng.random_range(1.0..=max_radius);
        let x = area.x + (area.width - diameter).max(0.0) * rng.random::<f64>();
        let y = area.y + (area.height - diameter).max(0.0) * rng.random::<f64>();
        let ball = Entity::new(id, name.clone())
            .with_shape(ObjectShape::Ellipse)
            .with_size(diameter, diameter)
            .with_position(x, y)
            .with_velocity(10.0 * rng.random::<f64>(), 10.0 * rng.random::<f64>())
            .with_mass(5.0 + 20.0 * rng.random::<f64>())
            .with_material(Material::super_ball())
            .with_debug(4)
            .with_layer(3)
            .with_priority(2);
        store.add(ball);
        names.push(name);
    }
    log::debug!("Spawned {} balls, {} entities in store", names.len(), store.len());
    names
}

/// Remove at most `count` entities whose name contains `filter`, oldest first
///
/// Returns how many were removed.
pub fn cull(store: &mut EntityStore, filter: &str, count: usize) -> usize {
    store.remove_matching(filter, Some(count)).len()
}

/// Remove every entity whose name contains `filter`
///
/// Returns how many were removed.
pub fn cull_all(store: &mut EntityStore, filter: &str) -> usize {
    store.remove_matching(filter, None).len()
}

/// Queue a random impulse on every entity whose name contains `filter`
///
/// The impulse is uniform in `[-max_force, max_force)` horizontally and in
/// `[-5 max_force, 5 max_force)` vertically. Returns how many entities
/// were kicked.
pub fn reshuffle<R: Rng + ?Sized>(
    store: &mut EntityStore,
    filter: &str,
    max_force: f64,
    rng: &mut R,
) -> usize {
    let mut kicked = 0;
    for name in store.names_matching(filter) {
        if let Some(entity) = store.get_mut(&name) {
            let impulse = Vector2::new(
                max_force * 2.0 * rng.random::<f64>() - max_force,
                max_force * 10.0 * rng.random::<f64>() - max_force * 5.0,
            );
            entity.add_force(impulse);
            kicked += 1;
        }
    }
    kicked
}

/// Flip world gravity; returns the new gravity
pub fn invert_gravity(world: &mut World) -> Vector2 {
    world.invert_gravity();
    log::info!("Gravity is now {}", world.gravity());
    world.gravity()
}
