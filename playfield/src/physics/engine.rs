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
//! Per-tick physics update
//!
//! [`PhysicsEngine::update`] walks every entity of an
//! [`EntityStore`](crate::ecs::EntityStore) in id order. Entities that are
//! active, dynamic, not camera-locked and not influencers go through:
//!
//! 1. Force accumulation: gravity and every standing force provider.
//! 2. Influencer resolution: material merge, INFLUENCED bit,
//!    `on_collision` hooks and density-scaled influencer forces.
//! 3. Acceleration: `sum(forces) * mass * density`, snapped and clamped.
//! 4. Velocity: `(velocity + acceleration * dt) * friction`, snapped and
//!    clamped.
//! 5. Position: `position + velocity * dt`.
//! 6. Play-area constraints.
//! 7. The entity's own `update` hooks.
//! 8. Force list cleared, bounding box recomputed.
//!
//! An entity ending the tick with a non-finite position, velocity or
//! acceleration is restored to its pre-tick state and the tick carries on
//! with the next one.
//!
//! # Example
//!
//! ```
//! use playfield::ecs::EntityStore;
//! use playfield::physics::{Material, PhysicsEngine, World};
//!
//! let mut store = EntityStore::new();
//! let ball = store
//!     .create("ball")
//!     .with_position(152.0, 92.0)
//!     .with_size(16.0, 16.0)
//!     .with_material(Material::rubber());
//! store.add(ball);
//!
//! let mut engine = PhysicsEngine::new(World::default());
//! let stats = engine.update(&mut store, 16.0);
//! assert_eq!(stats.updated, 1);
//! assert!(store.get("ball").unwrap().velocity.y > 0.0);
//! ```

use crate::ecs::{ActiveZone, ContactFlags, Entity, EntityStore};
use crate::math::Vector2;
use crate::physics::constraint::constrain_to_play_area;
use crate::physics::force::{ForceProvider, ForceRegistry};
use crate::physics::{Material, World};

/// Scale applied to `elapsed` before integration (milliseconds to seconds)
pub const TIME_FACTOR: f64 = 0.001;

/// Smallest mass the engine integrates with
pub const MIN_MASS: f64 = 1e-6;

/// Mass substituted for an infinite mass
pub const MAX_MASS: f64 = 1e6;

/// Counters describing one call to [`PhysicsEngine::update`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateStats {
    /// Entities integrated this tick
    pub updated: usize,
    /// Entities left untouched (static, inactive, camera-locked, influencers)
    pub skipped: usize,
    /// Integrated entities overlapping at least one influencer
    pub influenced: usize,
    /// Entities restored to their pre-tick state after producing invalid values
    pub rolled_back: usize,
}

/// Kinematic state saved before an entity update
struct Checkpoint {
    position: Vector2,
    velocity: Vector2,
    acceleration: Vector2,
    contact: ContactFlags,
}

impl Checkpoint {
    fn capture(entity: &Entity) -> Self {
        Checkpoint {
            position: entity.position,
            velocity: entity.velocity,
            acceleration: entity.acceleration,
            contact: entity.contact(),
        }
    }

    fn restore(self, entity: &mut Entity) {
        entity.position = self.position;
        entity.velocity = self.velocity;
        entity.acceleration = self.acceleration;
        *entity.contact_mut() = self.contact;
        entity.clear_forces();
        entity.update_box();
    }
}

/// Physics orchestrator owning the world settings and standing forces
pub struct PhysicsEngine {
    world: World,
    forces: ForceRegistry,
}

impl PhysicsEngine {
    /// Create an engine simulating `world`
    pub fn new(world: World) -> Self {
        PhysicsEngine {
            world,
            forces: ForceRegistry::new(),
        }
    }

    /// Get the world settings
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Get the world settings for mutation between ticks
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Register a standing force applied to every simulated entity
    pub fn register_provider(&mut self, provider: Box<dyn ForceProvider>) {
        self.forces.register_provider(provider);
    }

    /// Get the standing force registry
    pub fn forces(&self) -> &ForceRegistry {
        &self.forces
    }

    /// Get the standing force registry for mutation
    pub fn forces_mut(&mut self) -> &mut ForceRegistry {
        &mut self.forces
    }

    /// Advance every simulated entity by `elapsed` milliseconds
    ///
    /// Negative or non-finite `elapsed` is treated as zero.
    pub fn update(&mut self, store: &mut EntityStore, elapsed: f64) -> UpdateStats {
        let elapsed = if elapsed.is_finite() && elapsed >= 0.0 {
            elapsed
        } else {
            log::warn!("Ignoring invalid elapsed time {}", elapsed);
            0.0
        };
        let dt = elapsed * TIME_FACTOR;

        let mut zones: Vec<ActiveZone> = store
            .entities_mut()
            .filter_map(ActiveZone::detach)
            .collect();
        zones.sort_by_key(|z| z.zone.id);

        let mut stats = UpdateStats::default();
        for name in store.ordered_names() {
            let Some(entity) = store.get_mut(&name) else {
                continue;
            };
            if !entity.is_simulated() {
                stats.skipped += 1;
                continue;
            }

            let checkpoint = Checkpoint::capture(entity);
            let influenced = self.update_entity(entity, &mut zones, elapsed, dt);
            if entity.is_valid() {
                stats.updated += 1;
                if influenced {
                    stats.influenced += 1;
                }
            } else {
                log::warn!(
                    "Entity '{}' went invalid (pos {:?}, spd {:?}, acc {:?}), rolling back",
                    entity.name,
                    entity.position,
                    entity.velocity,
                    entity.acceleration
                );
                checkpoint.restore(entity);
                stats.rolled_back += 1;
            }
        }

        for zone in zones {
            if let Some(influencer) = store.get_mut(&zone.zone.name) {
                influencer.restore_behaviors(zone.behaviors);
            }
        }

        log::trace!(
            "Physics tick dt={:.4}s: {} updated, {} skipped, {} influenced, {} rolled back",
            dt,
            stats.updated,
            stats.skipped,
            stats.influenced,
            stats.rolled_back
        );
        stats
    }

    /// Run the eight update steps on one entity
    ///
    /// Returns whether at least one influencer overlapped it.
    fn update_entity(
        &self,
        entity: &mut Entity,
        zones: &mut [ActiveZone],
        elapsed: f64,
        dt: f64,
    ) -> bool {
        let world = &self.world;
        if !(entity.mass.is_finite() && entity.mass >= MIN_MASS) {
            let clamped = if entity.mass == f64::INFINITY {
                MAX_MASS
            } else {
                MIN_MASS
            };
            log::warn!(
                "Entity '{}' has mass {}, clamping to {}",
                entity.name,
                entity.mass,
                clamped
            );
            entity.mass = clamped;
        }
        entity.contact_mut().remove(ContactFlags::INFLUENCED);
        entity.update_box();

        // 1. forces
        entity.add_force(world.gravity());
        self.forces.accumulate_for_entity(entity, world);

        // 2. influencers
        let own_material: Material = entity
            .material
            .clone()
            .unwrap_or_else(|| world.material().clone());
        let density = own_material.density;
        let mut material = own_material;
        let mut influenced = false;
        let bounding_box = entity.bounding_box();
        for zone in zones.iter_mut() {
            if !zone.overlaps(&bounding_box) {
                continue;
            }
            influenced = true;
            if let Some(zone_material) = &zone.zone.influence.material {
                material = material.merge(zone_material);
            }
            entity.contact_mut().insert(ContactFlags::INFLUENCED);
            zone.notify(entity);
            for force in &zone.zone.influence.forces {
                entity.add_force(*force * density);
            }
        }

        // 3. acceleration
        let mut acceleration = Vector2::add_all(entity.forces()) * entity.mass * material.density;
        acceleration
            .ceil(world.min_acc)
            .maximize_xy(world.max_acc_x, world.max_acc_y);
        entity.acceleration = acceleration;

        // 4. velocity
        let friction = if entity.contact().has_boundary_contact() {
            material.friction
        } else {
            world.material().friction
        };
        let mut velocity = (entity.velocity + acceleration * dt) * friction;
        velocity
            .ceil(world.min_speed)
            .maximize_xy(world.max_speed_x, world.max_speed_y);
        entity.velocity = velocity;

        // 5. position
        entity.position += entity.velocity * dt;

        // 6. constraints
        constrain_to_play_area(entity, world, material.elasticity);

        // 7. hooks
        entity.run_update_hooks(elapsed);

        // 8. cleanup
        entity.clear_forces();
        entity.update_box();
        influenced
    }
}

impl Default for PhysicsEngine {
    fn default() -> Self {
        Self::new(World::default())
    }
}
