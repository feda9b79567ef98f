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
//! Influencer pool demo
//!
//! A pool of water fills the bottom of the play area. Balls dropped into
//! it get the water material merged into theirs, are pushed upwards by a
//! buoyancy force and are counted by a collision hook on the pool.

use playfield::ecs::{Behavior, Entity, EntityStore, InfluenceZone};
use playfield::math::{Rect, Vector2};
use playfield::physics::{LinearDrag, Material, PhysicsEngine, World};

/// Counts how many entity-ticks spent time in the pool
struct SplashCounter {
    splashes: usize,
}

impl Behavior for SplashCounter {
    fn on_collision(&mut self, zone: &InfluenceZone, collider: &mut Entity) {
        self.splashes += 1;
        if self.splashes % 100 == 0 {
            log::info!("{} splashes in {} ({} last)", self.splashes, zone.name, collider.name);
        }
    }

    fn name(&self) -> &str {
        "SplashCounter"
    }
}

fn main() {
    env_logger::init();

    let world = World::default();
    let area = world.play_area();
    let mut engine = PhysicsEngine::new(world);
    engine.register_provider(Box::new(LinearDrag::new(0.02)));

    let mut store = EntityStore::new();
    let pool_id = store.allocate_id();
    store.add(
        Entity::influencer(
            pool_id,
            "pool",
            Rect::new(0.0, area.height * 0.6, area.width, area.height * 0.4),
        )
        .with_influence_material(Material::new("water", 0.1, 1.0, 0.8))
        .with_influence_force(Vector2::new(0.0, -1.5))
        .with_behavior(SplashCounter { splashes: 0 }),
    );

    let presets = [
        Material::rubber(),
        Material::steel(),
        Material::super_ball(),
        Material::floor(),
    ];
    for (i, material) in presets.into_iter().enumerate() {
        let name = format!("{}_ball", material.name);
        let ball = store
            .create(name)
            .with_position(40.0 + i as f64 * 70.0, 10.0)
            .with_size(12.0, 12.0)
            .with_mass(1.0)
            .with_material(material);
        store.add(ball);
    }

    println!("=== Influencer pool ===");
    let mut in_pool = 0;
    for tick in 0..1200u32 {
        let stats = engine.update(&mut store, 16.0);
        in_pool = stats.influenced;
        if tick % 200 == 0 {
            for entity in store.snapshot().into_iter().filter(|e| !e.is_influencer()) {
                println!("[{:>4}] {}", tick, entity);
            }
        }
    }

    println!("\n{} balls in the pool after the last tick", in_pool);
    for entity in store.snapshot() {
        for line in entity.debug_info() {
            println!("  {}", line);
        }
    }
}
