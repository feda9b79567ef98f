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
//! End-to-end scenarios: a rubber ball pushed around the default world,
//! a populated store, and a full game loop with spawned balls.

use playfield::camera::Camera;
use playfield::ecs::EntityStore;
use playfield::gameplay::{cull, reshuffle, seeded_rng, spawn_balls};
use playfield::math::{Rect, Vector2};
use playfield::physics::{Material, PhysicsEngine, World};
use playfield::time::{FixedTimestep, GameLoop};
use rand::Rng;

#[test]
fn test_rubber_ball_moves_under_random_forces() {
    let world = World::default();
    assert_eq!(world.gravity(), Vector2::new(0.0, 0.981));
    assert_eq!(world.play_area(), Rect::new(0.0, 0.0, 320.0, 200.0));

    let mut engine = PhysicsEngine::new(world);
    let mut store = EntityStore::new();
    let start = Vector2::new(152.0, 92.0);
    let ball = store
        .create("ball")
        .with_position(start.x, start.y)
        .with_size(16.0, 16.0)
        .with_mass(1.0)
        .with_material(Material::rubber());
    store.add(ball);

    let mut rng = seeded_rng(2024);
    for _ in 0..10 {
        let force = Vector2::new(
            rng.random::<f64>() * 2.0 - 1.0,
            rng.random::<f64>() * 2.0,
        );
        store.get_mut("ball").unwrap().add_force(force);
        engine.update(&mut store, 1600.0);
    }

    let ball = store.get("ball").unwrap();
    assert_ne!(ball.position, start);
    assert!(ball.is_valid());
    let area = engine.world().play_area();
    assert!(ball.position.x >= 0.0 && ball.position.x + ball.size.x <= area.width);
    assert!(ball.position.y >= 0.0 && ball.position.y + ball.size.y <= area.height);
}

#[test]
fn test_store_with_twenty_entities() {
    let mut store = EntityStore::new();
    for i in 0..20 {
        let entity = store.create(format!("test_{}", i));
        store.add(entity);
    }
    assert_eq!(store.len(), 20);
    for i in 0..20 {
        let name = format!("test_{}", i);
        assert_eq!(store.get(&name).map(|e| e.name()), Some(name.as_str()));
    }

    let removed = store.remove_matching("test_", Some(10));
    assert_eq!(removed.len(), 10);
    assert_eq!(store.len(), 10);
    for i in 0..10 {
        assert!(store.get(&format!("test_{}", i)).is_none());
    }
    for i in 10..20 {
        assert!(store.get(&format!("test_{}", i)).is_some());
    }
}

#[test]
fn test_game_loop_with_spawned_balls() {
    let mut store = EntityStore::new();
    let mut rng = seeded_rng(11);
    let area = Rect::new(0.0, 0.0, 320.0, 200.0);
    spawn_balls(&mut store, &mut rng, "ball_#", 50, 24.0, area);
    let player = store
        .create("player")
        .with_position(150.0, 100.0)
        .with_size(16.0, 16.0);
    store.add(player);

    let camera = Camera::new("main", 160.0, 100.0)
        .with_target("player")
        .with_tween(0.02);
    let mut game = GameLoop::new(
        FixedTimestep::new(16.0),
        PhysicsEngine::new(World::default()),
        store,
    )
    .with_camera(camera);

    let mut ticks = 0;
    for frame in 0..120 {
        if frame == 30 {
            reshuffle(game.store_mut(), "ball_", 4.0, &mut rng);
        }
        if frame == 60 {
            game.engine_mut().world_mut().invert_gravity();
        }
        if frame == 90 {
            assert_eq!(cull(game.store_mut(), "ball_", 20), 20);
        }
        ticks += game.frame(16.7);
    }

    assert_eq!(game.ticks(), ticks as u64);
    assert_eq!(game.store().len(), 31);
    assert_eq!(game.last_stats().updated, 31);
    for entity in game.store().entities() {
        assert!(entity.is_valid(), "{} went invalid", entity.name);
        let bounds = entity.bounding_box();
        assert!(bounds.x >= 0.0 && bounds.right() <= 320.0 + 1e-9);
        assert!(bounds.y >= 0.0 && bounds.bottom() <= 200.0 + 1e-9);
    }
    assert_ne!(game.camera().unwrap().position, Vector2::ZERO);
}
