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
//! Engine-level properties of a physics tick
//!
//! Skipped entities stay untouched, single forces produce the expected
//! acceleration, zero input produces no drift, edges reflect and one bad
//! entity never spoils the others.

use playfield::ecs::{ContactFlags, Entity, EntityStore, PhysicType};
use playfield::math::{Rect, Vector2};
use playfield::physics::{Material, PhysicsEngine, World};

fn weightless_engine() -> PhysicsEngine {
    PhysicsEngine::new(World::default().set_gravity(Vector2::ZERO))
}

fn add(store: &mut EntityStore, name: &str, build: impl FnOnce(Entity) -> Entity) {
    let entity = store.create(name);
    store.add(build(entity));
}

#[test]
fn test_skipped_entities_are_untouched() {
    let mut engine = PhysicsEngine::new(World::default());
    let mut store = EntityStore::new();
    let kick = Vector2::new(5.0, -5.0);
    add(&mut store, "static", |e| {
        e.with_position(50.0, 50.0)
            .with_velocity(1.0, 1.0)
            .with_physic_type(PhysicType::Static)
            .with_force(kick)
    });
    add(&mut store, "inactive", |e| {
        e.with_position(60.0, 60.0)
            .with_velocity(1.0, 1.0)
            .with_active(false)
            .with_force(kick)
    });
    add(&mut store, "hud", |e| {
        e.with_position(0.0, 0.0)
            .with_velocity(1.0, 1.0)
            .with_stick_to_camera(true)
            .with_force(kick)
    });

    for _ in 0..20 {
        engine.update(&mut store, 16.0);
    }

    for (name, position) in [
        ("static", Vector2::new(50.0, 50.0)),
        ("inactive", Vector2::new(60.0, 60.0)),
        ("hud", Vector2::ZERO),
    ] {
        let e = store.get(name).unwrap();
        assert_eq!(e.position, position, "{} moved", name);
        assert_eq!(e.velocity, Vector2::new(1.0, 1.0), "{} velocity changed", name);
        assert_eq!(e.acceleration, Vector2::ZERO, "{} accelerated", name);
        assert_eq!(e.forces(), &[kick], "{} forces consumed", name);
        assert!(e.contact().is_empty());
    }
}

#[test]
fn test_single_force_gives_mass_density_scaled_acceleration() {
    let mut engine = weightless_engine();
    let mut store = EntityStore::new();
    let force = Vector2::new(0.75, -0.25);
    add(&mut store, "probe", |e| {
        e.with_position(100.0, 100.0)
            .with_size(10.0, 10.0)
            .with_mass(4.0)
            .with_material(Material::rubber())
            .with_force(force)
    });

    engine.update(&mut store, 16.0);

    let e = store.get("probe").unwrap();
    assert_eq!(e.acceleration, force * 4.0 * Material::rubber().density);
    assert!(e.is_valid());
}

#[test]
fn test_zero_input_tick_does_not_drift() {
    let mut engine = weightless_engine();
    let mut store = EntityStore::new();
    add(&mut store, "idle", |e| e.with_position(123.5, 45.25).with_size(8.0, 8.0));

    for _ in 0..1000 {
        engine.update(&mut store, 16.0);
    }

    let e = store.get("idle").unwrap();
    assert_eq!(e.position, Vector2::new(123.5, 45.25));
    assert_eq!(e.velocity, Vector2::ZERO);
}

#[test]
fn test_right_edge_reflection() {
    let mut engine = weightless_engine();
    let mut store = EntityStore::new();
    add(&mut store, "ball", |e| {
        e.with_position(300.0, 100.0)
            .with_size(16.0, 16.0)
            .with_velocity(100.0, 0.0)
            .with_material(Material::rubber())
    });

    engine.update(&mut store, 100.0);

    let e = store.get("ball").unwrap();
    assert_eq!(e.position.x + e.size.x, 320.0);
    assert!(e.contact().contains(ContactFlags::RIGHT));
    assert_eq!(e.velocity.x, -100.0 * Material::rubber().elasticity);
}

#[test]
fn test_ball_settles_on_floor() {
    let mut engine = PhysicsEngine::new(World::default());
    let mut store = EntityStore::new();
    add(&mut store, "ball", |e| {
        e.with_position(100.0, 150.0)
            .with_size(16.0, 16.0)
            .with_material(Material::steel())
    });

    for _ in 0..2000 {
        engine.update(&mut store, 16.0);
    }

    let e = store.get("ball").unwrap();
    assert_eq!(e.position.y + e.size.y, 200.0);
    assert!(e.contact().contains(ContactFlags::BOTTOM));
}

#[test]
fn test_influencer_order_is_by_id() {
    let mut engine = weightless_engine();
    let mut store = EntityStore::new();
    let first = store.allocate_id();
    let second = store.allocate_id();
    // registered in reverse order, applied in id order
    store.add(
        Entity::influencer(second, "oil", Rect::new(0.0, 0.0, 320.0, 200.0))
            .with_influence_material(Material::new("oil", 0.0, 5.0, 0.0)),
    );
    store.add(
        Entity::influencer(first, "water", Rect::new(0.0, 0.0, 320.0, 200.0))
            .with_influence_material(Material::new("water", 0.0, 3.0, 0.0)),
    );
    add(&mut store, "probe", |e| {
        e.with_position(10.0, 10.0)
            .with_size(4.0, 4.0)
            .with_material(Material::default_material())
            .with_force(Vector2::new(1.0, 0.0))
    });

    let stats = engine.update(&mut store, 16.0);

    // ((1 + 3) / 2 + 5) / 2 = 3.5
    assert_eq!(stats.influenced, 1);
    assert_eq!(store.get("probe").unwrap().acceleration, Vector2::new(3.5, 0.0));
}

#[test]
fn test_inactive_influencer_has_no_effect() {
    let mut engine = weightless_engine();
    let mut store = EntityStore::new();
    let id = store.allocate_id();
    store.add(
        Entity::influencer(id, "wind", Rect::new(0.0, 0.0, 320.0, 200.0))
            .with_influence_force(Vector2::new(10.0, 0.0))
            .with_active(false),
    );
    add(&mut store, "probe", |e| e.with_position(10.0, 10.0).with_size(4.0, 4.0));

    let stats = engine.update(&mut store, 16.0);
    assert_eq!(stats.influenced, 0);
    assert_eq!(store.get("probe").unwrap().acceleration, Vector2::ZERO);
}

#[test]
fn test_bad_entity_is_isolated() {
    let mut engine = weightless_engine();
    let mut store = EntityStore::new();
    add(&mut store, "nan", |e| {
        e.with_position(10.0, 10.0)
            .with_velocity(1.0, 1.0)
            .with_force(Vector2::new(f64::NAN, f64::NAN))
    });
    for i in 0..5 {
        add(&mut store, &format!("ok_{}", i), |e| {
            e.with_position(20.0, 20.0).with_velocity(10.0, 0.0)
        });
    }

    let stats = engine.update(&mut store, 16.0);

    assert_eq!(stats.updated, 5);
    assert_eq!(stats.rolled_back, 1);
    let bad = store.get("nan").unwrap();
    assert_eq!(bad.position, Vector2::new(10.0, 10.0));
    assert_eq!(bad.velocity, Vector2::new(1.0, 1.0));
    for i in 0..5 {
        let ok = store.get(&format!("ok_{}", i)).unwrap();
        assert!(ok.position.x > 20.0);
        assert!(ok.is_valid());
    }
}

#[test]
fn test_gravity_inversion_between_ticks() {
    let mut engine = PhysicsEngine::new(World::default());
    let mut store = EntityStore::new();
    add(&mut store, "ball", |e| e.with_position(100.0, 100.0).with_size(8.0, 8.0));

    engine.update(&mut store, 16.0);
    assert!(store.get("ball").unwrap().acceleration.y > 0.0);

    engine.world_mut().invert_gravity();
    engine.update(&mut store, 16.0);
    assert!(store.get("ball").unwrap().acceleration.y < 0.0);
}
