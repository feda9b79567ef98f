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
//! # Playfield
//!
//! A small 2D game engine core: entities living in a bounded play area,
//! integrated every fixed tick by a force-driven physics engine.
//!
//! ## Features
//!
//! - **Entities**: kinematic state, materials, contact flags and behavior
//!   hooks, owned by a name-keyed store
//! - **Physics**: gravity, standing and queued forces, friction, speed and
//!   acceleration limits, elastic play-area bounds
//! - **Influencers**: zones that locally merge their material into
//!   overlapping entities and push them around
//! - **Game loop**: fixed timestep accumulator with pause, follow camera
//! - **Configuration**: `key=value` properties or JSON (`serde` feature)
//!
//! ## Example
//!
//! ```rust
//! use playfield::ecs::EntityStore;
//! use playfield::math::Vector2;
//! use playfield::physics::{Material, PhysicsEngine, World};
//!
//! let mut store = EntityStore::new();
//! let ball = store
//!     .create("ball")
//!     .with_position(152.0, 92.0)
//!     .with_size(16.0, 16.0)
//!     .with_material(Material::rubber())
//!     .with_force(Vector2::new(2.0, 0.0));
//! store.add(ball);
//!
//! let mut engine = PhysicsEngine::new(World::default());
//! for _ in 0..10 {
//!     engine.update(&mut store, 16.0);
//! }
//! assert_ne!(store.get("ball").unwrap().position, Vector2::new(152.0, 92.0));
//! ```

#![warn(missing_docs)]

/// Entities, influencers, behaviors and the entity store
pub mod ecs;

/// 2D vector and rectangle primitives
pub mod math;

/// Materials, world settings and the physics engine
pub mod physics;

/// World configuration loading
pub mod config;

/// Follow camera
pub mod camera;

/// Fixed timestep game loop
pub mod time;

/// Spawning, culling and other store-level gameplay helpers
pub mod gameplay;

pub use ecs::{Entity, EntityStore};
pub use math::Vector2;
pub use physics::{PhysicsEngine, World};
