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
//! Bouncing balls demo
//!
//! Spawns a batch of super balls in the default play area and replays the
//! demo key bindings on a fixed script: add balls, kick them, flip gravity,
//! remove some, pause. Run with `RUST_LOG=debug` to see engine logging.

use playfield::camera::Camera;
use playfield::config::WorldConfig;
use playfield::ecs::EntityStore;
use playfield::gameplay::{cull, cull_all, invert_gravity, reshuffle, seeded_rng, spawn_balls};
use playfield::math::Rect;
use playfield::physics::{PhysicsEngine, World};
use playfield::time::{FixedTimestep, GameLoop};

const FRAME_MILLIS: f64 = 1000.0 / 60.0;
const RESHUFFLE_FORCE: f64 = 5.0;

fn main() {
    env_logger::init();

    let config = WorldConfig::from_properties_str(
        "app.physic.world.play.area.width=320\napp.physic.world.play.area.height=200",
    );
    let world = World::from_config(&config);
    let area = world.play_area();
    let mut rng = seeded_rng(2022);

    let mut store = EntityStore::new();
    spawn_balls(&mut store, &mut rng, "ball_#", 10, 24.0, area);
    let player = store
        .create("player")
        .with_position(area.width * 0.5, area.height * 0.5)
        .with_size(16.0, 16.0);
    store.add(player);

    let camera = Camera::new("main", 160.0, 100.0)
        .with_target("player")
        .with_tween(0.005);
    let mut game = GameLoop::new(
        FixedTimestep::new(FRAME_MILLIS),
        PhysicsEngine::new(world),
        store,
    )
    .with_camera(camera);

    println!("=== Bouncing balls ===");
    for frame in 0..600u32 {
        match frame {
            60 => {
                let added = spawn_balls(
                    game.store_mut(),
                    &mut rng,
                    "ball_#",
                    10,
                    24.0,
                    Rect::new(0.0, 0.0, 320.0, 100.0),
                );
                println!("[{:>3}] added {} balls", frame, added.len());
            }
            120 => {
                let kicked = reshuffle(game.store_mut(), "ball_", RESHUFFLE_FORCE, &mut rng);
                println!("[{:>3}] reshuffled {} balls", frame, kicked);
            }
            240 => {
                let gravity = invert_gravity(game.engine_mut().world_mut());
                println!("[{:>3}] gravity is now {}", frame, gravity);
            }
            360 => {
                let removed = cull(game.store_mut(), "ball_", 10);
                println!("[{:>3}] removed {} balls", frame, removed);
            }
            420 => {
                game.timestep_mut().set_paused(true);
                println!("[{:>3}] paused", frame);
            }
            480 => {
                game.timestep_mut().set_paused(false);
                println!("[{:>3}] resumed", frame);
            }
            _ => {}
        }
        game.frame(FRAME_MILLIS);

        if frame % 120 == 0 {
            let stats = game.last_stats();
            println!(
                "[{:>3}] tick {:>4}: {} updated, {} influenced, {} skipped",
                frame,
                game.ticks(),
                stats.updated,
                stats.influenced,
                stats.skipped
            );
        }
    }

    println!("\nFinal state:");
    for entity in game.store().snapshot() {
        println!("  {} contact={:04b}", entity, entity.contact().bits());
    }
    if let Some(camera) = game.camera() {
        println!("  camera at {}", camera.position);
    }

    let removed = cull_all(game.store_mut(), "ball_");
    println!("\nCleared {} balls, {} entities left", removed, game.store().len());
}
