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
//! Fixed timestep game loop
//!
//! [`FixedTimestep`] turns variable frame times into a whole number of
//! fixed ticks. [`GameLoop`] drives a [`PhysicsEngine`] and an optional
//! [`Camera`] with it. All durations are in milliseconds, the unit
//! [`PhysicsEngine::update`] expects.

use crate::camera::Camera;
use crate::ecs::EntityStore;
use crate::physics::{PhysicsEngine, UpdateStats};

/// Most ticks a single frame may produce
pub const MAX_STEPS_PER_FRAME: u32 = 10;

/// Fixed timestep accumulator
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    step_millis: f64,
    accumulator: f64,
    paused: bool,
}

impl FixedTimestep {
    /// Create an accumulator producing ticks of `step_millis`
    ///
    /// # Panics
    ///
    /// Panics if `step_millis` is not a strictly positive finite number.
    /// Use [`try_new`](Self::try_new) to handle that case.
    pub fn new(step_millis: f64) -> Self {
        match Self::try_new(step_millis) {
            Ok(timestep) => timestep,
            Err(message) => panic!("{}", message),
        }
    }

    /// Create an accumulator, rejecting invalid step durations
    pub fn try_new(step_millis: f64) -> Result<Self, String> {
        if !step_millis.is_finite() || step_millis <= 0.0 {
            return Err(format!(
                "Fixed step must be a positive duration, got {}",
                step_millis
            ));
        }
        Ok(FixedTimestep {
            step_millis,
            accumulator: 0.0,
            paused: false,
        })
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    ///
    /// At most [`MAX_STEPS_PER_FRAME`] steps are returned; the excess time
    /// is dropped. While paused nothing accumulates and zero is returned.
    pub fn accumulate(&mut self, frame_millis: f64) -> u32 {
        if self.paused {
            return 0;
        }
        if frame_millis.is_finite() && frame_millis > 0.0 {
            self.accumulator += frame_millis;
        }
        self.accumulator = self
            .accumulator
            .min(self.step_millis * MAX_STEPS_PER_FRAME as f64);
        let steps = (self.accumulator / self.step_millis) as u32;
        self.accumulator -= steps as f64 * self.step_millis;
        steps
    }

    /// Interpolation alpha for rendering between ticks (0.0 to 1.0)
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.step_millis
    }

    /// The fixed step duration
    pub fn step_millis(&self) -> f64 {
        self.step_millis
    }

    /// Whether ticking is suspended
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Suspend or resume ticking; pausing drains the accumulator
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
        if paused {
            self.accumulator = 0.0;
        }
    }

    /// Flip the pause state, returning the new one
    pub fn toggle_pause(&mut self) -> bool {
        self.set_paused(!self.paused);
        self.paused
    }
}

/// Couples a fixed timestep, a physics engine and the entity store
pub struct GameLoop {
    timestep: FixedTimestep,
    engine: PhysicsEngine,
    store: EntityStore,
    camera: Option<Camera>,
    ticks: u64,
    last_stats: UpdateStats,
}

impl GameLoop {
    /// Create a loop ticking `engine` every `timestep` step
    pub fn new(timestep: FixedTimestep, engine: PhysicsEngine, store: EntityStore) -> Self {
        GameLoop {
            timestep,
            engine,
            store,
            camera: None,
            ticks: 0,
            last_stats: UpdateStats::default(),
        }
    }

    /// Attach a camera updated after every tick
    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Advance the simulation by one rendered frame
    ///
    /// Returns the number of physics ticks run.
    pub fn frame(&mut self, frame_millis: f64) -> u32 {
        let steps = self.timestep.accumulate(frame_millis);
        let step = self.timestep.step_millis();
        for _ in 0..steps {
            self.last_stats = self.engine.update(&mut self.store, step);
            if let Some(camera) = self.camera.as_mut() {
                camera.update(&self.store, step);
            }
            self.ticks += 1;
        }
        if steps == MAX_STEPS_PER_FRAME {
            log::debug!("Frame of {:.1}ms hit the {} tick cap", frame_millis, MAX_STEPS_PER_FRAME);
        }
        steps
    }

    /// Total ticks run since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Statistics of the last tick
    pub fn last_stats(&self) -> UpdateStats {
        self.last_stats
    }

    /// Get the timestep
    pub fn timestep(&self) -> &FixedTimestep {
        &self.timestep
    }

    /// Get the timestep for pausing and resuming
    pub fn timestep_mut(&mut self) -> &mut FixedTimestep {
        &mut self.timestep
    }

    /// Get the physics engine
    pub fn engine(&self) -> &PhysicsEngine {
        &self.engine
    }

    /// Get the physics engine for mutation between frames
    pub fn engine_mut(&mut self) -> &mut PhysicsEngine {
        &mut self.engine
    }

    /// Get the entity store
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// Get the entity store for mutation between frames
    pub fn store_mut(&mut self) -> &mut EntityStore {
        &mut self.store
    }

    /// Get the camera, if any
    pub fn camera(&self) -> Option<&Camera> {
        self.camera.as_ref()
    }
}
