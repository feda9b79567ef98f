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
//! Simulation world settings
//!
//! The [`World`] holds everything the engine needs besides the entities
//! themselves: the play area, gravity, the surrounding material and the
//! speed/acceleration limits. It is built once per session and then only
//! read, except for gravity which gameplay code may flip between ticks.

use crate::config::WorldConfig;
use crate::math::{Rect, Vector2};
use crate::physics::Material;

/// Physical settings shared by every entity in a simulation
#[derive(Debug, Clone, PartialEq)]
pub struct World {
    gravity: Vector2,
    /// Speeds below this magnitude snap to zero
    pub min_speed: f64,
    /// Maximum horizontal speed
    pub max_speed_x: f64,
    /// Maximum vertical speed
    pub max_speed_y: f64,
    /// Accelerations below this magnitude snap to zero
    pub min_acc: f64,
    /// Maximum horizontal acceleration
    pub max_acc_x: f64,
    /// Maximum vertical acceleration
    pub max_acc_y: f64,
    play_area: Rect,
    material: Material,
}

impl World {
    /// Default gravity, pointing down in screen space
    pub const DEFAULT_GRAVITY: Vector2 = Vector2::new(0.0, 0.981);

    /// Create a world with default limits and the given play area size
    pub fn new(width: f64, height: f64) -> Self {
        World {
            play_area: Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0)),
            ..World::default()
        }
    }

    /// Build a world from a configuration, enforcing its invariants
    ///
    /// Negative play-area extents become zero and every minimum threshold
    /// is lowered to its maximum when it exceeds it.
    pub fn from_config(config: &WorldConfig) -> Self {
        let mut world = World {
            gravity: config.gravity,
            min_speed: config.min_speed,
            max_speed_x: config.max_speed_x,
            max_speed_y: config.max_speed_y,
            min_acc: config.min_acc,
            max_acc_x: config.max_acc_x,
            max_acc_y: config.max_acc_y,
            play_area: Rect::new(
                0.0,
                0.0,
                config.play_area_width.max(0.0),
                config.play_area_height.max(0.0),
            ),
            material: config.material.clone(),
        };
        world.enforce_limits();
        world
    }

    fn enforce_limits(&mut self) {
        let max_speed = self.max_speed_x.min(self.max_speed_y);
        if self.min_speed > max_speed {
            log::warn!(
                "World min speed {} exceeds max speed {}, lowering it",
                self.min_speed,
                max_speed
            );
            self.min_speed = max_speed;
        }
        let max_acc = self.max_acc_x.min(self.max_acc_y);
        if self.min_acc > max_acc {
            log::warn!(
                "World min acceleration {} exceeds max acceleration {}, lowering it",
                self.min_acc,
                max_acc
            );
            self.min_acc = max_acc;
        }
    }

    /// Get the gravity vector
    pub fn gravity(&self) -> Vector2 {
        self.gravity
    }

    /// Replace the gravity vector (fluent)
    pub fn set_gravity(mut self, gravity: Vector2) -> Self {
        self.gravity = gravity;
        self
    }

    /// Replace the gravity vector in place
    pub fn update_gravity(&mut self, gravity: Vector2) {
        self.gravity = gravity;
    }

    /// Mutable access to the gravity vector
    pub fn gravity_mut(&mut self) -> &mut Vector2 {
        &mut self.gravity
    }

    /// Flip gravity to the opposite direction
    pub fn invert_gravity(&mut self) {
        self.gravity = -self.gravity;
    }

    /// Get the play area
    pub fn play_area(&self) -> Rect {
        self.play_area
    }

    /// Replace the play area size (fluent); negative extents become zero
    pub fn set_play_area(mut self, width: f64, height: f64) -> Self {
        self.play_area = Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0));
        self
    }

    /// Get the world material
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Replace the world material (fluent)
    pub fn set_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Replace the speed limits (fluent)
    pub fn set_speed_limits(mut self, min: f64, max_x: f64, max_y: f64) -> Self {
        self.min_speed = min;
        self.max_speed_x = max_x;
        self.max_speed_y = max_y;
        self.enforce_limits();
        self
    }

    /// Replace the acceleration limits (fluent)
    pub fn set_acceleration_limits(mut self, min: f64, max_x: f64, max_y: f64) -> Self {
        self.min_acc = min;
        self.max_acc_x = max_x;
        self.max_acc_y = max_y;
        self.enforce_limits();
        self
    }
}

impl Default for World {
    fn default() -> Self {
        World::from_config(&WorldConfig::default())
    }
}
