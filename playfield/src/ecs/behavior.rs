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
//! Per-entity behavior hooks
//!
//! Behaviors are attached to entities and invoked by the physics engine at
//! fixed points of a tick:
//!
//! - `on_collision` runs on an influencer's behaviors for every dynamic
//!   entity overlapping the influencer zone, right after its material merge.
//! - `update` runs on a dynamic entity's own behaviors after its position
//!   has been integrated and constrained.

use crate::ecs::influencer::InfluenceZone;
use crate::ecs::Entity;

/// Hook invoked by the physics engine
///
/// Every method has an empty default so implementors only override what
/// they need.
pub trait Behavior: Send + Sync {
    /// Called once per tick for the entity owning this behavior
    fn update(&mut self, _entity: &mut Entity, _elapsed: f64) {}

    /// Called when `collider` overlaps the influencer owning this behavior
    fn on_collision(&mut self, _zone: &InfluenceZone, _collider: &mut Entity) {}

    /// Get the name of this behavior for debugging
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}
