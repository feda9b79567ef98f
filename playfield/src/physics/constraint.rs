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
//! Play-area constraint resolution

use crate::ecs::{ContactFlags, Entity};
use crate::math::threshold_min_max;
use crate::physics::World;

/// Keep an entity inside the world play area
///
/// Boundary contact bits are reset first. Each edge the entity crosses
/// clamps its position back onto the edge, reflects the matching velocity
/// component scaled by `elasticity` and sets the matching contact bit.
/// Edges are checked right, bottom, left, top, so an entity larger than the
/// play area ends up pinned to the left and top edges.
///
/// Returns the boundary contact bits set by this pass.
pub fn constrain_to_play_area(entity: &mut Entity, world: &World, elasticity: f64) -> ContactFlags {
    let area = world.play_area();
    let mut contact = ContactFlags::empty();

    if entity.position.x + entity.size.x > area.right() {
        entity.position.x = area.right() - entity.size.x;
        entity.velocity.x = reflect(
            entity.velocity.x,
            elasticity,
            world.min_speed,
            world.max_speed_x,
        );
        contact.insert(ContactFlags::RIGHT);
    }
    if entity.position.y + entity.size.y > area.bottom() {
        entity.position.y = area.bottom() - entity.size.y;
        entity.velocity.y = reflect(
            entity.velocity.y,
            elasticity,
            world.min_speed,
            world.max_speed_y,
        );
        contact.insert(ContactFlags::BOTTOM);
    }
    if entity.position.x < area.x {
        entity.position.x = area.x;
        entity.velocity.x = reflect(
            entity.velocity.x,
            elasticity,
            world.min_speed,
            world.max_speed_x,
        );
        contact.insert(ContactFlags::LEFT);
    }
    if entity.position.y < area.y {
        entity.position.y = area.y;
        entity.velocity.y = reflect(
            entity.velocity.y,
            elasticity,
            world.min_speed,
            world.max_speed_y,
        );
        contact.insert(ContactFlags::TOP);
    }

    let flags = entity.contact_mut();
    flags.clear_boundary();
    flags.insert(contact);
    contact
}

fn reflect(speed: f64, elasticity: f64, min: f64, max: f64) -> f64 {
    threshold_min_max(-speed * elasticity, min, max)
}
