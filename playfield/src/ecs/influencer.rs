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
//! Influencer zones
//!
//! An influencer is an entity tagged with [`EntityKind::Influencer`]. Its
//! bounding box is an area of effect: every dynamic entity overlapping it
//! gets the influencer material merged into its own for the tick, receives
//! the influencer forces (scaled by its density) and triggers the
//! influencer's `on_collision` hooks.

use crate::ecs::behavior::Behavior;
use crate::ecs::{Entity, EntityId};
use crate::math::{Rect, Vector2};
use crate::physics::Material;

/// What an entity is, as far as the engine is concerned
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EntityKind {
    /// Plain simulation object
    #[default]
    Object,
    /// Area-of-effect zone
    Influencer(Influence),
}

/// Effect an influencer applies to overlapping entities
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Influence {
    /// Material merged into the overlapping entity's material
    pub material: Option<Material>,
    /// Forces injected each tick, scaled by the entity density
    pub forces: Vec<Vector2>,
}

impl Influence {
    /// Create an influence with no material and no force
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Add a force
    pub fn with_force(mut self, force: Vector2) -> Self {
        self.forces.push(force);
        self
    }
}

/// Read-only view of an influencer handed to `on_collision` hooks
#[derive(Debug, Clone, PartialEq)]
pub struct InfluenceZone {
    /// Id of the influencer entity
    pub id: EntityId,
    /// Name of the influencer entity
    pub name: String,
    /// Area of effect
    pub area: Rect,
    /// Effect applied to overlapping entities
    pub influence: Influence,
}

/// Influencer prepared for one tick, with its hooks detached from the store
pub(crate) struct ActiveZone {
    pub(crate) zone: InfluenceZone,
    pub(crate) behaviors: Vec<Box<dyn Behavior>>,
}

impl ActiveZone {
    /// Detach an influencer's hooks; returns `None` for plain objects and
    /// inactive influencers
    pub(crate) fn detach(entity: &mut Entity) -> Option<ActiveZone> {
        if !entity.active {
            return None;
        }
        let influence = entity.influence()?.clone();
        Some(ActiveZone {
            zone: InfluenceZone {
                id: entity.id(),
                name: entity.name.clone(),
                area: Rect::from_position_size(entity.position, entity.size),
                influence,
            },
            behaviors: entity.take_behaviors(),
        })
    }

    /// Whether the zone overlaps a bounding box
    pub(crate) fn overlaps(&self, bounding_box: &Rect) -> bool {
        self.zone.area.intersects(bounding_box)
    }

    /// Run every `on_collision` hook against `collider`
    pub(crate) fn notify(&mut self, collider: &mut Entity) {
        for behavior in self.behaviors.iter_mut() {
            behavior.on_collision(&self.zone, collider);
        }
    }
}
