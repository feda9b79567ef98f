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
//! Simulation entities
//!
//! An [`Entity`] is a single struct carrying kinematic state (position,
//! velocity, acceleration), physical state (mass, material, pending forces)
//! and the flags the engine and renderer read (physic type, active,
//! camera lock, contact bits, layer and priority). Entities are built with
//! by-value `with_*` methods and handed to the
//! [`EntityStore`](crate::ecs::EntityStore), which owns them.

use crate::ecs::behavior::Behavior;
use crate::ecs::influencer::{EntityKind, Influence};
use crate::math::{Rect, Vector2};
use crate::physics::Material;
use std::fmt;

/// Unique identifier for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    /// Create a new EntityId from a raw u64 value
    pub fn new(id: u64) -> Self {
        EntityId(id)
    }

    /// Get the raw u64 value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic entity id source
///
/// Each store owns one allocator so id issuance is deterministic and
/// independent from any other store.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// Create an allocator whose first id is 1
    pub fn new() -> Self {
        IdAllocator { next: 1 }
    }

    /// Issue the next id
    ///
    /// Once the id space is exhausted every call returns `u64::MAX`.
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        match self.next.checked_add(1) {
            Some(next) => self.next = next,
            None => log::warn!("Entity ids exhausted, reusing {}", id),
        }
        id
    }

    /// The id the next call to [`allocate`](Self::allocate) will return
    pub fn peek(&self) -> EntityId {
        EntityId(self.next)
    }

    /// Make sure future ids are strictly greater than `id`
    pub fn reserve_past(&mut self, id: EntityId) {
        if id.0 >= self.next {
            if id.0 == u64::MAX {
                log::warn!("{} is the last entity id, later ids will repeat it", id);
            }
            self.next = id.0.saturating_add(1);
        }
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// How the physics engine treats an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhysicType {
    /// Never moved by the engine
    Static,
    /// Integrated every tick
    #[default]
    Dynamic,
}

/// Shape hint for renderers; the engine always collides bounding boxes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectShape {
    /// Single point at the entity position
    Point,
    /// Segment from position to position + size
    Line,
    /// Filled rectangle
    #[default]
    Rectangle,
    /// Ellipse inscribed in the bounding box
    Ellipse,
    /// Sprite image stretched over the bounding box
    Image,
}

/// Per-tick contact bitmask
///
/// The four low bits tell which play-area edge an entity touched during the
/// last constraint pass; [`ContactFlags::INFLUENCED`] tells that at least one
/// influencer zone overlapped it during the last tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ContactFlags(u8);

impl ContactFlags {
    /// Touching the right edge
    pub const RIGHT: ContactFlags = ContactFlags(1);
    /// Touching the bottom edge
    pub const BOTTOM: ContactFlags = ContactFlags(2);
    /// Touching the left edge
    pub const LEFT: ContactFlags = ContactFlags(4);
    /// Touching the top edge
    pub const TOP: ContactFlags = ContactFlags(8);
    /// Inside at least one influencer zone
    pub const INFLUENCED: ContactFlags = ContactFlags(16);

    const BOUNDARY_MASK: u8 = 0b1111;

    /// No contact at all
    pub fn empty() -> Self {
        ContactFlags(0)
    }

    /// Build flags from raw bits
    pub fn from_bits(bits: u8) -> Self {
        ContactFlags(bits)
    }

    /// Raw bits
    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Whether every bit of `other` is set
    pub fn contains(&self, other: ContactFlags) -> bool {
        self.0 & other.0 == other.0
    }

    /// Set the bits of `other`
    pub fn insert(&mut self, other: ContactFlags) {
        self.0 |= other.0;
    }

    /// Clear the bits of `other`
    pub fn remove(&mut self, other: ContactFlags) {
        self.0 &= !other.0;
    }

    /// Whether no bit is set
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Only the play-area edge bits
    pub fn boundary(&self) -> ContactFlags {
        ContactFlags(self.0 & Self::BOUNDARY_MASK)
    }

    /// Whether any play-area edge is touched
    pub fn has_boundary_contact(&self) -> bool {
        self.0 & Self::BOUNDARY_MASK != 0
    }

    /// Clear the play-area edge bits, keep the others
    pub fn clear_boundary(&mut self) {
        self.0 &= !Self::BOUNDARY_MASK;
    }
}

impl std::ops::BitOr for ContactFlags {
    type Output = ContactFlags;

    fn bitor(self, rhs: ContactFlags) -> ContactFlags {
        ContactFlags(self.0 | rhs.0)
    }
}

/// A simulation object
///
/// # Examples
///
/// ```
/// use playfield::ecs::{Entity, EntityId, PhysicType};
/// use playfield::math::Vector2;
/// use playfield::physics::Material;
///
/// let ball = Entity::new(EntityId::new(1), "ball")
///     .with_position(10.0, 20.0)
///     .with_size(16.0, 16.0)
///     .with_mass(2.0)
///     .with_material(Material::rubber())
///     .with_force(Vector2::new(1.0, 0.0));
///
/// assert_eq!(ball.physic_type, PhysicType::Dynamic);
/// assert_eq!(ball.bounding_box().right(), 26.0);
/// ```
pub struct Entity {
    id: EntityId,
    /// Unique key in the store
    pub name: String,
    /// Top-left corner
    pub position: Vector2,
    /// Width and height
    pub size: Vector2,
    /// Current velocity
    pub velocity: Vector2,
    /// Acceleration computed during the last tick
    pub acceleration: Vector2,
    /// Mass, expected to be strictly positive
    pub mass: f64,
    /// Material; `None` falls back to the world material
    pub material: Option<Material>,
    forces: Vec<Vector2>,
    /// Static entities are never integrated
    pub physic_type: PhysicType,
    /// Inactive entities are skipped by the engine
    pub active: bool,
    /// Camera-locked entities live in screen space and are skipped by the engine
    pub stick_to_camera: bool,
    contact: ContactFlags,
    bounding_box: Rect,
    /// Render layer
    pub layer: i32,
    /// Render priority inside a layer
    pub priority: i32,
    /// Render shape hint
    pub shape: ObjectShape,
    /// Debug overlay level (0 = hidden)
    pub debug: u8,
    kind: EntityKind,
    behaviors: Vec<Box<dyn Behavior>>,
}

impl Entity {
    /// Create a dynamic, active entity at the origin with unit mass
    pub fn new(id: EntityId, name: impl Into<String>) -> Self {
        Entity {
            id,
            name: name.into(),
            position: Vector2::ZERO,
            size: Vector2::ZERO,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            mass: 1.0,
            material: Some(Material::default_material()),
            forces: Vec::new(),
            physic_type: PhysicType::Dynamic,
            active: true,
            stick_to_camera: false,
            contact: ContactFlags::empty(),
            bounding_box: Rect::default(),
            layer: 1,
            priority: 1,
            shape: ObjectShape::Rectangle,
            debug: 0,
            kind: EntityKind::Object,
            behaviors: Vec::new(),
        }
    }

    /// Create an influencer zone covering `area`
    ///
    /// Influencers are static and never integrated; they alter the material
    /// and forces of the dynamic entities overlapping them.
    pub fn influencer(id: EntityId, name: impl Into<String>, area: Rect) -> Self {
        Entity::new(id, name)
            .with_position(area.x, area.y)
            .with_size(area.width, area.height)
            .with_physic_type(PhysicType::Static)
            .with_kind(EntityKind::Influencer(Influence::default()))
    }

    // -- Builder methods --

    /// Set the position
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.position = Vector2::new(x, y);
        self.update_box();
        self
    }

    /// Set the size
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Vector2::new(width, height);
        self.update_box();
        self
    }

    /// Set the velocity
    pub fn with_velocity(mut self, dx: f64, dy: f64) -> Self {
        self.velocity = Vector2::new(dx, dy);
        self
    }

    /// Set the acceleration
    pub fn with_acceleration(mut self, ax: f64, ay: f64) -> Self {
        self.acceleration = Vector2::new(ax, ay);
        self
    }

    /// Set the mass
    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }

    /// Set the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = Some(material);
        self
    }

    /// Remove the material so the world material is used instead
    pub fn without_material(mut self) -> Self {
        self.material = None;
        self
    }

    /// Queue a force for the next tick
    pub fn with_force(mut self, force: Vector2) -> Self {
        self.forces.push(force);
        self
    }

    /// Set the physic type
    pub fn with_physic_type(mut self, physic_type: PhysicType) -> Self {
        self.physic_type = physic_type;
        self
    }

    /// Set the active flag
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Set the camera-lock flag
    pub fn with_stick_to_camera(mut self, stick: bool) -> Self {
        self.stick_to_camera = stick;
        self
    }

    /// Set the render layer
    pub fn with_layer(mut self, layer: i32) -> Self {
        self.layer = layer;
        self
    }

    /// Set the render priority
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the render shape
    pub fn with_shape(mut self, shape: ObjectShape) -> Self {
        self.shape = shape;
        self
    }

    /// Set the debug overlay level
    pub fn with_debug(mut self, level: u8) -> Self {
        self.debug = level;
        self
    }

    /// Set the entity kind
    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = kind;
        self
    }

    /// Attach a behavior hook
    pub fn with_behavior<B: Behavior + 'static>(mut self, behavior: B) -> Self {
        self.behaviors.push(Box::new(behavior));
        self
    }

    /// Set the material an influencer imposes on overlapping entities
    ///
    /// Turns a plain object into an influencer if needed.
    pub fn with_influence_material(mut self, material: Material) -> Self {
        self.influence_mut().material = Some(material);
        self
    }

    /// Add a force an influencer injects into overlapping entities
    ///
    /// Turns a plain object into an influencer if needed.
    pub fn with_influence_force(mut self, force: Vector2) -> Self {
        self.influence_mut().forces.push(force);
        self
    }

    // -- Accessors --

    /// Get the entity id
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Get the entity name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the queued forces for the next tick
    pub fn forces(&self) -> &[Vector2] {
        &self.forces
    }

    /// Queue a force for the next tick
    pub fn add_force(&mut self, force: Vector2) {
        self.forces.push(force);
    }

    /// Drop every queued force
    pub fn clear_forces(&mut self) {
        self.forces.clear();
    }

    /// Contact flags from the last tick
    pub fn contact(&self) -> ContactFlags {
        self.contact
    }

    pub(crate) fn contact_mut(&mut self) -> &mut ContactFlags {
        &mut self.contact
    }

    /// Axis-aligned bounding box, refreshed after every tick
    pub fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    /// Recompute the bounding box from position and size
    pub fn update_box(&mut self) {
        self.bounding_box = Rect::from_position_size(self.position, self.size);
    }

    /// Entity kind
    pub fn kind(&self) -> &EntityKind {
        &self.kind
    }

    /// Whether this entity is an influencer zone
    pub fn is_influencer(&self) -> bool {
        matches!(self.kind, EntityKind::Influencer(_))
    }

    /// Influence data for influencers
    pub fn influence(&self) -> Option<&Influence> {
        match &self.kind {
            EntityKind::Influencer(influence) => Some(influence),
            EntityKind::Object => None,
        }
    }

    fn influence_mut(&mut self) -> &mut Influence {
        if let EntityKind::Object = self.kind {
            self.kind = EntityKind::Influencer(Influence::default());
            self.physic_type = PhysicType::Static;
        }
        match &mut self.kind {
            EntityKind::Influencer(influence) => influence,
            EntityKind::Object => unreachable!("kind was just set to Influencer"),
        }
    }

    /// Number of attached behavior hooks
    pub fn behavior_count(&self) -> usize {
        self.behaviors.len()
    }

    /// Attach a behavior hook to an existing entity
    pub fn add_behavior(&mut self, behavior: Box<dyn Behavior>) {
        self.behaviors.push(behavior);
    }

    pub(crate) fn take_behaviors(&mut self) -> Vec<Box<dyn Behavior>> {
        std::mem::take(&mut self.behaviors)
    }

    /// Put hooks back after a [`take_behaviors`](Self::take_behaviors),
    /// keeping any hook attached in the meantime after them
    pub(crate) fn restore_behaviors(&mut self, mut behaviors: Vec<Box<dyn Behavior>>) {
        behaviors.append(&mut self.behaviors);
        self.behaviors = behaviors;
    }

    /// Run every `update` hook against this entity
    pub(crate) fn run_update_hooks(&mut self, elapsed: f64) {
        if self.behaviors.is_empty() {
            return;
        }
        let mut behaviors = self.take_behaviors();
        for behavior in behaviors.iter_mut() {
            behavior.update(self, elapsed);
        }
        self.restore_behaviors(behaviors);
    }

    /// Whether the engine integrates this entity
    pub fn is_simulated(&self) -> bool {
        self.active
            && !self.stick_to_camera
            && self.physic_type == PhysicType::Dynamic
            && !self.is_influencer()
    }

    /// Whether position, velocity and acceleration are all finite
    pub fn is_valid(&self) -> bool {
        self.position.is_valid() && self.velocity.is_valid() && self.acceleration.is_valid()
    }

    /// Lines describing the entity for debug overlays
    ///
    /// Each line starts with the minimum debug level, in parentheses, at
    /// which a renderer should show it.
    pub fn debug_info(&self) -> Vec<String> {
        let mut info = vec![
            format!("(1)id:{:04}", self.id.raw()),
            format!("(1)name:{}", self.name),
            format!("(2)type:{:?}", self.shape),
            format!("(2)pos:{:4.2},{:4.2}", self.position.x, self.position.y),
            format!("(2)size:{:4.2},{:4.2}", self.size.x, self.size.y),
            format!("(3)spd:{:4.2},{:4.2}", self.velocity.x, self.velocity.y),
            format!("(3)acc:{:4.2},{:4.2}", self.acceleration.x, self.acceleration.y),
            format!("(3)contact:{:05b}", self.contact.bits()),
        ];
        if let Some(material) = &self.material {
            info.push(format!("(4)mat:{}", material));
        }
        info
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("position", &self.position)
            .field("size", &self.size)
            .field("velocity", &self.velocity)
            .field("acceleration", &self.acceleration)
            .field("mass", &self.mass)
            .field("material", &self.material)
            .field("forces", &self.forces)
            .field("physic_type", &self.physic_type)
            .field("active", &self.active)
            .field("stick_to_camera", &self.stick_to_camera)
            .field("contact", &self.contact)
            .field("kind", &self.kind)
            .field("behaviors", &self.behaviors.len())
            .finish()
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Entity[name:{};pos:{};spd:{};acc:{}]",
            self.name, self.position, self.velocity, self.acceleration
        )
    }
}
