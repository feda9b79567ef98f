//! Entities and their storage
//!
//! This module provides the simulation data model:
//! - [`Entity`] with its builder, flags and contact bits
//! - Influencer zones tagged through [`EntityKind`]
//! - [`Behavior`] hooks invoked by the physics engine
//! - The [`EntityStore`] owning every entity

mod behavior;
mod entity;
mod influencer;
mod store;

pub use behavior::Behavior;
pub use entity::{ContactFlags, Entity, EntityId, IdAllocator, ObjectShape, PhysicType};
pub use influencer::{EntityKind, Influence, InfluenceZone};
pub(crate) use influencer::ActiveZone;
pub use store::EntityStore;
