//! Physics core
//!
//! - [`Material`] presets and merging
//! - [`World`] settings: play area, gravity, limits
//! - [`PhysicsEngine`] per-tick integration and constraint resolution
//! - [`ForceProvider`] standing world forces

mod constraint;
mod engine;
mod force;
mod material;
mod world;

pub use constraint::constrain_to_play_area;
pub use engine::{PhysicsEngine, UpdateStats, MAX_MASS, MIN_MASS, TIME_FACTOR};
pub use force::{ConstantForce, ForceProvider, ForceRegistry, LinearDrag};
pub use material::Material;
pub use world::World;
