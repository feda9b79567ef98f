//! 2D math primitives
//!
//! Value types shared by the entity store, the physics engine and the
//! camera: [`Vector2`] for every kinematic quantity and [`Rect`] for
//! play areas, bounding boxes and influencer zones.

mod rect;
mod vector;

pub use rect::Rect;
pub use vector::{ceil_value, clamp_magnitude, threshold_min_max, Vector2};
