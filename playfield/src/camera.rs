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
//! Tweened follow camera
//!
//! The camera eases towards centring its target entity in the viewport.
//! Renderers translate world-space entities by the camera position and draw
//! `stick_to_camera` entities untranslated.

use crate::ecs::{Entity, EntityStore};
use crate::math::{Rect, Vector2};

/// Longest elapsed time, in milliseconds, a single camera update accounts for
pub const MAX_CAMERA_STEP: f64 = 10.0;

/// Follow camera tracking an entity by name
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera name
    pub name: String,
    /// Top-left corner of the viewport in world space
    pub position: Vector2,
    target: Option<String>,
    tween: f64,
    viewport: Rect,
}

impl Camera {
    /// Create a camera at the origin with a `width` x `height` viewport
    pub fn new(name: impl Into<String>, width: f64, height: f64) -> Self {
        Camera {
            name: name.into(),
            position: Vector2::ZERO,
            target: None,
            tween: 1.0,
            viewport: Rect::new(0.0, 0.0, width.max(0.0), height.max(0.0)),
        }
    }

    /// Follow the entity registered under `name`
    pub fn with_target(mut self, name: impl Into<String>) -> Self {
        self.target = Some(name.into());
        self
    }

    /// Set the easing factor; 0 freezes the camera
    pub fn with_tween(mut self, tween: f64) -> Self {
        self.tween = tween;
        self
    }

    /// Name of the followed entity
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Easing factor
    pub fn tween(&self) -> f64 {
        self.tween
    }

    /// Viewport size, positioned at the camera
    pub fn view(&self) -> Rect {
        Rect::from_position_size(self.position, self.viewport.size())
    }

    /// Move towards the target
    ///
    /// Each axis moves by `ceil((target centre - viewport half size - position) * tween * elapsed)`
    /// with `elapsed` capped at [`MAX_CAMERA_STEP`]. Does nothing without a
    /// target or when the target is not in the store.
    pub fn update(&mut self, store: &EntityStore, elapsed: f64) {
        let Some(target) = self.target.as_deref().and_then(|name| store.get(name)) else {
            return;
        };
        let step = elapsed.clamp(0.0, MAX_CAMERA_STEP);
        let goal = target.position + target.size * 0.5 - self.viewport.size() * 0.5;
        let delta = (goal - self.position) * self.tween * step;
        if delta.is_valid() {
            self.position += Vector2::new(delta.x.ceil(), delta.y.ceil());
        }
    }

    /// Convert a world-space point to viewport coordinates
    pub fn to_screen(&self, point: Vector2) -> Vector2 {
        point - self.position
    }

    /// Whether an entity should be drawn through this camera
    ///
    /// Camera-locked entities are always visible.
    pub fn is_visible(&self, entity: &Entity) -> bool {
        entity.stick_to_camera || self.view().intersects(&entity.bounding_box())
    }

    /// Lines describing the camera for debug overlays
    pub fn debug_info(&self) -> Vec<String> {
        vec![
            format!("(1)name:{}", self.name),
            format!("(1)pos:{}", self.position),
            format!("(2)tgt:{}", self.target.as_deref().unwrap_or("-")),
            format!("(2)twn:{:.3}", self.tween),
        ]
    }
}
