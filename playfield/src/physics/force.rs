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
//! Standing world forces
//!
//! Besides gravity and the forces queued on an entity, the engine asks every
//! registered [`ForceProvider`] for a force at the start of each entity
//! update. Providers model anything that acts continuously: wind, drag,
//! attraction towards a point.

use crate::ecs::Entity;
use crate::math::Vector2;
use crate::physics::World;

/// Trait for force providers that can be registered with the force registry
pub trait ForceProvider: Send + Sync {
    /// Compute the force to apply to a specific entity
    ///
    /// Returns None if this provider doesn't apply to the entity.
    fn compute_force(&self, entity: &Entity, world: &World) -> Option<Vector2>;

    /// Get a descriptive name for this force provider
    fn name(&self) -> &str;
}

/// The same force for every entity, optionally restricted to names
/// containing a filter
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantForce {
    name: String,
    force: Vector2,
    filter: Option<String>,
}

impl ConstantForce {
    /// Create a force applied to every entity
    pub fn new(name: impl Into<String>, force: Vector2) -> Self {
        ConstantForce {
            name: name.into(),
            force,
            filter: None,
        }
    }

    /// Restrict the force to entities whose name contains `filter`
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }
}

impl ForceProvider for ConstantForce {
    fn compute_force(&self, entity: &Entity, _world: &World) -> Option<Vector2> {
        match &self.filter {
            Some(filter) if !entity.name.contains(filter.as_str()) => None,
            _ => Some(self.force),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Linear drag opposing the entity velocity
#[derive(Debug, Clone, PartialEq)]
pub struct LinearDrag {
    coefficient: f64,
}

impl LinearDrag {
    /// Create a drag force `-coefficient * velocity`
    pub fn new(coefficient: f64) -> Self {
        LinearDrag { coefficient }
    }
}

impl ForceProvider for LinearDrag {
    fn compute_force(&self, entity: &Entity, _world: &World) -> Option<Vector2> {
        if entity.velocity.is_zero() {
            return None;
        }
        Some(entity.velocity * -self.coefficient)
    }

    fn name(&self) -> &str {
        "LinearDrag"
    }
}

/// Registry of standing force providers
///
/// Invalid (NaN/Inf) forces are dropped and forces whose magnitude exceeds
/// `max_force_magnitude` are scaled down to it.
pub struct ForceRegistry {
    providers: Vec<Box<dyn ForceProvider>>,
    /// Configuration for overflow detection
    pub max_force_magnitude: f64,
    /// Whether to log warnings for dropped or clamped forces
    pub warn_on_invalid: bool,
}

impl ForceRegistry {
    /// Create a new force registry
    pub fn new() -> Self {
        ForceRegistry {
            providers: Vec::new(),
            max_force_magnitude: 1e10,
            warn_on_invalid: true,
        }
    }

    /// Register a force provider
    pub fn register_provider(&mut self, provider: Box<dyn ForceProvider>) {
        self.providers.push(provider);
    }

    /// Remove every provider whose name matches
    ///
    /// Returns how many providers were removed.
    pub fn unregister(&mut self, name: &str) -> usize {
        let before = self.providers.len();
        self.providers.retain(|p| p.name() != name);
        before - self.providers.len()
    }

    /// Clear all providers
    pub fn clear(&mut self) {
        self.providers.clear();
    }

    /// Get the number of registered providers
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Queue every provider's force on `entity`
    ///
    /// Returns how many forces were queued.
    pub fn accumulate_for_entity(&self, entity: &mut Entity, world: &World) -> usize {
        let mut queued = 0;
        for provider in &self.providers {
            let Some(mut force) = provider.compute_force(entity, world) else {
                continue;
            };
            if !force.is_valid() {
                if self.warn_on_invalid {
                    log::warn!(
                        "Force provider '{}' produced invalid force (NaN/Inf) for {:?}",
                        provider.name(),
                        entity.name
                    );
                }
                continue;
            }
            let magnitude = force.length();
            if magnitude > self.max_force_magnitude {
                if self.warn_on_invalid {
                    log::warn!(
                        "Force magnitude {:.2e} from '{}' exceeds limit {:.2e} for {:?}",
                        magnitude,
                        provider.name(),
                        self.max_force_magnitude,
                        entity.name
                    );
                }
                force = force * (self.max_force_magnitude / magnitude);
            }
            entity.add_force(force);
            queued += 1;
        }
        queued
    }
}

impl Default for ForceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::EntityId;

    struct TestForceProvider {
        force: Vector2,
    }

    impl ForceProvider for TestForceProvider {
        fn compute_force(&self, _entity: &Entity, _world: &World) -> Option<Vector2> {
            Some(self.force)
        }

        fn name(&self) -> &str {
            "TestForceProvider"
        }
    }

    fn entity() -> Entity {
        Entity::new(EntityId::new(1), "probe")
    }

    #[test]
    fn test_force_registry() {
        let mut registry = ForceRegistry::new();
        assert_eq!(registry.provider_count(), 0);

        registry.register_provider(Box::new(TestForceProvider {
            force: Vector2::new(10.0, 0.0),
        }));
        assert_eq!(registry.provider_count(), 1);
        assert_eq!(registry.unregister("TestForceProvider"), 1);
        assert_eq!(registry.provider_count(), 0);
    }

    #[test]
    fn test_force_accumulation() {
        let mut registry = ForceRegistry::new();
        registry.register_provider(Box::new(TestForceProvider {
            force: Vector2::new(10.0, 0.0),
        }));
        registry.register_provider(Box::new(TestForceProvider {
            force: Vector2::new(0.0, 20.0),
        }));

        let mut e = entity();
        assert_eq!(registry.accumulate_for_entity(&mut e, &World::default()), 2);
        assert_eq!(Vector2::add_all(e.forces()), Vector2::new(10.0, 20.0));
    }

    #[test]
    fn test_invalid_force_is_dropped() {
        let mut registry = ForceRegistry::new();
        registry.warn_on_invalid = false;
        registry.register_provider(Box::new(TestForceProvider {
            force: Vector2::new(f64::NAN, 0.0),
        }));

        let mut e = entity();
        assert_eq!(registry.accumulate_for_entity(&mut e, &World::default()), 0);
        assert!(e.forces().is_empty());
    }

    #[test]
    fn test_force_overflow_detection() {
        let mut registry = ForceRegistry::new();
        registry.max_force_magnitude = 100.0;
        registry.warn_on_invalid = false;
        registry.register_provider(Box::new(TestForceProvider {
            force: Vector2::new(1000.0, 0.0),
        }));

        let mut e = entity();
        registry.accumulate_for_entity(&mut e, &World::default());
        assert!(e.forces()[0].length() <= 100.0 + 1e-6);
    }

    #[test]
    fn test_constant_force_filter() {
        let wind = ConstantForce::new("wind", Vector2::new(0.5, 0.0)).with_filter("ball_");
        let world = World::default();
        assert_eq!(
            wind.compute_force(&Entity::new(EntityId::new(1), "ball_1"), &world),
            Some(Vector2::new(0.5, 0.0))
        );
        assert_eq!(
            wind.compute_force(&Entity::new(EntityId::new(2), "player"), &world),
            None
        );
    }

    #[test]
    fn test_linear_drag_opposes_velocity() {
        let drag = LinearDrag::new(0.5);
        let world = World::default();
        let moving = entity().with_velocity(4.0, -2.0);
        assert_eq!(
            drag.compute_force(&moving, &world),
            Some(Vector2::new(-2.0, 1.0))
        );
        assert_eq!(drag.compute_force(&entity(), &world), None);
    }
}
