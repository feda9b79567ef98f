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
//! Entity storage
//!
//! The [`EntityStore`] is the single owner of every simulation entity,
//! influencers included. Entities are keyed by their unique name; ids come
//! from the store's own [`IdAllocator`].

use crate::ecs::{Entity, EntityId, IdAllocator};
use std::collections::HashMap;

/// Keyed registry of all simulation entities
pub struct EntityStore {
    entities: HashMap<String, Entity>,
    ids: IdAllocator,
}

impl EntityStore {
    /// Create a new empty store
    pub fn new() -> Self {
        EntityStore {
            entities: HashMap::new(),
            ids: IdAllocator::new(),
        }
    }

    /// Issue a fresh entity id
    pub fn allocate_id(&mut self) -> EntityId {
        self.ids.allocate()
    }

    /// Build an unregistered entity with a freshly allocated id
    ///
    /// The entity still has to be passed to [`add`](Self::add).
    pub fn create(&mut self, name: impl Into<String>) -> Entity {
        let id = self.allocate_id();
        Entity::new(id, name)
    }

    /// Register an entity under its name
    ///
    /// Last write wins: an entity already registered under the same name is
    /// replaced and returned.
    pub fn add(&mut self, entity: Entity) -> Option<Entity> {
        self.ids.reserve_past(entity.id());
        let replaced = self.entities.insert(entity.name.clone(), entity);
        if let Some(old) = &replaced {
            log::debug!("Entity '{}' replaced ({})", old.name, old.id());
        }
        replaced
    }

    /// Look up an entity by name
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.entities.get(name)
    }

    /// Look up an entity by name for mutation
    ///
    /// Renaming the returned entity does not re-key it; remove and re-add it
    /// instead.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.get_mut(name)
    }

    /// Whether an entity is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.entities.contains_key(name)
    }

    /// Unregister an entity by name, returning it
    pub fn remove(&mut self, name: &str) -> Option<Entity> {
        self.entities.remove(name)
    }

    /// Remove entities whose name contains `filter`, oldest first
    ///
    /// With `limit` set, at most that many are removed. Returns the removed
    /// entities in id order.
    pub fn remove_matching(&mut self, filter: &str, limit: Option<usize>) -> Vec<Entity> {
        let mut names = self.names_matching(filter);
        if let Some(limit) = limit {
            names.truncate(limit);
        }
        names
            .iter()
            .filter_map(|name| self.entities.remove(name))
            .collect()
    }

    /// Names containing `filter`, ordered by entity id
    pub fn names_matching(&self, filter: &str) -> Vec<String> {
        let mut matching: Vec<&Entity> = self
            .entities
            .values()
            .filter(|e| e.name.contains(filter))
            .collect();
        matching.sort_by_key(|e| e.id());
        matching.into_iter().map(|e| e.name.clone()).collect()
    }

    /// Iterate over all entities in unspecified order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Iterate mutably over all entities in unspecified order
    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.values_mut()
    }

    /// All entities ordered by id
    pub fn snapshot(&self) -> Vec<&Entity> {
        let mut entities: Vec<&Entity> = self.entities.values().collect();
        entities.sort_by_key(|e| e.id());
        entities
    }

    /// Names of all entities ordered by id
    pub(crate) fn ordered_names(&self) -> Vec<String> {
        self.snapshot().into_iter().map(|e| e.name.clone()).collect()
    }

    /// Get the number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the store holds no entity
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Remove every entity
    ///
    /// The id allocator keeps counting so ids are never reused.
    pub fn clear(&mut self) {
        self.entities.clear();
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}
