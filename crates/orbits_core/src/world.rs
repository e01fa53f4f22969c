//! World container for entities
//!
//! The World owns every node of the scene graph. Entities are stored in a
//! slotmap so keys stay valid while other entities are added, and each entity
//! may point at a parent whose transform it inherits.

use slotmap::{new_key_type, SlotMap};
use orbits_math::{mat4, Mat4};
use crate::Entity;

new_key_type! {
    /// Generational key to an entity in the world
    pub struct EntityKey;
}

/// The scene graph containing all entities
pub struct World {
    entities: SlotMap<EntityKey, Entity>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Create a new empty world
    pub fn new() -> Self {
        Self {
            entities: SlotMap::with_key(),
        }
    }

    /// Create a world with pre-allocated capacity for entities
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Add a root entity to the world, returning its key
    pub fn add_entity(&mut self, entity: Entity) -> EntityKey {
        self.entities.insert(entity)
    }

    /// Add an entity as a child of `parent`
    ///
    /// Returns `None` (and does not insert) if the parent key is stale.
    pub fn add_child(&mut self, parent: EntityKey, mut entity: Entity) -> Option<EntityKey> {
        if !self.entities.contains_key(parent) {
            return None;
        }
        entity.parent = Some(parent);
        Some(self.entities.insert(entity))
    }

    /// Get a reference to an entity by key
    pub fn get_entity(&self, key: EntityKey) -> Option<&Entity> {
        self.entities.get(key)
    }

    /// Get a mutable reference to an entity by key
    pub fn get_entity_mut(&mut self, key: EntityKey) -> Option<&mut Entity> {
        self.entities.get_mut(key)
    }

    /// Find the first entity with the given name
    pub fn get_by_name(&self, name: &str) -> Option<(EntityKey, &Entity)> {
        self.entities
            .iter()
            .find(|(_, e)| e.name.as_deref() == Some(name))
    }

    /// Keys of all entities carrying the given tag
    pub fn keys_with_tag(&self, tag: &str) -> Vec<EntityKey> {
        self.entities
            .iter()
            .filter(|(_, e)| e.has_tag(tag))
            .map(|(k, _)| k)
            .collect()
    }

    /// Direct children of `parent`
    pub fn children(&self, parent: EntityKey) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities
            .iter()
            .filter(move |(_, e)| e.parent == Some(parent))
    }

    /// Get the number of entities
    #[inline]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Check if the world is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterate over keys and entities
    pub fn iter_with_keys(&self) -> impl Iterator<Item = (EntityKey, &Entity)> {
        self.entities.iter()
    }

    /// Iterate over all entities mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityKey, &mut Entity)> {
        self.entities.iter_mut()
    }

    /// Local-to-world matrix, composing every ancestor's transform
    ///
    /// Returns `None` for stale keys.
    pub fn world_matrix(&self, key: EntityKey) -> Option<Mat4> {
        let entity = self.entities.get(key)?;
        let local = entity.transform.to_matrix();
        match entity.parent {
            Some(parent) => Some(mat4::mul(self.world_matrix(parent)?, local)),
            None => Some(local),
        }
    }

    /// True if the entity or any ancestor has a dirty transform
    pub fn needs_transform_update(&self, key: EntityKey) -> bool {
        let mut current = Some(key);
        while let Some(k) = current {
            match self.entities.get(k) {
                Some(e) if e.is_dirty() => return true,
                Some(e) => current = e.parent,
                None => return false,
            }
        }
        false
    }

    /// Check whether any entity has pending changes
    pub fn has_dirty_entities(&self) -> bool {
        self.entities.values().any(|e| e.is_dirty())
    }

    /// Clear dirty flags on every entity
    pub fn clear_all_dirty(&mut self) {
        for entity in self.entities.values_mut() {
            entity.clear_dirty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Transform, Vec3};
    use orbits_math::mat4::transform_point;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_world_new() {
        let world = World::new();
        assert!(world.is_empty());
        assert_eq!(world.entity_count(), 0);
    }

    #[test]
    fn test_add_and_lookup_by_name() {
        let mut world = World::with_capacity(2);
        let key = world.add_entity(Entity::group().with_name("orbit"));
        let (found, _) = world.get_by_name("orbit").unwrap();
        assert_eq!(found, key);
        assert!(world.get_by_name("missing").is_none());
    }

    #[test]
    fn test_add_child_with_stale_parent() {
        let mut other = World::new();
        let parent = other.add_entity(Entity::group());
        let mut world = World::new();
        assert!(world.add_child(parent, Entity::group()).is_none());
        assert!(world.is_empty());
    }

    #[test]
    fn test_world_matrix_inherits_parent() {
        let mut world = World::new();
        let group = world.add_entity(
            Entity::group().with_transform(
                Transform::from_position(Vec3::new(0.0, -0.9, 0.0))
                    .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0)),
            ),
        );
        let child = world
            .add_child(group, Entity::group().with_transform(Transform::from_position(Vec3::new(4.4, 0.0, 0.0))))
            .unwrap();

        let p = transform_point(world.world_matrix(child).unwrap(), Vec3::ZERO);
        // +X rotated a quarter turn about Y lands on -Z, then dropped by 0.9
        assert!((p - Vec3::new(0.0, -0.9, -4.4)).length() < 1e-5, "{:?}", p);
    }

    #[test]
    fn test_children_and_tags() {
        let mut world = World::new();
        let group = world.add_entity(Entity::group());
        for _ in 0..4 {
            world.add_child(group, Entity::group().with_tag("body")).unwrap();
        }
        world.add_entity(Entity::group().with_tag("backdrop"));

        assert_eq!(world.children(group).count(), 4);
        assert_eq!(world.keys_with_tag("body").len(), 4);
        assert_eq!(world.keys_with_tag("backdrop").len(), 1);
    }

    #[test]
    fn test_parent_dirtiness_propagates() {
        let mut world = World::new();
        let group = world.add_entity(Entity::group());
        let child = world.add_child(group, Entity::group()).unwrap();
        world.clear_all_dirty();
        assert!(!world.has_dirty_entities());
        assert!(!world.needs_transform_update(child));

        world.get_entity_mut(group).unwrap().set_rotation_y(1.0);
        assert!(world.needs_transform_update(child));
        assert!(world.has_dirty_entities());
    }
}
