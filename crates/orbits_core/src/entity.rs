//! Entity and Material types
//!
//! An Entity is a node in the scene graph with a transform, an optional mesh,
//! a material, and an optional parent.

use std::collections::HashSet;
use std::sync::Arc;
use bitflags::bitflags;
use orbits_math::SphereMesh;
use serde::{Serialize, Deserialize};
use crate::{EntityKey, Transform};

bitflags! {
    /// Flags indicating which parts of an entity have changed and need updating
    ///
    /// Used so the renderer only rewrites uniforms for entities that moved or
    /// changed appearance since the last frame.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct DirtyFlags: u8 {
        /// No changes
        const NONE = 0;
        /// Transform (position, rotation, scale) has changed
        const TRANSFORM = 1 << 0;
        /// Mesh has changed
        const MESH = 1 << 1;
        /// Material has changed
        const MATERIAL = 1 << 2;
        /// All flags set - entity needs full rebuild
        const ALL = Self::TRANSFORM.bits() | Self::MESH.bits() | Self::MATERIAL.bits();
    }
}

/// Which faces of a mesh are drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceSide {
    /// Outside faces only
    #[default]
    Front,
    /// Inside faces only (used for the backdrop shell)
    Back,
    /// Both sides
    Double,
}

/// Surface properties of an entity
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color as RGBA, multiplied with the texture
    pub base_color: [f32; 4],
    /// Overall opacity; values below 1.0 enable alpha blending
    pub opacity: f32,
    /// Which faces are rendered
    pub side: FaceSide,
    /// Surface roughness (1.0 = fully diffuse)
    pub roughness: f32,
    /// Metalness (0.0 = dielectric)
    pub metalness: f32,
    /// Color texture path; `None` or a failed load renders untextured
    pub texture: Option<String>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: [1.0, 1.0, 1.0, 1.0],
            opacity: 1.0,
            side: FaceSide::Front,
            roughness: 1.0,
            metalness: 0.0,
            texture: None,
        }
    }
}

impl Material {
    /// White material
    pub const WHITE: Self = Self {
        base_color: [1.0, 1.0, 1.0, 1.0],
        opacity: 1.0,
        side: FaceSide::Front,
        roughness: 1.0,
        metalness: 0.0,
        texture: None,
    };

    /// Create an opaque material with the given texture
    pub fn textured(path: impl Into<String>) -> Self {
        Self {
            texture: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_side(mut self, side: FaceSide) -> Self {
        self.side = side;
        self
    }

    /// Whether this material needs the alpha-blended pass
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.opacity < 1.0 || self.base_color[3] < 1.0
    }
}

/// Reference to a mesh, or nothing for pure grouping nodes
#[derive(Clone, Debug, Default)]
pub enum MeshRef {
    /// Grouping node without geometry
    #[default]
    Empty,
    /// A shared sphere mesh (several entities can reference the same one)
    Sphere(Arc<SphereMesh>),
}

impl MeshRef {
    /// Create a shared sphere mesh reference
    pub fn sphere(mesh: SphereMesh) -> Self {
        Self::Sphere(Arc::new(mesh))
    }

    /// Get the underlying mesh, if any
    pub fn as_sphere(&self) -> Option<&SphereMesh> {
        match self {
            MeshRef::Empty => None,
            MeshRef::Sphere(mesh) => Some(mesh.as_ref()),
        }
    }
}

/// A node in the scene graph
///
/// Each entity has:
/// - An optional name (for lookup by name)
/// - Tags (for categorization and filtering)
/// - A transform relative to its parent
/// - A mesh (or [`MeshRef::Empty`] for groups)
/// - A material
/// - An optional parent key
/// - Dirty flags (for change tracking)
pub struct Entity {
    /// Optional name for this entity (for lookup)
    pub name: Option<String>,
    /// Tags for categorization (e.g., "body", "backdrop")
    pub tags: HashSet<String>,
    /// The entity's transform relative to its parent
    pub transform: Transform,
    /// The entity's mesh
    pub mesh: MeshRef,
    /// The entity's material
    pub material: Material,
    /// Parent node; `None` for roots
    pub(crate) parent: Option<EntityKey>,
    dirty: DirtyFlags,
}

impl Entity {
    /// Create a new entity with the given mesh
    pub fn new(mesh: MeshRef) -> Self {
        Self {
            name: None,
            tags: HashSet::new(),
            transform: Transform::identity(),
            mesh,
            material: Material::default(),
            parent: None,
            dirty: DirtyFlags::ALL, // New entities are dirty
        }
    }

    /// Create a grouping node with no geometry
    pub fn group() -> Self {
        Self::new(MeshRef::Empty)
    }

    /// Create a new entity with mesh and material
    pub fn with_material(mesh: MeshRef, material: Material) -> Self {
        Self {
            material,
            ..Self::new(mesh)
        }
    }

    /// Set the name of this entity (for lookup)
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add a tag to this entity
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Set the initial transform
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Check if this entity has a specific tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Parent key, if this entity is attached to a group
    #[inline]
    pub fn parent(&self) -> Option<EntityKey> {
        self.parent
    }

    // --- Dirty tracking methods ---

    /// Check if this entity has any dirty flags set
    #[inline]
    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Get the current dirty flags
    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty
    }

    /// Mark this entity as dirty with the given flags
    #[inline]
    pub fn mark_dirty(&mut self, flags: DirtyFlags) {
        self.dirty |= flags;
    }

    /// Clear all dirty flags
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = DirtyFlags::NONE;
    }

    /// Set the Y rotation and mark the transform dirty
    pub fn set_rotation_y(&mut self, angle: f32) {
        if self.transform.rotation.y != angle {
            self.transform.rotation.y = angle;
            self.mark_dirty(DirtyFlags::TRANSFORM);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_default() {
        let m = Material::default();
        assert_eq!(m.base_color, [1.0, 1.0, 1.0, 1.0]);
        assert!(!m.is_transparent());
        assert_eq!(m.side, FaceSide::Front);
        assert!(m.texture.is_none());
    }

    #[test]
    fn test_material_builders() {
        let m = Material::textured("stars.jpg")
            .with_opacity(0.5)
            .with_side(FaceSide::Back);
        assert_eq!(m.texture.as_deref(), Some("stars.jpg"));
        assert!(m.is_transparent());
        assert_eq!(m.side, FaceSide::Back);
    }

    #[test]
    fn test_new_entity_is_dirty() {
        let entity = Entity::new(MeshRef::sphere(SphereMesh::new(1.0, 8, 4)));
        assert!(entity.is_dirty());
        assert_eq!(entity.dirty_flags(), DirtyFlags::ALL);
        assert!(entity.mesh.as_sphere().is_some());
    }

    #[test]
    fn test_group_has_no_mesh() {
        let group = Entity::group().with_name("orbit");
        assert!(group.mesh.as_sphere().is_none());
        assert_eq!(group.name.as_deref(), Some("orbit"));
    }

    #[test]
    fn test_set_rotation_marks_transform_dirty() {
        let mut entity = Entity::group();
        entity.clear_dirty();
        entity.set_rotation_y(0.0);
        assert!(!entity.is_dirty(), "unchanged value should stay clean");

        entity.set_rotation_y(0.5);
        assert_eq!(entity.dirty_flags(), DirtyFlags::TRANSFORM);
        assert_eq!(entity.transform.rotation.y, 0.5);
    }

    #[test]
    fn test_tags() {
        let entity = Entity::group().with_tag("body").with_tag("orbit");
        assert!(entity.has_tag("body"));
        assert!(entity.has_tag("orbit"));
        assert!(!entity.has_tag("backdrop"));
    }
}
