//! SceneBuilder - Declarative scene construction
//!
//! Provides a fluent API for building the orbit scene: a backdrop shell, an
//! orbit group, and bodies evenly spaced on a circle inside the group.

use std::f32::consts::TAU;

use orbits_core::{
    BodyDescription, Entity, EntityKey, FaceSide, Material, MeshRef, SceneDescription,
    SphereMesh, Transform, Vec3, World,
};

/// Tag carried by every orbiting body
pub const BODY_TAG: &str = "body";
/// Tag carried by the backdrop shell
pub const BACKDROP_TAG: &str = "backdrop";

/// Keys of the entities the application animates
#[derive(Debug, Clone, PartialEq)]
pub struct SceneHandles {
    /// Group node the bodies are attached to
    pub group: EntityKey,
    /// Bodies in placement order
    pub bodies: Vec<EntityKey>,
    /// Backdrop shell, if the scene has one
    pub backdrop: Option<EntityKey>,
}

/// Position of body `index` of `count` on a circle of `radius` in the XZ plane
///
/// Body `i` sits at angle `2*pi*i/count`.
pub fn orbit_position(index: usize, count: usize, radius: f32) -> Vec3 {
    let angle = index as f32 / count.max(1) as f32 * TAU;
    Vec3::new(radius * angle.cos(), 0.0, radius * angle.sin())
}

/// Builder for constructing the orbit scene
///
/// # Example
/// ```ignore
/// let (world, handles) = SceneBuilder::new()
///     .add_backdrop(50.0, [65, 65], Some("stars.jpg"), 0.5)
///     .add_orbit_group(0.1, -0.9)
///     .add_bodies(1.4, [64, 64], 4.4, &bodies)
///     .build();
/// ```
pub struct SceneBuilder {
    world: World,
    group: Option<EntityKey>,
    bodies: Vec<EntityKey>,
    backdrop: Option<EntityKey>,
}

impl SceneBuilder {
    /// Create a new scene builder
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a scene builder with a pre-allocated world capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            world: World::with_capacity(capacity),
            group: None,
            bodies: Vec::new(),
            backdrop: None,
        }
    }

    /// Build every part of a scene description
    pub fn from_description(description: &SceneDescription) -> Self {
        let mut builder = Self::with_capacity(description.body_count() + 2);
        if description.backdrop_radius > 0.0 {
            builder = builder.add_backdrop(
                description.backdrop_radius,
                description.backdrop_segments,
                description.backdrop_texture.as_deref(),
                description.backdrop_opacity,
            );
        }
        builder
            .add_orbit_group(description.orbit_tilt, description.orbit_height)
            .add_bodies(
                description.body_radius,
                description.body_segments,
                description.orbit_radius,
                &description.bodies,
            )
    }

    /// Add the inside-out backdrop shell centred on the origin
    pub fn add_backdrop(
        mut self,
        radius: f32,
        segments: [u32; 2],
        texture: Option<&str>,
        opacity: f32,
    ) -> Self {
        let material = Material {
            texture: texture.map(str::to_string),
            ..Material::default()
        }
        .with_opacity(opacity)
        .with_side(FaceSide::Back);

        let mesh = MeshRef::sphere(SphereMesh::new(radius, segments[0], segments[1]));
        let key = self.world.add_entity(
            Entity::with_material(mesh, material)
                .with_name("backdrop")
                .with_tag(BACKDROP_TAG),
        );
        self.backdrop = Some(key);
        self
    }

    /// Add the orbit group, tilted about X and offset vertically
    pub fn add_orbit_group(mut self, tilt: f32, height: f32) -> Self {
        let transform = Transform::from_position(Vec3::new(0.0, height, 0.0))
            .with_rotation(Vec3::new(tilt, 0.0, 0.0));
        let key = self
            .world
            .add_entity(Entity::group().with_name("orbit").with_transform(transform));
        self.group = Some(key);
        self
    }

    /// Add bodies evenly spaced on the orbit circle
    ///
    /// All bodies share one sphere mesh. An untilted group is created first if
    /// none was added.
    pub fn add_bodies(
        mut self,
        radius: f32,
        segments: [u32; 2],
        orbit_radius: f32,
        bodies: &[BodyDescription],
    ) -> Self {
        if self.group.is_none() {
            self = self.add_orbit_group(0.0, 0.0);
        }
        let Some(group) = self.group else {
            return self;
        };

        let mesh = MeshRef::sphere(SphereMesh::new(radius, segments[0], segments[1]));
        for (i, body) in bodies.iter().enumerate() {
            let entity = Entity::with_material(mesh.clone(), Material::textured(&body.texture))
                .with_name(&body.name)
                .with_tag(BODY_TAG)
                .with_transform(Transform::from_position(orbit_position(i, bodies.len(), orbit_radius)));
            if let Some(key) = self.world.add_child(group, entity) {
                self.bodies.push(key);
            }
        }
        self
    }

    /// Build and return the world with the handles of its animated parts
    pub fn build(mut self) -> (World, SceneHandles) {
        let group = match self.group {
            Some(group) => group,
            None => self.world.add_entity(Entity::group().with_name("orbit")),
        };
        let handles = SceneHandles {
            group,
            bodies: self.bodies,
            backdrop: self.backdrop,
        };
        (self.world, handles)
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbits_math::mat4::transform_point;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn test_empty_scene() {
        let (world, handles) = SceneBuilder::new().build();
        assert_eq!(world.entity_count(), 1);
        assert!(handles.bodies.is_empty());
        assert!(handles.backdrop.is_none());
    }

    #[test]
    fn test_orbit_position_formula() {
        let r = 4.4;
        assert!(approx(orbit_position(0, 4, r), Vec3::new(4.4, 0.0, 0.0)));
        assert!(approx(orbit_position(1, 4, r), Vec3::new(0.0, 0.0, 4.4)));
        assert!(approx(orbit_position(2, 4, r), Vec3::new(-4.4, 0.0, 0.0)));
        assert!(approx(orbit_position(3, 4, r), Vec3::new(0.0, 0.0, -4.4)));
    }

    #[test]
    fn test_bodies_lie_on_circle() {
        for n in 1..8 {
            for i in 0..n {
                let p = orbit_position(i, n, 2.0);
                assert!((p.length() - 2.0).abs() < 1e-5);
                assert_eq!(p.y, 0.0);
            }
        }
    }

    #[test]
    fn test_default_description() {
        let (world, handles) = SceneBuilder::from_description(&SceneDescription::default()).build();
        assert_eq!(handles.bodies.len(), 4);
        assert!(handles.backdrop.is_some());
        // backdrop + group + 4 bodies
        assert_eq!(world.entity_count(), 6);

        let names: Vec<_> = handles
            .bodies
            .iter()
            .map(|k| world.get_entity(*k).unwrap().name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["Csilla", "Earth", "Venus", "Volcanic"]);

        let textures: Vec<_> = handles
            .bodies
            .iter()
            .map(|k| world.get_entity(*k).unwrap().material.texture.clone().unwrap())
            .collect();
        assert_eq!(textures[1], "earth/earth.jpg");
    }

    #[test]
    fn test_bodies_parented_to_group() {
        let (world, handles) = SceneBuilder::from_description(&SceneDescription::default()).build();
        for key in &handles.bodies {
            assert_eq!(world.get_entity(*key).unwrap().parent(), Some(handles.group));
        }
        assert_eq!(world.children(handles.group).count(), 4);
        assert_eq!(world.keys_with_tag(BODY_TAG).len(), 4);
    }

    #[test]
    fn test_group_transform_applies_to_bodies() {
        let (world, handles) = SceneBuilder::new()
            .add_orbit_group(0.0, -0.9)
            .add_bodies(1.0, [8, 6], 4.4, &SceneDescription::default().bodies)
            .build();
        let m = world.world_matrix(handles.bodies[0]).unwrap();
        let centre = transform_point(m, Vec3::ZERO);
        assert!(approx(centre, Vec3::new(4.4, -0.9, 0.0)));
    }

    #[test]
    fn test_backdrop_material() {
        let (world, handles) = SceneBuilder::new()
            .add_backdrop(50.0, [65, 65], Some("stars.jpg"), 0.5)
            .build();
        let backdrop = world.get_entity(handles.backdrop.unwrap()).unwrap();
        assert_eq!(backdrop.material.side, FaceSide::Back);
        assert_eq!(backdrop.material.opacity, 0.5);
        assert!(backdrop.material.is_transparent());
        assert_eq!(backdrop.material.texture.as_deref(), Some("stars.jpg"));
        assert!(backdrop.has_tag(BACKDROP_TAG));
        assert_eq!(backdrop.mesh.as_sphere().unwrap().radius(), 50.0);
    }

    #[test]
    fn test_bodies_without_group_get_one() {
        let (world, handles) = SceneBuilder::new()
            .add_bodies(1.0, [8, 6], 1.0, &[BodyDescription::new("Solo", "solo.jpg")])
            .build();
        assert_eq!(handles.bodies.len(), 1);
        assert_eq!(world.get_entity(handles.bodies[0]).unwrap().parent(), Some(handles.group));
    }

    #[test]
    fn test_bodies_share_mesh() {
        let (world, handles) = SceneBuilder::from_description(&SceneDescription::default()).build();
        let a = &world.get_entity(handles.bodies[0]).unwrap().mesh;
        let b = &world.get_entity(handles.bodies[3]).unwrap().mesh;
        match (a, b) {
            (MeshRef::Sphere(a), MeshRef::Sphere(b)) => assert!(std::sync::Arc::ptr_eq(a, b)),
            _ => panic!("bodies should be spheres"),
        }
    }
}
