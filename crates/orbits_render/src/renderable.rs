//! Renderable meshes - bridges World/Entity to GPU buffers
//!
//! Every entity with a mesh gets a [`RenderableMesh`]: shared vertex and
//! index buffers, its own uniform buffer, and a bind group pointing at its
//! color texture. Entities start with the white placeholder texture and are
//! rebound when their real texture arrives.

use std::collections::HashMap;
use std::sync::Arc;

use orbits_core::{EntityKey, MeshRef, SphereMesh, TextureData, World};
use orbits_math::{mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::pipeline::{GpuTexture, MeshPipeline, MeshVertex, ObjectUniforms, PipelineKey};

/// Vertex and index buffers for one mesh, shared between entities
pub struct GpuGeometry {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuGeometry {
    pub fn from_sphere(device: &wgpu::Device, mesh: &SphereMesh) -> Self {
        let vertices = MeshVertex::from_sphere(mesh);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Sphere Index Buffer"),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// GPU state for one drawable entity
pub struct RenderableMesh {
    pub key: PipelineKey,
    pub geometry: Arc<GpuGeometry>,
    pub bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    texture: Option<GpuTexture>,
    world_position: Vec3,
}

impl RenderableMesh {
    /// Whether the entity's own texture has been uploaded
    pub fn is_textured(&self) -> bool {
        self.texture.is_some()
    }

    pub fn world_position(&self) -> Vec3 {
        self.world_position
    }
}

/// All renderable meshes of a world, keyed by entity
pub struct SceneRenderables {
    meshes: HashMap<EntityKey, RenderableMesh>,
    geometry_cache: HashMap<usize, Arc<GpuGeometry>>,
    placeholder: GpuTexture,
}

impl SceneRenderables {
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self {
            meshes: HashMap::new(),
            geometry_cache: HashMap::new(),
            placeholder: GpuTexture::placeholder(device, queue),
        }
    }

    /// Create GPU state for new mesh entities and drop state for removed ones
    pub fn sync(
        &mut self,
        device: &wgpu::Device,
        pipeline: &MeshPipeline,
        world: &World,
    ) {
        self.meshes.retain(|key, _| world.get_entity(*key).is_some());

        for (key, entity) in world.iter_with_keys() {
            if self.meshes.contains_key(&key) {
                continue;
            }
            let MeshRef::Sphere(sphere) = &entity.mesh else {
                continue;
            };
            let Some(model) = world.world_matrix(key) else {
                continue;
            };

            // Entities sharing one Arc share one set of buffers
            let cache_key = Arc::as_ptr(sphere) as usize;
            let geometry = self
                .geometry_cache
                .entry(cache_key)
                .or_insert_with(|| Arc::new(GpuGeometry::from_sphere(device, sphere)))
                .clone();

            let uniforms = ObjectUniforms::new(model, &entity.material);
            let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Object Uniform Buffer"),
                contents: bytemuck::bytes_of(&uniforms),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
            let bind_group = pipeline.create_object_bind_group(device, &uniform_buffer, &self.placeholder);

            self.meshes.insert(
                key,
                RenderableMesh {
                    key: PipelineKey::for_material(&entity.material),
                    geometry,
                    bind_group,
                    uniform_buffer,
                    texture: None,
                    world_position: mat4::transform_point(model, Vec3::ZERO),
                },
            );
        }

        log::debug!("Synced {} renderable meshes", self.meshes.len());
    }

    /// Rewrite uniforms for entities whose transform or material changed
    ///
    /// Returns the number of uniform buffers written.
    pub fn update(&mut self, queue: &wgpu::Queue, world: &World) -> usize {
        let mut written = 0;
        for (key, mesh) in self.meshes.iter_mut() {
            if !world.needs_transform_update(*key) {
                continue;
            }
            let (Some(entity), Some(model)) = (world.get_entity(*key), world.world_matrix(*key)) else {
                continue;
            };
            let uniforms = ObjectUniforms::new(model, &entity.material);
            queue.write_buffer(&mesh.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
            mesh.key = PipelineKey::for_material(&entity.material);
            mesh.world_position = mat4::transform_point(model, Vec3::ZERO);
            written += 1;
        }
        written
    }

    /// Upload `data` as the color texture of entity `key`
    ///
    /// Returns false if the entity has no renderable mesh.
    pub fn set_texture(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &MeshPipeline,
        key: EntityKey,
        data: &TextureData,
    ) -> bool {
        let Some(mesh) = self.meshes.get_mut(&key) else {
            return false;
        };
        let texture = GpuTexture::from_data(device, queue, data, "Entity Texture");
        mesh.bind_group = pipeline.create_object_bind_group(device, &mesh.uniform_buffer, &texture);
        mesh.texture = Some(texture);
        true
    }

    pub fn get(&self, key: EntityKey) -> Option<&RenderableMesh> {
        self.meshes.get(&key)
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Meshes in draw order as seen from `camera_position`
    pub fn draw_list(&self, camera_position: Vec3) -> Vec<&RenderableMesh> {
        let mut items: Vec<DrawItem<&RenderableMesh>> = self
            .meshes
            .values()
            .map(|mesh| DrawItem {
                transparent: mesh.key.transparent,
                distance: (mesh.world_position - camera_position).length(),
                item: mesh,
            })
            .collect();
        sort_draw_items(&mut items);
        items.into_iter().map(|d| d.item).collect()
    }
}

/// Something to draw plus the information needed to order it
pub struct DrawItem<T> {
    pub transparent: bool,
    pub distance: f32,
    pub item: T,
}

/// Opaque items first (near to far), then transparent items far to near
pub fn sort_draw_items<T>(items: &mut [DrawItem<T>]) {
    items.sort_by(|a, b| match (a.transparent, b.transparent) {
        (false, true) => std::cmp::Ordering::Less,
        (true, false) => std::cmp::Ordering::Greater,
        (false, false) => a.distance.total_cmp(&b.distance),
        (true, true) => b.distance.total_cmp(&a.distance),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &'static str, transparent: bool, distance: f32) -> DrawItem<&'static str> {
        DrawItem {
            transparent,
            distance,
            item: name,
        }
    }

    #[test]
    fn test_opaque_before_transparent() {
        let mut items = vec![
            item("backdrop", true, 0.0),
            item("earth", false, 9.0),
        ];
        sort_draw_items(&mut items);
        let order: Vec<_> = items.iter().map(|d| d.item).collect();
        assert_eq!(order, vec!["earth", "backdrop"]);
    }

    #[test]
    fn test_opaque_front_to_back() {
        let mut items = vec![
            item("far", false, 13.0),
            item("near", false, 5.0),
            item("mid", false, 9.0),
        ];
        sort_draw_items(&mut items);
        let order: Vec<_> = items.iter().map(|d| d.item).collect();
        assert_eq!(order, vec!["near", "mid", "far"]);
    }

    #[test]
    fn test_transparent_back_to_front() {
        let mut items = vec![
            item("near_glass", true, 2.0),
            item("far_glass", true, 20.0),
        ];
        sort_draw_items(&mut items);
        let order: Vec<_> = items.iter().map(|d| d.item).collect();
        assert_eq!(order, vec!["far_glass", "near_glass"]);
    }
}
