//! Render pipeline for textured, environment-lit meshes
//!
//! Opaque meshes draw first with depth writes; transparent meshes follow with
//! alpha blending and depth testing only. Face culling follows the material:
//! front-sided materials cull back faces, back-sided materials cull front
//! faces, double-sided materials cull nothing.

use std::collections::HashMap;

use orbits_core::{FaceSide, Material, TextureData};

use super::textures::{create_sampler, GpuTexture};
use super::types::{FrameUniforms, MeshVertex};
use crate::renderable::RenderableMesh;

/// Depth buffer format
pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Selects one pipeline variant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PipelineKey {
    pub side: FaceSide,
    pub transparent: bool,
}

impl PipelineKey {
    /// Every variant the pipeline builds up front
    pub const ALL: [PipelineKey; 6] = [
        PipelineKey { side: FaceSide::Front, transparent: false },
        PipelineKey { side: FaceSide::Back, transparent: false },
        PipelineKey { side: FaceSide::Double, transparent: false },
        PipelineKey { side: FaceSide::Front, transparent: true },
        PipelineKey { side: FaceSide::Back, transparent: true },
        PipelineKey { side: FaceSide::Double, transparent: true },
    ];

    pub fn for_material(material: &Material) -> Self {
        Self {
            side: material.side,
            transparent: material.is_transparent(),
        }
    }

    pub fn cull_mode(&self) -> Option<wgpu::Face> {
        match self.side {
            FaceSide::Front => Some(wgpu::Face::Back),
            FaceSide::Back => Some(wgpu::Face::Front),
            FaceSide::Double => None,
        }
    }

    pub fn blend(&self) -> wgpu::BlendState {
        if self.transparent {
            wgpu::BlendState::ALPHA_BLENDING
        } else {
            wgpu::BlendState::REPLACE
        }
    }

    #[inline]
    pub fn depth_write(&self) -> bool {
        !self.transparent
    }
}

/// Round a requested MSAA sample count to one every backend supports
pub fn supported_sample_count(requested: u32) -> u32 {
    if requested > 1 {
        4
    } else {
        1
    }
}

/// Mesh rendering pipelines and their shared GPU state
pub struct MeshPipeline {
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,
    frame_layout: wgpu::BindGroupLayout,
    object_layout: wgpu::BindGroupLayout,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    env_texture: GpuTexture,
    surface_format: wgpu::TextureFormat,
    sample_count: u32,
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
    target_size: (u32, u32),
}

impl MeshPipeline {
    /// Create the pipelines and size-dependent targets
    ///
    /// The environment map starts as a neutral white texel until
    /// [`set_environment`](Self::set_environment) is called.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        sample_count: u32,
        width: u32,
        height: u32,
    ) -> Self {
        let sample_count = supported_sample_count(sample_count);

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };
        let sampler_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
            count: None,
        };
        let uniform_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame Bind Group Layout"),
            entries: &[uniform_entry(0), texture_entry(1), sampler_entry(2)],
        });
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
            entries: &[uniform_entry(0), texture_entry(1), sampler_entry(2)],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/mesh.wgsl").into()),
        });

        let pipelines = PipelineKey::ALL
            .iter()
            .map(|key| {
                let pipeline = Self::create_pipeline(
                    device,
                    &pipeline_layout,
                    &shader,
                    surface_format,
                    sample_count,
                    *key,
                );
                (*key, pipeline)
            })
            .collect();

        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Uniform Buffer"),
            size: std::mem::size_of::<FrameUniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&frame_buffer, 0, bytemuck::bytes_of(&FrameUniforms::default()));

        let sampler = create_sampler(device);
        let env_texture = GpuTexture::placeholder(device, queue);
        let frame_bind_group =
            Self::create_frame_bind_group(device, &frame_layout, &frame_buffer, &env_texture, &sampler);

        let (depth_view, msaa_view) =
            Self::create_targets(device, surface_format, sample_count, width.max(1), height.max(1));

        log::info!("Mesh pipeline ready ({}x MSAA)", sample_count);

        Self {
            pipelines,
            frame_layout,
            object_layout,
            frame_buffer,
            frame_bind_group,
            sampler,
            env_texture,
            surface_format,
            sample_count,
            depth_view,
            msaa_view,
            target_size: (width.max(1), height.max(1)),
        }
    }

    fn create_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        surface_format: wgpu::TextureFormat,
        sample_count: u32,
        key: PipelineKey,
    ) -> wgpu::RenderPipeline {
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Mesh Pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader,
                entry_point: Some("vs_main"),
                buffers: &[Self::vertex_buffer_layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(key.blend()),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: key.cull_mode(),
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: key.depth_write(),
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: sample_count,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    fn create_frame_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &wgpu::Buffer,
        env_texture: &GpuTexture,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&env_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn create_targets(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        sample_count: u32,
        width: u32,
        height: u32,
    ) -> (wgpu::TextureView, Option<wgpu::TextureView>) {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let depth = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size,
            mip_level_count: 1,
            sample_count,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        let msaa = (sample_count > 1).then(|| {
            device
                .create_texture(&wgpu::TextureDescriptor {
                    label: Some("MSAA Color Texture"),
                    size,
                    mip_level_count: 1,
                    sample_count,
                    dimension: wgpu::TextureDimension::D2,
                    format: surface_format,
                    usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                    view_formats: &[],
                })
                .create_view(&wgpu::TextureViewDescriptor::default())
        });

        (depth.create_view(&wgpu::TextureViewDescriptor::default()), msaa)
    }

    /// Get the vertex buffer layout for MeshVertex
    pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
            0 => Float32x3,
            1 => Float32x3,
            2 => Float32x2,
        ];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }

    /// Resize depth and MSAA targets to match the surface
    pub fn ensure_targets(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let size = (width.max(1), height.max(1));
        if size != self.target_size {
            let (depth_view, msaa_view) = Self::create_targets(
                device,
                self.surface_format,
                self.sample_count,
                size.0,
                size.1,
            );
            self.depth_view = depth_view;
            self.msaa_view = msaa_view;
            self.target_size = size;
        }
    }

    /// Replace the environment map
    pub fn set_environment(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &TextureData) {
        self.env_texture = GpuTexture::from_data(device, queue, data, "Environment Map");
        self.frame_bind_group = Self::create_frame_bind_group(
            device,
            &self.frame_layout,
            &self.frame_buffer,
            &self.env_texture,
            &self.sampler,
        );
    }

    /// Update per-frame uniforms
    pub fn update_frame(&self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        queue.write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Bind group for one object's uniforms and color texture
    pub fn create_object_bind_group(
        &self,
        device: &wgpu::Device,
        uniform_buffer: &wgpu::Buffer,
        texture: &GpuTexture,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Object Bind Group"),
            layout: &self.object_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        })
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Record one render pass drawing `meshes` in the given order
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        surface_view: &wgpu::TextureView,
        meshes: &[&RenderableMesh],
        clear_color: wgpu::Color,
    ) {
        let (view, resolve_target, store) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(surface_view), wgpu::StoreOp::Discard),
            None => (surface_view, None, wgpu::StoreOp::Store),
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Mesh Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store,
                },
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

        for mesh in meshes {
            let Some(pipeline) = self.pipelines.get(&mesh.key) else {
                continue;
            };
            render_pass.set_pipeline(pipeline);
            render_pass.set_bind_group(1, &mesh.bind_group, &[]);
            render_pass.set_vertex_buffer(0, mesh.geometry.vertex_buffer.slice(..));
            render_pass.set_index_buffer(mesh.geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..mesh.geometry.index_count, 0, 0..1);
        }
    }
}
