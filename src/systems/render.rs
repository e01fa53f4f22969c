//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface, sized with a pixel-ratio cap
//! - Mesh pipeline, environment map and ambient light
//! - Per-entity GPU state and textures
//! - Frame rendering

use std::sync::Arc;
use winit::dpi::PhysicalSize;
use winit::window::Window;
use orbits_core::{EntityKey, EnvironmentMap, SceneDescription, TextureData, Vec3, World};
use orbits_render::{
    camera::Camera,
    context::{ContextError, RenderContext},
    pipeline::{FrameUniforms, MeshPipeline},
    SceneRenderables,
};
use crate::config::{CameraConfig, RenderingConfig};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost or outdated (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface or setup error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl From<ContextError> for RenderError {
    fn from(e: ContextError) -> Self {
        RenderError::Other(e.to_string())
    }
}

/// Drawable size for a window, honouring a cap on physical pixels per logical pixel
///
/// `physical` is the window's inner size at `scale_factor`. When the scale
/// factor exceeds `max_ratio` the drawable is shrunk proportionally.
pub fn drawable_size(physical: PhysicalSize<u32>, scale_factor: f64, max_ratio: f64) -> PhysicalSize<u32> {
    if scale_factor <= max_ratio || scale_factor <= 0.0 || max_ratio <= 0.0 {
        return physical;
    }
    let ratio = max_ratio / scale_factor;
    PhysicalSize::new(
        ((physical.width as f64 * ratio).round() as u32).max(1),
        ((physical.height as f64 * ratio).round() as u32).max(1),
    )
}

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    pipeline: MeshPipeline,
    renderables: SceneRenderables,
    camera: Camera,
    render_config: RenderingConfig,
    ambient: [f32; 4],
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        camera_config: &CameraConfig,
        scene: &SceneDescription,
        vsync: bool,
    ) -> Result<Self, RenderError> {
        let size = drawable_size(window.inner_size(), window.scale_factor(), render_config.max_pixel_ratio);
        let mut context = pollster::block_on(RenderContext::with_vsync(window, vsync))?;
        context.resize(size);

        let pipeline = MeshPipeline::new(
            &context.device,
            &context.queue,
            context.config.format,
            render_config.msaa_samples,
            context.config.width,
            context.config.height,
        );
        let renderables = SceneRenderables::new(&context.device, &context.queue);

        let camera = Camera::new(
            Vec3::from(camera_config.position),
            camera_config.fov,
            camera_config.near,
            camera_config.far,
        );

        let [r, g, b] = scene.ambient_color;
        let i = scene.ambient_intensity;

        Ok(Self {
            context,
            pipeline,
            renderables,
            camera,
            render_config,
            ambient: [r * i, g * i, b * i, 0.0],
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, physical: PhysicalSize<u32>, scale_factor: f64) {
        let size = drawable_size(physical, scale_factor, self.render_config.max_pixel_ratio);
        self.context.resize(size);
        self.pipeline
            .ensure_targets(&self.context.device, self.context.config.width, self.context.config.height);
    }

    /// Reconfigure the surface after it was lost
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Create GPU state for every mesh entity in the world
    pub fn sync_scene(&mut self, world: &World) {
        self.renderables.sync(&self.context.device, &self.pipeline, world);
        log::info!("Prepared {} meshes for rendering", self.renderables.len());
    }

    /// Upload a loaded color texture for one entity
    pub fn set_texture(&mut self, key: EntityKey, data: &TextureData) -> bool {
        self.renderables
            .set_texture(&self.context.device, &self.context.queue, &self.pipeline, key, data)
    }

    /// Tonemap and upload the environment map
    pub fn set_environment(&mut self, map: &EnvironmentMap) {
        let texture = map.to_texture(self.render_config.env_exposure);
        self.pipeline
            .set_environment(&self.context.device, &self.context.queue, &texture);
    }

    /// Render a single frame
    ///
    /// Uniforms are rewritten only for entities whose transforms changed; the
    /// world's dirty flags are cleared afterwards.
    pub fn render_frame(&mut self, world: &mut World) -> Result<(), RenderError> {
        self.renderables.update(&self.context.queue, world);
        world.clear_all_dirty();

        let frame = FrameUniforms {
            view_matrix: self.camera.view_matrix(),
            projection_matrix: self.camera.projection_matrix(self.context.aspect_ratio()),
            camera_position: self.camera.position.to_array(),
            env_intensity: self.render_config.env_intensity,
            ambient: self.ambient,
        };
        self.pipeline.update_frame(&self.context.queue, &frame);

        // Get surface texture
        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                return Err(RenderError::SurfaceLost)
            }
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        let bg = &self.render_config.background_color;
        let draw_list = self.renderables.draw_list(self.camera.position);
        self.pipeline.render(
            &mut encoder,
            &view,
            &draw_list,
            wgpu::Color {
                r: bg[0] as f64,
                g: bg[1] as f64,
                b: bg[2] as f64,
                a: bg[3] as f64,
            },
        );

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.config.width, self.context.config.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_error_display() {
        assert_eq!(format!("{}", RenderError::SurfaceLost), "Surface lost");
        assert_eq!(format!("{}", RenderError::OutOfMemory), "Out of memory");
        assert_eq!(
            format!("{}", RenderError::Other("test".to_string())),
            "Render error: test"
        );
    }

    #[test]
    fn test_context_error_converts() {
        let err: RenderError = ContextError::NoAdapter.into();
        assert!(matches!(err, RenderError::Other(_)));
    }

    #[test]
    fn test_drawable_size_below_cap_unchanged() {
        let size = PhysicalSize::new(2560, 1440);
        assert_eq!(drawable_size(size, 2.0, 2.0), size);
        assert_eq!(drawable_size(size, 1.0, 2.0), size);
    }

    #[test]
    fn test_drawable_size_capped() {
        // 1280x720 logical at 3x is 3840x2160 physical; cap at 2x
        let size = drawable_size(PhysicalSize::new(3840, 2160), 3.0, 2.0);
        assert_eq!(size, PhysicalSize::new(2560, 1440));
    }

    #[test]
    fn test_drawable_size_never_zero() {
        let size = drawable_size(PhysicalSize::new(1, 1), 4.0, 1.0);
        assert_eq!(size, PhysicalSize::new(1, 1));
    }
}
