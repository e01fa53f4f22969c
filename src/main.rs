//! Orbits - scroll-driven orbiting planets
//!
//! Four textured planets orbit in front of a starfield. Each forward scroll
//! or swipe turns the orbit by a quarter and moves to the next heading.

use std::path::Path;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use orbits::config::AppConfig;
use orbits::input::{InputAction, InputMapper};
use orbits::scene::{SceneBuilder, SceneHandles};
use orbits::systems::{
    AdvanceOutcome, AnimationDriver, RenderError, RenderSystem, Slideshow, WindowSystem,
};
use orbits_core::{
    AssetLoader, CancellationToken, EntityKey, EnvironmentMap, SceneDescription, TextureData,
    World,
};
use orbits_input::{GestureNormalizer, ScrollDirection};

/// Main application state
struct App {
    config: AppConfig,
    scene: SceneDescription,
    world: World,
    handles: SceneHandles,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    gestures: GestureNormalizer,
    slideshow: Slideshow,
    animation: AnimationDriver,
    textures: AssetLoader<EntityKey, TextureData>,
    environment: AssetLoader<(), EnvironmentMap>,
    shutdown: CancellationToken,
    start: Instant,
}

impl App {
    fn new(config: AppConfig, shutdown: CancellationToken) -> Self {
        let scene = SceneDescription::load(&config.scene.path).unwrap_or_else(|e| {
            log::warn!(
                "Failed to load scene '{}': {}. Using built-in layout.",
                config.scene.path,
                e
            );
            SceneDescription::default()
        });

        let (world, handles) = SceneBuilder::from_description(&scene).build();
        log::info!(
            "Built scene '{}' with {} entities ({} bodies)",
            scene.name,
            world.entity_count(),
            handles.bodies.len()
        );

        let slideshow = Slideshow::new(
            &config.slideshow,
            config.animation.rotation_step,
            scene.headings(),
        );
        let animation = AnimationDriver::new(config.animation.clone());

        let mut app = Self {
            config,
            scene,
            world,
            handles,
            window: None,
            render: None,
            gestures: GestureNormalizer::new(),
            slideshow,
            animation,
            textures: AssetLoader::new(),
            environment: AssetLoader::new(),
            shutdown,
            start: Instant::now(),
        };
        app.request_assets();
        app
    }

    /// Queue every texture and the environment map for background loading
    fn request_assets(&mut self) {
        for (key, entity) in self.world.iter_with_keys() {
            if let Some(texture) = &entity.material.texture {
                self.textures
                    .load_async(key, self.config.scene.asset_path(texture));
            }
        }
        if let Some(env) = &self.scene.environment_map {
            self.environment
                .load_async((), self.config.scene.asset_path(env));
        }
        log::info!(
            "Requested {} textures and {} environment map",
            self.textures.pending(),
            self.environment.pending()
        );
    }

    /// Apply every load that finished since the last frame
    fn apply_loaded_assets(&mut self) {
        let Some(render) = self.render.as_mut() else {
            return;
        };

        for done in self.textures.poll_all() {
            match done.result {
                Ok(texture) => {
                    if render.set_texture(done.slot, &texture) {
                        log::info!(
                            "Loaded texture {} ({}x{})",
                            done.path.display(),
                            texture.width,
                            texture.height
                        );
                    }
                }
                Err(e) => log::warn!(
                    "Texture {} unavailable, rendering untextured: {}",
                    done.path.display(),
                    e
                ),
            }
        }

        for done in self.environment.poll_all() {
            match done.result {
                Ok(map) => {
                    render.set_environment(&map);
                    log::info!(
                        "Loaded environment map {} ({}x{})",
                        done.path.display(),
                        map.width,
                        map.height
                    );
                }
                Err(e) => log::warn!(
                    "Environment map {} unavailable: {}",
                    done.path.display(),
                    e
                ),
            }
        }
    }

    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn handle_gesture(&mut self, direction: Option<ScrollDirection>) {
        let Some(direction) = direction else {
            return;
        };
        let now = self.elapsed();
        if let AdvanceOutcome::Advanced { index, wrapped } =
            self.slideshow.on_gesture(direction, now, &mut self.animation)
        {
            log::info!(
                "Slide {}/{}{}",
                index + 1,
                self.slideshow.slide_count(),
                if wrapped { " (wrapped)" } else { "" }
            );
        }
    }

    fn handle_action(&mut self, action: InputAction) {
        match action {
            InputAction::Exit => {
                log::info!("Exiting");
                self.shutdown.signal();
            }
            InputAction::ToggleFullscreen => {
                if let Some(window) = &self.window {
                    window.toggle_fullscreen();
                }
            }
            InputAction::Advance => self.handle_gesture(Some(ScrollDirection::Forward)),
        }
    }

    fn redraw(&mut self) {
        self.apply_loaded_assets();

        let now = self.elapsed();
        let state = self.animation.frame(now, &mut self.world, &self.handles);

        if let Some(window) = self.window.as_mut() {
            let heading = self
                .slideshow
                .heading_at(state.heading_offset, self.config.animation.heading_step);
            window.update_title(heading);
        }

        if let Some(render) = self.render.as_mut() {
            match render.render_frame(&mut self.world) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => render.reconfigure(),
                Err(RenderError::OutOfMemory) => {
                    log::error!("GPU out of memory, shutting down");
                    self.shutdown.signal();
                }
                Err(e) => log::warn!("{}", e),
            }
        }

        if !self.shutdown.is_signalled() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render = RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            &self.config.camera,
            &self.scene,
            self.config.window.vsync,
        );
        let mut render = match render {
            Ok(render) => render,
            Err(e) => {
                log::error!("Failed to initialise rendering: {}", e);
                event_loop.exit();
                return;
            }
        };
        render.sync_scene(&self.world);
        let (width, height) = render.size();
        log::info!("Rendering at {}x{}", width, height);

        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => self.shutdown.signal(),

            WindowEvent::Resized(size) => {
                if let (Some(render), Some(window)) = (self.render.as_mut(), &self.window) {
                    render.resize(size, window.window().scale_factor());
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let (Some(render), Some(window)) = (self.render.as_mut(), &self.window) {
                    render.resize(window.window().inner_size(), scale_factor);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(action) = InputMapper::map_keyboard(key, event.state) {
                        self.handle_action(action);
                    }
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let direction = self.gestures.wheel(delta);
                self.handle_gesture(direction);
            }

            WindowEvent::Touch(touch) => {
                let direction = self.gestures.touch(&touch);
                self.handle_gesture(direction);
            }

            WindowEvent::RedrawRequested => self.redraw(),

            _ => {}
        }

        if self.shutdown.is_signalled() {
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.shutdown.is_signalled() {
            event_loop.exit();
        }
    }
}

fn main() {
    let config_result = AppConfig::load();
    let log_level = config_result
        .as_ref()
        .map(|c| c.debug.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());

    // RUST_LOG wins over the configured level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = config_result.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    log::info!("Starting Orbits");
    if !Path::new(&config.scene.asset_root).is_dir() {
        log::warn!(
            "Asset directory '{}' not found; planets will render untextured",
            config.scene.asset_root
        );
    }

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let shutdown = CancellationToken::new();
    let mut app = App::new(config, shutdown);
    event_loop.run_app(&mut app).expect("Event loop error");
}
