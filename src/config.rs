//! Application configuration
//!
//! Configuration is loaded from multiple sources with the following priority (lowest to highest):
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (gitignored, user overrides)
//! 3. Environment variables (`ORB_SECTION__KEY`)

use figment::{Figment, providers::{Format, Toml, Env}};
use orbits_core::Easing;
use serde::{Serialize, Deserialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Camera configuration
    #[serde(default)]
    pub camera: CameraConfig,
    /// Scene file and asset locations
    #[serde(default)]
    pub scene: SceneConfig,
    /// Gesture gating and slide count
    #[serde(default)]
    pub slideshow: SlideshowConfig,
    /// Tween and self-rotation parameters
    #[serde(default)]
    pub animation: AnimationConfig,
    /// Rendering configuration
    #[serde(default)]
    pub rendering: RenderingConfig,
    /// Debug configuration
    #[serde(default)]
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. `config/default.toml`
    /// 2. `config/user.toml`
    /// 3. Environment variables (`ORB_*`)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        // Load user config (optional)
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // Environment variables override everything
        // ORB_SLIDESHOW__COOLDOWN_MS=500 -> slideshow.cooldown_ms = 500
        figment = figment.merge(Env::prefixed("ORB_").split("__"));

        figment.extract().map_err(ConfigError::from)
    }
}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Base window title; the current heading is appended
    pub title: String,
    /// Window width in logical pixels
    pub width: u32,
    /// Window height in logical pixels
    pub height: u32,
    /// Start in fullscreen mode
    pub fullscreen: bool,
    /// Enable VSync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Orbits".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            vsync: true,
        }
    }
}

/// Camera configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position [x, y, z]; the camera looks at the origin
    pub position: [f32; 3],
    /// Vertical field of view in degrees
    pub fov: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 9.0],
            fov: 25.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Scene configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Scene layout file (RON); the built-in layout is used if it cannot be read
    pub path: String,
    /// Directory texture paths are resolved against
    pub asset_root: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: "scenes/planets.ron".to_string(),
            asset_root: "assets".to_string(),
        }
    }
}

impl SceneConfig {
    /// Resolve an asset path against the asset root
    pub fn asset_path(&self, relative: &str) -> PathBuf {
        Path::new(&self.asset_root).join(relative)
    }
}

/// Slideshow configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideshowConfig {
    /// Minimum time between two accepted advances, in milliseconds
    pub cooldown_ms: u64,
    /// Number of slides before the index wraps to 0
    pub slide_count: usize,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            cooldown_ms: 2000,
            slide_count: 4,
        }
    }
}

impl SlideshowConfig {
    pub fn cooldown(&self) -> Duration {
        Duration::from_millis(self.cooldown_ms)
    }
}

/// Animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Self-rotation speed of every body, radians per second
    pub self_rotation_speed: f32,
    /// Heading scroll duration in seconds
    pub heading_duration: f32,
    /// Heading scroll easing
    pub heading_ease: Easing,
    /// Heading step per slide, in percent of the viewport height
    pub heading_step: f32,
    /// Group rotation duration in seconds
    pub rotation_duration: f32,
    /// Group rotation easing
    pub rotation_ease: Easing,
    /// Group rotation per accepted advance, radians
    pub rotation_step: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            self_rotation_speed: 0.02,
            heading_duration: 0.5,
            heading_ease: Easing::Power1InOut,
            heading_step: 100.0,
            rotation_duration: 2.0,
            rotation_ease: Easing::Power1Out,
            rotation_step: std::f32::consts::FRAC_PI_2,
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderingConfig {
    /// MSAA sample count (1 disables antialiasing)
    pub msaa_samples: u32,
    /// Upper bound on physical pixels per logical pixel
    pub max_pixel_ratio: f64,
    /// Exposure applied before tonemapping the environment map
    pub env_exposure: f32,
    /// Scale of the environment lighting contribution
    pub env_intensity: f32,
    /// Background color [r, g, b, a]
    pub background_color: [f32; 4],
}

impl Default for RenderingConfig {
    fn default() -> Self {
        Self {
            msaa_samples: 4,
            max_pixel_ratio: 2.0,
            env_exposure: 1.0,
            env_intensity: 1.0,
            background_color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

/// Debug configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level (error, warn, info, debug, trace); `RUST_LOG` takes precedence
    pub log_level: String,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Configuration error
#[derive(Debug)]
pub struct ConfigError {
    message: String,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        ConfigError {
            message: e.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}
