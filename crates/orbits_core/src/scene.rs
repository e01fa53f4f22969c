//! Scene layout serialization
//!
//! A [`SceneDescription`] captures everything the scene builder needs: the
//! backdrop shell, the orbit ring, the bodies and the lighting assets. It can
//! be loaded from and saved to RON files; the default value is the stock
//! four-planet layout.

use serde::{Serialize, Deserialize};
use std::fs;
use std::io;
use std::path::Path;

/// One orbiting body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescription {
    /// Display name, also used as the slide heading
    pub name: String,
    /// Color texture path, relative to the asset root
    pub texture: String,
}

impl BodyDescription {
    pub fn new(name: impl Into<String>, texture: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            texture: texture.into(),
        }
    }
}

/// Serializable layout of the orbit scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneDescription {
    /// Scene name (for display/debugging)
    pub name: String,
    /// Equirectangular HDR environment map
    pub environment_map: Option<String>,
    /// Ambient light color (RGB)
    pub ambient_color: [f32; 3],
    /// Ambient light intensity
    pub ambient_intensity: f32,
    /// Starfield texture on the inside of the backdrop shell
    pub backdrop_texture: Option<String>,
    /// Backdrop shell radius
    pub backdrop_radius: f32,
    /// Backdrop sphere segments (width, height)
    pub backdrop_segments: [u32; 2],
    /// Backdrop opacity
    pub backdrop_opacity: f32,
    /// Radius of each orbiting body
    pub body_radius: f32,
    /// Body sphere segments (width, height)
    pub body_segments: [u32; 2],
    /// Radius of the circle the bodies sit on
    pub orbit_radius: f32,
    /// Fixed tilt of the orbit group about X (radians)
    pub orbit_tilt: f32,
    /// Vertical offset of the orbit group
    pub orbit_height: f32,
    /// Bodies in placement order
    pub bodies: Vec<BodyDescription>,
}

impl Default for SceneDescription {
    fn default() -> Self {
        Self {
            name: "planets".to_string(),
            environment_map: Some("hdri/moonlit_golf_1k.hdr".to_string()),
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 1.0,
            backdrop_texture: Some("stars.jpg".to_string()),
            backdrop_radius: 50.0,
            backdrop_segments: [65, 65],
            backdrop_opacity: 0.5,
            body_radius: 1.4,
            body_segments: [64, 64],
            orbit_radius: 4.4,
            orbit_tilt: 0.1,
            orbit_height: -0.9,
            bodies: vec![
                BodyDescription::new("Csilla", "csilla/csilla.jpg"),
                BodyDescription::new("Earth", "earth/earth.jpg"),
                BodyDescription::new("Venus", "venus/venus.jpg"),
                BodyDescription::new("Volcanic", "volcanic/volcanicJpg.jpg"),
            ],
        }
    }
}

impl SceneDescription {
    /// Load a scene description from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let scene = ron::from_str(&contents)?;
        Ok(scene)
    }

    /// Save a scene description to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Number of orbiting bodies
    #[inline]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Body names in placement order, used as slide headings
    pub fn headings(&self) -> Vec<String> {
        self.bodies.iter().map(|b| b.name.clone()).collect()
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}
