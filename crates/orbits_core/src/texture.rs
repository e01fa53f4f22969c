//! Decoded image assets
//!
//! [`TextureData`] holds 8-bit sRGB color textures (JPEG/PNG). An
//! [`EnvironmentMap`] holds a linear HDR equirectangular image that the
//! renderer samples for image-based lighting.

use std::io;
use std::path::Path;
use image::imageops::FilterType;

use crate::AssetError;

/// Trait for types that can be loaded from files on a worker thread.
pub trait Asset: Sized + Send + 'static {
    /// Load this asset from the given file path.
    ///
    /// # Errors
    ///
    /// Returns an [`AssetError`] if the file cannot be read or decoded.
    fn load_from_file(path: &Path) -> Result<Self, AssetError>;
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, AssetError> {
    std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AssetError::NotFound(path.display().to_string()),
        _ => AssetError::Io(e),
    })
}

/// RGBA8 color texture in sRGB space
#[derive(Clone, Debug, PartialEq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, first row is the top of the image
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Decode an encoded image (format guessed from the bytes)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            pixels: img.into_raw(),
        })
    }

    /// A 1x1 texture of a single color, used until the real texture arrives
    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: rgba.to_vec(),
        }
    }

    /// Bytes per row of the pixel buffer
    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }

    /// True if neither side exceeds `max_dimension`
    #[inline]
    pub fn fits_within(&self, max_dimension: u32) -> bool {
        self.width <= max_dimension && self.height <= max_dimension
    }

    /// Resample so the longer side is at most `max_dimension`, keeping aspect
    ///
    /// Returns `None` if the pixel buffer does not match the stated size.
    pub fn downscaled(&self, max_dimension: u32) -> Option<TextureData> {
        let (width, height) = fitted_size(self.width, self.height, max_dimension);
        let img = image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())?;
        let resized = image::imageops::resize(&img, width, height, FilterType::Triangle);
        Some(Self {
            width,
            height,
            pixels: resized.into_raw(),
        })
    }
}

/// Largest size with the same aspect whose sides are all `<= max_dimension`
fn fitted_size(width: u32, height: u32, max_dimension: u32) -> (u32, u32) {
    let max_dimension = max_dimension.max(1);
    let longest = width.max(height);
    if longest <= max_dimension {
        return (width, height);
    }
    let scale = max_dimension as f64 / longest as f64;
    let fit = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, max_dimension);
    (fit(width), fit(height))
}

impl Asset for TextureData {
    fn load_from_file(path: &Path) -> Result<Self, AssetError> {
        Self::from_bytes(&read_bytes(path)?)
    }
}

/// Linear HDR equirectangular environment map
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentMap {
    pub width: u32,
    pub height: u32,
    /// Row-major linear RGB radiance
    pub texels: Vec<[f32; 3]>,
}

impl EnvironmentMap {
    /// Decode an HDR (or any supported) image into linear radiance
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)?.to_rgb32f();
        let (width, height) = img.dimensions();
        let texels = img.pixels().map(|p| p.0).collect();
        Ok(Self {
            width,
            height,
            texels,
        })
    }

    /// Mean radiance over all texels (unweighted)
    pub fn average_radiance(&self) -> [f32; 3] {
        if self.texels.is_empty() {
            return [0.0; 3];
        }
        let mut sum = [0.0f64; 3];
        for t in &self.texels {
            for c in 0..3 {
                sum[c] += t[c] as f64;
            }
        }
        let n = self.texels.len() as f64;
        [(sum[0] / n) as f32, (sum[1] / n) as f32, (sum[2] / n) as f32]
    }

    /// Tone-map (Reinhard) and encode to an sRGB RGBA8 texture
    pub fn to_texture(&self, exposure: f32) -> TextureData {
        let mut pixels = Vec::with_capacity(self.texels.len() * 4);
        for t in &self.texels {
            for c in t {
                let v = (c * exposure).max(0.0);
                pixels.push(encode_srgb(v / (1.0 + v)));
            }
            pixels.push(255);
        }
        TextureData {
            width: self.width,
            height: self.height,
            pixels,
        }
    }
}

impl Asset for EnvironmentMap {
    fn load_from_file(path: &Path) -> Result<Self, AssetError> {
        Self::from_bytes(&read_bytes(path)?)
    }
}

/// Linear [0, 1] to 8-bit sRGB
fn encode_srgb(linear: f32) -> u8 {
    let l = linear.clamp(0.0, 1.0);
    let s = if l <= 0.003_130_8 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    };
    (s * 255.0 + 0.5) as u8
}
