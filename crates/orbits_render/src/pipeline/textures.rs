//! GPU textures built from decoded image data

use std::borrow::Cow;

use orbits_core::TextureData;

/// Format used for every color texture (decoded assets are sRGB encoded)
pub const COLOR_TEXTURE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// A sampled 2D texture and its default view
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub size: (u32, u32),
}

impl GpuTexture {
    /// Upload RGBA8 pixels into a new texture
    ///
    /// Images larger than the device's 2D texture limit are downscaled first.
    pub fn from_data(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &TextureData,
        label: &str,
    ) -> Self {
        let data = fit_to_limit(data, device.limits().max_texture_dimension_2d, label);
        let width = data.width.max(1);
        let height = data.height.max(1);
        let extent = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: extent,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: COLOR_TEXTURE_FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            texture.as_image_copy(),
            &data.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(width * 4),
                rows_per_image: Some(height),
            },
            extent,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self {
            texture,
            view,
            size: (width, height),
        }
    }

    /// 1x1 white texture used until a real texture finishes loading
    pub fn placeholder(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        Self::from_data(
            device,
            queue,
            &TextureData::solid([255, 255, 255, 255]),
            "Placeholder Texture",
        )
    }
}

/// Texture data that the device can accept
///
/// Borrowed when it already fits. Oversized images are resampled so the
/// longer side equals `max_dimension`; a malformed oversized buffer falls
/// back to the white placeholder.
pub fn fit_to_limit<'a>(data: &'a TextureData, max_dimension: u32, label: &str) -> Cow<'a, TextureData> {
    if data.fits_within(max_dimension) {
        return Cow::Borrowed(data);
    }
    match data.downscaled(max_dimension) {
        Some(smaller) => {
            log::warn!(
                "{} is {}x{}, over the device limit of {}; downscaled to {}x{}",
                label,
                data.width,
                data.height,
                max_dimension,
                smaller.width,
                smaller.height
            );
            Cow::Owned(smaller)
        }
        None => {
            log::warn!(
                "{} is {}x{} with a mismatched pixel buffer; using placeholder",
                label,
                data.width,
                data.height
            );
            Cow::Owned(TextureData::solid([255, 255, 255, 255]))
        }
    }
}

/// Linear sampler that wraps horizontally and clamps vertically
///
/// Matches both sphere UVs and equirectangular maps, whose U seam wraps.
pub fn create_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Mesh Sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: u32, height: u32) -> TextureData {
        TextureData {
            width,
            height,
            pixels: [200, 100, 50, 255].repeat((width * height) as usize),
        }
    }

    #[test]
    fn test_fitting_texture_is_borrowed() {
        let tex = uniform(8, 4);
        assert!(matches!(fit_to_limit(&tex, 8, "Test"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_oversized_texture_fits_limit() {
        // Same 2:1 shape as a 16k x 8k planet map against an 8192 limit
        let tex = uniform(32, 16);
        let fitted = fit_to_limit(&tex, 16, "Test");
        assert!(matches!(fitted, Cow::Owned(_)));
        assert_eq!((fitted.width, fitted.height), (16, 8));
        assert_eq!(fitted.pixels.len(), (fitted.bytes_per_row() * fitted.height) as usize);
    }

    #[test]
    fn test_malformed_oversized_texture_becomes_placeholder() {
        let tex = TextureData {
            width: 32,
            height: 32,
            pixels: vec![0; 4],
        };
        let fitted = fit_to_limit(&tex, 16, "Test");
        assert_eq!((fitted.width, fitted.height), (1, 1));
        assert_eq!(fitted.pixels, vec![255; 4]);
    }
}
