//! GPU textures for sprites.
//!
//! This module provides [`Texture`], a wrapper around a WGPU texture together with its
//! view and sampler. Sprite textures are uploaded flipped, so that the texture-space
//! origin is the bottom-left corner of the image, and with a full mip chain.

use anyhow::*;
use image::imageops::FilterType;

/// A sampled 2D texture with view and sampler.
///
/// Typically created via [`from_bytes`](Self::from_bytes) or
/// [`from_image`](Self::from_image). [`empty`](Self::empty) provides a blank stand-in
/// for images that could not be loaded.
#[derive(Debug)]
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// Colour format of every sprite texture.
    pub const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

    /// Load a texture from raw byte data (image file contents).
    ///
    /// # Arguments
    ///
    /// * `bytes` represent raw image file data (PNG, JPEG, etc.)
    /// * `label` is used as a debug name for the GPU resource
    ///
    /// The format is detected from the data.
    pub fn from_bytes(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        bytes: &[u8],
        label: &str,
    ) -> Result<Self> {
        let img = image::load_from_memory(bytes)
            .with_context(|| format!("Cannot decode image {label}"))?;
        Self::from_image(device, queue, &img, Some(label))
    }

    /// Upload a decoded image.
    ///
    /// The image is flipped vertically and converted to RGBA, so three-channel sources
    /// end up fully opaque. Every mip level is generated on the CPU and written separately
    /// because WGPU has no built-in mipmap generation.
    pub fn from_image(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        img: &image::DynamicImage,
        label: Option<&str>,
    ) -> Result<Self> {
        let rgba = img.flipv().to_rgba8();
        let (width, height) = rgba.dimensions();
        ensure!(
            width > 0 && height > 0,
            "Cannot create a texture from an empty image ({:?})",
            label
        );
        let mip_level_count = mip_level_count(width, height);

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let mut level_image = rgba;
        for mip_level in 0..mip_level_count {
            let (level_width, level_height) = level_image.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    aspect: wgpu::TextureAspect::All,
                    texture: &texture,
                    mip_level,
                    origin: wgpu::Origin3d::ZERO,
                },
                &level_image,
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * level_width),
                    rows_per_image: Some(level_height),
                },
                wgpu::Extent3d {
                    width: level_width,
                    height: level_height,
                    depth_or_array_layers: 1,
                },
            );
            if mip_level + 1 < mip_level_count {
                level_image = image::imageops::resize(
                    &level_image,
                    (level_width / 2).max(1),
                    (level_height / 2).max(1),
                    FilterType::Triangle,
                );
            }
        }

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sprite_sampler(device);

        Ok(Self {
            texture,
            view,
            sampler,
        })
    }

    /// A single transparent texel.
    ///
    /// Used in place of images that failed to load so the sprite still draws, just blank.
    pub fn empty(device: &wgpu::Device, queue: &wgpu::Queue, label: &str) -> Texture {
        let size = wgpu::Extent3d {
            width: 1,
            height: 1,
            depth_or_array_layers: 1,
        };

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: Self::FORMAT,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                aspect: wgpu::TextureAspect::All,
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
            },
            &[0, 0, 0, 0],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            size,
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = create_sprite_sampler(device);
        Texture {
            texture,
            view,
            sampler,
        }
    }
}

/// Number of mip levels down to 1x1 for the given base size.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

/// Linear filtering between texels and mip levels, repeating outside `[0, 1]`.
///
/// Repeat addressing is what makes scroll offsets wrap around for backgrounds.
pub fn create_sprite_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("sprite sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}
