//! GPU texture upload from image files.
//!
//! Sprite sheets are decoded with the `image` crate, converted to RGBA8 and
//! copied into an sRGB texture with nearest filtering (pixel art stays crisp
//! at the 2x background scale).

use std::fmt;
use std::path::{Path, PathBuf};

/// Why an asset could not be turned into a texture. Every variant is fatal
/// at startup: nothing can be drawn without sprite geometry.
#[derive(Debug)]
pub enum AssetError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Decode {
        path: PathBuf,
        reason: String,
    },
    Empty {
        path: PathBuf,
    },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "Failed to read texture '{}': {source}", path.display())
            }
            Self::Decode { path, reason } => {
                write!(f, "Failed to decode texture '{}': {reason}", path.display())
            }
            Self::Empty { path } => write!(f, "Texture '{}' has zero size", path.display()),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Decode an encoded image into RGBA8 pixels plus dimensions.
pub fn decode_rgba8(bytes: &[u8], path: &Path) -> Result<(Vec<u8>, u32, u32), AssetError> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| AssetError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?
        .to_rgba8();
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AssetError::Empty {
            path: path.to_path_buf(),
        });
    }
    Ok((image.into_raw(), width, height))
}

pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
    pub size: (u32, u32),
}

impl Texture {
    pub fn from_path(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: &Path,
    ) -> Result<Self, AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let (rgba, width, height) = decode_rgba8(&bytes, path)?;
        let label = path.to_string_lossy();
        Ok(Self::from_rgba8(device, queue, &rgba, width, height, &label))
    }

    pub fn from_rgba8(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        rgba: &[u8],
        width: u32,
        height: u32,
        label: &str,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some(label),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        Self {
            texture,
            view,
            sampler,
            size: (width, height),
        }
    }
}
