//! The five textures a round draws from, loaded once at startup.

use std::path::{Path, PathBuf};

use dash_render::{AssetError, SpritePipeline, Texture};

use crate::config::GameConfig;
use crate::frame::TextureSlot;
use crate::game::SheetSizes;

struct GpuSpriteTexture {
    texture: Texture,
    bind_group: wgpu::BindGroup,
}

/// Owns every loaded texture. Dropping the set releases all of them.
pub struct TextureSet {
    player: GpuSpriteTexture,
    obstacle: GpuSpriteTexture,
    parallax: [GpuSpriteTexture; 3],
}

/// Where each texture lives on disk.
#[derive(Debug, Clone, PartialEq)]
pub struct TexturePaths {
    pub player: PathBuf,
    pub obstacle: PathBuf,
    /// Background, midground, foreground.
    pub parallax: [PathBuf; 3],
}

impl TexturePaths {
    /// Resolve the configured texture names against `asset_root`.
    pub fn from_config(config: &GameConfig, asset_root: &Path) -> Result<Self, String> {
        let [back, mid, fore] = config.parallax.as_slice() else {
            return Err(format!(
                "Expected 3 parallax textures, found {}",
                config.parallax.len()
            ));
        };
        Ok(Self {
            player: asset_root.join(&config.player.texture),
            obstacle: asset_root.join(&config.obstacle.texture),
            parallax: [
                asset_root.join(&back.texture),
                asset_root.join(&mid.texture),
                asset_root.join(&fore.texture),
            ],
        })
    }
}

impl TextureSet {
    /// Load every texture in `paths`. The first failure aborts the whole set;
    /// textures loaded before it are released on return.
    pub fn load(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipeline: &SpritePipeline,
        paths: &TexturePaths,
    ) -> Result<Self, AssetError> {
        let load = |path: &PathBuf| load_texture_asset(device, queue, pipeline, path);
        let [back, mid, fore] = &paths.parallax;
        let set = Self {
            player: load(&paths.player)?,
            obstacle: load(&paths.obstacle)?,
            parallax: [load(back)?, load(mid)?, load(fore)?],
        };
        log::info!(
            "Loaded {} textures ({:.1} MB)",
            TextureSlot::ALL.len(),
            set.estimate_memory_mb()
        );
        Ok(set)
    }

    fn slot(&self, slot: TextureSlot) -> &GpuSpriteTexture {
        match slot {
            TextureSlot::Player => &self.player,
            TextureSlot::Obstacle => &self.obstacle,
            TextureSlot::Background => &self.parallax[0],
            TextureSlot::Midground => &self.parallax[1],
            TextureSlot::Foreground => &self.parallax[2],
        }
    }

    pub fn bind_group(&self, slot: TextureSlot) -> &wgpu::BindGroup {
        &self.slot(slot).bind_group
    }

    pub fn sizes(&self) -> SheetSizes {
        SheetSizes {
            player: self.player.texture.size,
            obstacle: self.obstacle.texture.size,
            parallax: [
                self.parallax[0].texture.size,
                self.parallax[1].texture.size,
                self.parallax[2].texture.size,
            ],
        }
    }

    pub fn estimate_memory_mb(&self) -> f32 {
        let bytes: usize = TextureSlot::ALL
            .iter()
            .map(|&slot| {
                let (w, h) = self.slot(slot).texture.size;
                (w as usize) * (h as usize) * 4
            })
            .sum();
        bytes as f32 / (1024.0 * 1024.0)
    }
}

impl Drop for TextureSet {
    fn drop(&mut self) {
        log::info!("Releasing {} textures", TextureSlot::ALL.len());
    }
}

fn load_texture_asset(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pipeline: &SpritePipeline,
    path: &Path,
) -> Result<GpuSpriteTexture, AssetError> {
    let texture = Texture::from_path(device, queue, path)?;
    let bind_group = pipeline.create_texture_bind_group(device, &texture);
    log::info!(
        "Texture '{}' loaded ({}x{})",
        path.display(),
        texture.size.0,
        texture.size.1
    );
    Ok(GpuSpriteTexture {
        texture,
        bind_group,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_against_asset_root() {
        let paths = TexturePaths::from_config(&GameConfig::default(), Path::new("game"))
            .expect("default config has three layers");
        assert_eq!(paths.player, PathBuf::from("game/textures/scarfy.png"));
        assert_eq!(
            paths.obstacle,
            PathBuf::from("game/textures/12_nebula_spritesheet.png")
        );
        assert_eq!(
            paths.parallax[2],
            PathBuf::from("game/textures/foreground.png")
        );
    }

    #[test]
    fn paths_require_three_layers() {
        let mut config = GameConfig::default();
        config.parallax.truncate(2);
        let err = TexturePaths::from_config(&config, Path::new(".")).expect_err("two layers");
        assert!(err.contains("found 2"));
    }
}
