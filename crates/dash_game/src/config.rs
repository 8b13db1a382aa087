//! Game tuning loaded from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! changes. A missing file means "play with the defaults"; a file that is
//! present but malformed or out of range is a startup error.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use dash_platform::window::PlatformConfig;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub target_fps: u32,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub obstacle: ObstacleConfig,
    pub collision: CollisionConfig,
    /// Back to front: background, midground, foreground.
    pub parallax: Vec<ParallaxLayerConfig>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Downward acceleration in px/s^2.
    pub gravity: f32,
    /// Velocity added on jump in px/s; negative is up.
    pub jump_velocity: f32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    pub texture: String,
    pub columns: u32,
    pub rows: u32,
    pub update_time: f32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ObstacleConfig {
    pub texture: String,
    pub count: usize,
    /// Horizontal gap between consecutive spawns in px.
    pub spacing: f32,
    /// Shared scroll velocity in px/s; negative moves left.
    pub velocity: f32,
    pub columns: u32,
    pub rows: u32,
    pub update_time: f32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CollisionConfig {
    /// Shrinks each obstacle's hitbox on all four sides, in px.
    pub padding: f32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ParallaxLayerConfig {
    pub texture: String,
    /// Leftward scroll speed in px/s.
    pub speed: f32,
    #[serde(default = "default_parallax_scale")]
    pub scale: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            target_fps: 60,
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            obstacle: ObstacleConfig::default(),
            collision: CollisionConfig::default(),
            parallax: vec![
                ParallaxLayerConfig {
                    texture: "textures/far-buildings.png".to_string(),
                    speed: 20.0,
                    scale: 2.0,
                },
                ParallaxLayerConfig {
                    texture: "textures/back-buildings.png".to_string(),
                    speed: 40.0,
                    scale: 2.0,
                },
                ParallaxLayerConfig {
                    texture: "textures/foreground.png".to_string(),
                    speed: 80.0,
                    scale: 2.0,
                },
            ],
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Dapper Dasher!".to_string(),
            width: 512,
            height: 380,
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1_000.0,
            jump_velocity: -600.0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            texture: "textures/scarfy.png".to_string(),
            columns: 6,
            rows: 1,
            update_time: 1.0 / 12.0,
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            texture: "textures/12_nebula_spritesheet.png".to_string(),
            count: 6,
            spacing: 300.0,
            velocity: -200.0,
            columns: 8,
            rows: 8,
            update_time: 1.0 / 16.0,
        }
    }
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self { padding: 50.0 }
    }
}

fn default_parallax_scale() -> f32 {
    2.0
}

impl PlayerConfig {
    pub fn max_frame(&self) -> u32 {
        self.columns.saturating_sub(1)
    }
}

impl ObstacleConfig {
    pub fn max_frame(&self) -> u32 {
        self.columns.saturating_sub(1)
    }
}

impl GameConfig {
    pub fn platform(&self) -> PlatformConfig {
        PlatformConfig {
            title: self.window.title.clone(),
            width: self.window.width,
            height: self.window.height,
        }
    }
}

/// Load the config at `path`, or the defaults when no file exists there.
pub fn load_config_or_default(path: &Path) -> Result<GameConfig, String> {
    if !path.exists() {
        log::info!(
            "No config at '{}', using built-in defaults",
            path.display()
        );
        return Ok(GameConfig::default());
    }
    let config = load_config_from_path(path)?;
    log::info!("Config loaded from '{}'", path.display());
    Ok(config)
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.window.width == 0 || config.window.height == 0 {
        return Err("Config validation failed: window width and height must be > 0".to_string());
    }
    if config.target_fps == 0 {
        return Err("Config validation failed: target_fps must be > 0".to_string());
    }
    if config.physics.gravity <= 0.0 {
        return Err("Config validation failed: physics.gravity must be > 0".to_string());
    }
    if config.physics.jump_velocity >= 0.0 {
        return Err("Config validation failed: physics.jump_velocity must be < 0".to_string());
    }
    if config.player.columns == 0 || config.player.rows == 0 {
        return Err("Config validation failed: player sheet grid must be non-empty".to_string());
    }
    if config.obstacle.columns == 0 || config.obstacle.rows == 0 {
        return Err("Config validation failed: obstacle sheet grid must be non-empty".to_string());
    }
    if config.obstacle.count == 0 {
        return Err("Config validation failed: obstacle.count must be > 0".to_string());
    }
    if config.obstacle.spacing <= 0.0 {
        return Err("Config validation failed: obstacle.spacing must be > 0".to_string());
    }
    if config.obstacle.velocity >= 0.0 {
        return Err("Config validation failed: obstacle.velocity must be < 0".to_string());
    }
    if config.player.update_time < 0.0 || config.obstacle.update_time < 0.0 {
        return Err("Config validation failed: update_time must be >= 0".to_string());
    }
    if config.collision.padding < 0.0 {
        return Err("Config validation failed: collision.padding must be >= 0".to_string());
    }
    if config.parallax.len() != 3 {
        return Err(format!(
            "Config validation failed: expected 3 parallax layers, found {}",
            config.parallax.len()
        ));
    }
    for (i, layer) in config.parallax.iter().enumerate() {
        if layer.speed <= 0.0 || layer.scale <= 0.0 {
            return Err(format!(
                "Config validation failed: parallax layer {} needs positive speed and scale",
                i
            ));
        }
    }

    let textures = [&config.player.texture, &config.obstacle.texture]
        .into_iter()
        .chain(config.parallax.iter().map(|l| &l.texture));
    for texture in textures {
        if texture.is_empty() {
            return Err("Config validation failed: texture path is empty".to_string());
        }
    }
    Ok(())
}
