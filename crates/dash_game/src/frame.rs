//! Turns a `GameState` into this frame's sprite batch and banner.
//!
//! Paint order is back to front: the three parallax layers (two tiles
//! each), then, only while the round is undecided, the obstacles and the
//! player on top.

use dash_core::Rect;
use dash_hud::Banner;
use dash_render::{uv_rect, SpriteBatch, FULL_UV, WHITE};

use crate::game::GameState;
use crate::outcome::Outcome;

pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::WHITE;

pub const BANNER_FONT_SIZE: f32 = 40.0;
const LOSE_COLOR: [u8; 3] = [230, 41, 55];
const WIN_COLOR: [u8; 3] = [200, 200, 200];

/// Which of the five loaded textures a draw call samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    Player,
    Obstacle,
    Background,
    Midground,
    Foreground,
}

impl TextureSlot {
    pub const ALL: [TextureSlot; 5] = [
        TextureSlot::Background,
        TextureSlot::Midground,
        TextureSlot::Foreground,
        TextureSlot::Obstacle,
        TextureSlot::Player,
    ];

    pub const PARALLAX: [TextureSlot; 3] = [
        TextureSlot::Background,
        TextureSlot::Midground,
        TextureSlot::Foreground,
    ];
}

pub fn build_frame(game: &GameState) -> SpriteBatch<TextureSlot> {
    let mut batch = SpriteBatch::with_capacity(6 + game.obstacles.len() + 1);

    for ((layer, slot), size) in game
        .scroll
        .layers
        .iter()
        .zip(TextureSlot::PARALLAX)
        .zip(game.sheets.parallax)
    {
        let tile_height = size.1 as f32 * layer.scale;
        for x in layer.tile_positions() {
            batch.push_quad(
                slot,
                Rect::new(x, 0.0, layer.tile_width, tile_height),
                FULL_UV,
                WHITE,
            );
        }
    }

    if game.outcome.is_terminal() {
        return batch;
    }

    for obstacle in &game.obstacles {
        batch.push_quad(
            TextureSlot::Obstacle,
            obstacle.bounds(),
            uv_rect(obstacle.rec, game.sheets.obstacle),
            WHITE,
        );
    }

    let player = &game.player.anim;
    batch.push_quad(
        TextureSlot::Player,
        player.bounds(),
        uv_rect(player.rec, game.sheets.player),
        WHITE,
    );

    batch
}

/// Outcome text, anchored a quarter of the way across and halfway down.
pub fn banner_for(outcome: Outcome, window_size: (u32, u32)) -> Option<Banner> {
    let (text, color) = match outcome {
        Outcome::Playing => return None,
        Outcome::Lost => ("You Lose", LOSE_COLOR),
        Outcome::Won => ("You Won", WIN_COLOR),
    };
    Some(Banner {
        text: text.to_string(),
        position: (window_size.0 as f32 / 4.0, window_size.1 as f32 / 2.0),
        font_size: BANNER_FONT_SIZE,
        color,
    })
}
