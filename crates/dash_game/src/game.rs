//! Round simulation: everything that changes from tick to tick.
//!
//! `GameState` owns the player, the obstacles, the finish line, the parallax
//! offsets and the outcome. It knows nothing about the GPU; the only facts it
//! takes from loaded textures are their pixel sizes.

use glam::Vec2;

use dash_core::AnimFrame;

use crate::collision::{first_hit, validate_padding};
use crate::config::GameConfig;
use crate::outcome::Outcome;
use crate::physics::Player;
use crate::scroll::{ParallaxLayer, ParallaxScroll};

/// Pixel dimensions of the five sprite sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetSizes {
    pub player: (u32, u32),
    pub obstacle: (u32, u32),
    /// Background, midground, foreground.
    pub parallax: [(u32, u32); 3],
}

/// Input facts for one fixed step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump key went down since the last consumed frame.
    pub jump_pressed: bool,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub sheets: SheetSizes,
    pub player: Player,
    pub obstacles: Vec<AnimFrame>,
    pub finish_line: f32,
    /// Sticky for the rest of the round once set.
    pub collided: bool,
    pub outcome: Outcome,
    pub scroll: ParallaxScroll,
    pub ticks: u64,
}

impl GameState {
    pub fn new(config: GameConfig, sheets: SheetSizes) -> Result<Self, String> {
        let window_w = config.window.width as f32;
        let window_h = config.window.height as f32;

        let mut player_anim = AnimFrame::from_sheet(
            sheets.player,
            config.player.columns,
            config.player.rows,
            config.player.update_time,
            Vec2::ZERO,
        );
        player_anim.pos = Vec2::new(
            window_w / 2.0 - player_anim.rec.width / 2.0,
            window_h - player_anim.rec.height,
        );

        let obstacles: Vec<AnimFrame> = (0..config.obstacle.count)
            .map(|i| {
                let mut anim = AnimFrame::from_sheet(
                    sheets.obstacle,
                    config.obstacle.columns,
                    config.obstacle.rows,
                    config.obstacle.update_time,
                    Vec2::ZERO,
                );
                anim.pos = Vec2::new(
                    window_w + i as f32 * config.obstacle.spacing,
                    window_h - anim.rec.height,
                );
                anim
            })
            .collect();
        let Some(last) = obstacles.last() else {
            return Err("Cannot start a round without obstacles".to_string());
        };
        let finish_line = last.pos.x;
        validate_padding(config.collision.padding, last.rec.width, last.rec.height)?;

        let [back_cfg, mid_cfg, fore_cfg] = config.parallax.as_slice() else {
            return Err(format!(
                "Expected 3 parallax layers, found {}",
                config.parallax.len()
            ));
        };
        let [background, midground, foreground] = sheets.parallax;
        let scroll = ParallaxScroll::new([
            ParallaxLayer::new(background.0, back_cfg.scale, back_cfg.speed),
            ParallaxLayer::new(midground.0, mid_cfg.scale, mid_cfg.speed),
            ParallaxLayer::new(foreground.0, fore_cfg.scale, fore_cfg.speed),
        ]);

        Ok(Self {
            player: Player::new(player_anim),
            obstacles,
            finish_line,
            collided: false,
            outcome: Outcome::Playing,
            scroll,
            ticks: 0,
            sheets,
            config,
        })
    }

    pub fn ground_y(&self) -> f32 {
        self.config.window.height as f32
    }

    /// Advance the round by one fixed step of `dt` seconds.
    ///
    /// Simulation keeps running after the round is decided; only the
    /// rendering of sprites stops.
    pub fn update(&mut self, input: TickInput, dt: f32) {
        self.ticks += 1;

        let ground_y = self.ground_y();
        self.player
            .step(input.jump_pressed, dt, ground_y, &self.config.physics);

        // The running cycle freezes mid-jump.
        if !self.player.in_air {
            self.player.anim.advance(dt, self.config.player.max_frame());
        }
        let obstacle_max = self.config.obstacle.max_frame();
        for obstacle in &mut self.obstacles {
            obstacle.advance(dt, obstacle_max);
        }

        self.scroll.advance(dt);

        let dx = self.config.obstacle.velocity * dt;
        for obstacle in &mut self.obstacles {
            obstacle.pos.x += dx;
        }
        self.finish_line += dx;

        if let Some(index) = first_hit(
            &self.player.anim.bounds(),
            &self.obstacles,
            self.config.collision.padding,
        ) {
            if !self.collided {
                log::info!("Collision with obstacle {} at tick {}", index, self.ticks);
            }
            self.collided = true;
        }

        let next = self
            .outcome
            .resolve(self.collided, self.player.anim.pos.x, self.finish_line);
        if next != self.outcome {
            log::info!(
                "Round {} after {} ticks ({:.2}s)",
                next.label().to_lowercase(),
                self.ticks,
                self.ticks as f32 * dt
            );
            self.outcome = next;
        }
    }

    /// Pixels the finish line still has to travel to reach the player.
    pub fn distance_to_finish(&self) -> f32 {
        (self.finish_line - self.player.anim.pos.x).max(0.0)
    }
}
