use dash_core::AnimFrame;

use crate::config::PhysicsConfig;

/// The jumping sprite. It never moves horizontally; the world scrolls past.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub anim: AnimFrame,
    /// Vertical velocity in px/s, positive is down.
    pub velocity: f32,
    pub in_air: bool,
}

impl Player {
    pub fn new(anim: AnimFrame) -> Self {
        Self {
            anim,
            velocity: 0.0,
            in_air: false,
        }
    }

    /// Bottom edge at or below the ground line.
    pub fn is_on_ground(&self, ground_y: f32) -> bool {
        self.anim.pos.y >= ground_y - self.anim.rec.height
    }

    /// One fixed step of vertical motion. `jump_pressed` must be the
    /// edge-triggered press, not the held state.
    pub fn step(&mut self, jump_pressed: bool, dt: f32, ground_y: f32, config: &PhysicsConfig) {
        if self.is_on_ground(ground_y) {
            self.velocity = 0.0;
            self.in_air = false;
        } else {
            self.velocity += config.gravity * dt;
            self.in_air = true;
        }

        // Jump is edge-triggered and only legal from grounded state.
        if jump_pressed && !self.in_air {
            self.velocity += config.jump_velocity;
            log::debug!("Jump: velocity {:.0} px/s", self.velocity);
        }

        self.anim.pos.y += self.velocity * dt;
    }
}
