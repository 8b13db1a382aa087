//! Parallax background scrolling.
//!
//! Each layer is drawn as two side-by-side tiles of its scaled texture.
//! The pair slides left and snaps back to offset 0 once the first tile has
//! fully left the screen, which the second tile hides.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    /// Leftward speed in px/s.
    pub speed: f32,
    /// Rendered width of one tile: texture width times scale.
    pub tile_width: f32,
    pub scale: f32,
    pub offset: f32,
}

impl ParallaxLayer {
    pub fn new(texture_width: u32, scale: f32, speed: f32) -> Self {
        Self {
            speed,
            tile_width: texture_width as f32 * scale,
            scale,
            offset: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.offset -= self.speed * dt;
        if self.offset <= -self.tile_width {
            self.offset = 0.0;
        }
    }

    /// X positions of the two tiles.
    pub fn tile_positions(&self) -> [f32; 2] {
        [self.offset, self.offset + self.tile_width]
    }
}

/// Background, midground and foreground, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxScroll {
    pub layers: [ParallaxLayer; 3],
}

impl ParallaxScroll {
    pub fn new(layers: [ParallaxLayer; 3]) -> Self {
        Self { layers }
    }

    pub fn advance(&mut self, dt: f32) {
        for layer in &mut self.layers {
            layer.advance(dt);
        }
    }
}
